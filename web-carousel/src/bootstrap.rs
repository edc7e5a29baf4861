use crate::dom::{Binding, Listener, WebDisplay};
use anyhow::{anyhow, Result};
use carousel::{plan_bootstrap, slide_index, Config, PlannedInstance, Registry};
use gloo_timers::callback::Timeout;
use std::{cell::RefCell, rc::Rc};
use wasm_bindgen::prelude::*;
use web_sys::{window, Window};
use yew::prelude::*;

/// 页面内嵌配置的元素 id
const CONFIG_ELEMENT_ID: &str = "carousel-config";

type SharedRegistry = Rc<RefCell<Registry<WebDisplay>>>;

/// Every carousel started on the page. Dropping it stops them all and
/// removes the global functions.
pub struct Page {
    _bindings: Vec<Binding>,
    _visibility: Listener,
    _globals: Globals,
}

/// Optional JSON config embedded in the page, defaults otherwise.
pub fn load_config() -> Config {
    let text = window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|element| element.text_content());
    let Some(text) = text else {
        return Config::default();
    };
    Config::from_json(&text).unwrap_or_else(|e| {
        log::warn!("ignore carousel config: {e}");
        Config::default()
    })
}

/// Bind a carousel to every known container present in the page.
///
/// A container with broken markup is logged and skipped; the others still
/// start.
pub fn start(config: &Config) -> Result<Page> {
    let window = window().ok_or(anyhow!("window not found"))?;
    let document = window.document().ok_or(anyhow!("document not found"))?;

    let has_fallback = document
        .query_selector(&config.bootstrap.fallback_selector)
        .map_err(|e| anyhow!("invalid fallback selector: {e:?}"))?
        .is_some();
    let plan = plan_bootstrap(
        &config.bootstrap,
        |id| document.get_element_by_id(id).is_some(),
        has_fallback,
    );

    let mut registry = Registry::new(config.bootstrap.primary_instance.clone());
    let mut bindings = Vec::new();
    for planned in plan {
        match planned {
            PlannedInstance::Named {
                container_id,
                name,
                start_offset,
            } => {
                let Some(container) = document.get_element_by_id(&container_id) else {
                    continue;
                };
                let keyboard = container_id == config.bootstrap.keyboard_container;
                let binding = match Binding::bind(
                    &document,
                    &container,
                    start_offset,
                    keyboard,
                    &config.carousel,
                ) {
                    Ok(binding) => binding,
                    Err(e) => {
                        log::error!("bind carousel #{container_id} error: {e}");
                        continue;
                    }
                };
                if let Err(e) = registry.register(&name, binding.display()) {
                    log::error!("register carousel #{container_id} error: {e}");
                    continue;
                }
                bindings.push(binding);
            }
            PlannedInstance::Legacy {
                selector,
                start_offset,
            } => {
                let Ok(Some(container)) = document.query_selector(&selector) else {
                    continue;
                };
                match Binding::bind(&document, &container, start_offset, false, &config.carousel) {
                    Ok(binding) => {
                        registry.set_legacy(binding.display());
                        bindings.push(binding);
                    }
                    Err(e) => log::error!("bind carousel {selector} error: {e}"),
                }
            }
        }
    }
    log::info!(
        "{} carousel(s) started: [{}]",
        registry.len(),
        registry.names().collect::<Vec<_>>().join(", ")
    );

    let registry = Rc::new(RefCell::new(registry));
    let visibility = {
        let registry = registry.clone();
        let hidden_document = document.clone();
        Listener::new(&document, "visibilitychange", move |_| {
            registry
                .borrow()
                .visibility_changed(hidden_document.hidden());
        })?
    };
    let globals = Globals::install(&window, registry)?;

    Ok(Page {
        _bindings: bindings,
        _visibility: visibility,
        _globals: globals,
    })
}

/// Start the page's carousels once the component has mounted and keep
/// them alive until it unmounts.
#[hook]
pub fn use_carousels() {
    let page = use_mut_ref(|| None::<Page>);
    use_effect_with((), move |_| {
        let config = load_config();
        let delay = config.bootstrap.ready_delay_ms;
        let timeout = {
            let page = page.clone();
            Timeout::new(delay, move || match start(&config) {
                Ok(started) => *page.borrow_mut() = Some(started),
                Err(e) => log::error!("start carousels error: {e}"),
            })
        };
        move || {
            drop(timeout);
            page.borrow_mut().take();
        }
    });
}

/// `window.carouselNext` / `carouselPrev` / `carouselGoTo` for page
/// scripts.
struct Globals {
    window: Window,
    _closures: Vec<Closure<dyn Fn(JsValue, JsValue)>>,
}

const GLOBAL_NEXT: &str = "carouselNext";
const GLOBAL_PREV: &str = "carouselPrev";
const GLOBAL_GO_TO: &str = "carouselGoTo";

impl Globals {
    fn install(window: &Window, registry: SharedRegistry) -> Result<Self> {
        let next = {
            let registry = registry.clone();
            Closure::wrap(Box::new(move |name: JsValue, _: JsValue| {
                registry.borrow().next(name.as_string().as_deref());
            }) as Box<dyn Fn(JsValue, JsValue)>)
        };
        let prev = {
            let registry = registry.clone();
            Closure::wrap(Box::new(move |name: JsValue, _: JsValue| {
                registry.borrow().prev(name.as_string().as_deref());
            }) as Box<dyn Fn(JsValue, JsValue)>)
        };
        let go_to = Closure::wrap(Box::new(move |index: JsValue, name: JsValue| {
            match index.as_f64().and_then(slide_index) {
                Some(index) => {
                    registry.borrow().go_to(index, name.as_string().as_deref());
                }
                None => log::warn!("{GLOBAL_GO_TO} needs a whole number index, got {index:?}"),
            }
        }) as Box<dyn Fn(JsValue, JsValue)>);

        let installs = [(GLOBAL_NEXT, &next), (GLOBAL_PREV, &prev), (GLOBAL_GO_TO, &go_to)];
        for (name, closure) in installs {
            js_sys::Reflect::set(window, &JsValue::from_str(name), closure.as_ref())
                .map_err(|e| anyhow!("install {name} error: {e:?}"))?;
        }

        Ok(Self {
            window: window.clone(),
            _closures: vec![next, prev, go_to],
        })
    }
}

impl Drop for Globals {
    fn drop(&mut self) {
        for name in [GLOBAL_NEXT, GLOBAL_PREV, GLOBAL_GO_TO] {
            _ = js_sys::Reflect::delete_property(&self.window, &JsValue::from_str(name));
        }
    }
}
