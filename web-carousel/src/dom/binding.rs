use crate::dom::{DomSurface, Listener, WebScheduler};
use anyhow::{anyhow, Result};
use carousel::{CarouselConfig, Navigable, RotatingDisplay};
use std::{cell::RefCell, rc::Rc};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, KeyboardEvent, MouseEvent, TouchEvent};

pub type WebDisplay = RotatingDisplay<DomSurface, WebScheduler>;

const STAGE_SELECTOR: &str = ".carousel-stage";
const ITEM_SELECTOR: &str = ".carousel-image";
const PREV_SELECTOR: &str = r#".nav-btn[id^="prevBtn"]"#;
const NEXT_SELECTOR: &str = r#".nav-btn[id^="nextBtn"]"#;
const INDICATORS_SELECTOR: &str = ".carousel-indicators";

/// 一个容器上的轮播实例，以及它挂在页面上的所有监听
pub struct Binding {
    display: Rc<RefCell<WebDisplay>>,
    _listeners: Vec<Listener>,
}

impl Binding {
    /// Bind a display to `container`. Fails when the container lacks any
    /// element of the markup contract.
    pub fn bind(
        document: &Document,
        container: &Element,
        start_offset: usize,
        keyboard: bool,
        config: &CarouselConfig,
    ) -> Result<Self> {
        let stage = query(container, STAGE_SELECTOR)?;
        let prev_button = query(container, PREV_SELECTOR)?;
        let next_button = query(container, NEXT_SELECTOR)?;
        let indicator_box = query(container, INDICATORS_SELECTOR)?;
        let items = query_all(container, ITEM_SELECTOR)?;

        let scheduler = WebScheduler::new();
        let sink = scheduler.sink();
        let surface = DomSurface::new(document.clone(), items.clone(), indicator_box);
        let display = Rc::new(RefCell::new(RotatingDisplay::new(
            surface,
            scheduler,
            items.len(),
            start_offset,
            config.clone(),
        )?));
        {
            let display = Rc::downgrade(&display);
            sink.connect(move |event| {
                if let Some(display) = display.upgrade() {
                    display.borrow_mut().on_timer(event);
                }
            });
        }

        let mut listeners = vec![
            listen(&prev_button, "click", &display, |display, event| {
                event.prevent_default();
                event.stop_propagation();
                display.prev();
            })?,
            listen(&next_button, "click", &display, |display, event| {
                event.prevent_default();
                event.stop_propagation();
                display.next();
            })?,
        ];

        let indicators = display.borrow().surface().indicators().to_vec();
        for (index, indicator) in indicators.iter().enumerate() {
            listeners.push(listen(indicator, "click", &display, move |display, _| {
                display.indicator_clicked(index)
            })?);
        }

        for (index, item) in items.iter().enumerate() {
            listeners.push(listen(item, "click", &display, move |display, event| {
                event.prevent_default();
                display.item_clicked(index);
            })?);
        }

        listeners.extend(bind_swipe(&stage, &display)?);

        // 鼠标悬停时暂停自动播放
        listeners.push(listen(container, "mouseenter", &display, |display, _| {
            display.pointer_entered()
        })?);
        listeners.push(listen(container, "mouseleave", &display, |display, _| {
            display.pointer_left()
        })?);

        if keyboard {
            listeners.push(listen(document, "keydown", &display, |display, event| {
                let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                if display.key_pressed(&event.key()) {
                    event.prevent_default();
                }
            })?);
        }

        Ok(Self {
            display,
            _listeners: listeners,
        })
    }

    pub fn display(&self) -> Rc<RefCell<WebDisplay>> {
        self.display.clone()
    }
}

fn bind_swipe(stage: &Element, display: &Rc<RefCell<WebDisplay>>) -> Result<Vec<Listener>> {
    Ok(vec![
        listen(stage, "touchstart", display, |display, event| {
            let touch = event
                .dyn_ref::<TouchEvent>()
                .and_then(|event| event.touches().get(0));
            if let Some(touch) = touch {
                display.swipe_started(touch.client_x() as f64, touch.client_y() as f64);
            }
        })?,
        listen(stage, "touchend", display, |display, event| {
            let touch = event
                .dyn_ref::<TouchEvent>()
                .and_then(|event| event.changed_touches().get(0));
            match touch {
                Some(touch) => {
                    display.swipe_ended(touch.client_x() as f64, touch.client_y() as f64)
                }
                None => display.swipe_cancelled(),
            }
        })?,
        // keep the page from scrolling while swiping
        Listener::new(stage, "touchmove", |event| event.prevent_default())?,
        listen(stage, "mousedown", display, |display, event| {
            if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
                display.swipe_started(mouse.client_x() as f64, mouse.client_y() as f64);
                // 阻止图片被拖拽
                mouse.prevent_default();
            }
        })?,
        listen(stage, "mouseup", display, |display, event| {
            if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
                display.swipe_ended(mouse.client_x() as f64, mouse.client_y() as f64);
            }
        })?,
        listen(stage, "mouseleave", display, |display, _| {
            display.swipe_cancelled()
        })?,
    ])
}

fn listen<F>(
    target: &EventTarget,
    name: &'static str,
    display: &Rc<RefCell<WebDisplay>>,
    mut handler: F,
) -> Result<Listener>
where
    F: FnMut(&mut WebDisplay, &Event) + 'static,
{
    let display = Rc::downgrade(display);
    Listener::new(target, name, move |event| {
        if let Some(display) = display.upgrade() {
            handler(&mut *display.borrow_mut(), &event);
        }
    })
}

fn query(container: &Element, selector: &str) -> Result<Element> {
    container
        .query_selector(selector)
        .map_err(|e| anyhow!("invalid selector {selector}: {e:?}"))?
        .ok_or(anyhow!("{selector} not found in carousel container"))
}

fn query_all(container: &Element, selector: &str) -> Result<Vec<Element>> {
    let list = container
        .query_selector_all(selector)
        .map_err(|e| anyhow!("invalid selector {selector}: {e:?}"))?;
    Ok((0..list.length())
        .filter_map(|index| list.item(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}
