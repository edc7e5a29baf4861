use std::{cell::RefCell, collections::BTreeMap, rc::Rc};

use crate::{BootstrapConfig, CarouselError, Navigable};

/// 页面上所有轮播实例，按名字索引
///
/// A page either has named instances or, for old markup without ids, a
/// single legacy instance. Lookups by name fall back to the legacy one.
pub struct Registry<D: Navigable> {
    primary: String,
    named: BTreeMap<String, Rc<RefCell<D>>>,
    legacy: Option<Rc<RefCell<D>>>,
}

impl<D: Navigable> Registry<D> {
    pub fn new(primary: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            named: BTreeMap::new(),
            legacy: None,
        }
    }

    pub fn register(&mut self, name: &str, display: Rc<RefCell<D>>) -> Result<(), CarouselError> {
        if self.named.contains_key(name) {
            return Err(CarouselError::DuplicateInstance(name.to_string()));
        }
        self.named.insert(name.to_string(), display);
        Ok(())
    }

    pub fn set_legacy(&mut self, display: Rc<RefCell<D>>) {
        self.legacy = Some(display);
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.named.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.named.len() + usize::from(self.legacy.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Instance addressed by `name` (the primary one when `None`), or the
    /// legacy instance when no such name is registered.
    pub fn resolve(&self, name: Option<&str>) -> Option<&Rc<RefCell<D>>> {
        let name = name.unwrap_or(&self.primary);
        self.named.get(name).or(self.legacy.as_ref())
    }

    fn dispatch(&self, name: Option<&str>, op: impl FnOnce(&mut D)) -> bool {
        match self.resolve(name) {
            Some(display) => {
                op(&mut *display.borrow_mut());
                true
            }
            None => {
                log::warn!(
                    "no carousel instance named {}",
                    name.unwrap_or(&self.primary)
                );
                false
            }
        }
    }

    /// Returns whether an instance received the call.
    pub fn next(&self, name: Option<&str>) -> bool {
        self.dispatch(name, |display| display.next())
    }

    pub fn prev(&self, name: Option<&str>) -> bool {
        self.dispatch(name, |display| display.prev())
    }

    pub fn go_to(&self, index: i64, name: Option<&str>) -> bool {
        self.dispatch(name, |display| display.jump_to(index))
    }

    /// Fan a page visibility change out to every instance.
    pub fn visibility_changed(&self, hidden: bool) {
        for display in self.named.values().chain(self.legacy.iter()) {
            display.borrow_mut().visibility_changed(hidden);
        }
    }
}

/// Slide index from a page script number: only finite whole numbers.
pub fn slide_index(value: f64) -> Option<i64> {
    (value.is_finite() && value.fract() == 0.0).then_some(value as i64)
}

/// 启动时要创建的实例
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannedInstance {
    Named {
        container_id: String,
        name: String,
        start_offset: usize,
    },
    Legacy {
        selector: String,
        start_offset: usize,
    },
}

/// Which containers get an instance: every well-known container that is
/// present, or the legacy container when none of them is.
pub fn plan_bootstrap(
    config: &BootstrapConfig,
    is_present: impl Fn(&str) -> bool,
    has_fallback: bool,
) -> Vec<PlannedInstance> {
    let planned: Vec<_> = config
        .slots
        .iter()
        .filter(|slot| is_present(&slot.container_id))
        .map(|slot| PlannedInstance::Named {
            container_id: slot.container_id.clone(),
            name: slot.name.clone(),
            start_offset: slot.start_offset,
        })
        .collect();

    if planned.is_empty() && has_fallback {
        return vec![PlannedInstance::Legacy {
            selector: config.fallback_selector.clone(),
            start_offset: config.fallback_offset,
        }];
    }
    planned
}
