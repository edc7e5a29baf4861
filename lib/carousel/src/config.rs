use std::collections::HashSet;

use serde::Deserialize;

use crate::{CarouselError, POSITION_COUNT};

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub carousel: CarouselConfig,
    pub bootstrap: BootstrapConfig,
}

/// Timing and input thresholds shared by every instance.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    /// 必须不短于样式表里的过渡时长，否则位置会错乱
    pub transition_ms: u32,
    /// 跳转时相邻两步的间隔，必须短于 `transition_ms`
    pub jump_step_ms: u32,
    pub autoplay_interval_ms: u32,
    pub swipe_threshold: f64,
    pub autoplay: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    pub slots: Vec<SlotConfig>,
    /// 没有任何已知容器时使用的选择器，兼容旧页面
    pub fallback_selector: String,
    pub fallback_offset: usize,
    pub primary_instance: String,
    /// Only the carousel in this container reacts to arrow keys.
    pub keyboard_container: String,
    pub ready_delay_ms: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SlotConfig {
    pub container_id: String,
    pub name: String,
    pub start_offset: usize,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            transition_ms: 700,
            jump_step_ms: 100,
            autoplay_interval_ms: 4000,
            swipe_threshold: 50.0,
            autoplay: true,
        }
    }
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            slots: vec![
                SlotConfig::new("carousel-1", "carousel1", 2),
                SlotConfig::new("carousel-2", "carousel2", 3),
                SlotConfig::new("carousel-3", "carousel3", 1),
            ],
            fallback_selector: ".carousel-container:not([id])".to_string(),
            fallback_offset: 2,
            primary_instance: "carousel1".to_string(),
            keyboard_container: "carousel-1".to_string(),
            ready_delay_ms: 100,
        }
    }
}

impl SlotConfig {
    pub fn new(container_id: &str, name: &str, start_offset: usize) -> Self {
        Self {
            container_id: container_id.to_string(),
            name: name.to_string(),
            start_offset,
        }
    }
}

impl CarouselConfig {
    pub fn validate(&self) -> Result<(), CarouselError> {
        // a jump step that outlasts the cool-down lets other input in
        // between two steps
        if self.jump_step_ms >= self.transition_ms {
            return Err(CarouselError::JumpStepTooLong {
                jump_step_ms: self.jump_step_ms,
                transition_ms: self.transition_ms,
            });
        }
        if self.autoplay_interval_ms == 0 {
            return Err(CarouselError::ZeroAutoplayInterval);
        }
        Ok(())
    }
}

impl Config {
    /// Parse a (possibly partial) JSON document; missing fields keep their
    /// defaults.
    pub fn from_json(json: &str) -> Result<Self, CarouselError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), CarouselError> {
        self.carousel.validate()?;
        let bootstrap = &self.bootstrap;
        if bootstrap.fallback_offset >= POSITION_COUNT {
            return Err(CarouselError::InvalidStartOffset(bootstrap.fallback_offset));
        }
        let mut names = HashSet::new();
        for slot in &bootstrap.slots {
            if slot.start_offset >= POSITION_COUNT {
                return Err(CarouselError::InvalidStartOffset(slot.start_offset));
            }
            if !names.insert(slot.name.as_str()) {
                return Err(CarouselError::DuplicateInstance(slot.name.clone()));
            }
        }
        Ok(())
    }
}
