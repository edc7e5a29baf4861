use crate::{
    CarouselConfig, CarouselError, Direction, Position, Scheduler, SwipeTracker, TimerEvent,
    TimerHandle, POSITION_COUNT,
};

#[cfg(test)]
mod test;

/// The visual side of a carousel: wherever the classes actually live.
pub trait Surface {
    /// Move item `item` from its old slot (`None` on first layout) to `to`.
    fn place_item(&mut self, item: usize, from: Option<Position>, to: Position);
    /// Replace all indicators with `count` fresh ones, `active` highlighted.
    fn build_indicators(&mut self, count: usize, active: usize);
    fn set_indicator_active(&mut self, index: usize, active: bool);
    /// 页面不可见时自动播放不推进
    fn page_hidden(&self) -> bool;
}

/// Operations reachable from outside an instance (registry, page scripts).
pub trait Navigable {
    fn next(&mut self);
    fn prev(&mut self);
    fn jump_to(&mut self, target: i64);
    fn pause_autoplay(&mut self);
    fn resume_autoplay(&mut self);

    /// Page visibility changed: hidden pauses, visible resumes.
    fn visibility_changed(&mut self, hidden: bool) {
        if hidden {
            self.pause_autoplay();
        } else {
            self.resume_autoplay();
        }
    }
}

/// 3D 轮播组件
///
/// 五个元素依次占据五个位置，每次旋转整体平移一格。
/// 所有状态变化都通过 `rotate_step` 和定时器回调 `on_timer` 完成。
pub struct RotatingDisplay<S: Surface, T: Scheduler> {
    surface: S,
    scheduler: T,
    config: CarouselConfig,
    current_index: usize,
    positions: Vec<Position>,
    animating: bool,
    transition_timer: Option<TimerHandle>,
    autoplay_timer: Option<TimerHandle>,
    swipe: SwipeTracker,
}

impl<S: Surface, T: Scheduler> RotatingDisplay<S, T> {
    /// Bind a display to `item_count` items with the item at
    /// `start_offset` as the conceptual center, lay it out and start
    /// autoplay.
    pub fn new(
        surface: S,
        scheduler: T,
        item_count: usize,
        start_offset: usize,
        config: CarouselConfig,
    ) -> Result<Self, CarouselError> {
        if item_count != POSITION_COUNT {
            return Err(CarouselError::UnsupportedItemCount { found: item_count });
        }
        if start_offset >= POSITION_COUNT {
            return Err(CarouselError::InvalidStartOffset(start_offset));
        }
        config.validate()?;

        let swipe = SwipeTracker::new(config.swipe_threshold);
        let mut display = Self {
            surface,
            scheduler,
            config,
            current_index: start_offset,
            positions: Vec::with_capacity(item_count),
            animating: false,
            transition_timer: None,
            autoplay_timer: None,
            swipe,
        };
        display.initial_layout(item_count);
        if display.config.autoplay {
            display.resume_autoplay();
        }
        Ok(display)
    }

    fn initial_layout(&mut self, item_count: usize) {
        self.positions = (0..item_count)
            .map(|item| Position::initial(item, self.current_index))
            .collect();
        for (item, position) in self.positions.iter().enumerate() {
            self.surface.place_item(item, None, *position);
        }
        // indicator 0 starts active whatever the start offset is; the first
        // rotation corrects it
        self.surface.build_indicators(self.positions.len(), 0);
    }

    #[inline]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[inline]
    pub fn item_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animating
    }

    #[inline]
    pub fn is_autoplaying(&self) -> bool {
        self.autoplay_timer.is_some()
    }

    pub fn position_of(&self, item: usize) -> Option<Position> {
        self.positions.get(item).copied()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn scheduler(&self) -> &T {
        &self.scheduler
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    /// One rotation step. Ignored while a transition is in flight.
    pub fn rotate_step(&mut self, direction: Direction) {
        if self.animating {
            log::trace!("rotate {direction:?} ignored: transition in flight");
            return;
        }
        self.apply_step(direction);
    }

    /// Shift every item one slot and restart the transition cool-down.
    fn apply_step(&mut self, direction: Direction) {
        self.animating = true;

        let count = self.item_count();
        self.current_index = direction.step(self.current_index, count);

        for item in 0..count {
            let from = self.positions[item];
            let to = from.shifted(direction);
            self.positions[item] = to;
            self.surface.place_item(item, Some(from), to);
        }

        self.refresh_indicators();

        if let Some(handle) = self.transition_timer.take() {
            self.scheduler.clear(handle);
        }
        self.transition_timer = Some(
            self.scheduler
                .set_timeout(self.config.transition_ms, TimerEvent::TransitionEnd),
        );

        log::debug!(
            "rotated {direction:?}, current index {}",
            self.current_index
        );
    }

    fn refresh_indicators(&mut self) {
        for index in 0..self.item_count() {
            self.surface
                .set_indicator_active(index, index == self.current_index);
        }
    }

    /// Rotate along the shorter way round until `target` is current.
    ///
    /// Out-of-range targets wrap. The first step happens immediately, the
    /// rest follow every `jump_step_ms` and are not held back by the
    /// cool-down of the previous step.
    pub fn jump_to(&mut self, target: i64) {
        let count = self.item_count();
        let target = target.rem_euclid(count as i64) as usize;
        if self.animating || target == self.current_index {
            return;
        }

        let (steps, direction) = shortest_path(self.current_index, target, count);
        log::debug!(
            "jump {} -> {target}: {steps} step(s) {direction:?}",
            self.current_index
        );
        self.run_jump_step(direction, steps);
    }

    fn run_jump_step(&mut self, direction: Direction, remaining: usize) {
        if remaining == 0 {
            return;
        }
        self.apply_step(direction);
        if remaining > 1 {
            self.scheduler.set_timeout(
                self.config.jump_step_ms,
                TimerEvent::JumpStep {
                    direction,
                    remaining: remaining - 1,
                },
            );
        }
    }

    /// Entry point of every timer this display scheduled.
    pub fn on_timer(&mut self, event: TimerEvent) {
        match event {
            TimerEvent::TransitionEnd => {
                self.animating = false;
                self.transition_timer = None;
            }
            TimerEvent::JumpStep {
                direction,
                remaining,
            } => self.run_jump_step(direction, remaining),
            TimerEvent::AutoplayTick => {
                if !self.animating && !self.surface.page_hidden() {
                    self.rotate_step(Direction::Forward);
                }
            }
        }
    }

    /// Clicking a side item brings it to the center; other slots ignore
    /// clicks.
    pub fn item_clicked(&mut self, item: usize) {
        match self.position_of(item) {
            Some(Position::Left) => self.rotate_step(Direction::Backward),
            Some(Position::Right) => self.rotate_step(Direction::Forward),
            _ => {}
        }
    }

    pub fn indicator_clicked(&mut self, index: usize) {
        self.jump_to(index as i64);
    }

    /// Returns whether the key was consumed.
    pub fn key_pressed(&mut self, key: &str) -> bool {
        match key {
            "ArrowLeft" => self.rotate_step(Direction::Backward),
            "ArrowRight" => self.rotate_step(Direction::Forward),
            _ => return false,
        }
        true
    }

    pub fn swipe_started(&mut self, x: f64, y: f64) {
        self.swipe.start(x, y);
    }

    pub fn swipe_ended(&mut self, x: f64, y: f64) {
        if let Some(direction) = self.swipe.finish(x, y) {
            self.rotate_step(direction);
        }
    }

    pub fn swipe_cancelled(&mut self) {
        self.swipe.cancel();
    }

    #[inline]
    pub fn is_swiping(&self) -> bool {
        self.swipe.is_dragging()
    }

    pub fn pointer_entered(&mut self) {
        self.pause_autoplay();
    }

    pub fn pointer_left(&mut self) {
        if self.config.autoplay {
            self.resume_autoplay();
        }
    }

    /// Hiding cancels autoplay, showing recreates it with a fresh period.
    ///
    /// With autoplay turned off in the config, showing the page again does
    /// not start it; only an explicit `resume_autoplay` does.
    pub fn visibility_changed(&mut self, hidden: bool) {
        if hidden {
            self.pause_autoplay();
        } else if self.config.autoplay {
            self.resume_autoplay();
        }
    }
}

impl<S: Surface, T: Scheduler> Navigable for RotatingDisplay<S, T> {
    fn next(&mut self) {
        self.rotate_step(Direction::Forward);
    }

    fn prev(&mut self) {
        self.rotate_step(Direction::Backward);
    }

    fn jump_to(&mut self, target: i64) {
        RotatingDisplay::jump_to(self, target)
    }

    fn visibility_changed(&mut self, hidden: bool) {
        RotatingDisplay::visibility_changed(self, hidden)
    }

    fn pause_autoplay(&mut self) {
        if let Some(handle) = self.autoplay_timer.take() {
            self.scheduler.clear(handle);
        }
    }

    /// 先清除旧的定时器再重新创建，重复调用不会叠加
    fn resume_autoplay(&mut self) {
        self.pause_autoplay();
        self.autoplay_timer = Some(
            self.scheduler
                .set_interval(self.config.autoplay_interval_ms, TimerEvent::AutoplayTick),
        );
    }
}

impl<S: Surface> RotatingDisplay<S, crate::ManualScheduler> {
    /// Run virtual time forward by `ms`, dispatching every timer that
    /// falls due on the way.
    pub fn advance(&mut self, ms: u64) {
        let until = self.scheduler.now() + ms;
        while let Some(event) = self.scheduler.pop_due(until) {
            self.on_timer(event);
        }
        self.scheduler.set_now(until);
    }
}

/// Number of steps and the direction of the shorter rotation from
/// `current` to `target`; never more than `count / 2` steps.
pub fn shortest_path(current: usize, target: usize, count: usize) -> (usize, Direction) {
    let diff = target as i64 - current as i64;
    let steps = diff.unsigned_abs() as usize;
    let direction = if diff > 0 {
        Direction::Forward
    } else {
        Direction::Backward
    };
    if steps * 2 > count {
        (count - steps, direction.reversed())
    } else {
        (steps, direction)
    }
}
