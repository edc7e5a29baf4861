use crate::Direction;

/// Opaque id of a scheduled timer, unique per scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(pub u64);

/// Payload delivered back to the display when a timer fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// 过渡动画结束，清除 animating 标记
    TransitionEnd,
    /// 跳转过程中的下一步
    JumpStep { direction: Direction, remaining: usize },
    /// 自动播放
    AutoplayTick,
}

/// Timer backend of a display.
///
/// Implementations must deliver every fired event to
/// `RotatingDisplay::on_timer` of the display that scheduled it, never
/// synchronously from inside `set_timeout`/`set_interval`.
pub trait Scheduler {
    fn set_timeout(&mut self, delay_ms: u32, event: TimerEvent) -> TimerHandle;
    fn set_interval(&mut self, period_ms: u32, event: TimerEvent) -> TimerHandle;
    /// Clearing an unknown or already fired handle is a no-op.
    fn clear(&mut self, handle: TimerHandle);
}

#[derive(Debug, Clone)]
struct PendingTimer {
    handle: TimerHandle,
    due: u64,
    period: Option<u32>,
    event: TimerEvent,
}

/// 虚拟时间的调度器，时间只在调用方推进时流逝
#[derive(Debug, Default, Clone)]
pub struct ManualScheduler {
    now: u64,
    next_id: u64,
    pending: Vec<PendingTimer>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Number of timers still armed.
    #[inline]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.pending.iter().any(|timer| timer.handle == handle)
    }

    /// Number of armed periodic timers.
    pub fn interval_count(&self) -> usize {
        self.pending
            .iter()
            .filter(|timer| timer.period.is_some())
            .count()
    }

    /// Release the earliest timer due at or before `until`, moving the
    /// clock to its due time. Periodic timers are re-armed.
    pub fn pop_due(&mut self, until: u64) -> Option<TimerEvent> {
        let index = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, timer)| timer.due <= until)
            .min_by_key(|(_, timer)| (timer.due, timer.handle))
            .map(|(index, _)| index)?;

        let timer = &mut self.pending[index];
        self.now = self.now.max(timer.due);
        let event = timer.event;
        match timer.period {
            Some(period) => timer.due += period.max(1) as u64,
            None => {
                self.pending.remove(index);
            }
        }
        Some(event)
    }

    /// Move the clock forward without firing anything.
    pub fn set_now(&mut self, now: u64) {
        self.now = self.now.max(now);
    }

    fn arm(&mut self, delay_ms: u32, period: Option<u32>, event: TimerEvent) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.pending.push(PendingTimer {
            handle,
            due: self.now + delay_ms as u64,
            period,
            event,
        });
        handle
    }
}

impl Scheduler for ManualScheduler {
    fn set_timeout(&mut self, delay_ms: u32, event: TimerEvent) -> TimerHandle {
        self.arm(delay_ms, None, event)
    }

    fn set_interval(&mut self, period_ms: u32, event: TimerEvent) -> TimerHandle {
        self.arm(period_ms, Some(period_ms), event)
    }

    fn clear(&mut self, handle: TimerHandle) {
        self.pending.retain(|timer| timer.handle != handle);
    }
}
