use carousel::{Scheduler, TimerEvent, TimerHandle};
use gloo_timers::callback::{Interval, Timeout};
use std::{cell::RefCell, collections::HashMap, rc::Rc};

type Dispatch = Rc<dyn Fn(TimerEvent)>;

/// Where fired timer events go. Connected once the display exists.
#[derive(Clone, Default)]
pub struct TimerSink {
    target: Rc<RefCell<Option<Dispatch>>>,
}

impl TimerSink {
    pub fn connect<F>(&self, dispatch: F)
    where
        F: Fn(TimerEvent) + 'static,
    {
        *self.target.borrow_mut() = Some(Rc::new(dispatch));
    }

    fn deliver(&self, event: TimerEvent) {
        let dispatch = self.target.borrow().clone();
        match dispatch {
            Some(dispatch) => dispatch(event),
            None => log::warn!("timer {event:?} fired before the display was connected"),
        }
    }
}

enum WebTimer {
    Timeout(Timeout),
    Interval(Interval),
}

/// `Scheduler` on top of the browser's setTimeout/setInterval.
///
/// Dropping a gloo timer cancels it, so dropping the scheduler cancels
/// everything it scheduled.
#[derive(Default)]
pub struct WebScheduler {
    next_id: u64,
    timers: HashMap<TimerHandle, WebTimer>,
    fired: Rc<RefCell<Vec<TimerHandle>>>,
    sink: TimerSink,
}

impl WebScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sink(&self) -> TimerSink {
        self.sink.clone()
    }

    fn next_handle(&mut self) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        handle
    }

    // 正在执行的 Timeout 不能在自己的回调里释放，触发过的留到下次调度时回收
    fn reclaim(&mut self) {
        let fired = std::mem::take(&mut *self.fired.borrow_mut());
        for handle in fired {
            self.timers.remove(&handle);
        }
    }
}

impl Scheduler for WebScheduler {
    fn set_timeout(&mut self, delay_ms: u32, event: TimerEvent) -> TimerHandle {
        self.reclaim();
        let handle = self.next_handle();
        let sink = self.sink.clone();
        let fired = self.fired.clone();
        let timeout = Timeout::new(delay_ms, move || {
            sink.deliver(event);
            fired.borrow_mut().push(handle);
        });
        self.timers.insert(handle, WebTimer::Timeout(timeout));
        handle
    }

    fn set_interval(&mut self, period_ms: u32, event: TimerEvent) -> TimerHandle {
        self.reclaim();
        let handle = self.next_handle();
        let sink = self.sink.clone();
        let interval = Interval::new(period_ms, move || sink.deliver(event));
        self.timers.insert(handle, WebTimer::Interval(interval));
        handle
    }

    fn clear(&mut self, handle: TimerHandle) {
        match self.timers.remove(&handle) {
            Some(WebTimer::Timeout(timeout)) => _ = timeout.cancel(),
            Some(WebTimer::Interval(interval)) => _ = interval.cancel(),
            None => {}
        }
    }
}
