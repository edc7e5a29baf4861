use crate::Direction;

/// Decide whether a drag from start to end is a horizontal swipe.
///
/// The horizontal distance must dominate the vertical one and exceed
/// `threshold`. Dragging right pulls the previous item in (`Backward`),
/// dragging left pulls the next one in (`Forward`).
pub fn classify_swipe(delta_x: f64, delta_y: f64, threshold: f64) -> Option<Direction> {
    if delta_x.abs() > delta_y.abs() && delta_x.abs() > threshold {
        if delta_x > 0.0 {
            Some(Direction::Backward)
        } else {
            Some(Direction::Forward)
        }
    } else {
        None
    }
}

/// 记录一次拖动的起点，在结束时给出方向
#[derive(Debug, Clone)]
pub struct SwipeTracker {
    threshold: f64,
    origin: Option<(f64, f64)>,
}

impl SwipeTracker {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            origin: None,
        }
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.origin.is_some()
    }

    pub fn start(&mut self, x: f64, y: f64) {
        self.origin = Some((x, y));
    }

    /// Finish the drag. Returns `None` when no drag was in progress or the
    /// movement is not a swipe.
    pub fn finish(&mut self, x: f64, y: f64) -> Option<Direction> {
        let (start_x, start_y) = self.origin.take()?;
        classify_swipe(x - start_x, y - start_y, self.threshold)
    }

    pub fn cancel(&mut self) {
        self.origin = None;
    }
}
