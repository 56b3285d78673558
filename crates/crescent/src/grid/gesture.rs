//! Horizontal swipe detection for page flipping.
//!
//! One pointer session is `press -> drag* -> release`. The tracker keeps the
//! first and the latest position and judges the gesture on release only.

use super::{SWIPE_MAX_VERTICAL, SWIPE_MIN_DISTANCE};
use crate::geometry::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    /// Content moves left, revealing the next page.
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
enum SwipeState {
    #[default]
    Idle,
    Dragging {
        start: Option<Point>,
        end: Option<Point>,
    },
}

#[derive(Debug, Clone, Default)]
pub struct SwipeTracker {
    state: SwipeState,
}

impl SwipeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, SwipeState::Dragging { .. })
    }

    pub fn press(&mut self, at: Point) {
        self.state = SwipeState::Dragging {
            start: Some(at),
            end: None,
        };
    }

    pub fn drag(&mut self, to: Point) {
        if let SwipeState::Dragging { end, .. } = &mut self.state {
            *end = Some(to);
        }
    }

    pub fn release(&mut self) -> Option<SwipeDirection> {
        let state = std::mem::take(&mut self.state);
        let SwipeState::Dragging {
            start: Some(start),
            end: Some(end),
        } = state
        else {
            return None;
        };
        classify(start, end)
    }

    pub fn cancel(&mut self) {
        self.state = SwipeState::Idle;
    }
}

pub fn classify(start: Point, end: Point) -> Option<SwipeDirection> {
    let dx = start.x - end.x;
    let dy = (start.y - end.y).abs();
    if dx.abs() < SWIPE_MIN_DISTANCE || dy >= SWIPE_MAX_VERTICAL {
        return None;
    }
    Some(if dx > 0.0 {
        SwipeDirection::Left
    } else {
        SwipeDirection::Right
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn swipe(
        tracker: &mut SwipeTracker,
        from: (f64, f64),
        to: (f64, f64),
    ) -> Option<SwipeDirection> {
        tracker.press(Point::new(from.0, from.1));
        tracker.drag(Point::new((from.0 + to.0) / 2.0, from.1));
        tracker.drag(Point::new(to.0, to.1));
        tracker.release()
    }

    #[test]
    fn test_swipe_threshold() {
        let mut tracker = SwipeTracker::new();
        assert_eq!(swipe(&mut tracker, (300.0, 100.0), (251.0, 100.0)), None);
        assert_eq!(
            swipe(&mut tracker, (300.0, 100.0), (249.0, 100.0)),
            Some(SwipeDirection::Left)
        );
        assert_eq!(
            swipe(&mut tracker, (300.0, 100.0), (351.0, 140.0)),
            Some(SwipeDirection::Right)
        );
        assert_eq!(
            swipe(&mut tracker, (300.0, 100.0), (250.0, 100.0)),
            Some(SwipeDirection::Left)
        );
    }

    #[test]
    fn test_vertical_motion_is_ignored() {
        let mut tracker = SwipeTracker::new();
        assert_eq!(swipe(&mut tracker, (300.0, 100.0), (150.0, 200.0)), None);
        assert_eq!(
            swipe(&mut tracker, (300.0, 100.0), (150.0, 199.0)),
            Some(SwipeDirection::Left)
        );
    }

    #[test]
    fn test_incomplete_sessions_are_noops() {
        let mut tracker = SwipeTracker::new();
        assert_eq!(tracker.release(), None);

        tracker.press(Point::new(10.0, 10.0));
        assert!(tracker.is_dragging());
        assert_eq!(tracker.release(), None);
        assert!(!tracker.is_dragging());

        tracker.drag(Point::new(500.0, 10.0));
        assert_eq!(tracker.release(), None);
    }
}
