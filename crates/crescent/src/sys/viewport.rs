//! Headless stand-in for the scrollable option list.

use crate::menu::{ScrollBehavior, ScrollCommand, ViewportMetrics};
use std::time::{Duration, Instant};

pub const SMOOTH_SCROLL_DURATION: Duration = Duration::from_millis(200);
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Debug, Clone, Copy)]
struct Animation {
    from: f64,
    to: f64,
    started: Instant,
    next_frame: Instant,
}

impl Animation {
    fn offset_at(&self, now: Instant) -> f64 {
        let elapsed = now.saturating_duration_since(self.started).as_secs_f64();
        let t = (elapsed / SMOOTH_SCROLL_DURATION.as_secs_f64()).clamp(0.0, 1.0);
        let eased = 1.0 - (1.0 - t).powi(3);
        self.from + (self.to - self.from) * eased
    }

    fn finished(&self, now: Instant) -> bool {
        now >= self.started + SMOOTH_SCROLL_DURATION
    }
}

/// One animation step. `finished` is set on the frame that lands on the target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub metrics: ViewportMetrics,
    pub finished: bool,
}

#[derive(Debug, Clone)]
pub struct SimViewport {
    offset: f64,
    container_height: f64,
    scroll_height: f64,
    animation: Option<Animation>,
}

impl SimViewport {
    pub fn new(container_height: f64, scroll_height: f64) -> Self {
        Self {
            offset: 0.0,
            container_height,
            scroll_height,
            animation: None,
        }
    }

    pub fn metrics(&self) -> ViewportMetrics {
        ViewportMetrics::new(self.offset, self.container_height, self.scroll_height)
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    pub fn set_scroll_height(&mut self, scroll_height: f64) {
        self.scroll_height = scroll_height;
        self.offset = self.clamp(self.offset);
    }

    /// Applies a command. An instant jump returns the metrics its scroll
    /// event would carry; a smooth scroll reports through [`tick`](Self::tick).
    pub fn apply(&mut self, command: ScrollCommand, now: Instant) -> Option<ViewportMetrics> {
        let target = self.clamp(command.target);
        match command.behavior {
            ScrollBehavior::Instant => {
                self.animation = None;
                self.offset = target;
                Some(self.metrics())
            }
            ScrollBehavior::Smooth => {
                self.animation = Some(Animation {
                    from: self.offset,
                    to: target,
                    started: now,
                    next_frame: now + FRAME_INTERVAL,
                });
                None
            }
        }
    }

    /// User scroll. Interrupts any running animation.
    pub fn scroll_by(&mut self, dy: f64) -> ViewportMetrics {
        self.animation = None;
        self.offset = self.clamp(self.offset + dy);
        self.metrics()
    }

    pub fn stop(&mut self) {
        self.animation = None;
    }

    pub fn next_frame(&self) -> Option<Instant> {
        self.animation.map(|a| a.next_frame)
    }

    pub fn tick(&mut self, now: Instant) -> Option<Frame> {
        let animation = self.animation.as_mut()?;
        if now < animation.next_frame {
            return None;
        }
        let finished = animation.finished(now);
        let offset = if finished {
            animation.to
        } else {
            animation.offset_at(now)
        };
        animation.next_frame = now + FRAME_INTERVAL;
        if finished {
            self.animation = None;
        }
        self.offset = offset;
        Some(Frame {
            metrics: self.metrics(),
            finished,
        })
    }

    fn clamp(&self, offset: f64) -> f64 {
        offset.clamp(0.0, self.metrics().max_offset())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instant_jump_is_immediate_and_clamped() {
        let mut vp = SimViewport::new(350.0, 2100.0);
        let now = Instant::now();
        let m = vp.apply(ScrollCommand::instant(770.0), now).unwrap();
        assert_eq!(m.offset, 770.0);
        assert!(!vp.is_animating());

        let m = vp.apply(ScrollCommand::instant(5000.0), now).unwrap();
        assert_eq!(m.offset, 1750.0);
        assert_eq!(vp.scroll_by(-4000.0).offset, 0.0);
    }

    #[test]
    fn test_smooth_scroll_eases_to_target() {
        let mut vp = SimViewport::new(350.0, 2100.0);
        let now = Instant::now();
        vp.apply(ScrollCommand::instant(800.0), now);
        assert_eq!(vp.apply(ScrollCommand::smooth(770.0), now), None);
        assert_eq!(vp.tick(now), None);

        let mut t = now;
        let mut last = 800.0;
        let mut frames = 0;
        loop {
            t += FRAME_INTERVAL;
            let Some(frame) = vp.tick(t) else { continue };
            frames += 1;
            assert!(frame.metrics.offset <= last);
            last = frame.metrics.offset;
            if frame.finished {
                break;
            }
        }
        assert_eq!(last, 770.0);
        assert!(frames >= 12);
        assert_eq!(vp.next_frame(), None);
    }

    #[test]
    fn test_user_scroll_interrupts_animation() {
        let mut vp = SimViewport::new(350.0, 2100.0);
        let now = Instant::now();
        vp.apply(ScrollCommand::smooth(700.0), now);
        assert!(vp.is_animating());
        assert_eq!(vp.scroll_by(40.0).offset, 40.0);
        assert!(!vp.is_animating());
        assert_eq!(vp.tick(now + SMOOTH_SCROLL_DURATION), None);
    }
}
