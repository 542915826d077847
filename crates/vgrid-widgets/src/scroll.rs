#![forbid(unsafe_code)]

//! Continuous-scroll session state machine.
//!
//! A press on a scrollbar arrow starts a frame-driven scroll that advances
//! the viewport a fixed rate per 16ms of elapsed time, so the speed is
//! stable under variable frame timing. The session ends on release, on
//! leaving the scroll surface, or on reaching a scroll bound.

use std::time::Duration;

use crate::window::Viewport;

/// Reference frame duration the scroll rate is expressed against.
const BASE_FRAME_MS: f64 = 16.0;

/// Direction of a continuous scroll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    /// Toward offset 0.
    Up,
    /// Toward the maximum offset.
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Phase {
    #[default]
    Idle,
    Scrolling(ScrollDirection),
}

/// Drives a press-and-hold scroll animation over a [`Viewport`].
///
/// At most one session is active at a time; starting while active is a
/// no-op. Each step checks the session is still live before advancing, so
/// a stop between frames cancels the animation cleanly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollController {
    phase: Phase,
    speed_px_per_frame: f64,
}

impl ScrollController {
    /// Create an idle controller with the given rate (pixels per 16ms frame).
    #[must_use]
    pub const fn new(speed_px_per_frame: f64) -> Self {
        Self {
            phase: Phase::Idle,
            speed_px_per_frame,
        }
    }

    /// Check if a scroll session is active.
    #[must_use]
    pub const fn is_scrolling(&self) -> bool {
        matches!(self.phase, Phase::Scrolling(_))
    }

    /// The active session's direction, if any.
    #[must_use]
    pub const fn direction(&self) -> Option<ScrollDirection> {
        match self.phase {
            Phase::Idle => None,
            Phase::Scrolling(direction) => Some(direction),
        }
    }

    /// Begin a scroll session.
    ///
    /// Returns `false` (and changes nothing) if a session is already
    /// active, including one in the opposite direction.
    pub fn start(&mut self, direction: ScrollDirection) -> bool {
        if self.is_scrolling() {
            return false;
        }
        self.phase = Phase::Scrolling(direction);
        true
    }

    /// End the session, if any.
    pub fn stop(&mut self) {
        self.phase = Phase::Idle;
    }

    /// Advance one animation frame.
    ///
    /// Moves the viewport by `speed × dt / 16ms`, clamped at the scroll
    /// bounds; hitting a bound ends the session in the same step. Returns
    /// `true` if a session was active when the step ran.
    pub fn step(&mut self, viewport: &mut Viewport, dt: Duration) -> bool {
        let Phase::Scrolling(direction) = self.phase else {
            return false;
        };

        let delta = self.speed_px_per_frame * dt.as_secs_f64() * 1000.0 / BASE_FRAME_MS;
        match direction {
            ScrollDirection::Up => {
                viewport.scroll_by_px(-delta);
                if viewport.at_start() {
                    self.stop();
                }
            }
            ScrollDirection::Down => {
                viewport.scroll_by_px(delta);
                if viewport.at_end() {
                    self.stop();
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::WindowSpec;

    const SPEC: WindowSpec = WindowSpec {
        total_rows: 10_001,
        row_height: 40,
        visible_rows: 20,
        buffer: 5,
    };

    fn frame(ms: u64) -> Duration {
        Duration::from_millis(ms)
    }

    #[test]
    fn step_is_delta_time_scaled() {
        let mut vp = Viewport::new(SPEC);
        let mut ctl = ScrollController::new(2.0);
        assert!(ctl.start(ScrollDirection::Down));

        ctl.step(&mut vp, frame(16));
        assert!((vp.offset_px() - 2.0).abs() < 1e-9);

        ctl.step(&mut vp, frame(32));
        assert!((vp.offset_px() - 6.0).abs() < 1e-9);
    }

    #[test]
    fn up_at_top_clamps_and_goes_idle_without_advancing() {
        let mut vp = Viewport::new(SPEC);
        let mut ctl = ScrollController::new(2.0);
        assert!(ctl.start(ScrollDirection::Up));

        ctl.step(&mut vp, frame(16));
        assert_eq!(vp.offset_px(), 0.0);
        assert!(!ctl.is_scrolling());
    }

    #[test]
    fn down_stops_at_max_extent() {
        let mut vp = Viewport::new(SPEC);
        vp.set_offset_px(vp.max_offset_px() - 1.0);
        let mut ctl = ScrollController::new(2.0);
        ctl.start(ScrollDirection::Down);

        ctl.step(&mut vp, frame(16));
        assert_eq!(vp.offset_px(), vp.max_offset_px());
        assert!(!ctl.is_scrolling());
    }

    #[test]
    fn reentrant_start_is_a_noop() {
        let mut ctl = ScrollController::new(2.0);
        assert!(ctl.start(ScrollDirection::Down));
        assert!(!ctl.start(ScrollDirection::Down));
        assert!(!ctl.start(ScrollDirection::Up));
        assert_eq!(ctl.direction(), Some(ScrollDirection::Down));
    }

    #[test]
    fn step_after_stop_does_nothing() {
        let mut vp = Viewport::new(SPEC);
        let mut ctl = ScrollController::new(2.0);
        ctl.start(ScrollDirection::Down);
        ctl.stop();

        assert!(!ctl.step(&mut vp, frame(16)));
        assert_eq!(vp.offset_px(), 0.0);
    }

    #[test]
    fn mid_run_step_keeps_session_alive() {
        let mut vp = Viewport::new(SPEC);
        vp.set_offset_px(1000.0);
        let mut ctl = ScrollController::new(2.0);
        ctl.start(ScrollDirection::Up);

        assert!(ctl.step(&mut vp, frame(16)));
        assert!(ctl.is_scrolling());
        assert!(vp.offset_px() < 1000.0);
    }
}
