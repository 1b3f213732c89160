// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag-to-dismiss helper for sheets.
//!
//! ## Usage
//!
//! 1) Call [`SheetDrag::start`] when the pointer goes down on a sheet's grab area.
//! 2) Call [`SheetDrag::update`] on each move; it returns the offset to draw the sheet at.
//! 3) Call [`SheetDrag::end`] on release. On [`DragOutcome::Dismiss`], report the dismissal with
//!    [`Router::set_child_active`](crate::router::Router::set_child_active) for the sheet's parent.
//!    On [`DragOutcome::Settle`], animate the sheet back.
//!
//! Timestamps are host time since any fixed epoch, the same clock fed to the
//! [`Sequencer`](crate::sequencer::Sequencer).
//!
//! ```
//! use core::time::Duration;
//! use kurbo::Point;
//! use understory_flow::gesture::{DragOutcome, SheetDrag};
//!
//! let ms = Duration::from_millis;
//! let mut drag = SheetDrag::default();
//! drag.start(Point::new(0.0, 100.0), ms(0));
//! drag.update(Point::new(0.0, 160.0), ms(100));
//! assert_eq!(drag.end(Point::new(0.0, 300.0), ms(200)), Some(DragOutcome::Dismiss));
//! ```

use core::time::Duration;
use kurbo::{Point, Vec2};

/// Direction a sheet is dragged to dismiss it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum DismissAxis {
    /// Downwards (positive y).
    #[default]
    Down,
    /// Rightwards (positive x).
    Right,
}

impl DismissAxis {
    fn along(self, v: Vec2) -> f64 {
        match self {
            Self::Down => v.y,
            Self::Right => v.x,
        }
    }
}

/// Thresholds for [`SheetDrag`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DragDismissConfig {
    /// Offset along the axis past which releasing dismisses.
    pub distance: f64,
    /// Release velocity along the axis, in units per second, past which releasing dismisses.
    pub velocity: f64,
    /// Dismiss direction.
    pub axis: DismissAxis,
}

impl Default for DragDismissConfig {
    fn default() -> Self {
        Self {
            distance: 120.0,
            velocity: 800.0,
            axis: DismissAxis::Down,
        }
    }
}

/// What to do with a released sheet.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DragOutcome {
    /// Dismiss the sheet.
    Dismiss,
    /// Return the sheet to its resting position.
    Settle,
}

/// Tracks one drag on a sheet.
#[derive(Copy, Clone, Debug, Default)]
pub struct SheetDrag {
    config: DragDismissConfig,
    start: Option<Point>,
    last: Option<(Point, Duration)>,
    velocity: Vec2,
}

impl SheetDrag {
    /// Create a tracker with custom thresholds.
    pub fn new(config: DragDismissConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Current thresholds.
    pub fn config(&self) -> DragDismissConfig {
        self.config
    }

    /// Returns `true` while a drag is active.
    pub fn is_dragging(&self) -> bool {
        self.start.is_some()
    }

    /// Begin a drag at `pos`.
    pub fn start(&mut self, pos: Point, at: Duration) {
        self.start = Some(pos);
        self.last = Some((pos, at));
        self.velocity = Vec2::ZERO;
    }

    /// Record a move, returning the sheet offset along the dismiss axis.
    ///
    /// Movement against the dismiss direction is clamped to zero.
    pub fn update(&mut self, pos: Point, at: Duration) -> Option<f64> {
        let start = self.start?;
        if let Some((last_pos, last_at)) = self.last
            && let Some(dt) = at.checked_sub(last_at)
            && !dt.is_zero()
        {
            self.velocity = (pos - last_pos) / dt.as_secs_f64();
        }
        self.last = Some((pos, at));
        Some(self.config.axis.along(pos - start).max(0.0))
    }

    /// Finish the drag at `pos` and decide its outcome.
    ///
    /// Returns `None` if no drag was active.
    pub fn end(&mut self, pos: Point, at: Duration) -> Option<DragOutcome> {
        let offset = self.update(pos, at)?;
        let velocity = self.config.axis.along(self.velocity);
        self.cancel();
        let dismiss = offset >= self.config.distance
            || (offset > 0.0 && velocity >= self.config.velocity);
        Some(if dismiss {
            DragOutcome::Dismiss
        } else {
            DragOutcome::Settle
        })
    }

    /// Abandon the drag without an outcome.
    pub fn cancel(&mut self) {
        self.start = None;
        self.last = None;
        self.velocity = Vec2::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn update_without_start_is_ignored() {
        let mut drag = SheetDrag::default();
        assert_eq!(drag.update(Point::new(0.0, 50.0), ms(0)), None);
        assert_eq!(drag.end(Point::new(0.0, 50.0), ms(10)), None);
        assert!(!drag.is_dragging());
    }

    #[test]
    fn offset_is_clamped_against_dismiss_direction() {
        let mut drag = SheetDrag::default();
        drag.start(Point::new(10.0, 100.0), ms(0));
        assert_eq!(drag.update(Point::new(40.0, 130.0), ms(16)), Some(30.0));
        assert_eq!(drag.update(Point::new(40.0, 60.0), ms(32)), Some(0.0));
    }

    #[test]
    fn far_slow_release_dismisses() {
        let mut drag = SheetDrag::default();
        drag.start(Point::ZERO, ms(0));
        drag.update(Point::new(0.0, 100.0), ms(1000));
        let out = drag.end(Point::new(0.0, 130.0), ms(2000));
        assert_eq!(out, Some(DragOutcome::Dismiss));
        assert!(!drag.is_dragging());
    }

    #[test]
    fn short_fling_dismisses() {
        let mut drag = SheetDrag::default();
        drag.start(Point::ZERO, ms(0));
        // 40 units in 20ms is 2000 units per second.
        let out = drag.end(Point::new(0.0, 40.0), ms(20));
        assert_eq!(out, Some(DragOutcome::Dismiss));
    }

    #[test]
    fn short_slow_release_settles() {
        let mut drag = SheetDrag::default();
        drag.start(Point::ZERO, ms(0));
        drag.update(Point::new(0.0, 30.0), ms(500));
        assert_eq!(
            drag.end(Point::new(0.0, 40.0), ms(1000)),
            Some(DragOutcome::Settle)
        );
    }

    #[test]
    fn fling_back_up_settles() {
        let mut drag = SheetDrag::default();
        drag.start(Point::ZERO, ms(0));
        drag.update(Point::new(0.0, 100.0), ms(500));
        assert_eq!(
            drag.end(Point::new(0.0, 60.0), ms(510)),
            Some(DragOutcome::Settle)
        );
    }

    #[test]
    fn horizontal_axis_uses_x() {
        let mut drag = SheetDrag::new(DragDismissConfig {
            axis: DismissAxis::Right,
            ..DragDismissConfig::default()
        });
        drag.start(Point::ZERO, ms(0));
        drag.update(Point::new(200.0, 0.0), ms(1000));
        assert_eq!(
            drag.end(Point::new(200.0, 0.0), ms(2000)),
            Some(DragOutcome::Dismiss)
        );
    }

    #[test]
    fn cancel_resets() {
        let mut drag = SheetDrag::default();
        drag.start(Point::ZERO, ms(0));
        drag.cancel();
        assert!(!drag.is_dragging());
        assert_eq!(drag.end(Point::new(0.0, 500.0), ms(10)), None);
    }
}
