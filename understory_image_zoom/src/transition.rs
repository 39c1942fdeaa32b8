// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Time-based interpolation between two zoom states.
//!
//! ## Usage
//!
//! 1) Call [`TransitionDriver::start`] with the pivot, the start and end
//!    transforms, and the current time.
//! 2) On each animation tick call [`TransitionDriver::tick`]; clamp the
//!    returned frame and apply it.
//! 3) When a frame reports `finished`, the driver is idle again.
//!
//! Timestamps are caller-supplied milliseconds from any monotonic clock.
//!
//! ```
//! use kurbo::{Point, Vec2};
//! use understory_image_zoom::{ImageTransform, TransitionDriver};
//!
//! let mut driver = TransitionDriver::default();
//! let from = ImageTransform::IDENTITY;
//! let to = ImageTransform::from_scale(Vec2::new(2.0, 2.0));
//! driver.start(Point::ORIGIN, from, to, Point::ORIGIN, 1_000, 200);
//!
//! let mid = driver.tick(1_100).unwrap();
//! assert!(!mid.finished);
//! let end = driver.tick(1_200).unwrap();
//! assert!(end.finished);
//! assert_eq!(end.scale, Vec2::new(2.0, 2.0));
//! assert!(!driver.is_running());
//! ```

use kurbo::{Point, Vec2};

use crate::transform::ImageTransform;

/// What [`TransitionDriver::abort`] leaves behind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AbortMode {
    /// Jump to the end values.
    SnapToEnd,
    /// Keep the last interpolated values.
    Freeze,
}

/// One interpolated state of a running transition.
///
/// The frame is a request, not a transform: callers clamp it so that
/// `pivot` lands as close to `target` as pan bounds allow.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionFrame {
    /// Interpolated per-axis scale.
    pub scale: Vec2,
    /// Content-space pivot, fixed for the whole transition.
    pub pivot: Point,
    /// Interpolated view-space target for `pivot`.
    pub target: Point,
    /// `true` on the final frame.
    pub finished: bool,
}

#[derive(Clone, Copy, Debug)]
struct Running {
    pivot: Point,
    from_scale: Vec2,
    to_scale: Vec2,
    from_target: Point,
    to_target: Point,
    start_ms: u64,
    duration_ms: u64,
    last: TransitionFrame,
}

impl Running {
    fn frame_at(&self, progress: f64) -> TransitionFrame {
        if progress >= 1.0 {
            return self.end_frame();
        }
        let eased = decelerate(progress);
        TransitionFrame {
            scale: self.from_scale.lerp(self.to_scale, eased),
            pivot: self.pivot,
            target: self.from_target.lerp(self.to_target, eased),
            finished: false,
        }
    }

    fn end_frame(&self) -> TransitionFrame {
        TransitionFrame {
            scale: self.to_scale,
            pivot: self.pivot,
            target: self.to_target,
            finished: true,
        }
    }
}

/// Two-state (idle/running) animation driver for scale + pivot target.
#[derive(Clone, Debug, Default)]
pub struct TransitionDriver {
    running: Option<Running>,
}

impl TransitionDriver {
    /// Starts a transition, replacing any transition already running.
    ///
    /// The pivot's start target is wherever `from` maps it; its end target
    /// is `to_target`. Only the scale of `to` is used.
    pub fn start(
        &mut self,
        pivot: Point,
        from: ImageTransform,
        to: ImageTransform,
        to_target: Point,
        now_ms: u64,
        duration_ms: u64,
    ) {
        let from_target = from.map_point(pivot);
        let first = TransitionFrame {
            scale: from.scale,
            pivot,
            target: from_target,
            finished: false,
        };
        self.running = Some(Running {
            pivot,
            from_scale: from.scale,
            to_scale: to.scale,
            from_target,
            to_target,
            start_ms: now_ms,
            duration_ms,
            last: first,
        });
    }

    /// Returns `true` while a transition is in flight.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Advances the transition to `now_ms`.
    ///
    /// Returns `None` when idle. Once `now_ms` reaches the end time the
    /// returned frame carries the exact end values and the driver goes idle.
    pub fn tick(&mut self, now_ms: u64) -> Option<TransitionFrame> {
        let running = self.running.as_mut()?;
        let elapsed = now_ms.saturating_sub(running.start_ms);
        let progress = if running.duration_ms == 0 {
            1.0
        } else {
            (elapsed as f64 / running.duration_ms as f64).clamp(0.0, 1.0)
        };
        let frame = running.frame_at(progress);
        running.last = frame;
        if frame.finished {
            self.running = None;
        }
        Some(frame)
    }

    /// Stops the transition.
    ///
    /// Returns the frame to settle on (marked finished), or `None` if idle.
    pub fn abort(&mut self, mode: AbortMode) -> Option<TransitionFrame> {
        let running = self.running.take()?;
        let frame = match mode {
            AbortMode::SnapToEnd => running.end_frame(),
            AbortMode::Freeze => TransitionFrame {
                finished: true,
                ..running.last
            },
        };
        Some(frame)
    }
}

/// Ease-out curve: fast start, slowing to rest at `t = 1`.
#[must_use]
pub fn decelerate(t: f64) -> f64 {
    let inv = 1.0 - t.clamp(0.0, 1.0);
    1.0 - inv * inv
}
