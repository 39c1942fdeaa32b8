// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ballistic, translation-only motion after a drag is released.
//!
//! Each axis decelerates at a constant rate from its release velocity and
//! stops either when its velocity reaches zero or when it runs into the pan
//! range computed at release time.

use kurbo::Vec2;

use crate::clamp::{AxisRange, PanRange};

#[derive(Clone, Copy, Debug, PartialEq)]
struct FlingAxis {
    start: f64,
    velocity: f64,
    deceleration: f64,
    duration_s: f64,
    range: AxisRange,
    done: bool,
}

impl FlingAxis {
    fn new(start: f64, velocity: f64, deceleration: f64, min_velocity: f64, range: AxisRange) -> Self {
        let velocity = if velocity.is_finite() && velocity.abs() >= min_velocity && !range.is_fixed() {
            velocity
        } else {
            0.0
        };
        let duration_s = velocity.abs() / deceleration;
        Self {
            start,
            velocity,
            deceleration: deceleration.copysign(velocity),
            duration_s,
            range,
            done: velocity == 0.0,
        }
    }

    fn position(&mut self, t_s: f64) -> f64 {
        let t = t_s.min(self.duration_s);
        let free = self.start + self.velocity * t - 0.5 * self.deceleration * t * t;
        let clamped = self.range.clamp(free);
        if t_s >= self.duration_s || clamped != free {
            self.done = true;
        }
        clamped
    }
}

/// A running fling over both axes.
#[derive(Clone, Debug, PartialEq)]
pub struct Fling {
    x: FlingAxis,
    y: FlingAxis,
    start_ms: u64,
    last: Vec2,
}

impl Fling {
    /// Starts a fling from `translation` with `velocity` in pixels per second.
    ///
    /// Velocity components below `min_velocity`, non-finite, or along an axis
    /// with no room to move are dropped; if none remain the fling is finished
    /// immediately.
    #[must_use]
    pub fn start(
        translation: Vec2,
        velocity: Vec2,
        range: PanRange,
        deceleration: f64,
        min_velocity: f64,
        now_ms: u64,
    ) -> Self {
        Self {
            x: FlingAxis::new(translation.x, velocity.x, deceleration, min_velocity, range.x),
            y: FlingAxis::new(translation.y, velocity.y, deceleration, min_velocity, range.y),
            start_ms: now_ms,
            last: translation,
        }
    }

    /// Returns `true` once both axes have come to rest.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.x.done && self.y.done
    }

    /// Total time until both axes would stop, ignoring pan bounds.
    #[must_use]
    pub fn duration_ms(&self) -> u64 {
        let secs = self.x.duration_s.max(self.y.duration_s);
        #[expect(
            clippy::cast_possible_truncation,
            reason = "Fling durations are a few seconds at most"
        )]
        {
            (secs * 1000.0).ceil() as u64
        }
    }

    /// Advances the fling to `now_ms` and returns the new translation.
    ///
    /// Returns `None` if the fling had already finished.
    pub fn tick(&mut self, now_ms: u64) -> Option<Vec2> {
        if self.is_finished() {
            return None;
        }
        let t_s = now_ms.saturating_sub(self.start_ms) as f64 / 1000.0;
        let x = if self.x.done { self.last.x } else { self.x.position(t_s) };
        let y = if self.y.done { self.last.y } else { self.y.position(t_s) };
        self.last = Vec2::new(x, y);
        Some(self.last)
    }

    /// Stops the fling where it is.
    pub fn abort(&mut self) {
        self.x.done = true;
        self.y.done = true;
    }

    /// Translation reached by the most recent tick.
    #[must_use]
    pub fn translation(&self) -> Vec2 {
        self.last
    }
}
