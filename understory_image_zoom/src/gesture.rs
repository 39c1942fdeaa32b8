// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Translation of recognized gestures into clamp requests and motion.
//!
//! The host's gesture recognizers report resolved events; this module keeps
//! the pivot binding that has to survive across the events of one gesture.
//!
//! ## Event conventions
//!
//! - Points are view coordinates.
//! - A scroll `distance` is previous pointer position minus current
//!   position, so dragging right yields a negative `x` distance.
//! - Fling velocities are pointer velocities in pixels per second; content
//!   moves with the pointer.
//! - A scale `span_ratio` is the current finger span divided by the span at
//!   the previous scale event.

use kurbo::{Point, Vec2};
use log::debug;

use crate::clamp::{CHANGE_EPSILON, ClampRequest, clamp};
use crate::state::ZoomState;
use crate::transform::PivotBinding;
use crate::transition::AbortMode;

/// Slack used when comparing relative scale against double-tap steps.
///
/// Only absorbs float noise, so a scale that landed exactly on a step moves
/// on to the next one.
pub const PIVOT_EPSILON: f64 = 1e-9;

/// Pivot state kept across the events of one gesture.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct GestureSession {
    /// Content point held under a view point (content-area coordinates).
    pub(crate) binding: Option<PivotBinding>,
    pub(crate) scaling: bool,
}

impl GestureSession {
    pub(crate) fn end(&mut self) {
        self.binding = None;
        self.scaling = false;
    }
}

/// Picks the double-tap step to zoom to.
///
/// For each axis, the candidate is the first step strictly greater than that
/// axis' relative scale, wrapping to the first step when none is. If either
/// axis wraps, the result is the first step; otherwise it is the larger of
/// the two candidates. Returns `None` for an empty step list.
#[must_use]
pub fn next_zoom_pivot(pivots: &[f64], relative: Vec2) -> Option<usize> {
    if pivots.is_empty() {
        return None;
    }
    let axis = |rel: f64| {
        pivots
            .iter()
            .position(|&p| p > rel + PIVOT_EPSILON)
            .unwrap_or(0)
    };
    let (ix, iy) = (axis(relative.x), axis(relative.y));
    Some(if ix == 0 || iy == 0 { 0 } else { ix.max(iy) })
}

impl ZoomState {
    /// Pointer down: stops motion and captures the content under `point`.
    ///
    /// A running transition snaps to its end state; a fling stops where it
    /// is.
    pub fn down(&mut self, point: Point) {
        self.refresh();
        self.stop_motion(AbortMode::SnapToEnd);
        self.gesture.scaling = false;
        self.bind_at(point);
    }

    /// Pointer up: ends the gesture session.
    pub fn up(&mut self) {
        self.gesture.end();
    }

    /// Drag by `distance` (previous minus current pointer position).
    ///
    /// Returns whether the transform changed. Along an axis where the pan
    /// bounds stop the content, the pivot is re-derived so that reversing
    /// the drag responds immediately.
    pub fn scroll(&mut self, distance: Vec2) -> bool {
        self.refresh();
        if !distance.is_finite() {
            return false;
        }
        let binding = match self.gesture.binding {
            Some(binding) => binding,
            None => self.bind_center(),
        };
        let current = self.transform();
        let target = binding.view - distance;
        let outcome = clamp(
            ClampRequest {
                scale: current.scale,
                pivot: binding.content,
                target,
            },
            &self.clamp_context(),
            current,
        );
        let result = outcome.transform;
        let mut content = binding.content;
        if (outcome.achieved.x - target.x).abs() > CHANGE_EPSILON && result.scale.x != 0.0 {
            content.x = (target.x - result.translation.x) / result.scale.x;
        }
        if (outcome.achieved.y - target.y).abs() > CHANGE_EPSILON && result.scale.y != 0.0 {
            content.y = (target.y - result.translation.y) / result.scale.y;
        }
        self.gesture.binding = Some(PivotBinding::new(content, target));
        self.set_current(result);
        outcome.changed
    }

    /// Release with `velocity`: hands off to a ballistic fling.
    ///
    /// Returns `true` if a fling started, i.e. ticks are needed.
    pub fn fling(&mut self, velocity: Vec2, now_ms: u64) -> bool {
        self.refresh();
        self.stop_motion(AbortMode::Freeze);
        self.gesture.end();
        self.start_fling(velocity, now_ms)
    }

    /// Start of a pinch centered on `focus`.
    pub fn scale_begin(&mut self, focus: Point) {
        self.refresh();
        self.stop_motion(AbortMode::Freeze);
        self.gesture.scaling = true;
        self.bind_at(focus);
    }

    /// Pinch step: multiplies the current scale by `span_ratio`.
    ///
    /// The content under the focus at the start of the pinch follows the
    /// focus. Begins a pinch implicitly if none is in progress.
    pub fn scale(&mut self, focus: Point, span_ratio: f64) -> bool {
        if !self.gesture.scaling || self.gesture.binding.is_none() {
            self.scale_begin(focus);
        }
        if !(span_ratio.is_finite() && span_ratio > 0.0) || !focus.is_finite() {
            return false;
        }
        let Some(binding) = self.gesture.binding else {
            return false;
        };
        let current = self.transform();
        let target = self.viewport().to_content_area(focus);
        let outcome = clamp(
            ClampRequest {
                scale: current.scale * span_ratio,
                pivot: binding.content,
                target,
            },
            &self.clamp_context(),
            current,
        );
        self.gesture.binding = Some(PivotBinding::new(binding.content, target));
        self.set_current(outcome.transform);
        outcome.changed
    }

    /// End of a pinch.
    pub fn scale_end(&mut self) {
        self.gesture.scaling = false;
        self.gesture.binding = None;
    }

    /// Double tap: animates to the next configured zoom step around `point`.
    ///
    /// Returns whether an animation (or, with a zero duration, a jump)
    /// happened.
    pub fn double_tap(&mut self, point: Point, now_ms: u64) -> bool {
        self.refresh();
        self.stop_motion(AbortMode::SnapToEnd);
        self.gesture.end();
        let bounds = self.scale_bounds();
        let relative = self.relative_scale();
        let Some(index) = next_zoom_pivot(&self.config().zoom_pivots, relative) else {
            return false;
        };
        let fraction = self.config().zoom_pivots[index];
        let Some(pivot) = self.content_point_at(point) else {
            return false;
        };
        debug!("double tap: zoom step {index} ({fraction}) from relative scale {relative:?}");
        let target = self.viewport().to_content_area(point);
        self.apply_clamped(
            ClampRequest {
                scale: bounds.scale_at(fraction),
                pivot,
                target,
            },
            true,
            now_ms,
        )
    }

    fn bind_at(&mut self, point: Point) -> PivotBinding {
        let area = self.viewport().to_content_area(point);
        let binding = match self.transform().invert_point(area) {
            Some(content) => PivotBinding::new(content, area),
            None => PivotBinding::new(area, area),
        };
        self.gesture.binding = Some(binding);
        binding
    }

    fn bind_center(&mut self) -> PivotBinding {
        let viewport = self.viewport();
        let center = viewport.from_content_area((viewport.available() / 2.0).to_vec2().to_point());
        self.bind_at(center)
    }
}
