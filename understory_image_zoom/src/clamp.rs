// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Clamping of requested zoom/pan against scale bounds and pan bounds.
//!
//! A request names a content-space pivot and the view-space point it should
//! land on. The scale is clamped first; the translation that pins the pivot
//! under the target is then clamped per axis with the edge-anchor rule:
//!
//! - content at least as large as the available extent may pan between
//!   `available - content` and `0`, so it can reach an edge but never pass it;
//! - smaller content is fixed at the policy anchor (start, center or end,
//!   with start/end mirrored horizontally for right-to-left layouts).

use kurbo::{Point, Size, Vec2};

use crate::bounds::ScaleBounds;
use crate::policy::{Axis, LayoutDirection, ScalePolicy};
use crate::transform::ImageTransform;

/// Tolerance, in pixels or scale units, under which transforms are considered equal.
pub const CHANGE_EPSILON: f64 = 1e-6;

/// Everything the clamp needs to know about the current layout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClampContext {
    /// Intrinsic content size, if any.
    pub intrinsic: Option<Size>,
    /// Available viewport size.
    pub available: Size,
    /// Current scale limits.
    pub bounds: ScaleBounds,
    /// Fit policy deciding the anchor for undersized content.
    pub policy: ScalePolicy,
    /// Layout direction for horizontal anchoring.
    pub direction: LayoutDirection,
}

/// A requested scale plus the pivot binding to honor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClampRequest {
    /// Requested per-axis scale.
    pub scale: Vec2,
    /// Content-space point to keep under `target`.
    pub pivot: Point,
    /// View-space point (available area coordinates) `pivot` should land on.
    pub target: Point,
}

/// Result of [`clamp`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClampOutcome {
    /// The clamped transform.
    pub transform: ImageTransform,
    /// Where the pivot actually landed in view space.
    pub achieved: Point,
    /// Whether `transform` differs from the transform passed in as current.
    pub changed: bool,
}

/// Inclusive translation range along one axis; `min == max` when fixed.
///
/// The default range is fixed at `0.0`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AxisRange {
    /// Lowest permitted translation.
    pub min: f64,
    /// Highest permitted translation.
    pub max: f64,
}

impl AxisRange {
    fn for_extent(available: f64, content: f64, fixed_at: f64) -> Self {
        if content >= available {
            Self {
                min: available - content,
                max: 0.0,
            }
        } else {
            Self {
                min: fixed_at,
                max: fixed_at,
            }
        }
    }

    /// Clamps `value` into the range.
    #[must_use]
    pub fn clamp(self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }

    /// Returns `true` if no movement is possible along this axis.
    #[must_use]
    pub fn is_fixed(self) -> bool {
        self.min >= self.max
    }
}

/// Per-axis translation ranges for content at a given scale.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PanRange {
    /// Horizontal range.
    pub x: AxisRange,
    /// Vertical range.
    pub y: AxisRange,
}

impl PanRange {
    /// Clamps a translation into the range.
    #[must_use]
    pub fn clamp(self, translation: Vec2) -> Vec2 {
        Vec2::new(self.x.clamp(translation.x), self.y.clamp(translation.y))
    }
}

/// Computes the permitted translation range for content drawn at `scale`.
///
/// Without intrinsic content the range is fixed at the origin.
#[must_use]
pub fn pan_range(ctx: &ClampContext, scale: Vec2) -> PanRange {
    let Some(intrinsic) = ctx.intrinsic else {
        return PanRange::default();
    };
    let content = ImageTransform::from_scale(scale).scaled_size(intrinsic);
    let anchor_x = ctx.policy.anchor(Axis::Horizontal, ctx.direction);
    let anchor_y = ctx.policy.anchor(Axis::Vertical, ctx.direction);
    PanRange {
        x: AxisRange::for_extent(
            ctx.available.width,
            content.width,
            anchor_x.offset(ctx.available.width, content.width),
        ),
        y: AxisRange::for_extent(
            ctx.available.height,
            content.height,
            anchor_y.offset(ctx.available.height, content.height),
        ),
    }
}

/// Produces the clamped transform for `request`.
///
/// Non-finite requested scale components keep the matching component of
/// `current`; a non-finite target keeps the pivot where `current` puts it.
#[must_use]
pub fn clamp(request: ClampRequest, ctx: &ClampContext, current: ImageTransform) -> ClampOutcome {
    if ctx.intrinsic.is_none() {
        let transform = ImageTransform::IDENTITY;
        return ClampOutcome {
            transform,
            achieved: transform.map_point(request.pivot),
            changed: !transform.approx_eq(current, CHANGE_EPSILON),
        };
    }

    let requested = Vec2::new(
        finite_or(request.scale.x, current.scale.x),
        finite_or(request.scale.y, current.scale.y),
    );
    let scale = ctx.bounds.clamp(requested);

    let target = if request.target.is_finite() {
        request.target
    } else {
        current.map_point(request.pivot)
    };
    let unpanned = ImageTransform::from_scale(scale).map_point(request.pivot);
    let translation = pan_range(ctx, scale).clamp(target - unpanned);

    let transform = ImageTransform { scale, translation };
    ClampOutcome {
        transform,
        achieved: transform.map_point(request.pivot),
        changed: !transform.approx_eq(current, CHANGE_EPSILON),
    }
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() { value } else { fallback }
}
