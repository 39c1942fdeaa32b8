// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimum/maximum zoom derived from the baseline transform.

use kurbo::{Size, Vec2};

use crate::transform::ImageTransform;
use crate::viewport::DisplayMetrics;

/// Per-axis scale limits.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleBounds {
    /// Smallest permitted scale per axis.
    pub min: Vec2,
    /// Largest permitted scale per axis.
    pub max: Vec2,
}

impl Default for ScaleBounds {
    fn default() -> Self {
        Self::FIXED
    }
}

impl ScaleBounds {
    /// Bounds that pin the scale at `1.0`; used when there is no content.
    pub const FIXED: Self = Self {
        min: Vec2::new(1.0, 1.0),
        max: Vec2::new(1.0, 1.0),
    };

    /// Clamps a scale into the bounds, per axis.
    #[must_use]
    pub fn clamp(&self, scale: Vec2) -> Vec2 {
        Vec2::new(
            scale.x.max(self.min.x).min(self.max.x),
            scale.y.max(self.min.y).min(self.max.y),
        )
    }

    /// Returns `true` if `scale` lies within the bounds on both axes.
    #[must_use]
    pub fn contains(&self, scale: Vec2) -> bool {
        (self.min.x..=self.max.x).contains(&scale.x) && (self.min.y..=self.max.y).contains(&scale.y)
    }

    /// Position of `scale` between min (`0.0`) and max (`1.0`), per axis.
    ///
    /// An empty range yields `0.0` rather than NaN.
    #[must_use]
    pub fn relative(&self, scale: Vec2) -> Vec2 {
        Vec2::new(
            relative_scale(scale.x, self.min.x, self.max.x),
            relative_scale(scale.y, self.min.y, self.max.y),
        )
    }

    /// The scale at `fraction` of the way from min to max, per axis.
    #[must_use]
    pub fn scale_at(&self, fraction: f64) -> Vec2 {
        self.min + (self.max - self.min) * fraction
    }
}

/// Position of `scale` within `[min, max]`, or `0.0` if undefined.
#[must_use]
pub fn relative_scale(scale: f64, min: f64, max: f64) -> f64 {
    let rel = (scale - min) / (max - min);
    if rel.is_finite() { rel } else { 0.0 }
}

/// Multipliers capping the zoomed content size relative to the display.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenCaps {
    /// Max zoomed breadth as a multiple of the display's shorter side.
    pub breadth_multiplier: f64,
    /// Max zoomed length as a multiple of the display's longer side.
    pub length_multiplier: f64,
}

/// Derives zoom limits from the baseline transform.
///
/// The minimum is the baseline scale itself. The maximum multiplies the
/// baseline scale by the larger of a display-derived cap and the factor that
/// lets the content's narrow side fill the available area; the factor never
/// drops below `1.0`, so `min <= max` always holds.
#[must_use]
pub fn compute_scale_bounds(
    baseline: ImageTransform,
    intrinsic: Option<Size>,
    available: Size,
    display: DisplayMetrics,
    caps: ScreenCaps,
) -> ScaleBounds {
    let Some(content) = intrinsic else {
        return ScaleBounds::FIXED;
    };
    let fitted = baseline.scaled_size(content);
    let (fw, fh) = (fitted.width.abs(), fitted.height.abs());
    let breadth = fw.min(fh);
    let length = fw.max(fh);
    if !(breadth > 0.0 && length.is_finite()) {
        return ScaleBounds {
            min: baseline.scale,
            max: baseline.scale,
        };
    }

    let screen_based = (caps.breadth_multiplier * display.breadth() / breadth)
        .min(caps.length_multiplier * display.length() / length);
    let view_based = if fw <= fh {
        available.width / fw
    } else {
        available.height / fh
    };
    let factor = screen_based.max(view_based);
    let factor = if factor.is_finite() { factor.max(1.0) } else { 1.0 };

    ScaleBounds {
        min: baseline.scale,
        max: baseline.scale * factor,
    }
}
