// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Insets, Point, Size};

/// The view area an image is displayed in.
///
/// `size` is the full view size in pixels; `padding` is subtracted from it to
/// obtain the available area that transforms are computed against. All
/// view-space points handed to the engine are relative to the view origin;
/// [`Viewport::to_content_area`] shifts them into the available area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Full view size.
    pub size: Size,
    /// Padding on each edge (`x0` left, `y0` top, `x1` right, `y1` bottom).
    pub padding: Insets,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(Size::ZERO)
    }
}

impl Viewport {
    /// A viewport with no padding.
    #[must_use]
    pub const fn new(size: Size) -> Self {
        Self {
            size,
            padding: Insets::ZERO,
        }
    }

    /// Returns a copy with the given padding.
    #[must_use]
    pub const fn with_padding(self, padding: Insets) -> Self {
        Self {
            size: self.size,
            padding,
        }
    }

    /// Size remaining after padding, never negative.
    #[must_use]
    pub fn available(&self) -> Size {
        Size::new(
            (self.size.width - self.padding.x0 - self.padding.x1).max(0.0),
            (self.size.height - self.padding.y0 - self.padding.y1).max(0.0),
        )
    }

    /// Returns `true` once the available area has positive width and height.
    #[must_use]
    pub fn is_laid_out(&self) -> bool {
        let available = self.available();
        available.width > 0.0 && available.height > 0.0
    }

    /// Top-left corner of the available area in view coordinates.
    #[must_use]
    pub fn origin(&self) -> Point {
        Point::new(self.padding.x0, self.padding.y0)
    }

    /// Converts a view point into the available area's coordinates.
    #[must_use]
    pub fn to_content_area(&self, pt: Point) -> Point {
        pt - self.origin().to_vec2()
    }

    /// Converts a point in the available area back into view coordinates.
    #[must_use]
    pub fn from_content_area(&self, pt: Point) -> Point {
        pt + self.origin().to_vec2()
    }
}

/// Physical display size in pixels, used to cap the maximum zoom.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplayMetrics {
    /// Display size in pixels.
    pub size: Size,
}

impl DisplayMetrics {
    /// Creates display metrics for a `width` x `height` pixel display.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self {
            size: Size::new(width, height),
        }
    }

    /// Shorter display dimension.
    #[must_use]
    pub fn breadth(&self) -> f64 {
        self.size.width.min(self.size.height)
    }

    /// Longer display dimension.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.size.width.max(self.size.height)
    }
}

impl Default for DisplayMetrics {
    fn default() -> Self {
        Self::new(1080.0, 1920.0)
    }
}

/// Normalizes a raw intrinsic content size.
///
/// Content without a positive width and height has no intrinsic size.
#[must_use]
pub fn content_size(raw: Size) -> Option<Size> {
    (raw.width > 0.0 && raw.height > 0.0 && raw.width.is_finite() && raw.height.is_finite())
        .then_some(raw)
}
