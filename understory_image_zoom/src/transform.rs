// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Size, Vec2};

/// Axis-aligned scale + translation mapping content space into view space.
///
/// This is the 2x3 matrix `[sx 0 tx; 0 sy ty]`. Rotation and skew are not
/// modelled. A content point `p` lands at `(p.x * sx + tx, p.y * sy + ty)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImageTransform {
    /// Per-axis scale factors.
    pub scale: Vec2,
    /// Per-axis translation in view pixels, applied after scaling.
    pub translation: Vec2,
}

impl Default for ImageTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ImageTransform {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        scale: Vec2::new(1.0, 1.0),
        translation: Vec2::ZERO,
    };

    /// Creates a transform from per-axis scale and translation components.
    #[must_use]
    pub const fn new(scale_x: f64, scale_y: f64, translate_x: f64, translate_y: f64) -> Self {
        Self {
            scale: Vec2::new(scale_x, scale_y),
            translation: Vec2::new(translate_x, translate_y),
        }
    }

    /// A pure scale with no translation.
    #[must_use]
    pub const fn from_scale(scale: Vec2) -> Self {
        Self {
            scale,
            translation: Vec2::ZERO,
        }
    }

    /// Builds a transform from an affine, discarding rotation/skew terms.
    #[must_use]
    pub fn from_affine(affine: Affine) -> Self {
        let [a, _b, _c, d, e, f] = affine.as_coeffs();
        Self::new(a, d, e, f)
    }

    /// Returns the equivalent [`Affine`].
    #[must_use]
    pub fn to_affine(self) -> Affine {
        Affine::new([
            self.scale.x,
            0.0,
            0.0,
            self.scale.y,
            self.translation.x,
            self.translation.y,
        ])
    }

    /// Returns a copy with the translation replaced.
    #[must_use]
    pub fn with_translation(self, translation: Vec2) -> Self {
        Self {
            scale: self.scale,
            translation,
        }
    }

    /// Maps a content-space point into view space.
    #[must_use]
    pub fn map_point(self, pt: Point) -> Point {
        Point::new(
            pt.x * self.scale.x + self.translation.x,
            pt.y * self.scale.y + self.translation.y,
        )
    }

    /// Maps a view-space point back into content space.
    ///
    /// Returns `None` if either scale component is zero or non-finite.
    #[must_use]
    pub fn invert_point(self, pt: Point) -> Option<Point> {
        if !is_invertible(self.scale.x) || !is_invertible(self.scale.y) {
            return None;
        }
        Some(Point::new(
            (pt.x - self.translation.x) / self.scale.x,
            (pt.y - self.translation.y) / self.scale.y,
        ))
    }

    /// Size of content of the given intrinsic size once scaled.
    #[must_use]
    pub fn scaled_size(self, intrinsic: Size) -> Size {
        Size::new(intrinsic.width * self.scale.x, intrinsic.height * self.scale.y)
    }

    /// Returns `true` if all components are within `eps` of `other`'s.
    #[must_use]
    pub fn approx_eq(self, other: Self, eps: f64) -> bool {
        (self.scale.x - other.scale.x).abs() <= eps
            && (self.scale.y - other.scale.y).abs() <= eps
            && (self.translation.x - other.translation.x).abs() <= eps
            && (self.translation.y - other.translation.y).abs() <= eps
    }
}

fn is_invertible(s: f64) -> bool {
    s.is_finite() && s != 0.0
}

/// A content-space point that should land on a view-space point.
///
/// Clamping and animated transforms try to preserve this binding; the
/// achieved view point may differ once pan bounds are applied.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PivotBinding {
    /// Point in content (drawable) coordinates.
    pub content: Point,
    /// Point in view coordinates, relative to the content area origin.
    pub view: Point,
}

impl PivotBinding {
    /// Creates a new binding.
    #[must_use]
    pub const fn new(content: Point, view: Point) -> Self {
        Self { content, view }
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Affine, Point, Size, Vec2};

    use super::ImageTransform;

    #[test]
    fn map_and_invert_roundtrip() {
        let t = ImageTransform::new(2.0, 0.5, 10.0, -4.0);
        let p = Point::new(3.0, 8.0);
        let v = t.map_point(p);
        assert_eq!(v, Point::new(16.0, 0.0));
        let back = t.invert_point(v).unwrap();
        assert!((back.x - p.x).abs() < 1e-12);
        assert!((back.y - p.y).abs() < 1e-12);
    }

    #[test]
    fn zero_scale_is_not_invertible() {
        let t = ImageTransform::from_scale(Vec2::new(0.0, 1.0));
        assert!(t.invert_point(Point::ORIGIN).is_none());
    }

    #[test]
    fn affine_conversion_matches_mapping() {
        let t = ImageTransform::new(1.5, 3.0, -7.0, 2.0);
        let p = Point::new(4.0, -1.0);
        assert_eq!(t.to_affine() * p, t.map_point(p));
        assert_eq!(ImageTransform::from_affine(t.to_affine()), t);
        assert_eq!(
            ImageTransform::from_affine(Affine::translate((5.0, 6.0))),
            ImageTransform::new(1.0, 1.0, 5.0, 6.0)
        );
    }

    #[test]
    fn scaled_size_is_per_axis() {
        let t = ImageTransform::from_scale(Vec2::new(2.0, 0.25));
        assert_eq!(t.scaled_size(Size::new(10.0, 40.0)), Size::new(20.0, 10.0));
    }
}
