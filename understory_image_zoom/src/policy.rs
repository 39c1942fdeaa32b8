// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// How image content is fitted into the available viewport area.
///
/// The policy decides both the shape of the baseline transform (see
/// [`crate::compute_baseline`]) and where undersized content is anchored when
/// panning is clamped (see [`crate::clamp()`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScalePolicy {
    /// Use the transform supplied by the caller verbatim.
    Matrix,
    /// Scale uniformly so the content fits, then center it.
    #[default]
    FitCenter,
    /// Scale uniformly so the content fits, aligned to the start edges.
    FitStart,
    /// Scale uniformly so the content fits, aligned to the end edges.
    FitEnd,
    /// Stretch the content to fill the viewport, ignoring aspect ratio.
    FitXy,
    /// Center the content without scaling.
    Center,
    /// Scale uniformly so the content covers the viewport, then center it.
    CenterCrop,
    /// Like [`ScalePolicy::FitCenter`], but never scales content up.
    CenterInside,
}

impl ScalePolicy {
    /// Returns the anchor used for an axis whose scaled content is smaller
    /// than the viewport.
    ///
    /// Only the horizontal axis follows the layout direction; start and end
    /// swap under [`LayoutDirection::Rtl`].
    #[must_use]
    pub fn anchor(self, axis: Axis, direction: LayoutDirection) -> Anchor {
        let anchor = match self {
            Self::FitStart => Anchor::Start,
            Self::FitEnd => Anchor::End,
            _ => Anchor::Center,
        };
        match (axis, direction) {
            (Axis::Horizontal, LayoutDirection::Rtl) => anchor.mirrored(),
            _ => anchor,
        }
    }
}

/// Where undersized content sits along one axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    /// Flush with the leading edge (translation `0`).
    Start,
    /// Centered in the available extent.
    Center,
    /// Flush with the trailing edge.
    End,
}

impl Anchor {
    /// Swaps [`Anchor::Start`] and [`Anchor::End`].
    #[must_use]
    pub fn mirrored(self) -> Self {
        match self {
            Self::Start => Self::End,
            Self::Center => Self::Center,
            Self::End => Self::Start,
        }
    }

    /// Translation that places content of extent `content` inside `available`.
    #[must_use]
    pub fn offset(self, available: f64, content: f64) -> f64 {
        match self {
            Self::Start => 0.0,
            Self::Center => (available - content) * 0.5,
            Self::End => available - content,
        }
    }
}

/// Text direction of the hosting layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LayoutDirection {
    /// Left to right.
    #[default]
    Ltr,
    /// Right to left; mirrors horizontal start/end anchoring.
    Rtl,
}

/// One of the two screen axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    /// The x axis.
    Horizontal,
    /// The y axis.
    Vertical,
}
