// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Baseline ("fit") transform for content inside the available area.

use kurbo::Size;

use crate::policy::{Anchor, ScalePolicy};
use crate::transform::ImageTransform;

/// Computes the transform that fits content into the available area.
///
/// - Content without an intrinsic size (`None`) gets the identity.
/// - [`ScalePolicy::Matrix`] returns `supplied` verbatim (identity if none).
/// - Content that exactly matches the available size gets the identity.
///
/// [`ScalePolicy::Center`], [`ScalePolicy::CenterCrop`] and
/// [`ScalePolicy::CenterInside`] round their translation to whole pixels;
/// the `Fit*` policies do not.
#[must_use]
pub fn compute_baseline(
    intrinsic: Option<Size>,
    available: Size,
    policy: ScalePolicy,
    supplied: Option<ImageTransform>,
) -> ImageTransform {
    let Some(content) = intrinsic else {
        return ImageTransform::IDENTITY;
    };
    let (dw, dh) = (content.width, content.height);
    let (vw, vh) = (available.width, available.height);

    match policy {
        ScalePolicy::Matrix => supplied.unwrap_or(ImageTransform::IDENTITY),
        _ if content == available => ImageTransform::IDENTITY,
        ScalePolicy::Center => {
            ImageTransform::new(1.0, 1.0, ((vw - dw) * 0.5).round(), ((vh - dh) * 0.5).round())
        }
        ScalePolicy::CenterCrop => {
            // Cover: the axis with the larger ratio wins, the other overflows.
            let (scale, dx, dy) = if dw * vh > vw * dh {
                let scale = vh / dh;
                (scale, (vw - dw * scale) * 0.5, 0.0)
            } else {
                let scale = vw / dw;
                (scale, 0.0, (vh - dh * scale) * 0.5)
            };
            ImageTransform::new(scale, scale, dx.round(), dy.round())
        }
        ScalePolicy::CenterInside => {
            let scale = if dw <= vw && dh <= vh {
                1.0
            } else {
                (vw / dw).min(vh / dh)
            };
            ImageTransform::new(
                scale,
                scale,
                ((vw - dw * scale) * 0.5).round(),
                ((vh - dh * scale) * 0.5).round(),
            )
        }
        ScalePolicy::FitXy => ImageTransform::new(vw / dw, vh / dh, 0.0, 0.0),
        ScalePolicy::FitStart => fit_uniform(content, available, Anchor::Start),
        ScalePolicy::FitCenter => fit_uniform(content, available, Anchor::Center),
        ScalePolicy::FitEnd => fit_uniform(content, available, Anchor::End),
    }
}

fn fit_uniform(content: Size, available: Size, anchor: Anchor) -> ImageTransform {
    let scale = (available.width / content.width).min(available.height / content.height);
    ImageTransform::new(
        scale,
        scale,
        anchor.offset(available.width, content.width * scale),
        anchor.offset(available.height, content.height * scale),
    )
}
