// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end tests for `understory_image_zoom`.
//!
//! These drive [`ZoomState`] through its public API the way a host view
//! would: layout notifications, requests, gestures and animation ticks.

use kurbo::{Point, Size, Vec2};
use understory_image_zoom::{
    ClampContext, ClampRequest, Fling, ImageTransform, LayoutDirection, PanRange, ScaleBounds,
    ScalePolicy, TransformRequest, TransitionDriver, ZoomConfig, ZoomState, clamp,
    compute_baseline, next_zoom_pivot,
};

const SIZES: [(f64, f64); 6] = [
    (1.0, 1.0),
    (100.0, 100.0),
    (1000.0, 500.0),
    (300.0, 1200.0),
    (4000.0, 3000.0),
    (12.5, 7.25),
];

fn state(policy: ScalePolicy, content: Size, view: Size) -> ZoomState {
    let mut s = ZoomState::new();
    s.set_scale_policy(policy);
    s.set_content_size(content);
    s.set_view_size(view);
    s
}

#[test]
fn center_inside_never_upscales() {
    for (cw, ch) in SIZES {
        for (vw, vh) in SIZES {
            let t = compute_baseline(
                Some(Size::new(cw, ch)),
                Size::new(vw, vh),
                ScalePolicy::CenterInside,
                None,
            );
            assert!(
                t.scale.x <= 1.0 && t.scale.y <= 1.0,
                "{cw}x{ch} in {vw}x{vh}: {t:?}"
            );
        }
    }
}

#[test]
fn requested_scale_always_lands_within_bounds() {
    let policies = [
        ScalePolicy::FitCenter,
        ScalePolicy::FitStart,
        ScalePolicy::FitXy,
        ScalePolicy::CenterCrop,
        ScalePolicy::CenterInside,
        ScalePolicy::Center,
    ];
    for policy in policies {
        for (cw, ch) in SIZES {
            let mut s = state(policy, Size::new(cw, ch), Size::new(640.0, 480.0));
            for scale in [0.001, 0.5, 1.0, 7.0, 1e6, f64::NAN] {
                s.zoom_to(Vec2::new(scale, scale), Point::new(320.0, 240.0), false, 0);
                let t = s.transform();
                assert!(
                    s.scale_bounds().contains(t.scale),
                    "{policy:?} {cw}x{ch} scale {scale}: {t:?} outside {:?}",
                    s.scale_bounds()
                );
            }
        }
    }
}

#[test]
fn clamp_is_idempotent() {
    let ctx = ClampContext {
        intrinsic: Some(Size::new(1000.0, 500.0)),
        available: Size::new(500.0, 500.0),
        bounds: ScaleBounds {
            min: Vec2::new(0.5, 0.5),
            max: Vec2::new(4.0, 4.0),
        },
        policy: ScalePolicy::FitCenter,
        direction: LayoutDirection::Ltr,
    };
    let request = ClampRequest {
        scale: Vec2::new(9.0, 9.0),
        pivot: Point::new(10.0, 490.0),
        target: Point::new(480.0, 20.0),
    };
    let current = ImageTransform::new(0.5, 0.5, 0.0, 125.0);
    let first = clamp(request, &ctx, current);
    let second = clamp(request, &ctx, current);
    assert_eq!(first, second);

    // Re-clamping the result is a no-op.
    let again = clamp(
        ClampRequest {
            scale: first.transform.scale,
            pivot: request.pivot,
            target: first.achieved,
        },
        &ctx,
        first.transform,
    );
    assert!(!again.changed);
    assert_eq!(again.transform, first.transform);
}

#[test]
fn unclamped_request_keeps_pivot_under_target() {
    let mut s = state(
        ScalePolicy::FitCenter,
        Size::new(1000.0, 1000.0),
        Size::new(500.0, 500.0),
    );
    let pivot = Point::new(400.0, 600.0);
    let target = Point::new(260.0, 240.0);
    assert!(s.set_transform(
        TransformRequest {
            scale: Vec2::new(2.0, 2.0),
            pivot,
            target,
            animate: false,
        },
        0,
    ));
    let landed = s.view_point_of(pivot);
    assert!((landed - target).hypot() < 1e-9, "{landed:?}");
}

#[test]
fn fit_start_keeps_narrow_content_at_leading_edge() {
    let mut s = state(
        ScalePolicy::FitStart,
        Size::new(100.0, 100.0),
        Size::new(400.0, 200.0),
    );
    // Scaled content is 200 wide in a 400 wide view.
    assert_eq!(s.transform().translation.x, 0.0);

    s.set_transform(
        TransformRequest {
            scale: Vec2::new(2.0, 2.0),
            pivot: Point::new(50.0, 50.0),
            target: Point::new(300.0, 100.0),
            animate: false,
        },
        0,
    );
    assert_eq!(s.transform().translation.x, 0.0);

    s.down(Point::new(100.0, 100.0));
    s.scroll(Vec2::new(-80.0, 0.0));
    s.up();
    assert_eq!(s.transform().translation.x, 0.0);
}

#[test]
fn rtl_fit_start_anchors_to_trailing_edge() {
    let mut s = ZoomState::new();
    s.set_scale_policy(ScalePolicy::FitStart);
    s.set_layout_direction(LayoutDirection::Rtl);
    s.set_content_size(Size::new(100.0, 100.0));
    s.set_view_size(Size::new(400.0, 200.0));
    assert_eq!(s.transform().translation.x, 200.0);

    s.down(Point::new(300.0, 100.0));
    s.scroll(Vec2::new(80.0, 0.0));
    assert_eq!(s.transform().translation.x, 200.0);
}

#[test]
fn transition_ends_on_exact_end_values() {
    let mut driver = TransitionDriver::default();
    let from = ImageTransform::new(0.5, 0.5, 0.0, 125.0);
    let to = ImageTransform::new(1.7, 1.7, -333.3, -12.5);
    let pivot = Point::new(123.0, 45.0);
    driver.start(pivot, from, to, to.map_point(pivot), 40, 250);
    let frame = driver.tick(290).unwrap();
    assert!(frame.finished);
    assert_eq!(frame.scale, to.scale);
    assert_eq!(frame.target, to.map_point(pivot));

    // Through the state: the animated end equals the direct jump.
    let request = TransformRequest {
        scale: Vec2::new(3.0, 3.0),
        pivot: Point::new(700.0, 100.0),
        target: Point::new(100.0, 400.0),
        animate: true,
    };
    let mut direct = state(
        ScalePolicy::FitCenter,
        Size::new(1000.0, 500.0),
        Size::new(500.0, 500.0),
    );
    direct.set_transform(
        TransformRequest {
            animate: false,
            ..request
        },
        0,
    );
    let mut animated = state(
        ScalePolicy::FitCenter,
        Size::new(1000.0, 500.0),
        Size::new(500.0, 500.0),
    );
    animated.set_transform(request, 1_000);
    assert!(animated.tick(1_100));
    assert!(!animated.tick(1_250));
    assert_eq!(animated.transform(), direct.transform());
}

#[test]
fn center_crop_wide_content_in_square_view() {
    let mut s = state(
        ScalePolicy::CenterCrop,
        Size::new(1000.0, 500.0),
        Size::new(500.0, 500.0),
    );
    assert_eq!(s.baseline(), ImageTransform::new(1.0, 1.0, -250.0, 0.0));
    assert_eq!(s.transform(), s.baseline());
    assert_eq!(s.scale_bounds().min, Vec2::new(1.0, 1.0));
}

#[test]
fn double_tap_steps_to_next_pivot() {
    assert_eq!(
        next_zoom_pivot(&[0.0, 0.5, 1.0], Vec2::new(0.3, 0.3)),
        Some(1)
    );

    let mut s = state(
        ScalePolicy::FitCenter,
        Size::new(1000.0, 500.0),
        Size::new(500.0, 500.0),
    );
    let center = Point::new(250.0, 250.0);
    let scale = s.scale_bounds().scale_at(0.3);
    s.zoom_to(scale, center, false, 0);
    assert!((s.relative_scale().x - 0.3).abs() < 1e-9);

    assert!(s.double_tap(center, 0));
    let mut now = 0;
    while s.tick(now) {
        now += 16;
    }
    assert!((s.relative_scale().x - 0.5).abs() < 1e-9);

    // From the top step the cycle wraps back to the fitted scale.
    let max = s.scale_bounds().max;
    s.zoom_to(max, center, false, now);
    assert!(s.double_tap(center, now));
    while s.tick(now) {
        now += 16;
    }
    assert_eq!(s.transform().scale, s.scale_bounds().min);
}

#[test]
fn zero_velocity_fling_finishes_immediately() {
    let fling = Fling::start(
        Vec2::ZERO,
        Vec2::ZERO,
        PanRange::default(),
        2000.0,
        50.0,
        0,
    );
    assert!(fling.is_finished());

    let mut s = state(
        ScalePolicy::FitCenter,
        Size::new(1000.0, 1000.0),
        Size::new(500.0, 500.0),
    );
    s.zoom_to(Vec2::new(2.0, 2.0), Point::new(250.0, 250.0), false, 0);
    assert!(!s.fling(Vec2::ZERO, 0));
    assert!(!s.is_animating());
    assert!(!s.tick(16));
}

#[test]
fn fling_glides_and_stops_inside_bounds() {
    let mut s = state(
        ScalePolicy::FitCenter,
        Size::new(1000.0, 1000.0),
        Size::new(500.0, 500.0),
    );
    s.zoom_to(Vec2::new(2.0, 2.0), Point::new(250.0, 250.0), false, 0);
    let start = s.transform().translation;
    assert!(s.fling(Vec2::new(3000.0, -800.0), 0));
    let mut now = 0;
    while s.tick(now) {
        now += 16;
        assert!(now < 10_000, "fling never settled");
    }
    let end = s.transform().translation;
    assert!(end.x > start.x);
    assert!(end.y < start.y);
    // 2000x2000 content in a 500x500 view.
    assert!((-1500.0..=0.0).contains(&end.x));
    assert!((-1500.0..=0.0).contains(&end.y));
}

#[test]
fn requests_before_layout_are_replayed_once() {
    let mut s = ZoomState::new();
    s.set_content_size(Size::new(100.0, 100.0));
    let first = TransformRequest {
        scale: Vec2::new(4.0, 4.0),
        pivot: Point::new(0.0, 0.0),
        target: Point::new(0.0, 0.0),
        animate: false,
    };
    let second = TransformRequest {
        scale: Vec2::new(2.0, 2.0),
        ..first
    };
    assert!(!s.set_transform(first, 0));
    assert!(!s.set_transform(second, 0));

    s.set_view_size(Size::new(100.0, 100.0));
    assert_eq!(s.transform(), ImageTransform::new(2.0, 2.0, 0.0, 0.0));

    s.set_view_size(Size::new(50.0, 50.0));
    assert_eq!(s.transform(), s.baseline());
}

#[test]
fn reset_before_layout_is_resolved_after_layout() {
    let mut s = ZoomState::new();
    s.set_content_size(Size::new(1000.0, 500.0));
    assert!(!s.reset(false, 0));
    s.set_view_size(Size::new(500.0, 500.0));
    assert_eq!(s.transform(), s.baseline());
    assert_eq!(s.transform(), ImageTransform::new(0.5, 0.5, 0.0, 125.0));
}

#[test]
fn zoom_before_layout_is_resolved_after_layout() {
    let mut fitted = state(
        ScalePolicy::FitCenter,
        Size::new(1000.0, 500.0),
        Size::new(500.0, 500.0),
    );
    let center = Point::new(250.0, 250.0);
    let shown = fitted.content_point_at(center);

    let mut s = ZoomState::new();
    s.set_content_size(Size::new(1000.0, 500.0));
    assert!(!s.zoom_to(Vec2::new(1.0, 1.0), center, true, 0));
    s.set_view_size(Size::new(500.0, 500.0));
    assert!(!s.is_animating());
    assert_eq!(s.transform().scale, Vec2::new(1.0, 1.0));
    assert_eq!(s.content_point_at(center), shown);
}

#[test]
fn missing_content_is_identity() {
    let mut s = ZoomState::new();
    s.set_view_size(Size::new(640.0, 480.0));
    assert_eq!(s.transform(), ImageTransform::IDENTITY);
    assert_eq!(s.scale_bounds(), ScaleBounds::FIXED);
    assert_eq!(s.relative_scale(), Vec2::ZERO);
    assert!(!s.scroll(Vec2::new(10.0, 10.0)));
    assert!(!s.double_tap(Point::new(10.0, 10.0), 0));

    s.set_content_size(Size::new(320.0, 240.0));
    assert_eq!(s.transform(), ImageTransform::new(2.0, 2.0, 0.0, 0.0));
    s.clear_content();
    assert_eq!(s.transform(), ImageTransform::IDENTITY);
}

#[test]
fn pinch_zooms_around_focus() {
    let config = ZoomConfig {
        transition_duration_ms: 0,
        ..ZoomConfig::default()
    };
    let mut s = ZoomState::with_config(config).unwrap();
    s.set_content_size(Size::new(1000.0, 1000.0));
    s.set_view_size(Size::new(500.0, 500.0));

    let focus = Point::new(200.0, 300.0);
    let under = s.content_point_at(focus).unwrap();
    s.scale_begin(focus);
    for _ in 0..4 {
        s.scale(focus, 1.25);
    }
    s.scale_end();
    let t = s.transform();
    assert!(t.scale.x > 1.0);
    let landed = s.view_point_of(under);
    assert!((landed - focus).hypot() < 1e-9, "{landed:?}");
}
