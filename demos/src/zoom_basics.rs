// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Image zoom basics.
//!
//! Drive `understory_image_zoom` through a scripted gesture sequence on a
//! simulated image view, printing the transform the view would draw with.
//!
//! Run:
//! - `cargo run -p understory_image_zoom_demos --bin zoom_basics`
//! - `RUST_LOG=debug cargo run -p understory_image_zoom_demos --bin zoom_basics`
//!   to see invalidations, cache rebuilds and motion events.

use kurbo::{Affine, Insets, Point, Size, Vec2};
use log::info;
use understory_image_zoom::{DisplayMetrics, ImageHost, ScalePolicy, Viewport, ZoomImage};

const FRAME_MS: u64 = 16;

/// A stand-in for a toolkit image view.
#[derive(Debug)]
struct SimulatedView {
    bitmap: Size,
    viewport: Viewport,
    display: DisplayMetrics,
    policy: ScalePolicy,
    matrix: Affine,
    tick_pending: bool,
    frames: usize,
}

impl ImageHost for SimulatedView {
    fn content_size(&self) -> Size {
        self.bitmap
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn scale_policy(&self) -> ScalePolicy {
        self.policy
    }

    fn display_metrics(&self) -> DisplayMetrics {
        self.display
    }

    fn apply_transform(&mut self, transform: Affine) {
        self.matrix = transform;
        self.frames += 1;
    }

    fn schedule_tick(&mut self) {
        self.tick_pending = true;
    }
}

fn report(step: &str, image: &ZoomImage<SimulatedView>) {
    let [sx, _, _, sy, tx, ty] = image.host().matrix.as_coeffs();
    let rel = image.engine().relative_scale();
    println!(
        "{step:<12} scale ({sx:>6.3}, {sy:>6.3})  translate ({tx:>8.1}, {ty:>8.1})  zoom {:>5.1}%",
        rel.x * 100.0
    );
}

/// Runs frames until the view stops asking for them.
fn animate(image: &mut ZoomImage<SimulatedView>, now: &mut u64) {
    while std::mem::take(&mut image.host_mut().tick_pending) {
        *now += FRAME_MS;
        image.tick(*now);
    }
}

fn main() {
    env_logger::init();

    let view = SimulatedView {
        bitmap: Size::new(4000.0, 3000.0),
        viewport: Viewport::new(Size::new(1080.0, 1920.0))
            .with_padding(Insets::uniform_xy(0.0, 48.0)),
        display: DisplayMetrics::new(1080.0, 1920.0),
        policy: ScalePolicy::FitCenter,
        matrix: Affine::IDENTITY,
        tick_pending: false,
        frames: 0,
    };
    let mut image = ZoomImage::new(view);
    let mut now = 0;
    let bounds = image.engine().scale_bounds();
    info!("scale bounds {:?} .. {:?}", bounds.min, bounds.max);
    report("fitted", &image);

    let center = Point::new(540.0, 960.0);
    image.double_tap(center, now);
    animate(&mut image, &mut now);
    report("double tap", &image);

    image.down(center);
    for _ in 0..20 {
        image.scroll(Vec2::new(-15.0, 5.0));
    }
    report("drag", &image);
    image.fling(Vec2::new(-2400.0, 900.0), now);
    animate(&mut image, &mut now);
    report("fling", &image);

    let focus = Point::new(300.0, 1200.0);
    image.scale_begin(focus);
    for _ in 0..10 {
        image.scale(focus, 1.1);
    }
    image.scale_end();
    report("pinch out", &image);

    image.double_tap(center, now);
    animate(&mut image, &mut now);
    report("double tap", &image);

    // Rotating the device swaps the view dimensions and resets to fit.
    image.host_mut().viewport = Viewport::new(Size::new(1920.0, 1080.0));
    image.host_mut().display = DisplayMetrics::new(1920.0, 1080.0);
    image.sync();
    report("rotated", &image);

    image.host_mut().policy = ScalePolicy::CenterCrop;
    image.sync();
    report("center crop", &image);

    image.reset(true, now);
    animate(&mut image, &mut now);
    report("reset", &image);

    let frames = image.into_host().frames;
    println!("{frames} transforms applied over {now} ms");
}
