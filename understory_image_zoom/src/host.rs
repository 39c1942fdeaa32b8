// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Composition of a host image view with a [`ZoomEngine`].
//!
//! The host exposes what it knows (content size, viewport, fit policy) through
//! [`ImageHost`] and receives the resulting transform through
//! [`ImageHost::apply_transform`]. [`ZoomImage`] owns both halves and keeps
//! them in step; it never needs to know what toolkit the host belongs to.

use kurbo::{Affine, Point, Size, Vec2};

use crate::config::{ConfigError, ZoomConfig};
use crate::engine::ZoomEngine;
use crate::policy::{LayoutDirection, ScalePolicy};
use crate::state::TransformRequest;
use crate::transform::ImageTransform;
use crate::viewport::{DisplayMetrics, Viewport};

/// What the engine needs from the view displaying an image.
pub trait ImageHost {
    /// Intrinsic size of the displayed content; a zero or negative size means
    /// there is none.
    fn content_size(&self) -> Size;

    /// Current view size and padding.
    fn viewport(&self) -> Viewport;

    /// Fit policy configured on the view.
    fn scale_policy(&self) -> ScalePolicy;

    /// Layout direction of the view.
    fn layout_direction(&self) -> LayoutDirection {
        LayoutDirection::Ltr
    }

    /// Metrics of the display the view is shown on.
    fn display_metrics(&self) -> DisplayMetrics {
        DisplayMetrics::default()
    }

    /// Transform to use as the baseline under [`ScalePolicy::Matrix`].
    fn supplied_matrix(&self) -> Option<ImageTransform> {
        None
    }

    /// Receives a new content-to-view transform (padding included).
    fn apply_transform(&mut self, transform: Affine);

    /// Asks for [`ZoomImage::tick`] to be called on the next frame.
    fn schedule_tick(&mut self) {}
}

/// A host view paired with its zoom engine.
///
/// Every forwarding method first syncs the host's reported inputs into the
/// engine, runs the operation, and then pushes the transform back to the
/// host if it changed. While motion is in flight a tick is scheduled after
/// each call.
#[derive(Debug)]
pub struct ZoomImage<H> {
    host: H,
    engine: ZoomEngine,
    applied: Option<Affine>,
}

impl<H: ImageHost> ZoomImage<H> {
    /// Wraps `host` with a default-configured engine and applies the initial
    /// transform.
    pub fn new(host: H) -> Self {
        Self::with_engine(host, ZoomEngine::new())
    }

    /// Wraps `host` with an engine using `config`.
    pub fn with_config(host: H, config: ZoomConfig) -> Result<Self, ConfigError> {
        Ok(Self::with_engine(host, ZoomEngine::with_config(config)?))
    }

    fn with_engine(host: H, engine: ZoomEngine) -> Self {
        let mut image = Self {
            host,
            engine,
            applied: None,
        };
        image.sync();
        image
    }

    /// The host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host; call [`ZoomImage::sync`] after changing
    /// anything it reports.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// The engine.
    pub fn engine(&self) -> &ZoomEngine {
        &self.engine
    }

    /// Returns the host, dropping the engine.
    pub fn into_host(self) -> H {
        self.host
    }

    /// Pulls the host's inputs into the engine and pushes the resulting
    /// transform back.
    ///
    /// Unchanged inputs are ignored by the engine, so calling this on every
    /// layout pass is cheap.
    pub fn sync(&mut self) {
        let host = &self.host;
        self.engine.update(|s| {
            s.set_content_size(host.content_size());
            s.set_viewport(host.viewport());
            s.set_scale_policy(host.scale_policy());
            s.set_matrix(host.supplied_matrix());
            s.set_layout_direction(host.layout_direction());
            s.set_display_metrics(host.display_metrics());
        });
        self.present();
    }

    fn present(&mut self) {
        let (affine, animating) = self.engine.update(|s| (s.affine(), s.is_animating()));
        if self.applied != Some(affine) {
            self.applied = Some(affine);
            self.host.apply_transform(affine);
        }
        if animating {
            self.host.schedule_tick();
        }
    }

    fn run<R>(&mut self, op: impl FnOnce(&ZoomEngine) -> R) -> R {
        self.sync();
        let result = op(&self.engine);
        self.present();
        result
    }

    /// See [`crate::ZoomState::set_transform`].
    pub fn set_transform(&mut self, request: TransformRequest, now_ms: u64) -> bool {
        self.run(|e| e.set_transform(request, now_ms))
    }

    /// See [`crate::ZoomState::zoom_to`].
    pub fn zoom_to(&mut self, scale: Vec2, view_point: Point, animate: bool, now_ms: u64) -> bool {
        self.run(|e| e.zoom_to(scale, view_point, animate, now_ms))
    }

    /// See [`crate::ZoomState::reset`].
    pub fn reset(&mut self, animate: bool, now_ms: u64) -> bool {
        self.run(|e| e.reset(animate, now_ms))
    }

    /// See [`crate::ZoomState::down`].
    pub fn down(&mut self, point: Point) {
        self.run(|e| e.down(point));
    }

    /// See [`crate::ZoomState::up`].
    pub fn up(&mut self) {
        self.run(ZoomEngine::up);
    }

    /// See [`crate::ZoomState::scroll`].
    pub fn scroll(&mut self, distance: Vec2) -> bool {
        self.run(|e| e.scroll(distance))
    }

    /// See [`crate::ZoomState::fling`].
    pub fn fling(&mut self, velocity: Vec2, now_ms: u64) -> bool {
        self.run(|e| e.fling(velocity, now_ms))
    }

    /// See [`crate::ZoomState::scale_begin`].
    pub fn scale_begin(&mut self, focus: Point) {
        self.run(|e| e.scale_begin(focus));
    }

    /// See [`crate::ZoomState::scale`].
    pub fn scale(&mut self, focus: Point, span_ratio: f64) -> bool {
        self.run(|e| e.scale(focus, span_ratio))
    }

    /// See [`crate::ZoomState::scale_end`].
    pub fn scale_end(&mut self) {
        self.run(ZoomEngine::scale_end);
    }

    /// See [`crate::ZoomState::double_tap`].
    pub fn double_tap(&mut self, point: Point, now_ms: u64) -> bool {
        self.run(|e| e.double_tap(point, now_ms))
    }

    /// Advances motion to `now_ms`; schedules another tick while motion
    /// remains.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        self.run(|e| e.tick(now_ms))
    }
}
