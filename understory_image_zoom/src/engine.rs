// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Insets, Point, Size, Vec2};
use parking_lot::Mutex;

use crate::bounds::ScaleBounds;
use crate::config::{ConfigError, ZoomConfig};
use crate::policy::{LayoutDirection, ScalePolicy};
use crate::state::{TransformRequest, ZoomDebugInfo, ZoomState};
use crate::transform::ImageTransform;
use crate::viewport::{DisplayMetrics, Viewport};

/// Lock-guarded [`ZoomState`].
///
/// Every method takes the lock once and runs to completion, so the caches,
/// the current transform and the motion state are always read and written
/// as a unit, even when a host re-enters with an invalidation from inside
/// its own callbacks. No method blocks on anything but the lock.
///
/// Use [`ZoomEngine::update`] to batch several operations under one lock.
#[derive(Debug, Default)]
pub struct ZoomEngine {
    state: Mutex<ZoomState>,
}

impl ZoomEngine {
    /// Creates an engine with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine with `config`.
    pub fn with_config(config: ZoomConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            state: Mutex::new(ZoomState::with_config(config)?),
        })
    }

    /// Runs `f` with exclusive access to the state.
    pub fn update<R>(&self, f: impl FnOnce(&mut ZoomState) -> R) -> R {
        f(&mut self.state.lock())
    }

    /// Consumes the engine and returns the state.
    #[must_use]
    pub fn into_state(self) -> ZoomState {
        self.state.into_inner()
    }

    /// See [`ZoomState::set_content_size`].
    pub fn set_content_size(&self, size: Size) {
        self.state.lock().set_content_size(size);
    }

    /// See [`ZoomState::clear_content`].
    pub fn clear_content(&self) {
        self.state.lock().clear_content();
    }

    /// See [`ZoomState::set_viewport`].
    pub fn set_viewport(&self, viewport: Viewport) {
        self.state.lock().set_viewport(viewport);
    }

    /// See [`ZoomState::set_view_size`].
    pub fn set_view_size(&self, size: Size) {
        self.state.lock().set_view_size(size);
    }

    /// See [`ZoomState::set_padding`].
    pub fn set_padding(&self, padding: Insets) {
        self.state.lock().set_padding(padding);
    }

    /// See [`ZoomState::set_scale_policy`].
    pub fn set_scale_policy(&self, policy: ScalePolicy) {
        self.state.lock().set_scale_policy(policy);
    }

    /// See [`ZoomState::set_matrix`].
    pub fn set_matrix(&self, matrix: Option<ImageTransform>) {
        self.state.lock().set_matrix(matrix);
    }

    /// See [`ZoomState::set_layout_direction`].
    pub fn set_layout_direction(&self, direction: LayoutDirection) {
        self.state.lock().set_layout_direction(direction);
    }

    /// See [`ZoomState::set_display_metrics`].
    pub fn set_display_metrics(&self, display: DisplayMetrics) {
        self.state.lock().set_display_metrics(display);
    }

    /// See [`ZoomState::set_config`].
    pub fn set_config(&self, config: ZoomConfig) -> Result<(), ConfigError> {
        self.state.lock().set_config(config)
    }

    /// See [`ZoomState::set_transform`].
    pub fn set_transform(&self, request: TransformRequest, now_ms: u64) -> bool {
        self.state.lock().set_transform(request, now_ms)
    }

    /// See [`ZoomState::zoom_to`].
    pub fn zoom_to(&self, scale: Vec2, view_point: Point, animate: bool, now_ms: u64) -> bool {
        self.state.lock().zoom_to(scale, view_point, animate, now_ms)
    }

    /// See [`ZoomState::reset`].
    pub fn reset(&self, animate: bool, now_ms: u64) -> bool {
        self.state.lock().reset(animate, now_ms)
    }

    /// See [`ZoomState::down`].
    pub fn down(&self, point: Point) {
        self.state.lock().down(point);
    }

    /// See [`ZoomState::up`].
    pub fn up(&self) {
        self.state.lock().up();
    }

    /// See [`ZoomState::scroll`].
    pub fn scroll(&self, distance: Vec2) -> bool {
        self.state.lock().scroll(distance)
    }

    /// See [`ZoomState::fling`].
    pub fn fling(&self, velocity: Vec2, now_ms: u64) -> bool {
        self.state.lock().fling(velocity, now_ms)
    }

    /// See [`ZoomState::scale_begin`].
    pub fn scale_begin(&self, focus: Point) {
        self.state.lock().scale_begin(focus);
    }

    /// See [`ZoomState::scale`].
    pub fn scale(&self, focus: Point, span_ratio: f64) -> bool {
        self.state.lock().scale(focus, span_ratio)
    }

    /// See [`ZoomState::scale_end`].
    pub fn scale_end(&self) {
        self.state.lock().scale_end();
    }

    /// See [`ZoomState::double_tap`].
    pub fn double_tap(&self, point: Point, now_ms: u64) -> bool {
        self.state.lock().double_tap(point, now_ms)
    }

    /// See [`ZoomState::tick`].
    pub fn tick(&self, now_ms: u64) -> bool {
        self.state.lock().tick(now_ms)
    }

    /// See [`ZoomState::is_animating`].
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.state.lock().is_animating()
    }

    /// See [`ZoomState::transform`].
    #[must_use]
    pub fn transform(&self) -> ImageTransform {
        self.state.lock().transform()
    }

    /// See [`ZoomState::affine`].
    #[must_use]
    pub fn affine(&self) -> Affine {
        self.state.lock().affine()
    }

    /// See [`ZoomState::baseline`].
    #[must_use]
    pub fn baseline(&self) -> ImageTransform {
        self.state.lock().baseline()
    }

    /// See [`ZoomState::scale_bounds`].
    #[must_use]
    pub fn scale_bounds(&self) -> ScaleBounds {
        self.state.lock().scale_bounds()
    }

    /// See [`ZoomState::relative_scale`].
    #[must_use]
    pub fn relative_scale(&self) -> Vec2 {
        self.state.lock().relative_scale()
    }

    /// See [`ZoomState::content_point_at`].
    #[must_use]
    pub fn content_point_at(&self, view_point: Point) -> Option<Point> {
        self.state.lock().content_point_at(view_point)
    }

    /// See [`ZoomState::view_point_of`].
    #[must_use]
    pub fn view_point_of(&self, content_point: Point) -> Point {
        self.state.lock().view_point_of(content_point)
    }

    /// See [`ZoomState::debug_info`].
    #[must_use]
    pub fn debug_info(&self) -> ZoomDebugInfo {
        self.state.lock().debug_info()
    }
}
