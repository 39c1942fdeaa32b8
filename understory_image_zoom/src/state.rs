// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Insets, Point, Size, Vec2};
use log::{debug, trace};

use crate::baseline::compute_baseline;
use crate::bounds::{ScaleBounds, compute_scale_bounds};
use crate::clamp::{ClampContext, ClampOutcome, ClampRequest, clamp, pan_range};
use crate::config::{ConfigError, ZoomConfig};
use crate::fling::Fling;
use crate::gesture::GestureSession;
use crate::policy::{LayoutDirection, ScalePolicy};
use crate::transform::ImageTransform;
use crate::transition::{AbortMode, TransitionDriver};
use crate::viewport::{DisplayMetrics, Viewport, content_size};

/// A caller request to move the image.
///
/// `pivot` is in content coordinates and `target` in view coordinates
/// (including padding). The engine keeps `pivot` under `target` as far as
/// the pan bounds allow.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformRequest {
    /// Requested per-axis scale.
    pub scale: Vec2,
    /// Content-space point to pin.
    pub pivot: Point,
    /// View-space point to pin it to.
    pub target: Point,
    /// Animate with the transition driver instead of jumping.
    pub animate: bool,
}

/// A request made before layout, kept as intent until it can be resolved.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Pending {
    Request(TransformRequest),
    ZoomTo { scale: Vec2, view_point: Point },
    Reset,
}

/// What has to happen to the current transform once caches are rebuilt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Settle {
    Keep,
    Reclamp,
    Reset,
}

/// Pan/zoom state for one displayed image.
///
/// This is the single owner of the baseline and scale-bound caches, the
/// current transform, and the motion state (at most one transition or one
/// fling). All methods take `&mut self`; see [`crate::ZoomEngine`] for the
/// lock-guarded wrapper.
///
/// Points passed in and out are in view coordinates; the transform itself is
/// relative to the padded content area (see [`ZoomState::affine`] for the
/// view-space version).
#[derive(Clone, Debug)]
pub struct ZoomState {
    config: ZoomConfig,
    intrinsic: Option<Size>,
    viewport: Viewport,
    policy: ScalePolicy,
    direction: LayoutDirection,
    display: DisplayMetrics,
    supplied: Option<ImageTransform>,
    baseline: Option<ImageTransform>,
    bounds: Option<ScaleBounds>,
    settle: Settle,
    current: ImageTransform,
    pub(crate) transition: TransitionDriver,
    pub(crate) fling: Option<Fling>,
    pub(crate) gesture: GestureSession,
    pending: Option<Pending>,
    baseline_rebuilds: u64,
}

impl Default for ZoomState {
    fn default() -> Self {
        Self::from_valid_config(ZoomConfig::default())
    }
}

impl ZoomState {
    /// Creates an empty state with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty state with `config`, rejecting invalid configurations.
    pub fn with_config(config: ZoomConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: ZoomConfig) -> Self {
        Self {
            config,
            intrinsic: None,
            viewport: Viewport::default(),
            policy: ScalePolicy::default(),
            direction: LayoutDirection::default(),
            display: DisplayMetrics::default(),
            supplied: None,
            baseline: None,
            bounds: None,
            settle: Settle::Reset,
            current: ImageTransform::IDENTITY,
            transition: TransitionDriver::default(),
            fling: None,
            gesture: GestureSession::default(),
            pending: None,
            baseline_rebuilds: 0,
        }
    }

    // --- Inbound notifications -------------------------------------------

    /// Sets the intrinsic content size; non-positive sizes mean "no content".
    pub fn set_content_size(&mut self, raw: Size) {
        let intrinsic = content_size(raw);
        if self.intrinsic == intrinsic {
            return;
        }
        self.intrinsic = intrinsic;
        self.invalidate("content");
    }

    /// Removes the content.
    pub fn clear_content(&mut self) {
        self.set_content_size(Size::ZERO);
    }

    /// Sets the full view size.
    pub fn set_view_size(&mut self, size: Size) {
        if self.viewport.size == size {
            return;
        }
        self.viewport.size = size;
        self.invalidate("viewport size");
    }

    /// Sets the view padding.
    pub fn set_padding(&mut self, padding: Insets) {
        if self.viewport.padding == padding {
            return;
        }
        self.viewport.padding = padding;
        self.invalidate("padding");
    }

    /// Sets view size and padding together.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.set_view_size(viewport.size);
        self.set_padding(viewport.padding);
    }

    /// Sets the fit policy.
    pub fn set_scale_policy(&mut self, policy: ScalePolicy) {
        if self.policy == policy {
            return;
        }
        self.policy = policy;
        self.invalidate("scale policy");
    }

    /// Supplies the transform used under [`ScalePolicy::Matrix`]; `None`
    /// falls back to the identity.
    ///
    /// Caches are only invalidated when that policy is active.
    pub fn set_matrix(&mut self, matrix: Option<ImageTransform>) {
        if self.supplied == matrix {
            return;
        }
        self.supplied = matrix;
        if self.policy == ScalePolicy::Matrix {
            self.invalidate("matrix");
        }
    }

    /// Sets the layout direction; the current transform is re-clamped.
    pub fn set_layout_direction(&mut self, direction: LayoutDirection) {
        if self.direction == direction {
            return;
        }
        self.direction = direction;
        self.settle = self.settle.max_with(Settle::Reclamp);
    }

    /// Sets the display metrics used for the maximum scale.
    pub fn set_display_metrics(&mut self, display: DisplayMetrics) {
        if self.display == display {
            return;
        }
        self.display = display;
        self.invalidate_bounds("display metrics");
    }

    /// Replaces the configuration.
    pub fn set_config(&mut self, config: ZoomConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.config = config;
        self.invalidate_bounds("config");
        Ok(())
    }

    fn invalidate(&mut self, reason: &str) {
        debug!("invalidating zoom caches: {reason} changed");
        self.baseline = None;
        self.bounds = None;
        self.settle = Settle::Reset;
        self.stop_motion(AbortMode::Freeze);
        self.gesture.end();
    }

    fn invalidate_bounds(&mut self, reason: &str) {
        debug!("invalidating scale bounds: {reason} changed");
        self.bounds = None;
        self.settle = self.settle.max_with(Settle::Reclamp);
    }

    // --- Cache maintenance -----------------------------------------------

    /// Rebuilds whatever caches are dirty and settles the current transform.
    ///
    /// Each cache is rebuilt at most once per invalidation. A request that
    /// was deferred for lack of layout is replayed here, once.
    pub(crate) fn refresh(&mut self) {
        let laid_out = self.viewport.is_laid_out();
        let baseline = match self.baseline {
            Some(baseline) => baseline,
            None => {
                let baseline = if laid_out {
                    compute_baseline(
                        self.intrinsic,
                        self.viewport.available(),
                        self.policy,
                        self.supplied,
                    )
                } else {
                    ImageTransform::IDENTITY
                };
                self.baseline_rebuilds += 1;
                debug!("rebuilt baseline transform: {baseline:?}");
                self.baseline = Some(baseline);
                baseline
            }
        };
        if self.bounds.is_none() {
            let bounds = if laid_out {
                compute_scale_bounds(
                    baseline,
                    self.intrinsic,
                    self.viewport.available(),
                    self.display,
                    self.config.screen_caps(),
                )
            } else {
                ScaleBounds::FIXED
            };
            debug!("rebuilt scale bounds: {bounds:?}");
            self.bounds = Some(bounds);
        }

        match core::mem::replace(&mut self.settle, Settle::Keep) {
            Settle::Keep => {}
            Settle::Reset => self.current = self.baseline_outcome(baseline).transform,
            Settle::Reclamp => self.reclamp(),
        }

        if laid_out {
            if let Some(pending) = self.pending.take() {
                debug!("replaying deferred request {pending:?}");
                match pending {
                    Pending::Request(request) => {
                        self.apply_request(
                            TransformRequest {
                                animate: false,
                                ..request
                            },
                            0,
                        );
                    }
                    Pending::ZoomTo { scale, view_point } => {
                        self.zoom_to_laid_out(scale, view_point, false, 0);
                    }
                    Pending::Reset => {
                        self.reset_laid_out(false, 0);
                    }
                }
            }
        }
    }

    fn baseline_outcome(&self, baseline: ImageTransform) -> ClampOutcome {
        clamp(
            ClampRequest {
                scale: baseline.scale,
                pivot: Point::ORIGIN,
                target: baseline.map_point(Point::ORIGIN),
            },
            &self.clamp_context(),
            self.current,
        )
    }

    fn reclamp(&mut self) {
        let center = (self.viewport.available() / 2.0).to_vec2().to_point();
        let Some(pivot) = self.current.invert_point(center) else {
            let baseline = self.baseline.unwrap_or(ImageTransform::IDENTITY);
            self.current = self.baseline_outcome(baseline).transform;
            return;
        };
        let outcome = clamp(
            ClampRequest {
                scale: self.current.scale,
                pivot,
                target: center,
            },
            &self.clamp_context(),
            self.current,
        );
        self.current = outcome.transform;
    }

    pub(crate) fn clamp_context(&self) -> ClampContext {
        ClampContext {
            intrinsic: self.intrinsic,
            available: self.viewport.available(),
            bounds: self.bounds.unwrap_or(ScaleBounds::FIXED),
            policy: self.policy,
            direction: self.direction,
        }
    }

    // --- Requests ----------------------------------------------------------

    /// Requests a new transform.
    ///
    /// Before the viewport has a usable size the request is queued (replacing
    /// any earlier queued request) and replayed without animation after the
    /// first layout. Returns whether a visible change occurred or, for an
    /// animated request, whether an animation was started.
    pub fn set_transform(&mut self, request: TransformRequest, now_ms: u64) -> bool {
        if self.defer(Pending::Request(request)) {
            return false;
        }
        self.refresh();
        self.apply_request(request, now_ms)
    }

    /// Zooms to `scale` keeping the content under `view_point` in place.
    ///
    /// Before layout the pivot is resolved on replay, against the fitted
    /// transform.
    pub fn zoom_to(&mut self, scale: Vec2, view_point: Point, animate: bool, now_ms: u64) -> bool {
        if self.defer(Pending::ZoomTo { scale, view_point }) {
            return false;
        }
        self.refresh();
        self.zoom_to_laid_out(scale, view_point, animate, now_ms)
    }

    /// Returns to the baseline transform.
    pub fn reset(&mut self, animate: bool, now_ms: u64) -> bool {
        if self.defer(Pending::Reset) {
            return false;
        }
        self.refresh();
        self.reset_laid_out(animate, now_ms)
    }

    /// Queues `pending` if there is no usable viewport yet.
    fn defer(&mut self, pending: Pending) -> bool {
        if self.viewport.is_laid_out() {
            return false;
        }
        debug!("deferring request until layout: {pending:?}");
        self.pending = Some(pending);
        true
    }

    fn zoom_to_laid_out(
        &mut self,
        scale: Vec2,
        view_point: Point,
        animate: bool,
        now_ms: u64,
    ) -> bool {
        let Some(pivot) = self.content_point_at(view_point) else {
            return false;
        };
        self.apply_request(
            TransformRequest {
                scale,
                pivot,
                target: view_point,
                animate,
            },
            now_ms,
        )
    }

    fn reset_laid_out(&mut self, animate: bool, now_ms: u64) -> bool {
        let baseline = self.baseline();
        let target = self.viewport.from_content_area(baseline.map_point(Point::ORIGIN));
        self.apply_request(
            TransformRequest {
                scale: baseline.scale,
                pivot: Point::ORIGIN,
                target,
                animate,
            },
            now_ms,
        )
    }

    fn apply_request(&mut self, request: TransformRequest, now_ms: u64) -> bool {
        self.stop_motion(AbortMode::Freeze);
        let target = self.viewport.to_content_area(request.target);
        let clamp_request = ClampRequest {
            scale: request.scale,
            pivot: request.pivot,
            target,
        };
        self.apply_clamped(clamp_request, request.animate, now_ms)
    }

    /// Clamps `request` (target in content-area coordinates) and applies it,
    /// either immediately or through the transition driver.
    pub(crate) fn apply_clamped(
        &mut self,
        request: ClampRequest,
        animate: bool,
        now_ms: u64,
    ) -> bool {
        let outcome = clamp(request, &self.clamp_context(), self.current);
        if !outcome.changed {
            return false;
        }
        let duration = self.config.transition_duration_ms;
        if animate && duration > 0 {
            debug!(
                "starting transition to scale {:?} over {duration} ms",
                outcome.transform.scale
            );
            self.transition.start(
                request.pivot,
                self.current,
                outcome.transform,
                outcome.achieved,
                now_ms,
                duration,
            );
        } else {
            self.current = outcome.transform;
        }
        true
    }

    /// Force-finishes any transition or fling.
    pub(crate) fn stop_motion(&mut self, mode: AbortMode) {
        if let Some(frame) = self.transition.abort(mode) {
            debug!("transition aborted ({mode:?})");
            let outcome = clamp(
                ClampRequest {
                    scale: frame.scale,
                    pivot: frame.pivot,
                    target: frame.target,
                },
                &self.clamp_context(),
                self.current,
            );
            self.current = outcome.transform;
        }
        if let Some(mut fling) = self.fling.take() {
            debug!("fling aborted");
            fling.abort();
        }
    }

    pub(crate) fn set_current(&mut self, transform: ImageTransform) {
        self.current = transform;
    }

    /// Starts a fling from the current translation.
    pub(crate) fn start_fling(&mut self, velocity: Vec2, now_ms: u64) -> bool {
        let range = pan_range(&self.clamp_context(), self.current.scale);
        let fling = Fling::start(
            self.current.translation,
            velocity,
            range,
            self.config.fling_deceleration,
            self.config.min_fling_velocity,
            now_ms,
        );
        if fling.is_finished() {
            return false;
        }
        debug!(
            "starting fling at {velocity:?} px/s for {} ms",
            fling.duration_ms()
        );
        self.fling = Some(fling);
        true
    }

    // --- Animation ----------------------------------------------------------

    /// Advances any transition or fling to `now_ms`.
    ///
    /// Returns `true` while motion remains, i.e. while the caller should keep
    /// scheduling ticks and redrawing.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        self.refresh();
        if let Some(frame) = self.transition.tick(now_ms) {
            let outcome = clamp(
                ClampRequest {
                    scale: frame.scale,
                    pivot: frame.pivot,
                    target: frame.target,
                },
                &self.clamp_context(),
                self.current,
            );
            trace!("transition frame {:?}", outcome.transform);
            self.current = outcome.transform;
            if frame.finished {
                debug!("transition finished");
            }
        } else if self.fling.is_some() {
            let range = pan_range(&self.clamp_context(), self.current.scale);
            let (translation, finished) = match self.fling.as_mut() {
                Some(fling) => (fling.tick(now_ms), fling.is_finished()),
                None => (None, true),
            };
            if let Some(translation) = translation {
                self.current = self.current.with_translation(range.clamp(translation));
                trace!("fling frame {:?}", self.current);
            }
            if finished {
                debug!("fling finished");
                self.fling = None;
            }
        }
        self.is_animating()
    }

    /// Returns `true` while a transition or fling is in flight.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.transition.is_running() || self.fling.is_some()
    }

    // --- Outbound ------------------------------------------------------------

    /// The current transform, relative to the padded content area.
    pub fn transform(&mut self) -> ImageTransform {
        self.refresh();
        self.current
    }

    /// The current transform in view coordinates (padding included).
    pub fn affine(&mut self) -> Affine {
        let transform = self.transform();
        Affine::translate(self.viewport.origin().to_vec2()) * transform.to_affine()
    }

    /// The baseline ("fit") transform.
    pub fn baseline(&mut self) -> ImageTransform {
        self.refresh();
        self.baseline.unwrap_or(ImageTransform::IDENTITY)
    }

    /// The current scale limits.
    pub fn scale_bounds(&mut self) -> ScaleBounds {
        self.refresh();
        self.bounds.unwrap_or(ScaleBounds::FIXED)
    }

    /// Current scale as a fraction between min and max scale, per axis.
    pub fn relative_scale(&mut self) -> Vec2 {
        let scale = self.transform().scale;
        self.scale_bounds().relative(scale)
    }

    /// Content point currently displayed at `view_point`.
    pub fn content_point_at(&mut self, view_point: Point) -> Option<Point> {
        let area = self.viewport.to_content_area(view_point);
        self.transform().invert_point(area)
    }

    /// View point at which `content_point` is currently displayed.
    pub fn view_point_of(&mut self, content_point: Point) -> Point {
        let area = self.transform().map_point(content_point);
        self.viewport.from_content_area(area)
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &ZoomConfig {
        &self.config
    }

    /// The current viewport.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// The intrinsic content size, if any.
    #[must_use]
    pub fn content(&self) -> Option<Size> {
        self.intrinsic
    }

    /// The active fit policy.
    #[must_use]
    pub fn scale_policy(&self) -> ScalePolicy {
        self.policy
    }

    /// Snapshot of the state for debugging and inspection.
    pub fn debug_info(&mut self) -> ZoomDebugInfo {
        self.refresh();
        ZoomDebugInfo {
            viewport: self.viewport,
            content: self.intrinsic,
            policy: self.policy,
            direction: self.direction,
            baseline: self.baseline.unwrap_or(ImageTransform::IDENTITY),
            bounds: self.bounds.unwrap_or(ScaleBounds::FIXED),
            transform: self.current,
            transition_running: self.transition.is_running(),
            fling_running: self.fling.is_some(),
            request_pending: self.pending.is_some(),
            baseline_rebuilds: self.baseline_rebuilds,
        }
    }
}

impl Settle {
    fn max_with(self, other: Self) -> Self {
        match (self, other) {
            (Self::Reset, _) | (_, Self::Reset) => Self::Reset,
            (Self::Reclamp, _) | (_, Self::Reclamp) => Self::Reclamp,
            _ => Self::Keep,
        }
    }
}

/// Debug snapshot of a [`ZoomState`].
#[derive(Clone, Copy, Debug)]
pub struct ZoomDebugInfo {
    /// Current viewport.
    pub viewport: Viewport,
    /// Intrinsic content size, if any.
    pub content: Option<Size>,
    /// Fit policy.
    pub policy: ScalePolicy,
    /// Layout direction.
    pub direction: LayoutDirection,
    /// Cached baseline transform.
    pub baseline: ImageTransform,
    /// Cached scale limits.
    pub bounds: ScaleBounds,
    /// Current transform.
    pub transform: ImageTransform,
    /// Whether a transition is in flight.
    pub transition_running: bool,
    /// Whether a fling is in flight.
    pub fling_running: bool,
    /// Whether a request is waiting for layout.
    pub request_pending: bool,
    /// How many times the baseline has been computed.
    pub baseline_rebuilds: u64,
}
