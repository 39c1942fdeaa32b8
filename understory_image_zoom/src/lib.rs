// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_image_zoom --heading-base-level=0

//! Understory Image Zoom: a headless pan/zoom transform engine for image views.
//!
//! This crate computes the content-to-view transform of a zoomable image. It
//! focuses on:
//! - Baseline ("fit") transforms for the usual fit policies
//!   ([`ScalePolicy`]).
//! - Minimum and maximum zoom derived from the baseline and the display.
//! - Clamping of requested transforms so content stays inside the viewport,
//!   with undersized content anchored per policy and layout direction.
//! - Animated transitions, ballistic flings and gesture handling (drag,
//!   pinch, double tap).
//!
//! It does **not** draw anything or recognize gestures. Callers are
//! expected to:
//! - Report content size, view size and padding, and the fit policy.
//! - Feed resolved gesture events (down, scroll, fling, scale, double tap).
//! - Apply the resulting transform to their image view, and call `tick` on
//!   each frame while [`ZoomState::is_animating`] returns `true`.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size, Vec2};
//! use understory_image_zoom::{ImageTransform, ScalePolicy, ZoomState};
//!
//! let mut zoom = ZoomState::new();
//! zoom.set_scale_policy(ScalePolicy::FitCenter);
//! zoom.set_content_size(Size::new(1000.0, 500.0));
//! zoom.set_view_size(Size::new(500.0, 500.0));
//!
//! // Fitted: half size, centered vertically.
//! assert_eq!(zoom.transform(), ImageTransform::new(0.5, 0.5, 0.0, 125.0));
//!
//! // Zoom in around the view center without animating.
//! zoom.zoom_to(Vec2::new(1.0, 1.0), Point::new(250.0, 250.0), false, 0);
//! assert_eq!(zoom.transform().scale, Vec2::new(1.0, 1.0));
//! assert_eq!(
//!     zoom.content_point_at(Point::new(250.0, 250.0)),
//!     Some(Point::new(500.0, 250.0))
//! );
//! ```
//!
//! ## Gestures and animation
//!
//! ```rust
//! use kurbo::{Point, Size, Vec2};
//! use understory_image_zoom::ZoomEngine;
//!
//! let engine = ZoomEngine::new();
//! engine.set_content_size(Size::new(100.0, 100.0));
//! engine.set_view_size(Size::new(100.0, 100.0));
//!
//! // A double tap animates to the next zoom step.
//! assert!(engine.double_tap(Point::new(50.0, 50.0), 0));
//! let mut now = 0;
//! while engine.tick(now) {
//!     now += 16;
//! }
//! assert!(engine.relative_scale().x > 0.0);
//!
//! // Dragging pans, within bounds.
//! engine.down(Point::new(50.0, 50.0));
//! engine.scroll(Vec2::new(10.0, 0.0));
//! engine.up();
//! ```
//!
//! ## Design notes
//!
//! - Scale is per-axis, but every policy except [`ScalePolicy::FitXy`] and
//!   [`ScalePolicy::Matrix`] produces a uniform scale.
//! - Caches are rebuilt lazily, at most once per invalidation.
//! - [`ZoomState`] is a plain single-owner state machine; [`ZoomEngine`]
//!   puts it behind one lock, and [`ZoomImage`] composes the engine with an
//!   [`ImageHost`] implemented by the view.
//! - Geometry never fails: missing content or an unsized viewport yield the
//!   identity transform.

mod baseline;
mod bounds;
mod clamp;
mod config;
mod engine;
mod fling;
mod gesture;
mod host;
mod policy;
mod state;
mod transform;
mod transition;
mod viewport;

pub use baseline::compute_baseline;
pub use bounds::{ScaleBounds, ScreenCaps, compute_scale_bounds, relative_scale};
pub use clamp::{
    AxisRange, CHANGE_EPSILON, ClampContext, ClampOutcome, ClampRequest, PanRange, clamp,
    pan_range,
};
pub use config::{ConfigError, ZoomConfig};
pub use engine::ZoomEngine;
pub use fling::Fling;
pub use gesture::{PIVOT_EPSILON, next_zoom_pivot};
pub use host::{ImageHost, ZoomImage};
pub use policy::{Anchor, Axis, LayoutDirection, ScalePolicy};
pub use state::{TransformRequest, ZoomDebugInfo, ZoomState};
pub use transform::{ImageTransform, PivotBinding};
pub use transition::{AbortMode, TransitionDriver, TransitionFrame, decelerate};
pub use viewport::{DisplayMetrics, Viewport, content_size};
