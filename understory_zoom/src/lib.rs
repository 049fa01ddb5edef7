// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Zoom: a headless pinch / double-tap / drag / fling zoom engine.
//!
//! This crate turns a stream of pointer events into a pan/zoom transform for
//! a single rectangular content surface (typically an image) shown inside a
//! viewport. It covers:
//! - Baseline placement of the content via a [`FitPolicy`].
//! - Pinch zoom with an elastic over-zoom range and a [`ZoomHistory`] that
//!   lets a reverse pinch retrace nested zoom excursions about their original
//!   pivots.
//! - Double-tap zoom and programmatic zoom, animated by a time-based smooth
//!   zoom with an ease-in-ease-out curve.
//! - Dragging with an over-scroll allowance, release flings, and spring-back
//!   to the content bounds.
//!
//! It does **not** render, own a window, or read platform input. Callers are
//! expected to:
//! - Translate platform pointer events into [`PointerEvent`]s.
//! - Supply a [`FrameScheduler`] and call [`ZoomView::on_frame`] when a
//!   requested frame fires.
//! - Paint the content with [`ZoomView::view_transform`] and scroll bars from
//!   [`ZoomView::scroll_metrics`].
//!
//! Optional collaborators are an ancestor scroll container
//! ([`NestedScrollHost`]) and an event observer ([`ZoomObserver`]).
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Insets, Point, Size};
//! use understory_zoom::{FrameQueue, InteractionState, PointerEvent, PointerId, ZoomView};
//!
//! let mut view = ZoomView::new(FrameQueue::new());
//! view.layout(Size::new(400.0, 400.0), Insets::ZERO);
//! view.set_content_size(Some(Size::new(800.0, 600.0)));
//! assert_eq!(view.state(), InteractionState::Normal);
//!
//! // Double tap in the middle of the content.
//! let finger = PointerId(0);
//! let at = Point::new(200.0, 200.0);
//! for time in [0, 120] {
//!     view.handle_pointer(PointerEvent::down(finger, at, time));
//!     view.handle_pointer(PointerEvent::up(finger, at, time + 40));
//! }
//!
//! // Drive the animation to completion.
//! while let Some(ticket) = view.scheduler_mut().next_frame() {
//!     view.on_frame(ticket);
//! }
//! assert!((view.zoom() - 1.5).abs() < 1e-9);
//! ```
//!
//! ## Coordinates
//!
//! Pointer positions are in host-view coordinates, padding included. The
//! engine works in the content box (the viewport minus its padding) and keeps
//! a separate scroll offset; [`ZoomView::view_transform`] folds padding and
//! scroll back in so a renderer only needs one matrix.
//!
//! ## Logging
//!
//! State transitions, layout and animation starts are reported through the
//! [`log`] facade at `debug` level, individual frames at `trace` level.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod fit;
mod fling;
mod history;
mod host;
mod pinch;
mod pointer;
mod smooth;
mod state;
mod transform;
mod velocity;
mod view;

pub use config::{InvalidConfiguration, ZoomConfig};
pub use fit::{FitPolicy, NormalFit};
pub use fling::{AxisMotion, FLING_DECELERATION, FlingAxis, SPRING_BACK_DECELERATION, Scroller};
pub use history::{ZoomHistory, ZoomSegment};
pub use host::{FrameQueue, FrameScheduler, FrameTicket, NestedScrollHost, ZoomObserver};
pub use pinch::{MAX_FACTOR_STEP, MIN_FACTOR_STEP, PinchDetector, PinchStep};
pub use pointer::{PointerEvent, PointerEventKind, PointerId};
pub use smooth::{SmoothStep, SmoothZoom, accelerate_decelerate};
pub use state::InteractionState;
pub use transform::{Axis, ScrollMetrics, ZoomTransform, ZoomTransformDebugInfo};
pub use velocity::VelocityTracker;
pub use view::{FRAME_INTERVAL_MS, ZoomView, ZoomViewDebugInfo};
