// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Affine, Point, Rect, Size, Vec2};

use crate::fit::{NormalFit, contains_rect};

/// One of the two scroll axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// The X axis.
    Horizontal,
    /// The Y axis.
    Vertical,
}

/// Scrollbar-style metrics along one axis.
///
/// These follow the usual `range / offset / extent` convention: a scrollbar
/// thumb spans `extent / range` of its track, starting at `offset / range`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollMetrics {
    /// Size of the current content rect along the axis, in whole pixels.
    pub range: f64,
    /// Scroll position relative to the content's leading edge, including any
    /// active over-scroll bias.
    pub offset: f64,
    /// Size of the viewport along the axis.
    pub extent: f64,
}

impl ScrollMetrics {
    /// How much of the range can be scrolled through (never negative).
    #[must_use]
    pub fn scrollable(&self) -> f64 {
        (self.range - self.extent).max(0.0)
    }

    /// Portion of a scroll `delta` that can be applied without leaving the
    /// scrollable range.
    ///
    /// Returns zero when nothing is scrollable along this axis.
    #[must_use]
    pub fn clamp_delta(&self, delta: f64) -> f64 {
        let range = self.range - self.extent;
        if range <= 0.0 {
            return 0.0;
        }
        if delta < 0.0 {
            let room = self.offset + delta;
            if room >= 0.0 { delta } else { delta - room }
        } else {
            delta.min(range - self.offset)
        }
    }
}

/// Lower and upper scroll positions along both axes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct ScrollBounds {
    pub(crate) min: Point,
    pub(crate) max: Point,
}

/// Pan/zoom state of the content surface.
///
/// `ZoomTransform` owns three transforms:
/// - the *normal* transform, the baseline placement computed from the fit
///   policy;
/// - the *current* transform, the user's cumulative zoom and pan composed on
///   top of the baseline;
/// - the *draw* transform, `current * normal`, which is what gets painted.
///
/// It also tracks the scroll position the host applies when painting and the
/// over-scroll bias used while dragging past an edge.
#[derive(Clone, Debug)]
pub struct ZoomTransform {
    viewport: Size,
    normal: Affine,
    normal_rect: Rect,
    current: Affine,
    current_rect: Rect,
    draw: Affine,
    scroll: Vec2,
    over_scroll: Vec2,
    center: Point,
}

impl Default for ZoomTransform {
    fn default() -> Self {
        Self {
            viewport: Size::ZERO,
            normal: Affine::IDENTITY,
            normal_rect: Rect::ZERO,
            current: Affine::IDENTITY,
            current_rect: Rect::ZERO,
            draw: Affine::IDENTITY,
            scroll: Vec2::ZERO,
            over_scroll: Vec2::ZERO,
            center: Point::ZERO,
        }
    }
}

impl ZoomTransform {
    /// Creates a transform model at its baseline for the given fit.
    #[must_use]
    pub fn new(fit: NormalFit, viewport: Size) -> Self {
        let mut model = Self {
            viewport,
            normal: fit.transform,
            normal_rect: fit.content_rect,
            center: fit.content_rect.center().round(),
            ..Self::default()
        };
        model.reset();
        model
    }

    /// Size of the viewport (inside padding).
    #[must_use]
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Baseline transform from the fit policy.
    #[must_use]
    pub fn normal(&self) -> Affine {
        self.normal
    }

    /// Content rect under the baseline transform.
    #[must_use]
    pub fn normal_rect(&self) -> Rect {
        self.normal_rect
    }

    /// The user's zoom and pan relative to the baseline.
    #[must_use]
    pub fn current(&self) -> Affine {
        self.current
    }

    /// Content rect under the current transform.
    #[must_use]
    pub fn current_rect(&self) -> Rect {
        self.current_rect
    }

    /// `current * normal`: maps content coordinates to transform space.
    #[must_use]
    pub fn draw(&self) -> Affine {
        self.draw
    }

    /// Center of the baseline content rect, rounded to whole pixels.
    #[must_use]
    pub fn center(&self) -> Point {
        self.center
    }

    /// Uniform scale of the current transform.
    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.current.as_coeffs()[0]
    }

    /// Translation component of the current transform.
    #[must_use]
    pub fn translation(&self) -> Vec2 {
        self.current.translation()
    }

    /// Scales the current transform by `factor` about `pivot`.
    ///
    /// Factors that are not finite and positive are ignored, so the transform
    /// never becomes singular.
    pub fn scale(&mut self, factor: f64, pivot: Point) {
        if !(factor.is_finite() && factor > 0.0) {
            return;
        }
        let pivot = pivot.to_vec2();
        let about = Affine::translate(pivot) * Affine::scale(factor) * Affine::translate(-pivot);
        self.current = about * self.current;
        self.rebuild();
    }

    /// Scales the current transform by `factor` about the content center.
    pub fn scale_about_center(&mut self, factor: f64) {
        self.scale(factor, self.center);
    }

    /// Translates the current transform by `delta`.
    pub fn translate(&mut self, delta: Vec2) {
        if delta == Vec2::ZERO {
            return;
        }
        self.current = Affine::translate(delta) * self.current;
        self.rebuild();
    }

    /// Returns to the baseline: identity current transform, no scroll, no bias.
    pub fn reset(&mut self) {
        self.current = Affine::IDENTITY;
        self.scroll = Vec2::ZERO;
        self.over_scroll = Vec2::ZERO;
        self.rebuild();
    }

    /// Scroll position applied by the host when painting.
    #[must_use]
    pub fn scroll(&self) -> Vec2 {
        self.scroll
    }

    /// Moves the scroll position to `scroll`.
    pub fn set_scroll(&mut self, scroll: Vec2) {
        self.scroll = scroll;
    }

    /// Over-scroll bias currently applied while dragging.
    #[must_use]
    pub fn over_scroll(&self) -> Vec2 {
        self.over_scroll
    }

    pub(crate) fn set_over_scroll(&mut self, bias: Vec2) {
        self.over_scroll = bias;
    }

    /// Whether the content is wider (`Horizontal`) or taller (`Vertical`) than the viewport.
    #[must_use]
    pub fn exceeds_viewport(&self, axis: Axis) -> bool {
        match axis {
            Axis::Horizontal => self.current_rect.width() > self.viewport.width,
            Axis::Vertical => self.current_rect.height() > self.viewport.height,
        }
    }

    /// Scrollbar metrics along `axis`.
    ///
    /// Measured against the content rect snapped to whole pixels, the same
    /// edges the scroll bounds use.
    #[must_use]
    pub fn scroll_metrics(&self, axis: Axis) -> ScrollMetrics {
        let r = self.current_rect.round();
        match axis {
            Axis::Horizontal => ScrollMetrics {
                range: r.width(),
                offset: self.scroll.x - r.x0 + self.over_scroll.x,
                extent: self.viewport.width,
            },
            Axis::Vertical => ScrollMetrics {
                range: r.height(),
                offset: self.scroll.y - r.y0 + self.over_scroll.y,
                extent: self.viewport.height,
            },
        }
    }

    /// Portion of a scroll `delta` that fits within the scroll range, per axis.
    #[must_use]
    pub fn clamp_scroll_delta(&self, delta: Vec2) -> Vec2 {
        Vec2::new(
            self.scroll_metrics(Axis::Horizontal).clamp_delta(delta.x),
            self.scroll_metrics(Axis::Vertical).clamp_delta(delta.y),
        )
    }

    /// Scroll positions that keep the viewport inside the content rect.
    pub(crate) fn scroll_bounds(&self) -> ScrollBounds {
        let r = self.current_rect.round();
        ScrollBounds {
            min: Point::new(r.x0, r.y0),
            max: Point::new(r.x1 - self.viewport.width, r.y1 - self.viewport.height),
        }
    }

    /// Whether the content rect covers the whole viewport.
    pub(crate) fn covers_viewport(&self) -> bool {
        contains_rect(self.current_rect, self.viewport.to_rect())
    }

    /// Snapshot of the current state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> ZoomTransformDebugInfo {
        ZoomTransformDebugInfo {
            viewport: self.viewport,
            normal_rect: self.normal_rect,
            current_rect: self.current_rect,
            zoom: self.zoom(),
            translation: self.translation(),
            scroll: self.scroll,
            over_scroll: self.over_scroll,
        }
    }

    fn rebuild(&mut self) {
        self.current_rect = self.current.transform_rect_bbox(self.normal_rect);
        self.draw = self.current * self.normal;
    }
}

/// Debug snapshot of a [`ZoomTransform`].
#[derive(Clone, Copy, Debug)]
pub struct ZoomTransformDebugInfo {
    /// Viewport size inside padding.
    pub viewport: Size,
    /// Content rect under the baseline transform.
    pub normal_rect: Rect,
    /// Content rect under the current transform.
    pub current_rect: Rect,
    /// Current uniform zoom.
    pub zoom: f64,
    /// Translation of the current transform.
    pub translation: Vec2,
    /// Scroll position.
    pub scroll: Vec2,
    /// Over-scroll bias.
    pub over_scroll: Vec2,
}
