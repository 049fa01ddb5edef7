// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::boxed::Box;
use core::fmt;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Affine, Insets, Point, Rect, Size, Vec2};
use log::{debug, trace};

use crate::config::ZoomConfig;
use crate::fit::FitPolicy;
use crate::fling::{FlingAxis, Scroller};
use crate::history::{ZoomHistory, ZoomSegment};
use crate::host::{FrameScheduler, FrameTicket, NestedScrollHost, ZoomObserver};
use crate::pinch::{PinchDetector, PinchStep};
use crate::pointer::{PointerEvent, PointerEventKind, PointerId};
use crate::smooth::{SmoothStep, SmoothZoom};
use crate::state::{Interaction, InteractionState};
use crate::transform::{Axis, ScrollBounds, ScrollMetrics, ZoomTransform, ZoomTransformDebugInfo};
use crate::velocity::VelocityTracker;

/// Delay requested between consecutive animation frames, in milliseconds.
pub const FRAME_INTERVAL_MS: u64 = 15;

/// Zooms this close to `1.0` (or to the maximum) count as being there.
const SNAP_TOLERANCE: f64 = 0.025;

/// Zoom changes smaller than this do not count as an excursion.
const ZOOM_EPSILON: f64 = 1e-9;

/// Scroll damping applied per pinch event while unwinding above the baseline.
const UNWIND_SCROLL_DAMPING: f64 = 0.8;

/// Pinch, double-tap, drag and fling engine for one content surface.
///
/// A `ZoomView` turns [`PointerEvent`]s into a pan/zoom transform for a
/// rectangular piece of content shown in a viewport. The host:
/// - reports the viewport with [`ZoomView::layout`] and the content size with
///   [`ZoomView::set_content_size`];
/// - forwards pointer input to [`ZoomView::handle_pointer`];
/// - calls [`ZoomView::on_frame`] whenever a frame requested through its
///   [`FrameScheduler`] fires;
/// - paints the content with [`ZoomView::view_transform`].
///
/// Until both a usable viewport and a content size are known the view is
/// [`InteractionState::Disabled`] and ignores input.
pub struct ZoomView<S> {
    config: ZoomConfig,
    fit_policy: FitPolicy,
    viewport: Size,
    padding: Insets,
    content: Option<Size>,
    model: ZoomTransform,
    history: ZoomHistory,
    state: Interaction,
    scheduler: S,
    next_ticket: u64,
    pending: Option<FrameTicket>,
    observer: Option<Box<dyn ZoomObserver>>,
    nested: Option<Box<dyn NestedScrollHost>>,
    pinch: PinchDetector,
    velocity: VelocityTracker,
    main_pointer: Option<PointerId>,
    last_position: Point,
    last_down: Option<(u64, Point)>,
}

impl<S: fmt::Debug> fmt::Debug for ZoomView<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZoomView")
            .field("config", &self.config)
            .field("fit_policy", &self.fit_policy)
            .field("viewport", &self.viewport)
            .field("padding", &self.padding)
            .field("content", &self.content)
            .field("model", &self.model)
            .field("history", &self.history)
            .field("state", &self.state)
            .field("scheduler", &self.scheduler)
            .field("pending", &self.pending)
            .field("has_observer", &self.observer.is_some())
            .field("has_nested_scroll_host", &self.nested.is_some())
            .finish_non_exhaustive()
    }
}

impl<S: FrameScheduler> ZoomView<S> {
    /// Creates a disabled view with the default configuration.
    pub fn new(scheduler: S) -> Self {
        Self::with_config(scheduler, ZoomConfig::default())
    }

    /// Creates a disabled view with `config`.
    pub fn with_config(scheduler: S, config: ZoomConfig) -> Self {
        Self {
            config,
            fit_policy: FitPolicy::default(),
            viewport: Size::ZERO,
            padding: Insets::ZERO,
            content: None,
            model: ZoomTransform::default(),
            history: ZoomHistory::new(),
            state: Interaction::Disabled,
            scheduler,
            next_ticket: 0,
            pending: None,
            observer: None,
            nested: None,
            pinch: PinchDetector::new(),
            velocity: VelocityTracker::new(),
            main_pointer: None,
            last_position: Point::ZERO,
            last_down: None,
        }
    }

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> &ZoomConfig {
        &self.config
    }

    /// Mutable access to the configuration; its setters validate each value.
    pub fn config_mut(&mut self) -> &mut ZoomConfig {
        &mut self.config
    }

    /// Replaces the whole configuration.
    pub fn set_config(&mut self, config: ZoomConfig) {
        debug!("zoom config replaced: {config:?}");
        self.config = config;
    }

    /// The frame scheduler.
    #[must_use]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Mutable access to the frame scheduler (for example to advance a [`crate::FrameQueue`]).
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Installs or removes the event observer.
    pub fn set_observer(&mut self, observer: Option<Box<dyn ZoomObserver>>) {
        self.observer = observer;
    }

    /// Installs or removes the ancestor scroll container.
    pub fn set_nested_scroll_host(&mut self, host: Option<Box<dyn NestedScrollHost>>) {
        self.nested = host;
    }

    /// Sets the outer viewport size and its padding, then refits the content.
    pub fn layout(&mut self, viewport: Size, padding: Insets) {
        self.viewport = viewport;
        self.padding = padding;
        self.relayout();
    }

    /// Sets (or clears) the content's intrinsic size, then refits.
    pub fn set_content_size(&mut self, content: Option<Size>) {
        self.content = content;
        self.relayout();
    }

    /// Current fit policy.
    #[must_use]
    pub fn fit_policy(&self) -> FitPolicy {
        self.fit_policy
    }

    /// Changes the fit policy, then refits.
    pub fn set_fit_policy(&mut self, policy: FitPolicy) {
        self.fit_policy = policy;
        self.relayout();
    }

    /// Viewport size inside the padding.
    #[must_use]
    pub fn inner_size(&self) -> Size {
        Size::new(
            (self.viewport.width - self.padding.x_value()).max(0.0),
            (self.viewport.height - self.padding.y_value()).max(0.0),
        )
    }

    fn relayout(&mut self) {
        self.cancel_frame();
        self.set_state(Interaction::Disabled);
        self.history.clear();
        self.pinch.clear();
        self.velocity.clear();
        self.main_pointer = None;
        self.last_down = None;

        let inner = self.inner_size();
        match self.content.and_then(|content| self.fit_policy.fit(content, inner)) {
            Some(fit) => {
                debug!(
                    "fit {:?} into {inner:?}: content rect {:?}",
                    self.fit_policy, fit.content_rect
                );
                self.model = ZoomTransform::new(fit, inner);
                self.set_state(Interaction::Normal);
            }
            None => {
                debug!("no usable layout (content {:?}, viewport {inner:?})", self.content);
                self.model = ZoomTransform::default();
            }
        }
        self.repaint();
    }

    /// Current interaction state.
    #[must_use]
    pub fn state(&self) -> InteractionState {
        self.state.state()
    }

    /// Current zoom; `1.0` while disabled.
    #[must_use]
    pub fn zoom(&self) -> f64 {
        match self.state {
            Interaction::Disabled => 1.0,
            _ => self.model.zoom(),
        }
    }

    /// Current scroll position.
    #[must_use]
    pub fn scroll(&self) -> Vec2 {
        self.model.scroll()
    }

    /// Recorded zoom excursions.
    #[must_use]
    pub fn history(&self) -> &ZoomHistory {
        &self.history
    }

    /// Content rect under the current transform, in content-box space.
    #[must_use]
    pub fn content_rect(&self) -> Rect {
        self.model.current_rect()
    }

    /// Content rect under the baseline fit, in content-box space.
    #[must_use]
    pub fn normal_content_rect(&self) -> Rect {
        self.model.normal_rect()
    }

    /// Scrollbar metrics along `axis`.
    #[must_use]
    pub fn scroll_metrics(&self, axis: Axis) -> ScrollMetrics {
        self.model.scroll_metrics(axis)
    }

    /// Returns `true` while a running fling or spring-back is past a bound.
    #[must_use]
    pub fn is_over_scrolled(&self) -> bool {
        match &self.state {
            Interaction::Fling(scroller) => scroller.is_over_scrolled(),
            _ => false,
        }
    }

    /// The underlying transform model.
    #[must_use]
    pub fn transform(&self) -> &ZoomTransform {
        &self.model
    }

    /// Maps content coordinates into content-box space (normal fit, then user zoom).
    #[must_use]
    pub fn draw_transform(&self) -> Affine {
        self.model.draw()
    }

    /// Maps content coordinates into host-view space, including padding and scroll.
    #[must_use]
    pub fn view_transform(&self) -> Affine {
        Affine::translate(self.padding_origin() - self.model.scroll()) * self.model.draw()
    }

    /// Snapshot of the engine for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> ZoomViewDebugInfo {
        ZoomViewDebugInfo {
            state: self.state(),
            fit_policy: self.fit_policy,
            history_len: self.history.len(),
            frame_pending: self.pending.is_some(),
            main_pointer: self.main_pointer,
            tracked_pointers: self.pinch.count(),
            transform: self.model.debug_info(),
        }
    }

    fn padding_origin(&self) -> Vec2 {
        Vec2::new(self.padding.x0, self.padding.y0)
    }

    /// Host-view point to transform space.
    fn to_local(&self, point: Point) -> Point {
        point - self.padding_origin() + self.model.scroll()
    }

    /// Zooms to `zoom` about the content centre without animating.
    ///
    /// See [`ZoomView::set_zoom_with`].
    pub fn set_zoom(&mut self, zoom: f64) -> bool {
        self.set_zoom_with(zoom, None, false)
    }

    /// Zooms to `zoom` about `pivot` (host-view coordinates, content centre
    /// when `None`), optionally animated.
    ///
    /// Does nothing and returns `false` unless the view is idle and `zoom` is
    /// positive and lies within the configured bounds.
    ///
    /// An immediate zoom that lands on the baseline snaps to it exactly, the
    /// same way a finished animation does; one below the baseline forgets the
    /// recorded zoom history.
    pub fn set_zoom_with(&mut self, zoom: f64, pivot: Option<Point>, animate: bool) -> bool {
        let in_bounds = (self.config.min_zoom()..=self.config.max_zoom()).contains(&zoom);
        if !matches!(self.state, Interaction::Normal) || !in_bounds || zoom <= 0.0 {
            return false;
        }
        let pivot = pivot.map_or(self.model.center(), |p| self.to_local(p));
        if animate {
            self.start_smooth(zoom, pivot, self.config.double_tap_animation_ms(), None);
            return true;
        }
        self.model.scale(zoom / self.model.zoom(), pivot);
        let zoom = self.model.zoom();
        if (1.0 - zoom).abs() <= SNAP_TOLERANCE {
            self.reset_now();
        } else {
            if zoom < 1.0 {
                self.history.clear();
            }
            self.repaint();
        }
        true
    }

    /// Returns to the baseline fit, optionally animated.
    ///
    /// Does nothing while disabled.
    pub fn reset(&mut self, animate: bool) {
        if matches!(self.state, Interaction::Disabled) {
            return;
        }
        self.cancel_frame();
        if animate {
            let center = self.model.center();
            let duration = self.config.double_tap_animation_ms();
            self.start_smooth(1.0, center, duration, Some(Vec2::ZERO));
        } else {
            self.reset_now();
        }
    }

    fn reset_now(&mut self) {
        self.set_state(Interaction::Normal);
        self.model.reset();
        self.history.clear();
        self.repaint();
    }

    /// Runs one animation frame. Call when a requested frame fires.
    ///
    /// Tickets other than the one the view is currently waiting for are ignored.
    pub fn on_frame(&mut self, ticket: FrameTicket) {
        if self.pending != Some(ticket) {
            trace!("ignoring stale frame {ticket:?}");
            return;
        }
        self.pending = None;
        let now = self.scheduler.now_ms();
        match &mut self.state {
            Interaction::SmoothScale(task) => {
                let task = *task;
                self.smooth_frame(task, now);
            }
            Interaction::Fling(scroller) => {
                let running = scroller.compute(now);
                let position = scroller.position();
                self.fling_frame(running, position);
            }
            _ => {}
        }
    }

    fn request_frame(&mut self, delay_ms: u64) {
        self.cancel_frame();
        self.next_ticket = self.next_ticket.wrapping_add(1);
        let ticket = FrameTicket(self.next_ticket);
        self.pending = Some(ticket);
        self.scheduler.request_frame(ticket, delay_ms);
    }

    fn cancel_frame(&mut self) {
        if let Some(ticket) = self.pending.take() {
            self.scheduler.cancel_frame(ticket);
        }
    }

    fn smooth_frame(&mut self, task: SmoothZoom, now: u64) {
        let step = task.step(now, &mut self.model, self.config.max_zoom());
        trace!("smooth zoom frame at {now}: zoom {}", self.model.zoom());
        self.repaint();
        match step {
            SmoothStep::Running => self.request_frame(FRAME_INTERVAL_MS),
            SmoothStep::Finished => {
                let zoom = self.model.zoom();
                debug!("smooth zoom finished at {zoom}");
                self.set_state(Interaction::Normal);
                if let Some(observer) = self.observer.as_mut() {
                    observer.smooth_zoom_ended(zoom);
                }
                if (1.0 - zoom).abs() <= SNAP_TOLERANCE {
                    self.reset_now();
                }
            }
        }
    }

    fn fling_frame(&mut self, running: bool, position: Vec2) {
        if !running {
            debug!("fling settled at {:?}", self.model.scroll());
            self.set_state(Interaction::Normal);
            return;
        }
        let old = self.model.scroll();
        self.model.set_scroll(position);
        trace!("fling frame: {old:?} -> {position:?}");
        if let Some(observer) = self.observer.as_mut() {
            observer.flung(old, position);
        }
        self.repaint();
        self.request_frame(FRAME_INTERVAL_MS);
    }

    fn start_smooth(&mut self, target: f64, pivot: Point, duration_ms: u64, translate_to: Option<Vec2>) {
        self.cancel_frame();
        let current = self.model.zoom();
        debug!("smooth zoom {current} -> {target} about {pivot:?} over {duration_ms} ms");
        let task = SmoothZoom {
            target,
            pivot,
            duration_ms,
            start_ms: self.scheduler.now_ms(),
            translate_to,
        };
        if let Some(observer) = self.observer.as_mut() {
            observer.smooth_zoom_started(current, target, pivot);
        }
        self.set_state(Interaction::SmoothScale(task));
        self.request_frame(FRAME_INTERVAL_MS);
    }

    fn run_scroller(&mut self, scroller: Scroller) {
        self.cancel_frame();
        self.set_state(Interaction::Fling(scroller));
        self.request_frame(0);
    }

    fn start_fling(&mut self, velocity: Vec2, bounds: ScrollBounds) {
        let axis = fling_axis(self.model.over_scroll());
        debug!("fling {velocity:?} on {axis:?}");
        let mut scroller = Scroller::new();
        scroller.fling(
            self.scheduler.now_ms(),
            axis,
            self.model.scroll().to_point(),
            velocity,
            bounds.min,
            bounds.max,
            self.config.over_scroll_distance(),
        );
        self.run_scroller(scroller);
    }

    /// Starts a spring-back if a drag left an over-scroll bias; returns whether one started.
    fn spring_back(&mut self) -> bool {
        let bias = self.model.over_scroll();
        if bias == Vec2::ZERO {
            return false;
        }
        let b = self.model.scroll_bounds();
        let (min, max) = if self.model.covers_viewport() {
            (b.min, b.max)
        } else {
            let pick = |biased: f64, v: f64| if biased != 0.0 { v } else { 0.0 };
            (
                Point::new(pick(bias.x, b.min.x), pick(bias.y, b.min.y)),
                Point::new(pick(bias.x, b.max.x), pick(bias.y, b.max.y)),
            )
        };
        let mut scroller = Scroller::new();
        let now = self.scheduler.now_ms();
        if !scroller.spring_back(now, fling_axis(bias), self.model.scroll().to_point(), min, max) {
            return false;
        }
        debug!("spring back from {:?} into {min:?}..{max:?}", self.model.scroll());
        self.run_scroller(scroller);
        true
    }

    /// Feeds one pointer event to the engine; returns `true` if it was used.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> bool {
        if matches!(self.state, Interaction::Disabled) {
            return false;
        }
        match event.kind {
            PointerEventKind::Down => self.pointer_down(&event),
            PointerEventKind::Move => self.pointer_move(&event),
            PointerEventKind::Up | PointerEventKind::Cancel => self.pointer_up(&event),
            PointerEventKind::PointerAdded => self.pointer_added(&event),
            PointerEventKind::PointerRemoved => self.pointer_removed(&event),
        }
    }

    fn is_double_tap(&self, event: &PointerEvent) -> bool {
        self.last_down.is_some_and(|(time, position)| {
            event.time_ms.saturating_sub(time) <= self.config.double_tap_timeout_ms()
                && event.position.distance(position) <= self.config.double_tap_slop()
        })
    }

    fn pointer_down(&mut self, event: &PointerEvent) -> bool {
        if matches!(self.state, Interaction::PinchScale(_)) {
            // The previous gesture never ended.
            self.set_state(Interaction::Normal);
        }
        self.pinch.clear();
        self.pinch.add(event.pointer, event.position);

        let local = self.to_local(event.position);
        if !self.model.current_rect().contains(local) {
            if matches!(self.state, Interaction::Normal) {
                self.main_pointer = None;
                return true;
            }
            return false;
        }

        self.velocity.clear();
        self.velocity.add(event.time_ms, event.position);
        self.main_pointer = Some(event.pointer);
        self.last_position = event.position.round();

        let mut handled = false;
        if self.is_double_tap(event) {
            self.last_down = None;
            if matches!(self.state, Interaction::Normal) {
                self.double_tap(local);
                handled = true;
            }
        } else {
            self.last_down = Some((event.time_ms, event.position));
            let interrupt = matches!(&self.state, Interaction::Fling(s) if !s.is_over_scrolled());
            if interrupt {
                debug!("fling interrupted by pointer down");
                self.cancel_frame();
                self.set_state(Interaction::Normal);
            }
            handled = true;
        }

        if let Some(nested) = self.nested.as_mut() {
            nested.start_nested_scroll();
        }
        handled
    }

    fn double_tap(&mut self, tap: Point) {
        let current = self.model.zoom();
        let max = self.config.max_zoom();
        let center = self.model.center();
        let (target, pivot, translate_to) = if (1.0 - current).abs() <= SNAP_TOLERANCE {
            let target = max / 2.0;
            self.history.push(ZoomSegment {
                scale_from: current,
                scale_to: target,
                pivot: tap,
            });
            (target, tap, None)
        } else if current > 1.0 && (current - max).abs() <= SNAP_TOLERANCE {
            (1.0, center, Some(Vec2::ZERO))
        } else if current > 1.0 {
            self.history.push(ZoomSegment {
                scale_from: current,
                scale_to: max,
                pivot: tap,
            });
            (max, tap, None)
        } else {
            (1.0, center, Some(Vec2::ZERO))
        };
        debug!("double tap at {tap:?}: zoom {current} -> {target}");
        self.start_smooth(target, pivot, self.config.double_tap_animation_ms(), translate_to);
    }

    fn pointer_move(&mut self, event: &PointerEvent) -> bool {
        if !self.pinch.update(event.pointer, event.position) {
            return false;
        }
        if self.pinch.count() >= 2 {
            if self.main_pointer == Some(event.pointer) {
                self.last_position = event.position.round();
            }
            if self.pinch.is_pinching() {
                if let PinchStep::Scale(factor) = self.pinch.step() {
                    self.apply_pinch(factor);
                }
            } else {
                self.try_begin_pinch();
            }
            return true;
        }
        if self.main_pointer != Some(event.pointer) {
            return false;
        }

        self.velocity.add(event.time_ms, event.position);
        let position = event.position.round();
        let mut delta = self.last_position - position;
        self.last_position = position;
        if let Some(nested) = self.nested.as_mut() {
            delta -= nested.pre_scroll(delta);
        }
        if delta != Vec2::ZERO && self.state.accepts_gesture() {
            self.drag(delta);
        }
        true
    }

    fn drag(&mut self, delta: Vec2) {
        self.set_state(Interaction::Scroll);

        let allowance = self.config.over_scroll_distance();
        let bias = Vec2::new(
            edge_bias(self.model.exceeds_viewport(Axis::Horizontal), delta.x, allowance),
            edge_bias(self.model.exceeds_viewport(Axis::Vertical), delta.y, allowance),
        );
        self.model.set_over_scroll(bias);

        let consumed = self.model.clamp_scroll_delta(delta);
        let old = self.model.scroll();
        let new = old + consumed;
        self.model.set_scroll(new);
        trace!("drag {delta:?}: consumed {consumed:?}");
        if let Some(observer) = self.observer.as_mut() {
            observer.scrolled(old, new);
        }
        self.repaint();
        if let Some(nested) = self.nested.as_mut() {
            nested.post_scroll(consumed, delta - consumed);
        }
    }

    fn pointer_added(&mut self, event: &PointerEvent) -> bool {
        if matches!(self.state, Interaction::Scroll) {
            self.set_state(Interaction::Normal);
        }
        if !self.pinch.add(event.pointer, event.position) {
            return false;
        }
        self.try_begin_pinch();
        true
    }

    fn try_begin_pinch(&mut self) {
        if !self.state.accepts_gesture() || self.pinch.is_pinching() {
            return;
        }
        let Some(focus) = self.pinch.begin() else {
            return;
        };
        let live = ZoomSegment::begin(self.model.zoom().max(1.0), self.to_local(focus));
        debug!("pinch began at zoom {} about {:?}", live.scale_from, live.pivot);
        self.set_state(Interaction::PinchScale(live));
        if let Some(observer) = self.observer.as_mut() {
            observer.pinch_zoom_started(live.scale_from, live.pivot);
        }
    }

    fn apply_pinch(&mut self, factor: f64) {
        let Interaction::PinchScale(mut live) = self.state else {
            return;
        };
        let current = self.model.zoom();
        let future = current * factor;
        if !(future > self.config.pinch_floor() && future < self.config.pinch_ceiling()) {
            return;
        }
        if let Some(observer) = self.observer.as_mut() {
            observer.pinch_zoom(current, factor);
        }

        let model = &mut self.model;
        if factor > 1.0 {
            if future <= 1.0 {
                model.scale_about_center(factor);
            } else {
                model.scale(factor, live.pivot);
            }
        } else if future <= 1.0 {
            if !self.history.is_empty() {
                self.history.unwind(&mut live, future, model);
                model.scale_about_center(future / model.zoom());
                model.set_scroll(Vec2::ZERO);
            } else if current > 1.0 {
                model.scale(1.0 / current, live.pivot);
                model.scale_about_center(future / model.zoom());
            } else {
                model.scale_about_center(factor);
            }
        } else if let Some(top) = self.history.top().copied() {
            if future > top.scale_to {
                model.scale(factor, live.pivot);
            } else {
                self.history.unwind(&mut live, future, model);
            }
            model.set_scroll((model.scroll() * UNWIND_SCROLL_DAMPING).round());
        } else {
            model.scale(factor, live.pivot);
        }

        trace!("pinch {factor}: zoom {current} -> {}", self.model.zoom());
        self.state = Interaction::PinchScale(live);
        self.repaint();
    }

    fn end_pinch(&mut self) {
        self.pinch.end();
        let Interaction::PinchScale(mut live) = self.state else {
            return;
        };
        let current = self.model.zoom();
        debug!("pinch ended at zoom {current}");
        if let Some(observer) = self.observer.as_mut() {
            observer.pinch_zoom_ended(current);
        }

        let (min, max) = (self.config.min_zoom(), self.config.max_zoom());
        let duration = self.config.over_zoom_animation_ms();
        if current < min {
            let center = self.model.center();
            self.start_smooth(min, center, duration, None);
        } else if current > max {
            if max > live.scale_from {
                live.scale_to = max;
                self.history.push(live);
            }
            self.start_smooth(max, live.pivot, duration, None);
        } else {
            if current - live.scale_from > ZOOM_EPSILON {
                live.scale_to = current;
                self.history.push(live);
            }
            let mut bias = self.model.over_scroll();
            if !self.model.exceeds_viewport(Axis::Horizontal) {
                bias.x = 0.0;
            }
            if !self.model.exceeds_viewport(Axis::Vertical) {
                bias.y = 0.0;
            }
            self.model.set_over_scroll(bias);
            if !self.spring_back() {
                self.set_state(Interaction::Normal);
            }
        }
    }

    fn pointer_removed(&mut self, event: &PointerEvent) -> bool {
        let was_pinching = self.pinch.is_pinching();
        if !self.pinch.remove(event.pointer) {
            return false;
        }
        if was_pinching {
            self.end_pinch();
        }
        self.velocity.clear();
        if self.main_pointer == Some(event.pointer) {
            self.main_pointer = self.pinch.other(event.pointer).map(|(id, position)| {
                self.last_position = position.round();
                id
            });
        }
        true
    }

    fn pointer_up(&mut self, event: &PointerEvent) -> bool {
        if self.pinch.position(event.pointer).is_none() {
            trace!("ignoring release of untracked {:?}", event.pointer);
            return false;
        }
        let was_pinching = self.pinch.is_pinching();
        if self.main_pointer == Some(event.pointer) {
            self.velocity.add(event.time_ms, event.position);
        }
        self.pinch.clear();

        let mut handled = false;
        if was_pinching {
            self.end_pinch();
            handled = true;
        } else if matches!(self.state, Interaction::Scroll) {
            self.release(event);
            handled = true;
        }

        self.velocity.clear();
        self.main_pointer = None;
        if let Some(nested) = self.nested.as_mut() {
            nested.stop_nested_scroll();
        }
        handled
    }

    /// Ends a drag: fling, spring back, or settle.
    fn release(&mut self, event: &PointerEvent) {
        let max = self.config.max_fling_velocity();
        let measured = event.velocity.unwrap_or_else(|| self.velocity.velocity(max));
        let v = Vec2::new(measured.x.clamp(-max, max), measured.y.clamp(-max, max));
        let min = self.config.min_fling_velocity();

        if v.x.abs() >= min || v.y.abs() >= min {
            let bounds = self.model.scroll_bounds();
            let scroll = self.model.scroll();
            let fling_x = self.model.exceeds_viewport(Axis::Horizontal);
            let fling_y = self.model.exceeds_viewport(Axis::Vertical);
            let legal = (fling_x || fling_y)
                && (!fling_x || (scroll.x > bounds.min.x && scroll.x < bounds.max.x))
                && (!fling_y || (scroll.y > bounds.min.y && scroll.y < bounds.max.y));
            if legal {
                // Finger velocity runs opposite to scroll velocity.
                let velocity = -v;
                let taken = self.nested.as_mut().is_some_and(|n| n.pre_fling(velocity));
                if taken {
                    debug!("fling {velocity:?} taken by nested scroll host");
                    self.set_state(Interaction::Normal);
                } else {
                    if let Some(nested) = self.nested.as_mut() {
                        nested.post_fling(velocity, true);
                    }
                    self.start_fling(velocity, bounds);
                }
                return;
            }
        }

        if !self.spring_back() {
            self.set_state(Interaction::Normal);
        }
    }

    fn set_state(&mut self, next: Interaction) {
        let (from, to) = (self.state.state(), next.state());
        if from != to {
            debug!("interaction {from:?} -> {to:?}");
        }
        self.state = next;
    }

    fn repaint(&mut self) {
        if let Some(observer) = self.observer.as_mut() {
            observer.repaint();
        }
    }
}

/// Over-scroll allowance for one axis of a drag.
///
/// Only axes where the content overflows the viewport get an allowance, on
/// the side the drag is heading toward.
fn edge_bias(overflows: bool, delta: f64, allowance: f64) -> f64 {
    if !overflows {
        0.0
    } else if delta < 0.0 {
        allowance
    } else {
        -allowance
    }
}

/// Axis selection for flings and spring-backs, from the over-scroll bias alone.
fn fling_axis(bias: Vec2) -> FlingAxis {
    if bias.x == 0.0 {
        FlingAxis::OnlyY
    } else if bias.y == 0.0 {
        FlingAxis::OnlyX
    } else {
        FlingAxis::Both
    }
}

/// Debug snapshot of a [`ZoomView`].
#[derive(Clone, Copy, Debug)]
pub struct ZoomViewDebugInfo {
    /// Interaction state.
    pub state: InteractionState,
    /// Active fit policy.
    pub fit_policy: FitPolicy,
    /// Number of recorded zoom excursions.
    pub history_len: usize,
    /// Whether a frame request is outstanding.
    pub frame_pending: bool,
    /// Pointer driving drags, if any.
    pub main_pointer: Option<PointerId>,
    /// Number of pointers being tracked.
    pub tracked_pointers: usize,
    /// Transform model snapshot.
    pub transform: ZoomTransformDebugInfo,
}
