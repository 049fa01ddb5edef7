// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for layout, programmatic zoom, double tap and frame handling in `understory_zoom`.

mod common;

use common::{A, Event, Harness, Recorder, assert_affine_close, assert_close};
use kurbo::{Affine, Insets, Point, Rect, Size};
use understory_zoom::{
    FitPolicy, FrameQueue, FrameScheduler, FrameTicket, InteractionState, InvalidConfiguration,
    PointerEvent, ZoomConfig, ZoomView,
};

#[test]
fn disabled_until_content_and_viewport_are_known() {
    let mut view = ZoomView::new(FrameQueue::new());
    assert_eq!(view.state(), InteractionState::Disabled);
    assert!(!view.handle_pointer(PointerEvent::down(A, Point::new(10.0, 10.0), 0)));
    assert!(!view.set_zoom(2.0));
    assert_eq!(view.zoom(), 1.0);

    // Content without a viewport is still unusable.
    view.set_content_size(Some(Size::new(100.0, 100.0)));
    assert_eq!(view.state(), InteractionState::Disabled);

    view.layout(Size::new(200.0, 200.0), Insets::ZERO);
    assert_eq!(view.state(), InteractionState::Normal);

    view.set_content_size(None);
    assert_eq!(view.state(), InteractionState::Disabled);
    view.reset(true);
    assert!(view.scheduler().is_idle());
}

#[test]
fn padding_eating_the_whole_viewport_disables() {
    let mut view = ZoomView::new(FrameQueue::new());
    view.set_content_size(Some(Size::new(100.0, 100.0)));
    view.layout(Size::new(40.0, 40.0), Insets::uniform(20.0));
    assert_eq!(view.inner_size(), Size::ZERO);
    assert_eq!(view.state(), InteractionState::Disabled);
}

#[test]
fn fit_policy_sets_the_baseline() {
    let mut h = Harness::new(
        Size::new(400.0, 400.0),
        Size::new(800.0, 400.0),
        ZoomConfig::default(),
    );
    // Fit center halves the content and centers it vertically.
    assert_eq!(h.view.normal_content_rect(), Rect::new(0.0, 100.0, 400.0, 300.0));

    h.view.set_fit_policy(FitPolicy::CenterCrop);
    assert_eq!(h.view.normal_content_rect(), Rect::new(0.0, 0.0, 400.0, 400.0));

    h.view.set_fit_policy(FitPolicy::FitXY);
    assert_affine_close(h.view.draw_transform(), Affine::scale_non_uniform(0.5, 1.0));

    h.view.set_content_size(Some(Size::new(100.0, 50.0)));
    h.view.set_fit_policy(FitPolicy::CenterInside);
    // Small content is never scaled up.
    assert_eq!(h.view.normal_content_rect(), Rect::new(150.0, 175.0, 250.0, 225.0));
    assert_eq!(h.view.zoom(), 1.0);
}

#[test]
fn set_zoom_only_applies_in_bounds_while_idle() {
    let mut h = Harness::square();
    assert!(!h.view.set_zoom(3.5));
    assert!(!h.view.set_zoom(0.5));
    assert_eq!(h.view.zoom(), 1.0);

    assert!(h.view.set_zoom(2.0));
    assert_eq!(h.view.zoom(), 2.0);
    // About the content centre.
    assert_eq!(h.view.content_rect(), Rect::new(-200.0, -200.0, 600.0, 600.0));

    // Busy animating: rejected and the transform is left alone.
    assert!(h.view.set_zoom_with(3.0, None, true));
    assert_eq!(h.view.state(), InteractionState::SmoothScale);
    let during = h.view.draw_transform();
    assert!(!h.view.set_zoom(2.5));
    assert_eq!(h.view.draw_transform(), during);

    h.settle();
    assert_close(h.view.zoom(), 3.0, "animated set_zoom");
    assert_eq!(h.view.state(), InteractionState::Normal);
}

#[test]
fn set_zoom_pivot_is_in_host_coordinates() {
    let mut view = ZoomView::new(FrameQueue::new());
    view.layout(Size::new(420.0, 420.0), Insets::uniform(10.0));
    view.set_content_size(Some(Size::new(400.0, 400.0)));
    assert_eq!(view.view_transform() * Point::ZERO, Point::new(10.0, 10.0));

    // The content's top-left corner sits under the pivot and stays there.
    assert!(view.set_zoom_with(2.0, Some(Point::new(10.0, 10.0)), false));
    assert_eq!(view.content_rect(), Rect::new(0.0, 0.0, 800.0, 800.0));
    assert_eq!(view.view_transform() * Point::ZERO, Point::new(10.0, 10.0));
    assert_eq!(
        view.view_transform() * Point::new(400.0, 400.0),
        Point::new(810.0, 810.0)
    );
}

#[test]
fn zero_min_zoom_never_collapses_the_transform() {
    let mut config = ZoomConfig::default();
    config.set_min_zoom(0.0).unwrap();
    let mut h = Harness::new(Size::new(400.0, 400.0), Size::new(400.0, 400.0), config);

    assert!(!h.view.set_zoom(0.0));
    assert!(!h.view.set_zoom_with(0.0, None, true));
    assert_eq!(h.view.zoom(), 1.0);
    assert_eq!(h.view.state(), InteractionState::Normal);

    assert!(h.view.set_zoom(0.5));
    assert_close(h.view.zoom(), 0.5, "half size");
    assert!(h.view.set_zoom(1.0));
    assert_eq!(h.view.zoom(), 1.0);
    assert_eq!(h.view.content_rect(), h.view.normal_content_rect());
}

#[test]
fn immediate_zoom_to_baseline_forgets_history() {
    let mut h = Harness::square();
    h.double_tap(Point::new(100.0, 100.0));
    h.settle();
    assert_eq!(h.view.history().len(), 1);

    assert!(h.view.set_zoom(1.0));
    assert_eq!(h.view.zoom(), 1.0);
    assert!(h.view.history().is_empty());
    assert_eq!(h.view.draw_transform(), Affine::IDENTITY);
}

#[test]
fn immediate_zoom_below_baseline_forgets_history() {
    let mut config = ZoomConfig::default();
    config.set_min_zoom(0.5).unwrap();
    let mut h = Harness::new(Size::new(400.0, 400.0), Size::new(400.0, 400.0), config);
    h.double_tap(Point::new(100.0, 100.0));
    h.settle();
    assert_eq!(h.view.history().len(), 1);

    assert!(h.view.set_zoom(0.6));
    assert_close(h.view.zoom(), 0.6, "below baseline");
    assert!(h.view.history().is_empty());
}

#[test]
fn reset_returns_to_the_baseline() {
    let mut h = Harness::square();
    h.double_tap(Point::new(100.0, 100.0));
    h.settle();
    assert_eq!(h.view.history().len(), 1);

    h.view.reset(false);
    assert_eq!(h.view.zoom(), 1.0);
    assert!(h.view.history().is_empty());
    assert_eq!(h.view.content_rect(), h.view.normal_content_rect());
    assert_eq!(h.view.state(), InteractionState::Normal);

    assert!(h.view.set_zoom(2.0));
    h.view.reset(true);
    assert_eq!(h.view.state(), InteractionState::SmoothScale);
    h.settle();
    // Landing close to 1 snaps exactly onto the baseline.
    assert_eq!(h.view.zoom(), 1.0);
    assert_eq!(h.view.draw_transform(), Affine::IDENTITY);
    assert_eq!(h.view.state(), InteractionState::Normal);
}

#[test]
fn double_tap_cycles_half_max_then_max_then_baseline() {
    let mut h = Harness::square();
    let recorder = Recorder::default();
    h.view.set_observer(Some(Box::new(recorder.clone())));
    let tap = Point::new(100.0, 100.0);

    h.double_tap(tap);
    h.settle();
    assert_close(h.view.zoom(), 1.5, "first double tap");
    let rect = h.view.content_rect();
    assert!((rect.x0 + 50.0).abs() < 1e-9 && (rect.x1 - 550.0).abs() < 1e-9);
    let events = recorder.events();
    assert_eq!(
        events.first(),
        Some(&Event::SmoothStarted {
            current: 1.0,
            target: 1.5,
            pivot: tap,
        })
    );
    assert!(matches!(events.last(), Some(Event::SmoothEnded { current }) if (current - 1.5).abs() < 1e-9));

    h.advance(500);
    h.double_tap(tap);
    h.settle();
    assert_close(h.view.zoom(), 3.0, "second double tap");
    assert_eq!(h.view.history().len(), 2);

    h.advance(500);
    h.double_tap(tap);
    h.settle();
    assert_eq!(h.view.zoom(), 1.0);
    assert!(h.view.history().is_empty());
    assert_eq!(h.view.content_rect(), h.view.normal_content_rect());
    assert!(*recorder.repaints.borrow() > 0);
}

#[test]
fn slow_second_tap_is_not_a_double_tap() {
    let mut h = Harness::square();
    let at = Point::new(200.0, 200.0);
    h.down(A, at);
    h.advance(40);
    h.up(A, at);
    h.advance(400);
    h.down(A, at);
    h.up(A, at);
    assert_eq!(h.view.state(), InteractionState::Normal);
    assert!(h.view.scheduler().is_idle());
    assert_eq!(h.view.zoom(), 1.0);
}

#[test]
fn double_tap_honours_max_zoom() {
    let mut config = ZoomConfig::default();
    config.set_max_zoom(4.0).unwrap();
    let mut h = Harness::new(Size::new(400.0, 400.0), Size::new(400.0, 400.0), config);
    h.double_tap(Point::new(200.0, 200.0));
    h.settle();
    assert_close(h.view.zoom(), 2.0, "half of max");
}

#[test]
fn rejected_config_changes_nothing() {
    let mut h = Harness::square();
    assert_eq!(
        h.view.config_mut().set_min_zoom(-1.0),
        Err(InvalidConfiguration::MinZoom(-1.0))
    );
    assert_eq!(h.view.config().min_zoom(), 1.0);
    assert_eq!(
        h.view.config_mut().set_max_zoom(0.5),
        Err(InvalidConfiguration::MaxZoom(0.5))
    );
    assert_eq!(h.view.config().max_zoom(), 3.0);
    assert_eq!(h.view.state(), InteractionState::Normal);
}

/// A host clock that cannot withdraw frame requests.
#[derive(Debug, Default)]
struct ForgetfulClock {
    now: u64,
    requested: Vec<FrameTicket>,
}

impl FrameScheduler for ForgetfulClock {
    fn now_ms(&self) -> u64 {
        self.now
    }

    fn request_frame(&mut self, ticket: FrameTicket, _delay_ms: u64) {
        self.requested.push(ticket);
    }
}

fn double_tap_at(view: &mut ZoomView<ForgetfulClock>, at: Point) {
    let t = view.scheduler().now;
    view.handle_pointer(PointerEvent::down(A, at, t));
    view.handle_pointer(PointerEvent::up(A, at, t + 40));
    view.handle_pointer(PointerEvent::down(A, at, t + 100));
    view.handle_pointer(PointerEvent::up(A, at, t + 140));
}

#[test]
fn stale_frames_are_ignored() {
    let mut view = ZoomView::new(ForgetfulClock::default());
    view.layout(Size::new(400.0, 400.0), Insets::ZERO);
    view.set_content_size(Some(Size::new(400.0, 400.0)));

    double_tap_at(&mut view, Point::new(200.0, 200.0));
    assert_eq!(view.state(), InteractionState::SmoothScale);
    let first = *view.scheduler().requested.last().unwrap();

    view.reset(false);
    view.scheduler_mut().now += 200;
    view.on_frame(first);
    assert_eq!(view.zoom(), 1.0);
    assert_eq!(view.state(), InteractionState::Normal);

    view.scheduler_mut().now += 1_000;
    double_tap_at(&mut view, Point::new(200.0, 200.0));
    let second = *view.scheduler().requested.last().unwrap();
    assert_ne!(first, second);

    // A relayout supersedes the animation too.
    view.set_content_size(Some(Size::new(200.0, 200.0)));
    view.scheduler_mut().now += 200;
    view.on_frame(second);
    view.on_frame(first);
    assert_eq!(view.zoom(), 1.0);
    assert_eq!(view.state(), InteractionState::Normal);
    assert_eq!(view.scheduler().requested.len(), 2);
}

#[test]
fn debug_info_reflects_the_engine() {
    let mut h = Harness::square();
    h.double_tap(Point::new(200.0, 200.0));
    let info = h.view.debug_info();
    assert_eq!(info.state, InteractionState::SmoothScale);
    assert!(info.frame_pending);
    assert_eq!(info.history_len, 1);
    assert_eq!(info.fit_policy, FitPolicy::FitCenter);

    h.settle();
    let info = h.view.debug_info();
    assert!(!info.frame_pending);
    assert_close(info.transform.zoom, 1.5, "debug zoom");
}
