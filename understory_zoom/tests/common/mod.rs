// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared harness for driving a `ZoomView` with scripted input.

#![allow(dead_code, reason = "each test binary uses a different subset")]

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::{Affine, Insets, Point, Size, Vec2};
use understory_zoom::{
    FrameQueue, FrameScheduler, NestedScrollHost, PointerEvent, PointerEventKind, PointerId,
    ZoomConfig, ZoomObserver, ZoomView,
};

pub const A: PointerId = PointerId(1);
pub const B: PointerId = PointerId(2);

/// Everything a [`Recorder`] saw, in order.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    SmoothStarted { current: f64, target: f64, pivot: Point },
    SmoothEnded { current: f64 },
    PinchStarted { current: f64, pivot: Point },
    Pinch { current: f64, factor: f64 },
    PinchEnded { current: f64 },
    Scrolled { old: Vec2, new: Vec2 },
    Flung { old: Vec2, new: Vec2 },
}

#[derive(Clone, Debug, Default)]
pub struct Recorder {
    pub events: Rc<RefCell<Vec<Event>>>,
    pub repaints: Rc<RefCell<usize>>,
}

impl Recorder {
    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }
}

impl ZoomObserver for Recorder {
    fn smooth_zoom_started(&mut self, current: f64, target: f64, pivot: Point) {
        self.events.borrow_mut().push(Event::SmoothStarted {
            current,
            target,
            pivot,
        });
    }

    fn smooth_zoom_ended(&mut self, current: f64) {
        self.events.borrow_mut().push(Event::SmoothEnded { current });
    }

    fn pinch_zoom_started(&mut self, current: f64, pivot: Point) {
        self.events
            .borrow_mut()
            .push(Event::PinchStarted { current, pivot });
    }

    fn pinch_zoom(&mut self, current: f64, factor: f64) {
        self.events.borrow_mut().push(Event::Pinch { current, factor });
    }

    fn pinch_zoom_ended(&mut self, current: f64) {
        self.events.borrow_mut().push(Event::PinchEnded { current });
    }

    fn scrolled(&mut self, old: Vec2, new: Vec2) {
        self.events.borrow_mut().push(Event::Scrolled { old, new });
    }

    fn flung(&mut self, old: Vec2, new: Vec2) {
        self.events.borrow_mut().push(Event::Flung { old, new });
    }

    fn repaint(&mut self) {
        *self.repaints.borrow_mut() += 1;
    }
}

/// What a [`ScriptedParent`] was asked, in order.
#[derive(Clone, Debug, PartialEq)]
pub enum NestedCall {
    Start,
    PreScroll(Vec2),
    PostScroll { consumed: Vec2, unconsumed: Vec2 },
    PreFling(Vec2),
    PostFling { velocity: Vec2, consumed: bool },
    Stop,
}

/// An ancestor scroll container that takes a fixed share of every pre-scroll.
#[derive(Clone, Debug, Default)]
pub struct ScriptedParent {
    pub calls: Rc<RefCell<Vec<NestedCall>>>,
    pub pre_scroll_share: f64,
    pub take_flings: bool,
}

impl NestedScrollHost for ScriptedParent {
    fn start_nested_scroll(&mut self) {
        self.calls.borrow_mut().push(NestedCall::Start);
    }

    fn pre_scroll(&mut self, delta: Vec2) -> Vec2 {
        self.calls.borrow_mut().push(NestedCall::PreScroll(delta));
        delta * self.pre_scroll_share
    }

    fn post_scroll(&mut self, consumed: Vec2, unconsumed: Vec2) -> Vec2 {
        self.calls.borrow_mut().push(NestedCall::PostScroll {
            consumed,
            unconsumed,
        });
        Vec2::ZERO
    }

    fn pre_fling(&mut self, velocity: Vec2) -> bool {
        self.calls.borrow_mut().push(NestedCall::PreFling(velocity));
        self.take_flings
    }

    fn post_fling(&mut self, velocity: Vec2, consumed: bool) {
        self.calls
            .borrow_mut()
            .push(NestedCall::PostFling { velocity, consumed });
    }

    fn stop_nested_scroll(&mut self) {
        self.calls.borrow_mut().push(NestedCall::Stop);
    }
}

/// A `ZoomView` on a manual clock, with pointer helpers that stamp events
/// with the current clock time.
pub struct Harness {
    pub view: ZoomView<FrameQueue>,
}

impl Harness {
    /// Content exactly the size of the viewport, so the fit is the identity.
    pub fn square() -> Self {
        Self::new(Size::new(400.0, 400.0), Size::new(400.0, 400.0), ZoomConfig::default())
    }

    pub fn new(viewport: Size, content: Size, config: ZoomConfig) -> Self {
        let mut view = ZoomView::with_config(FrameQueue::starting_at(1_000), config);
        view.layout(viewport, Insets::ZERO);
        view.set_content_size(Some(content));
        Self { view }
    }

    pub fn now(&self) -> u64 {
        self.view.scheduler().now_ms()
    }

    /// Moves the clock forward, running every frame that comes due on the way.
    pub fn advance(&mut self, ms: u64) {
        let end = self.now() + ms;
        loop {
            while let Some(ticket) = self.view.scheduler_mut().pop_due() {
                self.view.on_frame(ticket);
            }
            if self.now() >= end {
                break;
            }
            self.view.scheduler_mut().advance(1);
        }
    }

    /// Runs frames until nothing is scheduled.
    pub fn settle(&mut self) {
        for _ in 0..10_000 {
            match self.view.scheduler_mut().next_frame() {
                Some(ticket) => self.view.on_frame(ticket),
                None => return,
            }
        }
        panic!("animation never settled");
    }

    fn send(&mut self, kind: PointerEventKind, id: PointerId, at: Point) -> bool {
        let time = self.now();
        self.view.handle_pointer(PointerEvent::new(kind, id, at, time))
    }

    pub fn down(&mut self, id: PointerId, at: Point) -> bool {
        self.send(PointerEventKind::Down, id, at)
    }

    pub fn move_to(&mut self, id: PointerId, at: Point) -> bool {
        self.send(PointerEventKind::Move, id, at)
    }

    pub fn up(&mut self, id: PointerId, at: Point) -> bool {
        self.send(PointerEventKind::Up, id, at)
    }

    pub fn up_with_velocity(&mut self, id: PointerId, at: Point, velocity: Vec2) -> bool {
        let time = self.now();
        self.view
            .handle_pointer(PointerEvent::up(id, at, time).with_velocity(velocity))
    }

    pub fn cancel(&mut self, id: PointerId, at: Point) -> bool {
        self.send(PointerEventKind::Cancel, id, at)
    }

    pub fn cancel_with_velocity(&mut self, id: PointerId, at: Point, velocity: Vec2) -> bool {
        let time = self.now();
        self.view
            .handle_pointer(PointerEvent::cancel(id, at, time).with_velocity(velocity))
    }

    pub fn add(&mut self, id: PointerId, at: Point) -> bool {
        self.send(PointerEventKind::PointerAdded, id, at)
    }

    pub fn remove(&mut self, id: PointerId, at: Point) -> bool {
        self.send(PointerEventKind::PointerRemoved, id, at)
    }

    /// Two taps at `at`, 100 ms apart.
    pub fn double_tap(&mut self, at: Point) {
        self.down(A, at);
        self.advance(40);
        self.up(A, at);
        self.advance(60);
        self.down(A, at);
        self.advance(40);
        self.up(A, at);
    }

    /// A single-finger drag from `from` by `steps` moves of `step` each, 10 ms apart.
    pub fn drag(&mut self, from: Point, step: Vec2, steps: usize) -> Point {
        self.down(A, from);
        let mut at = from;
        for _ in 0..steps {
            self.advance(10);
            at += step;
            self.move_to(A, at);
        }
        at
    }
}

pub fn assert_close(got: f64, want: f64, what: &str) {
    assert!((got - want).abs() < 1e-9, "{what}: got {got}, want {want}");
}

pub fn assert_affine_close(got: Affine, want: Affine) {
    let (g, w) = (got.as_coeffs(), want.as_coeffs());
    for (a, b) in g.iter().zip(w.iter()) {
        assert!((a - b).abs() < 1e-6, "{g:?} != {w:?}");
    }
}
