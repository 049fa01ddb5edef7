// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Seams between the engine and its host: frame scheduling, nested scrolling
//! and event notification.

use alloc::vec::Vec;

use kurbo::{Point, Vec2};

/// Identifies one requested frame.
///
/// Every request gets a fresh ticket. The engine only acts on the ticket it is
/// currently waiting for, so a host may deliver cancelled or superseded frames
/// without harm.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameTicket(pub u64);

/// Clock and per-frame callback queue supplied by the host.
pub trait FrameScheduler {
    /// Current time in milliseconds on a monotonic clock.
    fn now_ms(&self) -> u64;

    /// Asks for [`crate::ZoomView::on_frame`] to be called with `ticket`
    /// after `delay_ms` (or on the next display refresh when `0`).
    fn request_frame(&mut self, ticket: FrameTicket, delay_ms: u64);

    /// Withdraws a previous request. Hosts that cannot cancel may ignore this.
    fn cancel_frame(&mut self, ticket: FrameTicket) {
        let _ = ticket;
    }
}

/// A manually clocked [`FrameScheduler`].
///
/// Useful for headless hosts and tests: time only advances when told to,
/// and due frames are handed back in order.
///
/// ```
/// use understory_zoom::{FrameQueue, FrameScheduler, FrameTicket};
///
/// let mut queue = FrameQueue::new();
/// queue.request_frame(FrameTicket(1), 15);
/// queue.request_frame(FrameTicket(2), 0);
/// assert_eq!(queue.next_frame(), Some(FrameTicket(2)));
/// assert_eq!(queue.next_frame(), Some(FrameTicket(1)));
/// assert_eq!(queue.now_ms(), 15);
/// assert!(queue.is_idle());
/// ```
#[derive(Clone, Debug, Default)]
pub struct FrameQueue {
    now_ms: u64,
    pending: Vec<(u64, FrameTicket)>,
}

impl FrameQueue {
    /// Creates an empty queue at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty queue at `now_ms`.
    #[must_use]
    pub fn starting_at(now_ms: u64) -> Self {
        Self {
            now_ms,
            pending: Vec::new(),
        }
    }

    /// Moves the clock forward by `ms`.
    pub fn advance(&mut self, ms: u64) {
        self.now_ms = self.now_ms.saturating_add(ms);
    }

    /// Number of outstanding requests.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Returns `true` when nothing is scheduled.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    /// Pops the earliest request that is due at the current time.
    pub fn pop_due(&mut self) -> Option<FrameTicket> {
        let index = self.earliest().filter(|&i| self.pending[i].0 <= self.now_ms)?;
        Some(self.pending.remove(index).1)
    }

    /// Advances the clock to the earliest request (if later) and pops it.
    pub fn next_frame(&mut self) -> Option<FrameTicket> {
        let index = self.earliest()?;
        let (due, ticket) = self.pending.remove(index);
        self.now_ms = self.now_ms.max(due);
        Some(ticket)
    }

    fn earliest(&self) -> Option<usize> {
        self.pending
            .iter()
            .enumerate()
            .min_by_key(|(_, (due, ticket))| (*due, *ticket))
            .map(|(i, _)| i)
    }
}

impl FrameScheduler for FrameQueue {
    fn now_ms(&self) -> u64 {
        self.now_ms
    }

    fn request_frame(&mut self, ticket: FrameTicket, delay_ms: u64) {
        self.pending.push((self.now_ms.saturating_add(delay_ms), ticket));
    }

    fn cancel_frame(&mut self, ticket: FrameTicket) {
        self.pending.retain(|(_, t)| *t != ticket);
    }
}

/// An ancestor scroll container that may take part of every scroll and fling.
///
/// Every method defaults to consuming nothing.
pub trait NestedScrollHost {
    /// A drag that may scroll has started.
    fn start_nested_scroll(&mut self) {}

    /// Offered `delta` before the engine scrolls; returns the part consumed.
    fn pre_scroll(&mut self, delta: Vec2) -> Vec2 {
        let _ = delta;
        Vec2::ZERO
    }

    /// Offered what the engine could not consume; returns the part consumed.
    fn post_scroll(&mut self, consumed: Vec2, unconsumed: Vec2) -> Vec2 {
        let _ = (consumed, unconsumed);
        Vec2::ZERO
    }

    /// Offered a fling before the engine starts one; return `true` to take it.
    fn pre_fling(&mut self, velocity: Vec2) -> bool {
        let _ = velocity;
        false
    }

    /// Told about a fling; `consumed` is `true` when the engine is running it.
    fn post_fling(&mut self, velocity: Vec2, consumed: bool) {
        let _ = (velocity, consumed);
    }

    /// The drag has ended.
    fn stop_nested_scroll(&mut self) {}
}

/// Receives engine events. Every method defaults to doing nothing.
///
/// Calls are made synchronously from inside the engine, at the point where
/// the event happens.
pub trait ZoomObserver {
    /// A smooth zoom from `current` toward `target` about `pivot` began.
    fn smooth_zoom_started(&mut self, current: f64, target: f64, pivot: Point) {
        let _ = (current, target, pivot);
    }

    /// A smooth zoom finished at `current`.
    fn smooth_zoom_ended(&mut self, current: f64) {
        let _ = current;
    }

    /// A pinch began at zoom `current` about `pivot`.
    fn pinch_zoom_started(&mut self, current: f64, pivot: Point) {
        let _ = (current, pivot);
    }

    /// A pinch step is about to scale `current` by `factor`.
    fn pinch_zoom(&mut self, current: f64, factor: f64) {
        let _ = (current, factor);
    }

    /// A pinch ended at zoom `current`.
    fn pinch_zoom_ended(&mut self, current: f64) {
        let _ = current;
    }

    /// A drag moved the scroll position.
    fn scrolled(&mut self, old: Vec2, new: Vec2) {
        let _ = (old, new);
    }

    /// A fling or spring-back frame moved the scroll position.
    fn flung(&mut self, old: Vec2, new: Vec2) {
        let _ = (old, new);
    }

    /// The draw transform or scroll position changed.
    fn repaint(&mut self) {}
}
