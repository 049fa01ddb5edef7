// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canonical pointer input consumed by [`crate::ZoomView::handle_pointer`].

use kurbo::{Point, Vec2};

/// Host-assigned identifier of a pointer (finger, pen, mouse button).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointerId(pub u64);

/// What happened to a pointer.
///
/// Hosts report the first pointer of a gesture with [`PointerEventKind::Down`]
/// and the last one with [`PointerEventKind::Up`]. Pointers joining or leaving
/// while another is still down use `PointerAdded` / `PointerRemoved`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    /// First pointer of a gesture went down.
    Down,
    /// A tracked pointer moved.
    Move,
    /// Last pointer of a gesture went up.
    Up,
    /// The gesture was aborted by the host.
    Cancel,
    /// An additional pointer went down.
    PointerAdded,
    /// A non-last pointer went up.
    PointerRemoved,
}

/// A single pointer event in host-view coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    /// What happened.
    pub kind: PointerEventKind,
    /// Which pointer it happened to.
    pub pointer: PointerId,
    /// Position in host-view coordinates (padding included).
    pub position: Point,
    /// Timestamp in milliseconds on the same clock as the frame scheduler.
    pub time_ms: u64,
    /// Release velocity (px/s) supplied by the host, overriding the built-in
    /// tracker. Only read on `Up` and `Cancel`.
    pub velocity: Option<Vec2>,
}

impl PointerEvent {
    /// Creates an event with no velocity override.
    #[must_use]
    pub fn new(kind: PointerEventKind, pointer: PointerId, position: Point, time_ms: u64) -> Self {
        Self {
            kind,
            pointer,
            position,
            time_ms,
            velocity: None,
        }
    }

    /// A [`PointerEventKind::Down`] event.
    #[must_use]
    pub fn down(pointer: PointerId, position: Point, time_ms: u64) -> Self {
        Self::new(PointerEventKind::Down, pointer, position, time_ms)
    }

    /// A [`PointerEventKind::Move`] event.
    #[must_use]
    pub fn moved(pointer: PointerId, position: Point, time_ms: u64) -> Self {
        Self::new(PointerEventKind::Move, pointer, position, time_ms)
    }

    /// A [`PointerEventKind::Up`] event.
    #[must_use]
    pub fn up(pointer: PointerId, position: Point, time_ms: u64) -> Self {
        Self::new(PointerEventKind::Up, pointer, position, time_ms)
    }

    /// A [`PointerEventKind::Cancel`] event.
    #[must_use]
    pub fn cancel(pointer: PointerId, position: Point, time_ms: u64) -> Self {
        Self::new(PointerEventKind::Cancel, pointer, position, time_ms)
    }

    /// A [`PointerEventKind::PointerAdded`] event.
    #[must_use]
    pub fn added(pointer: PointerId, position: Point, time_ms: u64) -> Self {
        Self::new(PointerEventKind::PointerAdded, pointer, position, time_ms)
    }

    /// A [`PointerEventKind::PointerRemoved`] event.
    #[must_use]
    pub fn removed(pointer: PointerId, position: Point, time_ms: u64) -> Self {
        Self::new(PointerEventKind::PointerRemoved, pointer, position, time_ms)
    }

    /// Replaces the tracked release velocity with `velocity` (px/s).
    #[must_use]
    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = Some(velocity);
        self
    }
}
