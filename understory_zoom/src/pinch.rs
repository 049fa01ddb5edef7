// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Two-pointer tracking and pinch factor detection.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::Point;

use crate::pointer::PointerId;

/// Per-event factors closer to `1` than this are held back and accumulate.
pub const MIN_FACTOR_STEP: f64 = 0.015;

/// Per-event factors at least this far from `1` are discarded as jumps.
pub const MAX_FACTOR_STEP: f64 = 0.25;

/// Outcome of feeding a span change to the detector.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PinchStep {
    /// The change is too small to act on yet; the baseline is kept.
    Accumulate,
    /// Apply this factor; the baseline has moved to the current span.
    Scale(f64),
    /// The change was a jump; it is dropped and the baseline reset.
    Skip,
}

#[derive(Clone, Copy, Debug)]
struct Slot {
    id: PointerId,
    position: Point,
}

/// Tracks up to two pointers and derives the pinch span, focus and factor.
///
/// Extra pointers beyond the first two are ignored.
#[derive(Clone, Debug, Default)]
pub struct PinchDetector {
    slots: [Option<Slot>; 2],
    baseline: Option<f64>,
}

impl PinchDetector {
    /// Creates a detector with no pointers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets every pointer and ends any pinch.
    pub fn clear(&mut self) {
        self.slots = [None, None];
        self.baseline = None;
    }

    /// Starts tracking `id`; returns `false` if both slots are taken.
    pub fn add(&mut self, id: PointerId, position: Point) -> bool {
        if self.position(id).is_some() {
            return self.update(id, position);
        }
        match self.slots.iter_mut().find(|s| s.is_none()) {
            Some(slot) => {
                *slot = Some(Slot { id, position });
                true
            }
            None => false,
        }
    }

    /// Moves a tracked pointer; returns `false` if `id` is not tracked.
    pub fn update(&mut self, id: PointerId, position: Point) -> bool {
        match self.slots.iter_mut().flatten().find(|s| s.id == id) {
            Some(slot) => {
                slot.position = position;
                true
            }
            None => false,
        }
    }

    /// Stops tracking `id`, ending any pinch; returns `false` if it was not tracked.
    pub fn remove(&mut self, id: PointerId) -> bool {
        for slot in &mut self.slots {
            if slot.is_some_and(|s| s.id == id) {
                *slot = None;
                self.baseline = None;
                return true;
            }
        }
        false
    }

    /// Position of a tracked pointer.
    #[must_use]
    pub fn position(&self, id: PointerId) -> Option<Point> {
        self.slots.iter().flatten().find(|s| s.id == id).map(|s| s.position)
    }

    /// A tracked pointer other than `id`, with its position.
    #[must_use]
    pub fn other(&self, id: PointerId) -> Option<(PointerId, Point)> {
        self.slots
            .iter()
            .flatten()
            .find(|s| s.id != id)
            .map(|s| (s.id, s.position))
    }

    /// Number of tracked pointers.
    #[must_use]
    pub fn count(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    fn pair(&self) -> Option<(Point, Point)> {
        match self.slots {
            [Some(a), Some(b)] => Some((a.position, b.position)),
            _ => None,
        }
    }

    /// Distance between the two pointers.
    #[must_use]
    pub fn span(&self) -> Option<f64> {
        self.pair().map(|(a, b)| a.distance(b))
    }

    /// Midpoint of the two pointers.
    #[must_use]
    pub fn focus(&self) -> Option<Point> {
        self.pair().map(|(a, b)| a.midpoint(b))
    }

    /// Returns `true` while a pinch has begun and not ended.
    #[must_use]
    pub fn is_pinching(&self) -> bool {
        self.baseline.is_some()
    }

    /// Begins a pinch from the current span; returns the focus it began at.
    ///
    /// Requires two pointers at distinct positions.
    pub fn begin(&mut self) -> Option<Point> {
        let span = self.span().filter(|s| *s > 0.0)?;
        self.baseline = Some(span);
        self.focus()
    }

    /// Ends the pinch, keeping the pointers.
    pub fn end(&mut self) {
        self.baseline = None;
    }

    /// Classifies the span change since the baseline.
    #[must_use]
    pub fn step(&mut self) -> PinchStep {
        let (Some(baseline), Some(span)) = (self.baseline, self.span()) else {
            return PinchStep::Accumulate;
        };
        let factor = span / baseline;
        let delta = (1.0 - factor).abs();
        if delta <= MIN_FACTOR_STEP {
            return PinchStep::Accumulate;
        }
        if span > 0.0 {
            self.baseline = Some(span);
        }
        if delta < MAX_FACTOR_STEP {
            PinchStep::Scale(factor)
        } else {
            PinchStep::Skip
        }
    }
}
