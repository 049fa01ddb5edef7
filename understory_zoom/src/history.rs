// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Nested zoom excursions and how to walk back through them.
//!
//! Every pinch (or double-tap) that leaves the content more zoomed in than it
//! started records a [`ZoomSegment`]. Zooming back out then retraces those
//! segments in reverse, each about the pivot it was recorded with, so the
//! point under the user's fingers stays where they expect it.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::Point;
use smallvec::SmallVec;

use crate::transform::ZoomTransform;

/// Scales closer than this are treated as the same boundary.
const BOUNDARY_EPSILON: f64 = 1e-6;

/// One recorded zoom excursion: from `scale_from` up to `scale_to` about `pivot`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomSegment {
    /// Zoom at the start of the excursion (never below `1.0`).
    pub scale_from: f64,
    /// Zoom at the end of the excursion.
    pub scale_to: f64,
    /// Pivot, in transform space, the excursion was scaled about.
    pub pivot: Point,
}

impl ZoomSegment {
    /// Starts a live segment at `scale_from` about `pivot`; `scale_to` is filled in on release.
    #[must_use]
    pub fn begin(scale_from: f64, pivot: Point) -> Self {
        Self {
            scale_from,
            scale_to: 0.0,
            pivot,
        }
    }
}

/// Ordered stack of completed [`ZoomSegment`]s, oldest first.
#[derive(Clone, Debug, Default)]
pub struct ZoomHistory {
    segments: SmallVec<[ZoomSegment; 4]>,
}

impl ZoomHistory {
    /// Creates an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Completed segments, oldest first.
    #[must_use]
    pub fn segments(&self) -> &[ZoomSegment] {
        &self.segments
    }

    /// Most recent segment.
    #[must_use]
    pub fn top(&self) -> Option<&ZoomSegment> {
        self.segments.last()
    }

    /// Returns `true` if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of recorded segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Records a completed segment.
    pub fn push(&mut self, segment: ZoomSegment) {
        self.segments.push(segment);
    }

    /// Forgets every segment.
    pub fn clear(&mut self) {
        self.segments.clear();
    }

    /// Zooms `model` down to `future` by retracing recorded segments.
    ///
    /// Starting from the live segment's pivot, each recorded segment is first
    /// restored to its `scale_to`, then the walk continues about that
    /// segment's own pivot. Segments whose `scale_from` lies above `future`
    /// are popped as the walk passes them. The walk stops inside the first
    /// segment that contains `future`:
    /// - landing on its `scale_from` pops it and hands its `scale_from` to `live`;
    /// - landing strictly inside it rewrites its `scale_to` to the new zoom.
    ///
    /// If the walk passes every segment, `model` is left at the last restored
    /// `scale_to` and the caller finishes the remaining scale itself.
    pub fn unwind(&mut self, live: &mut ZoomSegment, future: f64, model: &mut ZoomTransform) {
        let mut pivot = live.pivot;
        while let Some(top) = self.segments.last_mut() {
            if top.scale_to != model.zoom() {
                model.scale(top.scale_to / model.zoom(), pivot);
            }
            pivot = top.pivot;

            if top.scale_from <= future + BOUNDARY_EPSILON {
                if (future - top.scale_from).abs() <= BOUNDARY_EPSILON {
                    model.scale(top.scale_from / model.zoom(), pivot);
                    live.scale_from = top.scale_from;
                    self.segments.pop();
                } else {
                    model.scale(future / model.zoom(), pivot);
                    top.scale_to = model.zoom();
                    live.scale_from = top.scale_to;
                }
                return;
            }
            self.segments.pop();
        }
    }
}
