// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Time-based zoom animation toward a target scale.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Point, Vec2};

use crate::transform::ZoomTransform;

/// Ease-in-ease-out curve: slow start, fast middle, slow end.
#[must_use]
pub fn accelerate_decelerate(t: f64) -> f64 {
    (((t + 1.0) * core::f64::consts::PI).cos() / 2.0) + 0.5
}

/// Whether a [`SmoothZoom`] needs more frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SmoothStep {
    /// More frames are needed.
    Running,
    /// The target has been reached.
    Finished,
}

/// A pending zoom animation.
///
/// Each step moves the current zoom toward `target` by the eased fraction of
/// the *remaining* distance, so the final step always lands exactly on the
/// target regardless of frame timing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SmoothZoom {
    /// Zoom to end at.
    pub target: f64,
    /// Transform-space point held fixed while zooming.
    pub pivot: Point,
    /// Total animation time.
    pub duration_ms: u64,
    /// Time the animation started at.
    pub start_ms: u64,
    /// When set, the current translation is also pulled toward this value.
    pub translate_to: Option<Vec2>,
}

impl SmoothZoom {
    /// Fraction of the animation time elapsed at `now_ms`, in `[0, 1]`.
    #[must_use]
    pub fn fraction(&self, now_ms: u64) -> f64 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        let elapsed = now_ms.saturating_sub(self.start_ms).min(self.duration_ms);
        elapsed as f64 / self.duration_ms as f64
    }

    /// Advances the animation to `now_ms`, mutating `model`.
    ///
    /// While running, residual scroll is damped toward zero whenever the
    /// animation is pulling the zoom down below `max_zoom` or the zoom is
    /// below the baseline.
    pub fn step(&self, now_ms: u64, model: &mut ZoomTransform, max_zoom: f64) -> SmoothStep {
        let t = self.fraction(now_ms);
        let eased = accelerate_decelerate(t);

        let old_translation = model.translation();
        let zoom = model.zoom();
        if eased != 0.0 && zoom > 0.0 {
            let factor = (zoom + eased * (self.target - zoom)) / zoom;
            model.scale(factor, self.pivot);

            if let Some(to) = self.translate_to {
                let wanted = old_translation + (to - old_translation) * eased;
                model.translate(wanted - model.translation());
            }
        }

        if t < 1.0 {
            let zoom = model.zoom();
            if (zoom < max_zoom && self.target < zoom) || zoom < 1.0 {
                model.set_scroll((model.scroll() * (1.0 - t)).trunc());
            }
            SmoothStep::Running
        } else {
            SmoothStep::Finished
        }
    }
}
