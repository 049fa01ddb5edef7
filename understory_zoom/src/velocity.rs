// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Release-velocity estimation from recent pointer samples.

use kurbo::{Point, Vec2};
use smallvec::SmallVec;

/// Samples older than this (relative to the newest) are ignored.
const HORIZON_MS: u64 = 100;

/// Cap on retained samples.
const CAPACITY: usize = 20;

/// Least-squares velocity estimate over the last 100 ms of motion.
#[derive(Clone, Debug, Default)]
pub struct VelocityTracker {
    samples: SmallVec<[(u64, Point); CAPACITY]>,
}

impl VelocityTracker {
    /// Creates an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops every sample.
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Records `position` at `time_ms`.
    ///
    /// A sample older than the newest one restarts the history.
    pub fn add(&mut self, time_ms: u64, position: Point) {
        if self.samples.last().is_some_and(|&(t, _)| time_ms < t) {
            self.samples.clear();
        }
        if self.samples.len() == CAPACITY {
            self.samples.remove(0);
        }
        self.samples.push((time_ms, position));
    }

    /// Velocity in px/s, each axis clamped to `[-max, max]`.
    ///
    /// Returns zero with fewer than two samples in the horizon.
    #[must_use]
    pub fn velocity(&self, max: f64) -> Vec2 {
        let Some(&(newest, _)) = self.samples.last() else {
            return Vec2::ZERO;
        };
        let recent: SmallVec<[(f64, Point); CAPACITY]> = self
            .samples
            .iter()
            .filter(|(t, _)| newest - t <= HORIZON_MS)
            .map(|&(t, p)| ((t as f64 - newest as f64) / 1000.0, p))
            .collect();
        if recent.len() < 2 {
            return Vec2::ZERO;
        }

        let n = recent.len() as f64;
        let mean_t = recent.iter().map(|(t, _)| t).sum::<f64>() / n;
        let mean = recent.iter().fold(Vec2::ZERO, |acc, (_, p)| acc + p.to_vec2()) / n;
        let (mut num, mut den) = (Vec2::ZERO, 0.0);
        for (t, p) in &recent {
            let dt = t - mean_t;
            num += (p.to_vec2() - mean) * dt;
            den += dt * dt;
        }
        if den == 0.0 {
            return Vec2::ZERO;
        }
        let v = num / den;
        Vec2::new(v.x.clamp(-max, max), v.y.clamp(-max, max))
    }
}
