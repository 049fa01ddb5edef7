// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ballistic fling and spring-back motion for the scroll position.
//!
//! Each axis is planned up front as a short list of segments:
//!
//! 1. *Ballistic*: constant deceleration from the release velocity.
//! 2. *Overshoot*: if the ballistic path crosses a bound, the axis keeps going
//!    past it for at most the over-scroll allowance, decelerating harder.
//! 3. *Spring-back*: an eased return from outside the bounds to the nearest bound.
//!
//! Planning is pure arithmetic, so sampling [`Scroller::compute`] at any
//! timestamp is deterministic and independent of the frame rate.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Point, Vec2};
use smallvec::SmallVec;

/// Deceleration applied to a free fling, in px/s².
pub const FLING_DECELERATION: f64 = 2000.0;

/// Deceleration used to size spring-back durations, in px/s².
pub const SPRING_BACK_DECELERATION: f64 = 2000.0;

/// Which axes a fling or spring-back is allowed to move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlingAxis {
    /// Both axes move.
    Both,
    /// Only the horizontal axis moves; the vertical position is held.
    OnlyX,
    /// Only the vertical axis moves; the horizontal position is held.
    OnlyY,
}

impl FlingAxis {
    fn moves_x(self) -> bool {
        matches!(self, Self::Both | Self::OnlyX)
    }

    fn moves_y(self) -> bool {
        matches!(self, Self::Both | Self::OnlyY)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Ballistic,
    Overshoot,
    SpringBack,
}

#[derive(Clone, Copy, Debug)]
struct Segment {
    phase: Phase,
    from: f64,
    to: f64,
    /// Offset from the motion start, in milliseconds.
    start_ms: f64,
    duration_ms: f64,
    /// Initial speed for decelerating phases, px/s (unsigned).
    speed: f64,
    /// Deceleration for decelerating phases, px/s² (unsigned).
    deceleration: f64,
}

impl Segment {
    fn end_ms(&self) -> f64 {
        self.start_ms + self.duration_ms
    }

    fn sample(&self, elapsed_ms: f64) -> f64 {
        let local = (elapsed_ms - self.start_ms).clamp(0.0, self.duration_ms);
        if local >= self.duration_ms {
            return self.to;
        }
        match self.phase {
            Phase::Ballistic | Phase::Overshoot => {
                let t = local / 1000.0;
                let travelled = self.speed * t - 0.5 * self.deceleration * t * t;
                self.from + (self.to - self.from).signum() * travelled
            }
            Phase::SpringBack => {
                let u = local / self.duration_ms;
                self.from + (self.to - self.from) * (u * u * (3.0 - 2.0 * u))
            }
        }
    }
}

/// Planned motion along one axis.
#[derive(Clone, Debug, Default)]
pub struct AxisMotion {
    segments: SmallVec<[Segment; 3]>,
    position: f64,
    current: Option<Phase>,
}

impl AxisMotion {
    /// A motion that stays at `position`.
    #[must_use]
    pub fn idle(position: f64) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Plans a fling from `start` with signed `velocity` inside `[min, max]`,
    /// allowing up to `over` pixels of overshoot past the bound it hits.
    ///
    /// Starting outside the bounds plans a spring-back instead.
    #[must_use]
    pub fn fling(start: f64, velocity: f64, min: f64, max: f64, over: f64) -> Self {
        if start < min || start > max {
            return Self::spring_back(start, min, max);
        }
        let mut motion = Self::idle(start);
        if velocity == 0.0 {
            return motion;
        }

        let a = FLING_DECELERATION;
        let speed = velocity.abs();
        let dir = velocity.signum();
        let reach = speed * speed / (2.0 * a);
        let bound = if dir > 0.0 { max } else { min };
        let to_bound = (bound - start).abs();

        if reach <= to_bound {
            motion.segments.push(Segment {
                phase: Phase::Ballistic,
                from: start,
                to: start + dir * reach,
                start_ms: 0.0,
                duration_ms: speed / a * 1000.0,
                speed,
                deceleration: a,
            });
            return motion;
        }

        // The bound is hit with speed `edge_speed` after `t_edge` seconds.
        let edge_speed = (speed * speed - 2.0 * a * to_bound).max(0.0).sqrt();
        let t_edge = (speed - edge_speed) / a;
        motion.segments.push(Segment {
            phase: Phase::Ballistic,
            from: start,
            to: bound,
            start_ms: 0.0,
            duration_ms: t_edge * 1000.0,
            speed,
            deceleration: a,
        });

        let overshoot = over.min(edge_speed * edge_speed / (2.0 * a));
        if overshoot <= 0.0 || edge_speed == 0.0 {
            return motion;
        }
        let hard = edge_speed * edge_speed / (2.0 * overshoot);
        let peak = bound + dir * overshoot;
        let mut t = t_edge * 1000.0;
        let duration = edge_speed / hard * 1000.0;
        motion.segments.push(Segment {
            phase: Phase::Overshoot,
            from: bound,
            to: peak,
            start_ms: t,
            duration_ms: duration,
            speed: edge_speed,
            deceleration: hard,
        });
        t += duration;
        motion.segments.push(spring_segment(peak, bound, t));
        motion
    }

    /// Plans a return from `start` to the nearest of `min`/`max`.
    ///
    /// Starting inside the bounds yields an idle motion.
    #[must_use]
    pub fn spring_back(start: f64, min: f64, max: f64) -> Self {
        let mut motion = Self::idle(start);
        let target = if start < min {
            min
        } else if start > max {
            max
        } else {
            return motion;
        };
        motion.segments.push(spring_segment(start, target, 0.0));
        motion
    }

    /// Current position.
    #[must_use]
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Position the motion comes to rest at.
    #[must_use]
    pub fn final_position(&self) -> f64 {
        self.segments.last().map_or(self.position, |s| s.to)
    }

    /// Total planned time in milliseconds.
    #[must_use]
    pub fn duration_ms(&self) -> f64 {
        self.segments.last().map_or(0.0, Segment::end_ms)
    }

    /// Returns `true` once the motion has nothing left to do at `elapsed_ms`.
    #[must_use]
    pub fn is_finished_at(&self, elapsed_ms: f64) -> bool {
        elapsed_ms >= self.duration_ms()
    }

    /// Returns `true` while the axis is past a bound (overshooting or springing back).
    #[must_use]
    pub fn is_over_scrolled(&self) -> bool {
        matches!(self.current, Some(Phase::Overshoot | Phase::SpringBack))
    }

    fn advance(&mut self, elapsed_ms: f64) {
        let active = self
            .segments
            .iter()
            .find(|s| elapsed_ms < s.end_ms())
            .or(self.segments.last());
        if let Some(seg) = active {
            self.position = seg.sample(elapsed_ms);
            self.current = (elapsed_ms < seg.end_ms()).then_some(seg.phase);
        }
    }

    fn stop(&mut self) {
        self.segments.clear();
        self.current = None;
    }
}

fn spring_segment(from: f64, to: f64, start_ms: f64) -> Segment {
    let duration_ms = 1000.0 * (2.0 * (to - from).abs() / SPRING_BACK_DECELERATION).sqrt();
    Segment {
        phase: Phase::SpringBack,
        from,
        to,
        start_ms,
        duration_ms,
        speed: 0.0,
        deceleration: 0.0,
    }
}

/// Two-axis scroll animation: a fling or a spring-back.
///
/// Positions are in whole-pixel scroll units; [`Scroller::position`] is
/// rounded the way scroll offsets are applied by hosts.
#[derive(Clone, Debug, Default)]
pub struct Scroller {
    x: AxisMotion,
    y: AxisMotion,
    start_ms: u64,
    finished: bool,
}

impl Scroller {
    /// Creates a finished scroller at the origin.
    #[must_use]
    pub fn new() -> Self {
        Self {
            finished: true,
            ..Self::default()
        }
    }

    /// Starts a fling at `now_ms` from `start` with `velocity` (px/s).
    ///
    /// Axes excluded by `axis` hold their start position.
    pub fn fling(
        &mut self,
        now_ms: u64,
        axis: FlingAxis,
        start: Point,
        velocity: Vec2,
        min: Point,
        max: Point,
        over: f64,
    ) {
        self.x = if axis.moves_x() {
            AxisMotion::fling(start.x, velocity.x, min.x, max.x, over)
        } else {
            AxisMotion::idle(start.x)
        };
        self.y = if axis.moves_y() {
            AxisMotion::fling(start.y, velocity.y, min.y, max.y, over)
        } else {
            AxisMotion::idle(start.y)
        };
        self.start_ms = now_ms;
        self.finished = false;
    }

    /// Starts returning an out-of-bounds `start` to `[min, max]` at `now_ms`.
    ///
    /// Returns `false`, leaving the scroller finished, when every allowed axis
    /// is already inside its bounds.
    pub fn spring_back(&mut self, now_ms: u64, axis: FlingAxis, start: Point, min: Point, max: Point) -> bool {
        self.x = if axis.moves_x() {
            AxisMotion::spring_back(start.x, min.x, max.x)
        } else {
            AxisMotion::idle(start.x)
        };
        self.y = if axis.moves_y() {
            AxisMotion::spring_back(start.y, min.y, max.y)
        } else {
            AxisMotion::idle(start.y)
        };
        self.start_ms = now_ms;
        let moving = self.x.duration_ms() > 0.0 || self.y.duration_ms() > 0.0;
        self.finished = !moving;
        moving
    }

    /// Advances both axes to `now_ms`.
    ///
    /// Returns `false` once the scroller has finished. The call that finishes
    /// it still returns `true` so the resting position gets applied.
    pub fn compute(&mut self, now_ms: u64) -> bool {
        if self.finished {
            return false;
        }
        let elapsed = now_ms.saturating_sub(self.start_ms) as f64;
        self.x.advance(elapsed);
        self.y.advance(elapsed);
        if self.x.is_finished_at(elapsed) && self.y.is_finished_at(elapsed) {
            self.finished = true;
        }
        true
    }

    /// Current scroll position, rounded to whole pixels.
    #[must_use]
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x.position().round(), self.y.position().round())
    }

    /// Where the motion will come to rest.
    #[must_use]
    pub fn final_position(&self) -> Vec2 {
        Vec2::new(self.x.final_position().round(), self.y.final_position().round())
    }

    /// Stops immediately at the current position.
    pub fn force_finished(&mut self) {
        self.x.stop();
        self.y.stop();
        self.finished = true;
    }

    /// Returns `true` once nothing remains to animate.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Returns `true` while either axis is past its bounds.
    #[must_use]
    pub fn is_over_scrolled(&self) -> bool {
        !self.finished && (self.x.is_over_scrolled() || self.y.is_over_scrolled())
    }

    /// Per-axis motions, horizontal first.
    #[must_use]
    pub fn axes(&self) -> (&AxisMotion, &AxisMotion) {
        (&self.x, &self.y)
    }
}
