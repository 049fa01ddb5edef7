// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tunables for a [`crate::ZoomView`] and their validation.

use thiserror::Error;

/// A configuration value was rejected by one of the [`ZoomConfig`] setters.
///
/// The rejected value is carried in the variant. A rejected setter never
/// changes the configuration.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum InvalidConfiguration {
    /// `min_zoom` must lie in `[0, 1]`.
    #[error("minimum zoom {0} must be in [0, 1]")]
    MinZoom(f64),
    /// `max_zoom` must be at least `1`.
    #[error("maximum zoom {0} must be at least 1")]
    MaxZoom(f64),
    /// `min_over_zoom` must lie in `[0, 1]`.
    #[error("minimum over-zoom {0} must be in [0, 1]")]
    MinOverZoom(f64),
    /// `max_over_zoom` must be non-negative.
    #[error("maximum over-zoom {0} must not be negative")]
    MaxOverZoom(f64),
    /// `over_scroll_distance` must be finite and non-negative.
    #[error("over-scroll distance {0} must be a finite, non-negative length")]
    OverScrollDistance(f64),
    /// `double_tap_slop` must be finite and non-negative.
    #[error("double-tap slop {0} must be a finite, non-negative length")]
    DoubleTapSlop(f64),
    /// Fling velocities must be finite, non-negative, and `min <= max`.
    #[error("fling velocity {0} must be finite, non-negative, and keep min <= max")]
    FlingVelocity(f64),
}

/// Configuration of zoom bounds, animation timings, and gesture thresholds.
///
/// All lengths are in viewport pixels, velocities in pixels per second and
/// durations in milliseconds.
#[derive(Clone, Debug, PartialEq)]
pub struct ZoomConfig {
    double_tap_animation_ms: u64,
    over_zoom_animation_ms: u64,
    over_scroll_distance: f64,
    min_zoom: f64,
    max_zoom: f64,
    min_over_zoom: f64,
    max_over_zoom: f64,
    double_tap_timeout_ms: u64,
    double_tap_slop: f64,
    min_fling_velocity: f64,
    max_fling_velocity: f64,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            double_tap_animation_ms: 300,
            over_zoom_animation_ms: 300,
            over_scroll_distance: 50.0,
            min_zoom: 1.0,
            max_zoom: 3.0,
            min_over_zoom: 0.25,
            max_over_zoom: 0.25,
            double_tap_timeout_ms: 300,
            double_tap_slop: 100.0,
            min_fling_velocity: 50.0,
            max_fling_velocity: 8_000.0,
        }
    }
}

impl ZoomConfig {
    /// Duration of double-tap, `set_zoom` and animated reset zooms.
    #[must_use]
    pub fn double_tap_animation_ms(&self) -> u64 {
        self.double_tap_animation_ms
    }

    /// Sets the duration of double-tap, `set_zoom` and animated reset zooms.
    pub fn set_double_tap_animation_ms(&mut self, ms: u64) {
        self.double_tap_animation_ms = ms;
    }

    /// Duration of the correction animation after a pinch ends out of bounds.
    #[must_use]
    pub fn over_zoom_animation_ms(&self) -> u64 {
        self.over_zoom_animation_ms
    }

    /// Sets the duration of the correction animation after an over-zoomed pinch.
    pub fn set_over_zoom_animation_ms(&mut self, ms: u64) {
        self.over_zoom_animation_ms = ms;
    }

    /// How far content may be dragged or flung past its edge.
    #[must_use]
    pub fn over_scroll_distance(&self) -> f64 {
        self.over_scroll_distance
    }

    /// Sets how far content may be dragged or flung past its edge.
    pub fn set_over_scroll_distance(&mut self, distance: f64) -> Result<(), InvalidConfiguration> {
        if !is_length(distance) {
            return Err(InvalidConfiguration::OverScrollDistance(distance));
        }
        self.over_scroll_distance = distance;
        Ok(())
    }

    /// Lowest zoom a gesture may settle at.
    #[must_use]
    pub fn min_zoom(&self) -> f64 {
        self.min_zoom
    }

    /// Sets the lowest zoom a gesture may settle at; must be in `[0, 1]`.
    pub fn set_min_zoom(&mut self, zoom: f64) -> Result<(), InvalidConfiguration> {
        if !(0.0..=1.0).contains(&zoom) {
            return Err(InvalidConfiguration::MinZoom(zoom));
        }
        self.min_zoom = zoom;
        Ok(())
    }

    /// Highest zoom a gesture may settle at.
    #[must_use]
    pub fn max_zoom(&self) -> f64 {
        self.max_zoom
    }

    /// Sets the highest zoom a gesture may settle at; must be at least `1`.
    pub fn set_max_zoom(&mut self, zoom: f64) -> Result<(), InvalidConfiguration> {
        if !(zoom >= 1.0 && zoom.is_finite()) {
            return Err(InvalidConfiguration::MaxZoom(zoom));
        }
        self.max_zoom = zoom;
        Ok(())
    }

    /// Elastic range below [`ZoomConfig::min_zoom`] allowed during a pinch.
    #[must_use]
    pub fn min_over_zoom(&self) -> f64 {
        self.min_over_zoom
    }

    /// Sets the elastic range below the minimum zoom; must be in `[0, 1]`.
    pub fn set_min_over_zoom(&mut self, over: f64) -> Result<(), InvalidConfiguration> {
        if !(0.0..=1.0).contains(&over) {
            return Err(InvalidConfiguration::MinOverZoom(over));
        }
        self.min_over_zoom = over;
        Ok(())
    }

    /// Elastic range above [`ZoomConfig::max_zoom`] allowed during a pinch.
    #[must_use]
    pub fn max_over_zoom(&self) -> f64 {
        self.max_over_zoom
    }

    /// Sets the elastic range above the maximum zoom; must be non-negative.
    pub fn set_max_over_zoom(&mut self, over: f64) -> Result<(), InvalidConfiguration> {
        if !is_length(over) {
            return Err(InvalidConfiguration::MaxOverZoom(over));
        }
        self.max_over_zoom = over;
        Ok(())
    }

    /// Longest gap between two downs that still counts as a double tap.
    #[must_use]
    pub fn double_tap_timeout_ms(&self) -> u64 {
        self.double_tap_timeout_ms
    }

    /// Sets the longest gap between two downs that still counts as a double tap.
    pub fn set_double_tap_timeout_ms(&mut self, ms: u64) {
        self.double_tap_timeout_ms = ms;
    }

    /// Largest distance between two downs that still counts as a double tap.
    #[must_use]
    pub fn double_tap_slop(&self) -> f64 {
        self.double_tap_slop
    }

    /// Sets the largest distance between two downs that still counts as a double tap.
    pub fn set_double_tap_slop(&mut self, slop: f64) -> Result<(), InvalidConfiguration> {
        if !is_length(slop) {
            return Err(InvalidConfiguration::DoubleTapSlop(slop));
        }
        self.double_tap_slop = slop;
        Ok(())
    }

    /// Release speed (on either axis) needed to start a fling.
    #[must_use]
    pub fn min_fling_velocity(&self) -> f64 {
        self.min_fling_velocity
    }

    /// Sets the release speed needed to start a fling.
    pub fn set_min_fling_velocity(&mut self, velocity: f64) -> Result<(), InvalidConfiguration> {
        if !is_length(velocity) || velocity > self.max_fling_velocity {
            return Err(InvalidConfiguration::FlingVelocity(velocity));
        }
        self.min_fling_velocity = velocity;
        Ok(())
    }

    /// Upper clamp applied to measured release velocities.
    #[must_use]
    pub fn max_fling_velocity(&self) -> f64 {
        self.max_fling_velocity
    }

    /// Sets the upper clamp applied to measured release velocities.
    pub fn set_max_fling_velocity(&mut self, velocity: f64) -> Result<(), InvalidConfiguration> {
        if !is_length(velocity) || velocity < self.min_fling_velocity {
            return Err(InvalidConfiguration::FlingVelocity(velocity));
        }
        self.max_fling_velocity = velocity;
        Ok(())
    }

    /// Lowest zoom reachable while a pinch is in progress.
    pub(crate) fn pinch_floor(&self) -> f64 {
        self.min_zoom - self.min_over_zoom
    }

    /// Highest zoom reachable while a pinch is in progress.
    pub(crate) fn pinch_ceiling(&self) -> f64 {
        self.max_zoom + self.max_over_zoom
    }
}

fn is_length(value: f64) -> bool {
    value >= 0.0 && value.is_finite()
}
