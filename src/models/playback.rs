// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Shared playback state.
//!
//! Both players are driven from this state; only duration discovery and the
//! primary player's reported time flow back into it.

/// Slowest selectable playback multiplier.
pub const RATE_MIN: f64 = 0.25;
/// Fastest selectable playback multiplier.
pub const RATE_MAX: f64 = 2.0;
/// Rate slider granularity.
pub const RATE_STEP: f64 = 0.25;

/// Derived playback state owned by the synchronizer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackState {
    /// Longest of the loaded clips, in seconds (0 until metadata arrives)
    pub duration: f64,
    /// Displayed time in seconds, always within `[0, duration]`
    pub current_time: f64,
    /// Whether both players were told to play
    pub playing: bool,
    /// Playback multiplier, always within `[RATE_MIN, RATE_MAX]`
    pub rate: f64,
}

impl PlaybackState {
    pub fn new() -> Self {
        Self {
            duration: 0.0,
            current_time: 0.0,
            playing: false,
            rate: 1.0,
        }
    }

    /// Clamp a time in seconds into `[0, duration]`.
    ///
    /// Non-finite input collapses to 0.
    pub fn clamp_time(&self, t: f64) -> f64 {
        if !t.is_finite() {
            return 0.0;
        }
        t.clamp(0.0, self.duration.max(0.0))
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::new()
    }
}

/// Clamp a rate into the selectable range.
pub fn clamp_rate(rate: f64) -> f64 {
    if rate.is_nan() {
        return 1.0;
    }
    rate.clamp(RATE_MIN, RATE_MAX)
}
