// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Media player abstraction.
//!
//! A player is an independently clocked handle over one loaded clip. Commands
//! are fire-and-forget; their effects are observed later through the events
//! the player queues.

use thiserror::Error;

/// Which side of the comparison a player occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// The user's clip; its reported time is ground truth
    Primary,
    /// The reference clip; corrected toward the primary when it drifts
    Secondary,
}

impl Role {
    /// Human-readable label for menus and status text.
    pub fn label(self) -> &'static str {
        match self {
            Role::Primary => "User",
            Role::Secondary => "Reference",
        }
    }

    pub fn other(self) -> Role {
        match self {
            Role::Primary => Role::Secondary,
            Role::Secondary => Role::Primary,
        }
    }
}

/// Notifications queued by a player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerEvent {
    /// Duration is known
    MetadataLoaded,
    /// Current time progressed or was seeked
    TimeUpdate,
    /// Playback reached the end of the clip and stopped
    Ended,
}

/// Reasons a play request can be refused.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlayError {
    #[error("clip has no playable frames")]
    NoMedia,
    #[error("play request rejected: {0}")]
    Rejected(String),
}

/// A playable media handle.
pub trait MediaPlayer {
    /// Clip length in seconds. May be non-finite or zero before metadata loads.
    fn duration(&self) -> f64;

    fn current_time(&self) -> f64;

    /// Seek to `t` seconds.
    fn set_current_time(&mut self, t: f64);

    /// Request playback. Success only means the request was accepted.
    fn play(&mut self) -> Result<(), PlayError>;

    fn pause(&mut self);

    fn is_paused(&self) -> bool;

    fn set_rate(&mut self, rate: f64);

    fn rate(&self) -> f64;

    /// Advance the player's own clock by `dt` seconds of wall time.
    fn advance(&mut self, dt: f64);

    /// Take every event queued since the last call.
    fn drain_events(&mut self) -> Vec<PlayerEvent>;
}
