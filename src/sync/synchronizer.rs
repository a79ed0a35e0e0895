// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Primary/secondary playback synchronization.
//!
//! The primary player is the time authority. The secondary follows it and is
//! only seeked when it drifts past the tolerance, so small drift never causes
//! a stream of seeks. Every command acts on whichever players are present;
//! an absent side is simply skipped.

use super::player::{MediaPlayer, PlayError, PlayerEvent, Role};
use crate::models::playback::{clamp_rate, PlaybackState};

/// Default maximum drift before the secondary is forcibly resynchronized.
pub const DEFAULT_DRIFT_TOLERANCE: f64 = 0.12;

/// Keeps two players time-aligned under play, pause, scrub, and rate changes.
pub struct Synchronizer<P: MediaPlayer> {
    primary: Option<P>,
    secondary: Option<P>,
    state: PlaybackState,
    drift_tolerance: f64,
}

impl<P: MediaPlayer> Synchronizer<P> {
    pub fn new(drift_tolerance: f64) -> Self {
        Self {
            primary: None,
            secondary: None,
            state: PlaybackState::new(),
            drift_tolerance,
        }
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn set_drift_tolerance(&mut self, tolerance: f64) {
        self.drift_tolerance = tolerance;
    }

    pub fn player(&self, role: Role) -> Option<&P> {
        match role {
            Role::Primary => self.primary.as_ref(),
            Role::Secondary => self.secondary.as_ref(),
        }
    }

    fn slot_mut(&mut self, role: Role) -> &mut Option<P> {
        match role {
            Role::Primary => &mut self.primary,
            Role::Secondary => &mut self.secondary,
        }
    }

    fn players_mut(&mut self) -> impl Iterator<Item = &mut P> {
        self.primary.iter_mut().chain(self.secondary.iter_mut())
    }

    /// Install a player for `role`, replacing and releasing any previous one.
    ///
    /// Playback stops on both sides; the new player adopts the current rate
    /// and is seeked to the current time.
    pub fn attach(&mut self, role: Role, mut player: P) -> Option<P> {
        self.pause_all();
        player.set_rate(self.state.rate);
        player.set_current_time(self.state.current_time);
        let previous = self.slot_mut(role).replace(player);
        if previous.is_some() {
            log::info!("Replaced {} player", role.label());
        }
        previous
    }

    /// Remove the player for `role` and recompute the duration from what remains.
    pub fn detach(&mut self, role: Role) -> Option<P> {
        let mut previous = self.slot_mut(role).take();
        if let Some(ref mut player) = previous {
            player.pause();
        }
        if self.primary.is_none() && self.secondary.is_none() {
            self.state.playing = false;
        }
        self.on_metadata_loaded();
        previous
    }

    /// Exchange the players between roles, handing time authority to the other clip.
    pub fn swap_roles(&mut self) {
        std::mem::swap(&mut self.primary, &mut self.secondary);
        log::info!("Swapped time authority");
        self.on_time_update();
    }

    /// Advance every player's clock by `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        for player in self.players_mut() {
            player.advance(dt);
        }
    }

    /// Drain and dispatch events from both players.
    pub fn pump(&mut self) {
        let primary_events = self
            .primary
            .as_mut()
            .map(|p| p.drain_events())
            .unwrap_or_default();
        let secondary_events = self
            .secondary
            .as_mut()
            .map(|p| p.drain_events())
            .unwrap_or_default();

        for event in primary_events {
            match event {
                PlayerEvent::MetadataLoaded => self.on_metadata_loaded(),
                PlayerEvent::TimeUpdate => {
                    self.on_time_update();
                }
                PlayerEvent::Ended => self.on_primary_ended(),
            }
        }
        if secondary_events.contains(&PlayerEvent::MetadataLoaded) {
            self.on_metadata_loaded();
        }

        // The leading player may have stopped on its own, e.g. at its end.
        let leader = self.primary.as_ref().or(self.secondary.as_ref());
        if self.state.playing && leader.is_some_and(|p| p.is_paused()) {
            log::debug!("Player paused without a command, clearing playing flag");
            self.pause_all();
        }
    }

    /// Recompute duration as the longest reported duration.
    ///
    /// Safe to call any number of times with the same players.
    pub fn on_metadata_loaded(&mut self) {
        let duration = self
            .primary
            .iter()
            .chain(self.secondary.iter())
            .map(|p| p.duration())
            .filter(|d| d.is_finite())
            .fold(0.0_f64, f64::max);
        self.state.duration = duration;
        self.state.current_time = self.state.clamp_time(self.state.current_time);
    }

    /// Take the primary's time as displayed time and correct secondary drift.
    ///
    /// A primary sitting at its own end does not pull a longer secondary
    /// back; the secondary's time is displayed instead, so the tail of the
    /// longer clip stays reachable by scrubbing.
    ///
    /// Returns `true` when the secondary was resynchronized.
    pub fn on_time_update(&mut self) -> bool {
        let Some(primary) = self.primary.as_ref() else {
            return false;
        };
        let t = primary.current_time();
        let t = if t.is_finite() { t } else { 0.0 };
        let primary_duration = primary.duration();
        let primary_at_end = primary_duration.is_finite() && t >= primary_duration;
        self.state.current_time = self.state.clamp_time(t);

        let tolerance = self.drift_tolerance;
        let Some(secondary) = self.secondary.as_mut() else {
            return false;
        };
        let secondary_time = secondary.current_time();
        if primary_at_end && secondary_time > t {
            self.state.current_time = self.state.clamp_time(secondary_time);
            return false;
        }
        let drift = (secondary_time - t).abs();
        if drift > tolerance {
            log::debug!("Drift {:.3}s exceeds {:.3}s, resyncing secondary to {:.3}s", drift, tolerance, t);
            secondary.set_current_time(t);
            true
        } else {
            false
        }
    }

    fn on_primary_ended(&mut self) {
        if let Some(ref mut secondary) = self.secondary {
            secondary.pause();
        }
        self.state.playing = false;
        self.on_time_update();
    }

    fn pause_all(&mut self) {
        for player in self.players_mut() {
            player.pause();
        }
        self.state.playing = false;
    }

    /// Play or pause both players together.
    ///
    /// The playing flag only flips once every present player accepted the
    /// command. If any play request is refused, players that already started
    /// are paused again and the error is returned.
    pub fn toggle_play(&mut self) -> Result<(), PlayError> {
        if self.primary.is_none() && self.secondary.is_none() {
            return Ok(());
        }

        if self.state.playing {
            self.pause_all();
            return Ok(());
        }

        let mut result = Ok(());
        for player in self.players_mut() {
            if let Err(e) = player.play() {
                result = Err(e);
                break;
            }
        }

        match result {
            Ok(()) => {
                self.state.playing = true;
                Ok(())
            }
            Err(e) => {
                log::warn!("Play request refused: {}", e);
                self.pause_all();
                Err(e)
            }
        }
    }

    /// Seek both players to `t`, clamped to `[0, duration]`.
    ///
    /// The displayed time updates immediately without waiting for the seek.
    pub fn scrub(&mut self, t: f64) {
        if self.primary.is_none() && self.secondary.is_none() {
            return;
        }
        let t = self.state.clamp_time(t);
        for player in self.players_mut() {
            player.set_current_time(t);
        }
        self.state.current_time = t;
    }

    /// Scrub relative to the current time.
    pub fn step(&mut self, delta: f64) {
        self.scrub(self.state.current_time + delta);
    }

    /// Set the same playback multiplier on both players.
    pub fn set_rate(&mut self, rate: f64) {
        let rate = clamp_rate(rate);
        for player in self.players_mut() {
            player.set_rate(rate);
        }
        self.state.rate = rate;
    }
}
