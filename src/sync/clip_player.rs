// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Clock-driven player over a decoded image clip.

use super::player::{MediaPlayer, PlayError, PlayerEvent};
use crate::io::media::Clip;

/// Minimum media time between two progress events while playing.
const TIME_UPDATE_INTERVAL: f64 = 0.05;

/// Plays a [`Clip`] by advancing its own clock each UI frame.
pub struct ClipPlayer {
    clip: Clip,
    current_time: f64,
    rate: f64,
    paused: bool,
    /// Media time at which the last progress event was queued
    last_time_update: f64,
    events: Vec<PlayerEvent>,
}

impl ClipPlayer {
    /// Wrap a loaded clip. The player starts paused at 0 with metadata known.
    pub fn new(clip: Clip) -> Self {
        Self {
            clip,
            current_time: 0.0,
            rate: 1.0,
            paused: true,
            last_time_update: 0.0,
            events: vec![PlayerEvent::MetadataLoaded],
        }
    }

    pub fn clip(&self) -> &Clip {
        &self.clip
    }

    /// Index of the frame shown at the current time.
    pub fn frame_index(&self) -> usize {
        self.clip.frame_index_at(self.current_time)
    }

    fn queue_time_update(&mut self) {
        self.last_time_update = self.current_time;
        self.events.push(PlayerEvent::TimeUpdate);
    }
}

impl MediaPlayer for ClipPlayer {
    fn duration(&self) -> f64 {
        self.clip.duration()
    }

    fn current_time(&self) -> f64 {
        self.current_time
    }

    fn set_current_time(&mut self, t: f64) {
        let t = if t.is_finite() { t } else { 0.0 };
        self.current_time = t.clamp(0.0, self.duration());
        self.queue_time_update();
    }

    fn play(&mut self) -> Result<(), PlayError> {
        let duration = self.duration();
        if duration <= 0.0 {
            return Err(PlayError::NoMedia);
        }
        // Playing an ended clip starts over.
        if self.current_time >= duration {
            self.current_time = 0.0;
            self.queue_time_update();
        }
        self.paused = false;
        Ok(())
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn set_rate(&mut self, rate: f64) {
        self.rate = rate;
    }

    fn rate(&self) -> f64 {
        self.rate
    }

    fn advance(&mut self, dt: f64) {
        if self.paused || dt <= 0.0 {
            return;
        }
        let duration = self.duration();
        self.current_time = (self.current_time + dt * self.rate).min(duration);

        if self.current_time >= duration {
            self.paused = true;
            self.queue_time_update();
            self.events.push(PlayerEvent::Ended);
        } else if (self.current_time - self.last_time_update).abs() >= TIME_UPDATE_INTERVAL {
            self.queue_time_update();
        }
    }

    fn drain_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clip(frames: usize, fps: f64) -> Clip {
        Clip::blank("test", frames, fps)
    }

    #[test]
    fn test_new_player_reports_metadata() {
        let mut player = ClipPlayer::new(clip(30, 30.0));
        assert_eq!(player.drain_events(), vec![PlayerEvent::MetadataLoaded]);
        assert!(player.drain_events().is_empty());
        assert!(player.is_paused());
        assert_eq!(player.duration(), 1.0);
    }

    #[test]
    fn test_advance_respects_rate() {
        let mut player = ClipPlayer::new(clip(60, 30.0));
        player.set_rate(0.5);
        player.play().unwrap();
        player.advance(1.0);
        assert!((player.current_time() - 0.5).abs() < 1e-9);
        assert_eq!(player.frame_index(), 15);
    }

    #[test]
    fn test_paused_player_does_not_advance() {
        let mut player = ClipPlayer::new(clip(60, 30.0));
        player.advance(1.0);
        assert_eq!(player.current_time(), 0.0);
    }

    #[test]
    fn test_time_updates_are_throttled() {
        let mut player = ClipPlayer::new(clip(300, 30.0));
        player.drain_events();
        player.play().unwrap();
        player.advance(0.01);
        assert!(player.drain_events().is_empty());
        player.advance(0.05);
        assert_eq!(player.drain_events(), vec![PlayerEvent::TimeUpdate]);
    }

    #[test]
    fn test_reaching_end_stops_and_restarts_on_play() {
        let mut player = ClipPlayer::new(clip(30, 30.0));
        player.drain_events();
        player.play().unwrap();
        player.advance(2.0);
        assert!(player.is_paused());
        assert_eq!(player.current_time(), 1.0);
        assert_eq!(
            player.drain_events(),
            vec![PlayerEvent::TimeUpdate, PlayerEvent::Ended]
        );
        assert_eq!(player.frame_index(), 29);

        player.play().unwrap();
        assert_eq!(player.current_time(), 0.0);
    }

    #[test]
    fn test_seek_clamps() {
        let mut player = ClipPlayer::new(clip(30, 30.0));
        player.set_current_time(5.0);
        assert_eq!(player.current_time(), 1.0);
        player.set_current_time(-2.0);
        assert_eq!(player.current_time(), 0.0);
    }

    #[test]
    fn test_empty_clip_rejects_play() {
        let mut player = ClipPlayer::new(clip(0, 30.0));
        assert_eq!(player.play(), Err(PlayError::NoMedia));
        assert!(player.is_paused());
    }
}
