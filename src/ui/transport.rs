// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Transport controls.
//!
//! Play/pause, playback rate, and the time scrubber. The bar only reports
//! what the user asked for; the synchronizer applies it.

use crate::models::playback::{PlaybackState, RATE_MAX, RATE_MIN, RATE_STEP};

/// Result of transport interaction.
pub enum TransportAction {
    None,
    TogglePlay,
    SetRate(f64),
    Scrub(f64),
}

/// Display the transport bar for `state`.
pub fn show(ui: &mut egui::Ui, state: &PlaybackState, enabled: bool) -> TransportAction {
    let mut action = TransportAction::None;

    ui.add_enabled_ui(enabled, |ui| {
        ui.horizontal(|ui| {
            let label = if state.playing { "⏸ Pause" } else { "▶ Play" };
            if ui.button(label).clicked() {
                action = TransportAction::TogglePlay;
            }

            ui.separator();

            ui.label("Rate");
            let mut rate = state.rate;
            let rate_response = ui.add(
                egui::Slider::new(&mut rate, RATE_MIN..=RATE_MAX)
                    .step_by(RATE_STEP)
                    .show_value(false),
            );
            if rate_response.changed() {
                action = TransportAction::SetRate(rate);
            }
            ui.monospace(format!("{:.2}x", state.rate));

            ui.separator();

            ui.monospace(format!("{:.2}s", state.current_time));
            let mut time = state.current_time;
            let scrub_width = (ui.available_width() - 70.0).max(80.0);
            ui.spacing_mut().slider_width = scrub_width;
            let scrub_response = ui.add(
                egui::Slider::new(&mut time, 0.0..=state.duration)
                    .step_by(0.01)
                    .show_value(false),
            );
            if scrub_response.changed() {
                action = TransportAction::Scrub(time);
            }
            ui.monospace(format!("{:.2}s", state.duration));
        });
    });

    action
}
