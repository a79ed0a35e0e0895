// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Toolbar with overlay options.
//!
//! This module provides the toolbar for choosing the display mode, reference
//! opacity, and swing-plane guide settings.

use crate::models::overlay::{DisplayMode, OverlayConfig, SWING_ANGLE_MAX, SWING_ANGLE_MIN};

/// Result of toolbar interaction.
pub enum ToolbarAction {
    None,
    SwapClips,
}

/// Display the toolbar, editing `config` in place.
pub fn show(ui: &mut egui::Ui, config: &mut OverlayConfig, can_swap: bool) -> ToolbarAction {
    let mut action = ToolbarAction::None;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        ui.label("View:");

        if ui
            .selectable_label(config.mode == DisplayMode::Overlay, "◫ Overlay")
            .clicked()
        {
            config.mode = DisplayMode::Overlay;
        }

        if ui
            .selectable_label(config.mode == DisplayMode::SideBySide, "◧ Side by side")
            .clicked()
        {
            config.mode = DisplayMode::SideBySide;
        }

        ui.separator();

        ui.add_enabled_ui(config.mode == DisplayMode::Overlay, |ui| {
            ui.label("Reference opacity");
            ui.add(egui::Slider::new(&mut config.opacity, 0.0..=1.0).step_by(0.01));
        });

        ui.separator();

        ui.checkbox(&mut config.show_guides, "Guides");
        ui.add_enabled_ui(config.show_guides, |ui| {
            ui.label("Swing angle");
            ui.add(
                egui::Slider::new(&mut config.swing_angle_deg, SWING_ANGLE_MIN..=SWING_ANGLE_MAX)
                    .step_by(1.0)
                    .suffix("°"),
            );
        });

        ui.separator();

        if ui
            .add_enabled(can_swap, egui::Button::new("⇄ Swap clips"))
            .on_hover_text("Make the reference clip the time authority")
            .clicked()
        {
            action = ToolbarAction::SwapClips;
        }
    });

    action
}
