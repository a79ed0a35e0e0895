// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Overlay display options.
//!
//! This module defines how the two clips are arranged on screen and how the
//! swing-plane guide is configured.

use serde::{Deserialize, Serialize};

/// Smallest swing-plane angle offered by the toolbar, in degrees.
pub const SWING_ANGLE_MIN: f32 = 10.0;
/// Largest swing-plane angle offered by the toolbar, in degrees.
pub const SWING_ANGLE_MAX: f32 = 70.0;

/// How the two clips are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    /// Reference drawn over the user clip in a single frame
    Overlay,
    /// Each clip in its own frame
    SideBySide,
}

/// Caller-supplied display options, read-only to the sync and draw logic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    pub mode: DisplayMode,
    /// Opacity of the reference layer (0.0 to 1.0)
    pub opacity: f32,
    pub show_guides: bool,
    /// Swing-plane angle from horizontal, in degrees
    pub swing_angle_deg: f32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            mode: DisplayMode::Overlay,
            opacity: 0.5,
            show_guides: true,
            swing_angle_deg: 40.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: OverlayConfig = serde_yaml::from_str("mode: side_by_side\nopacity: 0.8\n").unwrap();
        assert_eq!(config.mode, DisplayMode::SideBySide);
        assert_eq!(config.opacity, 0.8);
        assert!(config.show_guides);
        assert_eq!(config.swing_angle_deg, 40.0);
    }
}
