// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Application settings.
//!
//! Settings are read once at startup (and on demand from the File menu) and
//! never written back. Every field has a default, so partial files are fine.

use crate::guides::geometry::{DEFAULT_ANCHOR_HEIGHT_RATIO, DEFAULT_GUIDE_OPACITY};
use crate::io::serialization;
use crate::models::overlay::OverlayConfig;
use crate::sync::synchronizer::DEFAULT_DRIFT_TOLERANCE;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings file looked up in the working directory when none is given.
pub const DEFAULT_SETTINGS_FILE: &str = "swing-compare.yaml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Drift allowed between the players before the reference is seeked
    pub drift_tolerance_secs: f64,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            drift_tolerance_secs: DEFAULT_DRIFT_TOLERANCE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuideSettings {
    /// Height of the swing-plane anchor as a fraction of the canvas height
    pub anchor_height_ratio: f32,
    /// Overall opacity of the guide lines
    pub opacity: f32,
}

impl Default for GuideSettings {
    fn default() -> Self {
        Self {
            anchor_height_ratio: DEFAULT_ANCHOR_HEIGHT_RATIO,
            opacity: DEFAULT_GUIDE_OPACITY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaSettings {
    /// Frame rate assigned to image clips
    pub sequence_fps: f64,
    /// Largest decoded size of one clip, in megabytes
    pub max_clip_megabytes: u64,
}

impl Default for MediaSettings {
    fn default() -> Self {
        Self {
            sequence_fps: 30.0,
            max_clip_megabytes: 2048,
        }
    }
}

/// Complete application settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub playback: PlaybackSettings,
    pub guides: GuideSettings,
    pub overlay: OverlayConfig,
    pub media: MediaSettings,
}

impl Settings {
    /// Load settings from `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let settings = serialization::import_settings(path)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Resolve startup settings: an explicit path must load, the default
    /// file is used only when it exists, otherwise defaults apply.
    pub fn load_startup(explicit: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(&path);
        }
        let default_path = Path::new(DEFAULT_SETTINGS_FILE);
        if default_path.exists() {
            Self::load(default_path)
        } else {
            log::debug!("No settings file, using defaults");
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.playback.drift_tolerance_secs, 0.12);
        assert_eq!(settings.guides.anchor_height_ratio, 0.92);
        assert_eq!(settings.media.sequence_fps, 30.0);
        assert_eq!(settings.media.max_clip_megabytes, 2048);
        assert_eq!(settings.overlay, OverlayConfig::default());
    }

    #[test]
    fn test_explicit_missing_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.yaml");
        assert!(Settings::load_startup(Some(missing)).is_err());
    }

    #[test]
    fn test_explicit_path_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("s.yml");
        std::fs::write(&path, "guides:\n  anchor_height_ratio: 0.8\n").unwrap();
        let settings = Settings::load_startup(Some(path)).unwrap();
        assert_eq!(settings.guides.anchor_height_ratio, 0.8);
        assert_eq!(settings.guides.opacity, 0.9);
    }
}
