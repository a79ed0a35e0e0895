// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Settings file deserialization.
//!
//! This module handles importing application settings in YAML and JSON
//! formats, chosen by file extension.

use crate::config::Settings;
use anyhow::{bail, Result};
use std::path::Path;

/// Import settings from YAML format.
pub fn import_yaml(path: &Path) -> Result<Settings> {
    let yaml = std::fs::read_to_string(path)?;
    let data = serde_yaml::from_str(&yaml)?;
    Ok(data)
}

/// Import settings from JSON format.
pub fn import_json(path: &Path) -> Result<Settings> {
    let json = std::fs::read_to_string(path)?;
    let data = serde_json::from_str(&json)?;
    Ok(data)
}

/// Import settings, picking the format from the file extension.
pub fn import_settings(path: &Path) -> Result<Settings> {
    let extension = path.extension().and_then(|s| s.to_str());
    match extension {
        Some("yaml") | Some("yml") => import_yaml(path),
        Some("json") => import_json(path),
        _ => bail!("Unsupported settings file extension: {:?}", extension),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::overlay::DisplayMode;

    #[test]
    fn test_import_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.yaml");
        std::fs::write(
            &path,
            "playback:\n  drift_tolerance_secs: 0.2\noverlay:\n  mode: side_by_side\n",
        )
        .unwrap();

        let settings = import_settings(&path).unwrap();
        assert_eq!(settings.playback.drift_tolerance_secs, 0.2);
        assert_eq!(settings.overlay.mode, DisplayMode::SideBySide);
        assert_eq!(settings.guides.anchor_height_ratio, 0.92);
    }

    #[test]
    fn test_import_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"media": {"sequence_fps": 60.0}}"#).unwrap();

        let settings = import_settings(&path).unwrap();
        assert_eq!(settings.media.sequence_fps, 60.0);
        assert_eq!(settings.playback.drift_tolerance_secs, 0.12);
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "").unwrap();
        assert!(import_settings(&path).is_err());
    }
}
