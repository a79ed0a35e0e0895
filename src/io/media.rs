// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Media clip loading.
//!
//! A clip is a still image or a directory of image frames played back at a
//! fixed frame rate. Frames are decoded up front into egui images so the UI
//! thread only ever uploads them as textures.

use crate::config::MediaSettings;
use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

/// File extensions accepted as clip frames.
pub const FRAME_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];

/// A decoded clip ready for playback.
#[derive(Debug)]
pub struct Clip {
    pub name: String,
    pub frames: Vec<egui::ColorImage>,
    pub fps: f64,
}

impl Clip {
    /// Length of the clip in seconds.
    pub fn duration(&self) -> f64 {
        if self.fps <= 0.0 {
            return 0.0;
        }
        self.frames.len() as f64 / self.fps
    }

    /// Frame shown at time `t`, clamped to the last frame.
    pub fn frame_index_at(&self, t: f64) -> usize {
        if self.frames.is_empty() || !t.is_finite() || t <= 0.0 {
            return 0;
        }
        let index = (t * self.fps).floor() as usize;
        index.min(self.frames.len() - 1)
    }

    /// Pixel size of the first frame, used for letterboxing.
    pub fn frame_size(&self) -> Option<[usize; 2]> {
        self.frames.first().map(|f| f.size)
    }

    #[cfg(test)]
    pub fn blank(name: &str, frame_count: usize, fps: f64) -> Self {
        Self {
            name: name.to_string(),
            frames: (0..frame_count)
                .map(|_| egui::ColorImage::new([2, 2], egui::Color32::BLACK))
                .collect(),
            fps,
        }
    }
}

fn is_frame_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| FRAME_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// List the frame files in a directory, sorted by file name.
pub fn list_frames(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut frames = Vec::new();
    for entry in std::fs::read_dir(dir).with_context(|| format!("reading {}", dir.display()))? {
        let path = entry?.path();
        if path.is_file() && is_frame_file(&path) {
            frames.push(path);
        }
    }
    frames.sort();
    Ok(frames)
}

/// Decide which files make up the clip selected at `path`.
///
/// A directory yields all of its frames. A file inside a directory holding
/// other frames yields the whole sequence; a lone file is a still clip.
pub fn resolve_frames(path: &Path) -> Result<Vec<PathBuf>> {
    let frames = if path.is_dir() {
        list_frames(path)?
    } else {
        if !is_frame_file(path) {
            bail!("unsupported clip format: {}", path.display());
        }
        match path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => {
                let siblings = list_frames(parent)?;
                if siblings.len() > 1 {
                    siblings
                } else {
                    vec![path.to_path_buf()]
                }
            }
            None => vec![path.to_path_buf()],
        }
    };

    if frames.is_empty() {
        bail!("no image frames found in {}", path.display());
    }
    Ok(frames)
}

fn load_frame(path: &Path) -> Result<egui::ColorImage> {
    let img = image::open(path).with_context(|| format!("decoding {}", path.display()))?;
    let rgba = img.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
}

/// Decoded size of a clip of `frame_count` frames shaped like `first`.
fn decoded_bytes(first: &egui::ColorImage, frame_count: usize) -> u64 {
    let frame_bytes = first.pixels.len() * std::mem::size_of::<egui::Color32>();
    frame_bytes as u64 * frame_count as u64
}

/// Load and decode the clip selected at `path`.
///
/// The first frame is decoded alone to estimate the size of the whole clip;
/// clips larger than `settings.max_clip_megabytes` are refused before the
/// rest is decoded.
pub fn load_clip(path: &Path, settings: &MediaSettings) -> Result<Clip> {
    let fps = settings.sequence_fps;
    if fps.is_nan() || fps <= 0.0 {
        bail!("frame rate must be positive, got {}", fps);
    }
    let files = resolve_frames(path)?;

    let first = load_frame(&files[0])?;
    let estimate = decoded_bytes(&first, files.len());
    let limit = settings.max_clip_megabytes.saturating_mul(1024 * 1024);
    if estimate > limit {
        bail!(
            "clip would need {} MB decoded ({} frames of {}x{}), limit is {} MB",
            estimate / (1024 * 1024),
            files.len(),
            first.size[0],
            first.size[1],
            settings.max_clip_megabytes
        );
    }
    if estimate > limit / 2 {
        log::warn!(
            "Clip at {} decodes to {} MB",
            path.display(),
            estimate / (1024 * 1024)
        );
    }

    let mut frames = Vec::with_capacity(files.len());
    frames.push(first);
    for file in &files[1..] {
        frames.push(load_frame(file)?);
    }

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    log::info!("Decoded clip {} ({} frames at {} fps)", name, frames.len(), fps);
    Ok(Clip { name, frames, fps })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at_fps(sequence_fps: f64) -> MediaSettings {
        MediaSettings {
            sequence_fps,
            ..MediaSettings::default()
        }
    }

    fn write_frame(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
        let path = dir.join(name);
        image::RgbaImage::from_pixel(width, height, image::Rgba([10, 20, 30, 255]))
            .save(&path)
            .unwrap();
        path
    }

    #[test]
    fn test_frame_index_at() {
        let clip = Clip::blank("c", 10, 5.0);
        assert_eq!(clip.duration(), 2.0);
        assert_eq!(clip.frame_index_at(0.0), 0);
        assert_eq!(clip.frame_index_at(0.45), 2);
        assert_eq!(clip.frame_index_at(2.0), 9);
        assert_eq!(clip.frame_index_at(-1.0), 0);
    }

    #[test]
    fn test_load_directory_sequence_in_name_order() {
        let dir = tempfile::tempdir().unwrap();
        write_frame(dir.path(), "frame_002.png", 4, 3);
        write_frame(dir.path(), "frame_001.png", 4, 3);
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let clip = load_clip(dir.path(), &at_fps(2.0)).unwrap();
        assert_eq!(clip.frames.len(), 2);
        assert_eq!(clip.duration(), 1.0);
        assert_eq!(clip.frame_size(), Some([4, 3]));
    }

    #[test]
    fn test_file_in_sequence_loads_whole_sequence() {
        let dir = tempfile::tempdir().unwrap();
        write_frame(dir.path(), "a.png", 2, 2);
        let b = write_frame(dir.path(), "b.png", 2, 2);
        write_frame(dir.path(), "c.png", 2, 2);

        let files = resolve_frames(&b).unwrap();
        assert_eq!(files.len(), 3);
        assert!(files[0].ends_with("a.png"));
    }

    #[test]
    fn test_lone_file_is_still_clip() {
        let dir = tempfile::tempdir().unwrap();
        let only = write_frame(dir.path(), "still.png", 8, 6);
        let clip = load_clip(&only, &at_fps(30.0)).unwrap();
        assert_eq!(clip.frames.len(), 1);
        assert_eq!(clip.name, "still.png");
        assert_eq!(clip.frame_size(), Some([8, 6]));
    }

    #[test]
    fn test_empty_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_clip(dir.path(), &at_fps(30.0)).is_err());
    }

    #[test]
    fn test_unsupported_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("swing.mov");
        std::fs::write(&path, b"not a clip").unwrap();
        assert!(load_clip(&path, &at_fps(30.0)).is_err());
    }

    #[test]
    fn test_oversized_clip_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        for i in 0..3 {
            write_frame(dir.path(), &format!("f{}.png", i), 512, 512);
        }
        // 3 frames of 512x512 RGBA need 3 MB.
        let settings = MediaSettings {
            max_clip_megabytes: 2,
            ..MediaSettings::default()
        };
        let err = load_clip(dir.path(), &settings).unwrap_err();
        assert!(err.to_string().contains("limit is 2 MB"));

        let settings = MediaSettings {
            max_clip_megabytes: 3,
            ..MediaSettings::default()
        };
        assert_eq!(load_clip(dir.path(), &settings).unwrap().frames.len(), 3);
    }

    #[test]
    fn test_invalid_fps_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let only = write_frame(dir.path(), "still.png", 2, 2);
        assert!(load_clip(&only, &at_fps(0.0)).is_err());
    }
}
