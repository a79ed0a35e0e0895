// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Clip viewer.
//!
//! Lays out one 16:9 frame (overlay mode) or two (side by side), letterboxes
//! each clip inside its frame, and paints the guide canvas on top of the
//! user clip.

use crate::guides::canvas::GuideCanvas;
use crate::models::overlay::{DisplayMode, OverlayConfig};
use egui::{Color32, Rect, Vec2};

const VIEWER_ASPECT: f32 = 16.0 / 9.0;
const FRAME_GAP: f32 = 12.0;
const FRAME_ROUNDING: f32 = 8.0;

/// The frame of one clip ready to paint.
pub struct ClipView<'a> {
    pub texture: &'a egui::TextureHandle,
    pub frame_size: [usize; 2],
}

/// Largest rect of `aspect` that fits in `available`.
pub fn aspect_fit(available: Vec2, aspect: f32) -> Vec2 {
    if available.x <= 0.0 || available.y <= 0.0 || aspect <= 0.0 {
        return Vec2::ZERO;
    }
    if available.x / available.y > aspect {
        Vec2::new(available.y * aspect, available.y)
    } else {
        Vec2::new(available.x, available.x / aspect)
    }
}

/// Rect where content of `content_size` is shown inside `container`,
/// scaled to fit and centered.
pub fn letterbox(container: Rect, content_size: [usize; 2]) -> Rect {
    let [w, h] = content_size;
    if w == 0 || h == 0 {
        return Rect::from_center_size(container.center(), Vec2::ZERO);
    }
    let size = aspect_fit(container.size(), w as f32 / h as f32);
    Rect::from_center_size(container.center(), size)
}

fn paint_frame_background(painter: &egui::Painter, rect: Rect) {
    painter.rect_filled(rect, FRAME_ROUNDING, Color32::BLACK);
    painter.rect_stroke(rect, FRAME_ROUNDING, egui::Stroke::new(1.0, Color32::from_gray(60)));
}

fn paint_clip(painter: &egui::Painter, container: Rect, clip: &ClipView<'_>, opacity: f32) {
    let rect = letterbox(container, clip.frame_size);
    painter.image(
        clip.texture.id(),
        rect,
        Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
        Color32::WHITE.gamma_multiply(opacity.clamp(0.0, 1.0)),
    );
}

fn paint_placeholder(painter: &egui::Painter, container: Rect, text: &str) {
    painter.text(
        container.center(),
        egui::Align2::CENTER_CENTER,
        text,
        egui::FontId::proportional(14.0),
        Color32::from_gray(150),
    );
}

/// Display the viewer. `user` is the time authority clip, `reference` the follower.
pub fn show(
    ui: &mut egui::Ui,
    user: Option<ClipView<'_>>,
    reference: Option<ClipView<'_>>,
    config: &OverlayConfig,
    guides: &mut GuideCanvas,
) {
    let available = ui.available_size();

    match config.mode {
        DisplayMode::Overlay => {
            let size = aspect_fit(available, VIEWER_ASPECT);
            let (container, _) = ui.allocate_exact_size(size, egui::Sense::hover());
            let painter = ui.painter_at(container);
            paint_frame_background(&painter, container);

            if let Some(ref clip) = user {
                paint_clip(&painter, container, clip, 1.0);
            }
            if let Some(ref clip) = reference {
                paint_clip(&painter, container, clip, config.opacity);
            }
            if user.is_none() && reference.is_none() {
                paint_placeholder(&painter, container, "File → Open User Clip... to begin");
            }

            guides.update(container.size(), config.swing_angle_deg, config.show_guides);
            guides.paint(&painter, container);
        }
        DisplayMode::SideBySide => {
            let half = Vec2::new(((available.x - FRAME_GAP) / 2.0).max(0.0), available.y);
            let size = aspect_fit(half, VIEWER_ASPECT);

            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing.x = FRAME_GAP;

                let (left, _) = ui.allocate_exact_size(size, egui::Sense::hover());
                let painter = ui.painter_at(left);
                paint_frame_background(&painter, left);
                match user {
                    Some(ref clip) => paint_clip(&painter, left, clip, 1.0),
                    None => paint_placeholder(&painter, left, "No user clip"),
                }
                guides.update(left.size(), config.swing_angle_deg, config.show_guides);
                guides.paint(&painter, left);

                let (right, _) = ui.allocate_exact_size(size, egui::Sense::hover());
                let painter = ui.painter_at(right);
                paint_frame_background(&painter, right);
                match reference {
                    Some(ref clip) => paint_clip(&painter, right, clip, 1.0),
                    None => paint_placeholder(&painter, right, "No reference clip"),
                }
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2};

    #[test]
    fn test_aspect_fit_wide_space() {
        let size = aspect_fit(vec2(2000.0, 450.0), VIEWER_ASPECT);
        assert!((size - vec2(800.0, 450.0)).length() < 1e-3);
    }

    #[test]
    fn test_aspect_fit_tall_space() {
        let size = aspect_fit(vec2(800.0, 2000.0), VIEWER_ASPECT);
        assert!((size - vec2(800.0, 450.0)).length() < 1e-3);
    }

    #[test]
    fn test_aspect_fit_empty_space() {
        assert_eq!(aspect_fit(vec2(0.0, 100.0), VIEWER_ASPECT), Vec2::ZERO);
    }

    #[test]
    fn test_letterbox_portrait_clip() {
        let container = Rect::from_min_size(pos2(0.0, 0.0), vec2(800.0, 450.0));
        let rect = letterbox(container, [1080, 1920]);
        assert!((rect.height() - 450.0).abs() < 1e-3);
        assert!((rect.width() - 253.125).abs() < 1e-3);
        assert!((rect.center() - container.center()).length() < 1e-3);
    }

    #[test]
    fn test_letterbox_matching_aspect_fills() {
        let container = Rect::from_min_size(pos2(10.0, 20.0), vec2(800.0, 450.0));
        let rect = letterbox(container, [1920, 1080]);
        assert!((rect.min - container.min).length() < 1e-3);
        assert!((rect.max - container.max).length() < 1e-3);
    }

    #[test]
    fn test_letterbox_empty_frame() {
        let container = Rect::from_min_size(pos2(0.0, 0.0), vec2(800.0, 450.0));
        assert_eq!(letterbox(container, [0, 10]).size(), Vec2::ZERO);
    }
}
