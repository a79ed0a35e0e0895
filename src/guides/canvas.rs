// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Guide canvas sized to its container.
//!
//! The canvas keeps a list of shapes in canvas-local coordinates. Every redraw
//! clears and rebuilds the full list; nothing is patched incrementally.

use super::geometry::{self, GuideGeometry};
use egui::{Color32, Pos2, Rect, Shape, Stroke, Vec2};

/// Centerline color (white).
const CENTERLINE_RGB: [u8; 3] = [255, 255, 255];
/// Swing-plane color (cyan).
const SWING_PLANE_RGB: [u8; 3] = [0, 200, 255];

fn glow_color(rgb: [u8; 3], alpha: f32) -> Color32 {
    let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(rgb[0], rgb[1], rgb[2], a)
}

/// Inputs that determine what the canvas shows.
#[derive(Debug, Clone, Copy, PartialEq)]
struct DrawKey {
    size: Vec2,
    angle_deg: f32,
    visible: bool,
}

/// Overlay canvas for the centerline, swing plane, and ball marker.
pub struct GuideCanvas {
    /// Canvas size in whole pixels
    size: Vec2,
    anchor_ratio: f32,
    opacity: f32,
    shapes: Vec<Shape>,
    last_drawn: Option<DrawKey>,
    redraws: u64,
}

impl GuideCanvas {
    pub fn new(anchor_ratio: f32, opacity: f32) -> Self {
        Self {
            size: Vec2::ZERO,
            anchor_ratio,
            opacity,
            shapes: Vec::new(),
            last_drawn: None,
            redraws: 0,
        }
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Number of full redraws performed so far.
    pub fn redraw_count(&self) -> u64 {
        self.redraws
    }

    /// Change the anchor height and opacity, forcing a redraw on next update.
    pub fn set_style(&mut self, anchor_ratio: f32, opacity: f32) {
        self.anchor_ratio = anchor_ratio;
        self.opacity = opacity;
        self.last_drawn = None;
    }

    /// Match the canvas to its container and redraw if anything changed.
    ///
    /// Container sizes are floored to whole pixels; negative or non-finite
    /// sizes are treated as empty. Returns `true` when a redraw happened.
    pub fn update(&mut self, container: Vec2, angle_deg: f32, visible: bool) -> bool {
        let floor = |v: f32| if v.is_finite() { v.floor().max(0.0) } else { 0.0 };
        self.size = Vec2::new(floor(container.x), floor(container.y));

        let key = DrawKey {
            size: self.size,
            angle_deg,
            visible,
        };
        if self.last_drawn == Some(key) {
            return false;
        }
        self.redraw(angle_deg, visible);
        self.last_drawn = Some(key);
        true
    }

    /// Clear and rebuild every shape at the current size.
    pub fn redraw(&mut self, angle_deg: f32, visible: bool) {
        self.shapes.clear();
        self.redraws += 1;
        if !visible {
            return;
        }
        match geometry::compute(self.size, angle_deg, self.anchor_ratio, self.opacity) {
            Some(geometry) => self.push_guides(&geometry),
            None => log::debug!("Guide canvas has no area, drawing nothing"),
        }
        log::debug!(
            "Redrew guides at {}x{} ({} shapes)",
            self.size.x,
            self.size.y,
            self.shapes.len()
        );
    }

    fn push_glow_line(&mut self, from: Pos2, to: Pos2, rgb: [u8; 3], geometry: &GuideGeometry) {
        for pass in &geometry.passes {
            self.shapes.push(Shape::line_segment(
                [from, to],
                Stroke::new(pass.width, glow_color(rgb, pass.alpha)),
            ));
        }
    }

    fn push_guides(&mut self, geometry: &GuideGeometry) {
        self.push_glow_line(geometry.center_top, geometry.center_bottom, CENTERLINE_RGB, geometry);
        self.push_glow_line(geometry.anchor, geometry.swing_end, SWING_PLANE_RGB, geometry);
        self.shapes.push(Shape::circle_filled(
            geometry.anchor,
            geometry.marker_radius,
            glow_color(CENTERLINE_RGB, 0.9),
        ));
    }

    /// Paint the current shapes into `rect`, clipped to it.
    pub fn paint(&self, painter: &egui::Painter, rect: Rect) {
        let painter = painter.with_clip_rect(rect);
        let offset = rect.min.to_vec2();
        painter.extend(self.shapes.iter().cloned().map(|mut shape| {
            shape.translate(offset);
            shape
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guides::geometry::GLOW_PASSES;
    use egui::vec2;

    fn canvas() -> GuideCanvas {
        GuideCanvas::new(0.92, 0.9)
    }

    const SHAPES_PER_DRAW: usize = 2 * GLOW_PASSES as usize + 1;

    #[test]
    fn test_zero_then_full_size() {
        let mut canvas = canvas();
        assert!(canvas.update(vec2(0.0, 0.0), 40.0, true));
        assert!(canvas.shapes().is_empty());

        assert!(canvas.update(vec2(800.0, 450.0), 40.0, true));
        assert_eq!(canvas.size(), vec2(800.0, 450.0));
        assert_eq!(canvas.shapes().len(), SHAPES_PER_DRAW);
    }

    #[test]
    fn test_fractional_container_is_floored() {
        let mut canvas = canvas();
        canvas.update(vec2(640.7, 360.2), 40.0, true);
        assert_eq!(canvas.size(), vec2(640.0, 360.0));
    }

    #[test]
    fn test_negative_container_is_empty() {
        let mut canvas = canvas();
        canvas.update(vec2(-5.0, f32::INFINITY), 40.0, true);
        assert_eq!(canvas.size(), Vec2::ZERO);
        assert!(canvas.shapes().is_empty());
    }

    #[test]
    fn test_unchanged_inputs_skip_redraw() {
        let mut canvas = canvas();
        assert!(canvas.update(vec2(800.0, 450.0), 40.0, true));
        assert!(!canvas.update(vec2(800.4, 450.9), 40.0, true));
        assert_eq!(canvas.redraw_count(), 1);
    }

    #[test]
    fn test_angle_and_visibility_changes_redraw() {
        let mut canvas = canvas();
        canvas.update(vec2(800.0, 450.0), 40.0, true);
        assert!(canvas.update(vec2(800.0, 450.0), 55.0, true));
        assert!(canvas.update(vec2(800.0, 450.0), 55.0, false));
        assert!(canvas.shapes().is_empty());
        assert!(canvas.update(vec2(800.0, 450.0), 55.0, true));
        assert_eq!(canvas.shapes().len(), SHAPES_PER_DRAW);
        assert_eq!(canvas.redraw_count(), 4);
    }

    #[test]
    fn test_redraw_replaces_rather_than_accumulates() {
        let mut canvas = canvas();
        canvas.update(vec2(800.0, 450.0), 40.0, true);
        canvas.redraw(40.0, true);
        canvas.redraw(40.0, true);
        assert_eq!(canvas.shapes().len(), SHAPES_PER_DRAW);
    }

    #[test]
    fn test_style_change_forces_redraw() {
        let mut canvas = canvas();
        canvas.update(vec2(800.0, 450.0), 40.0, true);
        canvas.set_style(0.5, 1.0);
        assert!(canvas.update(vec2(800.0, 450.0), 40.0, true));
    }

    #[test]
    fn test_glow_color_alpha() {
        assert_eq!(glow_color([0, 200, 255], 1.0).a(), 255);
        assert_eq!(glow_color([0, 200, 255], 0.0).a(), 0);
        assert_eq!(glow_color([0, 200, 255], 2.0).a(), 255);
    }
}
