// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric layout of the swing guides.
//!
//! All positions are in canvas-local pixels with the origin at the top-left
//! and Y growing downward.

use egui::{pos2, Pos2, Vec2};

/// Default anchor (ball) height as a fraction of canvas height.
pub const DEFAULT_ANCHOR_HEIGHT_RATIO: f32 = 0.92;
/// Default overall guide opacity.
pub const DEFAULT_GUIDE_OPACITY: f32 = 0.9;

/// Number of overlapping strokes used to fake a soft glow.
pub const GLOW_PASSES: u32 = 4;

/// One stroke of a layered glow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlowPass {
    pub width: f32,
    /// Alpha in 0.0 to 1.0
    pub alpha: f32,
}

/// Everything needed to draw the guides at one canvas size.
#[derive(Debug, Clone, PartialEq)]
pub struct GuideGeometry {
    pub center_top: Pos2,
    pub center_bottom: Pos2,
    /// Ball position the swing plane is anchored to
    pub anchor: Pos2,
    /// Far end of the swing-plane ray
    pub swing_end: Pos2,
    pub marker_radius: f32,
    /// Strokes ordered outermost first
    pub passes: Vec<GlowPass>,
}

/// Base stroke width for a canvas `width` pixels wide.
fn base_stroke_width(width: f32) -> f32 {
    (width * 0.003).round().max(2.0)
}

/// Glow strokes, outermost (widest, faintest) first.
pub fn glow_passes(width: f32, opacity: f32) -> Vec<GlowPass> {
    let base = base_stroke_width(width);
    (1..=GLOW_PASSES)
        .rev()
        .map(|i| GlowPass {
            width: base + i as f32,
            alpha: opacity * (0.15 + (GLOW_PASSES + 1 - i) as f32 * 0.12),
        })
        .collect()
}

/// End point of a ray from `anchor` at `angle_deg` above horizontal.
pub fn swing_plane_end(anchor: Pos2, angle_deg: f32, length: f32) -> Pos2 {
    // Screen Y points down, so the angle is negated.
    let rad = -angle_deg.to_radians();
    pos2(anchor.x + rad.cos() * length, anchor.y + rad.sin() * length)
}

/// Lay out the guides for a canvas of `size` pixels.
///
/// Returns `None` for a canvas with no area.
pub fn compute(size: Vec2, angle_deg: f32, anchor_ratio: f32, opacity: f32) -> Option<GuideGeometry> {
    let (width, height) = (size.x, size.y);
    if !(width > 0.0 && height > 0.0) {
        return None;
    }

    let cx = width * 0.5;
    let anchor = pos2(cx, height * anchor_ratio);
    let diagonal = width.hypot(height);

    Some(GuideGeometry {
        center_top: pos2(cx, 0.0),
        center_bottom: pos2(cx, height),
        anchor,
        swing_end: swing_plane_end(anchor, angle_deg, diagonal),
        marker_radius: (width * 0.008).max(3.0),
        passes: glow_passes(width, opacity),
    })
}
