//! High-level per-frame pipeline.
//!
//! The per-frame update is:
//! 1. [`crate::angles::compute_angles`] — sample time to hand angles
//!    and the color-time scalar.
//! 2. [`crate::colors::compute_colors`] — one palette entry per depth.
//! 3. [`crate::fractal::generate`] — one segment layer per depth.
//!
//! [`compose_frame`] runs the whole pipeline; the resulting
//! [`FrameGeometry`] hands the renderer its draw passes in
//! back-to-front order.

use crate::angles::{ClockTime, HandAngles, compute_angles};
use crate::colors::{ColorTable, Hsva, compute_colors};
use crate::config::{ClockConfig, MAX_DEPTH_LIMIT};
use crate::fractal::{ArmLengths, LENGTH_DECAY, Segment, SegmentTree, generate};
use crate::types::Depth;
use glam::DVec2;

/// Geometric layout of the clock face, in world units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceLayout {
    pub center: DVec2,
    pub arms: ArmLengths,
    pub decay: f64,
}

impl Default for FaceLayout {
    fn default() -> Self {
        Self {
            center: DVec2::ZERO,
            arms: ArmLengths::CLASSIC,
            decay: LENGTH_DECAY,
        }
    }
}

/// Everything the renderer needs for one frame.
#[derive(Clone, Debug)]
pub struct FrameGeometry {
    pub angles: HandAngles,
    pub color_time: f64,
    pub colors: ColorTable,
    pub segments: SegmentTree,
}

impl FrameGeometry {
    /// Draw passes in stroke order: the deepest accent layer first,
    /// the root layer (full opacity) last, on top of all accents.
    pub fn draw_passes(&self) -> impl Iterator<Item = (Depth, Hsva, &[Segment])> {
        (0..self.segments.depth_count())
            .rev()
            .map(|d| (d, self.colors[d], self.segments.layer(d)))
    }
}

/// Recomputes the full frame geometry from one wall-clock sample.
///
/// Pure and deterministic: nothing is carried over between frames
/// except `cfg`, which the host may only change between calls. The
/// configured depth is clamped once here so the palette and the
/// segment tree always agree on the layer count.
///
/// ### Parameters
/// - `time` - The wall-clock sample for this frame.
/// - `cfg` - Read-only configuration (depth, variant, seconds flag).
/// - `face` - Clock center and arm proportions in world units.
///
/// ### Returns
/// A [`FrameGeometry`] with `max_depth + 1` colors and segment layers.
pub fn compose_frame(time: ClockTime, cfg: &ClockConfig, face: &FaceLayout) -> FrameGeometry {
    let max_depth = cfg.max_depth.min(MAX_DEPTH_LIMIT);

    let (angles, color_time) = compute_angles(time, cfg.show_seconds);
    let colors = compute_colors(color_time, max_depth);
    let segments = generate(
        &angles,
        cfg.variant,
        max_depth,
        face.center,
        face.arms,
        face.decay,
    );

    FrameGeometry {
        angles,
        color_time,
        colors,
        segments,
    }
}
