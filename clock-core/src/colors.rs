//! Per-depth color cycling.
//!
//! [`compute_colors`] derives one [`Hsva`] entry per recursion depth
//! from the color-time scalar produced by [`crate::angles`]. Three
//! slow sine oscillators with incommensurate frequencies drive hue,
//! saturation and value, so the palette never exactly repeats on
//! human timescales.

use crate::types::Depth;

/// Alpha applied to every non-root palette entry.
///
/// Accent layers are drawn underneath the root layer and must stay
/// semi-transparent so overlapping branches blend instead of occluding.
pub const ACCENT_ALPHA: f32 = 0.5;

/// An HSV color with alpha. All channels are in `[0, 1]`; hue is in
/// `[0, 1)` where `0` and `1` both mean red.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsva {
    pub h: f32,
    pub s: f32,
    pub v: f32,
    pub a: f32,
}

impl Hsva {
    /// Converts to RGBA, each channel in `[0, 1]`.
    pub fn to_rgba(self) -> [f32; 4] {
        let h = self.h.rem_euclid(1.0) * 6.0;
        let c = self.v * self.s;
        let x = c * (1.0 - ((h % 2.0) - 1.0).abs());
        let m = self.v - c;

        let (r, g, b) = if h < 1.0 {
            (c, x, 0.0)
        } else if h < 2.0 {
            (x, c, 0.0)
        } else if h < 3.0 {
            (0.0, c, x)
        } else if h < 4.0 {
            (0.0, x, c)
        } else if h < 5.0 {
            (x, 0.0, c)
        } else {
            (c, 0.0, x)
        };

        [r + m, g + m, b + m, self.a]
    }
}

/// One palette entry per depth, indexed by [`Depth`] (`0` = root hands).
pub type ColorTable = Vec<Hsva>;

/// Computes the palette for one frame.
///
/// Each depth `d` gets a position `a = d / max_depth` along the
/// root-to-leaf axis (`a = 0` at the root). Hue, saturation and value
/// are read off the three oscillators at that position. The root entry
/// is emitted at full saturation, value and opacity and is stroked
/// last; every deeper entry is a semi-transparent accent.
///
/// When `max_depth == 0` the sole entry is the root entry and the
/// `d / max_depth` division is never evaluated.
///
/// ### Parameters
/// - `color_time` - Scalar from [`crate::angles::compute_angles`].
/// - `max_depth` - Deepest recursion level; the table has
///   `max_depth + 1` entries.
///
/// ### Returns
/// A [`ColorTable`] with one entry per depth.
pub fn compute_colors(color_time: f64, max_depth: Depth) -> ColorTable {
    let r1 = (color_time * 0.017).sin() * 0.5 + 0.5;
    let r2 = (color_time * 0.011).sin() * 0.5 + 0.5;
    let r3 = (color_time * 0.003).sin() * 0.5 + 0.5;

    let mut table = Vec::with_capacity(max_depth + 1);
    for depth in 0..=max_depth {
        let a = if max_depth == 0 {
            0.0
        } else {
            depth as f64 / max_depth as f64
        };

        // fract() after the f32 cast keeps the hue strictly below 1.0;
        // casting a f64 fraction could round up to exactly 1.0.
        let h = ((r2 + 0.5 * a) as f32).fract();

        if depth == 0 {
            table.push(Hsva {
                h,
                s: 1.0,
                v: 1.0,
                a: 1.0,
            });
        } else {
            let s = (0.5 + 0.5 * r3 - 0.5 * (1.0 - a)).clamp(0.0, 1.0) as f32;
            let v = (0.3 + 0.5 * r1).clamp(0.0, 1.0) as f32;
            table.push(Hsva {
                h,
                s,
                v,
                a: ACCENT_ALPHA,
            });
        }
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_has_one_entry_per_depth() {
        for max_depth in 1..=12 {
            let table = compute_colors(1234.5, max_depth);
            assert_eq!(table.len(), max_depth + 1);
        }
    }

    #[test]
    fn channels_stay_in_range() {
        // Sample a spread of color times, including large ones.
        for i in 0..200 {
            let color_time = f64::from(i) * 431.7;
            for entry in compute_colors(color_time, 8) {
                assert!((0.0..1.0).contains(&entry.h), "hue out of range: {}", entry.h);
                assert!((0.0..=1.0).contains(&entry.s));
                assert!((0.0..=1.0).contains(&entry.v));
                assert!((0.0..=1.0).contains(&entry.a));
            }
        }
    }

    #[test]
    fn root_entry_is_fully_saturated_and_opaque() {
        let table = compute_colors(77.0, 8);

        assert_eq!(table[0].s, 1.0);
        assert_eq!(table[0].v, 1.0);
        assert_eq!(table[0].a, 1.0);

        for entry in &table[1..] {
            assert_eq!(entry.a, ACCENT_ALPHA);
        }
    }

    #[test]
    fn zero_depth_table_is_a_single_finite_root_entry() {
        let table = compute_colors(3600.0, 0);

        assert_eq!(table.len(), 1);
        assert!(table[0].h.is_finite());
        assert_eq!(table[0].s, 1.0);
        assert_eq!(table[0].v, 1.0);
        assert_eq!(table[0].a, 1.0);
    }

    #[test]
    fn palette_is_deterministic() {
        assert_eq!(compute_colors(99.25, 6), compute_colors(99.25, 6));
    }

    #[test]
    fn hsv_primaries_convert_to_rgb() {
        let red = Hsva { h: 0.0, s: 1.0, v: 1.0, a: 1.0 }.to_rgba();
        assert!((red[0] - 1.0).abs() < 0.01 && red[1].abs() < 0.01 && red[2].abs() < 0.01);

        let green = Hsva { h: 1.0 / 3.0, s: 1.0, v: 1.0, a: 1.0 }.to_rgba();
        assert!(green[0].abs() < 0.01 && (green[1] - 1.0).abs() < 0.01 && green[2].abs() < 0.01);

        let blue = Hsva { h: 2.0 / 3.0, s: 1.0, v: 1.0, a: 1.0 }.to_rgba();
        assert!(blue[0].abs() < 0.01 && blue[1].abs() < 0.01 && (blue[2] - 1.0).abs() < 0.01);
    }

    #[test]
    fn zero_saturation_converts_to_gray() {
        let gray = Hsva { h: 0.42, s: 0.0, v: 0.6, a: 1.0 }.to_rgba();
        assert!((gray[0] - 0.6).abs() < 1e-6);
        assert!((gray[1] - 0.6).abs() < 1e-6);
        assert!((gray[2] - 0.6).abs() < 1e-6);
    }
}
