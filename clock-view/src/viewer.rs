//! Interactive fractal clock viewer built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns the clock configuration
//! and camera state and implements [`eframe::App`] to recompute and
//! draw the fractal every frame from the system wall clock.

use chrono::Timelike;
use clock_core::angles::{ClockTime, Hand, HandAngles};
use clock_core::config::{ClockConfig, FractalVariant};
use clock_core::frame::{FaceLayout, compose_frame};
use eframe::App;
use glam::DVec2;

/// Background fill behind the clock face.
const FACE_FILL: egui::Color32 = egui::Color32::from_gray(26);

/// Neutral color of the primary hands drawn on top of the fractal.
const BASE_HAND_COLOR: egui::Color32 = egui::Color32::from_gray(179);

/// Primary-hand stroke widths, as fractions of the face width.
const SECOND_HAND_WIDTH: f64 = 0.008;
const MINUTE_HAND_WIDTH: f64 = 0.019;
const HOUR_HAND_WIDTH: f64 = 0.0417;

/// Stroke width of the fractal accent layers, in pixels.
const ACCENT_STROKE_WIDTH: f32 = 1.0;

const DEFAULT_ZOOM: f32 = 0.35;

/// Samples the system wall clock once, with subsecond resolution.
fn sample_wall_clock() -> ClockTime {
    let now = chrono::Local::now();
    ClockTime::from_hms_nanos(now.hour(), now.minute(), now.second(), now.nanosecond())
}

/// The primary hands overlaid in the neutral color, in stroke order.
///
/// The second hand overlay is dropped when seconds are hidden; the
/// fractal underneath is unaffected (that is governed by the variant).
fn overlay_hands(show_seconds: bool) -> &'static [Hand] {
    if show_seconds {
        &[Hand::Second, Hand::Minute, Hand::Hour]
    } else {
        &[Hand::Minute, Hand::Hour]
    }
}

/// Stroke width for one primary hand, as a fraction of the face width.
fn base_hand_width(hand: Hand) -> f64 {
    match hand {
        Hand::Second => SECOND_HAND_WIDTH,
        Hand::Minute => MINUTE_HAND_WIDTH,
        Hand::Hour => HOUR_HAND_WIDTH,
    }
}

/// Converts a core color to an egui color.
fn to_color32(color: clock_core::colors::Hsva) -> egui::Color32 {
    let [r, g, b, a] = color.to_rgba();
    egui::Color32::from_rgba_unmultiplied(
        (r * 255.0).round() as u8,
        (g * 255.0).round() as u8,
        (b * 255.0).round() as u8,
        (a * 255.0).round() as u8,
    )
}

/// Main application state for the interactive viewer.
///
/// [`Viewer`] glues together:
/// - The core pipeline: [`ClockConfig`], [`FaceLayout`],
///   [`compose_frame`].
/// - UI state (pan/zoom, freeze).
/// - eframe/egui callbacks for drawing and user interaction.
///
/// The per-frame update is:
/// 1. Handle UI interactions / input.
/// 2. Sample the wall clock (or reuse the held sample when frozen).
/// 3. Recompute the frame geometry and stroke it back-to-front,
///    ending with the neutral primary hands on top.
///
/// ### Fields
/// - `cfg` - Clock configuration (depth, variant, seconds flag);
///   edited through the side panel, read by the core each frame.
/// - `face` - Clock center and arm proportions in world units.
///
/// - `zoom` - Face width as a fraction of the smaller viewport side.
/// - `pan` - Screen-space pan offset in pixels.
///
/// - `held_time` - The wall-clock sample held while frozen.
/// - `last_time` - Sample used for the most recent frame (status bar).
/// - `last_segments` - Segment count of the most recent frame.
pub struct Viewer {
    cfg: ClockConfig,
    face: FaceLayout,

    zoom: f32,
    pan: egui::Vec2,

    held_time: Option<ClockTime>,
    last_time: ClockTime,
    last_segments: usize,
}

impl Viewer {
    /// Creates a viewer with the default configuration and camera.
    pub fn new() -> Self {
        Self {
            cfg: ClockConfig::default(),
            face: FaceLayout::default(),
            zoom: DEFAULT_ZOOM,
            pan: egui::vec2(0.0, 0.0),
            held_time: None,
            last_time: sample_wall_clock(),
            last_segments: 0,
        }
    }

    /// The wall-clock sample for this frame.
    ///
    /// Returns the held sample while frozen, otherwise a fresh one.
    fn current_time(&self) -> ClockTime {
        self.held_time.unwrap_or_else(sample_wall_clock)
    }

    /// Whether the clock is frozen on a held sample.
    fn frozen(&self) -> bool {
        self.held_time.is_some()
    }

    /// Scale from world units (face widths) to pixels.
    fn face_scale(&self, rect: egui::Rect) -> f32 {
        self.zoom * rect.width().min(rect.height())
    }

    /// Converts a world-space position to screen-space.
    ///
    /// World coordinates are scaled by [`Viewer::face_scale`], offset
    /// by `pan`, and centered inside the given `rect`. The y-axis is
    /// flipped so 12 o'clock points up on screen.
    fn world_to_screen(&self, p: DVec2, rect: egui::Rect) -> egui::Pos2 {
        let center = rect.center();
        let s = self.face_scale(rect);
        egui::pos2(
            center.x + p.x as f32 * s + self.pan.x,
            center.y - p.y as f32 * s + self.pan.y,
        )
    }

    /// Converts a screen-space position back to world-space.
    ///
    /// The inverse of [`Viewer::world_to_screen`] up to floating point
    /// rounding, using the same scale, `pan`, and `rect` center.
    fn screen_to_world(&self, p: egui::Pos2, rect: egui::Rect) -> DVec2 {
        let center = rect.center();
        let s = self.face_scale(rect);
        let x = (p.x - center.x - self.pan.x) / s;
        let y = (center.y - p.y + self.pan.y) / s;
        DVec2::new(f64::from(x), f64::from(y))
    }

    /// Builds the top panel UI (freeze control, camera).
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui
                    .button(if self.frozen() { "▶ Resume" } else { "⏸ Freeze" })
                    .clicked()
                {
                    self.held_time = if self.frozen() {
                        None
                    } else {
                        Some(sample_wall_clock())
                    };
                }

                if ui.button("Reset view").clicked() {
                    self.zoom = DEFAULT_ZOOM;
                    self.pan = egui::vec2(0.0, 0.0);
                }

                ui.separator();
                ui.add(egui::Slider::new(&mut self.zoom, 0.05..=2.0).text("Zoom"));
            });
        });
    }

    /// Builds the bottom status bar (time, depth, segment count).
    fn ui_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!("segments = {}", self.last_segments));
                ui.label(format!("depth = {}", self.cfg.max_depth));
                ui.separator();
                ui.label(format!(
                    "{:02}:{:02}:{:02}",
                    self.last_time.hour, self.last_time.minute, self.last_time.second
                ));
                if self.frozen() {
                    ui.label("(frozen)");
                }
            });
        });
    }

    /// Builds the right-hand configuration panel.
    fn ui_config_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("config_panel")
            .resizable(true)
            .default_width(220.0)
            .show(ctx, |ui| {
                ui.heading("Clock");

                ui.separator();
                ui.label("Recursion depth");
                ui.add(egui::Slider::new(&mut self.cfg.max_depth, 1..=12));

                ui.separator();
                ui.label("Fractal hands");
                ui.radio_value(&mut self.cfg.variant, FractalVariant::All, "All hands");
                ui.radio_value(
                    &mut self.cfg.variant,
                    FractalVariant::NoSecond,
                    "No second hand",
                );
                ui.radio_value(
                    &mut self.cfg.variant,
                    FractalVariant::NoHour,
                    "No hour hand",
                );

                ui.separator();
                ui.checkbox(&mut self.cfg.show_seconds, "Show seconds");

                ui.separator();
                if ui.button("Reset to defaults").clicked() {
                    log::debug!("config reset to defaults");
                    self.cfg = ClockConfig::default();
                }
            });
    }

    /// Strokes the primary hands in the neutral color, on top of the
    /// fractal accents.
    fn draw_base_hands(&self, painter: &egui::Painter, rect: egui::Rect, angles: &HandAngles) {
        let scale = self.face_scale(rect);
        let center = self.world_to_screen(self.face.center, rect);

        for &hand in overlay_hands(self.cfg.show_seconds) {
            let angle = angles.of(hand);
            let tip = self.face.center
                + DVec2::new(angle.sin(), angle.cos()) * self.face.arms.of(hand);
            let width = base_hand_width(hand) as f32 * scale;

            painter.line_segment(
                [center, self.world_to_screen(tip, rect)],
                egui::Stroke::new(width, BASE_HAND_COLOR),
            );
        }
    }

    /// Builds the central panel where the clock is drawn and the
    /// camera is controlled.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let response = ui.allocate_response(ui.available_size(), egui::Sense::click_and_drag());
            let rect = response.rect;
            let painter = ui.painter_at(rect);

            painter.rect_filled(rect, egui::CornerRadius::ZERO, FACE_FILL);

            // Pan with drag.
            if response.dragged() {
                let delta = response.drag_delta();
                self.pan += delta;
            }

            // Zoom around the mouse cursor.
            let scroll = ui.ctx().input(|i| i.raw_scroll_delta.y);
            if scroll != 0.0 {
                let pointer_screen = response.hover_pos().unwrap_or(rect.center());

                let world_before = self.screen_to_world(pointer_screen, rect);

                let factor = (1.0 + scroll * 0.001).clamp(0.5, 2.0);
                self.zoom = (self.zoom * factor).clamp(0.05, 2.0);

                let screen_after = self.world_to_screen(world_before, rect);

                let delta = pointer_screen - screen_after;
                self.pan += delta;
            }

            // Recompute the whole frame from one wall-clock sample.
            let time = self.current_time();
            let geometry = compose_frame(time, &self.cfg, &self.face);
            self.last_time = time;
            self.last_segments = geometry.segments.total_segments();

            // Fractal accent layers, deepest first, root layer last.
            for (_depth, color, segments) in geometry.draw_passes() {
                let stroke = egui::Stroke::new(ACCENT_STROKE_WIDTH, to_color32(color));
                for seg in segments {
                    painter.line_segment(
                        [
                            self.world_to_screen(seg.start, rect),
                            self.world_to_screen(seg.end, rect),
                        ],
                        stroke,
                    );
                }
            }

            // Neutral primary hands on top of all fractal accents.
            self.draw_base_hands(&painter, rect, &geometry.angles);

            if !self.frozen() {
                ctx.request_repaint();
            }
        });
    }
}

impl App for Viewer {
    /// eframe callback that builds all UI panels for each frame.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui_top_panel(ctx);
        self.ui_status_bar(ctx);
        self.ui_config_panel(ctx);
        self.ui_central_panel(ctx);
    }
}
