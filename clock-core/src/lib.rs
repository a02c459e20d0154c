//! Core fractal-clock geometry and color library.
//!
//! Main components:
//! - [`angles`] — wall-clock time to hand angles and the color-time scalar.
//! - [`colors`] — per-depth color cycling from the color-time scalar.
//! - [`config`] — clock configuration and raw preference decoding.
//! - [`fractal`] — recursive hand-tree geometry as per-depth segment layers.
//! - [`frame`] — high-level per-frame pipeline and draw-pass ordering.
//! - [`types`] — shared type aliases.

pub mod angles;
pub mod colors;
pub mod config;
pub mod fractal;
pub mod frame;
pub mod types;
