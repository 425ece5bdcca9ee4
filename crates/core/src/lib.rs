#![deny(unsafe_code)]
//! Core raster types for the microbe-forge sprite and tile synthesizer.
//!
//! Provides the `Canvas` drawing surface and its scan-converted primitives,
//! the `Rgb` colour model, the glow renderer and Gaussian blur, the Lanczos
//! `finalize` step, `RasterImage`, the `Xorshift64` PRNG, `RenderConfig`,
//! and the `Synthesizer` trait with its render pipeline.

pub mod blur;
pub mod canvas;
pub mod color;
pub mod config;
pub mod error;
pub mod finalize;
pub mod glow;
pub mod prng;
pub mod raster;
pub mod scan;
pub mod synth;

pub use canvas::Canvas;
pub use color::{average, blend, darken, lighten, tint, Rgb, Rgba};
pub use config::{RenderConfig, DESIGN_SIZE};
pub use error::EngineError;
pub use finalize::finalize;
pub use glow::draw_glow;
pub use prng::Xorshift64;
pub use raster::RasterImage;
pub use synth::{render, render_synthesizer, Synthesizer};
