#![deny(unsafe_code)]
//! World-themed floor and wall tiles for microbe-forge.
//!
//! Each [`WorldId`] carries a [`TileTheme`]. [`generate_tile`] paints an
//! opaque tile: empty floors get a groove, a low-alpha motif and seeded
//! grain; walls get the world's structural detail.

pub mod pattern;
pub mod theme;

pub use pattern::{apply_grain, generate_tile};
pub use theme::{TileKind, TileTheme, WorldId};
