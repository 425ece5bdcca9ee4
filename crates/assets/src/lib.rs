#![deny(unsafe_code)]
//! Synthesis entry points and the asset registry for microbe-forge.
//!
//! This crate sits between the drawing crates (`microbe-forge-organisms`,
//! `microbe-forge-tiles`) and the callers that name assets by string. Each
//! entry point runs the full Allocate → Draw → Finalize pipeline and returns
//! a [`RasterImage`]; the canvas never escapes.

pub mod descriptor;

#[cfg(feature = "png")]
pub mod snapshot;

pub use descriptor::{AssetDescriptor, Category};

use microbe_forge_core::{render, render_synthesizer, EngineError, RasterImage, RenderConfig, Rgb};
use microbe_forge_organisms::{compose_medicine, MedicineId, OrganismId};
use microbe_forge_tiles::{generate_tile, TileKind, WorldId};
use tracing::debug;

/// Renders one organism in `color`.
pub fn synthesize_organism(
    id: OrganismId,
    color: Rgb,
    config: &RenderConfig,
) -> Result<RasterImage, EngineError> {
    render_synthesizer(&id, color, config)
}

/// Renders the medicine sprite for `medicine` on top of `organism`.
///
/// The organism is drawn in the average of the two colours before the tint
/// layer and cross go on.
pub fn synthesize_medicine(
    medicine: MedicineId,
    organism: OrganismId,
    organism_color: Rgb,
    medicine_color: Rgb,
    config: &RenderConfig,
) -> Result<RasterImage, EngineError> {
    debug!(medicine = medicine.name(), organism = organism.name(), "rendering medicine");
    render(config, |canvas| {
        compose_medicine(canvas, organism, organism_color, medicine_color)
    })
}

/// Renders a world tile. Fully opaque and identical on every call.
pub fn synthesize_tile(
    world: WorldId,
    kind: TileKind,
    config: &RenderConfig,
) -> Result<RasterImage, EngineError> {
    debug!(
        world = world.number(),
        kind = kind.name(),
        seed = world.noise_seed(),
        "rendering tile"
    );
    render(config, |canvas| generate_tile(canvas, world, kind))
}
