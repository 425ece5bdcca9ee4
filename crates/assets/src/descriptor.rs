//! String-addressable asset registry.
//!
//! Asset names follow the output file names: organisms and medicines by their
//! lowercase id (`"coccus"`, `"penicillin"`), tiles as `tile_<kind>_w<n>`
//! (`"tile_empty_w1"`, `"tile_wall_w4"`).

use std::fmt;

use microbe_forge_core::{EngineError, RasterImage, RenderConfig};
use microbe_forge_organisms::{MedicineId, OrganismId};
use microbe_forge_tiles::{TileKind, WorldId};
use serde::{Deserialize, Serialize};

use crate::{synthesize_medicine, synthesize_organism, synthesize_tile};

/// Output directory an asset belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Germs,
    Tiles,
}

impl Category {
    pub fn dir_name(self) -> &'static str {
        match self {
            Category::Germs => "germs",
            Category::Tiles => "tiles",
        }
    }
}

/// One renderable asset with everything needed to synthesize it.
///
/// Organisms and medicines use their table colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AssetDescriptor {
    Organism { id: OrganismId },
    Medicine { id: MedicineId },
    Tile { world: WorldId, tile: TileKind },
}

impl AssetDescriptor {
    /// Parses an asset name.
    ///
    /// Returns `EngineError::UnknownAssetId` for anything not in the catalog.
    pub fn from_name(name: &str) -> Result<Self, EngineError> {
        if let Ok(id) = OrganismId::from_name(name) {
            return Ok(AssetDescriptor::Organism { id });
        }
        if let Ok(id) = MedicineId::from_name(name) {
            return Ok(AssetDescriptor::Medicine { id });
        }
        parse_tile(name)
            .map(|(world, tile)| AssetDescriptor::Tile { world, tile })
            .ok_or_else(|| EngineError::UnknownAssetId(name.to_owned()))
    }

    /// Every default asset: nine organisms, nine medicines, then the empty
    /// and wall tile of each world.
    pub fn catalog() -> Vec<AssetDescriptor> {
        let organisms = OrganismId::ALL
            .into_iter()
            .map(|id| AssetDescriptor::Organism { id });
        let medicines = MedicineId::ALL
            .into_iter()
            .map(|id| AssetDescriptor::Medicine { id });
        let tiles = WorldId::ALL.into_iter().flat_map(|world| {
            TileKind::ALL
                .into_iter()
                .map(move |tile| AssetDescriptor::Tile { world, tile })
        });
        organisms.chain(medicines).chain(tiles).collect()
    }

    pub fn name(&self) -> String {
        match self {
            AssetDescriptor::Organism { id } => id.name().to_owned(),
            AssetDescriptor::Medicine { id } => id.name().to_owned(),
            AssetDescriptor::Tile { world, tile } => format!("tile_{}_{world}", tile.name()),
        }
    }

    pub fn category(&self) -> Category {
        match self {
            AssetDescriptor::Organism { .. } | AssetDescriptor::Medicine { .. } => Category::Germs,
            AssetDescriptor::Tile { .. } => Category::Tiles,
        }
    }

    /// Output path without extension, relative to the output root,
    /// e.g. `germs/coccus` or `tiles/tile_wall_w2`.
    pub fn file_stem(&self) -> String {
        format!("{}/{}", self.category().dir_name(), self.name())
    }

    pub fn synthesize(&self, config: &RenderConfig) -> Result<RasterImage, EngineError> {
        match *self {
            AssetDescriptor::Organism { id } => synthesize_organism(id, id.default_color(), config),
            AssetDescriptor::Medicine { id } => {
                let target = id.target();
                synthesize_medicine(id, target, target.default_color(), id.color(), config)
            }
            AssetDescriptor::Tile { world, tile } => synthesize_tile(world, tile, config),
        }
    }
}

impl fmt::Display for AssetDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// `tile_<kind>_w<n>` → `(world, kind)`.
fn parse_tile(name: &str) -> Option<(WorldId, TileKind)> {
    let rest = name.strip_prefix("tile_")?;
    let (kind, world) = rest.rsplit_once("_w")?;
    let kind = TileKind::from_name(kind).ok()?;
    let world = WorldId::from_number(world.parse().ok()?).ok()?;
    Some((world, kind))
}
