//! The organism table: ids, names, morphologies, and default colours.

use std::fmt;

use microbe_forge_core::{Canvas, EngineError, Rgb, Synthesizer};
use serde::{Deserialize, Serialize};

use crate::{bacteria, fungus, virus};

/// Broad grouping used for sprite families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Family {
    Bacteria,
    Virus,
    Fungus,
}

/// One of the nine organism morphologies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrganismId {
    Coccus,
    Bacillus,
    Spirillum,
    Influenza,
    Retrovirus,
    Phage,
    Mold,
    Yeast,
    Spore,
}

impl OrganismId {
    /// All organisms, in catalog order.
    pub const ALL: [OrganismId; 9] = [
        OrganismId::Coccus,
        OrganismId::Bacillus,
        OrganismId::Spirillum,
        OrganismId::Influenza,
        OrganismId::Retrovirus,
        OrganismId::Phage,
        OrganismId::Mold,
        OrganismId::Yeast,
        OrganismId::Spore,
    ];

    pub fn name(self) -> &'static str {
        match self {
            OrganismId::Coccus => "coccus",
            OrganismId::Bacillus => "bacillus",
            OrganismId::Spirillum => "spirillum",
            OrganismId::Influenza => "influenza",
            OrganismId::Retrovirus => "retrovirus",
            OrganismId::Phage => "phage",
            OrganismId::Mold => "mold",
            OrganismId::Yeast => "yeast",
            OrganismId::Spore => "spore",
        }
    }

    /// Looks an organism up by its lowercase name.
    ///
    /// Returns `EngineError::UnknownAssetId` for anything else; there is no
    /// fallback morphology.
    pub fn from_name(name: &str) -> Result<Self, EngineError> {
        Self::ALL
            .into_iter()
            .find(|id| id.name() == name)
            .ok_or_else(|| EngineError::UnknownAssetId(name.to_owned()))
    }

    /// The organism's own colour.
    pub fn default_color(self) -> Rgb {
        match self {
            OrganismId::Coccus => Rgb::new(0x4C, 0xAF, 0x50),
            OrganismId::Bacillus => Rgb::new(0x8B, 0xC3, 0x4A),
            OrganismId::Spirillum => Rgb::new(0x00, 0x96, 0x88),
            OrganismId::Influenza => Rgb::new(0xF4, 0x43, 0x36),
            OrganismId::Retrovirus => Rgb::new(0xC6, 0x28, 0x28),
            OrganismId::Phage => Rgb::new(0xFF, 0x57, 0x22),
            OrganismId::Mold => Rgb::new(0x9C, 0x27, 0xB0),
            OrganismId::Yeast => Rgb::new(0xCE, 0x93, 0xD8),
            OrganismId::Spore => Rgb::new(0x4A, 0x14, 0x8C),
        }
    }

    pub fn morphology(self) -> &'static str {
        match self {
            OrganismId::Coccus => "clustered-sphere",
            OrganismId::Bacillus => "rod",
            OrganismId::Spirillum => "helix",
            OrganismId::Influenza => "spiked-sphere",
            OrganismId::Retrovirus => "faceted-lattice",
            OrganismId::Phage => "structured-particle",
            OrganismId::Mold => "branching-network",
            OrganismId::Yeast => "budding-ovals",
            OrganismId::Spore => "radiating-burst",
        }
    }

    pub fn family(self) -> Family {
        match self {
            OrganismId::Coccus | OrganismId::Bacillus | OrganismId::Spirillum => Family::Bacteria,
            OrganismId::Influenza | OrganismId::Retrovirus | OrganismId::Phage => Family::Virus,
            OrganismId::Mold | OrganismId::Yeast | OrganismId::Spore => Family::Fungus,
        }
    }
}

impl fmt::Display for OrganismId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Synthesizer for OrganismId {
    fn name(&self) -> &str {
        OrganismId::name(*self)
    }

    fn synthesize(&self, canvas: &mut Canvas, color: Rgb) {
        match self {
            OrganismId::Coccus => bacteria::draw_coccus(canvas, color),
            OrganismId::Bacillus => bacteria::draw_bacillus(canvas, color),
            OrganismId::Spirillum => bacteria::draw_spirillum(canvas, color),
            OrganismId::Influenza => virus::draw_influenza(canvas, color),
            OrganismId::Retrovirus => virus::draw_retrovirus(canvas, color),
            OrganismId::Phage => virus::draw_phage(canvas, color),
            OrganismId::Mold => fungus::draw_mold(canvas, color),
            OrganismId::Yeast => fungus::draw_yeast(canvas, color),
            OrganismId::Spore => fungus::draw_spore(canvas, color),
        }
    }
}
