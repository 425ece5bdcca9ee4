//! World ids, tile kinds, and the per-world colour themes.

use std::fmt;

use microbe_forge_core::{EngineError, Rgb};
use serde::{Deserialize, Serialize};

/// Colours shared by every tile of one world.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileTheme {
    pub name: &'static str,
    pub empty: Rgb,
    pub wall: Rgb,
    pub accent: Rgb,
}

const THEMES: [TileTheme; 4] = [
    TileTheme {
        name: "Petri Dish",
        empty: Rgb::new(26, 40, 30),
        wall: Rgb::new(58, 68, 52),
        accent: Rgb::new(76, 175, 80),
    },
    TileTheme {
        name: "Bloodstream",
        empty: Rgb::new(40, 20, 22),
        wall: Rgb::new(72, 32, 35),
        accent: Rgb::new(229, 57, 53),
    },
    TileTheme {
        name: "Tissue",
        empty: Rgb::new(32, 22, 40),
        wall: Rgb::new(58, 38, 68),
        accent: Rgb::new(171, 71, 188),
    },
    TileTheme {
        name: "Pandemic",
        empty: Rgb::new(40, 30, 18),
        wall: Rgb::new(72, 58, 32),
        accent: Rgb::new(255, 111, 0),
    },
];

/// One of the four worlds. Serializes as its number (1–4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum WorldId {
    PetriDish,
    Bloodstream,
    Tissue,
    Pandemic,
}

impl WorldId {
    pub const ALL: [WorldId; 4] = [
        WorldId::PetriDish,
        WorldId::Bloodstream,
        WorldId::Tissue,
        WorldId::Pandemic,
    ];

    /// Looks a world up by number.
    ///
    /// Returns `EngineError::UnknownAssetId` outside 1–4.
    pub fn from_number(n: u8) -> Result<Self, EngineError> {
        match n {
            1 => Ok(WorldId::PetriDish),
            2 => Ok(WorldId::Bloodstream),
            3 => Ok(WorldId::Tissue),
            4 => Ok(WorldId::Pandemic),
            _ => Err(EngineError::UnknownAssetId(format!("world {n}"))),
        }
    }

    pub fn number(self) -> u8 {
        match self {
            WorldId::PetriDish => 1,
            WorldId::Bloodstream => 2,
            WorldId::Tissue => 3,
            WorldId::Pandemic => 4,
        }
    }

    pub fn theme(self) -> &'static TileTheme {
        &THEMES[self.number() as usize - 1]
    }

    /// Grain seed: `world × 1000`.
    pub fn noise_seed(self) -> u64 {
        self.number() as u64 * 1000
    }
}

impl TryFrom<u8> for WorldId {
    type Error = EngineError;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        WorldId::from_number(n)
    }
}

impl From<WorldId> for u8 {
    fn from(w: WorldId) -> u8 {
        w.number()
    }
}

impl fmt::Display for WorldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "w{}", self.number())
    }
}

/// Floor or wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileKind {
    Empty,
    Wall,
}

impl TileKind {
    pub const ALL: [TileKind; 2] = [TileKind::Empty, TileKind::Wall];

    pub fn name(self) -> &'static str {
        match self {
            TileKind::Empty => "empty",
            TileKind::Wall => "wall",
        }
    }

    pub fn from_name(name: &str) -> Result<Self, EngineError> {
        match name {
            "empty" => Ok(TileKind::Empty),
            "wall" => Ok(TileKind::Wall),
            _ => Err(EngineError::UnknownAssetId(name.to_owned())),
        }
    }
}
