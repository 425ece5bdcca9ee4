//! Medicine sprites: a paired organism tinted toward the medicine colour,
//! washed with a flat tint layer, with a medical cross on top.

use std::fmt;

use glam::DVec2;
use microbe_forge_core::{average, Canvas, EngineError, Rgb, Synthesizer};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::organism::OrganismId;

/// Alpha of the flat tint layer.
pub const TINT_ALPHA: u8 = 60;
/// Half-width of each cross arm, in design units.
pub const CROSS_ARM_HALF_WIDTH: f64 = 22.0;
/// Half-length of each cross arm, in design units.
pub const CROSS_ARM_HALF_LENGTH: f64 = 60.0;
pub const CROSS_OUTLINE: f64 = 3.0;
pub const CROSS_OUTLINE_RADIUS: f64 = 6.0;
pub const CROSS_OUTLINE_ALPHA: u8 = 200;
pub const CROSS_INNER_RADIUS: f64 = 4.0;
pub const CROSS_INNER_ALPHA: u8 = 220;

/// One of the nine medicines, each paired with the organism it counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MedicineId {
    Penicillin,
    Tetracycline,
    Streptomycin,
    Tamiflu,
    Zidovudine,
    Interferon,
    Fluconazole,
    Nystatin,
    Amphotericin,
}

impl MedicineId {
    pub const ALL: [MedicineId; 9] = [
        MedicineId::Penicillin,
        MedicineId::Tetracycline,
        MedicineId::Streptomycin,
        MedicineId::Tamiflu,
        MedicineId::Zidovudine,
        MedicineId::Interferon,
        MedicineId::Fluconazole,
        MedicineId::Nystatin,
        MedicineId::Amphotericin,
    ];

    pub fn name(self) -> &'static str {
        match self {
            MedicineId::Penicillin => "penicillin",
            MedicineId::Tetracycline => "tetracycline",
            MedicineId::Streptomycin => "streptomycin",
            MedicineId::Tamiflu => "tamiflu",
            MedicineId::Zidovudine => "zidovudine",
            MedicineId::Interferon => "interferon",
            MedicineId::Fluconazole => "fluconazole",
            MedicineId::Nystatin => "nystatin",
            MedicineId::Amphotericin => "amphotericin",
        }
    }

    /// Returns `EngineError::UnknownAssetId` for names not in the table.
    pub fn from_name(name: &str) -> Result<Self, EngineError> {
        Self::ALL
            .into_iter()
            .find(|id| id.name() == name)
            .ok_or_else(|| EngineError::UnknownAssetId(name.to_owned()))
    }

    pub fn color(self) -> Rgb {
        match self {
            MedicineId::Penicillin => Rgb::new(0x00, 0xE5, 0xFF),
            MedicineId::Tetracycline => Rgb::new(0x18, 0xFF, 0xFF),
            MedicineId::Streptomycin => Rgb::new(0x00, 0xBF, 0xA5),
            MedicineId::Tamiflu => Rgb::new(0x76, 0xFF, 0x03),
            MedicineId::Zidovudine => Rgb::new(0xB2, 0xFF, 0x59),
            MedicineId::Interferon => Rgb::new(0xAE, 0xEA, 0x00),
            MedicineId::Fluconazole => Rgb::new(0xEA, 0x80, 0xFC),
            MedicineId::Nystatin => Rgb::new(0xE0, 0x40, 0xFB),
            MedicineId::Amphotericin => Rgb::new(0xD5, 0x00, 0xF9),
        }
    }

    /// The organism whose silhouette this medicine's sprite is built on.
    pub fn target(self) -> OrganismId {
        match self {
            MedicineId::Penicillin => OrganismId::Coccus,
            MedicineId::Tetracycline => OrganismId::Bacillus,
            MedicineId::Streptomycin => OrganismId::Spirillum,
            MedicineId::Tamiflu => OrganismId::Influenza,
            MedicineId::Zidovudine => OrganismId::Retrovirus,
            MedicineId::Interferon => OrganismId::Phage,
            MedicineId::Fluconazole => OrganismId::Mold,
            MedicineId::Nystatin => OrganismId::Yeast,
            MedicineId::Amphotericin => OrganismId::Spore,
        }
    }
}

impl fmt::Display for MedicineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Centred medical cross: a medicine-coloured outline under a white core.
///
/// Each layer is the union of both arms, so the crossing is composited once.
pub fn draw_cross(canvas: &mut Canvas, color: Rgb) {
    let c = canvas.center();
    let vertical = DVec2::new(CROSS_ARM_HALF_WIDTH, CROSS_ARM_HALF_LENGTH);
    let horizontal = DVec2::new(CROSS_ARM_HALF_LENGTH, CROSS_ARM_HALF_WIDTH);
    let arms = |grow: f64| {
        let g = DVec2::splat(grow);
        [
            (c - vertical - g, c + vertical + g),
            (c - horizontal - g, c + horizontal + g),
        ]
    };
    canvas.fill_rounded_rects(
        &arms(CROSS_OUTLINE),
        CROSS_OUTLINE_RADIUS,
        color.with_alpha(CROSS_OUTLINE_ALPHA),
    );
    canvas.fill_rounded_rects(
        &arms(0.0),
        CROSS_INNER_RADIUS,
        Rgb::WHITE.with_alpha(CROSS_INNER_ALPHA),
    );
}

/// Draws `organism` in the average of the two colours, washes the whole
/// canvas with `medicine_color` at [`TINT_ALPHA`], then adds the cross.
pub fn compose_medicine(
    canvas: &mut Canvas,
    organism: OrganismId,
    organism_color: Rgb,
    medicine_color: Rgb,
) {
    let blended = average(organism_color, medicine_color);
    trace!(organism = organism.name(), blended = %blended.to_hex(), "composing medicine");
    organism.synthesize(canvas, blended);
    canvas.fill(medicine_color.with_alpha(TINT_ALPHA));
    draw_cross(canvas, medicine_color);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas() -> Canvas {
        Canvas::square(256, 512.0).unwrap()
    }

    #[test]
    fn every_medicine_targets_a_distinct_organism() {
        let mut targets: Vec<_> = MedicineId::ALL.iter().map(|m| m.target()).collect();
        targets.sort_by_key(|&t| t.name());
        targets.dedup();
        assert_eq!(targets.len(), 9);
    }

    #[test]
    fn names_round_trip() {
        for m in MedicineId::ALL {
            assert_eq!(MedicineId::from_name(m.name()).unwrap(), m);
        }
        assert!(MedicineId::from_name("aspirin").is_err());
    }

    #[test]
    fn penicillin_row() {
        let m = MedicineId::Penicillin;
        assert_eq!(m.color().to_hex(), "#00e5ff");
        assert_eq!(m.target(), OrganismId::Coccus);
    }

    #[test]
    fn cross_centre_is_composited_once() {
        let mut cv = canvas();
        let cyan = Rgb::new(0, 229, 255);
        draw_cross(&mut cv, cyan);
        // Outline α200 then white α220 over it, once each.
        let centre = cv.pixel(128, 128).unwrap();
        let arm = cv.pixel(128, 128 + 20).unwrap();
        assert_eq!(centre, arm);
    }

    #[test]
    fn cross_outline_rims_the_arms() {
        let mut cv = canvas();
        let cyan = Rgb::new(0, 229, 255);
        draw_cross(&mut cv, cyan);
        // Between 60 and 63 units below centre only the outline is painted.
        let rim = cv.pixel(128, ((256.0 + 61.5) * 0.5) as usize).unwrap();
        assert_eq!(rim, cyan.with_alpha(CROSS_OUTLINE_ALPHA));
    }

    #[test]
    fn tint_layer_covers_the_whole_canvas() {
        let mut cv = canvas();
        let cyan = MedicineId::Penicillin.color();
        compose_medicine(
            &mut cv,
            OrganismId::Coccus,
            OrganismId::Coccus.default_color(),
            cyan,
        );
        assert_eq!(cv.pixel(0, 0).unwrap(), cyan.with_alpha(TINT_ALPHA));
    }

    #[test]
    fn medicine_uses_average_colour() {
        let mut expected = canvas();
        let green = OrganismId::Coccus.default_color();
        let cyan = MedicineId::Penicillin.color();
        OrganismId::Coccus.synthesize(&mut expected, average(green, cyan));
        expected.fill(cyan.with_alpha(TINT_ALPHA));
        draw_cross(&mut expected, cyan);

        let mut got = canvas();
        compose_medicine(&mut got, OrganismId::Coccus, green, cyan);
        assert_eq!(got, expected);
    }
}
