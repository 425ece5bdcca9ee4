#![deny(unsafe_code)]
//! Organism synthesizers for microbe-forge.
//!
//! Nine morphologies grouped into three families ([`bacteria`], [`virus`],
//! [`fungus`]), each drawn glow-first and then outline → fill → highlight.
//! [`OrganismId`] is the lookup table and implements
//! [`Synthesizer`](microbe_forge_core::Synthesizer). The branch generator
//! behind the mould lives in [`branch`]; medicine sprites are composed in
//! [`medicine`].

pub mod bacteria;
pub mod branch;
pub mod fungus;
pub mod medicine;
pub mod organism;
pub mod virus;

pub use branch::{grow, max_segments, BranchParams, Segment};
pub use medicine::{compose_medicine, draw_cross, MedicineId};
pub use organism::{Family, OrganismId};

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;
    use microbe_forge_core::{Canvas, Synthesizer};

    #[test]
    fn ids_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<OrganismId>();
        assert_send_sync::<MedicineId>();
        assert_send_sync::<BranchParams>();
    }

    #[test]
    fn every_organism_draws_something_near_the_centre() {
        for id in OrganismId::ALL {
            let mut canvas = Canvas::square(128, 512.0).unwrap();
            id.synthesize(&mut canvas, id.default_color());
            let lit = canvas.pixels().chunks_exact(4).filter(|p| p[3] > 0).count();
            assert!(lit > 0, "{id} drew nothing");
            assert!(canvas.pixel(64, 64).unwrap().a > 0, "{id} has an empty centre");
        }
    }

    #[test]
    fn every_organism_stays_clear_of_the_corners() {
        for id in OrganismId::ALL {
            let mut canvas = Canvas::square(128, 512.0).unwrap();
            id.synthesize(&mut canvas, id.default_color());
            for (x, y) in [(0, 0), (127, 0), (0, 127), (127, 127)] {
                assert_eq!(canvas.pixel(x, y).unwrap().a, 0, "{id} touched corner ({x},{y})");
            }
        }
    }

    #[test]
    fn synthesis_is_deterministic() {
        for id in OrganismId::ALL {
            let mut a = Canvas::square(96, 512.0).unwrap();
            let mut b = Canvas::square(96, 512.0).unwrap();
            id.synthesize(&mut a, id.default_color());
            id.synthesize(&mut b, id.default_color());
            assert_eq!(a, b, "{id} is not deterministic");
        }
    }

    #[test]
    fn mold_segment_count_within_bound() {
        let params = BranchParams::default();
        let segs = grow(DVec2::splat(256.0), &params);
        let bound = max_segments(
            params.trunk_angles.len(),
            params.branch_factor(),
            params.max_depth,
        );
        assert!(segs.len() <= bound);
    }
}
