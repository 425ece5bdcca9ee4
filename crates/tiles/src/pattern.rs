//! Tile drawing: base fill, per-world motif or wall detail, grain.
//!
//! Coordinates are in design units on the canvas' design square (`S` below).

use std::f64::consts::PI;

use glam::DVec2;
use microbe_forge_core::{darken, lighten, Canvas, Rgb, Xorshift64};
use tracing::trace;

use crate::theme::{TileKind, WorldId};

/// Inset of the groove outline on empty tiles.
pub const GROOVE_MARGIN: f64 = 12.0;
pub const GRAIN_POINTS: usize = 400;
/// Largest per-channel grain offset.
pub const GRAIN_DELTA: i32 = 8;
pub const GRAIN_ALPHA: u8 = 60;

/// Paints a complete tile for `world` onto `canvas`.
pub fn generate_tile(canvas: &mut Canvas, world: WorldId, kind: TileKind) {
    trace!(world = world.number(), kind = kind.name(), "generating tile");
    match kind {
        TileKind::Empty => empty_tile(canvas, world),
        TileKind::Wall => wall_tile(canvas, world),
    }
}

fn empty_tile(canvas: &mut Canvas, world: WorldId) {
    let theme = world.theme();
    let s = canvas.design_size().x;
    let (base, accent) = (theme.empty, theme.accent);

    canvas.fill(base.with_alpha(255));
    canvas.stroke_rect(
        DVec2::splat(GROOVE_MARGIN),
        DVec2::splat(s - GROOVE_MARGIN),
        2.0,
        lighten(base, 0.15).with_alpha(80),
    );
    match world {
        WorldId::PetriDish => agar_rings(canvas, s, accent),
        WorldId::Bloodstream => flow_lines(canvas, s, accent),
        WorldId::Tissue => cell_grid(canvas, accent),
        WorldId::Pandemic => warning_cross(canvas, s, accent),
    }
    apply_grain(canvas, base, world.noise_seed());
}

fn agar_rings(canvas: &mut Canvas, s: f64, accent: Rgb) {
    let c = DVec2::splat(s / 2.0);
    for i in 0..3 {
        let r = 60.0 + i as f64 * 50.0;
        canvas.stroke_ellipse(c, r, r, 1.0, accent.with_alpha(15));
    }
}

fn flow_lines(canvas: &mut Canvas, s: f64, accent: Rgb) {
    for offset in -1..3 {
        let y0 = s / 4.0 + offset as f64 * 150.0;
        let points: Vec<DVec2> = (0..=(s as usize + 19) / 20)
            .map(|k| {
                let x = (k * 20) as f64;
                DVec2::new(x, y0 + (20.0 * (x / 60.0).sin()).trunc())
            })
            .collect();
        canvas.polyline(&points, 2.0, accent.with_alpha(12));
    }
}

fn cell_grid(canvas: &mut Canvas, accent: Rgb) {
    for row in 0..4 {
        for col in 0..4 {
            let c = DVec2::new((col * 140 + (row % 2) * 70) as f64, (row * 140) as f64);
            let hex: Vec<DVec2> = (0..6)
                .map(|i| c + DVec2::from_angle(PI / 3.0 * i as f64) * 60.0)
                .collect();
            canvas.stroke_polygon(&hex, 1.0, accent.with_alpha(15));
        }
    }
}

fn warning_cross(canvas: &mut Canvas, s: f64, accent: Rgb) {
    canvas.stroke_segments(
        &[
            (DVec2::ZERO, DVec2::splat(s), 3.0),
            (DVec2::new(s, 0.0), DVec2::new(0.0, s), 3.0),
        ],
        accent.with_alpha(8),
    );
}

/// Scatters [`GRAIN_POINTS`] single-unit points of `base ± GRAIN_DELTA`
/// (same offset on every channel) at [`GRAIN_ALPHA`], positions and offsets
/// drawn from `Xorshift64::new(seed)`.
pub fn apply_grain(canvas: &mut Canvas, base: Rgb, seed: u64) {
    let mut rng = Xorshift64::new(seed);
    let side = canvas.design_size().x.max(1.0) as usize;
    let shift = |c: u8, v: i32| (c as i32 + v).clamp(0, 255) as u8;
    for _ in 0..GRAIN_POINTS {
        let x = rng.next_usize(side);
        let y = rng.next_usize(side);
        let v = rng.next_i32_inclusive(-GRAIN_DELTA, GRAIN_DELTA);
        let c = Rgb::new(shift(base.r, v), shift(base.g, v), shift(base.b, v));
        canvas.point(DVec2::new(x as f64, y as f64), c.with_alpha(GRAIN_ALPHA));
    }
}

fn wall_tile(canvas: &mut Canvas, world: WorldId) {
    let theme = world.theme();
    let s = canvas.design_size().x;
    let (base, accent) = (theme.wall, theme.accent);
    let inset = |m: f64| (DVec2::splat(m), DVec2::splat(s - m));

    canvas.fill(base.with_alpha(255));
    match world {
        WorldId::PetriDish => {
            // Glass rim bevel.
            let (a, b) = inset(8.0);
            canvas.fill_rect(a, b, lighten(base, 0.12).with_alpha(255));
            let (a, b) = inset(16.0);
            canvas.fill_rect(a, b, base.with_alpha(255));
            let corner = DVec2::splat(8.0);
            let top = lighten(base, 0.3).with_alpha(150);
            let left = lighten(base, 0.2).with_alpha(120);
            canvas.line(corner, DVec2::new(s - 8.0, 8.0), 3.0, top);
            canvas.line(corner, DVec2::new(8.0, s - 8.0), 3.0, left);
        }
        WorldId::Bloodstream => {
            for i in 0..5 {
                let y = 50.0 + i as f64 * 100.0;
                let points: Vec<DVec2> = (0..=(s as usize + 9) / 10)
                    .map(|k| {
                        let x = (k * 10) as f64;
                        DVec2::new(x, y + (15.0 * (x / 40.0 + i as f64).sin()).trunc())
                    })
                    .collect();
                canvas.polyline(&points, 4.0, darken(base, 0.2).with_alpha(100));
            }
            let (a, b) = inset(4.0);
            canvas.stroke_rect(a, b, 4.0, accent.with_alpha(50));
        }
        WorldId::Tissue => {
            let ridge = lighten(base, 0.08).with_alpha(255);
            for i in 0..8 {
                let y = i as f64 * 65.0;
                canvas.fill_rect(DVec2::new(0.0, y), DVec2::new(s, y + 30.0), ridge);
            }
            let (a, b) = inset(6.0);
            canvas.stroke_rect(a, b, 3.0, accent.with_alpha(40));
        }
        WorldId::Pandemic => {
            let (a, b) = inset(6.0);
            canvas.fill_rect(a, b, lighten(base, 0.1).with_alpha(255));
            canvas.stroke_rect(a, b, 4.0, accent.with_alpha(80));
            let (near, far) = (40.0, s - 40.0);
            for (rx, ry) in [(near, near), (far, near), (near, far), (far, far)] {
                let r = DVec2::new(rx, ry);
                canvas.fill_circle(r, 14.0, lighten(base, 0.25).with_alpha(200));
                canvas.fill_ellipse_box(
                    r - DVec2::splat(11.0),
                    r + DVec2::splat(9.0),
                    lighten(base, 0.35).with_alpha(150),
                );
            }
            canvas.stroke_segments(
                &[
                    (DVec2::splat(80.0), DVec2::splat(s - 80.0), 6.0),
                    (DVec2::new(s - 80.0, 80.0), DVec2::new(80.0, s - 80.0), 6.0),
                ],
                accent.with_alpha(40),
            );
        }
    }
}
