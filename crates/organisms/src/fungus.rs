//! Fungi: branching hyphae, budding yeast, and the spore burst.

use std::f64::consts::PI;

use glam::DVec2;
use microbe_forge_core::{darken, draw_glow, lighten, Canvas, Rgb};
use tracing::trace;

use crate::branch::{self, BranchParams, Segment};

/// `(dx, dy, rx, ry)` per cell: mother cell first, then buds.
pub const YEAST_CELLS: [(f64, f64, f64, f64); 4] = [
    (-50.0, -20.0, 75.0, 95.0),
    (55.0, -30.0, 55.0, 70.0),
    (-20.0, 60.0, 50.0, 60.0),
    (30.0, 50.0, 40.0, 50.0),
];

pub const SPORE_RAYS: usize = 12;
/// Angular offset of the first ray, in radians.
pub const SPORE_RAY_PHASE: f64 = 0.15;

fn hypha_width(s: &Segment) -> f64 {
    s.width.trunc().max(2.0)
}

fn hypha_outline_width(s: &Segment) -> f64 {
    s.width.trunc() + 4.0
}

/// Fill alpha of a hypha rises with its remaining depth.
fn hypha_alpha(depth: u32) -> u8 {
    (200 + depth.min(11) * 5) as u8
}

pub fn draw_mold(canvas: &mut Canvas, color: Rgb) {
    let c = canvas.center();
    draw_glow(canvas, c, 70.0, color, 50);
    let params = BranchParams::default();
    let segments = branch::grow(c, &params);
    trace!(segments = segments.len(), "mold network grown");
    draw_hyphae(canvas, &segments, color);
    canvas.fill_circle(c, 20.0, color.with_alpha(240));
}

/// Outline pass over every segment as one union, then each fill in list
/// order so later segments sit on top, then tips.
fn draw_hyphae(canvas: &mut Canvas, segments: &[Segment], color: Rgb) {
    let outline: Vec<_> = segments
        .iter()
        .map(|s| (s.start, s.end, hypha_outline_width(s)))
        .collect();
    canvas.stroke_segments(&outline, darken(color, 0.4).with_alpha(180));

    for s in segments {
        canvas.line(s.start, s.end, hypha_width(s), color.with_alpha(hypha_alpha(s.depth)));
    }

    let tip = lighten(color, 0.3).with_alpha(180);
    for s in segments.iter().filter(|s| s.depth == 1) {
        canvas.fill_circle(s.end, 8.0, tip);
    }
}

pub fn draw_yeast(canvas: &mut Canvas, color: Rgb) {
    let c = canvas.center();
    draw_glow(canvas, c, 70.0, color, 50);
    for (dx, dy, rx, ry) in YEAST_CELLS {
        let p = c + DVec2::new(dx, dy);
        canvas.fill_ellipse(p, rx + 3.0, ry + 3.0, darken(color, 0.35).with_alpha(200));
        canvas.fill_ellipse(p, rx, ry, color.with_alpha(220));
        canvas.fill_ellipse_box(
            p + DVec2::new(-0.25 * rx, -0.2 * ry),
            p + DVec2::new(0.25 * rx, 0.3 * ry),
            darken(color, 0.25).with_alpha(150),
        );
        canvas.fill_ellipse_box(
            p + DVec2::new(-0.5 * rx, -0.6 * ry),
            p + DVec2::new(-0.1 * rx, -0.2 * ry),
            lighten(color, 0.45).with_alpha(100),
        );
    }
}

/// Ray `i` length cycles through 140, 170, 200.
pub fn spore_ray_length(i: usize) -> f64 {
    140.0 + (i % 3) as f64 * 30.0
}

pub fn draw_spore(canvas: &mut Canvas, color: Rgb) {
    let c = canvas.center();
    draw_glow(canvas, c, 100.0, color, 70);
    for i in 0..SPORE_RAYS {
        let dir = DVec2::from_angle(2.0 * PI * i as f64 / SPORE_RAYS as f64 + SPORE_RAY_PHASE);
        let end = c + dir * spore_ray_length(i);
        canvas.line(c + dir * 35.0, end, 6.0, color.with_alpha(180));
        let dot = 10.0 + (i % 2) as f64 * 5.0;
        canvas.fill_circle(end, dot, lighten(color, 0.3).with_alpha(200));
    }
    canvas.fill_circle(c, 45.0, darken(color, 0.3).with_alpha(230));
    canvas.fill_circle(c, 35.0, color.with_alpha(240));
    canvas.fill_circle(c, 18.0, lighten(color, 0.4).with_alpha(200));
}
