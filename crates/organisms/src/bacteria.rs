//! Bacteria: clustered spheres, rods, and a helix.
//!
//! Offsets are relative to the canvas centre, in design units.

use std::f64::consts::PI;

use glam::DVec2;
use microbe_forge_core::{darken, draw_glow, lighten, Canvas, Rgb};

/// `(dx, dy, radius)` per sphere, back to front.
pub const COCCUS_SPHERES: [(f64, f64, f64); 5] = [
    (-40.0, -35.0, 72.0),
    (35.0, -25.0, 65.0),
    (-20.0, 30.0, 68.0),
    (25.0, 35.0, 62.0),
    (5.0, -5.0, 78.0),
];

/// `(x1, y1, x2, y2)` per rod, back to front.
pub const BACILLUS_RODS: [(f64, f64, f64, f64); 3] = [
    (-60.0, -40.0, 80.0, 10.0),
    (-30.0, 20.0, 90.0, 70.0),
    (-70.0, 10.0, 30.0, 55.0),
];

pub const HELIX_SAMPLES: usize = 100;
pub const HELIX_WIDTH: f64 = 36.0;

pub fn draw_coccus(canvas: &mut Canvas, color: Rgb) {
    let c = canvas.center();
    draw_glow(canvas, c, 60.0, color, 60);
    for (dx, dy, r) in COCCUS_SPHERES {
        let p = c + DVec2::new(dx, dy);
        canvas.fill_circle(p, r + 4.0, darken(color, 0.4).with_alpha(200));
        canvas.fill_circle(p, r, color.with_alpha(220));
        canvas.fill_ellipse_box(
            p + DVec2::new(-0.4 * r, -0.5 * r),
            p + DVec2::new(0.1 * r, -0.1 * r),
            lighten(color, 0.5).with_alpha(120),
        );
    }
}

pub fn draw_bacillus(canvas: &mut Canvas, color: Rgb) {
    let c = canvas.center();
    draw_glow(canvas, c, 70.0, color, 50);
    for (x1, y1, x2, y2) in BACILLUS_RODS {
        let min = c + DVec2::new(x1, y1);
        let max = c + DVec2::new(x2, y2);
        canvas.fill_rounded_rect(
            min - DVec2::splat(4.0),
            max + DVec2::splat(4.0),
            30.0,
            darken(color, 0.3).with_alpha(200),
        );
        canvas.fill_rounded_rect(min, max, 28.0, color.with_alpha(230));
        canvas.fill_rounded_rect(
            min + DVec2::new(8.0, 5.0),
            DVec2::new(max.x - 8.0, min.y + 15.0),
            8.0,
            lighten(color, 0.4).with_alpha(100),
        );
    }
}

/// Centre line of the helix: one and a half sine periods across 320 units.
pub fn helix_points(center: DVec2) -> Vec<DVec2> {
    (0..HELIX_SAMPLES)
        .map(|i| {
            let t = i as f64 / HELIX_SAMPLES as f64;
            center + DVec2::new(-160.0 + t * 320.0, (t * PI * 3.0).sin() * 80.0)
        })
        .collect()
}

pub fn draw_spirillum(canvas: &mut Canvas, color: Rgb) {
    let c = canvas.center();
    draw_glow(canvas, c, 80.0, color, 50);
    let points = helix_points(c);
    canvas.polyline(&points, HELIX_WIDTH + 6.0, darken(color, 0.3).with_alpha(200));
    canvas.polyline(&points, HELIX_WIDTH, color.with_alpha(230));
    let ridge: Vec<DVec2> = points.iter().map(|&p| p - DVec2::new(0.0, 8.0)).collect();
    canvas.polyline(&ridge, 8.0, lighten(color, 0.4).with_alpha(90));
}
