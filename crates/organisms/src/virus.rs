//! Viruses: spiked sphere, faceted hexagon, and the tailed phage.

use std::f64::consts::PI;

use glam::DVec2;
use microbe_forge_core::{darken, draw_glow, lighten, Canvas, Rgb};

pub const INFLUENZA_BODY_RADIUS: f64 = 90.0;
pub const INFLUENZA_SPIKES: usize = 14;

pub const RETROVIRUS_RADIUS: f64 = 110.0;
/// Inner hexagon radius relative to the outer one.
pub const RETROVIRUS_INNER: f64 = 0.85;

pub const PHAGE_HEAD_RADIUS: f64 = 70.0;
/// Leg angles in degrees from straight down.
pub const PHAGE_LEG_ANGLES: [f64; 6] = [-60.0, -30.0, -10.0, 10.0, 30.0, 60.0];
pub const PHAGE_LEG_LENGTH: f64 = 80.0;

/// Regular hexagon vertices; vertex `i` sits at `i · π/3 + phase`.
pub fn hexagon(center: DVec2, radius: f64, phase: f64) -> [DVec2; 6] {
    std::array::from_fn(|i| center + DVec2::from_angle(PI / 3.0 * i as f64 + phase) * radius)
}

pub fn draw_influenza(canvas: &mut Canvas, color: Rgb) {
    let c = canvas.center();
    draw_glow(canvas, c, 80.0, color, 60);
    let r = INFLUENZA_BODY_RADIUS;
    for i in 0..INFLUENZA_SPIKES {
        let dir = DVec2::from_angle(2.0 * PI * i as f64 / INFLUENZA_SPIKES as f64);
        let tip = c + dir * (r + 65.0);
        canvas.line(c + dir * (r + 30.0), tip, 10.0, darken(color, 0.2).with_alpha(220));
        canvas.fill_circle(tip, 14.0, lighten(color, 0.2).with_alpha(220));
    }
    canvas.fill_circle(c, r + 3.0, darken(color, 0.3).with_alpha(220));
    canvas.fill_circle(c, r, color.with_alpha(240));
    canvas.fill_ellipse_box(
        c + DVec2::new(-0.5 * r, -0.6 * r),
        c + DVec2::new(0.1 * r, -0.1 * r),
        lighten(color, 0.5).with_alpha(100),
    );
}

pub fn draw_retrovirus(canvas: &mut Canvas, color: Rgb) {
    let c = canvas.center();
    draw_glow(canvas, c, 80.0, color, 60);
    let outer = hexagon(c, RETROVIRUS_RADIUS, -PI / 6.0);
    canvas.fill_polygon(&outer, darken(color, 0.3).with_alpha(220));
    canvas.stroke_polygon(&outer, 4.0, darken(color, 0.5).with_alpha(200));
    let inner = hexagon(c, RETROVIRUS_RADIUS * RETROVIRUS_INNER, -PI / 6.0);
    canvas.fill_polygon(&inner, color.with_alpha(230));

    let spokes: Vec<_> = inner.iter().map(|&v| (c, v, 3.0)).collect();
    canvas.stroke_segments(&spokes, darken(color, 0.15).with_alpha(140));
    canvas.fill_circle(c, 18.0, lighten(color, 0.3).with_alpha(200));
    // Upper-left face.
    canvas.fill_polygon(&[inner[4], inner[5], c], lighten(color, 0.3).with_alpha(80));
}

pub fn draw_phage(canvas: &mut Canvas, color: Rgb) {
    let c = canvas.center();
    draw_glow(canvas, c, 80.0, color, 50);
    let head_c = c - DVec2::new(0.0, 70.0);
    let head = hexagon(head_c, PHAGE_HEAD_RADIUS, -PI / 2.0);
    canvas.fill_polygon(&head, darken(color, 0.2).with_alpha(220));
    canvas.stroke_polygon(&head, 4.0, darken(color, 0.5).with_alpha(200));
    canvas.fill_polygon(&head, color.with_alpha(220));

    let tail_top = head_c.y + PHAGE_HEAD_RADIUS - 10.0;
    let tail_bottom = c.y + 120.0;
    canvas.fill_rect(
        DVec2::new(c.x - 12.0, tail_top),
        DVec2::new(c.x + 12.0, tail_bottom),
        darken(color, 0.15).with_alpha(220),
    );
    let hub = DVec2::new(c.x, tail_bottom);
    canvas.fill_ellipse(hub, 35.0, 12.0, color.with_alpha(200));

    let feet: Vec<DVec2> = PHAGE_LEG_ANGLES
        .iter()
        .map(|deg| {
            let (s, co) = deg.to_radians().sin_cos();
            hub + DVec2::new(s * PHAGE_LEG_LENGTH, co * PHAGE_LEG_LENGTH * 0.6)
        })
        .collect();
    let legs: Vec<_> = feet.iter().map(|&f| (hub, f, 5.0)).collect();
    canvas.stroke_segments(&legs, darken(color, 0.1).with_alpha(200));
    for &f in &feet {
        canvas.fill_circle(f, 6.0, lighten(color, 0.2).with_alpha(200));
    }

    canvas.fill_ellipse_box(
        head_c + DVec2::new(-25.0, -30.0),
        head_c + DVec2::new(5.0, 5.0),
        lighten(color, 0.4).with_alpha(80),
    );
}
