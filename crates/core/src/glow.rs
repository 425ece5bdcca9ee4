//! Soft radial halo drawn behind every organism.

use glam::DVec2;
use tracing::trace;

use crate::blur::gaussian_blur;
use crate::canvas::Canvas;
use crate::color::Rgb;

/// Number of concentric circles in the halo.
pub const GLOW_RINGS: u32 = 5;
/// Radius added per ring, in design units.
pub const GLOW_RING_STEP: f64 = 8.0;
/// Alpha removed per ring.
pub const GLOW_ALPHA_STEP: u8 = 15;
/// Floor for ring alpha.
pub const GLOW_MIN_ALPHA: u8 = 5;
/// Blur standard deviation, in design units.
pub const GLOW_BLUR_SIGMA: f64 = 12.0;

/// Alpha of ring `i`: `max(GLOW_MIN_ALPHA, base_alpha - i * GLOW_ALPHA_STEP)`.
pub fn ring_alpha(base_alpha: u8, i: u32) -> u8 {
    let step = (GLOW_ALPHA_STEP as u32 * i).min(u8::MAX as u32) as u8;
    base_alpha.saturating_sub(step).max(GLOW_MIN_ALPHA)
}

/// Upper bound on the distance from `center` (design units) the halo can
/// reach. The separable kernel has square support, hence the diagonal.
pub fn glow_reach(base_radius: f64) -> f64 {
    base_radius
        + (GLOW_RINGS - 1) as f64 * GLOW_RING_STEP
        + 3.0 * GLOW_BLUR_SIGMA * std::f64::consts::SQRT_2
}

/// Composites a blurred stack of concentric circles over `canvas`.
///
/// The rings are composited over each other on a scratch layer, so the core
/// where all five overlap is the densest. The layer is blurred and then
/// composited onto the canvas once.
pub fn draw_glow(canvas: &mut Canvas, center: DVec2, base_radius: f64, color: Rgb, base_alpha: u8) {
    let mut layer = canvas.blank_like();
    for i in 0..GLOW_RINGS {
        let r = base_radius + i as f64 * GLOW_RING_STEP;
        layer.fill_circle(center, r, color.with_alpha(ring_alpha(base_alpha, i)));
    }
    trace!(base_radius, base_alpha, "glow layer built");
    let blurred = gaussian_blur(&layer, GLOW_BLUR_SIGMA * canvas.scale());
    canvas.composite_over(&blurred, 0, 0);
}
