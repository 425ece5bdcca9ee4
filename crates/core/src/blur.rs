//! Separable Gaussian blur over premultiplied alpha.
//!
//! Pixels outside the canvas count as fully transparent. Only the bounding
//! box of non-transparent pixels, grown by the kernel radius, is processed;
//! everything else is transparent before and after.

use crate::canvas::Canvas;

/// Normalized 1-D Gaussian weights truncated at 3σ (`2 · ceil(3σ) + 1` taps).
///
/// A non-positive or non-finite `sigma` yields the identity kernel `[1.0]`.
pub fn gaussian_kernel(sigma: f64) -> Vec<f32> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return vec![1.0];
    }
    let r = (3.0 * sigma).ceil() as i64;
    let denom = 2.0 * sigma * sigma;
    let weights: Vec<f64> = (-r..=r)
        .map(|i| (-(i * i) as f64 / denom).exp())
        .collect();
    let sum: f64 = weights.iter().sum();
    weights.iter().map(|w| (w / sum) as f32).collect()
}

/// Bounding box `(x0, y0, x1, y1)` (exclusive max) of pixels with alpha > 0.
fn alpha_bounds(canvas: &Canvas) -> Option<(usize, usize, usize, usize)> {
    let w = canvas.width();
    let mut bounds: Option<(usize, usize, usize, usize)> = None;
    for (i, px) in canvas.pixels().chunks_exact(4).enumerate() {
        if px[3] == 0 {
            continue;
        }
        let (x, y) = (i % w, i / w);
        bounds = Some(match bounds {
            None => (x, y, x + 1, y + 1),
            Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x + 1), y1.max(y + 1)),
        });
    }
    bounds
}

/// Returns a blurred copy of `canvas`; `sigma_px` is in pixels.
pub fn gaussian_blur(canvas: &Canvas, sigma_px: f64) -> Canvas {
    let kernel = gaussian_kernel(sigma_px);
    let Some((bx0, by0, bx1, by1)) = alpha_bounds(canvas) else {
        return canvas.blank_like();
    };
    if kernel.len() == 1 {
        return canvas.clone();
    }
    let radius = kernel.len() / 2;
    let (w, h) = (canvas.width(), canvas.height());
    let x0 = bx0.saturating_sub(radius);
    let y0 = by0.saturating_sub(radius);
    let x1 = (bx1 + radius).min(w);
    let y1 = (by1 + radius).min(h);
    let (rw, rh) = (x1 - x0, y1 - y0);

    // Premultiplied working copy of the region.
    let src = canvas.pixels();
    let mut region = vec![0.0_f32; rw * rh * 4];
    for y in 0..rh {
        for x in 0..rw {
            let si = ((y + y0) * w + x + x0) * 4;
            let a = src[si + 3] as f32 / 255.0;
            let di = (y * rw + x) * 4;
            region[di] = src[si] as f32 * a;
            region[di + 1] = src[si + 1] as f32 * a;
            region[di + 2] = src[si + 2] as f32 * a;
            region[di + 3] = src[si + 3] as f32;
        }
    }

    let mut tmp = vec![0.0_f32; region.len()];
    for y in 0..rh {
        for x in 0..rw {
            let mut acc = [0.0_f32; 4];
            for (k, &kw) in kernel.iter().enumerate() {
                let sx = x as isize + k as isize - radius as isize;
                if sx < 0 || sx >= rw as isize {
                    continue;
                }
                let i = (y * rw + sx as usize) * 4;
                for c in 0..4 {
                    acc[c] += kw * region[i + c];
                }
            }
            tmp[(y * rw + x) * 4..(y * rw + x) * 4 + 4].copy_from_slice(&acc);
        }
    }
    for y in 0..rh {
        for x in 0..rw {
            let mut acc = [0.0_f32; 4];
            for (k, &kw) in kernel.iter().enumerate() {
                let sy = y as isize + k as isize - radius as isize;
                if sy < 0 || sy >= rh as isize {
                    continue;
                }
                let i = (sy as usize * rw + x) * 4;
                for c in 0..4 {
                    acc[c] += kw * tmp[i + c];
                }
            }
            region[(y * rw + x) * 4..(y * rw + x) * 4 + 4].copy_from_slice(&acc);
        }
    }

    let mut out = canvas.blank_like();
    let dst = out.pixels_mut();
    for y in 0..rh {
        for x in 0..rw {
            let si = (y * rw + x) * 4;
            let a = region[si + 3].round().clamp(0.0, 255.0);
            if a == 0.0 {
                continue;
            }
            let di = ((y + y0) * w + x + x0) * 4;
            let unmul = |c: f32| (c * 255.0 / region[si + 3]).round().clamp(0.0, 255.0) as u8;
            dst[di] = unmul(region[si]);
            dst[di + 1] = unmul(region[si + 1]);
            dst[di + 2] = unmul(region[si + 2]);
            dst[di + 3] = a as u8;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use glam::DVec2;

    #[test]
    fn kernel_is_normalized_and_symmetric() {
        let k = gaussian_kernel(2.0);
        assert_eq!(k.len(), 13);
        let sum: f32 = k.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);
        for i in 0..k.len() / 2 {
            assert!((k[i] - k[k.len() - 1 - i]).abs() < 1e-7);
        }
        assert!(k[6] > k[5]);
    }

    #[test]
    fn degenerate_sigma_gives_identity_kernel() {
        assert_eq!(gaussian_kernel(0.0), vec![1.0]);
        assert_eq!(gaussian_kernel(f64::NAN), vec![1.0]);
    }

    #[test]
    fn blurring_an_empty_canvas_stays_empty() {
        let canvas = Canvas::new(16, 16).unwrap();
        let out = gaussian_blur(&canvas, 3.0);
        assert!(out.pixels().iter().all(|&b| b == 0));
    }

    #[test]
    fn blur_spreads_alpha_but_keeps_color() {
        let mut canvas = Canvas::new(32, 32).unwrap();
        let green = Rgb::new(76, 175, 80);
        canvas.fill_circle(DVec2::splat(16.0), 4.0, green.with_alpha(200));
        let out = gaussian_blur(&canvas, 2.0);

        let edge = out.pixel(16, 22).unwrap();
        assert!(edge.a > 0, "halo did not spread");
        assert_eq!(edge.rgb(), green);
        let centre = out.pixel(16, 16).unwrap();
        assert!(centre.a < 200 && centre.a > 0);
    }

    #[test]
    fn blur_stays_within_kernel_reach() {
        let mut canvas = Canvas::new(64, 64).unwrap();
        canvas.fill_rect(DVec2::splat(30.0), DVec2::splat(34.0), Rgb::WHITE.with_alpha(255));
        let out = gaussian_blur(&canvas, 2.0);
        // radius ceil(3 * 2) = 6
        assert_eq!(out.pixel(23, 32).unwrap().a, 0);
        assert_eq!(out.pixel(32, 41).unwrap().a, 0);
    }

    #[test]
    fn blur_does_not_mutate_source() {
        let mut canvas = Canvas::new(8, 8).unwrap();
        canvas.point(DVec2::splat(4.0), Rgb::WHITE.with_alpha(255));
        let before = canvas.clone();
        let _ = gaussian_blur(&canvas, 1.0);
        assert_eq!(canvas, before);
    }
}
