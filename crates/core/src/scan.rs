//! Scan conversion of filled primitives into horizontal pixel spans.
//!
//! Every function here works in pixel space and samples at pixel centres
//! (`x + 0.5`, `y + 0.5`). Output spans are clipped to `[0, width) × [0, height)`,
//! so consumers can index the pixel buffer without further checks.

use glam::DVec2;

/// A run of covered pixels on row `y`, from `x0` (inclusive) to `x1` (exclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub y: usize,
    pub x0: usize,
    pub x1: usize,
}

/// Pixel rows whose centres fall inside `[top, bottom]`, clipped to the surface.
fn rows(top: f64, bottom: f64, height: usize) -> std::ops::Range<usize> {
    let first = (top - 0.5).ceil().max(0.0);
    let last = (bottom - 0.5).floor().min(height as f64 - 1.0);
    if last < first {
        return 0..0;
    }
    first as usize..last as usize + 1
}

/// Builds a span for pixel centres inside `[left, right]` on row `y`.
fn span(y: usize, left: f64, right: f64, width: usize) -> Option<Span> {
    let x0 = (left - 0.5).ceil().max(0.0);
    let x1 = ((right - 0.5).floor() + 1.0).min(width as f64);
    (x1 > x0).then(|| Span {
        y,
        x0: x0 as usize,
        x1: x1 as usize,
    })
}

/// Axis-aligned filled ellipse.
pub fn ellipse(center: DVec2, rx: f64, ry: f64, width: usize, height: usize) -> Vec<Span> {
    if rx <= 0.0 || ry <= 0.0 {
        return Vec::new();
    }
    rows(center.y - ry, center.y + ry, height)
        .filter_map(|y| {
            let dy = (y as f64 + 0.5 - center.y) / ry;
            let t = 1.0 - dy * dy;
            if t < 0.0 {
                return None;
            }
            let half = rx * t.sqrt();
            span(y, center.x - half, center.x + half, width)
        })
        .collect()
}

/// Filled rectangle with corners rounded by `radius`, capped at half the
/// shorter side.
pub fn rounded_rect(min: DVec2, max: DVec2, radius: f64, width: usize, height: usize) -> Vec<Span> {
    if max.x <= min.x || max.y <= min.y {
        return Vec::new();
    }
    let r = radius
        .max(0.0)
        .min((max.x - min.x) * 0.5)
        .min((max.y - min.y) * 0.5);
    rows(min.y, max.y, height)
        .filter_map(|y| {
            let py = y as f64 + 0.5;
            let dy = if py < min.y + r {
                min.y + r - py
            } else if py > max.y - r {
                py - (max.y - r)
            } else {
                0.0
            };
            let inset = if dy > 0.0 {
                r - (r * r - dy * dy).max(0.0).sqrt()
            } else {
                0.0
            };
            span(y, min.x + inset, max.x - inset, width)
        })
        .collect()
}

/// Even-odd filled polygon. Fewer than three points cover nothing.
pub fn polygon(points: &[DVec2], width: usize, height: usize) -> Vec<Span> {
    if points.len() < 3 {
        return Vec::new();
    }
    let top = points.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
    let bottom = points.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
    let mut crossings = Vec::with_capacity(points.len());
    let mut spans = Vec::new();
    for y in rows(top, bottom, height) {
        let py = y as f64 + 0.5;
        crossings.clear();
        for (i, a) in points.iter().enumerate() {
            let b = points[(i + 1) % points.len()];
            if (a.y <= py && py < b.y) || (b.y <= py && py < a.y) {
                crossings.push(a.x + (py - a.y) * (b.x - a.x) / (b.y - a.y));
            }
        }
        crossings.sort_by(f64::total_cmp);
        for pair in crossings.chunks_exact(2) {
            // Half-open on the right so shared polygon edges are not painted twice.
            let x0 = (pair[0] - 0.5).ceil().max(0.0);
            let x1 = (pair[1] - 0.5).ceil().min(width as f64);
            if x1 > x0 {
                spans.push(Span {
                    y,
                    x0: x0 as usize,
                    x1: x1 as usize,
                });
            }
        }
    }
    spans
}

/// Corners of a thick segment with butt ends, or `None` for a degenerate one.
pub fn segment_quad(a: DVec2, b: DVec2, line_width: f64) -> Option<[DVec2; 4]> {
    let dir = (b - a).try_normalize()?;
    if line_width <= 0.0 {
        return None;
    }
    let n = dir.perp() * (line_width * 0.5);
    Some([a + n, b + n, b - n, a - n])
}

/// Thick straight segment.
pub fn line(a: DVec2, b: DVec2, line_width: f64, width: usize, height: usize) -> Vec<Span> {
    segment_quad(a, b, line_width)
        .map(|quad| polygon(&quad, width, height))
        .unwrap_or_default()
}

/// Coverage bitmap used to union several primitives so overlapping parts
/// are composited exactly once.
#[derive(Debug, Clone)]
pub struct Mask {
    width: usize,
    height: usize,
    bits: Vec<bool>,
}

impl Mask {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            bits: vec![false; width * height],
        }
    }

    pub fn add(&mut self, spans: &[Span]) {
        for s in spans {
            let row = s.y * self.width;
            self.bits[row + s.x0..row + s.x1].fill(true);
        }
    }

    pub fn remove(&mut self, spans: &[Span]) {
        for s in spans {
            let row = s.y * self.width;
            self.bits[row + s.x0..row + s.x1].fill(false);
        }
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.bits[y * self.width + x]
    }

    /// Converts the covered pixels back into row spans.
    pub fn spans(&self) -> Vec<Span> {
        let mut out = Vec::new();
        for (y, row) in self.bits.chunks_exact(self.width).enumerate() {
            let mut x = 0;
            while x < self.width {
                if !row[x] {
                    x += 1;
                    continue;
                }
                let start = x;
                while x < self.width && row[x] {
                    x += 1;
                }
                out.push(Span { y, x0: start, x1: x });
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area(spans: &[Span]) -> usize {
        spans.iter().map(|s| s.x1 - s.x0).sum()
    }

    #[test]
    fn ellipse_area_is_close_to_analytic() {
        let spans = ellipse(DVec2::new(50.0, 50.0), 20.0, 10.0, 100, 100);
        let expected = std::f64::consts::PI * 20.0 * 10.0;
        let got = area(&spans) as f64;
        assert!((got - expected).abs() / expected < 0.05, "area {got} vs {expected}");
    }

    #[test]
    fn ellipse_is_clipped_to_surface() {
        let spans = ellipse(DVec2::new(0.0, 0.0), 30.0, 30.0, 16, 16);
        assert!(!spans.is_empty());
        for s in &spans {
            assert!(s.y < 16 && s.x1 <= 16 && s.x0 < s.x1);
        }
    }

    #[test]
    fn zero_radius_ellipse_is_empty() {
        assert!(ellipse(DVec2::new(5.0, 5.0), 0.0, 4.0, 10, 10).is_empty());
    }

    #[test]
    fn fully_offscreen_ellipse_is_empty() {
        assert!(ellipse(DVec2::new(-100.0, -100.0), 10.0, 10.0, 10, 10).is_empty());
    }

    #[test]
    fn axis_aligned_square_polygon_covers_exact_pixels() {
        let square = [
            DVec2::new(2.0, 2.0),
            DVec2::new(6.0, 2.0),
            DVec2::new(6.0, 6.0),
            DVec2::new(2.0, 6.0),
        ];
        let spans = polygon(&square, 10, 10);
        assert_eq!(spans.len(), 4);
        assert_eq!(area(&spans), 16);
        assert!(spans.iter().all(|s| s.x0 == 2 && s.x1 == 6));
    }

    #[test]
    fn polygon_with_two_points_is_empty() {
        assert!(polygon(&[DVec2::ZERO, DVec2::ONE], 10, 10).is_empty());
    }

    #[test]
    fn rounded_rect_without_radius_is_a_rect() {
        let spans = rounded_rect(DVec2::new(1.0, 1.0), DVec2::new(5.0, 4.0), 0.0, 10, 10);
        assert_eq!(area(&spans), 12);
    }

    #[test]
    fn rounded_rect_radius_is_capped_at_half_the_short_side() {
        let capped = rounded_rect(DVec2::new(0.0, 0.0), DVec2::new(40.0, 10.0), 500.0, 64, 64);
        let exact = rounded_rect(DVec2::new(0.0, 0.0), DVec2::new(40.0, 10.0), 5.0, 64, 64);
        assert_eq!(capped, exact);
    }

    #[test]
    fn horizontal_line_has_requested_thickness() {
        let spans = line(DVec2::new(0.0, 10.0), DVec2::new(20.0, 10.0), 4.0, 32, 32);
        let rows: Vec<usize> = spans.iter().map(|s| s.y).collect();
        assert_eq!(rows, vec![8, 9, 10, 11]);
    }

    #[test]
    fn degenerate_segment_is_empty() {
        let p = DVec2::new(3.0, 3.0);
        assert!(line(p, p, 5.0, 10, 10).is_empty());
        assert!(segment_quad(p, p, 5.0).is_none());
    }

    #[test]
    fn mask_unions_overlapping_spans() {
        let mut mask = Mask::new(8, 2);
        mask.add(&[Span { y: 0, x0: 0, x1: 4 }, Span { y: 0, x0: 2, x1: 6 }]);
        assert_eq!(mask.spans(), vec![Span { y: 0, x0: 0, x1: 6 }]);
        assert!(mask.contains(5, 0));
        assert!(!mask.contains(6, 0));
        assert!(!mask.contains(0, 1));
    }

    #[test]
    fn mask_remove_cuts_a_hole() {
        let mut mask = Mask::new(8, 1);
        mask.add(&[Span { y: 0, x0: 0, x1: 8 }]);
        mask.remove(&[Span { y: 0, x0: 3, x1: 5 }]);
        assert_eq!(
            mask.spans(),
            vec![Span { y: 0, x0: 0, x1: 3 }, Span { y: 0, x0: 5, x1: 8 }]
        );
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn polygon_spans_stay_in_bounds(
                pts in proptest::collection::vec((-200.0_f64..200.0, -200.0_f64..200.0), 3..8),
                w in 1_usize..64,
                h in 1_usize..64,
            ) {
                let points: Vec<DVec2> = pts.into_iter().map(|(x, y)| DVec2::new(x, y)).collect();
                for s in polygon(&points, w, h) {
                    prop_assert!(s.y < h);
                    prop_assert!(s.x0 < s.x1 && s.x1 <= w);
                }
            }

            #[test]
            fn line_spans_stay_in_bounds(
                ax in -100.0_f64..100.0, ay in -100.0_f64..100.0,
                bx in -100.0_f64..100.0, by in -100.0_f64..100.0,
                lw in 0.0_f64..40.0,
            ) {
                for s in line(DVec2::new(ax, ay), DVec2::new(bx, by), lw, 32, 32) {
                    prop_assert!(s.y < 32 && s.x0 < s.x1 && s.x1 <= 32);
                }
            }
        }
    }
}
