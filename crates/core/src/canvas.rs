//! Owned RGBA drawing surface.
//!
//! A [`Canvas`] is allocated per asset, mutated by the synthesizers that draw
//! on it, then handed (read-only) to the Finalizer. Drawing coordinates are in
//! *design units*: a canvas created with [`Canvas::square`] maps its design
//! size onto its pixel size, so shape constants authored for one resolution
//! hold at any supersample size.
//!
//! Every primitive composites its color "over" the covered pixels exactly
//! once. There is no per-primitive anti-aliasing; edges are smoothed by the
//! supersample-then-downsample Finalizer.

use glam::DVec2;

use crate::color::Rgba;
use crate::error::EngineError;
use crate::raster::RasterImage;
use crate::scan::{self, Mask, Span};

/// An owned RGBA8 pixel buffer (straight alpha) with a fixed size.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    width: usize,
    height: usize,
    scale: f64,
    data: Vec<u8>,
}

/// Composites `src` over the RGBA pixel `dst` in place.
///
/// `out_a = s_a + d_a (1 - s_a)`, `out_c = (s_c s_a + d_c d_a (1 - s_a)) / out_a`.
/// A fully opaque source replaces the pixel; a fully transparent one leaves it alone.
fn over(dst: &mut [u8], src: Rgba) {
    match src.a {
        0 => {}
        255 => dst.copy_from_slice(&[src.r, src.g, src.b, 255]),
        a => {
            let sa = a as f64 / 255.0;
            let da = dst[3] as f64 / 255.0;
            let keep = da * (1.0 - sa);
            let out_a = sa + keep;
            let mix = |s: u8, d: u8| {
                ((s as f64 * sa + d as f64 * keep) / out_a)
                    .round()
                    .clamp(0.0, 255.0) as u8
            };
            dst[0] = mix(src.r, dst[0]);
            dst[1] = mix(src.g, dst[1]);
            dst[2] = mix(src.b, dst[2]);
            dst[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
        }
    }
}

impl Canvas {
    /// Allocates a fully transparent canvas with one pixel per design unit.
    ///
    /// Returns `EngineError::InvalidDimensions` if width or height is zero,
    /// or if the buffer length would overflow `usize`.
    pub fn new(width: usize, height: usize) -> Result<Self, EngineError> {
        Self::with_scale(width, height, 1.0)
    }

    /// Allocates a transparent canvas where one design unit spans `scale` pixels.
    pub fn with_scale(width: usize, height: usize, scale: f64) -> Result<Self, EngineError> {
        if width == 0 || height == 0 {
            return Err(EngineError::InvalidDimensions);
        }
        let len = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(4))
            .ok_or(EngineError::InvalidDimensions)?;
        if !(scale.is_finite() && scale > 0.0) {
            return Err(EngineError::InvalidConfig(format!(
                "canvas scale must be positive, got {scale}"
            )));
        }
        Ok(Self {
            width,
            height,
            scale,
            data: vec![0; len],
        })
    }

    /// Allocates a `size × size` canvas addressed in a `design_size`-unit square.
    pub fn square(size: usize, design_size: f64) -> Result<Self, EngineError> {
        Self::with_scale(size, size, size as f64 / design_size)
    }

    /// A transparent canvas with the same size and scale, for scratch layers.
    pub fn blank_like(&self) -> Self {
        Self {
            width: self.width,
            height: self.height,
            scale: self.scale,
            data: vec![0; self.data.len()],
        }
    }

    /// Canvas width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Canvas height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Pixels per design unit.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Centre of the canvas in design units.
    pub fn center(&self) -> DVec2 {
        DVec2::new(self.width as f64, self.height as f64) / (2.0 * self.scale)
    }

    /// Design-unit extent of the canvas.
    pub fn design_size(&self) -> DVec2 {
        DVec2::new(self.width as f64, self.height as f64) / self.scale
    }

    /// Read-only access to the row-major RGBA bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Returns the pixel at `(x, y)`, or `None` outside the canvas.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y * self.width + x) * 4;
        let p = &self.data[i..i + 4];
        Some(Rgba {
            r: p[0],
            g: p[1],
            b: p[2],
            a: p[3],
        })
    }

    /// Hands the buffer over as an unscaled [`RasterImage`].
    pub fn into_image(self) -> RasterImage {
        RasterImage::from_canvas_parts(self.width, self.height, self.data)
    }

    fn to_px(&self, p: DVec2) -> DVec2 {
        p * self.scale
    }

    /// Stroke width in pixels; visible strokes never drop below one pixel.
    fn stroke_px(&self, line_width: f64) -> f64 {
        if line_width > 0.0 {
            (line_width * self.scale).max(1.0)
        } else {
            0.0
        }
    }

    /// Composites `color` over every pixel of `spans`.
    pub fn paint(&mut self, spans: &[Span], color: Rgba) {
        if color.a == 0 {
            return;
        }
        for s in spans {
            let row = s.y * self.width;
            for px in self.data[(row + s.x0) * 4..(row + s.x1) * 4].chunks_exact_mut(4) {
                over(px, color);
            }
        }
    }

    /// Composites `source` over this canvas with its top-left corner at
    /// `(offset_x, offset_y)` pixels. Parts falling outside are dropped.
    pub fn composite_over(&mut self, source: &Canvas, offset_x: isize, offset_y: isize) {
        for sy in 0..source.height {
            let dy = sy as isize + offset_y;
            if dy < 0 || dy >= self.height as isize {
                continue;
            }
            for sx in 0..source.width {
                let dx = sx as isize + offset_x;
                if dx < 0 || dx >= self.width as isize {
                    continue;
                }
                let si = (sy * source.width + sx) * 4;
                let s = &source.data[si..si + 4];
                let di = (dy as usize * self.width + dx as usize) * 4;
                over(
                    &mut self.data[di..di + 4],
                    Rgba {
                        r: s[0],
                        g: s[1],
                        b: s[2],
                        a: s[3],
                    },
                );
            }
        }
    }

    /// Composites a flat color over the whole canvas.
    pub fn fill(&mut self, color: Rgba) {
        if color.a == 0 {
            return;
        }
        for px in self.data.chunks_exact_mut(4) {
            over(px, color);
        }
    }

    pub fn fill_ellipse(&mut self, center: DVec2, rx: f64, ry: f64, color: Rgba) {
        let spans = scan::ellipse(
            self.to_px(center),
            rx * self.scale,
            ry * self.scale,
            self.width,
            self.height,
        );
        self.paint(&spans, color);
    }

    pub fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba) {
        self.fill_ellipse(center, radius, radius, color);
    }

    /// Elliptical ring `line_width` units thick, drawn inward from the edge.
    pub fn stroke_ellipse(&mut self, center: DVec2, rx: f64, ry: f64, line_width: f64, color: Rgba) {
        let c = self.to_px(center);
        let (rx, ry, w) = (rx * self.scale, ry * self.scale, self.stroke_px(line_width));
        let mut mask = Mask::new(self.width, self.height);
        mask.add(&scan::ellipse(c, rx, ry, self.width, self.height));
        mask.remove(&scan::ellipse(c, rx - w, ry - w, self.width, self.height));
        self.paint(&mask.spans(), color);
    }

    /// Fills the ellipse inscribed in the box `[min, max]`.
    pub fn fill_ellipse_box(&mut self, min: DVec2, max: DVec2, color: Rgba) {
        let half = (max - min) * 0.5;
        self.fill_ellipse(min + half, half.x, half.y, color);
    }

    pub fn fill_polygon(&mut self, points: &[DVec2], color: Rgba) {
        let px: Vec<DVec2> = points.iter().map(|&p| self.to_px(p)).collect();
        let spans = scan::polygon(&px, self.width, self.height);
        self.paint(&spans, color);
    }

    /// Closed outline of `points`, `line_width` units thick.
    pub fn stroke_polygon(&mut self, points: &[DVec2], line_width: f64, color: Rgba) {
        if points.len() < 2 {
            return;
        }
        let mut closed = points.to_vec();
        closed.push(points[0]);
        self.polyline(&closed, line_width, color);
    }

    /// Thick straight segment with butt ends.
    pub fn line(&mut self, a: DVec2, b: DVec2, line_width: f64, color: Rgba) {
        let spans = scan::line(
            self.to_px(a),
            self.to_px(b),
            self.stroke_px(line_width),
            self.width,
            self.height,
        );
        self.paint(&spans, color);
    }

    /// Connected thick segments. Where neighbouring segments overlap the
    /// pixels are composited once.
    pub fn polyline(&mut self, points: &[DVec2], line_width: f64, color: Rgba) {
        let segments: Vec<_> = points
            .windows(2)
            .map(|pair| (pair[0], pair[1], line_width))
            .collect();
        self.stroke_segments(&segments, color);
    }

    /// Unions `(start, end, width)` segments into one coverage mask and
    /// composites `color` over it once.
    pub fn stroke_segments(&mut self, segments: &[(DVec2, DVec2, f64)], color: Rgba) {
        let mut mask = Mask::new(self.width, self.height);
        for &(a, b, w) in segments {
            mask.add(&scan::line(
                self.to_px(a),
                self.to_px(b),
                self.stroke_px(w),
                self.width,
                self.height,
            ));
        }
        self.paint(&mask.spans(), color);
    }

    pub fn fill_rect(&mut self, min: DVec2, max: DVec2, color: Rgba) {
        self.fill_rounded_rect(min, max, 0.0, color);
    }

    /// Frame of `line_width` units drawn inward from the rectangle edges.
    pub fn stroke_rect(&mut self, min: DVec2, max: DVec2, line_width: f64, color: Rgba) {
        let (min, max) = (self.to_px(min), self.to_px(max));
        let w = self.stroke_px(line_width);
        let (width, height) = (self.width, self.height);
        let mut mask = Mask::new(width, height);
        let bands = [
            (min, DVec2::new(max.x, min.y + w)),
            (DVec2::new(min.x, max.y - w), max),
            (min, DVec2::new(min.x + w, max.y)),
            (DVec2::new(max.x - w, min.y), max),
        ];
        for (a, b) in bands {
            mask.add(&scan::rounded_rect(a, b, 0.0, width, height));
        }
        self.paint(&mask.spans(), color);
    }

    /// Rectangle with rounded corners; `radius` is capped at half the shorter side.
    pub fn fill_rounded_rect(&mut self, min: DVec2, max: DVec2, radius: f64, color: Rgba) {
        let spans = scan::rounded_rect(
            self.to_px(min),
            self.to_px(max),
            radius * self.scale,
            self.width,
            self.height,
        );
        self.paint(&spans, color);
    }

    /// Union of rounded rectangles sharing one radius, composited once.
    pub fn fill_rounded_rects(&mut self, rects: &[(DVec2, DVec2)], radius: f64, color: Rgba) {
        let mut mask = Mask::new(self.width, self.height);
        for &(min, max) in rects {
            mask.add(&scan::rounded_rect(
                self.to_px(min),
                self.to_px(max),
                radius * self.scale,
                self.width,
                self.height,
            ));
        }
        self.paint(&mask.spans(), color);
    }

    /// Single design-unit dot (at least one pixel).
    pub fn point(&mut self, p: DVec2, color: Rgba) {
        let origin = self.to_px(p).floor();
        let size = self.scale.round().max(1.0);
        if origin.x < 0.0 || origin.y < 0.0 {
            return;
        }
        let spans: Vec<Span> = (0..size as usize)
            .map(|dy| origin.y as usize + dy)
            .filter(|&y| y < self.height)
            .filter_map(|y| {
                let x0 = origin.x as usize;
                let x1 = (x0 + size as usize).min(self.width);
                (x1 > x0).then_some(Span { y, x0, x1 })
            })
            .collect();
        self.paint(&spans, color);
    }
}
