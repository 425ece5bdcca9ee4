//! Supersample-to-output resampling.
//!
//! The Finalizer is the only anti-aliasing step in the pipeline: shapes are
//! drawn hard-edged on a large canvas, then reduced with `image`'s Lanczos-3
//! filter. Resampling happens on premultiplied values so colour under
//! transparent pixels never bleeds into the edges.

use image::imageops::{self, FilterType};
use image::Rgba32FImage;
use tracing::debug;

use crate::canvas::Canvas;
use crate::error::EngineError;
use crate::raster::RasterImage;

fn dim(n: usize) -> Result<u32, EngineError> {
    u32::try_from(n).map_err(|_| EngineError::InvalidDimensions)
}

/// Canvas bytes as premultiplied RGBA in `[0, 1]`.
fn premultiplied(canvas: &Canvas) -> Result<Rgba32FImage, EngineError> {
    let data: Vec<f32> = canvas
        .pixels()
        .chunks_exact(4)
        .flat_map(|p| {
            let a = p[3] as f32 / 255.0;
            let c = |v: u8| v as f32 / 255.0 * a;
            [c(p[0]), c(p[1]), c(p[2]), a]
        })
        .collect();
    Rgba32FImage::from_raw(dim(canvas.width())?, dim(canvas.height())?, data)
        .ok_or(EngineError::InvalidDimensions)
}

/// Resamples `canvas` to `width × height` and returns an owned image.
///
/// The canvas is not modified. Equal sizes copy the buffer unchanged.
/// Returns `EngineError::InvalidDimensions` for a zero target size.
pub fn finalize(canvas: &Canvas, width: usize, height: usize) -> Result<RasterImage, EngineError> {
    if width == 0 || height == 0 {
        return Err(EngineError::InvalidDimensions);
    }
    if (canvas.width(), canvas.height()) == (width, height) {
        return Ok(canvas.clone().into_image());
    }
    debug!(from = canvas.width(), to = width, "finalizing canvas");

    let source = premultiplied(canvas)?;
    let resized = imageops::resize(&source, dim(width)?, dim(height)?, FilterType::Lanczos3);

    let mut out = vec![0_u8; width * height * 4];
    for (px, o) in resized.pixels().zip(out.chunks_exact_mut(4)) {
        let [r, g, b, a] = px.0;
        // Lanczos rings; clamp alpha, then keep colour within it.
        let a = a.clamp(0.0, 1.0);
        let a8 = (a * 255.0).round() as u8;
        if a8 == 0 {
            continue;
        }
        for (dst, pc) in o.iter_mut().zip([r, g, b]) {
            *dst = (pc.clamp(0.0, a) / a * 255.0).round().clamp(0.0, 255.0) as u8;
        }
        o[3] = a8;
    }
    RasterImage::new(width, height, out)
}
