//! The `Synthesizer` trait and the per-asset render pipeline.
//!
//! The trait is object-safe so synthesizers can be looked up at runtime and
//! driven as `&dyn Synthesizer`.

use tracing::debug;

use crate::canvas::Canvas;
use crate::color::Rgb;
use crate::config::{RenderConfig, DESIGN_SIZE};
use crate::error::EngineError;
use crate::finalize::finalize;
use crate::raster::RasterImage;

/// Draws one morphology onto a canvas in a given base colour.
///
/// Implementations draw their own glow first, then follow the
/// outline → fill → highlight order. They address the canvas in design units
/// and must not assume a particular pixel size.
pub trait Synthesizer {
    /// Stable lowercase identifier, e.g. `"coccus"`.
    fn name(&self) -> &str;

    /// Draws onto `canvas`. Drawing never fails; out-of-bounds geometry is clipped.
    fn synthesize(&self, canvas: &mut Canvas, color: Rgb);
}

/// Allocate → draw → finalize for a single asset.
///
/// Validates `config`, allocates a transparent supersample canvas in the
/// 512-unit design square, lets `draw` paint it, and resamples to the output
/// size. The canvas is dropped before returning.
pub fn render<F>(config: &RenderConfig, draw: F) -> Result<RasterImage, EngineError>
where
    F: FnOnce(&mut Canvas),
{
    config.validate()?;
    let mut canvas = Canvas::square(config.canvas_size, DESIGN_SIZE)?;
    draw(&mut canvas);
    finalize(&canvas, config.output_size, config.output_size)
}

/// Renders one synthesizer in `color`.
pub fn render_synthesizer(
    synth: &dyn Synthesizer,
    color: Rgb,
    config: &RenderConfig,
) -> Result<RasterImage, EngineError> {
    debug!(synth = synth.name(), color = %color.to_hex(), "rendering");
    render(config, |canvas| synth.synthesize(canvas, color))
}
