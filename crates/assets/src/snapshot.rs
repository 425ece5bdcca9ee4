//! PNG output for a [`RasterImage`].
//!
//! Feature-gated behind `png` (default on) so the synthesis surface can be
//! used without pulling in the `image` crate.

use microbe_forge_core::{EngineError, RasterImage};
use std::path::Path;
use tracing::debug;

/// Writes `image` as an RGBA8 PNG.
///
/// Returns `EngineError::InvalidDimensions` if the dimensions overflow `u32`,
/// or `EngineError::Io` on write failure.
pub fn write_png(image: &RasterImage, path: &Path) -> Result<(), EngineError> {
    let w = u32::try_from(image.width()).map_err(|_| EngineError::InvalidDimensions)?;
    let h = u32::try_from(image.height()).map_err(|_| EngineError::InvalidDimensions)?;
    let img = image::RgbaImage::from_raw(w, h, image.pixels().to_vec())
        .ok_or_else(|| EngineError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| EngineError::Io(e.to_string()))?;
    debug!(path = %path.display(), width = w, height = h, "wrote png");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthesize_organism;
    use microbe_forge_core::RenderConfig;
    use microbe_forge_organisms::OrganismId;

    #[test]
    fn write_png_round_trip() {
        let config = RenderConfig { canvas_size: 64, output_size: 32 };
        let id = OrganismId::Yeast;
        let raster = synthesize_organism(id, id.default_color(), &config).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("yeast.png");

        write_png(&raster, &path).unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.width(), 32);
        assert_eq!(img.height(), 32);
        assert_eq!(img.into_raw(), raster.pixels());
    }

    #[test]
    fn write_png_into_missing_directory_is_io_error() {
        let raster = RasterImage::new(2, 2, vec![0; 16]).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("x.png");
        assert!(matches!(write_png(&raster, &path), Err(EngineError::Io(_))));
    }
}
