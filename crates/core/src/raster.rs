//! The finished, caller-owned image.

use crate::color::Rgba;
use crate::error::EngineError;

/// Row-major RGBA8 image (straight alpha), `width × height × 4` bytes.
///
/// Produced by the Finalizer and handed to callers; it never references the
/// canvas it was derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl RasterImage {
    /// Wraps an existing RGBA8 buffer.
    ///
    /// Returns `EngineError::InvalidDimensions` for zero sizes or a buffer
    /// whose length is not `width × height × 4`.
    pub fn new(width: usize, height: usize, pixels: Vec<u8>) -> Result<Self, EngineError> {
        if width == 0 || height == 0 {
            return Err(EngineError::InvalidDimensions);
        }
        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(4))
            .ok_or(EngineError::InvalidDimensions)?;
        if pixels.len() != expected {
            return Err(EngineError::InvalidDimensions);
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Canvas buffers are already validated.
    pub(crate) fn from_canvas_parts(width: usize, height: usize, pixels: Vec<u8>) -> Self {
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Returns the pixel at `(x, y)`, or `None` outside the image.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y * self.width + x) * 4;
        Some(Rgba {
            r: self.pixels[i],
            g: self.pixels[i + 1],
            b: self.pixels[i + 2],
            a: self.pixels[i + 3],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_accepts_matching_buffer() {
        let img = RasterImage::new(2, 3, vec![7; 24]).unwrap();
        assert_eq!(img.width(), 2);
        assert_eq!(img.height(), 3);
        assert_eq!(img.pixel(1, 2), Some(Rgba { r: 7, g: 7, b: 7, a: 7 }));
        assert_eq!(img.pixel(2, 0), None);
    }

    #[test]
    fn new_rejects_wrong_length() {
        assert!(matches!(
            RasterImage::new(2, 2, vec![0; 15]),
            Err(EngineError::InvalidDimensions)
        ));
    }

    #[test]
    fn new_rejects_zero_size() {
        assert!(RasterImage::new(0, 2, Vec::new()).is_err());
    }

    #[test]
    fn into_pixels_returns_buffer() {
        let img = RasterImage::new(1, 1, vec![1, 2, 3, 4]).unwrap();
        assert_eq!(img.into_pixels(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn raster_image_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RasterImage>();
    }
}
