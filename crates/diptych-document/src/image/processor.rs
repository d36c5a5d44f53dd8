// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Raster processor — resample, composite, grayscale, and encode a single
// in-memory pixel buffer, with chainable steps.

use std::path::Path;

use diptych_core::config::SideBySideLayout;
use diptych_core::error::Result;
use diptych_core::types::PixelBuffer;
use tracing::{debug, info, instrument};

use super::encode;
use crate::raster;
use crate::source::DocumentImage;

/// Processing pipeline operating on a single pixel buffer.
///
/// Every step consumes `self` and returns a new `RasterProcessor` wrapping a
/// freshly allocated buffer, so steps chain:
///
/// ```ignore
/// let png = RasterProcessor::from_document_image(image)?
///     .resample(1279, 2048)?
///     .side_by_side(&other, SideBySideLayout::default())?
///     .grayscale()
///     .to_png_bytes()?;
/// ```
#[derive(Debug, Clone)]
pub struct RasterProcessor {
    /// The current working buffer.
    buffer: PixelBuffer,
}

impl RasterProcessor {
    // -- Construction ---------------------------------------------------------

    /// Wrap an existing buffer.
    pub fn from_buffer(buffer: PixelBuffer) -> Self {
        Self { buffer }
    }

    /// Normalise decoded document samples (RGB or RGBA) into a processor.
    #[instrument(skip_all, fields(width = image.width, height = image.height, layout = ?image.layout))]
    pub fn from_document_image(image: DocumentImage) -> Result<Self> {
        let buffer = image.into_pixel_buffer()?;
        debug!("Document image normalised to RGBA");
        Ok(Self { buffer })
    }

    // -- Accessors ------------------------------------------------------------

    /// Current width in pixels.
    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    /// Current height in pixels.
    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    /// Borrow the underlying buffer.
    pub fn as_buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    /// Consume the processor and return the underlying buffer.
    pub fn into_buffer(self) -> PixelBuffer {
        self.buffer
    }

    // -- Transformations (consume self, return new Self) -----------------------

    /// Resample to exactly `width` x `height` with nearest-neighbour sampling.
    #[instrument(skip(self))]
    pub fn resample(self, width: u32, height: u32) -> Result<Self> {
        info!(
            from_w = self.buffer.width(),
            from_h = self.buffer.height(),
            "Resampling image"
        );
        let buffer = raster::resample(&self.buffer, width, height)?;
        Ok(Self { buffer })
    }

    /// Place the current image on the left and `right` on the right of a white
    /// canvas.
    #[instrument(skip(self, right))]
    pub fn side_by_side(self, right: &PixelBuffer, layout: SideBySideLayout) -> Result<Self> {
        let buffer = raster::compose_with_layout(&self.buffer, right, layout)?;
        info!(
            width = buffer.width(),
            height = buffer.height(),
            "Images composited"
        );
        Ok(Self { buffer })
    }

    /// Convert to luminosity grayscale, keeping alpha.
    #[instrument(skip(self))]
    pub fn grayscale(self) -> Self {
        info!("Converting to grayscale");
        Self {
            buffer: raster::to_grayscale(&self.buffer),
        }
    }

    // -- Output ---------------------------------------------------------------

    /// Encode the current buffer as PNG bytes.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>> {
        encode::to_png_bytes(&self.buffer)
    }

    /// Write the current buffer to `path` as PNG.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        encode::save_png(&self.buffer, path)
    }
}

impl From<PixelBuffer> for RasterProcessor {
    fn from(buffer: PixelBuffer) -> Self {
        Self::from_buffer(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diptych_core::types::{OPAQUE_WHITE, SampleLayout};

    fn rgb_image() -> DocumentImage {
        DocumentImage {
            width: 2,
            height: 2,
            layout: SampleLayout::Rgb,
            samples: vec![10, 20, 30, 40, 50, 60, 70, 80, 90, 100, 110, 120],
        }
    }

    #[test]
    fn chained_steps_match_free_functions() {
        let right = PixelBuffer::filled(3, 3, [200, 100, 50, 255]).unwrap();
        let layout = SideBySideLayout { gap: 2, margin: 1 };

        let chained = RasterProcessor::from_document_image(rgb_image())
            .unwrap()
            .resample(4, 4)
            .unwrap()
            .side_by_side(&right, layout)
            .unwrap()
            .grayscale()
            .into_buffer();

        let base = rgb_image().into_pixel_buffer().unwrap();
        let manual = raster::to_grayscale(
            &raster::compose_with_layout(&raster::resample(&base, 4, 4).unwrap(), &right, layout)
                .unwrap(),
        );
        assert_eq!(chained, manual);
        assert_eq!(chained.dimensions(), (4 + 3 + 2 + 2, 4 + 2));
        assert_eq!(chained.get_pixel(7, 1), [118, 118, 118, 255]);
        assert_eq!(chained.get_pixel(0, 0), OPAQUE_WHITE);
    }

    #[test]
    fn resample_error_propagates() {
        let processor = RasterProcessor::from_buffer(PixelBuffer::new(2, 2).unwrap());
        assert!(processor.resample(0, 1).is_err());
    }

    #[test]
    fn save_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gray.png");
        RasterProcessor::from(PixelBuffer::filled(3, 2, [1, 2, 3, 255]).unwrap())
            .grayscale()
            .save(&path)
            .unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..4], b"\x89PNG");
    }
}
