// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Extraction pipeline — PDF → images → resample → pair the last two →
// composite → grayscale.
//
// Which two images get paired is a policy of this driver (the last two in
// paint order); the raster functions accept any pair.

use std::path::Path;

use diptych_core::config::PipelineConfig;
use diptych_core::error::{DiptychError, Result};
use diptych_core::types::PixelBuffer;
use tracing::{debug, info, instrument};

use crate::image::encode;
use crate::pdf::ImageExtractor;
use crate::raster;

/// Result of one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Number of images extracted from the document.
    pub images_found: usize,
    /// The last two images side by side.
    pub combined: PixelBuffer,
    /// Grayscale copy of `combined`, when enabled.
    pub grayscale: Option<PixelBuffer>,
}

impl PipelineOutput {
    /// PNG encoding of the combined image.
    pub fn combined_png(&self) -> Result<Vec<u8>> {
        encode::to_png_bytes(&self.combined)
    }

    /// PNG encoding of the grayscale image, if one was produced.
    pub fn grayscale_png(&self) -> Result<Option<Vec<u8>>> {
        self.grayscale.as_ref().map(encode::to_png_bytes).transpose()
    }
}

/// Drives extraction and raster processing for one document at a time.
///
/// Holds only its configuration; every run is independent.
#[derive(Debug, Clone, Default)]
pub struct DiptychPipeline {
    config: PipelineConfig,
}

impl DiptychPipeline {
    /// Validate `config` and build a pipeline around it.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Extract from a PDF on disk and process.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn process_pdf_file(&self, path: impl AsRef<Path>) -> Result<Option<PipelineOutput>> {
        let extractor = ImageExtractor::open(path)?;
        self.process_images(extractor.extract_pixel_buffers()?)
    }

    /// Extract from in-memory PDF bytes and process.
    #[instrument(skip_all, fields(bytes_len = data.len()))]
    pub fn process_pdf_bytes(&self, data: &[u8]) -> Result<Option<PipelineOutput>> {
        let extractor = ImageExtractor::from_bytes(data)?;
        self.process_images(extractor.extract_pixel_buffers()?)
    }

    /// Resample every image, pair the last two, and composite them.
    ///
    /// Returns `Ok(None)` when `images` is empty. A single image fails with
    /// [`DiptychError::InvalidInput`], since compositing needs two.
    #[instrument(skip_all, fields(count = images.len()))]
    pub fn process_images(&self, images: Vec<PixelBuffer>) -> Result<Option<PipelineOutput>> {
        let images_found = images.len();
        if images_found == 0 {
            info!("No images to process");
            return Ok(None);
        }
        if images_found < 2 {
            return Err(DiptychError::InvalidInput(format!(
                "found {} image, need at least two to combine",
                images_found
            )));
        }

        let PipelineConfig {
            target_width,
            target_height,
            layout,
            grayscale,
        } = self.config;

        let resized = images
            .iter()
            .map(|image| raster::resample(image, target_width, target_height))
            .collect::<Result<Vec<_>>>()?;
        debug!(target_width, target_height, "All images resampled");

        let (left, right) = (&resized[images_found - 2], &resized[images_found - 1]);
        let combined = raster::compose_with_layout(left, right, layout)?;
        let grayscale = grayscale.then(|| raster::to_grayscale(&combined));

        info!(
            images_found,
            width = combined.width(),
            height = combined.height(),
            grayscale = grayscale.is_some(),
            "Pipeline complete"
        );

        Ok(Some(PipelineOutput {
            images_found,
            combined,
            grayscale,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diptych_core::config::SideBySideLayout;
    use diptych_core::types::OPAQUE_WHITE;

    fn small_config() -> PipelineConfig {
        PipelineConfig {
            target_width: 4,
            target_height: 6,
            layout: SideBySideLayout { gap: 2, margin: 1 },
            grayscale: true,
        }
    }

    fn solid(pixel: [u8; 4]) -> PixelBuffer {
        PixelBuffer::filled(3, 2, pixel).unwrap()
    }

    #[test]
    fn no_images_yields_none() {
        let pipeline = DiptychPipeline::new(small_config()).unwrap();
        assert!(pipeline.process_images(Vec::new()).unwrap().is_none());
    }

    #[test]
    fn single_image_is_invalid_input() {
        let pipeline = DiptychPipeline::new(small_config()).unwrap();
        assert!(matches!(
            pipeline.process_images(vec![solid([0, 0, 0, 255])]),
            Err(DiptychError::InvalidInput(_))
        ));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = PipelineConfig {
            target_width: 0,
            ..small_config()
        };
        assert!(matches!(
            DiptychPipeline::new(config),
            Err(DiptychError::Config(_))
        ));
    }

    /// The last two images are paired, in order, after resampling.
    #[test]
    fn pairs_last_two_images() {
        let pipeline = DiptychPipeline::new(small_config()).unwrap();
        let output = pipeline
            .process_images(vec![
                solid([1, 1, 1, 255]),
                solid([200, 100, 50, 255]),
                solid([0, 0, 255, 128]),
            ])
            .unwrap()
            .unwrap();

        assert_eq!(output.images_found, 3);
        assert_eq!(output.combined.dimensions(), (4 + 4 + 2 + 2, 6 + 2));
        assert_eq!(output.combined.get_pixel(1, 1), [200, 100, 50, 255]);
        assert_eq!(output.combined.get_pixel(7, 1), [0, 0, 255, 128]);
        assert_eq!(output.combined.get_pixel(5, 1), OPAQUE_WHITE);

        let gray = output.grayscale.as_ref().unwrap();
        assert_eq!(gray.get_pixel(1, 1), [118, 118, 118, 255]);
        assert_eq!(gray.get_pixel(7, 6), [18, 18, 18, 128]);
    }

    #[test]
    fn grayscale_can_be_disabled() {
        let config = PipelineConfig {
            grayscale: false,
            ..small_config()
        };
        let output = DiptychPipeline::new(config)
            .unwrap()
            .process_images(vec![solid([9, 9, 9, 255]), solid([9, 9, 9, 255])])
            .unwrap()
            .unwrap();
        assert!(output.grayscale.is_none());
        assert!(output.grayscale_png().unwrap().is_none());
        assert!(!output.combined_png().unwrap().is_empty());
    }

    #[test]
    fn invalid_pdf_bytes_propagate() {
        let pipeline = DiptychPipeline::default();
        assert!(matches!(
            pipeline.process_pdf_bytes(b"not a pdf"),
            Err(DiptychError::PdfError(_))
        ));
    }
}
