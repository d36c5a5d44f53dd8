// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// diptych-document — Image extraction and raster processing for Diptych.
//
// Provides the pure RGBA raster operations (nearest-neighbour resample,
// side-by-side composite, luminosity grayscale, RGB → RGBA expansion), a
// chainable processor with PNG output, PDF image extraction, and the pipeline
// that ties them together.

pub mod image;
pub mod pdf;
pub mod pipeline;
pub mod raster;
pub mod source;

// Re-export the primary structs so callers can use `diptych_document::ImageExtractor` etc.
pub use image::processor::RasterProcessor;
pub use pdf::extract::ImageExtractor;
pub use pipeline::{DiptychPipeline, PipelineOutput};
pub use source::DocumentImage;
