// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Diptych.

use thiserror::Error;

/// Top-level error type for all Diptych operations.
#[derive(Debug, Error)]
pub enum DiptychError {
    // -- Raster errors --
    #[error("invalid dimensions {width}x{height}: both must be positive and fit in memory")]
    InvalidDimension { width: u64, height: u64 },

    #[error("pixel buffer length mismatch: expected {expected} bytes, got {actual}")]
    BufferLengthMismatch { expected: usize, actual: usize },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    // -- Document errors --
    #[error("PDF operation failed: {0}")]
    PdfError(String),

    #[error("image processing failed: {0}")]
    ImageError(String),

    // -- Configuration / persistence --
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl DiptychError {
    /// Shorthand for a [`DiptychError::InvalidDimension`] from raster sizes.
    pub fn invalid_dimension(width: impl Into<u64>, height: impl Into<u64>) -> Self {
        Self::InvalidDimension {
            width: width.into(),
            height: height.into(),
        }
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, DiptychError>;
