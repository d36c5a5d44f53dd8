// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// RGB → RGBA channel expansion.

use diptych_core::error::{DiptychError, Result};
use diptych_core::types::{PixelBuffer, RGB_CHANNELS, RGBA_CHANNELS};

/// Alpha written for every expanded pixel; packed RGB carries no alpha.
const EXPANDED_ALPHA: u8 = 255;

/// Expand packed `[R, G, B]` samples into `[R, G, B, 255]` pixels.
///
/// Fails with [`DiptychError::InvalidInput`] when `samples.len()` is not a
/// multiple of 3.
pub fn expand_to_rgba(samples: &[u8]) -> Result<Vec<u8>> {
    if samples.len() % RGB_CHANNELS != 0 {
        return Err(DiptychError::InvalidInput(format!(
            "RGB sample length {} is not a multiple of {}",
            samples.len(),
            RGB_CHANNELS
        )));
    }

    let mut rgba = Vec::with_capacity(samples.len() / RGB_CHANNELS * RGBA_CHANNELS);
    for rgb in samples.chunks_exact(RGB_CHANNELS) {
        rgba.extend_from_slice(rgb);
        rgba.push(EXPANDED_ALPHA);
    }
    Ok(rgba)
}

/// Expand packed RGB samples of a `width` x `height` image into a [`PixelBuffer`].
///
/// The sample count must be exactly `width * height * 3`.
pub fn rgb_to_buffer(width: u32, height: u32, samples: &[u8]) -> Result<PixelBuffer> {
    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(RGB_CHANNELS))
        .ok_or_else(|| DiptychError::invalid_dimension(width, height))?;
    if samples.len() != expected {
        return Err(DiptychError::BufferLengthMismatch {
            expected,
            actual: samples.len(),
        });
    }
    PixelBuffer::from_raw(width, height, expand_to_rgba(samples)?)
}
