// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PNG encoding of finished pixel buffers via the `image` crate.

use std::path::Path;

use diptych_core::error::{DiptychError, Result};
use diptych_core::types::PixelBuffer;
use image::{ImageFormat, RgbaImage};
use tracing::{debug, instrument};

/// Encode `buffer` as PNG bytes.
#[instrument(skip_all, fields(width = buffer.width(), height = buffer.height()))]
pub fn to_png_bytes(buffer: &PixelBuffer) -> Result<Vec<u8>> {
    let image = to_rgba_image(buffer)?;
    let mut bytes = Vec::new();
    image
        .write_to(&mut std::io::Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|err| DiptychError::ImageError(format!("PNG encoding failed: {}", err)))?;
    debug!(png_bytes = bytes.len(), "PNG encoded");
    Ok(bytes)
}

/// Write `buffer` to `path` as a PNG file.
pub fn save_png(buffer: &PixelBuffer, path: impl AsRef<Path>) -> Result<()> {
    let bytes = to_png_bytes(buffer)?;
    std::fs::write(path.as_ref(), bytes)?;
    Ok(())
}

/// Copy into an `image::RgbaImage`; both use the same row-major RGBA layout.
pub fn to_rgba_image(buffer: &PixelBuffer) -> Result<RgbaImage> {
    if buffer.is_empty() {
        return Err(DiptychError::invalid_dimension(buffer.width(), buffer.height()));
    }
    RgbaImage::from_raw(buffer.width(), buffer.height(), buffer.as_bytes().to_vec()).ok_or_else(
        || DiptychError::ImageError("pixel buffer does not fit image dimensions".to_string()),
    )
}

/// Convert a decoded `image::RgbaImage` into a [`PixelBuffer`].
pub fn from_rgba_image(image: RgbaImage) -> Result<PixelBuffer> {
    let (width, height) = image.dimensions();
    PixelBuffer::from_raw(width, height, image.into_raw())
}
