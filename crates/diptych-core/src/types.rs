// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Diptych image pipeline.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DiptychError, Result};

/// One RGBA pixel, `[R, G, B, A]`.
pub type Rgba = [u8; 4];

/// Opaque white, the compositing background.
pub const OPAQUE_WHITE: Rgba = [255, 255, 255, 255];

/// Bytes per pixel in a [`PixelBuffer`].
pub const RGBA_CHANNELS: usize = 4;

/// Bytes per pixel in a packed RGB sample array.
pub const RGB_CHANNELS: usize = 3;

/// An owned RGBA raster in row-major byte order.
///
/// The byte length is always `width * height * 4`; every constructor checks
/// it, so the accessors never have to. Pixel `(x, y)` occupies the four bytes
/// starting at `(y * width + x) * 4`, and that arithmetic stays inside this
/// type.
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl PixelBuffer {
    // -- Construction ---------------------------------------------------------

    /// Zero-filled (transparent black) buffer.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::filled(width, height, [0, 0, 0, 0])
    }

    /// Buffer with every pixel set to `pixel`.
    pub fn filled(width: u32, height: u32, pixel: Rgba) -> Result<Self> {
        let len = byte_len(width, height)?;
        Ok(Self {
            width,
            height,
            pixels: pixel.repeat(len / RGBA_CHANNELS),
        })
    }

    /// Take ownership of raw RGBA bytes.
    ///
    /// Fails with [`DiptychError::BufferLengthMismatch`] unless
    /// `pixels.len() == width * height * 4`.
    pub fn from_raw(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        let expected = byte_len(width, height)?;
        if pixels.len() != expected {
            return Err(DiptychError::BufferLengthMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build a buffer by evaluating `f(x, y)` for every pixel in row-major order.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> Rgba) -> Result<Self> {
        let len = byte_len(width, height)?;
        let mut pixels = Vec::with_capacity(len);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&f(x, y));
            }
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// New buffer of the same size with `f` applied to every pixel.
    pub fn map_pixels(&self, mut f: impl FnMut(Rgba) -> Rgba) -> PixelBuffer {
        let mut pixels = Vec::with_capacity(self.pixels.len());
        for pixel in self.pixels() {
            pixels.extend_from_slice(&f(pixel));
        }
        PixelBuffer {
            width: self.width,
            height: self.height,
            pixels,
        }
    }

    // -- Accessors ------------------------------------------------------------

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// True when either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Read the pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the buffer.
    pub fn get_pixel(&self, x: u32, y: u32) -> Rgba {
        match self.get_pixel_checked(x, y) {
            Some(pixel) => pixel,
            None => panic!(
                "pixel ({x}, {y}) out of bounds for {}x{} buffer",
                self.width, self.height
            ),
        }
    }

    /// Read the pixel at `(x, y)`, or `None` when out of bounds.
    pub fn get_pixel_checked(&self, x: u32, y: u32) -> Option<Rgba> {
        let start = self.offset(x, y)?;
        let mut pixel = [0u8; RGBA_CHANNELS];
        pixel.copy_from_slice(&self.pixels[start..start + RGBA_CHANNELS]);
        Some(pixel)
    }

    /// Overwrite the pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the buffer.
    pub fn put_pixel(&mut self, x: u32, y: u32, pixel: Rgba) {
        let Some(start) = self.offset(x, y) else {
            panic!(
                "pixel ({x}, {y}) out of bounds for {}x{} buffer",
                self.width, self.height
            );
        };
        self.pixels[start..start + RGBA_CHANNELS].copy_from_slice(&pixel);
    }

    /// Raw bytes of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    pub fn row(&self, y: u32) -> &[u8] {
        assert!(y < self.height, "row {y} out of bounds for height {}", self.height);
        let stride = self.stride();
        let start = y as usize * stride;
        &self.pixels[start..start + stride]
    }

    /// Iterate over all pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = Rgba> + '_ {
        self.pixels
            .chunks_exact(RGBA_CHANNELS)
            .map(|c| [c[0], c[1], c[2], c[3]])
    }

    /// Borrow the raw RGBA bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// Consume the buffer and return the raw RGBA bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.pixels
    }

    // -- Mutation -------------------------------------------------------------

    /// Copy every pixel of `source` into `self` with its top-left corner at
    /// `(dest_x, dest_y)`. Pixels are overwritten, not blended.
    ///
    /// Fails with [`DiptychError::InvalidDimension`] if `source` does not fit
    /// entirely inside `self` at that position; nothing is written in that case.
    pub fn copy_from(&mut self, source: &PixelBuffer, dest_x: u32, dest_y: u32) -> Result<()> {
        let fits_x = dest_x
            .checked_add(source.width)
            .is_some_and(|right| right <= self.width);
        let fits_y = dest_y
            .checked_add(source.height)
            .is_some_and(|bottom| bottom <= self.height);
        if !fits_x || !fits_y {
            return Err(DiptychError::invalid_dimension(source.width, source.height));
        }

        let src_stride = source.stride();
        let dst_stride = self.stride();
        let col = dest_x as usize * RGBA_CHANNELS;
        for y in 0..source.height as usize {
            let dst_start = (dest_y as usize + y) * dst_stride + col;
            let src_start = y * src_stride;
            self.pixels[dst_start..dst_start + src_stride]
                .copy_from_slice(&source.pixels[src_start..src_start + src_stride]);
        }
        Ok(())
    }

    // -- Helpers --------------------------------------------------------------

    fn stride(&self) -> usize {
        self.width as usize * RGBA_CHANNELS
    }

    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * RGBA_CHANNELS)
    }
}

impl fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.pixels.len())
            .finish()
    }
}

/// `width * height * 4`, or `InvalidDimension` on overflow.
fn byte_len(width: u32, height: u32) -> Result<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(RGBA_CHANNELS))
        .ok_or_else(|| DiptychError::invalid_dimension(width, height))
}

/// Channel layout of decoded samples handed over by a document image source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SampleLayout {
    /// Packed `[R, G, B]`, no alpha.
    Rgb,
    /// Packed `[R, G, B, A]`.
    Rgba,
}

impl SampleLayout {
    /// Bytes per pixel.
    pub fn channels(&self) -> usize {
        match self {
            Self::Rgb => RGB_CHANNELS,
            Self::Rgba => RGBA_CHANNELS,
        }
    }
}
