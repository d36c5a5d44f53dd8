// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Decoded image samples handed over by a document image source.

use diptych_core::error::Result;
use diptych_core::types::{PixelBuffer, SampleLayout};

use crate::raster::rgb_to_buffer;

/// One image as decoded from a document, before it enters the raster stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentImage {
    pub width: u32,
    pub height: u32,
    pub layout: SampleLayout,
    pub samples: Vec<u8>,
}

impl DocumentImage {
    /// Normalise to an RGBA [`PixelBuffer`], expanding RGB samples with full
    /// opacity. The sample length must match the dimensions and layout.
    pub fn into_pixel_buffer(self) -> Result<PixelBuffer> {
        match self.layout {
            SampleLayout::Rgb => rgb_to_buffer(self.width, self.height, &self.samples),
            SampleLayout::Rgba => PixelBuffer::from_raw(self.width, self.height, self.samples),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diptych_core::error::DiptychError;

    #[test]
    fn rgb_samples_are_expanded() {
        let image = DocumentImage {
            width: 2,
            height: 1,
            layout: SampleLayout::Rgb,
            samples: vec![1, 2, 3, 4, 5, 6],
        };
        let buf = image.into_pixel_buffer().unwrap();
        assert_eq!(buf.as_bytes(), &[1, 2, 3, 255, 4, 5, 6, 255]);
    }

    #[test]
    fn rgba_samples_pass_through() {
        let image = DocumentImage {
            width: 1,
            height: 1,
            layout: SampleLayout::Rgba,
            samples: vec![9, 8, 7, 6],
        };
        assert_eq!(image.into_pixel_buffer().unwrap().get_pixel(0, 0), [9, 8, 7, 6]);
    }

    #[test]
    fn mismatched_rgba_length_is_rejected() {
        let image = DocumentImage {
            width: 2,
            height: 2,
            layout: SampleLayout::Rgba,
            samples: vec![0; 12],
        };
        assert!(matches!(
            image.into_pixel_buffer(),
            Err(DiptychError::BufferLengthMismatch { expected: 16, actual: 12 })
        ));
    }
}
