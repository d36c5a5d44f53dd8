// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Luminosity grayscale.

use diptych_core::types::{PixelBuffer, Rgba};

/// Channel weights in hundredths: 0.21 R + 0.72 G + 0.07 B.
const WEIGHT_R: u32 = 21;
const WEIGHT_G: u32 = 72;
const WEIGHT_B: u32 = 7;
const WEIGHT_SUM: u32 = WEIGHT_R + WEIGHT_G + WEIGHT_B;

/// Gray level of one pixel, `round(0.21 R + 0.72 G + 0.07 B)`.
///
/// Ties round up (half away from zero), so `117.5` becomes `118`. The sum is
/// computed exactly in integers and never exceeds 255.
pub fn luminosity(r: u8, g: u8, b: u8) -> u8 {
    let weighted = WEIGHT_R * u32::from(r) + WEIGHT_G * u32::from(g) + WEIGHT_B * u32::from(b);
    ((weighted + WEIGHT_SUM / 2) / WEIGHT_SUM) as u8
}

/// Convert `source` to grayscale: R, G and B get the luminosity and alpha is
/// copied. The output has the same dimensions as the input.
pub fn to_grayscale(source: &PixelBuffer) -> PixelBuffer {
    source.map_pixels(gray_pixel)
}

fn gray_pixel([r, g, b, a]: Rgba) -> Rgba {
    let gray = luminosity(r, g, b);
    [gray, gray, gray, a]
}
