// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Nearest-neighbour resampling.

use diptych_core::error::{DiptychError, Result};
use diptych_core::types::PixelBuffer;
use tracing::debug;

/// Resample `source` to exactly `target_width` x `target_height` by point
/// sampling.
///
/// Destination pixel `(x, y)` copies source pixel
/// `(floor(x * src_w / target_w), floor(y * src_h / target_h))` with all four
/// channels unchanged. The ratio is evaluated in integer arithmetic, so the
/// sampled coordinate is always in bounds and the output is reproducible
/// byte for byte. Upsampling replicates pixels and downsampling drops them.
///
/// Fails with [`DiptychError::InvalidDimension`] when the source or the target
/// has a zero dimension.
pub fn resample(source: &PixelBuffer, target_width: u32, target_height: u32) -> Result<PixelBuffer> {
    if source.is_empty() {
        return Err(DiptychError::invalid_dimension(source.width(), source.height()));
    }
    if target_width == 0 || target_height == 0 {
        return Err(DiptychError::invalid_dimension(target_width, target_height));
    }

    debug!(
        from_w = source.width(),
        from_h = source.height(),
        target_width,
        target_height,
        "Resampling (nearest neighbour)"
    );

    // Column lookup is shared by every row.
    let src_columns: Vec<u32> = (0..target_width)
        .map(|x| nearest(x, source.width(), target_width))
        .collect();

    PixelBuffer::from_fn(target_width, target_height, |x, y| {
        let src_y = nearest(y, source.height(), target_height);
        source.get_pixel(src_columns[x as usize], src_y)
    })
}

/// `floor(dst * src_len / dst_len)`, which is `< src_len` for every `dst < dst_len`.
fn nearest(dst: u32, src_len: u32, dst_len: u32) -> u32 {
    (u64::from(dst) * u64::from(src_len) / u64::from(dst_len)) as u32
}
