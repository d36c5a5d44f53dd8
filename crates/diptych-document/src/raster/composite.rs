// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Side-by-side compositing onto a white canvas.

use diptych_core::config::SideBySideLayout;
use diptych_core::error::{DiptychError, Result};
use diptych_core::types::{OPAQUE_WHITE, PixelBuffer};
use tracing::debug;

/// Place `left` and `right` next to each other on an opaque white canvas.
///
/// The canvas is `left.w + right.w + gap + 2 * margin` wide and
/// `max(left.h, right.h) + 2 * margin` tall. `left` goes at `(margin, margin)`
/// and `right` at `(left.w + gap + margin, margin)`. Source pixels overwrite
/// the background as-is, alpha included.
///
/// Any two buffers are accepted; which ones to pair is the caller's choice.
pub fn compose_side_by_side(
    left: &PixelBuffer,
    right: &PixelBuffer,
    gap: u32,
    margin: u32,
) -> Result<PixelBuffer> {
    for input in [left, right] {
        if input.is_empty() {
            return Err(DiptychError::invalid_dimension(input.width(), input.height()));
        }
    }

    let double_margin = margin.checked_mul(2);
    let width = double_margin.and_then(|dm| {
        left.width()
            .checked_add(right.width())?
            .checked_add(gap)?
            .checked_add(dm)
    });
    let height = double_margin.and_then(|dm| left.height().max(right.height()).checked_add(dm));
    let (Some(width), Some(height)) = (width, height) else {
        return Err(DiptychError::invalid_dimension(
            u64::from(left.width()) + u64::from(right.width()) + u64::from(gap) + 2 * u64::from(margin),
            u64::from(left.height().max(right.height())) + 2 * u64::from(margin),
        ));
    };

    debug!(
        left_w = left.width(),
        left_h = left.height(),
        right_w = right.width(),
        right_h = right.height(),
        gap,
        margin,
        width,
        height,
        "Compositing side by side"
    );

    let mut canvas = PixelBuffer::filled(width, height, OPAQUE_WHITE)?;
    canvas.copy_from(left, margin, margin)?;
    canvas.copy_from(right, left.width() + gap + margin, margin)?;
    Ok(canvas)
}

/// [`compose_side_by_side`] with gap and margin taken from `layout`.
pub fn compose_with_layout(
    left: &PixelBuffer,
    right: &PixelBuffer,
    layout: SideBySideLayout,
) -> Result<PixelBuffer> {
    compose_side_by_side(left, right, layout.gap, layout.margin)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, pixel: [u8; 4]) -> PixelBuffer {
        PixelBuffer::filled(width, height, pixel).unwrap()
    }

    fn patterned(width: u32, height: u32, seed: u8) -> PixelBuffer {
        PixelBuffer::from_fn(width, height, |x, y| {
            [seed, x as u8, y as u8, seed.wrapping_add((x * y) as u8)]
        })
        .unwrap()
    }

    #[test]
    fn dimension_law_holds() {
        let cases = [
            (1, 1, 1, 1, 0, 0),
            (3, 5, 4, 2, 1, 1),
            (2, 2, 6, 7, 0, 3),
            (10, 4, 1, 9, 5, 0),
            (8, 8, 8, 8, 50, 30),
        ];
        for (w1, h1, w2, h2, g, m) in cases {
            let out =
                compose_side_by_side(&patterned(w1, h1, 1), &patterned(w2, h2, 2), g, m).unwrap();
            assert_eq!(out.width(), w1 + w2 + g + 2 * m);
            assert_eq!(out.height(), h1.max(h2) + 2 * m);
        }
    }

    #[test]
    fn placement_and_background_laws_hold() {
        let (w1, h1, w2, h2, g, m) = (3, 4, 2, 6, 2, 1);
        let left = patterned(w1, h1, 10);
        let right = patterned(w2, h2, 20);
        let out = compose_side_by_side(&left, &right, g, m).unwrap();

        let in_left = |x: u32, y: u32| (m..m + w1).contains(&x) && (m..m + h1).contains(&y);
        let right_x = w1 + g + m;
        let in_right = |x: u32, y: u32| (right_x..right_x + w2).contains(&x) && (m..m + h2).contains(&y);

        for y in 0..out.height() {
            for x in 0..out.width() {
                let px = out.get_pixel(x, y);
                if in_left(x, y) {
                    assert_eq!(px, left.get_pixel(x - m, y - m), "left at ({x}, {y})");
                } else if in_right(x, y) {
                    assert_eq!(px, right.get_pixel(x - right_x, y - m), "right at ({x}, {y})");
                } else {
                    assert_eq!(px, OPAQUE_WHITE, "background at ({x}, {y})");
                }
            }
        }
    }

    /// Transparent source pixels overwrite the white background unchanged.
    #[test]
    fn alpha_is_not_blended() {
        let clear = solid(1, 1, [10, 20, 30, 0]);
        let out = compose_side_by_side(&clear, &clear, 0, 0).unwrap();
        assert_eq!(out.get_pixel(0, 0), [10, 20, 30, 0]);
        assert_eq!(out.get_pixel(1, 0), [10, 20, 30, 0]);
    }

    #[test]
    fn zero_gap_and_margin_abut_images() {
        let out = compose_side_by_side(&solid(2, 1, [1, 1, 1, 1]), &solid(1, 1, [2, 2, 2, 2]), 0, 0)
            .unwrap();
        assert_eq!(out.as_bytes(), &[1, 1, 1, 1, 1, 1, 1, 1, 2, 2, 2, 2]);
    }

    #[test]
    fn layout_defaults_are_applied() {
        let out = compose_with_layout(
            &solid(4, 4, [0, 0, 0, 255]),
            &solid(4, 2, [0, 0, 0, 255]),
            SideBySideLayout::default(),
        )
        .unwrap();
        assert_eq!(out.dimensions(), (4 + 4 + 50 + 60, 4 + 60));
        assert_eq!(out.get_pixel(30, 30), [0, 0, 0, 255]);
        assert_eq!(out.get_pixel(84, 33), OPAQUE_WHITE);
    }

    #[test]
    fn empty_input_is_rejected() {
        let empty = PixelBuffer::new(0, 0).unwrap();
        let ok = solid(1, 1, OPAQUE_WHITE);
        assert!(matches!(
            compose_side_by_side(&empty, &ok, 0, 0),
            Err(DiptychError::InvalidDimension { .. })
        ));
        assert!(compose_side_by_side(&ok, &empty, 0, 0).is_err());
    }

    #[test]
    fn oversized_canvas_is_rejected() {
        let px = solid(1, 1, OPAQUE_WHITE);
        assert!(matches!(
            compose_side_by_side(&px, &px, u32::MAX, 0),
            Err(DiptychError::InvalidDimension { .. })
        ));
    }
}
