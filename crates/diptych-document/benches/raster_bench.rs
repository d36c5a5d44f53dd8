// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the raster operations in the diptych-document
// crate, at the default pipeline resolution (1279x2048).

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use diptych_core::{PipelineConfig, PixelBuffer};
use diptych_document::raster;

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// A 640x480 RGB gradient, roughly the size of an embedded scan thumbnail.
fn rgb_samples() -> Vec<u8> {
    let (width, height) = (640u32, 480u32);
    let mut samples = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height {
        for x in 0..width {
            samples.extend_from_slice(&[(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8]);
        }
    }
    samples
}

fn resized_pair() -> (PixelBuffer, PixelBuffer) {
    let config = PipelineConfig::default();
    let source = raster::rgb_to_buffer(640, 480, &rgb_samples()).expect("fixture");
    let resized =
        raster::resample(&source, config.target_width, config.target_height).expect("fixture");
    (resized.clone(), resized)
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

fn bench_expand(c: &mut Criterion) {
    let samples = rgb_samples();
    c.bench_function("expand_to_rgba (640x480)", |b| {
        b.iter(|| black_box(raster::expand_to_rgba(black_box(&samples)).unwrap()));
    });
}

/// Upsample 640x480 to the default 1279x2048 target.
fn bench_resample(c: &mut Criterion) {
    let config = PipelineConfig::default();
    let source = raster::rgb_to_buffer(640, 480, &rgb_samples()).expect("fixture");
    c.bench_function("resample (640x480 -> 1279x2048)", |b| {
        b.iter(|| {
            black_box(
                raster::resample(black_box(&source), config.target_width, config.target_height)
                    .unwrap(),
            )
        });
    });
}

fn bench_composite_and_grayscale(c: &mut Criterion) {
    let (left, right) = resized_pair();
    let layout = PipelineConfig::default().layout;

    c.bench_function("compose_side_by_side (2x 1279x2048)", |b| {
        b.iter(|| black_box(raster::compose_with_layout(&left, &right, layout).unwrap()));
    });

    let combined = raster::compose_with_layout(&left, &right, layout).expect("fixture");
    c.bench_function("to_grayscale (combined)", |b| {
        b.iter(|| black_box(raster::to_grayscale(black_box(&combined))));
    });
}

criterion_group!(
    benches,
    bench_expand,
    bench_resample,
    bench_composite_and_grayscale
);
criterion_main!(benches);
