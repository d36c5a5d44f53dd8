// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Raster module — pure operations over RGBA pixel buffers: nearest-neighbour
// resampling, side-by-side compositing, luminosity grayscale, and RGB → RGBA
// expansion. None of them hold state or mutate their inputs; each returns a
// freshly allocated buffer, so they are safe to run in parallel on distinct
// images.

pub mod composite;
pub mod expand;
pub mod grayscale;
pub mod resample;

pub use composite::{compose_side_by_side, compose_with_layout};
pub use expand::{expand_to_rgba, rgb_to_buffer};
pub use grayscale::{luminosity, to_grayscale};
pub use resample::resample;
