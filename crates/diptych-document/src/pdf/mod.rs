// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF module — locating and decoding the raster images painted on each page.

pub mod extract;

pub use extract::ImageExtractor;
