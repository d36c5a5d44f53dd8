// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pipeline configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DiptychError, Result};

/// Horizontal gap and outer margin used when placing two images side by side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SideBySideLayout {
    /// Pixels between the right edge of the left image and the right image.
    pub gap: u32,
    /// Pixels of background on every outer edge.
    pub margin: u32,
}

impl Default for SideBySideLayout {
    fn default() -> Self {
        Self { gap: 50, margin: 30 }
    }
}

/// Settings for one run of the extraction pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Width every extracted image is resampled to.
    pub target_width: u32,
    /// Height every extracted image is resampled to.
    pub target_height: u32,
    /// Placement of the two selected images on the combined canvas.
    pub layout: SideBySideLayout,
    /// Also produce a grayscale copy of the combined image.
    pub grayscale: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            target_width: 1279,
            target_height: 2048,
            layout: SideBySideLayout::default(),
            grayscale: true,
        }
    }
}

impl PipelineConfig {
    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&data)
    }

    /// Reject settings the raster stage cannot honour.
    pub fn validate(&self) -> Result<()> {
        if self.target_width == 0 || self.target_height == 0 {
            return Err(DiptychError::Config(format!(
                "target resolution must be positive, got {}x{}",
                self.target_width, self.target_height
            )));
        }
        Ok(())
    }
}
