// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command-line arguments and the settings they resolve to.

use std::path::PathBuf;

use clap::Parser;
use diptych_core::config::PipelineConfig;
use diptych_core::error::Result;

/// Extract the images from a PDF, combine the last two side by side, and
/// write the result (plus a grayscale copy) as PNG.
#[derive(Debug, Parser)]
#[command(name = "diptych", version, about)]
pub struct Cli {
    /// PDF document to read.
    pub input: PathBuf,

    /// Directory the PNG files are written to.
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// JSON settings file; flags below override its values.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Width every extracted image is resampled to.
    #[arg(long)]
    pub width: Option<u32>,

    /// Height every extracted image is resampled to.
    #[arg(long)]
    pub height: Option<u32>,

    /// Pixels between the two images.
    #[arg(long)]
    pub gap: Option<u32>,

    /// Pixels of white border around the combined image.
    #[arg(long)]
    pub margin: Option<u32>,

    /// Skip the grayscale copy.
    #[arg(long)]
    pub no_grayscale: bool,
}

impl Cli {
    /// Settings file (or defaults) with command-line overrides applied.
    pub fn pipeline_config(&self) -> Result<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::from_json_file(path)?,
            None => PipelineConfig::default(),
        };

        if let Some(width) = self.width {
            config.target_width = width;
        }
        if let Some(height) = self.height {
            config.target_height = height;
        }
        if let Some(gap) = self.gap {
            config.layout.gap = gap;
        }
        if let Some(margin) = self.margin {
            config.layout.margin = margin;
        }
        if self.no_grayscale {
            config.grayscale = false;
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diptych_core::error::DiptychError;

    #[test]
    fn defaults_without_flags() {
        let cli = Cli::try_parse_from(["diptych", "doc.pdf"]).unwrap();
        assert_eq!(cli.output_dir, PathBuf::from("."));
        assert_eq!(cli.pipeline_config().unwrap(), PipelineConfig::default());
    }

    #[test]
    fn flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"target_width": 100, "layout": {"gap": 7, "margin": 3}}"#)
            .unwrap();

        let cli = Cli::try_parse_from([
            "diptych",
            "doc.pdf",
            "--config",
            path.to_str().unwrap(),
            "--margin",
            "0",
            "--no-grayscale",
        ])
        .unwrap();
        let config = cli.pipeline_config().unwrap();
        assert_eq!(config.target_width, 100);
        assert_eq!(config.target_height, 2048);
        assert_eq!(config.layout.gap, 7);
        assert_eq!(config.layout.margin, 0);
        assert!(!config.grayscale);
    }

    #[test]
    fn zero_width_flag_is_rejected() {
        let cli = Cli::try_parse_from(["diptych", "doc.pdf", "--width", "0"]).unwrap();
        assert!(matches!(cli.pipeline_config(), Err(DiptychError::Config(_))));
    }

    #[test]
    fn input_is_required() {
        assert!(Cli::try_parse_from(["diptych"]).is_err());
    }
}
