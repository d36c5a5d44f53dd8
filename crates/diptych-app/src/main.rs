// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Diptych — extract the images embedded in a PDF and combine the last two.
//
// Entry point. Initialises logging, parses arguments, runs the pipeline, and
// reports the outcome in plain words. Detailed errors go to the log only.

mod cli;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use diptych_core::error::Result;
use diptych_core::human_errors::{NO_IMAGES_FOUND, humanize_error};
use diptych_document::DiptychPipeline;
use diptych_document::image::encode;

use cli::Cli;

/// File name of the combined colour image.
const COMBINED_FILE: &str = "combined.png";
/// File name of the grayscale copy.
const GRAYSCALE_FILE: &str = "combined-gray.png";

/// What a successful run produced.
#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    /// The document had no usable images.
    NoImages,
    /// PNG files written.
    Written {
        combined: PathBuf,
        grayscale: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    tracing::info!(input = %cli.input.display(), "Diptych starting");

    match run(&cli) {
        Ok(Outcome::NoImages) => {
            println!("{NO_IMAGES_FOUND}");
            ExitCode::SUCCESS
        }
        Ok(Outcome::Written {
            combined,
            grayscale,
        }) => {
            println!("{}", combined.display());
            if let Some(gray) = grayscale {
                println!("{}", gray.display());
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(%err, "Processing failed");
            let human = humanize_error(&err);
            println!("{}", human.message);
            eprintln!("{}", human.suggestion);
            ExitCode::FAILURE
        }
    }
}

/// Run the pipeline for one document and write its PNG outputs.
fn run(cli: &Cli) -> Result<Outcome> {
    let pipeline = DiptychPipeline::new(cli.pipeline_config()?)?;
    let Some(output) = pipeline.process_pdf_file(&cli.input)? else {
        return Ok(Outcome::NoImages);
    };

    std::fs::create_dir_all(&cli.output_dir)?;

    let combined = cli.output_dir.join(COMBINED_FILE);
    encode::save_png(&output.combined, &combined)?;
    tracing::info!(path = %combined.display(), "Combined image written");

    let grayscale = match &output.grayscale {
        Some(gray) => {
            let path = cli.output_dir.join(GRAYSCALE_FILE);
            encode::save_png(gray, &path)?;
            tracing::info!(path = %path.display(), "Grayscale image written");
            Some(path)
        }
        None => None,
    };

    Ok(Outcome::Written {
        combined,
        grayscale,
    })
}
