// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable failure notifications.
//
// The delivery layer never shows raw errors. Every failure becomes the same
// "processing failed" notification, with a suggestion picked by error kind.

use crate::error::DiptychError;

/// Headline shown for every processing failure.
pub const PROCESSING_FAILED: &str = "Failed to extract images from the PDF.";

/// Message shown when a document contained no usable images.
pub const NO_IMAGES_FOUND: &str = "No images found in the PDF.";

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The user can fix it (another file, other settings).
    ActionRequired,
    /// Nothing the user can do about this input.
    Permanent,
    /// Environment problem; trying again may help.
    Transient,
}

/// A human-readable error with a plain message and an actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain summary (always [`PROCESSING_FAILED`]).
    pub message: String,
    /// What the user should try.
    pub suggestion: String,
    /// Severity level.
    pub severity: Severity,
}

/// Convert a `DiptychError` into the notification shown to the user.
pub fn humanize_error(err: &DiptychError) -> HumanError {
    let (suggestion, severity) = match err {
        DiptychError::PdfError(_) => (
            "The file may be damaged or not a PDF. Try opening it elsewhere first.",
            Severity::Permanent,
        ),
        DiptychError::InvalidInput(_)
        | DiptychError::BufferLengthMismatch { .. }
        | DiptychError::ImageError(_) => (
            "The images inside this PDF use a format we can't process. Try a different file.",
            Severity::Permanent,
        ),
        DiptychError::InvalidDimension { .. } | DiptychError::Config(_) => (
            "Check the output size, gap, and margin settings, then try again.",
            Severity::ActionRequired,
        ),
        DiptychError::Serialization(_) => (
            "The settings file could not be read. Fix or remove it, then try again.",
            Severity::ActionRequired,
        ),
        DiptychError::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound => (
            "The file couldn't be found. Check the path and try again.",
            Severity::ActionRequired,
        ),
        DiptychError::Io(_) => (
            "There was a problem reading or writing a file. Try again.",
            Severity::Transient,
        ),
    };

    HumanError {
        message: PROCESSING_FAILED.into(),
        suggestion: suggestion.into(),
        severity,
    }
}
