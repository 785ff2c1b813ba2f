//! Error types for the materialization pipeline
//!
//! These never cross the public `generate`/`validate` boundary: per-file
//! errors are stringified into the generation result, fatal ones abort the
//! run with `success: false`.

use std::path::PathBuf;
use thiserror::Error;

/// Failures inside the template materialization pipeline.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// Template root does not exist or cannot be read
    #[error("Template root not found or unreadable: {0}")]
    TemplateRoot(PathBuf),

    /// No template artifacts under the template root
    #[error("No templates found in: {0}")]
    NoTemplates(PathBuf),

    /// A template could not be read from disk
    #[error("Failed to read template {path}: {source}")]
    TemplateRead {
        /// Path of the unreadable template
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Handlebars rendering failed
    #[error("Render error: {0}")]
    Render(#[from] handlebars::RenderError),

    /// Filesystem operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
