//! Error types for figure output

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while rendering or writing a figure
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("unsupported output format '{0}' (expected pdf or svg)")]
    UnsupportedFormat(String),

    #[error("cannot build PDF: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("cannot serialise PDF: {0}")]
    Serialize(String),

    #[error("cannot write '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}
