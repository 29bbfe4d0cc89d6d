//! Error types for the grid compositor

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while combining figures
#[derive(Debug, Error)]
pub enum ComposeError {
    /// A source document could not be read from disk
    #[error("cannot read figure '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A source document is not a readable PDF
    #[error("invalid PDF '{}': {source}", path.display())]
    Pdf {
        path: PathBuf,
        source: lopdf::Error,
    },

    /// A source document has no pages
    #[error("figure '{}' has no pages", path.display())]
    EmptyDocument { path: PathBuf },

    /// A source page has neither a CropBox nor a MediaBox
    #[error("figure '{}' has no usable page box", path.display())]
    MissingPageBox { path: PathBuf },

    /// Fewer labels than placed figures
    #[error("no label for figure {index} (only {available} labels given)")]
    MissingLabel { index: usize, available: usize },

    /// Assembling the output document failed
    #[error("cannot build composite page: {0}")]
    Assemble(#[source] lopdf::Error),

    /// The output document could not be serialised
    #[error("cannot serialise composite page: {0}")]
    Serialize(String),

    /// The output document could not be written
    #[error("cannot write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl ComposeError {
    /// Whether the error comes from a source file that does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ComposeError::Read { source, .. } if source.kind() == std::io::ErrorKind::NotFound
        )
    }
}
