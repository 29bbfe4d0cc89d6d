//! Error types for style bundles and palettes

use thiserror::Error;

use crate::renderer::RenderError;

/// Errors that can occur when loading, applying or saving with a style
#[derive(Error, Debug)]
pub enum StyleError {
    #[error("Failed to read style file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse style TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("invalid color '{value}' for '{name}'")]
    InvalidColor { name: String, value: String },

    #[error("unknown palette '{0}'")]
    UnknownPalette(String),

    #[error("unknown plotting context '{0}' (expected paper, notebook, talk or poster)")]
    UnknownContext(String),

    #[error("unknown axes style '{0}' (expected white, dark, whitegrid, darkgrid or ticks)")]
    UnknownStyle(String),

    #[error("cannot save figure: {0}")]
    Render(#[from] RenderError),
}
