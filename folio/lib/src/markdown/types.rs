//! Type definitions for the markdown module.

use thiserror::Error;

/// Errors that can occur when loading or emitting documents.
///
/// Rendering itself is infallible: highlighting problems degrade to plain
/// text inside the affected block instead of surfacing here.
#[derive(Error, Debug)]
pub enum MarkdownError {
    /// Failed to load file.
    #[error("Failed to load file: {0}")]
    FileLoad(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Unknown theme name.
    #[error(
        "Invalid theme name: '{0}'. Valid names: github, base16-ocean, gruvbox, one-half, solarized, monokai, nord, dracula"
    )]
    InvalidThemeName(String),

    /// Failed to write rendered output.
    #[error("Failed to write output: {0}")]
    Render(#[from] std::fmt::Error),
}

/// Result type for markdown operations.
pub type MarkdownResult<T> = Result<T, MarkdownError>;
