//! Error type for the fallible edges of the viewer.
//!
//! Presentational state changes never fail; only loading the page, touching the state file,
//! writing print output and talking to the system clipboard can.

use thiserror::Error;

#[derive(Debug, Error)]
/// Failures surfaced by page loading, persistence, printing and the clipboard.
pub enum Error {
    #[error("I/O error: {0}")]
    /// Reading or writing a file failed.
    Io(#[from] std::io::Error),

    #[error("invalid state file: {0}")]
    /// The preference file could not be (de)serialised.
    Json(#[from] serde_json::Error),

    #[error("grammar setup failed: {0}")]
    /// The tree-sitter grammar could not be loaded into the parser.
    Language(#[from] tree_sitter::LanguageError),

    #[error("could not parse {0}")]
    /// The parser produced no tree for the given source.
    Parse(String),

    #[error("clipboard unavailable: {0}")]
    /// The system clipboard rejected the write.
    Clipboard(String),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
