//! Format trait and implementations for different page sources.
//!
//! This module defines the `Format` trait which abstracts over page formats by providing the
//! tree-sitter grammar to parse with and the extraction of sections from the resulting tree.

use crate::document::Document;
use crate::error::Result;

pub mod markdown;

/// A page source format backed by a tree-sitter grammar.
pub trait Format {
    /// Grammar used to parse the source.
    fn language(&self) -> tree_sitter::Language;
    /// File suffixes this format claims.
    fn file_extensions(&self) -> &[&str];
    /// Builds the page structure from source text.
    ///
    /// # Errors
    ///
    /// Returns an error if the grammar cannot be loaded or the source cannot be parsed.
    fn extract(&self, source: &str) -> Result<Document>;
}
