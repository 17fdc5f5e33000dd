//! Locating and loading the page to view.

use crate::document::Document;
use crate::error::{Error, Result};
use crate::formats::Format;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Page names tried, in order, when a directory is given instead of a file.
pub const INDEX_STEMS: [&str; 3] = ["index", "README", "readme"];

/// Resolves a path to a page file: files are taken as-is, directories are searched for an
/// index page with one of the format's extensions.
///
/// # Errors
///
/// Returns an error if the path does not exist or a directory holds no index page.
pub fn find_page(path: &Path, format: &impl Format) -> Result<PathBuf> {
    if path.is_file() {
        return Ok(path.to_path_buf());
    }

    if path.is_dir() {
        for stem in INDEX_STEMS {
            for ext in format.file_extensions() {
                let candidate = path.join(format!("{stem}.{ext}"));
                if candidate.is_file() {
                    return Ok(candidate);
                }
            }
        }
    }

    Err(Error::Io(io::Error::new(
        io::ErrorKind::NotFound,
        format!("no page found at {}", path.display()),
    )))
}

/// Reads and parses a page file that has already been located.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn read_document(page: &Path, format: &impl Format) -> Result<Document> {
    tracing::info!("loading {}", page.display());
    let source = fs::read_to_string(page)?;
    format.extract(&source)
}

#[cfg(test)]
#[path = "tests/input.rs"]
mod tests;
