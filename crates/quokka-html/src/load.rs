use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use quokka_dom::DomTree;

use crate::builder::parse_document;

/// Failure to obtain a document's text.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Nothing exists at the path.
    #[error("{}: file not found", .path.display())]
    NotFound {
        /// The path that was requested.
        path: PathBuf,
    },
    /// The file exists but could not be read.
    #[error("failed to read {}", .path.display())]
    Io {
        /// The path that was requested.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// Read an HTML file. Bytes that are not valid UTF-8 are replaced rather
/// than rejected.
///
/// # Errors
///
/// [`LoadError::NotFound`] if `path` is not a file, [`LoadError::Io`] if it
/// cannot be read.
pub fn read_html(path: impl AsRef<Path>) -> Result<String, LoadError> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(LoadError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let bytes = fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Read and parse an HTML file with the default configuration.
///
/// # Errors
///
/// See [`read_html`].
pub fn parse_file(path: impl AsRef<Path>) -> Result<DomTree, LoadError> {
    Ok(parse_document(&read_html(path)?))
}
