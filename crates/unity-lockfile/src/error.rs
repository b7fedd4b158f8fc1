//! Error types for unity-lockfile operations.

use crate::document::DocumentKind;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The error type for unity-lockfile operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A document did not deserialize into the expected shape.
    #[error("failed to parse {}: {source}", .document.file_name())]
    Parse {
        /// Which of the two documents is malformed.
        document: DocumentKind,
        /// The underlying JSON error, carrying line and column.
        #[source]
        source: serde_json::Error,
    },

    /// A document could not be read from disk.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: io::Error,
    },
}

impl Error {
    /// Returns the document at fault, if the error is a parse failure.
    #[must_use]
    pub fn document(&self) -> Option<DocumentKind> {
        match self {
            Self::Parse { document, .. } => Some(*document),
            Self::Io { .. } => None,
        }
    }
}

/// A specialized Result type for unity-lockfile operations.
pub type Result<T> = std::result::Result<T, Error>;
