//! Error types for the flat row format.

use std::path::PathBuf;

use thiserror::Error;

/// Errors reading, writing, or splitting row files.
#[derive(Debug, Error)]
pub enum RowsError {
    /// The file could not be opened or created.
    #[error("cannot open {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The CSV could not be read or decoded.
    #[error("cannot read rows from {path}: {source}")]
    Read {
        /// File that failed.
        path: PathBuf,
        /// The underlying CSV error.
        #[source]
        source: csv::Error,
    },

    /// The CSV could not be written.
    #[error("cannot write rows to {path}: {source}")]
    Write {
        /// File that failed.
        path: PathBuf,
        /// The underlying CSV error.
        #[source]
        source: csv::Error,
    },

    /// A required column is missing from the header.
    #[error("{path} has no '{column}' column")]
    MissingColumn {
        /// File that failed.
        path: PathBuf,
        /// Column that was expected.
        column: &'static str,
    },

    /// The part count for a split was zero.
    #[error("number of parts must be at least 1 (got {parts})")]
    InvalidParts {
        /// The rejected part count.
        parts: usize,
    },
}

impl RowsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn read(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}
