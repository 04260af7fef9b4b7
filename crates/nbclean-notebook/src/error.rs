//! Error types for notebook reading and writing

use std::path::PathBuf;

/// Errors while decoding, encoding or storing a notebook
#[derive(Debug, thiserror::Error)]
pub enum NotebookError {
    /// IO error on a notebook file
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid notebook JSON in a file
    #[error("invalid notebook {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Invalid notebook JSON (in-memory input) or encoding failure
    #[error("notebook json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Notebook is not nbformat 4
    #[error("unsupported nbformat version {major} (expected 4)")]
    UnsupportedFormat { major: u64 },

    /// `nbformat` field missing or not a number
    #[error("missing nbformat version")]
    MissingFormat,
}

impl NotebookError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Attach a file path to an in-memory decoding error
    #[must_use]
    pub fn at_path(self, path: impl Into<PathBuf>) -> Self {
        match self {
            Self::Json(source) => Self::Parse {
                path: path.into(),
                source,
            },
            other => other,
        }
    }
}
