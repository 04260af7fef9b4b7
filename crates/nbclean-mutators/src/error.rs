//! Error types for mutators
//!
//! - [`ConfigError`]: a mutator was constructed with insufficient or invalid
//!   criteria (raised before any cell is touched)
//! - [`SolutionError`]: a solution region is malformed
//! - [`MutateError`]: applying a mutator failed

use crate::clear::ClearKind;
use std::path::PathBuf;

/// Invalid mutator configuration
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Clear requested with no kinds
    #[error("at least one clear kind is required (one of: {})", ClearKind::names())]
    EmptyClearKinds,

    /// Clear kind name not recognized
    #[error("unknown clear kind '{kind}' (expected one of: {})", ClearKind::names())]
    UnknownClearKind { kind: String },

    /// Remove requested with no tag, text or empty flag
    #[error("must specify at least one removal criterion: tag, text or empty")]
    MissingRemoveCriterion,

    /// Test output directory must be relative to the base directory
    #[error("test output path must be relative, got {path}")]
    AbsoluteTestPath { path: PathBuf },

    /// Tag must not be empty
    #[error("tag must not be empty")]
    EmptyTag,

    /// Solution delimiters must not be empty
    #[error("solution delimiters must not be empty")]
    EmptyDelimiter,

    /// Output limit must be positive
    #[error("max output lines must be greater than zero")]
    ZeroOutputLimit,

    /// Match mode name not recognized
    #[error("unknown match mode '{mode}' (expected 'first' or 'all')")]
    UnknownMatchMode { mode: String },
}

/// Malformed solution region
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SolutionError {
    /// A begin delimiter appeared inside an open region
    #[error("nested begin solution delimiter on line {line}")]
    NestedBegin { line: usize },

    /// A region was opened and never closed
    #[error("no end solution delimiter found")]
    MissingEnd,
}

/// Errors while applying a mutator
#[derive(Debug, thiserror::Error)]
pub enum MutateError {
    /// IO error writing a generated artifact
    #[error("io error writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed solution region in a cell
    #[error("cell {cell}: {source}")]
    Solution {
        cell: usize,
        #[source]
        source: SolutionError,
    },
}

impl MutateError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
