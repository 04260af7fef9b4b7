//! Error types for the cleaning pipeline
//!
//! Each concern has its own enum; [`CleanError`] aggregates them for callers
//! that drive whole runs.

use nbclean_mutators::{ConfigError, MutateError};
use nbclean_notebook::NotebookError;
use std::path::PathBuf;

/// Input path errors
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    /// Path does not exist
    #[error("path not found: {path}")]
    NotFound { path: PathBuf },

    /// Path is neither a directory nor a notebook file
    #[error("not a notebook or directory: {path}")]
    NotNotebook { path: PathBuf },

    /// Directory walk failed
    #[error("failed to walk {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// Output directory exists and overwriting was not requested
    #[error("output directory already exists: {path}")]
    OutputExists { path: PathBuf },

    /// Output path exists but is not a directory
    #[error("output path is not a directory: {path}")]
    NotDirectory { path: PathBuf },

    /// Output directory could not be created or cleaned
    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors from the execution engine
#[derive(Debug, thiserror::Error)]
pub enum ExecutionError {
    /// Engine could not be started
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Engine exited unsuccessfully
    #[error("{program} exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: String,
        stderr: String,
    },

    /// Engine output is not a notebook
    #[error("invalid notebook from execution engine: {0}")]
    InvalidOutput(#[source] NotebookError),

    /// IO error talking to the engine
    #[error("io error communicating with {program}: {source}")]
    Pipe {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

impl ExecutionError {
    /// Create pipe error for program
    pub fn pipe_error(program: impl Into<String>, source: std::io::Error) -> Self {
        Self::Pipe {
            program: program.into(),
            source,
        }
    }
}

/// Settings file errors
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// Settings file unreadable
    #[error("failed to read settings {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Settings file invalid
    #[error("invalid settings {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Settings values rejected by a mutator
    #[error("invalid settings: {0}")]
    Invalid(#[from] ConfigError),
}

/// Top-level error for cleaning runs
#[derive(Debug, thiserror::Error)]
pub enum CleanError {
    /// Notebook read/write error
    #[error(transparent)]
    Notebook(#[from] NotebookError),

    /// Mutator configuration error
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Mutator application error
    #[error(transparent)]
    Mutate(#[from] MutateError),

    /// Input path error
    #[error(transparent)]
    Input(#[from] InputError),

    /// Execution error
    #[error("execution failed: {0}")]
    Execution(#[from] ExecutionError),

    /// Settings error
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

impl CleanError {
    /// Whether this error comes from invalid configuration rather than data
    #[must_use]
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_) | Self::Settings(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregate_wraps_config_error() {
        let err: CleanError = ConfigError::MissingRemoveCriterion.into();
        assert!(err.is_config());
        assert_eq!(
            err.to_string(),
            "configuration error: must specify at least one removal criterion: tag, text or empty"
        );
    }

    #[test]
    fn input_error_display() {
        let err = CleanError::from(InputError::NotFound {
            path: PathBuf::from("missing"),
        });
        assert!(!err.is_config());
        assert_eq!(err.to_string(), "path not found: missing");
    }

    #[test]
    fn failed_execution_display() {
        let err = ExecutionError::Failed {
            program: "jupyter".to_string(),
            status: "exit status: 1".to_string(),
            stderr: "kernel died".to_string(),
        };
        assert_eq!(err.to_string(), "jupyter exited with exit status: 1: kernel died");
    }
}
