//! Executed copies
//!
//! `run` can leave the input notebooks untouched and write each executed
//! notebook to a separate directory as `<stem>-exe.ipynb`, keeping its
//! location relative to the input root.

use crate::discovery::{is_notebook, NOTEBOOK_EXTENSION};
use crate::error::InputError;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Suffix appended to the file stem of an executed copy
pub const EXECUTED_SUFFIX: &str = "-exe";

/// Whether `path` names an executed copy
#[must_use]
pub fn is_executed_copy(path: &Path) -> bool {
    is_notebook(path)
        && path
            .file_stem()
            .is_some_and(|stem| stem.to_string_lossy().ends_with(EXECUTED_SUFFIX))
}

/// Output directory for executed copies of the notebooks under a root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutedCopies {
    root: PathBuf,
    dir: PathBuf,
}

impl ExecutedCopies {
    /// Prepare `dir` to receive copies of the notebooks found under `root`
    ///
    /// A missing directory is created. An existing one is refused unless
    /// `overwrite` is set, in which case the executed copies already in it
    /// are deleted and any other file is left alone.
    ///
    /// # Errors
    /// - `InputError::OutputExists` if `dir` exists and `overwrite` is false
    /// - `InputError::NotDirectory` if `dir` is a file
    /// - `InputError::Io` / `InputError::Walk` if it cannot be created or cleaned
    pub fn prepare(
        root: impl Into<PathBuf>,
        dir: impl Into<PathBuf>,
        overwrite: bool,
    ) -> Result<Self, InputError> {
        let root = root.into();
        let dir = dir.into();
        if !dir.exists() {
            std::fs::create_dir_all(&dir).map_err(|source| InputError::Io {
                path: dir.clone(),
                source,
            })?;
            tracing::info!(dir = %dir.display(), "created output directory");
        } else if !dir.is_dir() {
            return Err(InputError::NotDirectory { path: dir });
        } else if overwrite {
            let removed = remove_executed_copies(&dir)?;
            tracing::info!(dir = %dir.display(), removed, "overwriting output directory");
        } else {
            return Err(InputError::OutputExists { path: dir });
        }
        Ok(Self { root, dir })
    }

    /// Output directory
    #[inline]
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Whether `path` lies inside the output directory
    #[must_use]
    pub fn contains(&self, path: &Path) -> bool {
        path.starts_with(&self.dir)
    }

    /// Path of the executed copy of `notebook`
    #[must_use]
    pub fn target(&self, notebook: &Path) -> PathBuf {
        let relative = notebook
            .parent()
            .and_then(|parent| parent.strip_prefix(&self.root).ok())
            .unwrap_or_else(|| Path::new(""));
        let stem = notebook
            .file_stem()
            .map(|stem| stem.to_string_lossy())
            .unwrap_or_default();
        self.dir
            .join(relative)
            .join(format!("{stem}{EXECUTED_SUFFIX}.{NOTEBOOK_EXTENSION}"))
    }
}

fn remove_executed_copies(dir: &Path) -> Result<usize, InputError> {
    let mut removed = 0;
    for entry in WalkDir::new(dir) {
        let entry = entry.map_err(|source| InputError::Walk {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if entry.file_type().is_file() && is_executed_copy(path) {
            std::fs::remove_file(path).map_err(|source| InputError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            removed += 1;
        }
    }
    Ok(removed)
}
