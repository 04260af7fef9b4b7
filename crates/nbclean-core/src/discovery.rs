//! Notebook discovery

use crate::error::InputError;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Notebook file extension
pub const NOTEBOOK_EXTENSION: &str = "ipynb";

/// Whether `path` names a notebook file
#[must_use]
pub fn is_notebook(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == NOTEBOOK_EXTENSION)
}

/// Find notebooks under `root`
///
/// A directory is walked recursively; files whose path contains any `skip`
/// substring are excluded. A notebook file is returned as the only entry.
/// Results are sorted by path.
///
/// # Errors
/// - `InputError::NotFound` if `root` does not exist
/// - `InputError::NotNotebook` if `root` is a file without the notebook
///   extension
/// - `InputError::Walk` if a directory cannot be read
pub fn discover<S: AsRef<str>>(root: &Path, skip: &[S]) -> Result<Vec<PathBuf>, InputError> {
    if !root.exists() {
        return Err(InputError::NotFound {
            path: root.to_path_buf(),
        });
    }
    if root.is_file() {
        return if is_notebook(root) {
            Ok(vec![root.to_path_buf()])
        } else {
            Err(InputError::NotNotebook {
                path: root.to_path_buf(),
            })
        };
    }

    let mut found = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry.map_err(|source| InputError::Walk {
            path: root.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if !entry.file_type().is_file() || !is_notebook(path) {
            continue;
        }
        let text = path.to_string_lossy();
        if skip.iter().any(|s| text.contains(s.as_ref())) {
            tracing::trace!(path = %path.display(), "skipped");
            continue;
        }
        found.push(path.to_path_buf());
    }
    found.sort();
    tracing::debug!(root = %root.display(), count = found.len(), "discovered notebooks");
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nbclean_notebook::Notebook;
    use pretty_assertions::assert_eq;

    fn touch(dir: &Path, rel: &str) -> PathBuf {
        let path = dir.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        Notebook::new().write(&path).unwrap();
        path
    }

    #[test]
    fn walks_sorted_and_skips_checkpoints() {
        let dir = tempfile::tempdir().unwrap();
        let b = touch(dir.path(), "b.ipynb");
        let a = touch(dir.path(), "sub/a.ipynb");
        touch(dir.path(), ".ipynb_checkpoints/b-checkpoint.ipynb");
        std::fs::write(dir.path().join("notes.txt"), "x").unwrap();

        let found = discover(dir.path(), &[".ipynb_checkpoints"]).unwrap();
        assert_eq!(found, vec![b, a]);
    }

    #[test]
    fn empty_skip_list_keeps_everything() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "x.ipynb");
        touch(dir.path(), ".ipynb_checkpoints/x-checkpoint.ipynb");
        let none: [&str; 0] = [];
        assert_eq!(discover(dir.path(), &none).unwrap().len(), 2);
    }

    #[test]
    fn single_file_input() {
        let dir = tempfile::tempdir().unwrap();
        let nb = touch(dir.path(), "one.ipynb");
        assert_eq!(discover(&nb, &["one"]).unwrap(), vec![nb]);
    }

    #[test]
    fn rejects_missing_and_non_notebook_paths() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        assert!(matches!(
            discover(&missing, &[DEFAULT]).unwrap_err(),
            InputError::NotFound { .. }
        ));

        let text = dir.path().join("notes.md");
        std::fs::write(&text, "x").unwrap();
        assert!(matches!(
            discover(&text, &[DEFAULT]).unwrap_err(),
            InputError::NotNotebook { .. }
        ));
    }

    const DEFAULT: &str = crate::settings::DEFAULT_SKIP;
}
