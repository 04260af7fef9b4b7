//! Cleaning pipeline
//!
//! [`Cleaner`] owns one notebook and applies mutators to it in sequence,
//! recording each applied operation.

use crate::error::CleanError;
use crate::execute::NotebookExecutor;
use nbclean_mutators::{
    Clear, ClearKind, CreateTests, LimitOutput, Mutator, MutatorRecord, Remove, ReplaceText,
    Selector,
};
use nbclean_notebook::Notebook;
use std::fmt::{self, Display, Formatter};
use std::path::{Path, PathBuf};

/// Fluent notebook cleaning pipeline
///
/// Every mutation returns `&mut Self`, so calls chain through `?`:
///
/// ```rust,ignore
/// Cleaner::open("lecture.ipynb")?
///     .clear([ClearKind::Output], Selector::tag("hide_output"))?
///     .remove_cells(Selector::tag("remove"))?
///     .save("student/lecture.ipynb")?;
/// ```
///
/// A failed step leaves the notebook as it was before that step.
#[derive(Debug, Clone)]
pub struct Cleaner {
    notebook: Notebook,
    history: Vec<MutatorRecord>,
    source: Option<PathBuf>,
}

impl Cleaner {
    /// Start from an in-memory notebook
    #[must_use]
    pub fn new(notebook: Notebook) -> Self {
        Self {
            notebook,
            history: Vec::new(),
            source: None,
        }
    }

    /// Start from a notebook file
    ///
    /// # Errors
    /// Returns `CleanError::Notebook` if the file cannot be read or parsed
    pub fn open(path: impl AsRef<Path>) -> Result<Self, CleanError> {
        let path = path.as_ref();
        let notebook = Notebook::read(path)?;
        Ok(Self {
            source: Some(path.to_path_buf()),
            ..Self::new(notebook)
        })
    }

    /// Apply any mutator
    ///
    /// # Errors
    /// Returns `CleanError::Mutate` if the mutator fails
    pub fn apply<M: Mutator + ?Sized>(&mut self, mutator: &M) -> Result<&mut Self, CleanError> {
        let next = mutator.apply(&self.notebook)?;
        self.commit(next, mutator.record());
        Ok(self)
    }

    /// Clear parts of matched cells
    ///
    /// # Errors
    /// Returns `CleanError::Config` if `kinds` is empty
    pub fn clear<I>(&mut self, kinds: I, selector: Selector) -> Result<&mut Self, CleanError>
    where
        I: IntoIterator<Item = ClearKind>,
    {
        let clear = Clear::new(kinds, selector)?;
        self.apply(&clear)
    }

    /// Remove matched cells
    ///
    /// # Errors
    /// Returns `CleanError::Config` if the selector has no criterion
    pub fn remove_cells(&mut self, selector: Selector) -> Result<&mut Self, CleanError> {
        let remove = Remove::new(selector)?;
        self.apply(&remove)
    }

    /// Convert cells tagged `tag` into test files under
    /// `base_dir/output_dir`
    ///
    /// # Errors
    /// - `CleanError::Config` for an empty tag or absolute `output_dir`
    /// - `CleanError::Mutate` if a test file cannot be written
    pub fn create_tests(
        &mut self,
        tag: &str,
        output_dir: impl Into<PathBuf>,
        base_dir: impl Into<PathBuf>,
    ) -> Result<&mut Self, CleanError> {
        let create = CreateTests::new(tag, output_dir, base_dir)?;
        self.apply(&create)
    }

    /// Replace `begin`..`end` solution regions with the default stubs
    ///
    /// # Errors
    /// - `CleanError::Config` if a delimiter is empty
    /// - `CleanError::Mutate` if a region is malformed
    pub fn replace_text(&mut self, begin: &str, end: &str) -> Result<&mut Self, CleanError> {
        self.replace_text_with(begin, end, None, None)
    }

    /// Replace `begin`..`end` solution regions, overriding the stubs
    /// inserted into code and markdown cells
    ///
    /// # Errors
    /// See [`Cleaner::replace_text`]
    pub fn replace_text_with(
        &mut self,
        begin: &str,
        end: &str,
        code_stub: Option<&str>,
        markdown_stub: Option<&str>,
    ) -> Result<&mut Self, CleanError> {
        let mut replace = ReplaceText::new(begin, end)?;
        if let Some(stub) = code_stub {
            replace = replace.with_code_stub(stub);
        }
        if let Some(stub) = markdown_stub {
            replace = replace.with_markdown_stub(stub);
        }
        self.apply(&replace)
    }

    /// Truncate outputs longer than `max_lines`
    ///
    /// # Errors
    /// Returns `CleanError::Config` if `max_lines` is zero
    pub fn limit_output(&mut self, max_lines: usize) -> Result<&mut Self, CleanError> {
        let limit = LimitOutput::new(max_lines)?;
        self.apply(&limit)
    }

    /// Execute the notebook with `working_dir` as its directory
    ///
    /// # Errors
    /// Returns `CleanError::Execution` if the engine fails
    pub fn execute(
        &mut self,
        executor: &dyn NotebookExecutor,
        working_dir: &Path,
    ) -> Result<&mut Self, CleanError> {
        let next = executor.execute(&self.notebook, working_dir)?;
        let record = MutatorRecord::new("Execute", format!("Dir: {}", working_dir.display()));
        self.commit(next, record);
        Ok(self)
    }

    /// Current notebook
    #[inline]
    #[must_use]
    pub fn notebook(&self) -> &Notebook {
        &self.notebook
    }

    /// Take the current notebook
    #[must_use]
    pub fn into_notebook(self) -> Notebook {
        self.notebook
    }

    /// Applied operations, oldest first
    #[inline]
    #[must_use]
    pub fn history(&self) -> &[MutatorRecord] {
        &self.history
    }

    /// File the notebook was opened from
    #[inline]
    #[must_use]
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Write the current notebook to `path`
    ///
    /// # Errors
    /// Returns `CleanError::Notebook` if the file cannot be written
    pub fn save(&self, path: impl AsRef<Path>) -> Result<&Self, CleanError> {
        let path = path.as_ref();
        self.notebook.write(path)?;
        tracing::info!(path = %path.display(), applied = self.history.len(), "saved notebook");
        Ok(self)
    }

    fn commit(&mut self, notebook: Notebook, record: MutatorRecord) {
        tracing::debug!(%record, cells = notebook.len(), "applied");
        self.notebook = notebook;
        self.history.push(record);
    }
}

impl Display for Cleaner {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Number of mutators: {}\n---", self.history.len())?;
        for record in &self.history {
            write!(f, "\n{record}")?;
        }
        Ok(())
    }
}
