//! Notebook execution
//!
//! The execution engine is an external collaborator behind
//! [`NotebookExecutor`]. [`JupyterExecutor`] drives `jupyter nbconvert`
//! through stdin/stdout.

use crate::error::ExecutionError;
use nbclean_notebook::Notebook;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::Duration;

/// Runs every code cell of a notebook and returns it with fresh outputs
///
/// Errors raised by cells are recorded in their outputs; only failures of
/// the engine itself are returned as errors.
pub trait NotebookExecutor: std::fmt::Debug + Send + Sync {
    /// Execute `notebook` with `working_dir` as the kernel's directory
    ///
    /// # Errors
    /// Returns `ExecutionError` if the engine cannot run the notebook
    fn execute(&self, notebook: &Notebook, working_dir: &Path) -> Result<Notebook, ExecutionError>;
}

/// `jupyter nbconvert` based executor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JupyterExecutor {
    program: String,
    args: Option<Vec<String>>,
    timeout: Duration,
    kernel: Option<String>,
}

impl Default for JupyterExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl JupyterExecutor {
    /// Default per-cell timeout
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(600);

    /// Create with the `jupyter` program and default timeout
    #[must_use]
    pub fn new() -> Self {
        Self {
            program: "jupyter".to_string(),
            args: None,
            timeout: Self::DEFAULT_TIMEOUT,
            kernel: None,
        }
    }

    /// Engine program
    #[must_use]
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Replace the generated argument list
    #[must_use]
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = Some(args.into_iter().map(Into::into).collect());
        self
    }

    /// Per-cell timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Kernel name
    #[must_use]
    pub fn with_kernel(mut self, kernel: impl Into<String>) -> Self {
        self.kernel = Some(kernel.into());
        self
    }

    /// Engine program
    #[inline]
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments passed to the program
    #[must_use]
    pub fn args(&self) -> Vec<String> {
        if let Some(args) = &self.args {
            return args.clone();
        }
        let mut args: Vec<String> = [
            "nbconvert",
            "--to",
            "notebook",
            "--execute",
            "--allow-errors",
            "--stdin",
            "--stdout",
        ]
        .map(String::from)
        .to_vec();
        args.push(format!(
            "--ExecutePreprocessor.timeout={}",
            self.timeout.as_secs()
        ));
        if let Some(kernel) = &self.kernel {
            args.push(format!("--ExecutePreprocessor.kernel_name={kernel}"));
        }
        args
    }
}

impl NotebookExecutor for JupyterExecutor {
    fn execute(&self, notebook: &Notebook, working_dir: &Path) -> Result<Notebook, ExecutionError> {
        let input = notebook.to_json().map_err(ExecutionError::InvalidOutput)?;
        let args = self.args();
        tracing::debug!(program = %self.program, ?args, dir = %working_dir.display(), "executing notebook");

        let mut child = Command::new(&self.program)
            .args(&args)
            .current_dir(working_dir)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| ExecutionError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        // Feed stdin from another thread so a full stdout pipe cannot stall us.
        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| ExecutionError::pipe_error(&self.program, std::io::ErrorKind::BrokenPipe.into()))?;
        let writer = std::thread::spawn(move || stdin.write_all(input.as_bytes()));

        let output = child
            .wait_with_output()
            .map_err(|e| ExecutionError::pipe_error(&self.program, e))?;
        let written = writer
            .join()
            .unwrap_or_else(|_| Err(std::io::Error::other("stdin writer panicked")));

        if !output.status.success() {
            return Err(ExecutionError::Failed {
                program: self.program.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let executed = Notebook::from_json(&stdout).map_err(ExecutionError::InvalidOutput)?;
        written.map_err(|e| ExecutionError::pipe_error(&self.program, e))?;
        Ok(executed)
    }
}
