//! Settings file
//!
//! Defaults for every command, read from TOML. Command line flags override
//! these values.

use crate::error::SettingsError;
use crate::execute::JupyterExecutor;
use nbclean_mutators::{
    ConfigError, LimitOutput, MatchMode, ReplaceText, DEFAULT_BEGIN, DEFAULT_CODE_STUB,
    DEFAULT_END, DEFAULT_MARKDOWN_STUB,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Settings file looked up in the working directory
pub const SETTINGS_FILE: &str = "nbclean.toml";

/// Directory skipped during discovery unless configured otherwise
pub const DEFAULT_SKIP: &str = ".ipynb_checkpoints";

/// All settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Path substrings excluded from discovery
    pub skip: Vec<String>,
    /// How selector criteria combine
    pub match_mode: MatchMode,
    /// Solution replacement
    pub replace: ReplaceSettings,
    /// Notebook execution
    pub run: RunSettings,
    /// Test generation
    pub tests: TestSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            skip: vec![DEFAULT_SKIP.to_string()],
            match_mode: MatchMode::default(),
            replace: ReplaceSettings::default(),
            run: RunSettings::default(),
            tests: TestSettings::default(),
        }
    }
}

/// `[replace]` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReplaceSettings {
    /// Begin delimiter
    pub begin: String,
    /// End delimiter
    pub end: String,
    /// Stub for code cells
    pub code_stub: String,
    /// Stub for markdown cells
    pub markdown_stub: String,
}

impl Default for ReplaceSettings {
    fn default() -> Self {
        Self {
            begin: DEFAULT_BEGIN.to_string(),
            end: DEFAULT_END.to_string(),
            code_stub: DEFAULT_CODE_STUB.to_string(),
            markdown_stub: DEFAULT_MARKDOWN_STUB.to_string(),
        }
    }
}

/// `[run]` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunSettings {
    /// Output line limit after execution
    pub max_output_lines: usize,
    /// Per-cell timeout in seconds
    pub timeout_secs: u64,
    /// Kernel name, engine default when unset
    pub kernel: Option<String>,
    /// Engine program
    pub program: String,
    /// Engine arguments, replacing the generated nbconvert arguments
    pub args: Option<Vec<String>>,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            max_output_lines: 1000,
            timeout_secs: 600,
            kernel: None,
            program: "jupyter".to_string(),
            args: None,
        }
    }
}

/// `[tests]` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TestSettings {
    /// Output directory, relative to each notebook
    pub output_dir: PathBuf,
}

impl Default for TestSettings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("tests"),
        }
    }
}

impl Settings {
    /// Parse settings from TOML text; `path` is used in errors only
    ///
    /// # Errors
    /// Returns `SettingsError::Parse` for invalid TOML or unknown keys
    pub fn from_toml(text: &str, path: impl Into<PathBuf>) -> Result<Self, SettingsError> {
        toml::from_str(text).map_err(|source| SettingsError::Parse {
            path: path.into(),
            source,
        })
    }

    /// Load settings from a file
    ///
    /// # Errors
    /// Returns `SettingsError` if the file is unreadable or invalid
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_toml(&text, path)?;
        tracing::debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    /// Load `explicit`, else [`SETTINGS_FILE`] in `dir` if present, else defaults
    ///
    /// # Errors
    /// Returns `SettingsError` if the chosen file is unreadable or invalid
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self, SettingsError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let local = dir.join(SETTINGS_FILE);
        if local.is_file() {
            Self::load(local)
        } else {
            Ok(Self::default())
        }
    }

    /// Replace-text mutator from the `[replace]` table
    ///
    /// # Errors
    /// Returns `ConfigError::EmptyDelimiter` if a delimiter is empty
    pub fn replace_text(&self) -> Result<ReplaceText, ConfigError> {
        Ok(ReplaceText::new(&self.replace.begin, &self.replace.end)?
            .with_code_stub(&self.replace.code_stub)
            .with_markdown_stub(&self.replace.markdown_stub))
    }

    /// Output limiter from the `[run]` table
    ///
    /// # Errors
    /// Returns `ConfigError::ZeroOutputLimit` if the limit is zero
    pub fn limit_output(&self) -> Result<LimitOutput, ConfigError> {
        LimitOutput::new(self.run.max_output_lines)
    }

    /// Execution engine from the `[run]` table
    #[must_use]
    pub fn executor(&self) -> JupyterExecutor {
        let mut executor = JupyterExecutor::new()
            .with_program(&self.run.program)
            .with_timeout(Duration::from_secs(self.run.timeout_secs));
        if let Some(args) = &self.run.args {
            executor = executor.with_args(args);
        }
        match &self.run.kernel {
            Some(kernel) => executor.with_kernel(kernel),
            None => executor,
        }
    }
}
