//! nbclean Core
//!
//! The cleaning pipeline and everything needed to run it over files.
//!
//! # Core Concepts
//!
//! - [`Cleaner`]: fluent pipeline over one notebook, with history
//! - [`Settings`]: TOML defaults for every command
//! - [`discover`]: notebook discovery below a path
//! - [`NotebookExecutor`]: execution engine seam, [`JupyterExecutor`] by default
//! - [`BatchRunner`]: per-file processing, optionally in parallel
//! - [`ExecutedCopies`]: output directory for executed notebooks
//!
//! # Example
//!
//! ```rust,ignore
//! use nbclean_core::prelude::*;
//!
//! for path in discover(Path::new("lectures"), &[".ipynb_checkpoints"])? {
//!     Cleaner::open(&path)?
//!         .clear([ClearKind::Output], Selector::tag("hide_output"))?
//!         .remove_cells(Selector::tag("remove"))?
//!         .save(&path)?;
//! }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod batch;
pub mod cleaner;
pub mod copies;
pub mod discovery;
pub mod error;
pub mod execute;
pub mod settings;

pub use batch::{BatchReport, BatchRunner, FileOutcome};
pub use cleaner::Cleaner;
pub use copies::{is_executed_copy, ExecutedCopies, EXECUTED_SUFFIX};
pub use discovery::{discover, is_notebook};
pub use error::{CleanError, ExecutionError, InputError, SettingsError};
pub use execute::{JupyterExecutor, NotebookExecutor};
pub use settings::{Settings, SETTINGS_FILE};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for cleaning notebooks
    pub use crate::batch::{BatchReport, BatchRunner};
    pub use crate::cleaner::Cleaner;
    pub use crate::copies::ExecutedCopies;
    pub use crate::discovery::discover;
    pub use crate::error::CleanError;
    pub use crate::execute::{JupyterExecutor, NotebookExecutor};
    pub use crate::settings::Settings;
    pub use nbclean_mutators::{
        Clear, ClearKind, CreateTests, LimitOutput, MatchMode, Mutator, Remove, ReplaceText,
        Selector,
    };
    pub use nbclean_notebook::{Cell, Notebook, Output};
}
