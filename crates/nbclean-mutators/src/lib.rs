//! nbclean Mutators
//!
//! Cell selection and the notebook transformations built on it.
//!
//! # Core Concepts
//!
//! - [`Selector`]: tag / text / empty criteria combined by a [`MatchMode`]
//! - [`Mutator`]: a validated, immutable transformation `Notebook -> Notebook`
//! - [`Clear`], [`Remove`], [`CreateTests`], [`ReplaceText`], [`LimitOutput`]:
//!   the built-in mutators
//! - [`SolutionStripper`]: pluggable solution-region rewriting
//!
//! Configuration is validated when a mutator is constructed, so a failing
//! constructor never touches a notebook.
//!
//! # Example
//!
//! ```rust,ignore
//! use nbclean_mutators::{Clear, ClearKind, Mutator, Selector};
//!
//! let clear = Clear::new([ClearKind::Output], Selector::tag("hide_output"))?;
//! let cleaned = clear.apply(&notebook)?;
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod clear;
mod error;
mod limit;
mod mutator;
mod remove;
mod replace;
mod selector;
mod solution;

pub use clear::{Clear, ClearKind};
pub use create_tests::{CreateTests, GRADER_CALL};
pub use error::{ConfigError, MutateError, SolutionError};
pub use limit::{LimitOutput, ELLIPSIS};
pub use mutator::{Mutator, MutatorRecord};
pub use remove::Remove;
pub use replace::{
    ReplaceText, DEFAULT_BEGIN, DEFAULT_CODE_STUB, DEFAULT_END, DEFAULT_MARKDOWN_STUB,
};
pub use selector::{MatchMode, Selector};
pub use solution::{LineStripper, SolutionStripper};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
