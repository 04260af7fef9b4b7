//! nbclean Notebook Model
//!
//! In-memory representation of Jupyter notebooks (nbformat 4).
//!
//! # Core Concepts
//!
//! - [`Notebook`]: ordered cells plus document metadata
//! - [`Cell`]: closed variant over code, markdown and raw cells
//! - [`Output`]: closed variant over the nbformat output types
//! - [`ContentDigest`]: Blake3 digest of cell content
//!
//! Only the fields that nbclean reads or rewrites are modelled explicitly;
//! everything else is carried through untouched.
//!
//! # Example
//!
//! ```rust,ignore
//! use nbclean_notebook::Notebook;
//!
//! let mut nb = Notebook::read("lecture.ipynb")?;
//! nb.cells.retain(|cell| !cell.has_tag("remove"));
//! nb.write("lecture-clean.ipynb")?;
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod cell;
mod digest;
mod error;
mod notebook;
mod output;
mod source;

pub use cell::{Cell, CellKind, CellMetadata, CodeCell, TextCell};
pub use digest::ContentDigest;
pub use error::NotebookError;
pub use notebook::Notebook;
pub use output::{payload_text, text_payload, MimeBundle, Output, STDERR, STDOUT};
pub use source::split_lines;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
