//! Remove mutator
//!
//! Drops matched cells; the result is always an order-preserving
//! subsequence of the input.

use crate::error::{ConfigError, MutateError};
use crate::mutator::Mutator;
use crate::selector::Selector;
use nbclean_notebook::{Cell, Notebook};

/// Drop matched cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Remove {
    selector: Selector,
}

impl Remove {
    /// Create a Remove mutator
    ///
    /// # Errors
    /// Returns `ConfigError::MissingRemoveCriterion` if the selector has no
    /// tag, text or empty criterion
    pub fn new(selector: Selector) -> Result<Self, ConfigError> {
        if !selector.has_criteria() {
            return Err(ConfigError::MissingRemoveCriterion);
        }
        Ok(Self { selector })
    }

    /// Cell selector
    #[must_use]
    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Whether `cell` is dropped
    ///
    /// With the empty flag set, a matched cell is only dropped when its
    /// source is also empty.
    #[must_use]
    pub fn drops(&self, cell: &Cell) -> bool {
        self.selector.matches(cell) && (!self.selector.requires_empty() || cell.is_empty())
    }
}

impl Mutator for Remove {
    fn name(&self) -> &'static str {
        "RemoveCells"
    }

    fn summary(&self) -> String {
        format!("Cells: {}", self.selector)
    }

    fn apply(&self, notebook: &Notebook) -> Result<Notebook, MutateError> {
        let mut next = notebook.clone();
        next.cells.retain(|cell| !self.drops(cell));
        tracing::debug!(
            removed = notebook.len() - next.len(),
            kept = next.len(),
            summary = %self.summary(),
            "removed cells"
        );
        Ok(next)
    }
}
