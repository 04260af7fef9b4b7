//! Mutator trait and applied-operation records

use crate::error::MutateError;
use nbclean_notebook::Notebook;
use std::fmt::{self, Debug, Display, Formatter};

/// A configured transformation from one notebook to the next
///
/// Mutators are immutable once constructed; invalid configurations are
/// rejected by their constructors. `apply` never modifies its input.
pub trait Mutator: Debug {
    /// Stable operation name
    fn name(&self) -> &'static str;

    /// One-line description of the configuration
    fn summary(&self) -> String;

    /// Produce the transformed notebook
    ///
    /// # Errors
    /// Returns `MutateError` if the transformation cannot complete
    fn apply(&self, notebook: &Notebook) -> Result<Notebook, MutateError>;

    /// Immutable record of this mutator for history
    fn record(&self) -> MutatorRecord {
        MutatorRecord::new(self.name(), self.summary())
    }
}

/// Description of an applied mutator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutatorRecord {
    name: &'static str,
    summary: String,
}

impl MutatorRecord {
    /// Create record
    #[inline]
    #[must_use]
    pub fn new(name: &'static str, summary: impl Into<String>) -> Self {
        Self {
            name,
            summary: summary.into(),
        }
    }

    /// Operation name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Configuration summary
    #[inline]
    #[must_use]
    pub fn summary(&self) -> &str {
        &self.summary
    }
}

impl Display for MutatorRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "<{}> {}", self.name, self.summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Identity;

    impl Mutator for Identity {
        fn name(&self) -> &'static str {
            "Identity"
        }

        fn summary(&self) -> String {
            "no-op".to_string()
        }

        fn apply(&self, notebook: &Notebook) -> Result<Notebook, MutateError> {
            Ok(notebook.clone())
        }
    }

    #[test]
    fn default_record() {
        let record = Identity.record();
        assert_eq!(record.name(), "Identity");
        assert_eq!(record.summary(), "no-op");
        assert_eq!(record.to_string(), "<Identity> no-op");
    }

    #[test]
    fn apply_leaves_input_alone() {
        let nb = Notebook::new();
        let out = Identity.apply(&nb).unwrap();
        assert_eq!(nb, out);
    }
}
