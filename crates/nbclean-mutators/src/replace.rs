//! Replace-text mutator
//!
//! Turns solution cells into student answer cells by replacing delimited
//! solution regions with a stub. Region detection is delegated to a
//! [`SolutionStripper`].

use crate::error::{ConfigError, MutateError};
use crate::mutator::Mutator;
use crate::solution::{LineStripper, SolutionStripper};
use nbclean_notebook::{Cell, Notebook};

/// Default begin delimiter
pub const DEFAULT_BEGIN: &str = "### SOLUTION BEGIN";

/// Default end delimiter
pub const DEFAULT_END: &str = "### SOLUTION END";

/// Default stub for code cells
pub const DEFAULT_CODE_STUB: &str = "# YOUR CODE HERE\nraise NotImplementedError()";

/// Default stub for markdown cells
pub const DEFAULT_MARKDOWN_STUB: &str = "---\n## <span style=\"color:red\">Student Answer</span>\n\n*Double-click and add your answer between the lines*\n\n---";

/// Replace solution regions with stubs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaceText<S = LineStripper> {
    begin: String,
    end: String,
    code_stub: String,
    markdown_stub: String,
    stripper: S,
}

impl ReplaceText {
    /// Create with custom delimiters and default stubs
    ///
    /// # Errors
    /// Returns `ConfigError::EmptyDelimiter` if either delimiter is empty
    pub fn new(begin: impl Into<String>, end: impl Into<String>) -> Result<Self, ConfigError> {
        let begin = begin.into();
        let end = end.into();
        if begin.is_empty() || end.is_empty() {
            return Err(ConfigError::EmptyDelimiter);
        }
        Ok(Self {
            begin,
            end,
            code_stub: DEFAULT_CODE_STUB.to_string(),
            markdown_stub: DEFAULT_MARKDOWN_STUB.to_string(),
            stripper: LineStripper,
        })
    }
}

impl Default for ReplaceText {
    fn default() -> Self {
        Self {
            begin: DEFAULT_BEGIN.to_string(),
            end: DEFAULT_END.to_string(),
            code_stub: DEFAULT_CODE_STUB.to_string(),
            markdown_stub: DEFAULT_MARKDOWN_STUB.to_string(),
            stripper: LineStripper,
        }
    }
}

impl<S: SolutionStripper> ReplaceText<S> {
    /// Use a different stripping collaborator
    #[must_use]
    pub fn with_stripper<T: SolutionStripper>(self, stripper: T) -> ReplaceText<T> {
        ReplaceText {
            begin: self.begin,
            end: self.end,
            code_stub: self.code_stub,
            markdown_stub: self.markdown_stub,
            stripper,
        }
    }

    /// Stub inserted into code cells
    #[must_use]
    pub fn with_code_stub(mut self, stub: impl Into<String>) -> Self {
        self.code_stub = stub.into();
        self
    }

    /// Stub inserted into markdown cells
    #[must_use]
    pub fn with_markdown_stub(mut self, stub: impl Into<String>) -> Self {
        self.markdown_stub = stub.into();
        self
    }

    /// Begin delimiter
    #[must_use]
    pub fn begin(&self) -> &str {
        &self.begin
    }

    /// End delimiter
    #[must_use]
    pub fn end(&self) -> &str {
        &self.end
    }

    fn stub_for(&self, cell: &Cell) -> Option<&str> {
        match cell {
            Cell::Code(_) => Some(&self.code_stub),
            Cell::Markdown(_) => Some(&self.markdown_stub),
            Cell::Raw(_) => None,
        }
    }
}

impl<S: SolutionStripper> Mutator for ReplaceText<S> {
    fn name(&self) -> &'static str {
        "ClearSolutions"
    }

    fn summary(&self) -> String {
        format!("Begin: {:?} | End: {:?}", self.begin, self.end)
    }

    fn apply(&self, notebook: &Notebook) -> Result<Notebook, MutateError> {
        let mut next = notebook.clone();
        let mut replaced = 0usize;
        for (index, cell) in next.cells.iter_mut().enumerate() {
            let Some(stub) = self.stub_for(cell) else {
                continue;
            };
            let stripped = self
                .stripper
                .clear_between_delimiters(cell.source(), &self.begin, &self.end, stub)
                .map_err(|source| MutateError::Solution { cell: index, source })?;
            if let Some(source) = stripped {
                cell.set_source(source);
                if let Some(code) = cell.as_code_mut() {
                    code.outputs.clear();
                }
                replaced += 1;
            }
        }
        tracing::debug!(replaced, "replaced solution regions");
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SolutionError;
    use nbclean_test_utils::{lecture_notebook, stdout, SOLUTION_BEGIN, SOLUTION_END};
    use proptest::prelude::*;

    #[test]
    fn rejects_empty_delimiters() {
        assert_eq!(
            ReplaceText::new("", "END").unwrap_err(),
            ConfigError::EmptyDelimiter
        );
        assert_eq!(
            ReplaceText::new("BEGIN", "").unwrap_err(),
            ConfigError::EmptyDelimiter
        );
    }

    #[test]
    fn replaces_code_and_markdown_solutions() {
        let nb = lecture_notebook();
        let out = ReplaceText::default().apply(&nb).unwrap();

        let code = out
            .cells
            .iter()
            .find(|c| c.source().contains("# First we'll create 'a'"))
            .unwrap();
        assert!(!code.source().contains(SOLUTION_BEGIN));
        assert!(!code.source().contains("return x * x"));
        assert!(code.source().contains("    raise NotImplementedError()"));

        let md = out
            .cells
            .iter()
            .find(|c| c.source().starts_with("Explain."))
            .unwrap();
        assert!(md.source().contains("Student Answer"));
        assert!(!md.source().contains("Because."));
    }

    #[test]
    fn custom_stubs() {
        let nb = Notebook::with_cells(vec![
            Cell::code(format!("{SOLUTION_BEGIN}\nx = 1\n{SOLUTION_END}"))
                .with_outputs(vec![stdout("1")]),
            Cell::markdown(format!("{SOLUTION_BEGIN}\nanswer\n{SOLUTION_END}")),
        ]);
        let replace = ReplaceText::default()
            .with_code_stub("pass")
            .with_markdown_stub("_answer here_");
        let out = replace.apply(&nb).unwrap();
        assert_eq!(out.cells[0].source(), "pass");
        assert!(out.cells[0].outputs().unwrap().is_empty());
        assert_eq!(out.cells[1].source(), "_answer here_");
    }

    #[test]
    fn raw_cells_untouched() {
        let raw = Cell::raw(format!("{SOLUTION_BEGIN}\nx\n{SOLUTION_END}"));
        let nb = Notebook::with_cells(vec![raw.clone()]);
        let out = ReplaceText::default().apply(&nb).unwrap();
        assert_eq!(out.cells[0], raw);
    }

    #[test]
    fn malformed_region_reports_cell() {
        let nb = Notebook::with_cells(vec![
            Cell::markdown("fine"),
            Cell::code(format!("{SOLUTION_BEGIN}\n{SOLUTION_BEGIN}\n{SOLUTION_END}")),
        ]);
        let err = ReplaceText::default().apply(&nb).unwrap_err();
        assert!(matches!(
            err,
            MutateError::Solution {
                cell: 1,
                source: SolutionError::NestedBegin { line: 2 }
            }
        ));
    }

    #[derive(Debug)]
    struct Upper;

    impl SolutionStripper for Upper {
        fn clear_between_delimiters(
            &self,
            source: &str,
            begin: &str,
            _end: &str,
            _stub: &str,
        ) -> Result<Option<String>, SolutionError> {
            Ok(source.contains(begin).then(|| source.to_uppercase()))
        }
    }

    #[test]
    fn injected_stripper_is_used() {
        let nb = Notebook::with_cells(vec![Cell::code("BEGIN here"), Cell::code("plain")]);
        let replace = ReplaceText::new("BEGIN", "END").unwrap().with_stripper(Upper);
        let out = replace.apply(&nb).unwrap();
        assert_eq!(out.cells[0].source(), "BEGIN HERE");
        assert_eq!(out.cells[1].source(), "plain");
    }

    proptest! {
        #[test]
        fn delimiter_free_sources_unchanged(source in "[a-z #\n]{0,60}") {
            let nb = Notebook::with_cells(vec![Cell::code(source.clone()), Cell::markdown(source.clone())]);
            let out = ReplaceText::default().apply(&nb).unwrap();
            prop_assert_eq!(out, nb);
        }

        #[test]
        fn solution_text_is_gone(
            before in "[a-z ]{0,20}",
            interior in "SECRET[0-9]{1,6}",
            after in "[a-z ]{0,20}",
        ) {
            let source = format!("{before}\n{SOLUTION_BEGIN}\n{interior}\n{SOLUTION_END}\n{after}");
            let nb = Notebook::with_cells(vec![Cell::code(source)]);
            let out = ReplaceText::default().apply(&nb).unwrap();
            let result = out.cells[0].source();
            prop_assert!(!result.contains(SOLUTION_BEGIN));
            prop_assert!(!result.contains(SOLUTION_END));
            prop_assert!(!result.contains(interior.as_str()));
        }
    }
}
