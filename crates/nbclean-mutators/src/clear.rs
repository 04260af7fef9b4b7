//! Clear mutator
//!
//! Redacts parts of matched cells: source, all outputs, text or image
//! payloads, or `stderr` streams.

use crate::error::{ConfigError, MutateError};
use crate::mutator::Mutator;
use crate::selector::Selector;
use nbclean_notebook::{Cell, Notebook};
use std::collections::BTreeSet;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Part of a cell that Clear can redact
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ClearKind {
    /// Source text
    Content,
    /// All outputs
    Output,
    /// `text/*` payload entries
    OutputText,
    /// `image/*` payload entries
    OutputImage,
    /// `stderr` stream outputs
    Stderr,
}

impl ClearKind {
    /// Every kind, in canonical order
    pub const ALL: [Self; 5] = [
        Self::Content,
        Self::Output,
        Self::OutputText,
        Self::OutputImage,
        Self::Stderr,
    ];

    /// Kind name as used on the command line
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Content => "content",
            Self::Output => "output",
            Self::OutputText => "output_text",
            Self::OutputImage => "output_image",
            Self::Stderr => "stderr",
        }
    }

    /// Comma-separated list of valid names
    #[must_use]
    pub fn names() -> String {
        Self::ALL.map(Self::as_str).join(", ")
    }
}

impl Display for ClearKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClearKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownClearKind {
                kind: s.to_string(),
            })
    }
}

/// Redact parts of matched cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clear {
    kinds: BTreeSet<ClearKind>,
    selector: Selector,
}

impl Clear {
    /// Create a Clear mutator
    ///
    /// # Errors
    /// Returns `ConfigError::EmptyClearKinds` if `kinds` is empty
    pub fn new<I>(kinds: I, selector: Selector) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = ClearKind>,
    {
        let kinds: BTreeSet<_> = kinds.into_iter().collect();
        if kinds.is_empty() {
            return Err(ConfigError::EmptyClearKinds);
        }
        Ok(Self { kinds, selector })
    }

    /// Create a Clear mutator from kind names
    ///
    /// # Errors
    /// - `ConfigError::UnknownClearKind` for an unrecognized name
    /// - `ConfigError::EmptyClearKinds` if `names` is empty
    pub fn from_names<I, S>(names: I, selector: Selector) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let kinds = names
            .into_iter()
            .map(|name| name.as_ref().parse())
            .collect::<Result<Vec<ClearKind>, _>>()?;
        Self::new(kinds, selector)
    }

    /// Requested kinds
    #[must_use]
    pub fn kinds(&self) -> &BTreeSet<ClearKind> {
        &self.kinds
    }

    /// Cell selector
    #[must_use]
    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Apply every requested kind to one cell
    fn clear_cell(&self, cell: &mut Cell) {
        for kind in &self.kinds {
            match kind {
                ClearKind::Content => cell.set_source(String::new()),
                ClearKind::Output => {
                    if let Some(code) = cell.as_code_mut() {
                        code.outputs.clear();
                    }
                }
                ClearKind::OutputText => {
                    if let Some(code) = cell.as_code_mut() {
                        for output in &mut code.outputs {
                            output.remove_mime_prefix("text/");
                        }
                    }
                }
                ClearKind::OutputImage => {
                    if let Some(code) = cell.as_code_mut() {
                        for output in &mut code.outputs {
                            output.remove_mime_prefix("image/");
                        }
                    }
                }
                ClearKind::Stderr => {
                    if let Some(code) = cell.as_code_mut() {
                        code.outputs.retain(|output| !output.is_stderr());
                    }
                }
            }
        }
    }
}

impl Mutator for Clear {
    fn name(&self) -> &'static str {
        "ClearCells"
    }

    fn summary(&self) -> String {
        let kinds: Vec<_> = self.kinds.iter().map(|k| k.as_str()).collect();
        format!("Kinds: {} | Cells: {}", kinds.join(", "), self.selector)
    }

    fn apply(&self, notebook: &Notebook) -> Result<Notebook, MutateError> {
        let mut next = notebook.clone();
        let mut matched = 0usize;
        for cell in next.cells.iter_mut().filter(|c| self.selector.matches(c)) {
            self.clear_cell(cell);
            matched += 1;
        }
        tracing::debug!(matched, summary = %self.summary(), "cleared cells");
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nbclean_notebook::Output;
    use nbclean_test_utils::{lecture_notebook, scenario_notebook, stderr, stdout};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use serde_json::json;

    fn rich_cell() -> Cell {
        Cell::code("plot()").with_tags(["fig"]).with_outputs(vec![
            stdout("ok\n"),
            Output::display([
                ("text/plain", json!("<Figure>")),
                ("text/html", json!("<img>")),
                ("image/png", json!("AAAA")),
            ]),
        ])
    }

    #[test]
    fn rejects_empty_kinds() {
        let err = Clear::new(Vec::<ClearKind>::new(), Selector::any()).unwrap_err();
        assert_eq!(err, ConfigError::EmptyClearKinds);

        let names: [&str; 0] = [];
        assert!(Clear::from_names(names, Selector::any()).is_err());
    }

    #[test]
    fn rejects_unknown_kind() {
        let err = Clear::from_names(["output", "everything"], Selector::any()).unwrap_err();
        assert_eq!(
            err,
            ConfigError::UnknownClearKind {
                kind: "everything".to_string()
            }
        );
    }

    #[test]
    fn clears_output_of_tagged_cells_only() {
        let clear = Clear::new([ClearKind::Output], Selector::tag("hide_output")).unwrap();
        let nb = clear.apply(&scenario_notebook()).unwrap();

        assert!(nb.cells[0].outputs().unwrap().is_empty());
        assert_eq!(nb.cells[1..], scenario_notebook().cells[1..]);
    }

    #[test]
    fn clears_content_on_any_cell_type() {
        let nb = Notebook::with_cells(vec![
            Cell::markdown("secret").with_tags(["hide"]),
            Cell::code("x = 1").with_tags(["hide"]),
        ]);
        let clear = Clear::new([ClearKind::Content], Selector::tag("hide")).unwrap();
        let out = clear.apply(&nb).unwrap();
        assert!(out.cells.iter().all(Cell::is_empty));
    }

    #[test]
    fn output_text_and_image_remove_payload_entries() {
        let nb = Notebook::with_cells(vec![rich_cell()]);

        let text = Clear::new([ClearKind::OutputText], Selector::tag("fig")).unwrap();
        let out = text.apply(&nb).unwrap();
        let outputs = out.cells[0].outputs().unwrap();
        assert_eq!(outputs[0], stdout("ok\n"));
        let data = outputs[1].data().unwrap();
        assert_eq!(data.keys().collect::<Vec<_>>(), vec!["image/png"]);

        let image = Clear::new([ClearKind::OutputImage], Selector::tag("fig")).unwrap();
        let out = image.apply(&nb).unwrap();
        let data = out.cells[0].outputs().unwrap()[1].data().unwrap();
        assert_eq!(data.len(), 2);
        assert!(!data.contains_key("image/png"));
    }

    #[test]
    fn stderr_keeps_other_outputs_in_order() {
        let cell = Cell::code("run()").with_outputs(vec![
            stdout("1\n"),
            stderr("warn\n"),
            stdout("2\n"),
            stderr("warn again\n"),
        ]);
        let clear = Clear::new([ClearKind::Stderr], Selector::any()).unwrap();
        let out = clear.apply(&Notebook::with_cells(vec![cell])).unwrap();
        assert_eq!(
            out.cells[0].outputs().unwrap(),
            &[stdout("1\n"), stdout("2\n")]
        );
    }

    #[test]
    fn stderr_ignores_cells_without_outputs() {
        let nb = Notebook::with_cells(vec![Cell::markdown("text"), Cell::code("x")]);
        let clear = Clear::new([ClearKind::Stderr], Selector::any()).unwrap();
        assert_eq!(clear.apply(&nb).unwrap(), nb);
    }

    #[test]
    fn text_selector() {
        let nb = Notebook::with_cells(vec![
            Cell::code("# HIDE\nx").with_outputs(vec![stdout("x")]),
            Cell::code("y").with_outputs(vec![stdout("y")]),
        ]);
        let clear = Clear::new([ClearKind::Output], Selector::text("# HIDE")).unwrap();
        let out = clear.apply(&nb).unwrap();
        assert!(out.cells[0].outputs().unwrap().is_empty());
        assert_eq!(out.cells[1].outputs().unwrap().len(), 1);
    }

    #[test]
    fn summary_lists_kinds_in_order() {
        let clear = Clear::new(
            [ClearKind::Stderr, ClearKind::Content],
            Selector::tag("t"),
        )
        .unwrap();
        assert_eq!(clear.summary(), "Kinds: content, stderr | Cells: tag=t");
    }

    #[test]
    fn kind_names_roundtrip() {
        for kind in ClearKind::ALL {
            assert_eq!(kind.as_str().parse::<ClearKind>().unwrap(), kind);
        }
    }

    fn kinds_strategy() -> impl Strategy<Value = Vec<ClearKind>> {
        proptest::sample::subsequence(ClearKind::ALL.to_vec(), 1..=5)
    }

    proptest! {
        #[test]
        fn clear_is_idempotent(kinds in kinds_strategy(), tag in prop::option::of("hide_output|hide_stderr|test")) {
            let selector = tag.map_or_else(Selector::any, Selector::tag);
            let clear = Clear::new(kinds, selector).unwrap();
            let once = clear.apply(&lecture_notebook()).unwrap();
            let twice = clear.apply(&once).unwrap();
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn stderr_removed_and_rest_preserved(names in prop::collection::vec(prop::bool::ANY, 0..12)) {
            let outputs: Vec<Output> = names
                .iter()
                .enumerate()
                .map(|(i, err)| if *err { stderr(&format!("e{i}")) } else { stdout(&format!("o{i}")) })
                .collect();
            let expected: Vec<Output> = outputs.iter().filter(|o| !o.is_stderr()).cloned().collect();

            let nb = Notebook::with_cells(vec![Cell::code("x").with_outputs(outputs)]);
            let clear = Clear::new([ClearKind::Stderr], Selector::any()).unwrap();
            let out = clear.apply(&nb).unwrap();
            let kept = out.cells[0].outputs().unwrap();
            prop_assert!(kept.iter().all(|o| !o.is_stderr()));
            prop_assert_eq!(kept, expected.as_slice());
        }
    }
}
