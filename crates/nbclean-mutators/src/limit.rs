//! Output limiting
//!
//! Bounds the size of outputs produced by an execution run.

use crate::error::{ConfigError, MutateError};
use crate::mutator::Mutator;
use nbclean_notebook::{payload_text, split_lines, text_payload, Notebook, Output};

/// Marker left where lines were dropped
pub const ELLIPSIS: &str = "...";

/// Truncate long outputs of code cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitOutput {
    max_lines: usize,
}

impl LimitOutput {
    /// Create the mutator
    ///
    /// # Errors
    /// Returns `ConfigError::ZeroOutputLimit` if `max_lines` is zero
    pub fn new(max_lines: usize) -> Result<Self, ConfigError> {
        if max_lines == 0 {
            return Err(ConfigError::ZeroOutputLimit);
        }
        Ok(Self { max_lines })
    }

    /// Line limit
    #[inline]
    #[must_use]
    pub fn max_lines(&self) -> usize {
        self.max_lines
    }

    /// Truncate `text` to the limit, returning `None` if it already fits
    #[must_use]
    pub fn truncate_text(&self, text: &str) -> Option<String> {
        let lines = split_lines(text);
        if lines.len() <= self.max_lines {
            return None;
        }
        let mut kept = lines[..self.max_lines].concat();
        if !kept.ends_with('\n') {
            kept.push('\n');
        }
        kept.push_str(ELLIPSIS);
        if text.ends_with('\n') {
            kept.push('\n');
        }
        Some(kept)
    }

    fn truncate_traceback(&self, traceback: &mut Vec<String>) -> bool {
        let keep = (self.max_lines / 2).max(1);
        // both ends plus the ellipsis must be shorter than the original
        if traceback.len() <= self.max_lines || traceback.len() <= 2 * keep + 1 {
            return false;
        }
        let tail = traceback.split_off(traceback.len() - keep);
        traceback.truncate(keep);
        traceback.push(ELLIPSIS.to_string());
        traceback.extend(tail);
        true
    }

    fn limit(&self, output: &mut Output) -> bool {
        match output {
            Output::Stream { text, .. } => match self.truncate_text(text) {
                Some(short) => {
                    *text = short;
                    true
                }
                None => false,
            },
            Output::DisplayData { data, .. } | Output::ExecuteResult { data, .. } => {
                let Some(plain) = data.get_mut("text/plain") else {
                    return false;
                };
                match payload_text(plain).and_then(|text| self.truncate_text(&text)) {
                    Some(short) => {
                        *plain = text_payload(&short);
                        true
                    }
                    None => false,
                }
            }
            Output::Error { traceback, .. } => self.truncate_traceback(traceback),
        }
    }
}

impl Mutator for LimitOutput {
    fn name(&self) -> &'static str {
        "LimitOutput"
    }

    fn summary(&self) -> String {
        format!("Max lines: {}", self.max_lines)
    }

    fn apply(&self, notebook: &Notebook) -> Result<Notebook, MutateError> {
        let mut next = notebook.clone();
        let mut truncated = 0usize;
        for code in next.cells.iter_mut().filter_map(|c| c.as_code_mut()) {
            for output in &mut code.outputs {
                if self.limit(output) {
                    truncated += 1;
                }
            }
        }
        tracing::debug!(truncated, max_lines = self.max_lines, "limited outputs");
        Ok(next)
    }
}
