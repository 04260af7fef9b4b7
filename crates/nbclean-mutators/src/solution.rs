//! Solution region stripping
//!
//! [`SolutionStripper`] is the seam through which [`crate::ReplaceText`]
//! rewrites solution regions. [`LineStripper`] is the built-in, line based
//! implementation.

use crate::error::SolutionError;

/// Replaces delimited solution regions with a stub
pub trait SolutionStripper: std::fmt::Debug {
    /// Replace every `begin`..`end` region of `source` with `stub`
    ///
    /// Returns `Ok(None)` when `source` has no complete region and must be
    /// left untouched.
    ///
    /// # Errors
    /// Returns `SolutionError` when a region is malformed
    fn clear_between_delimiters(
        &self,
        source: &str,
        begin: &str,
        end: &str,
        stub: &str,
    ) -> Result<Option<String>, SolutionError>;
}

/// Line based solution stripper
///
/// The line holding `begin` is replaced by the stub lines, indented like that
/// line. Everything up to and including the line holding `end` is dropped.
/// A line holding `begin` followed by `end` is a one-line region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineStripper;

impl SolutionStripper for LineStripper {
    fn clear_between_delimiters(
        &self,
        source: &str,
        begin: &str,
        end: &str,
        stub: &str,
    ) -> Result<Option<String>, SolutionError> {
        if !(source.contains(begin) && source.contains(end)) {
            return Ok(None);
        }

        let mut lines = Vec::new();
        let mut in_solution = false;
        for (number, line) in source.split('\n').enumerate() {
            if let Some(at) = line.find(begin) {
                if in_solution {
                    return Err(SolutionError::NestedBegin { line: number + 1 });
                }
                let indent = &line[..line.len() - line.trim_start().len()];
                lines.extend(stub.split('\n').map(|stub_line| format!("{indent}{stub_line}")));
                in_solution = !line[at + begin.len()..].contains(end);
            } else if line.contains(end) {
                in_solution = false;
            } else if !in_solution {
                lines.push(line.to_string());
            }
        }

        if in_solution {
            return Err(SolutionError::MissingEnd);
        }
        Ok(Some(lines.join("\n")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BEGIN: &str = "### SOLUTION BEGIN";
    const END: &str = "### SOLUTION END";

    fn strip(source: &str, stub: &str) -> Result<Option<String>, SolutionError> {
        LineStripper.clear_between_delimiters(source, BEGIN, END, stub)
    }

    #[test]
    fn replaces_region_with_indented_stub() {
        let source = "def f(x):\n    ### SOLUTION BEGIN\n    return x\n    ### SOLUTION END\n\nf(1)";
        let out = strip(source, "# YOUR CODE HERE\nraise NotImplementedError()")
            .unwrap()
            .unwrap();
        assert_eq!(
            out,
            "def f(x):\n    # YOUR CODE HERE\n    raise NotImplementedError()\n\nf(1)"
        );
    }

    #[test]
    fn untouched_without_both_delimiters() {
        assert_eq!(strip("x = 1", "stub").unwrap(), None);
        assert_eq!(strip("### SOLUTION BEGIN\nx = 1", "stub").unwrap(), None);
        assert_eq!(strip("x = 1\n### SOLUTION END", "stub").unwrap(), None);
    }

    #[test]
    fn multiple_regions() {
        let source = "a\n### SOLUTION BEGIN\n1\n### SOLUTION END\nb\n### SOLUTION BEGIN\n2\n### SOLUTION END";
        assert_eq!(strip(source, "...").unwrap().unwrap(), "a\n...\nb\n...");
    }

    #[test]
    fn one_line_region() {
        let source = "x = 1  # ### SOLUTION BEGIN 42 ### SOLUTION END\ny = 2";
        assert_eq!(strip(source, "stub").unwrap().unwrap(), "stub\ny = 2");
    }

    #[test]
    fn nested_begin_is_error() {
        let source = "### SOLUTION BEGIN\n### SOLUTION BEGIN\n### SOLUTION END";
        assert_eq!(
            strip(source, "stub").unwrap_err(),
            SolutionError::NestedBegin { line: 2 }
        );
    }

    #[test]
    fn end_before_begin_is_error() {
        let source = "### SOLUTION END\nx\n### SOLUTION BEGIN\ny";
        assert_eq!(strip(source, "stub").unwrap_err(), SolutionError::MissingEnd);
    }

    #[test]
    fn keeps_trailing_newline() {
        let source = "### SOLUTION BEGIN\nx\n### SOLUTION END\n";
        assert_eq!(strip(source, "stub").unwrap().unwrap(), "stub\n");
    }
}
