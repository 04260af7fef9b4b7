//! Testing utilities for nbclean workspace
//!
//! Shared notebook fixtures and small builders.

#![allow(missing_docs)]

use nbclean_notebook::{Cell, Notebook, Output, STDERR, STDOUT};
use serde_json::json;
use std::path::{Path, PathBuf};

pub const SOLUTION_BEGIN: &str = "### SOLUTION BEGIN";
pub const SOLUTION_END: &str = "### SOLUTION END";

pub fn stdout(text: &str) -> Output {
    Output::stream(STDOUT, text)
}

pub fn stderr(text: &str) -> Output {
    Output::stream(STDERR, text)
}

/// Three-cell notebook: A tagged `hide_output` with stdout and stderr output,
/// B tagged `remove`, C untagged.
pub fn scenario_notebook() -> Notebook {
    Notebook::with_cells(vec![
        Cell::code("print('a')")
            .with_tags(["hide_output"])
            .with_execution_count(1)
            .with_outputs(vec![stdout("a\n"), stderr("careful\n")]),
        Cell::code("secret = 42").with_tags(["remove"]),
        Cell::code("c = 3").with_execution_count(3),
    ])
}

/// Notebook covering every tag the cleaners look at
pub fn lecture_notebook() -> Notebook {
    let solution = format!(
        "# First we'll create 'a'\ndef square(x):\n    {SOLUTION_BEGIN}\n    return x * x\n    {SOLUTION_END}\n"
    );
    Notebook::with_cells(vec![
        Cell::markdown("# Lecture 1"),
        Cell::code("import numpy as np\nnp.arange(3)")
            .with_tags(["hide_output"])
            .with_execution_count(1)
            .with_outputs(vec![Output::result(Some(1), "array([0, 1, 2])")]),
        Cell::code("answer = 42")
            .with_tags(["hide_content"])
            .with_execution_count(2),
        Cell::code("import warnings\nwarnings.warn('deprecated')\nprint('done')")
            .with_tags(["hide_stderr"])
            .with_execution_count(3)
            .with_outputs(vec![stderr("UserWarning: deprecated\n"), stdout("done\n")]),
        Cell::code("scratch = 1").with_tags(["remove"]),
        Cell::code(solution).with_execution_count(4),
        Cell::markdown(format!("Explain.\n{SOLUTION_BEGIN}\nBecause.\n{SOLUTION_END}")),
        Cell::code("square(3)")
            .with_tags(["test"])
            .with_execution_count(5)
            .with_outputs(vec![Output::result(Some(5), "9")]),
        Cell::code("")
            .with_execution_count(6),
        Cell::code("print('final')\nraise_warning()")
            .with_execution_count(7)
            .with_outputs(vec![
                stdout("final\n"),
                stderr("RuntimeWarning\n"),
                Output::display([
                    ("text/plain", json!("<Figure>")),
                    ("image/png", json!("iVBORw0KGgo=")),
                ]),
            ]),
    ])
}

/// Write `notebook` to `dir/name` and return the path
pub fn write_notebook(dir: &Path, name: &str, notebook: &Notebook) -> PathBuf {
    let path = dir.join(name);
    notebook.write(&path).unwrap();
    path
}
