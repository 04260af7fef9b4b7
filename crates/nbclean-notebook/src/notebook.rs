//! Notebook document
//!
//! Ingress and egress for nbformat 4 JSON. Output uses one-space indentation
//! and a trailing newline, matching the reference notebook writer.

use crate::cell::Cell;
use crate::error::NotebookError;
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use std::path::Path;

/// Parsed notebook: ordered cells plus document metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notebook {
    /// Cells in document order
    pub cells: Vec<Cell>,

    /// Notebook-level metadata (kernelspec, language info, ...)
    #[serde(default)]
    pub metadata: Map<String, Value>,

    /// Major format version (always 4)
    pub nbformat: u32,

    /// Minor format version
    pub nbformat_minor: u32,
}

impl Notebook {
    /// Supported major format version
    pub const FORMAT_MAJOR: u32 = 4;

    /// Minor version written for new notebooks
    pub const FORMAT_MINOR: u32 = 5;

    /// Create an empty notebook
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_cells(Vec::new())
    }

    /// Create a notebook holding `cells`
    #[must_use]
    pub fn with_cells(cells: Vec<Cell>) -> Self {
        Self {
            cells,
            metadata: Map::new(),
            nbformat: Self::FORMAT_MAJOR,
            nbformat_minor: Self::FORMAT_MINOR,
        }
    }

    /// Number of cells
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the notebook has no cells
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Decode a notebook from JSON text
    ///
    /// # Errors
    /// - `NotebookError::Json` if the text is not a valid notebook
    /// - `NotebookError::UnsupportedFormat` if the major version is not 4
    pub fn from_json(text: &str) -> Result<Self, NotebookError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    /// Decode a notebook from a JSON value
    ///
    /// # Errors
    /// See [`Notebook::from_json`]
    pub fn from_value(value: Value) -> Result<Self, NotebookError> {
        let major = value
            .get("nbformat")
            .and_then(Value::as_u64)
            .ok_or(NotebookError::MissingFormat)?;
        if major != u64::from(Self::FORMAT_MAJOR) {
            return Err(NotebookError::UnsupportedFormat { major });
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Encode as nbformat JSON
    ///
    /// Keys are written in sorted order at every level, like nbformat's
    /// writer, so an unchanged notebook round-trips byte for byte.
    ///
    /// # Errors
    /// Returns `NotebookError::Json` if encoding fails
    pub fn to_json(&self) -> Result<String, NotebookError> {
        // `Value` objects are `BTreeMap`s, which sorts keys
        let value = serde_json::to_value(self)?;
        let mut buf = Vec::new();
        let mut ser =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b" "));
        value.serialize(&mut ser)?;
        buf.push(b'\n');
        // serde_json only emits valid UTF-8
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Read a notebook file
    ///
    /// # Errors
    /// - `NotebookError::Io` if the file cannot be read
    /// - `NotebookError::Parse` if its content is not a notebook
    /// - `NotebookError::UnsupportedFormat` for other format versions
    pub fn read(path: impl AsRef<Path>) -> Result<Self, NotebookError> {
        let path = path.as_ref();
        let text =
            std::fs::read_to_string(path).map_err(|e| NotebookError::io_error(path, e))?;
        let notebook = Self::from_json(&text).map_err(|e| e.at_path(path))?;
        tracing::debug!(path = %path.display(), cells = notebook.len(), "read notebook");
        Ok(notebook)
    }

    /// Write the notebook, creating parent directories as needed
    ///
    /// # Errors
    /// Returns `NotebookError::Io` if directories or the file cannot be written
    pub fn write(&self, path: impl AsRef<Path>) -> Result<(), NotebookError> {
        let path = path.as_ref();
        let json = self.to_json()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| NotebookError::io_error(parent, e))?;
        }
        std::fs::write(path, json).map_err(|e| NotebookError::io_error(path, e))
    }
}

impl Default for Notebook {
    fn default() -> Self {
        Self::new()
    }
}
