//! Notebook cells
//!
//! [`Cell`] is a closed variant over the nbformat cell types. All variants
//! share `source`, `metadata` and an optional `id`; outputs and the execution
//! counter only exist on [`CodeCell`] and are reached by pattern matching.

use crate::output::Output;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::{self, Display, Formatter};

/// Cell metadata with first-class tags
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CellMetadata {
    /// Tags used for selection
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// All other metadata, preserved verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CellMetadata {
    /// Whether `tag` is present
    #[inline]
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Executable cell
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CodeCell {
    /// Execution counter (`null` when never run)
    #[serde(default)]
    pub execution_count: Option<u32>,

    /// Cell id (nbformat 4.5+)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Cell metadata
    #[serde(default)]
    pub metadata: CellMetadata,

    /// Ordered outputs
    #[serde(default)]
    pub outputs: Vec<Output>,

    /// Source text
    #[serde(default, with = "crate::source")]
    pub source: String,

    /// Unrecognized fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Markdown or raw cell
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextCell {
    /// Cell id (nbformat 4.5+)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Cell metadata
    #[serde(default)]
    pub metadata: CellMetadata,

    /// Source text
    #[serde(default, with = "crate::source")]
    pub source: String,

    /// Unrecognized fields (e.g. `attachments`)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Cell type discriminant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKind {
    /// Executable code
    Code,
    /// Narrative markdown
    Markdown,
    /// Raw passthrough text
    Raw,
}

impl Display for CellKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Code => "code",
            Self::Markdown => "markdown",
            Self::Raw => "raw",
        };
        f.write_str(name)
    }
}

/// One notebook cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cell_type", rename_all = "lowercase")]
pub enum Cell {
    /// Code cell
    Code(CodeCell),
    /// Markdown cell
    Markdown(TextCell),
    /// Raw cell
    Raw(TextCell),
}

impl Cell {
    /// New code cell with `source` and no outputs
    #[must_use]
    pub fn code(source: impl Into<String>) -> Self {
        Self::Code(CodeCell {
            source: source.into(),
            ..CodeCell::default()
        })
    }

    /// New markdown cell
    #[must_use]
    pub fn markdown(source: impl Into<String>) -> Self {
        Self::Markdown(TextCell {
            source: source.into(),
            ..TextCell::default()
        })
    }

    /// New raw cell
    #[must_use]
    pub fn raw(source: impl Into<String>) -> Self {
        Self::Raw(TextCell {
            source: source.into(),
            ..TextCell::default()
        })
    }

    /// Builder: add tags
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.metadata_mut()
            .tags
            .extend(tags.into_iter().map(Into::into));
        self
    }

    /// Builder: set outputs (ignored for non-code cells)
    #[must_use]
    pub fn with_outputs(mut self, outputs: Vec<Output>) -> Self {
        if let Self::Code(code) = &mut self {
            code.outputs = outputs;
        }
        self
    }

    /// Builder: set the execution counter (ignored for non-code cells)
    #[must_use]
    pub fn with_execution_count(mut self, count: u32) -> Self {
        if let Self::Code(code) = &mut self {
            code.execution_count = Some(count);
        }
        self
    }

    /// Cell type
    #[must_use]
    pub fn kind(&self) -> CellKind {
        match self {
            Self::Code(_) => CellKind::Code,
            Self::Markdown(_) => CellKind::Markdown,
            Self::Raw(_) => CellKind::Raw,
        }
    }

    /// Source text
    #[must_use]
    pub fn source(&self) -> &str {
        match self {
            Self::Code(c) => &c.source,
            Self::Markdown(t) | Self::Raw(t) => &t.source,
        }
    }

    /// Replace the source text
    pub fn set_source(&mut self, source: impl Into<String>) {
        let source = source.into();
        match self {
            Self::Code(c) => c.source = source,
            Self::Markdown(t) | Self::Raw(t) => t.source = source,
        }
    }

    /// Whether the source has zero length (no trimming)
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.source().is_empty()
    }

    /// Cell metadata
    #[must_use]
    pub fn metadata(&self) -> &CellMetadata {
        match self {
            Self::Code(c) => &c.metadata,
            Self::Markdown(t) | Self::Raw(t) => &t.metadata,
        }
    }

    /// Mutable cell metadata
    pub fn metadata_mut(&mut self) -> &mut CellMetadata {
        match self {
            Self::Code(c) => &mut c.metadata,
            Self::Markdown(t) | Self::Raw(t) => &mut t.metadata,
        }
    }

    /// Tags (empty when absent)
    #[inline]
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.metadata().tags
    }

    /// Whether `tag` is among the cell's tags
    #[inline]
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.metadata().has_tag(tag)
    }

    /// Outputs, for code cells
    #[must_use]
    pub fn outputs(&self) -> Option<&[Output]> {
        match self {
            Self::Code(c) => Some(&c.outputs),
            _ => None,
        }
    }

    /// Code cell view
    #[must_use]
    pub fn as_code(&self) -> Option<&CodeCell> {
        match self {
            Self::Code(c) => Some(c),
            _ => None,
        }
    }

    /// Mutable code cell view
    pub fn as_code_mut(&mut self) -> Option<&mut CodeCell> {
        match self {
            Self::Code(c) => Some(c),
            _ => None,
        }
    }
}
