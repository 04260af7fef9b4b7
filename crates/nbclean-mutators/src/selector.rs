//! Cell selection
//!
//! A [`Selector`] combines up to three criteria: tag membership, literal
//! substring containment and source emptiness. How they combine is set by
//! [`MatchMode`].

use crate::error::ConfigError;
use nbclean_notebook::Cell;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// How the criteria of a [`Selector`] combine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Priority chain: only the first set criterion (tag, then text, then
    /// empty) is evaluated
    #[default]
    First,

    /// Every set criterion must hold
    All,
}

impl FromStr for MatchMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "first" => Ok(Self::First),
            "all" => Ok(Self::All),
            other => Err(ConfigError::UnknownMatchMode {
                mode: other.to_string(),
            }),
        }
    }
}

impl Display for MatchMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::First => "first",
            Self::All => "all",
        })
    }
}

/// Match criteria for cells
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selector {
    tag: Option<String>,
    text: Option<String>,
    empty: bool,
    mode: MatchMode,
}

impl Selector {
    /// Selector with no criteria (matches every cell)
    #[inline]
    #[must_use]
    pub fn any() -> Self {
        Self::default()
    }

    /// Cells carrying `tag`
    #[inline]
    #[must_use]
    pub fn tag(tag: impl Into<String>) -> Self {
        Self::any().with_tag(tag)
    }

    /// Cells whose source contains `text`
    #[inline]
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::any().with_text(text)
    }

    /// Cells with empty source
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self::any().with_empty(true)
    }

    /// Set the tag criterion
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Set the substring criterion
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set the emptiness criterion
    #[must_use]
    pub fn with_empty(mut self, empty: bool) -> Self {
        self.empty = empty;
        self
    }

    /// Set how criteria combine
    #[must_use]
    pub fn with_mode(mut self, mode: MatchMode) -> Self {
        self.mode = mode;
        self
    }

    /// Tag criterion
    #[must_use]
    pub fn tag_criterion(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Substring criterion
    #[must_use]
    pub fn text_criterion(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Emptiness criterion
    #[inline]
    #[must_use]
    pub fn requires_empty(&self) -> bool {
        self.empty
    }

    /// Match mode
    #[inline]
    #[must_use]
    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Whether any criterion is set
    #[inline]
    #[must_use]
    pub fn has_criteria(&self) -> bool {
        self.tag.is_some() || self.text.is_some() || self.empty
    }

    /// Evaluate the selector against a cell
    #[must_use]
    pub fn matches(&self, cell: &Cell) -> bool {
        match self.mode {
            MatchMode::First => {
                if let Some(tag) = &self.tag {
                    cell.has_tag(tag)
                } else if let Some(text) = &self.text {
                    cell.source().contains(text.as_str())
                } else if self.empty {
                    cell.is_empty()
                } else {
                    true
                }
            }
            MatchMode::All => {
                self.tag.as_deref().map_or(true, |tag| cell.has_tag(tag))
                    && self
                        .text
                        .as_deref()
                        .map_or(true, |text| cell.source().contains(text))
                    && (!self.empty || cell.is_empty())
            }
        }
    }
}

impl Display for Selector {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if !self.has_criteria() {
            return f.write_str("all cells");
        }
        let mut parts = Vec::new();
        if let Some(tag) = &self.tag {
            parts.push(format!("tag={tag}"));
        }
        if let Some(text) = &self.text {
            parts.push(format!("text={text:?}"));
        }
        if self.empty {
            parts.push("empty".to_string());
        }
        write!(f, "{}", parts.join(", "))?;
        if self.mode == MatchMode::All && parts.len() > 1 {
            f.write_str(" (all)")?;
        }
        Ok(())
    }
}
