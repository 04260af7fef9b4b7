//! Multiline text (de)serialization
//!
//! nbformat stores text fields either as one string or as a list of lines
//! that keep their trailing newline. In memory the text is always one
//! `String`; on write it is split back into lines.

use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Multiline {
    Joined(String),
    Lines(Vec<String>),
}

pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Multiline::deserialize(deserializer)? {
        Multiline::Joined(text) => text,
        Multiline::Lines(lines) => lines.concat(),
    })
}

pub(crate) fn serialize<S>(text: &str, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let lines = split_lines(text);
    let mut seq = serializer.serialize_seq(Some(lines.len()))?;
    for line in lines {
        seq.serialize_element(line)?;
    }
    seq.end()
}

/// Split text into lines, keeping line endings
///
/// Empty text yields no lines; a final line without a newline is kept as is.
#[must_use]
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split_inclusive('\n').collect()
}
