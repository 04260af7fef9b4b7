//! Code cell outputs
//!
//! Outputs are a closed set of nbformat output types. Rich payloads live in a
//! [`MimeBundle`] keyed by mime-type.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Mime-type to payload mapping (`data` field of rich outputs)
pub type MimeBundle = Map<String, Value>;

/// Stream name used for standard error
pub const STDERR: &str = "stderr";

/// Stream name used for standard output
pub const STDOUT: &str = "stdout";

/// One entry of a code cell's `outputs` list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "output_type", rename_all = "snake_case")]
pub enum Output {
    /// Text written to a named stream (`stdout` / `stderr`)
    Stream {
        /// Stream name
        name: String,
        /// Stream text
        #[serde(with = "crate::source")]
        text: String,
    },

    /// Rich display output
    DisplayData {
        /// Payload by mime-type
        #[serde(default)]
        data: MimeBundle,
        /// Output metadata
        #[serde(default)]
        metadata: Map<String, Value>,
    },

    /// Value of the last expression of a cell
    ExecuteResult {
        /// Payload by mime-type
        #[serde(default)]
        data: MimeBundle,
        /// Execution counter of the producing run
        #[serde(default)]
        execution_count: Option<u32>,
        /// Output metadata
        #[serde(default)]
        metadata: Map<String, Value>,
    },

    /// Uncaught exception
    Error {
        /// Exception name
        ename: String,
        /// Exception value
        evalue: String,
        /// Formatted traceback lines
        #[serde(default)]
        traceback: Vec<String>,
    },
}

impl Output {
    /// Create a stream output
    #[must_use]
    pub fn stream(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::Stream {
            name: name.into(),
            text: text.into(),
        }
    }

    /// Create a display output from `(mime, payload)` pairs
    #[must_use]
    pub fn display<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Self::DisplayData {
            data: entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            metadata: Map::new(),
        }
    }

    /// Create an execute result with a single `text/plain` payload
    #[must_use]
    pub fn result(execution_count: Option<u32>, text: &str) -> Self {
        let mut data = MimeBundle::new();
        data.insert("text/plain".to_string(), text_payload(text));
        Self::ExecuteResult {
            data,
            execution_count,
            metadata: Map::new(),
        }
    }

    /// nbformat `output_type` name
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Stream { .. } => "stream",
            Self::DisplayData { .. } => "display_data",
            Self::ExecuteResult { .. } => "execute_result",
            Self::Error { .. } => "error",
        }
    }

    /// Stream name, for stream outputs
    #[must_use]
    pub fn stream_name(&self) -> Option<&str> {
        match self {
            Self::Stream { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Whether this is a `stderr` stream
    #[inline]
    #[must_use]
    pub fn is_stderr(&self) -> bool {
        self.stream_name() == Some(STDERR)
    }

    /// Rich payload, for display data and execute results
    #[must_use]
    pub fn data(&self) -> Option<&MimeBundle> {
        match self {
            Self::DisplayData { data, .. } | Self::ExecuteResult { data, .. } => Some(data),
            _ => None,
        }
    }

    /// Mutable rich payload
    pub fn data_mut(&mut self) -> Option<&mut MimeBundle> {
        match self {
            Self::DisplayData { data, .. } | Self::ExecuteResult { data, .. } => Some(data),
            _ => None,
        }
    }

    /// Drop payload entries whose mime-type starts with `prefix`
    ///
    /// Returns the number of removed entries.
    pub fn remove_mime_prefix(&mut self, prefix: &str) -> usize {
        let Some(data) = self.data_mut() else {
            return 0;
        };
        let before = data.len();
        data.retain(|mime, _| !mime.starts_with(prefix));
        before - data.len()
    }
}

/// Read a text payload stored as a string or a list of lines
#[must_use]
pub fn payload_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Array(items) => items
            .iter()
            .map(|item| item.as_str())
            .collect::<Option<Vec<_>>>()
            .map(|lines| lines.concat()),
        _ => None,
    }
}

/// Encode text as a line-list payload
#[must_use]
pub fn text_payload(text: &str) -> Value {
    Value::Array(
        crate::source::split_lines(text)
            .into_iter()
            .map(|line| Value::String(line.to_string()))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn stream_roundtrip_shape() {
        let out: Output = serde_json::from_value(json!({
            "output_type": "stream",
            "name": "stderr",
            "text": ["warning\n"]
        }))
        .unwrap();
        assert!(out.is_stderr());
        assert_eq!(out.kind(), "stream");

        let back = serde_json::to_value(&out).unwrap();
        assert_eq!(back["output_type"], "stream");
        assert_eq!(back["text"], json!(["warning\n"]));
    }

    #[test]
    fn execute_result_reads_null_count() {
        let out: Output = serde_json::from_value(json!({
            "output_type": "execute_result",
            "execution_count": null,
            "data": {"text/plain": ["3"]},
            "metadata": {}
        }))
        .unwrap();
        assert!(matches!(out, Output::ExecuteResult { execution_count: None, .. }));
        assert_eq!(payload_text(&out.data().unwrap()["text/plain"]).unwrap(), "3");
    }

    #[test]
    fn remove_mime_prefix_counts() {
        let mut out = Output::display([
            ("text/plain", json!("fig")),
            ("text/html", json!("<b>fig</b>")),
            ("image/png", json!("iVBOR")),
        ]);
        assert_eq!(out.remove_mime_prefix("text/"), 2);
        assert_eq!(out.data().unwrap().len(), 1);
        assert!(out.data().unwrap().contains_key("image/png"));

        let mut stream = Output::stream(STDOUT, "hi");
        assert_eq!(stream.remove_mime_prefix("text/"), 0);
    }

    #[test]
    fn payload_text_rejects_non_text() {
        assert_eq!(payload_text(&json!({"a": 1})), None);
        assert_eq!(payload_text(&json!(["a\n", "b"])).unwrap(), "a\nb");
        assert_eq!(text_payload("a\nb"), json!(["a\n", "b"]));
    }
}
