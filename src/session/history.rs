//! Committed calculations.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A committed calculation: the expression as typed and its result.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// The expression exactly as it was on the display.
    pub expression_text: String,
    /// The result formatted for display.
    pub result_text: String,
}

impl HistoryEntry {
    pub fn new(expression_text: impl Into<String>, result_text: impl Into<String>) -> Self {
        Self {
            expression_text: expression_text.into(),
            result_text: result_text.into(),
        }
    }

    /// Split a legacy `"<expr> = <result>"` line.
    ///
    /// A line without the separator keeps the whole text as the expression.
    fn from_legacy_line(line: &str) -> Self {
        match line.split_once(" = ") {
            Some((expression, result)) => Self::new(expression, result),
            None => Self::new(line, ""),
        }
    }
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.expression_text, self.result_text)
    }
}

/// Stored form of an entry: the current object shape, or a single line
/// as older versions of the calculator wrote it.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredEntry {
    Structured {
        #[serde(rename = "expressionText")]
        expression_text: String,
        #[serde(rename = "resultText")]
        result_text: String,
    },
    Line(String),
}

impl<'de> Deserialize<'de> for HistoryEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match StoredEntry::deserialize(deserializer)? {
            StoredEntry::Structured {
                expression_text,
                result_text,
            } => Self::new(expression_text, result_text),
            StoredEntry::Line(line) => Self::from_legacy_line(&line),
        })
    }
}

/// Insertion-ordered log of committed calculations.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HistoryLog {
    entries: Vec<HistoryEntry>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a log from its JSON form.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let entries = serde_json::from_str(json)?;
        Ok(Self { entries })
    }

    /// Serialize the whole log as a JSON array.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.entries)
    }

    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
