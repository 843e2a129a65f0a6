use serde::{Deserialize, Serialize};

/// One numbered line of a code preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeLine {
    #[serde(rename = "lineNumber")]
    pub line_number: usize,
    pub content: String,
}

impl CodeLine {
    pub fn new(line_number: usize, content: String) -> Self {
        Self { line_number, content }
    }
}

/// Result of running the match capability over a piece of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Highlight {
    /// Markup was injected around at least one matched span.
    Marked(String),
    /// Nothing matched or matching failed; the text as it was given.
    Original(String),
}

impl Highlight {
    pub fn is_marked(&self) -> bool {
        matches!(self, Highlight::Marked(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Highlight::Marked(s) | Highlight::Original(s) => s,
        }
    }

    pub fn into_string(self) -> String {
        match self {
            Highlight::Marked(s) | Highlight::Original(s) => s,
        }
    }
}
