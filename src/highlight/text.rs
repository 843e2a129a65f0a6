use std::sync::Arc;

use tracing::warn;

use crate::util::{
    analyzer::{escape_query, Flavor, HighlightEngine},
    text::{is_blank, left},
};

/// Marks matched keywords inside document text.
#[derive(Clone)]
pub struct TextHighlighter {
    engine: Arc<HighlightEngine>,
}

impl TextHighlighter {
    pub fn new(engine: Arc<HighlightEngine>) -> Self {
        Self { engine }
    }

    pub fn highlight(&self, text: &str, key: &str) -> String {
        self.highlight_with_limit(text, key, usize::MAX)
    }

    /// Highlight at most the first `max_len` characters of `text`.
    ///
    /// Blank `text` or `key` is returned untouched. When nothing can be marked the
    /// (possibly truncated) text comes back as is; a cut that keeps only leading
    /// whitespace therefore returns that whitespace.
    pub fn highlight_with_limit(&self, text: &str, key: &str, max_len: usize) -> String {
        if is_blank(key) || is_blank(text) { return text.to_string(); }
        let key = escape_query(key);
        let text = left(text, max_len);
        let out = self.engine.highlight(Flavor::Text, text, &key);
        if out.is_marked() && is_blank(out.as_str()) {
            warn!(key = %key, "highlighting produced blank output");
            return text.to_string();
        }
        out.into_string()
    }
}
