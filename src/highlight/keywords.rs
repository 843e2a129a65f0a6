use std::sync::Arc;

use crate::util::{
    analyzer::{Flavor, HighlightEngine},
    text::is_blank,
};

/// Normalizes raw user queries into search tokens.
#[derive(Clone)]
pub struct KeywordProcessor {
    engine: Arc<HighlightEngine>,
}

impl KeywordProcessor {
    pub fn new(engine: Arc<HighlightEngine>) -> Self {
        Self { engine }
    }

    pub fn split_keywords(&self, sentence: &str) -> Vec<String> {
        if is_blank(sentence) { return Vec::new(); }
        self.engine.tokenize(Flavor::Text, sentence)
    }

    /// Tokens of `key` joined by single spaces.
    pub fn cleanup_key(&self, key: &str) -> String {
        self.split_keywords(key).join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HighlightConfig;

    fn processor() -> KeywordProcessor {
        KeywordProcessor::new(Arc::new(HighlightEngine::new(HighlightConfig::default()).unwrap()))
    }

    #[test]
    fn blank_sentence_has_no_keywords() {
        assert!(processor().split_keywords("   ").is_empty());
        assert!(processor().split_keywords("").is_empty());
    }

    #[test]
    fn duplicates_are_kept_in_order() {
        assert_eq!(processor().split_keywords("Foo bar FOO"), vec!["foo", "bar", "foo"]);
    }

    #[test]
    fn cleanup_collapses_noise() {
        assert_eq!(processor().cleanup_key("  Hello,   WORLD!! "), "hello world");
    }
}
