pub mod code;
pub mod keywords;
pub mod text;

use std::sync::Arc;

use crate::{
    config::HighlightConfig,
    error::HighlightError,
    models::CodeLine,
    util::analyzer::HighlightEngine,
};

pub use code::CodeHighlighter;
pub use keywords::KeywordProcessor;
pub use text::TextHighlighter;

/// Everything the serving layer needs, sharing one engine.
#[derive(Clone)]
pub struct SearchHelper {
    keywords: KeywordProcessor,
    text: TextHighlighter,
    code: CodeHighlighter,
}

impl SearchHelper {
    pub fn new(config: HighlightConfig) -> Result<Self, HighlightError> {
        Ok(Self::with_engine(Arc::new(HighlightEngine::new(config)?)))
    }

    pub fn with_engine(engine: Arc<HighlightEngine>) -> Self {
        Self {
            keywords: KeywordProcessor::new(engine.clone()),
            text: TextHighlighter::new(engine.clone()),
            code: CodeHighlighter::new(engine),
        }
    }

    pub fn split_keywords(&self, sentence: &str) -> Vec<String> {
        self.keywords.split_keywords(sentence)
    }

    pub fn cleanup_key(&self, key: &str) -> String {
        self.keywords.cleanup_key(key)
    }

    pub fn highlight(&self, text: &str, key: &str) -> String {
        self.text.highlight(text, key)
    }

    pub fn highlight_with_limit(&self, text: &str, key: &str, max_len: usize) -> String {
        self.text.highlight_with_limit(text, key, max_len)
    }

    pub fn hlcode(&self, text: &str, key: &str) -> String {
        self.code.hlcode(text, key)
    }

    pub fn hl_lines(&self, code: &str, key: &str, max_lines: usize) -> Option<Vec<CodeLine>> {
        self.code.hl_lines(code, key, max_lines)
    }

    pub fn hl_files<S: AsRef<str> + Sync>(&self, codes: &[S], key: &str, max_lines: usize) -> Vec<Option<Vec<CodeLine>>> {
        self.code.hl_files(codes, key, max_lines)
    }
}
