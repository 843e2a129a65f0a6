use std::collections::HashMap;

use tantivy::{
    query::QueryParser,
    schema::{Field, IndexRecordOption, Schema, TextFieldIndexing, TextOptions},
    tokenizer::{LowerCaser, RegexTokenizer, RemoveLongFilter, SimpleTokenizer, TextAnalyzer, Token, TokenStream, TokenizerManager},
};
use tracing::{debug, warn};

use crate::{
    config::HighlightConfig,
    error::HighlightError,
    models::Highlight,
    util::snippet::{mark_fragments, TokenSpan},
};

pub const TEXT_TOKENIZER: &str = "searchmark_text";
pub const CODE_TOKENIZER: &str = "searchmark_code";

// Identifiers stay whole, every other non-space character is a token of its own.
// The escapes written by `util::html` come first so they are never split.
const CODE_TOKEN_PATTERN: &str = r"&(?:lt|gt);|[\p{L}\p{N}_$]+|[^\s\p{L}\p{N}_$]";

// Characters with a meaning in the query grammar.
const QUERY_SPECIAL_CHARS: &[char] = &[
    '\\', '+', '-', '!', '(', ')', ':', '^', '[', ']', '"', '\'', '{', '}', '~', '*', '`', '<', '>', '=',
];

// Bare words the grammar reads as operators. The analyzers lower-case anyway.
const QUERY_OPERATORS: &[&str] = &["OR", "AND", "NOT", "IN"];

/// Which analyzer to run: prose or source code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flavor {
    Text,
    Code,
}

/// Escape `key` so it parses as plain words.
pub fn escape_query(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for (i, word) in key.split(' ').enumerate() {
        if i > 0 { out.push(' '); }
        if QUERY_OPERATORS.contains(&word) {
            out.push_str(&word.to_lowercase());
            continue;
        }
        for ch in word.chars() {
            if QUERY_SPECIAL_CHARS.contains(&ch) { out.push('\\'); }
            out.push(ch);
        }
    }
    out
}

fn decode_entity(token: &str) -> Option<&'static str> {
    match token {
        "&lt;" => Some("<"),
        "&gt;" => Some(">"),
        _ => None,
    }
}

// `lt` in `&lt;` or `60` in `&#60;`.
fn inside_entity(text: &str, from: usize, to: usize) -> bool {
    let (Some(head), Some(tail)) = (text.get(..from), text.get(to..)) else { return false };
    let head = head.strip_suffix('#').unwrap_or(head);
    head.ends_with('&') && tail.starts_with(';')
}

#[derive(Clone, Copy)]
struct EngineFields {
    text: Field,
    code: Field,
}

fn schema() -> (Schema, EngineFields) {
    let mut sb = Schema::builder();
    let indexing = |tokenizer: &str| {
        TextOptions::default().set_indexing_options(
            TextFieldIndexing::default()
                .set_tokenizer(tokenizer)
                .set_index_option(IndexRecordOption::WithFreqsAndPositions),
        )
    };
    let text = sb.add_text_field("text", indexing(TEXT_TOKENIZER));
    let code = sb.add_text_field("code", indexing(CODE_TOKENIZER));
    (sb.build(), EngineFields { text, code })
}

fn text_analyzer(max_token_length: usize) -> TextAnalyzer {
    TextAnalyzer::builder(SimpleTokenizer::default())
        .filter(RemoveLongFilter::limit(max_token_length))
        .filter(LowerCaser)
        .build()
}

fn code_analyzer(max_token_length: usize) -> Result<TextAnalyzer, HighlightError> {
    Ok(TextAnalyzer::builder(RegexTokenizer::new(CODE_TOKEN_PATTERN)?)
        .filter(RemoveLongFilter::limit(max_token_length))
        .filter(LowerCaser)
        .build())
}

/// The analyzers and query parsers used for highlighting.
///
/// Build one per process and share it behind an `Arc`; every method takes `&self`.
pub struct HighlightEngine {
    config: HighlightConfig,
    text_analyzer: TextAnalyzer,
    code_analyzer: TextAnalyzer,
    text_parser: QueryParser,
    code_parser: QueryParser,
}

impl HighlightEngine {
    pub fn new(config: HighlightConfig) -> Result<Self, HighlightError> {
        let text_analyzer = text_analyzer(config.max_token_length);
        let code_analyzer = code_analyzer(config.max_token_length)?;
        let tokenizers = TokenizerManager::default();
        tokenizers.register(TEXT_TOKENIZER, text_analyzer.clone());
        tokenizers.register(CODE_TOKENIZER, code_analyzer.clone());
        let (sch, fields) = schema();
        let text_parser = QueryParser::new(sch.clone(), vec![fields.text], tokenizers.clone());
        let code_parser = QueryParser::new(sch, vec![fields.code], tokenizers);
        Ok(Self { config, text_analyzer, code_analyzer, text_parser, code_parser })
    }

    pub fn config(&self) -> &HighlightConfig {
        &self.config
    }

    /// Tokens of `text` as produced by the analyzer for `flavor`.
    pub fn tokenize(&self, flavor: Flavor, text: &str) -> Vec<String> {
        let mut analyzer = self.analyzer(flavor).clone();
        let mut stream = analyzer.token_stream(text);
        let mut out = Vec::new();
        while stream.advance() {
            out.push(stream.token().text.clone());
        }
        out
    }

    /// Parse an already escaped key into the set of terms to highlight.
    pub fn compile(&self, flavor: Flavor, escaped_key: &str) -> Result<KeyMatcher<'_>, HighlightError> {
        let parser = match flavor {
            Flavor::Text => &self.text_parser,
            Flavor::Code => &self.code_parser,
        };
        let (query, errors) = parser.parse_query_lenient(escaped_key);
        if let Some(first_error) = errors.first() {
            debug!(key = escaped_key, error_count = errors.len(), first_error = %first_error, "lenient query parse produced warnings");
        }
        let mut terms: HashMap<String, usize> = HashMap::new();
        query.query_terms(&mut |term, _| {
            if let Some(s) = term.value().as_str() {
                let next = terms.len();
                terms.entry(s.to_string()).or_insert(next);
            }
        });
        if terms.is_empty() {
            if let Some(e) = errors.into_iter().next() { return Err(e.into()); }
            debug!(key = escaped_key, "query produced no terms");
        }
        Ok(KeyMatcher { engine: self, flavor, terms })
    }

    /// Highlight `text` against `escaped_key`; any failure falls back to the text as given.
    pub fn highlight(&self, flavor: Flavor, text: &str, escaped_key: &str) -> Highlight {
        match self.compile(flavor, escaped_key) {
            Ok(matcher) => matcher.highlight(text),
            Err(e) => {
                warn!(key = escaped_key, error = %e, "unable to highlight text");
                Highlight::Original(text.to_string())
            }
        }
    }

    fn analyzer(&self, flavor: Flavor) -> &TextAnalyzer {
        match flavor {
            Flavor::Text => &self.text_analyzer,
            Flavor::Code => &self.code_analyzer,
        }
    }
}

/// A parsed key, reusable across many texts.
pub struct KeyMatcher<'a> {
    engine: &'a HighlightEngine,
    flavor: Flavor,
    terms: HashMap<String, usize>,
}

impl KeyMatcher<'_> {
    // An escaped bracket matches the bracket itself and is wrapped whole; text inside
    // any other escape never matches.
    fn term_of(&self, text: &str, token: &Token) -> Option<usize> {
        if let Some(decoded) = decode_entity(&token.text) { return self.terms.get(decoded).copied(); }
        if self.flavor == Flavor::Text && inside_entity(text, token.offset_from, token.offset_to) { return None; }
        self.terms.get(&token.text).copied()
    }

    pub fn has_terms(&self) -> bool {
        !self.terms.is_empty()
    }

    pub fn highlight(&self, text: &str) -> Highlight {
        if self.terms.is_empty() || text.is_empty() { return Highlight::Original(text.to_string()); }
        let mut analyzer = self.engine.analyzer(self.flavor).clone();
        let mut stream = analyzer.token_stream(text);
        let mut spans = Vec::new();
        while stream.advance() {
            let token = stream.token();
            spans.push(TokenSpan {
                range: token.offset_from..token.offset_to,
                term: self.term_of(text, token),
            });
        }
        let cfg = &self.engine.config;
        // code is highlighted line by line, so a line is never split into fragments
        let fragment_size = match self.flavor {
            Flavor::Text => cfg.fragment_size,
            Flavor::Code => usize::MAX,
        };
        match mark_fragments(text, &spans, fragment_size, &cfg.pre_tag, &cfg.post_tag) {
            Some(marked) => Highlight::Marked(marked),
            None => Highlight::Original(text.to_string()),
        }
    }
}
