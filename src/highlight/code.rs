use std::sync::Arc;

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::{
    models::CodeLine,
    util::{
        analyzer::{escape_query, Flavor, HighlightEngine, KeyMatcher},
        html::html,
        text::{abbreviate, is_blank, split_lines},
    },
};

/// Marks matched keywords in source code and picks the lines of a code preview.
#[derive(Clone)]
pub struct CodeHighlighter {
    engine: Arc<HighlightEngine>,
}

impl CodeHighlighter {
    pub fn new(engine: Arc<HighlightEngine>) -> Self {
        Self { engine }
    }

    /// Highlight a single code snippet; the input comes back unchanged when nothing matches.
    pub fn hlcode(&self, text: &str, key: &str) -> String {
        let key = escape_query(key);
        let out = self.engine.highlight(Flavor::Code, text, &key);
        if is_blank(out.as_str()) { return text.to_string(); }
        out.into_string()
    }

    /// Pick at most `max_lines` lines of `code` to preview for `key`.
    ///
    /// Lines that match are highlighted. When fewer than half of `max_lines` match, the
    /// lines right after the last match are appended unhighlighted. A key that cannot be
    /// parsed matches nothing, so the preview is padding only. `None` means there is no
    /// preview for blank input.
    pub fn hl_lines(&self, code: &str, key: &str, max_lines: usize) -> Option<Vec<CodeLine>> {
        if is_blank(code) || is_blank(key) { return None; }
        let key = escape_query(key);
        let mut code_lines = Vec::new();
        let lines = split_lines(code);
        match self.engine.compile(Flavor::Code, &key) {
            Ok(matcher) => self.match_pass(&lines, &matcher, key.chars().count(), max_lines, &mut code_lines),
            Err(e) => warn!(key = %key, error = %e, "failed to highlight code lines"),
        }

        let min_lines = max_lines / 2;
        if code_lines.len() < min_lines {
            let after = code_lines.last().map(|l| l.line_number).unwrap_or(0);
            debug!(matched = code_lines.len(), min_lines, after, "padding code preview");
            for (idx, line) in lines.iter().enumerate().skip(after) {
                if code_lines.len() >= min_lines { break; }
                code_lines.push(CodeLine::new(idx + 1, self.render(line)));
            }
        }
        Some(code_lines)
    }

    /// [`CodeHighlighter::hl_lines`] over many files in parallel; results keep input order.
    pub fn hl_files<S: AsRef<str> + Sync>(&self, codes: &[S], key: &str, max_lines: usize) -> Vec<Option<Vec<CodeLine>>> {
        codes.par_iter().map(|code| self.hl_lines(code.as_ref(), key, max_lines)).collect()
    }

    fn match_pass(&self, lines: &[&str], matcher: &KeyMatcher<'_>, key_len: usize, max_lines: usize, out: &mut Vec<CodeLine>) {
        if !matcher.has_terms() { return; }
        for (idx, line) in lines.iter().enumerate() {
            if out.len() >= max_lines { break; }
            let trimmed = line.trim();
            if trimmed.is_empty() { continue; }
            // cheap pre-filter, compares against the escaped key
            if trimmed.chars().count() < key_len { continue; }
            let marked = matcher.highlight(&self.render(line));
            if marked.is_marked() && !is_blank(marked.as_str()) { out.push(CodeLine::new(idx + 1, marked.into_string())); }
        }
    }

    // Abbreviate then escape: markup is only ever injected after this.
    fn render(&self, line: &str) -> String {
        html(&abbreviate(line, self.engine.config().max_line_length))
    }
}
