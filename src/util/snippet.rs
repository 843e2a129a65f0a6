use std::{collections::HashSet, ops::Range};

/// A token of the analyzed text. `term` is the index of the query term it matched, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSpan {
    pub range: Range<usize>,
    pub term: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Fragment {
    text: Range<usize>,
    tokens: Range<usize>,
}

// Fragments start on a token boundary once the running fragment would grow past `size` bytes.
// The last fragment always runs to the end of the text, so fragments tile the whole input.
fn split_fragments(text_len: usize, tokens: &[TokenSpan], size: usize) -> Vec<Fragment> {
    let size = size.max(1);
    let mut out = Vec::new();
    let mut start = 0;
    let mut first_token = 0;
    let mut limit = size;
    for (i, tok) in tokens.iter().enumerate() {
        if tok.range.end > limit && i > first_token {
            out.push(Fragment { text: start..tok.range.start, tokens: first_token..i });
            start = tok.range.start;
            first_token = i;
            limit = start.saturating_add(size);
        }
    }
    out.push(Fragment { text: start..text_len, tokens: first_token..tokens.len() });
    out
}

fn score(tokens: &[TokenSpan]) -> usize {
    tokens.iter().filter_map(|t| t.term).collect::<HashSet<_>>().len()
}

fn render(text: &str, frag: &Fragment, tokens: &[TokenSpan], pre: &str, post: &str, out: &mut String) {
    let mut pos = frag.text.start;
    for tok in &tokens[frag.tokens.clone()] {
        if tok.term.is_none() || tok.range.start < pos || tok.range.end > frag.text.end { continue; }
        let (Some(gap), Some(word)) = (text.get(pos..tok.range.start), text.get(tok.range.clone())) else { continue };
        out.push_str(gap);
        out.push_str(pre);
        out.push_str(word);
        out.push_str(post);
        pos = tok.range.end;
    }
    out.push_str(text.get(pos..frag.text.end).unwrap_or(""));
}

/// Keep the fragments that contain a matched token, in text order, and wrap every
/// matched token in `pre`/`post`. `None` when no fragment matched.
pub fn mark_fragments(text: &str, tokens: &[TokenSpan], fragment_size: usize, pre: &str, post: &str) -> Option<String> {
    if tokens.iter().all(|t| t.term.is_none()) { return None; }
    let mut out = String::with_capacity(text.len() + pre.len() + post.len());
    for frag in split_fragments(text.len(), tokens, fragment_size) {
        if score(&tokens[frag.tokens.clone()]) == 0 { continue; }
        render(text, &frag, tokens, pre, post, &mut out);
    }
    if out.is_empty() { None } else { Some(out) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans(text: &str, hits: &[&str]) -> Vec<TokenSpan> {
        let mut out = Vec::new();
        let mut offset = 0;
        for word in text.split(' ') {
            let term = hits.iter().position(|h| *h == word);
            out.push(TokenSpan { range: offset..offset + word.len(), term });
            offset += word.len() + 1;
        }
        out
    }

    #[test]
    fn wraps_each_matched_token() {
        let text = "find the needle in the needle stack";
        let out = mark_fragments(text, &spans(text, &["needle"]), 100, "<b>", "</b>").unwrap();
        assert_eq!(out, "find the <b>needle</b> in the <b>needle</b> stack");
    }

    #[test]
    fn no_match_is_none() {
        let text = "nothing to see here";
        assert_eq!(mark_fragments(text, &spans(text, &["absent"]), 100, "<b>", "</b>"), None);
    }

    #[test]
    fn unmatched_fragments_are_dropped() {
        let text = "aaaa bbbb cccc dddd";
        let out = mark_fragments(text, &spans(text, &["dddd"]), 10, "[", "]").unwrap();
        assert_eq!(out, "cccc [dddd]");
    }

    #[test]
    fn fragments_tile_the_text() {
        let text = "one two three four five six";
        let frags = split_fragments(text.len(), &spans(text, &[]), 8);
        assert_eq!(frags.first().unwrap().text.start, 0);
        assert_eq!(frags.last().unwrap().text.end, text.len());
        for pair in frags.windows(2) {
            assert_eq!(pair[0].text.end, pair[1].text.start);
        }
    }
}
