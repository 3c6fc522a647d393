//! Incremental re-lexing.
//!
//! A [`TokenCache`] holds the classified token stream of one text. [`relex`]
//! takes the cache, the post-edit text and the [`EditDelta`] between them and
//! updates the cache for the new text. The result is always identical to
//! [`TokenCache::build`] on the new text. Scanning, classification and
//! allocation are bounded by the edit and the run needed to line up again;
//! the unchanged tail only has its offsets moved.
//!
//! Re-scanning starts at a restart anchor before the edit and stops as soon
//! as the new stream lines up with a cached token that began after the edited
//! region. Text after the edit is unchanged and every token boundary is in the
//! scanner's default state, so the cached tail from that point on can be
//! reused with shifted offsets.

use crate::config::LexConfig;
use crate::error::EditError;
use crate::scanner::{ScanState, Scanner, LOOKAHEAD};
use crate::token::{Token, TokenKind};
use crate::tokenize::{classify, tokenize};
use serde::{Deserialize, Serialize};

/// Replace bytes `start..end` of the pre-edit text with `inserted`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditDelta {
    pub start: usize,
    pub end: usize,
    #[serde(default)]
    pub inserted: String,
}

impl EditDelta {
    pub fn new(start: usize, end: usize, inserted: impl Into<String>) -> Self {
        Self {
            start,
            end,
            inserted: inserted.into(),
        }
    }

    pub fn insert(at: usize, text: impl Into<String>) -> Self {
        Self::new(at, at, text)
    }

    pub fn delete(start: usize, end: usize) -> Self {
        Self::new(start, end, String::new())
    }

    pub fn removed_len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Length of the text after applying this edit to a text of `len` bytes.
    pub fn result_len(&self, len: usize) -> usize {
        len - self.removed_len() + self.inserted.len()
    }

    /// Check the range against the pre-edit `text`.
    pub fn validate(&self, text: &str) -> Result<(), EditError> {
        if self.start > self.end {
            return Err(EditError::Inverted {
                start: self.start,
                end: self.end,
            });
        }
        if self.end > text.len() {
            return Err(EditError::OutOfBounds {
                start: self.start,
                end: self.end,
                len: text.len(),
            });
        }
        for pos in [self.start, self.end] {
            if !text.is_char_boundary(pos) {
                return Err(EditError::NotCharBoundary(pos));
            }
        }
        Ok(())
    }

    pub fn apply(&self, text: &mut String) -> Result<(), EditError> {
        self.validate(text)?;
        text.replace_range(self.start..self.end, &self.inserted);
        Ok(())
    }

    // Cached offsets at or after `end` move by the size difference.
    fn shift(&self, offset: usize) -> usize {
        offset + self.inserted.len() - self.removed_len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TokenCache {
    tokens: Vec<Token>,
    len: usize,
}

impl TokenCache {
    pub fn build(text: &str, config: &LexConfig) -> Self {
        Self {
            tokens: tokenize(text, &config.keywords),
            len: text.len(),
        }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    /// Length in bytes of the text these tokens cover.
    pub fn text_len(&self) -> usize {
        self.len
    }

    /// The covered text, rebuilt from the lexemes.
    pub fn text(&self) -> String {
        self.tokens.iter().map(|t| t.lexeme.as_str()).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RelexStats {
    /// Offset scanning resumed from.
    pub restart: usize,
    /// End of the replaced token run in the previous text.
    pub old_end: usize,
    /// End of the rescanned token run in the new text.
    pub new_end: usize,
    /// Tokens produced by the scanner for this edit.
    pub rescanned: usize,
    /// Cached tokens carried over.
    pub reused: usize,
    /// Whether scanning stopped early by lining up with the cached tail.
    pub resynced: bool,
}

impl RelexStats {
    /// Stats for rebuilding a whole text of `old_len` bytes into `cache`.
    pub fn full(old_len: usize, cache: &TokenCache) -> Self {
        Self {
            restart: 0,
            old_end: old_len,
            new_end: cache.len,
            rescanned: cache.tokens.len(),
            reused: 0,
            resynced: false,
        }
    }
}

/// Tokens after which the scanner is known to sit in its default state.
fn is_restart_anchor(token: &Token) -> bool {
    match token.kind {
        TokenKind::Whitespace
        | TokenKind::Operator
        | TokenKind::LineComment
        | TokenKind::StringLiteral => true,
        TokenKind::BlockComment => token.len() >= 4 && token.lexeme.ends_with("*/"),
        _ => false,
    }
}

fn check_new_text(cache: &TokenCache, new_text: &str, delta: &EditDelta) -> Result<(), EditError> {
    if delta.start > delta.end {
        return Err(EditError::Inverted {
            start: delta.start,
            end: delta.end,
        });
    }
    if delta.end > cache.len {
        return Err(EditError::OutOfBounds {
            start: delta.start,
            end: delta.end,
            len: cache.len,
        });
    }
    let expected = delta.result_len(cache.len);
    if new_text.len() != expected {
        return Err(EditError::LengthMismatch {
            expected,
            actual: new_text.len(),
        });
    }
    let inserted_end = delta.start + delta.inserted.len();
    for pos in [delta.start, inserted_end] {
        if !new_text.is_char_boundary(pos) {
            return Err(EditError::NotCharBoundary(pos));
        }
    }
    if new_text[delta.start..inserted_end] != delta.inserted {
        return Err(EditError::InsertedMismatch(delta.start));
    }
    Ok(())
}

/// Bring `cache` from the pre-edit text to `new_text`.
///
/// The cache is updated in place: rescanned tokens are spliced over the
/// replaced run and the cached tail only has its offsets moved. On error the
/// cache is left as it was.
pub fn relex(
    cache: &mut TokenCache,
    new_text: &str,
    delta: &EditDelta,
    config: &LexConfig,
) -> Result<RelexStats, EditError> {
    check_new_text(cache, new_text, delta)?;
    let tokens = &cache.tokens;

    // Tokens the scanner settled without looking at the edited bytes, cut back
    // to the nearest restart anchor.
    let mut keep = tokens.partition_point(|t| t.end() + LOOKAHEAD <= delta.start);
    while keep > 0 && !is_restart_anchor(&tokens[keep - 1]) {
        keep -= 1;
    }
    let restart = keep.checked_sub(1).map_or(0, |i| tokens[i].end());

    // First cached token lying wholly after the removed range.
    let mut tail = tokens.partition_point(|t| t.start() < delta.end);

    let mut fresh = Vec::new();
    let mut resynced = false;
    let mut scanner = Scanner::resume(new_text, restart, ScanState::Default);
    while let Some(token) = scanner.next_token() {
        let token = classify(token, &config.keywords);
        while tail < tokens.len() && delta.shift(tokens[tail].start()) < token.start() {
            tail += 1;
        }
        if let Some(old) = tokens.get(tail) {
            if delta.shift(old.start()) == token.start()
                && old.kind == token.kind
                && old.lexeme == token.lexeme
            {
                resynced = true;
                break;
            }
        }
        fresh.push(token);
    }

    let (old_end, new_end) = if resynced {
        let old_end = tokens[tail].start();
        (old_end, delta.shift(old_end))
    } else {
        tail = tokens.len();
        (cache.len, new_text.len())
    };
    let stats = RelexStats {
        restart,
        old_end,
        new_end,
        rescanned: fresh.len(),
        reused: keep + tokens.len() - tail,
        resynced,
    };

    for token in &mut cache.tokens[tail..] {
        token.move_to(delta.shift(token.start()));
    }
    cache.tokens.splice(keep..tail, fresh);
    cache.len = new_text.len();
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edited(text: &str, delta: &EditDelta) -> String {
        let mut out = text.to_string();
        delta.apply(&mut out).unwrap();
        out
    }

    fn check(text: &str, delta: EditDelta) -> RelexStats {
        let config = LexConfig::default();
        let mut cache = TokenCache::build(text, &config);
        let new_text = edited(text, &delta);
        let stats = relex(&mut cache, &new_text, &delta, &config).unwrap();
        assert_eq!(cache, TokenCache::build(&new_text, &config), "{new_text:?}");
        stats
    }

    const HTLC: &str = "pragma bithoven version 0.0.1;\npragma bithoven target segwit;\n\n(condition: bool, sig_alice: signature)\n{\n    if condition {\n        older 1000;\n        return checksig (sig_alice, \"0245\");\n    } else {\n        verify sha256 sha256 preimage == \"53de\";\n    }\n}\n";

    #[test]
    fn test_insert_inside_identifier_resyncs_quickly() {
        let at = HTLC.find("condition:").unwrap() + 4;
        let stats = check(HTLC, EditDelta::insert(at, "x"));
        assert!(stats.resynced);
        assert!(stats.rescanned <= 3, "{stats:?}");
    }

    #[test]
    fn test_keyword_becomes_identifier() {
        let at = HTLC.find("older").unwrap() + 5;
        check(HTLC, EditDelta::insert(at, "than"));
    }

    #[test]
    fn test_opening_block_comment_swallows_rest() {
        let at = HTLC.find("{\n    if").unwrap();
        let stats = check(HTLC, EditDelta::insert(at, "/*"));
        assert!(!stats.resynced);
    }

    #[test]
    fn test_closing_block_comment_restores_tail() {
        let text = "/* a */ if x { older 5; }";
        check(text, EditDelta::delete(5, 7));
        check(text, EditDelta::insert(0, "x"));
    }

    #[test]
    fn test_unterminated_quote_recovers_next_line() {
        let at = HTLC.find("return").unwrap();
        let stats = check(HTLC, EditDelta::insert(at, "\""));
        assert!(stats.resynced);
    }

    #[test]
    fn test_version_literal_lookahead() {
        check("x 0.\n", EditDelta::insert(4, "1"));
        check("x 0. ", EditDelta::insert(4, "1"));
        check("0.1", EditDelta::delete(2, 3));
    }

    #[test]
    fn test_two_char_operator_forms_across_edit() {
        check("a & b", EditDelta::insert(3, "&"));
        check("a == b", EditDelta::delete(3, 4));
        check("a / b", EditDelta::insert(3, "/"));
    }

    #[test]
    fn test_whitespace_extends_at_end() {
        check("if ", EditDelta::insert(3, " "));
        check("if", EditDelta::insert(2, "\n"));
    }

    #[test]
    fn test_edit_at_document_start_and_end() {
        check(HTLC, EditDelta::insert(0, "// header\n"));
        check(HTLC, EditDelta::insert(HTLC.len(), "/* trailing"));
        check(HTLC, EditDelta::delete(0, HTLC.len()));
        check("", EditDelta::insert(0, "if x {}"));
    }

    #[test]
    fn test_replace_across_tokens() {
        let start = HTLC.find("older").unwrap();
        let end = HTLC.find("checksig").unwrap();
        check(HTLC, EditDelta::new(start, end, "after 5; return "));
    }

    #[test]
    fn test_multibyte_text() {
        check("é if \"ü\"", EditDelta::insert(2, "ß"));
        check("a€b", EditDelta::delete(1, 4));
    }

    #[test]
    fn test_rejects_inconsistent_input() {
        let config = LexConfig::default();
        let mut cache = TokenCache::build("if x", &config);
        assert_eq!(
            relex(&mut cache, "if x", &EditDelta::new(3, 2, ""), &config),
            Err(EditError::Inverted { start: 3, end: 2 })
        );
        assert_eq!(
            relex(&mut cache, "if x", &EditDelta::delete(2, 9), &config),
            Err(EditError::OutOfBounds {
                start: 2,
                end: 9,
                len: 4
            })
        );
        assert_eq!(
            relex(&mut cache, "if x", &EditDelta::insert(0, "y"), &config),
            Err(EditError::LengthMismatch {
                expected: 5,
                actual: 4
            })
        );
        assert_eq!(
            relex(&mut cache, "zif x", &EditDelta::insert(0, "y"), &config),
            Err(EditError::InsertedMismatch(0))
        );
    }

    #[test]
    fn test_delta_apply_checks_char_boundaries() {
        let mut text = String::from("a€b");
        assert_eq!(
            EditDelta::delete(2, 4).apply(&mut text),
            Err(EditError::NotCharBoundary(2))
        );
        assert_eq!(text, "a€b");
    }

    #[test]
    fn test_cache_text_round_trips() {
        let cache = TokenCache::build(HTLC, &LexConfig::default());
        assert_eq!(cache.text(), HTLC);
        assert_eq!(cache.text_len(), HTLC.len());
    }

    #[test]
    fn test_rejected_delta_leaves_cache_untouched() {
        let config = LexConfig::default();
        let mut cache = TokenCache::build("older 10;", &config);
        let before = cache.clone();
        assert!(relex(&mut cache, "older 10;", &EditDelta::delete(4, 20), &config).is_err());
        assert_eq!(cache, before);
    }

    #[test]
    fn test_keystroke_reuses_cached_tokens_in_place() {
        let config = LexConfig::default();
        let text = HTLC.repeat(50);
        let mut cache = TokenCache::build(&text, &config);
        let count = cache.tokens().len();
        let last = cache.tokens()[count - 1].lexeme.as_ptr();
        let first = cache.tokens()[0].lexeme.as_ptr();

        let delta = EditDelta::insert(10, "x");
        let new_text = edited(&text, &delta);
        let stats = relex(&mut cache, &new_text, &delta, &config).unwrap();

        assert!(stats.resynced);
        assert!(stats.rescanned <= 3, "{stats:?}");
        assert_eq!(stats.reused + stats.rescanned, cache.tokens().len());
        assert_eq!(cache.tokens()[0].lexeme.as_ptr(), first);
        assert_eq!(cache.tokens().last().unwrap().lexeme.as_ptr(), last);
        assert_eq!(cache, TokenCache::build(&new_text, &config));
    }

    #[test]
    fn test_stats_bound_the_replaced_run() {
        let text = "older 10; after 5;";
        let stats = check(text, EditDelta::new(6, 8, "144"));
        assert!(stats.resynced);
        assert_eq!((stats.restart, stats.old_end, stats.new_end), (0, 8, 9));
        assert_eq!(stats.rescanned, 3);

        let stats = check(text, EditDelta::insert(0, "/*"));
        assert!(!stats.resynced);
        assert_eq!((stats.old_end, stats.new_end), (text.len(), text.len() + 2));
    }
}
