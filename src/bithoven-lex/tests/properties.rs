use bithoven_lex::{
    build_spans, relex, tokenize, Document, EditDelta, KeywordTable, LexConfig, TokenCache,
};
use std::sync::Arc;
use proptest::prelude::*;

// Fragments that exercise every scanner branch, including the broken ones.
const PIECES: &[&str] = &[
    "if", "else", "return", "verify", "older", "after", "checksig", "sha256", "pragma",
    "bithoven", "version", "0.0.1", "segwit", "bool", "signature", "true", "sig_a", "x",
    "1000", "7", ".", " ", "\n", "\r\n", "\t", "(", ")", "{", "}", "[", "]", ",", ";", ":",
    "==", "=", "&&", "&", "||", "|", "\"", "\"02ab\"", "//", "/*", "*/", "*", "/", "é", "€",
    "#",
];

fn document() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(PIECES), 0..40).prop_map(|parts| parts.concat())
}

fn inserted() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(PIECES), 0..4).prop_map(|parts| parts.concat())
}

// Snap to the previous char boundary so edits never split a char.
fn floor_boundary(text: &str, pos: usize) -> usize {
    let mut pos = pos.min(text.len());
    while !text.is_char_boundary(pos) {
        pos -= 1;
    }
    pos
}

proptest! {
    #[test]
    fn lexemes_partition_the_input(text in document()) {
        let tokens = tokenize(&text, &KeywordTable::bithoven());
        let joined: String = tokens.iter().map(|t| t.lexeme.as_str()).collect();
        prop_assert_eq!(joined, text.clone());
        let mut offset = 0;
        for token in &tokens {
            prop_assert_eq!(token.start(), offset);
            prop_assert!(token.end() > token.start());
            offset = token.end();
        }
        prop_assert_eq!(offset, text.len());
    }

    #[test]
    fn arbitrary_unicode_partitions(text in "\\PC{0,60}") {
        let tokens = tokenize(&text, &KeywordTable::bithoven());
        let joined: String = tokens.iter().map(|t| t.lexeme.as_str()).collect();
        prop_assert_eq!(joined, text);
    }

    #[test]
    fn full_scans_are_deterministic(text in document()) {
        let table = KeywordTable::bithoven();
        prop_assert_eq!(tokenize(&text, &table), tokenize(&text, &table));
    }

    #[test]
    fn incremental_matches_full_rescan(
        text in document(),
        a in 0usize..400,
        b in 0usize..400,
        insert in inserted(),
    ) {
        let config = LexConfig::default();
        let start = floor_boundary(&text, a.min(b));
        let end = floor_boundary(&text, a.max(b)).max(start);
        let delta = EditDelta::new(start, end, insert);
        let mut cache = TokenCache::build(&text, &config);
        let mut new_text = text.clone();
        delta.apply(&mut new_text).unwrap();
        relex(&mut cache, &new_text, &delta, &config).unwrap();
        prop_assert_eq!(cache, TokenCache::build(&new_text, &config));
    }

    #[test]
    fn document_spans_track_edit_sequences(
        text in document(),
        edits in prop::collection::vec((0usize..400, 0usize..400, inserted()), 1..6),
    ) {
        let config = Arc::new(LexConfig::default());
        let mut doc = Document::open(text, Arc::clone(&config));
        for (a, b, insert) in edits {
            let start = floor_boundary(doc.text(), a.min(b));
            let end = floor_boundary(doc.text(), a.max(b)).max(start);
            doc.apply_edit(EditDelta::new(start, end, insert)).unwrap();
            let full = TokenCache::build(doc.text(), &config);
            prop_assert_eq!(doc.tokens(), full.tokens());
            prop_assert_eq!(doc.spans().to_vec(), build_spans(full.tokens(), &config.tags));
        }
    }
}
