use crate::config::TagSet;
use crate::relex::RelexStats;
use crate::token::Token;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecorationSpan {
    pub start: usize,
    pub end: usize,
    pub tag: String,
}

/// Merge adjacent tokens whose kinds map to the same tag.
pub fn build_spans(tokens: &[Token], tags: &TagSet) -> Vec<DecorationSpan> {
    let mut spans: Vec<DecorationSpan> = Vec::new();
    for token in tokens {
        let tag = tags.tag(token.kind);
        match spans.last_mut() {
            Some(last) if last.end == token.start() && last.tag == tag => last.end = token.end(),
            _ => spans.push(DecorationSpan {
                start: token.start(),
                end: token.end(),
                tag: tag.to_string(),
            }),
        }
    }
    spans
}

/// Patch `spans` after a relex produced `tokens`.
///
/// Only spans touching the replaced token run are rebuilt; spans past it are
/// shifted. Spans are unions of whole tokens and tags are distinct per kind,
/// so the rebuilt window starts and ends on tokens that kept their tag, and
/// its edges merge with neighbours exactly as before.
pub fn update_spans(
    spans: &mut Vec<DecorationSpan>,
    tokens: &[Token],
    tags: &TagSet,
    stats: &RelexStats,
) {
    let lo = spans.partition_point(|s| s.end < stats.restart);
    let hi = spans.partition_point(|s| s.start <= stats.old_end);

    let from = spans.get(lo).map_or(stats.restart, |s| s.start.min(stats.restart));
    let old_to = spans[lo..hi]
        .last()
        .map_or(stats.old_end, |s| s.end.max(stats.old_end));
    let new_to = old_to - stats.old_end + stats.new_end;

    let first = tokens.partition_point(|t| t.start() < from);
    let last = tokens.partition_point(|t| t.start() < new_to);
    let rebuilt = build_spans(&tokens[first..last], tags);

    for span in &mut spans[hi..] {
        span.start = span.start + stats.new_end - stats.old_end;
        span.end = span.end + stats.new_end - stats.old_end;
    }
    spans.splice(lo..hi, rebuilt);
}
