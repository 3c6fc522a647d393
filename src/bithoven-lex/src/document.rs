use crate::config::LexConfig;
use crate::error::EditError;
use crate::host::{to_edit_deltas, HostChange};
use crate::relex::{relex, EditDelta, RelexStats, TokenCache};
use crate::spans::{build_spans, update_spans, DecorationSpan};
use crate::token::Token;
use std::sync::Arc;

/// Highlighting state for one open document.
///
/// Edits update the text immediately and are folded into a single pending
/// delta against the last accepted token cache. Highlighting either runs in
/// place ([`Document::refresh`]) or as a detached [`HighlightPass`]; a pass
/// whose generation has been overtaken by a newer edit is dropped on
/// [`Document::finish_pass`].
#[derive(Debug, Clone)]
pub struct Document {
    config: Arc<LexConfig>,
    text: String,
    cache: TokenCache,
    spans: Vec<DecorationSpan>,
    pending: Option<EditDelta>,
    generation: u64,
}

impl Document {
    pub fn open(text: impl Into<String>, config: Arc<LexConfig>) -> Self {
        let text = text.into();
        let cache = TokenCache::build(&text, &config);
        let spans = build_spans(cache.tokens(), &config.tags);
        Self {
            config,
            text,
            cache,
            spans,
            pending: None,
            generation: 0,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn config(&self) -> &Arc<LexConfig> {
        &self.config
    }

    /// Tokens of the last accepted pass. Lags behind [`Document::text`] while
    /// an edit is pending.
    pub fn tokens(&self) -> &[Token] {
        self.cache.tokens()
    }

    pub fn spans(&self) -> &[DecorationSpan] {
        &self.spans
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<&EditDelta> {
        self.pending.as_ref()
    }

    /// Apply `delta` to the text without highlighting. Returns the new
    /// generation. On error nothing changes.
    pub fn edit(&mut self, delta: EditDelta) -> Result<u64, EditError> {
        delta.apply(&mut self.text)?;
        let composed = match self.pending.take() {
            None => delta,
            Some(prior) => self.compose(&prior, &delta),
        };
        self.pending = Some(composed);
        self.generation += 1;
        Ok(self.generation)
    }

    // `prior` maps the cached text to the text before `next`; the result maps
    // the cached text straight to the current text.
    fn compose(&self, prior: &EditDelta, next: &EditDelta) -> EditDelta {
        let start = prior.start.min(next.start);
        let prior_new_end = prior.start + prior.inserted.len();
        let end = if next.end > prior_new_end {
            next.end - prior_new_end + prior.end
        } else {
            prior.end
        };
        let new_end = self.text.len() - (self.cache.text_len() - end);
        EditDelta::new(start, end, &self.text[start..new_end])
    }

    /// Re-highlight the current text synchronously.
    pub fn refresh(&mut self) -> RelexStats {
        let Some(delta) = self.pending.take() else {
            return RelexStats::default();
        };
        run_relex(
            &mut self.cache,
            &mut self.spans,
            &self.text,
            &delta,
            &self.config,
        )
    }

    pub fn apply_edit(&mut self, delta: EditDelta) -> Result<RelexStats, EditError> {
        self.edit(delta)?;
        Ok(self.refresh())
    }

    /// Apply one host transaction. All changes are validated before any of
    /// them touches the text.
    pub fn apply_host_changes(&mut self, changes: &[HostChange]) -> Result<RelexStats, EditError> {
        let deltas = to_edit_deltas(changes)?;
        let mut scratch = self.text.clone();
        for delta in &deltas {
            delta.apply(&mut scratch)?;
        }
        for delta in deltas {
            self.edit(delta)?;
        }
        Ok(self.refresh())
    }

    /// Snapshot the work needed to bring highlighting up to date.
    pub fn begin_pass(&self) -> HighlightPass {
        HighlightPass {
            generation: self.generation,
            config: Arc::clone(&self.config),
            text: self.text.clone(),
            cache: self.cache.clone(),
            spans: self.spans.clone(),
            delta: self.pending.clone(),
        }
    }

    /// Accept a finished pass if no edit arrived since it began. Returns
    /// whether the result was used.
    pub fn finish_pass(&mut self, done: FinishedPass) -> bool {
        if done.generation != self.generation {
            return false;
        }
        self.pending = None;
        self.cache = done.cache;
        self.spans = done.spans;
        true
    }
}

// The pending delta is composed by the document itself, so relex only fails
// on an internal inconsistency; fall back to a full scan rather than leave the
// text unhighlighted.
fn run_relex(
    cache: &mut TokenCache,
    spans: &mut Vec<DecorationSpan>,
    text: &str,
    delta: &EditDelta,
    config: &LexConfig,
) -> RelexStats {
    match relex(cache, text, delta, config) {
        Ok(stats) => {
            update_spans(spans, cache.tokens(), &config.tags, &stats);
            stats
        }
        Err(_) => {
            let old_len = cache.text_len();
            *cache = TokenCache::build(text, config);
            *spans = build_spans(cache.tokens(), &config.tags);
            RelexStats::full(old_len, cache)
        }
    }
}

/// Detached highlighting work for one document generation.
#[derive(Debug, Clone)]
pub struct HighlightPass {
    generation: u64,
    config: Arc<LexConfig>,
    text: String,
    cache: TokenCache,
    spans: Vec<DecorationSpan>,
    delta: Option<EditDelta>,
}

impl HighlightPass {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn run(mut self) -> FinishedPass {
        let stats = match &self.delta {
            Some(delta) => run_relex(
                &mut self.cache,
                &mut self.spans,
                &self.text,
                delta,
                &self.config,
            ),
            None => RelexStats::default(),
        };
        FinishedPass {
            generation: self.generation,
            cache: self.cache,
            spans: self.spans,
            stats,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FinishedPass {
    generation: u64,
    cache: TokenCache,
    spans: Vec<DecorationSpan>,
    pub stats: RelexStats,
}

impl FinishedPass {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn spans(&self) -> &[DecorationSpan] {
        &self.spans
    }
}
