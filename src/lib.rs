//! Workspace umbrella crate for tfst-locate.
//!
//! This crate stitches the path memoization arena, the selection policies,
//! and the concordance writer into a single session API: a [`Session`] holds
//! the output sink and the document-wide emission accounting, and hands out
//! one [`SentenceSearch`] per sentence for the driving search to record its
//! steps into.

pub mod config;

pub use concord::{flush, write_match_line, ConcordError, FlushOutcome};
pub use memo::{
    finalize, CandidateMatch, Path, PathMemo, PathStep, StepId, StepKey, StepTable, TableMark,
    TagRef, TagSet,
};
pub use selector::{
    AmbiguousOutputPolicy, MatchPolicy, ResultSet, SearchContext, SearchLimit,
};
pub use tags::{MatchSpan, SentenceTags, TagError, TagIndex, TagSpan, TextPosition};

use std::error::Error;
use std::fmt;
use std::io::Write;
use std::sync::Arc;

use tracing::{info, info_span, warn};

use crate::config::LocateConfig;

/// Errors that can occur while locating matches over a document.
#[derive(Debug)]
pub enum LocateError {
    Tag(TagError),
    Write(ConcordError),
}

impl fmt::Display for LocateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocateError::Tag(err) => write!(f, "tag resolution failure: {err}"),
            LocateError::Write(err) => write!(f, "concordance write failure: {err}"),
        }
    }
}

impl Error for LocateError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            LocateError::Tag(err) => Some(err),
            LocateError::Write(err) => Some(err),
        }
    }
}

impl From<TagError> for LocateError {
    fn from(value: TagError) -> Self {
        LocateError::Tag(value)
    }
}

impl From<ConcordError> for LocateError {
    fn from(value: ConcordError) -> Self {
        LocateError::Write(value)
    }
}

/// A whole-document search session.
///
/// Owns the concordance sink and the counters that outlive any one
/// sentence: matches and output lines emitted so far, and the token span of
/// the last written match. Sentences are processed one at a time through
/// [`Session::begin_sentence`] and [`Session::finish_sentence`].
#[derive(Debug)]
pub struct Session<W: Write> {
    policy: MatchPolicy,
    ambiguous: AmbiguousOutputPolicy,
    limit: SearchLimit,
    out: W,
    matches_emitted: usize,
    outputs_emitted: usize,
    last_printed: Option<(u32, u32)>,
}

impl<W: Write> Session<W> {
    pub fn new(
        out: W,
        policy: MatchPolicy,
        ambiguous: AmbiguousOutputPolicy,
        limit: SearchLimit,
    ) -> Self {
        Self {
            policy,
            ambiguous,
            limit,
            out,
            matches_emitted: 0,
            outputs_emitted: 0,
            last_printed: None,
        }
    }

    pub fn from_config(out: W, cfg: &LocateConfig) -> Self {
        Self::new(
            out,
            cfg.matcher.policy,
            cfg.matcher.ambiguous_outputs,
            cfg.matcher.search_limit(),
        )
    }

    /// Matches written so far, across all flushed sentences.
    pub fn matches_emitted(&self) -> usize {
        self.matches_emitted
    }

    /// Output lines written so far; ambiguous outputs make this exceed
    /// [`Session::matches_emitted`].
    pub fn outputs_emitted(&self) -> usize {
        self.outputs_emitted
    }

    /// True once further sentences cannot emit any new match.
    pub fn limit_reached(&self) -> bool {
        self.limit.is_reached(self.matches_emitted)
    }

    /// Starts a search over one sentence. The search is seeded with the
    /// session's running totals so the search limit stays document-wide.
    pub fn begin_sentence(&self, tags: SentenceTags) -> SentenceSearch {
        let mut ctx = SearchContext::new(Arc::new(tags), self.policy, self.ambiguous, self.limit);
        ctx.matches_emitted = self.matches_emitted;
        ctx.outputs_emitted = self.outputs_emitted;
        ctx.last_printed = self.last_printed;
        SentenceSearch::new(ctx)
    }

    /// Flushes the sentence's surviving matches and folds its accounting
    /// back into the session.
    pub fn finish_sentence(
        &mut self,
        mut search: SentenceSearch,
    ) -> Result<FlushOutcome, LocateError> {
        let span = info_span!("locate.flush", retained = search.ctx.matches.len());
        let _guard = span.enter();
        let outcome = concord::flush(&mut search.ctx, &mut search.memo, &mut self.out)?;
        self.matches_emitted = search.ctx.matches_emitted;
        self.outputs_emitted = search.ctx.outputs_emitted;
        self.last_printed = search.ctx.last_printed;
        if outcome.truncated {
            warn!(
                written = outcome.written,
                total = self.matches_emitted,
                "search limit reached, sentence output truncated"
            );
        } else {
            info!(
                written = outcome.written,
                total = self.matches_emitted,
                "sentence flushed"
            );
        }
        search.collect_all();
        Ok(outcome)
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// The per-sentence state the driving search records into: the step arena,
/// the step table with its scope marks, and the selection context.
#[derive(Debug)]
pub struct SentenceSearch {
    memo: PathMemo,
    table: StepTable,
    base: TableMark,
    ctx: SearchContext,
}

impl SentenceSearch {
    fn new(ctx: SearchContext) -> Self {
        let table = StepTable::new();
        let base = table.mark();
        Self {
            memo: PathMemo::new(),
            table,
            base,
            ctx,
        }
    }

    /// The sentence's tag table.
    pub fn tags(&self) -> &SentenceTags {
        &self.ctx.tags
    }

    /// Records a transition the search just took, deduplicated against the
    /// steps already discovered.
    pub fn record_step(&mut self, key: StepKey, tag: TagRef) -> StepId {
        self.memo.insert(&mut self.table, key, tag)
    }

    /// Links a step to the one that continues its path.
    pub fn link(&mut self, id: StepId, next: Option<StepId>) {
        self.memo.link(id, next)
    }

    /// Pins a step while a branch holds it outside any link.
    pub fn hold(&mut self, id: StepId) {
        self.memo.acquire(id)
    }

    pub fn release_hold(&mut self, id: StepId) {
        self.memo.release(id)
    }

    /// Captures the scope boundary before descending into a sub-search.
    pub fn enter_scope(&self) -> TableMark {
        self.table.mark()
    }

    /// Collects the steps the abandoned sub-search left unreachable.
    pub fn leave_scope(&mut self, mark: TableMark) {
        self.memo.release_prefix(&mut self.table, mark)
    }

    /// Finalizes a completed path into a candidate match and offers it to
    /// the selection context. Returns whether the path had a text extent at
    /// all.
    pub fn complete(&mut self, head: StepId, output: Option<&str>) -> Result<bool, LocateError> {
        let tags = Arc::clone(&self.ctx.tags);
        match memo::finalize(&mut self.memo, head, &tags, output)? {
            Some(candidate) => {
                self.ctx.offer(&mut self.memo, candidate);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Matches currently retained by the selection context.
    pub fn retained(&self) -> usize {
        self.ctx.matches.len()
    }

    /// Steps currently allocated in the arena.
    pub fn live_steps(&self) -> usize {
        self.memo.live_steps()
    }

    fn collect_all(&mut self) {
        self.memo.release_prefix(&mut self.table, self.base);
    }
}
