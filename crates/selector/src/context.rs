use std::sync::Arc;

use tracing::trace;

use memo::{CandidateMatch, PathMemo};
use tags::SentenceTags;

use crate::policy::{AmbiguousOutputPolicy, MatchPolicy, SearchLimit};
use crate::result_set::ResultSet;

/// Per-sentence selection state.
///
/// Every candidate the search finalizes is offered here; the context keeps
/// the ones the policies retain and releases the rest back to the arena.
/// The emission counters and `last_printed` span persist across sentences:
/// the session seeds them from its running totals so the search limit and
/// output accounting stay global to the document.
#[derive(Debug)]
pub struct SearchContext {
    pub policy: MatchPolicy,
    pub ambiguous: AmbiguousOutputPolicy,
    pub limit: SearchLimit,
    pub matches: ResultSet,
    /// Matches written so far, across the whole document.
    pub matches_emitted: usize,
    /// Output lines written so far; under [`AmbiguousOutputPolicy::Allow`]
    /// one span can produce several.
    pub outputs_emitted: usize,
    /// Token span of the last written match, for output accounting.
    pub last_printed: Option<(u32, u32)>,
    pub tags: Arc<SentenceTags>,
}

impl SearchContext {
    pub fn new(
        tags: Arc<SentenceTags>,
        policy: MatchPolicy,
        ambiguous: AmbiguousOutputPolicy,
        limit: SearchLimit,
    ) -> Self {
        Self {
            policy,
            ambiguous,
            limit,
            matches: ResultSet::new(),
            matches_emitted: 0,
            outputs_emitted: 0,
            last_printed: None,
            tags,
        }
    }

    /// Offers a finalized candidate to the retained set.
    ///
    /// The candidate is either kept (possibly displacing retained matches)
    /// or released; either way the caller gives up ownership.
    pub fn offer(&mut self, memo: &mut PathMemo, candidate: CandidateMatch) {
        match self.policy {
            MatchPolicy::All => self.offer_all(memo, candidate),
            MatchPolicy::Longest => self.offer_longest(memo, candidate),
            MatchPolicy::Shortest => self.offer_shortest(memo, candidate),
        }
    }

    /// Keep-all still deduplicates: a span already retained only re-enters
    /// when ambiguous outputs are allowed and the output is new.
    fn offer_all(&mut self, memo: &mut PathMemo, candidate: CandidateMatch) {
        let duplicate = self.matches.iter().any(|kept| {
            kept.span.same_span(&candidate.span)
                && (self.ambiguous == AmbiguousOutputPolicy::Forbid
                    || kept.output == candidate.output)
        });
        if duplicate {
            trace!(span = %candidate.span, "dropped duplicate match");
            candidate.release(memo);
            return;
        }
        self.matches.push_front(candidate);
    }

    /// Candidates for one region arrive consecutively, so comparing against
    /// the front of the set is enough. A newcomer ending strictly after the
    /// front evicts the whole run of same-start entries it supersedes, but
    /// coexists with fronts that start elsewhere; one that does not extend
    /// past the front is dropped, unless ambiguous outputs are allowed and
    /// no identical span-and-output entry is already retained.
    fn offer_longest(&mut self, memo: &mut PathMemo, candidate: CandidateMatch) {
        loop {
            let Some(front) = self.matches.front() else {
                self.matches.push_front(candidate);
                return;
            };
            if candidate.span.ends_after(&front.span) {
                if candidate.span.same_start(&front.span) {
                    // A same-start match ending earlier is superseded; with
                    // ambiguous outputs there can be a run of them.
                    let evicted = self
                        .matches
                        .pop_front()
                        .expect("front observed on an empty set");
                    trace!(span = %evicted.span, "evicted match superseded from the same start");
                    evicted.release(memo);
                    continue;
                }
                // Shorter matches from another start stay.
                self.matches.push_front(candidate);
                return;
            }
            if self.ambiguous == AmbiguousOutputPolicy::Allow {
                let duplicate = self.matches.iter().any(|kept| {
                    kept.span.same_span(&candidate.span) && kept.output == candidate.output
                });
                if duplicate {
                    trace!(span = %candidate.span, "dropped duplicate match");
                    candidate.release(memo);
                } else {
                    self.matches.push_front(candidate);
                }
            } else {
                trace!(span = %candidate.span, "dropped match not extending past the front");
                candidate.release(memo);
            }
            return;
        }
    }

    /// The whole set is scanned: the newcomer replaces the first retained
    /// match that swallows it and evicts any further ones, but loses
    /// immediately to any retained match it swallows itself.
    fn offer_shortest(&mut self, memo: &mut PathMemo, candidate: CandidateMatch) {
        let span = candidate.span;
        let output = candidate.output.clone();
        let mut pending = Some(candidate);
        let mut index = 0;
        while index < self.matches.len() {
            let kept = self
                .matches
                .get(index)
                .expect("index bounded by the set length");
            let ambiguous_pair = self.ambiguous == AmbiguousOutputPolicy::Allow
                && kept.span.same_span(&span)
                && kept.output != output;
            if ambiguous_pair {
                index += 1;
                continue;
            }
            // A retained match enclosing the newcomer is checked first, so
            // an equal-span newcomer overwrites the entry in place rather
            // than losing to it.
            if kept.span.contains(&span) {
                match pending.take() {
                    Some(winner) => {
                        let displaced = self.matches.replace(index, winner);
                        trace!(span = %displaced.span, "replaced match by a shorter one");
                        displaced.release(memo);
                        index += 1;
                    }
                    None => {
                        let evicted = self
                            .matches
                            .remove(index)
                            .expect("index bounded by the set length");
                        trace!(span = %evicted.span, "evicted match swallowing a shorter one");
                        evicted.release(memo);
                    }
                }
                continue;
            }
            if span.contains(&kept.span) {
                if let Some(lost) = pending.take() {
                    trace!(span = %lost.span, "dropped match swallowing a shorter one");
                    lost.release(memo);
                }
                return;
            }
            index += 1;
        }
        if let Some(candidate) = pending {
            self.matches.push_front(candidate);
        }
    }
}
