use tags::{MatchSpan, SentenceTags, TagError, TextPosition};

use crate::arena::{PathMemo, StepId};
use crate::path::Path;
use crate::step::TagRef;

/// A finalized match, ready for selection.
///
/// Owns its transduced output, if any, and an accounted provenance
/// reference back to the head step of the path it came from. Whoever
/// discards a `CandidateMatch` must call [`CandidateMatch::release`] so the
/// step's reference count stays consistent.
#[derive(Debug, PartialEq, Eq)]
pub struct CandidateMatch {
    pub span: MatchSpan,
    pub output: Option<String>,
    pub provenance: Option<StepId>,
}

impl CandidateMatch {
    /// A match with no provenance, for callers that only need the span and
    /// output (and for tests).
    pub fn detached(span: MatchSpan, output: Option<String>) -> Self {
        Self {
            span,
            output,
            provenance: None,
        }
    }

    /// Drops the match, returning its provenance reference to the arena.
    pub fn release(self, memo: &mut PathMemo) {
        if let Some(step) = self.provenance {
            memo.release(step);
        }
    }
}

/// Turns a completed path into a [`CandidateMatch`].
///
/// The end offset is the hierarchical maximum over the concrete tags of the
/// first text-dependent step (the chain is most-recent-first, so that step
/// closes the match); the start offset is the hierarchical minimum over the
/// concrete tags of the last text-dependent step. Token components are
/// shifted by the sentence's base so matches report document-absolute
/// positions. Returns `Ok(None)` for a path with no text extent: such paths
/// produce no match at all.
pub fn finalize(
    memo: &mut PathMemo,
    head: StepId,
    sentence: &SentenceTags,
    output: Option<&str>,
) -> Result<Option<CandidateMatch>, TagError> {
    let path = Path::new(memo, head);
    let (first, last) = match (
        path.find_first_text_dependent(),
        path.find_last_text_dependent(),
    ) {
        (Some(first), Some(last)) => (first, last),
        _ => return Ok(None),
    };

    let end = match extreme_position(memo, first, sentence, Extreme::End)? {
        Some(position) => position,
        None => return Ok(None),
    };
    let start = match extreme_position(memo, last, sentence, Extreme::Start)? {
        Some(position) => position,
        None => return Ok(None),
    };

    let base = sentence.token_base();
    let span = MatchSpan::new(start.offset_tokens(base), end.offset_tokens(base));
    memo.acquire(head);
    Ok(Some(CandidateMatch {
        span,
        output: output.map(str::to_string),
        provenance: Some(head),
    }))
}

#[derive(Clone, Copy)]
enum Extreme {
    Start,
    End,
}

/// Best boundary over the concrete tags of one step: hierarchical minimum
/// of the tag starts, or hierarchical maximum of the tag ends.
fn extreme_position(
    memo: &PathMemo,
    step: StepId,
    sentence: &SentenceTags,
    which: Extreme,
) -> Result<Option<TextPosition>, TagError> {
    let mut best: Option<TextPosition> = None;
    for tag in memo.step(step).tags().iter() {
        let TagRef::Tag(idx) = tag else {
            continue;
        };
        let tag_span = sentence.get(idx)?;
        let candidate = match which {
            Extreme::Start => tag_span.start,
            Extreme::End => tag_span.end,
        };
        best = Some(match best {
            None => candidate,
            Some(current) => match which {
                Extreme::Start => current.min(candidate),
                Extreme::End => current.max(candidate),
            },
        });
    }
    Ok(best)
}
