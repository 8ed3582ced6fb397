use std::io::{self, Write};

use tracing::{debug, trace};

use memo::{CandidateMatch, PathMemo};
use selector::{AmbiguousOutputPolicy, SearchContext};

use crate::error::ConcordError;

/// What one flush did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlushOutcome {
    /// Output lines written.
    pub written: usize,
    /// True when the search limit cut the flush short; the remaining
    /// matches were discarded.
    pub truncated: bool,
}

/// One concordance index line: start and end offsets at token, character
/// and letter granularity, then the transduced output if there is one.
pub fn write_match_line<W: Write>(out: &mut W, entry: &CandidateMatch) -> io::Result<()> {
    match &entry.output {
        Some(text) => writeln!(out, "{} {} {}", entry.span.start, entry.span.end, text),
        None => writeln!(out, "{} {}", entry.span.start, entry.span.end),
    }
}

/// Drains the context's surviving matches to `out`, front entry first.
///
/// Each written match releases its provenance reference and bumps the
/// emission counters: `outputs_emitted` for every line, `matches_emitted`
/// except when ambiguous outputs are allowed and the token span repeats the
/// previously written one. The moment the search limit is reached,
/// everything still unwritten is discarded, ambiguous repeats included. A
/// write error likewise discards the rest before surfacing.
pub fn flush<W: Write>(
    ctx: &mut SearchContext,
    memo: &mut PathMemo,
    out: &mut W,
) -> Result<FlushOutcome, ConcordError> {
    let mut written = 0usize;
    let mut truncated = false;
    while let Some(entry) = ctx.matches.pop_front() {
        if truncated || ctx.limit.is_reached(ctx.matches_emitted) {
            if !truncated {
                trace!(span = %entry.span, "search limit reached, discarding matches");
                truncated = true;
            }
            entry.release(memo);
            continue;
        }
        if let Err(err) = write_match_line(out, &entry) {
            entry.release(memo);
            while let Some(rest) = ctx.matches.pop_front() {
                rest.release(memo);
            }
            return Err(err.into());
        }
        written += 1;
        ctx.outputs_emitted += 1;
        let token_span = (entry.span.start.token, entry.span.end.token);
        let repeats_last = ctx.ambiguous == AmbiguousOutputPolicy::Allow
            && ctx.last_printed == Some(token_span);
        if !repeats_last {
            ctx.matches_emitted += 1;
        }
        ctx.last_printed = Some(token_span);
        entry.release(memo);
    }
    debug!(written, truncated, "flushed sentence matches");
    Ok(FlushOutcome { written, truncated })
}
