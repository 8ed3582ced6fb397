//! Concordance output for text-automaton searches.
//!
//! Once a sentence's surviving matches are settled, [`flush`] drains them to
//! an output sink front entry first, one index line per match, honoring the
//! document-wide search limit and the ambiguous-output accounting: several
//! outputs over one token span count as one match but several output lines.

mod error;
mod writer;

pub use error::ConcordError;
pub use writer::{flush, write_match_line, FlushOutcome};
