//! Match selection for text-automaton searches.
//!
//! A sentence search can discover many overlapping candidate matches; this
//! crate decides which of them survive. [`SearchContext`] accumulates the
//! candidates one sentence produces and applies a [`MatchPolicy`] (keep all,
//! keep the longest, keep the shortest) combined with an
//! [`AmbiguousOutputPolicy`] governing whether distinct transduced outputs
//! over the same span may coexist. [`SearchLimit`] caps how many matches the
//! whole search is allowed to emit.

mod context;
mod policy;
mod result_set;

pub use context::SearchContext;
pub use policy::{AmbiguousOutputPolicy, MatchPolicy, SearchLimit};
pub use result_set::ResultSet;
