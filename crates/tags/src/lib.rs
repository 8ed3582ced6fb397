//! tfst-locate position layer.
//!
//! The text being searched is a sentence automaton: a finite-state
//! representation of one sentence's competing tokenizations. Because the
//! segmentation itself is ambiguous, a boundary cannot always be reported at
//! the token level alone, so every position in this crate carries three
//! granularities: token, character within the token, and letter within the
//! character (the finest sub-token unit, relevant for scripts where one
//! character decomposes into several letters).
//!
//! ## What lives here
//!
//! - [`TextPosition`]: the `(token, character, letter)` triple with one
//!   hierarchical comparison shared by every downstream stage
//! - [`MatchSpan`]: a start/end pair with the containment and ordering tests
//!   the selection policies are built on
//! - [`TagSpan`] and [`SentenceTags`]: the per-sentence tag table, the only
//!   interface this engine consumes from the sentence automaton
//!
//! ## Invariants worth knowing
//!
//! - Comparison is token-dominant: a later token always wins; character and
//!   letter only break ties within the same token.
//! - Tag tables report positions relative to the sentence; the sentence's
//!   base token offset turns them into document-absolute positions.

mod error;
mod position;
mod span;
mod table;

pub use crate::error::TagError;
pub use crate::position::TextPosition;
pub use crate::span::MatchSpan;
pub use crate::table::{SentenceTags, TagIndex, TagSpan};
