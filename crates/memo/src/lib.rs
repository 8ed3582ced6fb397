//! tfst-locate path memoization layer.
//!
//! The driving search walks a grammar transducer in lock-step with a
//! sentence automaton, backtracking through a nondeterministic state space.
//! Every transition it takes becomes a [`PathStep`] in a [`PathMemo`] arena:
//! steps are deduplicated per `(source, dest, transition, marker)` key so
//! that competing tokenizations of the same stretch of text merge into one
//! step carrying several tag indices, and they are reference counted so that
//! suffixes shared between search branches are freed exactly once, when the
//! last branch backtracks away from them.
//!
//! ## Lifetime discipline
//!
//! - A step is reachable iff its count is nonzero; counts are mutated only
//!   through the [`PathMemo`] API.
//! - Each step owns one reference to the step that continues its path;
//!   freeing the step releases that reference.
//! - [`PathMemo::release_prefix`] collects unreachable steps on backtrack,
//!   newest first, and never crosses the caller's scope marker.
//!
//! Violating the discipline (releasing a dead step, reading a freed slot) is
//! a defect in the driving search and panics rather than corrupting the
//! remaining branches.
//!
//! Completed paths leave the arena through [`finalize`], which turns the
//! chain reachable from a head step into a [`CandidateMatch`] with
//! document-absolute offsets, or rejects it when no step touches the text.

mod arena;
mod builder;
mod path;
mod step;

pub use crate::arena::{PathMemo, StepId, StepTable, TableMark};
pub use crate::builder::{finalize, CandidateMatch};
pub use crate::path::Path;
pub use crate::step::{PathStep, StepKey, TagRef, TagSet};
