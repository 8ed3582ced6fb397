use serde::{Deserialize, Serialize};

use crate::error::TagError;
use crate::position::TextPosition;

/// Index of a tag in a sentence's tag table.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
pub struct TagIndex(pub u32);

/// The text extent of one tag of the sentence automaton, sentence-relative.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TagSpan {
    pub start: TextPosition,
    pub end: TextPosition,
}

impl TagSpan {
    pub fn new(start: TextPosition, end: TextPosition) -> Self {
        Self { start, end }
    }
}

/// The per-sentence tag table, plus the sentence's base token offset.
///
/// This is the whole interface the engine consumes from the sentence
/// automaton: resolve a tag index to its span, and shift sentence-relative
/// token positions into document-absolute ones. Documents are processed
/// sentence by sentence with an accumulating token base.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SentenceTags {
    spans: Vec<TagSpan>,
    token_base: u32,
}

impl SentenceTags {
    pub fn new(token_base: u32) -> Self {
        Self {
            spans: Vec::new(),
            token_base,
        }
    }

    pub fn with_spans(token_base: u32, spans: Vec<TagSpan>) -> Self {
        Self { spans, token_base }
    }

    /// Appends a tag and returns its index.
    pub fn push(&mut self, tag: TagSpan) -> TagIndex {
        let idx = TagIndex(self.spans.len() as u32);
        self.spans.push(tag);
        idx
    }

    /// Resolves a tag index. An index outside the table indicates a corrupt
    /// path delivered by the driving search and is surfaced as an error.
    pub fn get(&self, idx: TagIndex) -> Result<&TagSpan, TagError> {
        self.spans
            .get(idx.0 as usize)
            .ok_or(TagError::UnknownTag(idx.0))
    }

    /// The sentence's first token index within the whole document.
    pub fn token_base(&self) -> u32 {
        self.token_base
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}
