use std::collections::VecDeque;

use memo::CandidateMatch;

/// The matches a sentence search has retained so far, most recent first.
///
/// Selection scans and evicts from the front, where the newest entries sit,
/// and flushing drains from the front too. The set never touches reference
/// counts itself: callers release every [`CandidateMatch`] they pop,
/// remove, or replace.
#[derive(Debug, Default)]
pub struct ResultSet {
    entries: VecDeque<CandidateMatch>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The most recently retained match.
    pub fn front(&self) -> Option<&CandidateMatch> {
        self.entries.front()
    }

    pub fn get(&self, index: usize) -> Option<&CandidateMatch> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CandidateMatch> {
        self.entries.iter()
    }

    pub fn push_front(&mut self, entry: CandidateMatch) {
        self.entries.push_front(entry);
    }

    pub fn pop_front(&mut self) -> Option<CandidateMatch> {
        self.entries.pop_front()
    }

    pub fn remove(&mut self, index: usize) -> Option<CandidateMatch> {
        self.entries.remove(index)
    }

    /// Swaps the entry at `index` for `entry`, returning the displaced one.
    pub fn replace(&mut self, index: usize, entry: CandidateMatch) -> CandidateMatch {
        std::mem::replace(&mut self.entries[index], entry)
    }
}
