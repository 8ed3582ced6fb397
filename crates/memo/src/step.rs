use serde::{Deserialize, Serialize};

use tags::TagIndex;

use crate::arena::StepId;

/// Identity of a path step: one transition of the sentence automaton taken
/// under one grammar transition.
///
/// `marker` distinguishes re-entries of the same transition at different
/// recursion depths of the grammar (`-1` when not inside such a recursion);
/// two steps that differ only in their tag index are the *same* step over
/// competing tokenizations and merge their tag sets.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct StepKey {
    pub source: u32,
    pub dest: u32,
    pub transition: u32,
    pub marker: i32,
}

impl StepKey {
    pub fn new(source: u32, dest: u32, transition: u32, marker: i32) -> Self {
        Self {
            source,
            dest,
            transition,
            marker,
        }
    }
}

/// One entry of a step's tag-index set: either a concrete tag of the
/// sentence automaton, or the sentinel for a control transition with no text
/// extent.
///
/// The derived order puts `Independent` first, so sorted tag sets keep the
/// sentinel at the front.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TagRef {
    Independent,
    Tag(TagIndex),
}

impl TagRef {
    pub fn is_text_dependent(&self) -> bool {
        matches!(self, TagRef::Tag(_))
    }
}

/// An ascending, deduplicated set of tag references.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TagSet(Vec<TagRef>);

impl TagSet {
    pub fn singleton(tag: TagRef) -> Self {
        Self(vec![tag])
    }

    /// Inserts a tag, keeping the set sorted; inserting a present tag is a
    /// no-op.
    pub fn insert(&mut self, tag: TagRef) {
        if let Err(at) = self.0.binary_search(&tag) {
            self.0.insert(at, tag);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = TagRef> + '_ {
        self.0.iter().copied()
    }

    /// True when at least one entry is a concrete text tag.
    pub fn has_text_dependent(&self) -> bool {
        self.0.iter().any(TagRef::is_text_dependent)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One deduplicated transition of the sentence automaton, as discovered by
/// the search. Owned by the [`PathMemo`](crate::PathMemo) arena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathStep {
    key: StepKey,
    tags: TagSet,
    next: Option<StepId>,
    pointed_by: u32,
}

impl PathStep {
    pub(crate) fn new(key: StepKey, tag: TagRef) -> Self {
        Self {
            key,
            tags: TagSet::singleton(tag),
            next: None,
            pointed_by: 0,
        }
    }

    pub fn key(&self) -> StepKey {
        self.key
    }

    pub fn tags(&self) -> &TagSet {
        &self.tags
    }

    /// The step that continues this path, if any. The link owns one
    /// reference to its target.
    pub fn next(&self) -> Option<StepId> {
        self.next
    }

    pub fn ref_count(&self) -> u32 {
        self.pointed_by
    }

    pub(crate) fn tags_mut(&mut self) -> &mut TagSet {
        &mut self.tags
    }

    pub(crate) fn set_next(&mut self, next: Option<StepId>) -> Option<StepId> {
        std::mem::replace(&mut self.next, next)
    }

    pub(crate) fn incr(&mut self) {
        self.pointed_by += 1;
    }

    pub(crate) fn decr(&mut self) {
        assert!(
            self.pointed_by > 0,
            "released a path step whose reference count is already zero"
        );
        self.pointed_by -= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_set_stays_sorted_and_deduplicated() {
        let mut set = TagSet::singleton(TagRef::Tag(TagIndex(4)));
        set.insert(TagRef::Tag(TagIndex(1)));
        set.insert(TagRef::Independent);
        set.insert(TagRef::Tag(TagIndex(4)));
        set.insert(TagRef::Tag(TagIndex(2)));

        let collected: Vec<TagRef> = set.iter().collect();
        assert_eq!(
            collected,
            vec![
                TagRef::Independent,
                TagRef::Tag(TagIndex(1)),
                TagRef::Tag(TagIndex(2)),
                TagRef::Tag(TagIndex(4)),
            ]
        );
    }

    #[test]
    fn text_dependence_ignores_the_sentinel() {
        let mut set = TagSet::singleton(TagRef::Independent);
        assert!(!set.has_text_dependent());
        set.insert(TagRef::Tag(TagIndex(0)));
        assert!(set.has_text_dependent());
    }
}
