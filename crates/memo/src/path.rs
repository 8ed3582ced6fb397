use crate::arena::{PathMemo, StepId};
use crate::step::PathStep;

/// A completed candidate path: the chain of steps reachable from a head
/// step through the continuation links, most recent first. The head is the
/// last transition the search took, so the chain reads from the end of the
/// match back to its start.
///
/// A `Path` borrows the arena; it is a view, not an owner.
#[derive(Debug, Clone, Copy)]
pub struct Path<'a> {
    memo: &'a PathMemo,
    head: StepId,
}

impl<'a> Path<'a> {
    pub fn new(memo: &'a PathMemo, head: StepId) -> Self {
        Self { memo, head }
    }

    pub fn head(&self) -> StepId {
        self.head
    }

    /// Walks the chain from the head toward the start of the match.
    pub fn steps(&self) -> impl Iterator<Item = (StepId, &'a PathStep)> + 'a {
        let memo = self.memo;
        let mut cursor = Some(self.head);
        std::iter::from_fn(move || {
            let id = cursor?;
            let step = memo.step(id);
            cursor = step.next();
            Some((id, step))
        })
    }

    /// The first step, scanning from the head, whose tag set touches the
    /// text. Since the chain is reversed, this step carries the match's
    /// *end* offsets. `None` when the whole path is text independent.
    pub fn find_first_text_dependent(&self) -> Option<StepId> {
        self.steps()
            .find(|(_, step)| step.tags().has_text_dependent())
            .map(|(id, _)| id)
    }

    /// The last text-dependent step of the chain, which carries the match's
    /// *start* offsets. `None` when the whole path is text independent.
    pub fn find_last_text_dependent(&self) -> Option<StepId> {
        self.steps()
            .filter(|(_, step)| step.tags().has_text_dependent())
            .last()
            .map(|(id, _)| id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::StepTable;
    use crate::step::{StepKey, TagRef};
    use tags::TagIndex;

    fn chain(memo: &mut PathMemo, table: &mut StepTable, tags: &[TagRef]) -> StepId {
        // Builds a path whose head corresponds to the *last* slice element.
        let mut previous: Option<StepId> = None;
        for (i, &tag) in tags.iter().enumerate() {
            let id = memo.insert(table, StepKey::new(i as u32, i as u32 + 1, i as u32, -1), tag);
            memo.link(id, previous);
            previous = Some(id);
        }
        previous.expect("at least one step")
    }

    #[test]
    fn first_and_last_text_dependent_bracket_the_match() {
        let mut memo = PathMemo::new();
        let mut table = StepTable::new();
        // Discovery order: start of match first. The head ends up on the
        // trailing Independent step.
        let head = chain(
            &mut memo,
            &mut table,
            &[
                TagRef::Independent,
                TagRef::Tag(TagIndex(0)),
                TagRef::Tag(TagIndex(1)),
                TagRef::Independent,
            ],
        );

        let path = Path::new(&memo, head);
        let first = path.find_first_text_dependent().expect("has text extent");
        let last = path.find_last_text_dependent().expect("has text extent");
        assert_ne!(first, last);
        assert_eq!(
            memo.step(first).tags().iter().collect::<Vec<_>>(),
            vec![TagRef::Tag(TagIndex(1))]
        );
        assert_eq!(
            memo.step(last).tags().iter().collect::<Vec<_>>(),
            vec![TagRef::Tag(TagIndex(0))]
        );
    }

    #[test]
    fn fully_independent_path_has_no_text_extent() {
        let mut memo = PathMemo::new();
        let mut table = StepTable::new();
        let head = chain(
            &mut memo,
            &mut table,
            &[TagRef::Independent, TagRef::Independent],
        );

        let path = Path::new(&memo, head);
        assert!(path.find_first_text_dependent().is_none());
        assert!(path.find_last_text_dependent().is_none());
    }
}
