use tracing::trace;

use crate::step::{PathStep, StepKey, TagRef};

/// Stable handle to a step in a [`PathMemo`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StepId(usize);

/// Boundary captured by [`StepTable::mark`] when the search enters a
/// sub-search scope (a subgraph call). [`PathMemo::release_prefix`] never
/// collects past it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableMark(usize);

/// Insertion-ordered record of the steps discovered for one sentence search.
///
/// The table is read most-recent-first: the conceptual front is the step
/// inserted last, which is also where dedup lookups start and where
/// collection on backtrack begins.
#[derive(Debug, Default)]
pub struct StepTable {
    order: Vec<StepId>,
}

impl StepTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Captures the current scope boundary.
    pub fn mark(&self) -> TableMark {
        TableMark(self.order.len())
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Steps in most-recent-first order.
    pub fn iter_recent(&self) -> impl Iterator<Item = StepId> + '_ {
        self.order.iter().rev().copied()
    }
}

/// Arena of reference-counted [`PathStep`]s shared across search branches.
///
/// All allocation, count mutation, and collection goes through this type so
/// the reachability invariant (a step is live iff its count is nonzero or it
/// still sits above every active scope mark) is enforced in one place.
#[derive(Debug, Default)]
pub struct PathMemo {
    slots: Vec<Option<PathStep>>,
    free: Vec<usize>,
    live: usize,
}

impl PathMemo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of steps currently allocated.
    pub fn live_steps(&self) -> usize {
        self.live
    }

    /// Records a discovered transition, merging with an existing step.
    ///
    /// The table is scanned from the front (newest first); the first step
    /// with an equal key absorbs `tag` into its tag set (a no-op when the
    /// tag is already present). Otherwise a fresh unreferenced step with a
    /// singleton tag set is appended to the table.
    pub fn insert(&mut self, table: &mut StepTable, key: StepKey, tag: TagRef) -> StepId {
        for id in table.iter_recent() {
            if self.step(id).key() == key {
                self.step_mut(id).tags_mut().insert(tag);
                return id;
            }
        }
        let id = self.alloc(PathStep::new(key, tag));
        table.order.push(id);
        id
    }

    /// Records one more live reference to `id`, e.g. when a search branch
    /// links the step into its active path.
    pub fn acquire(&mut self, id: StepId) {
        self.step_mut(id).incr();
    }

    /// Drops one live reference to `id`. Releasing a step that is not
    /// referenced is a refcount-corruption defect and panics.
    pub fn release(&mut self, id: StepId) {
        self.step_mut(id).decr();
    }

    /// Links `id` to the step that continues its path, acquiring the target.
    /// Relinking releases the previous target.
    pub fn link(&mut self, id: StepId, next: Option<StepId>) {
        if let Some(target) = next {
            self.acquire(target);
        }
        let previous = self.step_mut(id).set_next(next);
        if let Some(old) = previous {
            self.release(old);
        }
    }

    /// Borrows a step. Panics when the handle refers to a freed slot, which
    /// means a branch kept using a step it no longer references.
    pub fn step(&self, id: StepId) -> &PathStep {
        self.slots[id.0]
            .as_ref()
            .expect("path step read after it was freed")
    }

    /// Collects unreachable steps after a backtrack.
    ///
    /// Walks the table from the front (newest first), freeing every step
    /// whose count is zero; freeing a step releases the continuation it
    /// owns, so a whole abandoned suffix collapses in one call. The walk
    /// stops at the first step that is still referenced, or at `mark` — the
    /// scope boundary captured when the caller entered the sub-search —
    /// whichever comes first. Steps at or beyond the mark belong to an
    /// enclosing, still-active scope and are never collected here.
    pub fn release_prefix(&mut self, table: &mut StepTable, mark: TableMark) {
        let mut freed = 0usize;
        while table.order.len() > mark.0 {
            let id = *table
                .order
                .last()
                .expect("table shorter than its own scope mark");
            if self.step(id).ref_count() > 0 {
                break;
            }
            table.order.pop();
            self.free_unreferenced(id);
            freed += 1;
        }
        if freed > 0 {
            trace!(freed, remaining = table.len(), "collected unreachable path steps");
        }
    }

    fn alloc(&mut self, step: PathStep) -> StepId {
        self.live += 1;
        match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Some(step);
                StepId(slot)
            }
            None => {
                self.slots.push(Some(step));
                StepId(self.slots.len() - 1)
            }
        }
    }

    fn free_unreferenced(&mut self, id: StepId) {
        let step = self.slots[id.0]
            .take()
            .expect("path step freed twice");
        assert_eq!(
            step.ref_count(),
            0,
            "freed a path step that is still referenced by an active branch"
        );
        self.live -= 1;
        self.free.push(id.0);
        if let Some(next) = step.next() {
            self.release(next);
        }
    }

    fn step_mut(&mut self, id: StepId) -> &mut PathStep {
        self.slots[id.0]
            .as_mut()
            .expect("path step written after it was freed")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tags::TagIndex;

    fn key(source: u32, dest: u32, transition: u32) -> StepKey {
        StepKey::new(source, dest, transition, -1)
    }

    fn tag(n: u32) -> TagRef {
        TagRef::Tag(TagIndex(n))
    }

    #[test]
    fn insert_deduplicates_by_key_and_merges_tags() {
        let mut memo = PathMemo::new();
        let mut table = StepTable::new();

        let a = memo.insert(&mut table, key(0, 1, 7), tag(3));
        let b = memo.insert(&mut table, key(0, 1, 7), tag(1));
        let c = memo.insert(&mut table, key(0, 1, 7), tag(3));
        assert_eq!(a, b);
        assert_eq!(a, c);
        assert_eq!(table.len(), 1);
        assert_eq!(memo.live_steps(), 1);

        let tags: Vec<TagRef> = memo.step(a).tags().iter().collect();
        assert_eq!(tags, vec![tag(1), tag(3)]);

        // A different recursion marker is a different step.
        let other = memo.insert(&mut table, StepKey::new(0, 1, 7, 2), tag(3));
        assert_ne!(a, other);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn release_prefix_frees_only_unreferenced_steps() {
        let mut memo = PathMemo::new();
        let mut table = StepTable::new();
        let mark = table.mark();

        let first = memo.insert(&mut table, key(0, 1, 1), tag(0));
        let second = memo.insert(&mut table, key(1, 2, 2), tag(1));
        memo.link(second, Some(first));
        // An active branch still holds the newest step.
        memo.acquire(second);

        memo.release_prefix(&mut table, mark);
        assert_eq!(memo.live_steps(), 2);
        assert_eq!(table.len(), 2);

        // Once the branch lets go, both steps collapse: freeing `second`
        // releases the link it owns into `first`.
        memo.release(second);
        memo.release_prefix(&mut table, mark);
        assert_eq!(memo.live_steps(), 0);
        assert!(table.is_empty());
    }

    #[test]
    fn release_prefix_never_crosses_the_scope_mark() {
        let mut memo = PathMemo::new();
        let mut table = StepTable::new();

        let outer = memo.insert(&mut table, key(0, 1, 1), tag(0));
        let mark = table.mark();
        let inner = memo.insert(&mut table, key(1, 2, 2), tag(1));
        memo.link(inner, Some(outer));

        memo.release_prefix(&mut table, mark);
        // The sub-search step is gone; the enclosing scope's step survives
        // even though its count dropped back to zero.
        assert_eq!(memo.live_steps(), 1);
        assert_eq!(table.len(), 1);
        assert_eq!(memo.step(outer).ref_count(), 0);
    }

    #[test]
    fn release_prefix_stops_at_the_first_referenced_step() {
        let mut memo = PathMemo::new();
        let mut table = StepTable::new();
        let mark = table.mark();

        let oldest = memo.insert(&mut table, key(0, 1, 1), tag(0));
        let middle = memo.insert(&mut table, key(1, 2, 2), tag(1));
        let newest = memo.insert(&mut table, key(2, 3, 3), tag(2));
        memo.acquire(middle);

        memo.release_prefix(&mut table, mark);
        // `newest` is collectable, but the walk stops at `middle`; `oldest`
        // stays even though it is unreferenced.
        assert_eq!(memo.live_steps(), 2);
        assert_eq!(table.len(), 2);
        assert_eq!(memo.step(oldest).ref_count(), 0);
        let _ = newest;
    }

    #[test]
    fn freeing_a_chain_reuses_slots() {
        let mut memo = PathMemo::new();
        let mut table = StepTable::new();
        let mark = table.mark();

        for i in 0..4 {
            memo.insert(&mut table, key(i, i + 1, i), tag(i));
        }
        memo.release_prefix(&mut table, mark);
        assert_eq!(memo.live_steps(), 0);

        let reused = memo.insert(&mut table, key(9, 10, 9), tag(9));
        assert_eq!(memo.live_steps(), 1);
        assert!(memo.step(reused).tags().has_text_dependent());
    }

    #[test]
    #[should_panic(expected = "reference count is already zero")]
    fn releasing_a_dead_step_panics() {
        let mut memo = PathMemo::new();
        let mut table = StepTable::new();
        let id = memo.insert(&mut table, key(0, 1, 1), tag(0));
        memo.release(id);
    }
}
