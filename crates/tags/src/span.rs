use std::fmt;

use serde::{Deserialize, Serialize};

use crate::position::TextPosition;

/// The extent of a candidate match, start and end at all three granularities.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct MatchSpan {
    pub start: TextPosition,
    pub end: TextPosition,
}

impl MatchSpan {
    pub fn new(start: TextPosition, end: TextPosition) -> Self {
        Self { start, end }
    }

    /// True when `self` encloses `other`, non-strict at both ends: equal
    /// spans contain each other.
    pub fn contains(&self, other: &MatchSpan) -> bool {
        self.start <= other.start && self.end >= other.end
    }

    /// True when `self` ends strictly after `other` under the hierarchical
    /// position order.
    pub fn ends_after(&self, other: &MatchSpan) -> bool {
        self.end > other.end
    }

    pub fn same_start(&self, other: &MatchSpan) -> bool {
        self.start == other.start
    }

    pub fn same_end(&self, other: &MatchSpan) -> bool {
        self.end == other.end
    }

    pub fn same_span(&self, other: &MatchSpan) -> bool {
        self.same_start(other) && self.same_end(other)
    }
}

impl fmt::Display for MatchSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(start: (u32, u32, u32), end: (u32, u32, u32)) -> MatchSpan {
        MatchSpan::new(
            TextPosition::new(start.0, start.1, start.2),
            TextPosition::new(end.0, end.1, end.2),
        )
    }

    #[test]
    fn containment_needs_both_ends() {
        let outer = span((2, 0, 0), (5, 0, 0));
        assert!(outer.contains(&span((3, 0, 0), (4, 0, 0))));
        assert!(outer.contains(&span((2, 0, 0), (5, 0, 0))));
        // Overlap without inclusion is not containment.
        assert!(!outer.contains(&span((3, 0, 0), (6, 0, 0))));
        assert!(!outer.contains(&span((1, 0, 0), (4, 0, 0))));
    }

    #[test]
    fn containment_at_sub_token_granularity() {
        let outer = span((2, 0, 0), (2, 4, 0));
        let inner = span((2, 1, 0), (2, 3, 0));
        assert!(outer.contains(&inner));
        assert!(!inner.contains(&outer));
    }

    #[test]
    fn ends_after_is_strict() {
        let a = span((0, 0, 0), (5, 0, 0));
        let b = span((0, 0, 0), (5, 0, 0));
        assert!(!a.ends_after(&b));
        assert!(span((0, 0, 0), (5, 0, 1)).ends_after(&b));
    }
}
