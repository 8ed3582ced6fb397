use serde::{Deserialize, Serialize};

/// Which of several overlapping matches survive selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchPolicy {
    /// Keep every distinct match.
    All,
    /// A match swallowed by a longer one is dropped.
    #[default]
    Longest,
    /// A match swallowing a shorter one is dropped.
    Shortest,
}

/// Whether two matches over the same span with different transduced outputs
/// may coexist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AmbiguousOutputPolicy {
    /// Distinct outputs over one span are all kept and all written.
    Allow,
    /// One match per span, whatever its output.
    #[default]
    Forbid,
}

/// Cap on the number of matches a whole search may emit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchLimit {
    #[default]
    Unbounded,
    AtMost(usize),
}

impl SearchLimit {
    /// True once `emitted` matches exhaust the cap.
    pub fn is_reached(&self, emitted: usize) -> bool {
        match self {
            SearchLimit::Unbounded => false,
            SearchLimit::AtMost(cap) => emitted >= *cap,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbounded_limit_is_never_reached() {
        assert!(!SearchLimit::Unbounded.is_reached(0));
        assert!(!SearchLimit::Unbounded.is_reached(usize::MAX));
    }

    #[test]
    fn bounded_limit_is_reached_at_the_cap() {
        let limit = SearchLimit::AtMost(3);
        assert!(!limit.is_reached(2));
        assert!(limit.is_reached(3));
        assert!(limit.is_reached(4));
    }

    #[test]
    fn defaults_match_the_usual_search_profile() {
        assert_eq!(MatchPolicy::default(), MatchPolicy::Longest);
        assert_eq!(AmbiguousOutputPolicy::default(), AmbiguousOutputPolicy::Forbid);
        assert_eq!(SearchLimit::default(), SearchLimit::Unbounded);
    }
}
