//! Dedup and selection over canonicalized candidates.
//!
//! One mutable [`SelectionState`] is threaded through a single pass per
//! request; it is never shared across requests.

use std::collections::{HashMap, HashSet};

use verdure_core::VegType;

use crate::engine::CanonicalEntry;

/// Why a candidate was not accepted. Recorded for diagnostics only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    EmptyName,
    NonEnglishName,
    UnknownVegetable,
    CategoryMismatch,
    KeywordOverlap,
    DuplicateName,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reason = match self {
            RejectReason::EmptyName => "empty name",
            RejectReason::NonEnglishName => "name contains non-English characters",
            RejectReason::UnknownVegetable => "no known vegetable root word",
            RejectReason::CategoryMismatch => "category is not a vegetable",
            RejectReason::KeywordOverlap => "keyword overlap with an accepted item",
            RejectReason::DuplicateName => "duplicate canonical name",
        };
        f.write_str(reason)
    }
}

#[derive(Debug, Clone)]
pub struct Rejection {
    pub name: String,
    pub reason: RejectReason,
}

/// Mutable accumulator for one curation run.
///
/// Invariant: every accepted entry had an unseen canonical key AND fully
/// unseen keywords at the moment it was accepted; all three seen-sets are
/// updated together on acceptance.
#[derive(Debug, Default)]
pub struct SelectionState {
    seen_keys: HashSet<String>,
    seen_keywords: HashSet<String>,
    seen_types: HashSet<VegType>,
    pub accepted: Vec<CanonicalEntry>,
    pub rejected: Vec<Rejection>,
}

impl SelectionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Buckets that have produced at least one accepted entry so far.
    #[must_use]
    pub fn seen_types(&self) -> &HashSet<VegType> {
        &self.seen_types
    }

    /// Applies the dedup policy to one candidate.
    ///
    /// Keyword overlap is checked before the exact-key check — the broader
    /// signal wins the reject reason when both would fire. Returns `true`
    /// when the entry was accepted.
    pub fn try_accept(&mut self, entry: CanonicalEntry) -> bool {
        if entry
            .keywords
            .iter()
            .any(|keyword| self.seen_keywords.contains(keyword))
        {
            self.rejected.push(Rejection {
                name: entry.name,
                reason: RejectReason::KeywordOverlap,
            });
            return false;
        }

        if self.seen_keys.contains(&entry.canonical_key) {
            self.rejected.push(Rejection {
                name: entry.name,
                reason: RejectReason::DuplicateName,
            });
            return false;
        }

        self.seen_keys.insert(entry.canonical_key.clone());
        self.seen_keywords.extend(entry.keywords.iter().cloned());
        self.seen_types.insert(entry.veg_type);
        self.accepted.push(entry);
        true
    }
}

/// Straight selection pass: try each candidate in input order until `limit`
/// entries are accepted. The caller shuffles beforehand, so input order is
/// non-deterministic by design.
pub fn select(candidates: Vec<CanonicalEntry>, limit: usize, state: &mut SelectionState) {
    for entry in candidates {
        if state.accepted.len() >= limit {
            break;
        }
        state.try_accept(entry);
    }
}

/// Type-grouped selection pass used by the grocery-items path.
///
/// Candidates are grouped by vegetable bucket (group order follows first
/// appearance in the shuffled input); each group contributes at most one
/// accepted entry in the single pass. This biases toward type diversity but
/// does not guarantee it — a later group can still lose all its candidates
/// to keyword overlap.
pub fn select_grouped(candidates: Vec<CanonicalEntry>, limit: usize, state: &mut SelectionState) {
    let mut group_order: Vec<VegType> = Vec::new();
    let mut groups: HashMap<VegType, Vec<CanonicalEntry>> = HashMap::new();
    for entry in candidates {
        if !groups.contains_key(&entry.veg_type) {
            group_order.push(entry.veg_type);
        }
        groups.entry(entry.veg_type).or_default().push(entry);
    }

    for veg_type in group_order {
        if state.accepted.len() >= limit {
            break;
        }
        let Some(group) = groups.remove(&veg_type) else {
            continue;
        };
        for entry in group {
            if state.try_accept(entry) {
                break;
            }
        }
    }
}

/// Backfills from a fallback pool with the same dedup policy until `limit`
/// entries are accepted or the pool is exhausted.
///
/// The result can still be empty when every pool entry collides with
/// already-seen keywords; callers must treat an empty accepted list as a
/// hard failure.
pub fn pad(state: &mut SelectionState, fallback: Vec<CanonicalEntry>, limit: usize) {
    select(fallback, limit, state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::CanonicalEntry;
    use crate::tables::GROCERY_STOPWORD_PHRASE;

    fn entry(name: &str) -> CanonicalEntry {
        CanonicalEntry::from_name(name, GROCERY_STOPWORD_PHRASE)
    }

    #[test]
    fn duplicate_canonical_key_is_rejected() {
        let mut state = SelectionState::new();
        assert!(state.try_accept(entry("Tomatoes")));
        assert!(!state.try_accept(entry("Tomaten Passata")));
        assert_eq!(state.accepted.len(), 1);
        assert_eq!(state.rejected.len(), 1);
    }

    #[test]
    fn keyword_overlap_wins_the_reject_reason() {
        let mut state = SelectionState::new();
        assert!(state.try_accept(entry("Tomatoes")));
        // Same canonical key AND overlapping keyword; the keyword check runs first.
        assert!(!state.try_accept(entry("Tomato Puree")));
        assert_eq!(state.rejected[0].reason, RejectReason::KeywordOverlap);
    }

    #[test]
    fn select_never_exceeds_limit() {
        let candidates = vec![
            entry("Carrot"),
            entry("Leek"),
            entry("Spinach"),
            entry("Kale"),
            entry("Celery"),
        ];
        let mut state = SelectionState::new();
        select(candidates, 3, &mut state);
        assert_eq!(state.accepted.len(), 3);
    }

    #[test]
    fn accepted_keys_pairwise_distinct_and_keywords_disjoint() {
        let candidates = vec![
            entry("Tomatoes"),
            entry("Roma Tomato Paste"),
            entry("Fresh Carrots"),
            entry("Carrot Sticks"),
            entry("Garlic and Onion Mix"),
            entry("Spring Onion"),
            entry("Baby Spinach"),
        ];
        let mut state = SelectionState::new();
        select(candidates, 20, &mut state);

        let keys: Vec<&String> = state.accepted.iter().map(|e| &e.canonical_key).collect();
        for (i, a) in keys.iter().enumerate() {
            for b in &keys[i + 1..] {
                assert_ne!(a, b, "duplicate canonical key accepted");
            }
        }
        let mut seen = HashSet::new();
        for accepted in &state.accepted {
            for keyword in &accepted.keywords {
                assert!(seen.insert(keyword.clone()), "keyword {keyword:?} overlaps");
            }
        }
    }

    #[test]
    fn grouped_select_takes_one_entry_per_bucket() {
        // Carrot and radish are both roots; only one survives the pass.
        let candidates = vec![entry("Carrot"), entry("Radish"), entry("Kale")];
        let mut state = SelectionState::new();
        select_grouped(candidates, 20, &mut state);
        assert_eq!(state.accepted.len(), 2);
        assert_eq!(state.seen_types().len(), 2);
    }

    #[test]
    fn grouped_select_stops_at_first_accept_per_bucket() {
        // All three are fruit vegetables; the first accept closes the bucket
        // and the cucumber is never tried.
        let candidates = vec![entry("Tomatoes"), entry("Tomato Jar"), entry("Cucumber")];
        let mut state = SelectionState::new();
        select_grouped(candidates, 20, &mut state);
        assert_eq!(state.accepted.len(), 1);
        assert_eq!(state.accepted[0].canonical_key, "tomato");
        assert!(state.rejected.is_empty());
    }

    #[test]
    fn grouped_select_retries_within_a_bucket_after_rejection() {
        let mut state = SelectionState::new();
        state.try_accept(entry("Tomatoes"));
        // Both candidates are fruit vegetables: the puree collides on the
        // tomato keyword, so the cucumber fills the bucket's slot.
        let candidates = vec![entry("Tomato Puree"), entry("Cucumber")];
        select_grouped(candidates, 20, &mut state);
        assert_eq!(state.accepted.len(), 2);
        assert_eq!(state.accepted[1].canonical_key, "cucumber");
        assert_eq!(state.rejected[0].reason, RejectReason::KeywordOverlap);
    }

    #[test]
    fn pad_stops_at_limit() {
        let mut state = SelectionState::new();
        state.try_accept(entry("Carrot"));
        let pool = vec![entry("Leek"), entry("Kale"), entry("Celery")];
        pad(&mut state, pool, 2);
        assert_eq!(state.accepted.len(), 2);
    }

    #[test]
    fn pad_dedups_against_live_accepts() {
        let mut state = SelectionState::new();
        state.try_accept(entry("Carrot"));
        let pool = vec![entry("Carrot"), entry("Leek")];
        pad(&mut state, pool, 10);
        assert_eq!(state.accepted.len(), 2);
        assert!(state
            .rejected
            .iter()
            .any(|r| r.reason == RejectReason::KeywordOverlap));
    }
}
