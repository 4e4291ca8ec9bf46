//! The produce curation engine: one parameterized pipeline behind both the
//! grocery-items and daily-offers endpoints.
//!
//! Control flow per run:
//! raw candidates → filter → canonicalize (normalize + classify + keywords)
//! → shuffle → select (optionally grouped by bucket) → pad from the fallback
//! pool → shuffle accepted → return.
//!
//! The engine is synchronous and request-local. Fetching candidates and
//! enriching accepted entries with images/prices are the caller's job.

use std::collections::BTreeSet;

use rand::seq::SliceRandom;
use rand::Rng;
use verdure_core::VegType;

use crate::classify::classify;
use crate::filter;
use crate::keywords::extract_keywords;
use crate::normalize::normalize;
use crate::select::{self, Rejection, SelectionState};
use crate::tables::{
    dietary_tags, GROCERY_FALLBACK_POOL, GROCERY_STOPWORD_PHRASE, OFFERS_FALLBACK_POOL,
    OFFERS_STOPWORD_PHRASE,
};

/// A raw candidate name with its source metadata, as fetched from the food
/// database. No identity beyond the string value.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub name: String,
    pub category: Option<String>,
}

impl Candidate {
    #[must_use]
    pub fn new(name: impl Into<String>, category: Option<String>) -> Self {
        Self {
            name: name.into(),
            category,
        }
    }
}

/// A candidate after canonicalization, ready for selection.
#[derive(Debug, Clone)]
pub struct CanonicalEntry {
    /// Original display string, preserved for output.
    pub name: String,
    /// Normalized lowercase identity used for exact-duplicate detection.
    pub canonical_key: String,
    pub veg_type: VegType,
    /// Canonical tokens mentioned by the raw name; a broader duplicate
    /// signal than the key.
    pub keywords: BTreeSet<String>,
    pub tags: Vec<String>,
}

impl CanonicalEntry {
    /// Canonicalizes a raw name under the given stopword phrase.
    #[must_use]
    pub fn from_name(name: &str, stopword_phrase: &str) -> Self {
        let canonical_key = normalize(name, stopword_phrase);
        let veg_type = classify(&canonical_key);
        Self {
            name: name.to_string(),
            canonical_key,
            veg_type,
            keywords: extract_keywords(name),
            tags: dietary_tags(veg_type),
        }
    }
}

/// Per-endpoint pipeline parameters.
///
/// The two stopword phrases differ slightly (the offers phrase appends
/// "boiled raw"); the drift is preserved per endpoint instead of unified
/// because the original intent is unclear.
#[derive(Debug, Clone)]
pub struct CurationProfile {
    pub limit: usize,
    pub stopword_phrase: &'static str,
    /// Group candidates by vegetable bucket and take at most one accepted
    /// entry per bucket per pass (grocery-items behavior).
    pub group_by_type: bool,
    /// Require the source category to mention "vegetable" (grocery-items
    /// behavior).
    pub require_vegetable_category: bool,
    pub fallback_pool: &'static [&'static str],
}

impl CurationProfile {
    /// Profile behind `/grocery-items`: 20 items, type-grouped selection,
    /// category-gated input.
    #[must_use]
    pub fn grocery_items() -> Self {
        Self {
            limit: 20,
            stopword_phrase: GROCERY_STOPWORD_PHRASE,
            group_by_type: true,
            require_vegetable_category: true,
            fallback_pool: &GROCERY_FALLBACK_POOL,
        }
    }

    /// Profile behind `/daily-offers`: 10 offers, straight selection, no
    /// category gate.
    #[must_use]
    pub fn daily_offers() -> Self {
        Self {
            limit: 10,
            stopword_phrase: OFFERS_STOPWORD_PHRASE,
            group_by_type: false,
            require_vegetable_category: false,
            fallback_pool: &OFFERS_FALLBACK_POOL,
        }
    }
}

/// Runs the full curation pipeline over one batch of raw candidates.
///
/// Safe to call with an empty batch: the result is then drawn entirely from
/// the fallback pool. The returned state carries both the accepted entries
/// (shuffled) and every rejection with its reason.
pub fn curate<R: Rng + ?Sized>(
    profile: &CurationProfile,
    candidates: Vec<Candidate>,
    rng: &mut R,
) -> SelectionState {
    let mut state = SelectionState::new();

    let mut entries: Vec<CanonicalEntry> = Vec::new();
    for candidate in candidates {
        match filter::check(&candidate.name, candidate.category.as_deref(), profile) {
            Ok(()) => entries.push(CanonicalEntry::from_name(
                &candidate.name,
                profile.stopword_phrase,
            )),
            Err(reason) => state.rejected.push(Rejection {
                name: candidate.name,
                reason,
            }),
        }
    }

    entries.shuffle(rng);

    if profile.group_by_type {
        select::select_grouped(entries, profile.limit, &mut state);
    } else {
        select::select(entries, profile.limit, &mut state);
    }

    if state.accepted.len() < profile.limit {
        let mut pool: Vec<CanonicalEntry> = profile
            .fallback_pool
            .iter()
            .map(|name| CanonicalEntry::from_name(name, profile.stopword_phrase))
            .collect();
        pool.shuffle(rng);
        select::pad(&mut state, pool, profile.limit);
    }

    state.accepted.shuffle(rng);
    state
}
