//! Candidate-name admission gate.
//!
//! A pure predicate: no side effects, rejections are reported back to the
//! caller as reasons for diagnostics.

use std::sync::LazyLock;

use regex::Regex;

use crate::engine::CurationProfile;
use crate::normalize::normalize;
use crate::select::RejectReason;
use crate::tables::KNOWN_VEGETABLES;

// Letters, whitespace, and hyphens only — apostrophes are stripped before
// the check. Anything else fails the "looks like an English phrase" gate.
static ENGLISH_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z\s-]+$").expect("valid regex"));

/// Full admission check with a reject reason for diagnostics.
///
/// Checks run in order: empty name, character gate, known-vegetable gate
/// (on the normalized form), and — only when the profile demands it — the
/// source-category gate.
///
/// # Errors
///
/// Returns the first [`RejectReason`] that disqualifies the candidate.
pub fn check(
    raw_name: &str,
    category: Option<&str>,
    profile: &CurationProfile,
) -> Result<(), RejectReason> {
    if raw_name.trim().is_empty() {
        return Err(RejectReason::EmptyName);
    }

    let without_apostrophes = raw_name.replace('\'', "");
    let collapsed = without_apostrophes.replace("  ", " ");
    if !ENGLISH_NAME_RE.is_match(collapsed.trim()) {
        return Err(RejectReason::NonEnglishName);
    }

    let canonical_key = normalize(raw_name, profile.stopword_phrase);
    if !KNOWN_VEGETABLES
        .iter()
        .any(|root| canonical_key.contains(root))
    {
        return Err(RejectReason::UnknownVegetable);
    }

    if profile.require_vegetable_category {
        let is_vegetable = category
            .is_some_and(|c| c.to_lowercase().contains("vegetable"));
        if !is_vegetable {
            return Err(RejectReason::CategoryMismatch);
        }
    }

    Ok(())
}

/// Pure boolean form of [`check`].
#[must_use]
pub fn is_acceptable(raw_name: &str, category: Option<&str>, profile: &CurationProfile) -> bool {
    check(raw_name, category, profile).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::CurationProfile;

    fn grocery() -> CurationProfile {
        CurationProfile::grocery_items()
    }

    fn offers() -> CurationProfile {
        CurationProfile::daily_offers()
    }

    #[test]
    fn accepts_plain_vegetable_names_with_category() {
        let profile = grocery();
        for name in ["Tomatoes", "Roma Tomato Paste", "Fresh Carrots"] {
            assert!(
                is_acceptable(name, Some("vegetable"), &profile),
                "{name:?} should be accepted"
            );
        }
    }

    #[test]
    fn rejects_empty_and_whitespace_names() {
        assert_eq!(check("", None, &offers()), Err(RejectReason::EmptyName));
        assert_eq!(check("   ", None, &offers()), Err(RejectReason::EmptyName));
    }

    #[test]
    fn rejects_non_english_characters_before_normalization() {
        assert_eq!(
            check("Tomate™ Bio", Some("vegetable"), &grocery()),
            Err(RejectReason::NonEnglishName)
        );
        assert_eq!(
            check("Tomate Bío", None, &offers()),
            Err(RejectReason::NonEnglishName)
        );
        assert_eq!(
            check("Tomato 500g", None, &offers()),
            Err(RejectReason::NonEnglishName)
        );
    }

    #[test]
    fn apostrophes_and_hyphens_are_tolerated() {
        assert!(is_acceptable("Farmer's Market Carrot", None, &offers()));
        assert!(is_acceptable("Vine-Ripened Tomato", None, &offers()));
    }

    #[test]
    fn rejects_names_without_known_vegetable_root() {
        assert_eq!(
            check("Chocolate Biscuit", Some("vegetable"), &grocery()),
            Err(RejectReason::UnknownVegetable)
        );
    }

    #[test]
    fn grocery_variant_requires_vegetable_category() {
        let profile = grocery();
        assert_eq!(
            check("Tomatoes", Some("canned goods"), &profile),
            Err(RejectReason::CategoryMismatch)
        );
        assert_eq!(
            check("Tomatoes", None, &profile),
            Err(RejectReason::CategoryMismatch)
        );
        assert!(is_acceptable(
            "Tomatoes",
            Some("Plant-based foods, Vegetables"),
            &profile
        ));
    }

    #[test]
    fn offers_variant_ignores_category() {
        assert!(is_acceptable("Tomatoes", Some("canned goods"), &offers()));
        assert!(is_acceptable("Tomatoes", None, &offers()));
    }
}
