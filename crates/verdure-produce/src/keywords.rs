//! Keyword extraction — a looser "same vegetable family" signal than the
//! canonical key.

use std::collections::{BTreeSet, HashSet};

use crate::tables::KEYWORD_VARIANTS;

/// Extracts the set of canonical keywords mentioned by a raw name.
///
/// The raw name is lowercased and split on whitespace; a canonical key is
/// included when any of its variant tokens appears as an exact token (not a
/// substring). A name may yield zero, one, or several keywords.
#[must_use]
pub fn extract_keywords(raw_name: &str) -> BTreeSet<String> {
    let lowered = raw_name.to_lowercase();
    let tokens: HashSet<&str> = lowered.split_whitespace().collect();

    KEYWORD_VARIANTS
        .iter()
        .filter(|(_, variants)| variants.iter().any(|v| tokens.contains(v)))
        .map(|(key, _)| (*key).to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(keys: &[&str]) -> BTreeSet<String> {
        keys.iter().map(|k| (*k).to_string()).collect()
    }

    #[test]
    fn extracts_multiple_keywords() {
        assert_eq!(
            extract_keywords("frozen garlic and onion mix"),
            set(&["garlic", "onion"])
        );
    }

    #[test]
    fn matches_whole_tokens_only() {
        // "pasted" is not the token "paste".
        assert!(extract_keywords("pasted wallpaper").is_empty());
        assert_eq!(extract_keywords("tomato paste"), set(&["tomato"]));
    }

    #[test]
    fn variant_token_maps_to_canonical_key() {
        assert_eq!(extract_keywords("Aubergine Halves"), set(&["eggplant"]));
        assert_eq!(extract_keywords("passata jar"), set(&["tomato"]));
        assert_eq!(
            extract_keywords("Brussels Sprouts"),
            set(&["brussels sprout"])
        );
    }

    #[test]
    fn unrelated_name_yields_nothing() {
        assert!(extract_keywords("chocolate biscuit").is_empty());
        assert!(extract_keywords("").is_empty());
    }
}
