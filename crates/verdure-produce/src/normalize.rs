//! Name normalization to a canonical vegetable identity.
//!
//! This is a fixed heuristic, not a linguistic stemmer. The stopword phrase
//! is removed as one literal substring, the two stemming rules only cover
//! trailing "ies" and interior "s ", and the override list intentionally
//! overreaches ("pasta" folds into "tomato"). Callers must not "fix" these
//! behaviors — downstream dedup depends on them being stable.

/// Normalizes a raw display name to its canonical lowercase key.
///
/// Steps, in order: lowercase; drop every character that is not
/// alphanumeric or a space; remove `stopword_phrase` as a single literal
/// substring; trim; rewrite trailing `"ies"` to `"y"` and interior `"s "`
/// to `" "`; then apply the fixed-priority overrides.
///
/// Idempotent: normalizing an already-normalized key returns it unchanged.
#[must_use]
pub fn normalize(raw_name: &str, stopword_phrase: &str) -> String {
    let lowered = raw_name.to_lowercase();
    let cleaned: String = lowered
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == ' ')
        .collect();

    let stripped = cleaned.replace(stopword_phrase, "");
    let mut key = stripped.trim().to_string();

    if let Some(prefix) = key.strip_suffix("ies") {
        key = format!("{prefix}y");
    }
    key = key.replace("s ", " ");

    apply_overrides(&key)
}

/// Fixed-priority special cases; each returns immediately on match.
fn apply_overrides(key: &str) -> String {
    if key.contains("tomato") || key.contains("passata") || key.contains("pasta") {
        return "tomato".to_string();
    }
    if key.contains("potato") {
        return "potato".to_string();
    }
    if key.contains("brussels") {
        return "brussels sprout".to_string();
    }
    if key.contains("cilantro") {
        return "cilantro".to_string();
    }
    if key.contains("pepper") {
        return "pepper".to_string();
    }
    key.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::{GROCERY_STOPWORD_PHRASE, OFFERS_STOPWORD_PHRASE};

    fn norm(raw: &str) -> String {
        normalize(raw, GROCERY_STOPWORD_PHRASE)
    }

    #[test]
    fn lowercases_and_drops_symbols() {
        assert_eq!(norm("Spring Onion!"), "spring onion");
        assert_eq!(norm("Leek (Whole)"), "leek whole");
    }

    #[test]
    fn plural_tomatoes_folds_to_tomato() {
        assert_eq!(norm("Tomatoes"), "tomato");
    }

    #[test]
    fn roma_tomato_paste_folds_to_tomato() {
        assert_eq!(norm("Roma Tomato Paste"), "tomato");
    }

    #[test]
    fn pasta_overreach_folds_to_tomato() {
        // Known overreach of the override list, preserved on purpose.
        assert_eq!(norm("Pasta Sauce"), "tomato");
    }

    #[test]
    fn passata_folds_to_tomato() {
        assert_eq!(norm("Passata di Pomodoro"), "tomato");
    }

    #[test]
    fn brussels_folds_to_brussels_sprout() {
        assert_eq!(norm("Brussels Sprouts"), "brussels sprout");
    }

    #[test]
    fn bell_pepper_folds_to_pepper() {
        assert_eq!(norm("Red Bell Peppers"), "pepper");
    }

    #[test]
    fn cilantro_folds_to_cilantro() {
        assert_eq!(norm("Chopped Cilantro Bunch"), "cilantro");
    }

    #[test]
    fn sweet_potato_folds_to_potato() {
        assert_eq!(norm("Sweet Potato"), "potato");
    }

    #[test]
    fn trailing_ies_becomes_y() {
        assert_eq!(norm("celeries"), "celery");
    }

    #[test]
    fn interior_plural_is_collapsed() {
        assert_eq!(norm("leeks and chard"), "leek and chard");
    }

    #[test]
    fn fresh_carrots_keeps_descriptor() {
        // The stopword phrase is one literal substring; a lone "fresh" does
        // not match it and survives normalization.
        assert_eq!(norm("Fresh Carrots"), "fresh carrots");
    }

    #[test]
    fn full_stopword_phrase_is_stripped() {
        let raw = format!("{GROCERY_STOPWORD_PHRASE} carrot");
        assert_eq!(norm(&raw), "carrot");
    }

    #[test]
    fn offers_phrase_strips_boiled_raw_suffix_variant() {
        let raw = format!("{OFFERS_STOPWORD_PHRASE} beet");
        assert_eq!(normalize(&raw, OFFERS_STOPWORD_PHRASE), "beet");
        // The grocery phrase does not cover "boiled raw", so the same input
        // keeps those words under the grocery variant.
        assert_eq!(normalize(&raw, GROCERY_STOPWORD_PHRASE), "boiled raw beet");
    }

    #[test]
    fn normalize_is_idempotent() {
        for raw in [
            "Tomatoes",
            "Roma Tomato Paste",
            "Fresh Carrots",
            "Brussels Sprouts",
            "Red Bell Peppers",
            "Baby Spinach",
            "celeries",
            "Leek (Whole)",
        ] {
            let once = norm(raw);
            assert_eq!(norm(&once), once, "not idempotent for {raw:?}");
        }
    }
}
