//! Heuristic dietary tagging for meal suggestions.
//!
//! A tag is granted when none of its deny tokens appears in any ingredient
//! name (case-insensitive substring). This is a coarse filter for the
//! storefront's preference checkboxes, not a nutritional claim.

const MEAT_TOKENS: [&str; 14] = [
    "chicken", "beef", "pork", "bacon", "ham", "turkey", "lamb", "sausage", "fish", "salmon",
    "tuna", "shrimp", "anchovy", "prosciutto",
];

const DAIRY_TOKENS: [&str; 8] = [
    "milk",
    "cheese",
    "butter",
    "cream",
    "yogurt",
    "parmesan",
    "mozzarella",
    "ghee",
];

const GLUTEN_TOKENS: [&str; 9] = [
    "wheat", "flour", "bread", "pasta", "noodle", "barley", "rye", "cracker", "crouton",
];

const NUT_TOKENS: [&str; 8] = [
    "almond",
    "peanut",
    "cashew",
    "walnut",
    "pecan",
    "hazelnut",
    "pistachio",
    "macadamia",
];

const EGG_TOKENS: [&str; 2] = ["egg", "mayonnaise"];

fn mentions_any(ingredients: &[String], tokens: &[&str]) -> bool {
    ingredients.iter().any(|ingredient| {
        let lowered = ingredient.to_lowercase();
        tokens.iter().any(|token| lowered.contains(token))
    })
}

/// Derives dietary tags for a list of ingredient names.
///
/// Tag order is fixed: vegan, vegetarian, gluten-free, nut-free,
/// dairy-free.
#[must_use]
pub fn derive_dietary_tags(ingredients: &[String]) -> Vec<String> {
    let has_meat = mentions_any(ingredients, &MEAT_TOKENS);
    let has_dairy = mentions_any(ingredients, &DAIRY_TOKENS);
    let has_gluten = mentions_any(ingredients, &GLUTEN_TOKENS);
    let has_nuts = mentions_any(ingredients, &NUT_TOKENS);
    let has_egg = mentions_any(ingredients, &EGG_TOKENS);

    let mut tags = Vec::new();
    if !has_meat && !has_dairy && !has_egg {
        tags.push("vegan".to_string());
    }
    if !has_meat {
        tags.push("vegetarian".to_string());
    }
    if !has_gluten {
        tags.push("gluten-free".to_string());
    }
    if !has_nuts {
        tags.push("nut-free".to_string());
    }
    if !has_dairy {
        tags.push("dairy-free".to_string());
    }
    tags
}
