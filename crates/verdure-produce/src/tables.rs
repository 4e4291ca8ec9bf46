//! Static lookup tables for the produce curation pipeline.
//!
//! These are deliberately small, fixed, English-only tables. They are the
//! whole "taxonomy" — there is no linguistic processing behind them, and
//! they are not expected to be complete. Matching behavior (substring vs
//! exact token) differs per table and is documented on each consumer.

use verdure_core::VegType;

/// Root words that gate "is this an English vegetable name".
///
/// A candidate survives the filter only if its normalized form contains at
/// least one of these as a substring.
pub const KNOWN_VEGETABLES: [&str; 25] = [
    "tomato",
    "potato",
    "carrot",
    "onion",
    "garlic",
    "pepper",
    "cucumber",
    "lettuce",
    "spinach",
    "broccoli",
    "cauliflower",
    "cabbage",
    "celery",
    "zucchini",
    "pumpkin",
    "squash",
    "radish",
    "beet",
    "leek",
    "asparagus",
    "kale",
    "eggplant",
    "brussels",
    "cilantro",
    "chard",
];

/// Ordered (substring, type) classification table; first match wins.
pub const TYPE_TABLE: [(&str, VegType); 25] = [
    ("tomato", VegType::FruitVegetable),
    ("pepper", VegType::FruitVegetable),
    ("cucumber", VegType::FruitVegetable),
    ("eggplant", VegType::FruitVegetable),
    ("carrot", VegType::Root),
    ("potato", VegType::Root),
    ("radish", VegType::Root),
    ("beet", VegType::Root),
    ("lettuce", VegType::Leafy),
    ("spinach", VegType::Leafy),
    ("kale", VegType::Leafy),
    ("chard", VegType::Leafy),
    ("cilantro", VegType::Leafy),
    ("broccoli", VegType::Cruciferous),
    ("cauliflower", VegType::Cruciferous),
    ("cabbage", VegType::Cruciferous),
    ("brussels", VegType::Cruciferous),
    ("zucchini", VegType::Squash),
    ("pumpkin", VegType::Squash),
    ("squash", VegType::Squash),
    ("onion", VegType::Bulb),
    ("garlic", VegType::Bulb),
    ("leek", VegType::Bulb),
    ("celery", VegType::Stem),
    ("asparagus", VegType::Stem),
];

/// Per-canonical-key variant tokens for keyword extraction.
///
/// Tokens are matched exactly against the whitespace-split raw name, not as
/// substrings — "paste" matches the token "paste" but not "pasted".
pub const KEYWORD_VARIANTS: [(&str, &[&str]); 25] = [
    (
        "tomato",
        &[
            "tomato", "tomatoes", "tomaten", "passata", "paste", "puree", "tomatoe",
        ],
    ),
    ("potato", &["potato", "potatoes", "spud"]),
    ("carrot", &["carrot", "carrots"]),
    ("onion", &["onion", "onions", "shallot", "shallots"]),
    ("garlic", &["garlic"]),
    ("pepper", &["pepper", "peppers", "capsicum", "paprika"]),
    ("cucumber", &["cucumber", "cucumbers", "gherkin", "gherkins"]),
    ("lettuce", &["lettuce", "romaine", "iceberg"]),
    ("spinach", &["spinach", "spinat"]),
    ("broccoli", &["broccoli"]),
    ("cauliflower", &["cauliflower"]),
    ("cabbage", &["cabbage", "kraut"]),
    ("celery", &["celery"]),
    ("zucchini", &["zucchini", "zucchinis", "courgette", "courgettes"]),
    ("pumpkin", &["pumpkin", "pumpkins"]),
    ("squash", &["squash", "butternut"]),
    ("radish", &["radish", "radishes", "daikon"]),
    ("beet", &["beet", "beets", "beetroot"]),
    ("leek", &["leek", "leeks"]),
    ("asparagus", &["asparagus"]),
    ("kale", &["kale"]),
    ("eggplant", &["eggplant", "eggplants", "aubergine", "aubergines"]),
    ("brussels sprout", &["brussels", "sprout", "sprouts"]),
    ("cilantro", &["cilantro", "coriander"]),
    ("chard", &["chard"]),
];

/// Stopword phrase removed during normalization for the grocery-items path.
///
/// Removed as ONE literal substring, not word by word. The two call sites
/// carry slightly different phrases; both are preserved exactly as found in
/// the original behavior rather than unified.
pub const GROCERY_STOPWORD_PHRASE: &str = "cherry red green yellow purple organic fresh baby plum grape roma heirloom paste concentrate chopped puree passata";

/// Stopword phrase for the daily-offers path. Same as
/// [`GROCERY_STOPWORD_PHRASE`] with "boiled raw" appended.
pub const OFFERS_STOPWORD_PHRASE: &str = "cherry red green yellow purple organic fresh baby plum grape roma heirloom paste concentrate chopped puree passata boiled raw";

/// Curated backfill pool for the grocery-items endpoint.
pub const GROCERY_FALLBACK_POOL: [&str; 12] = [
    "Carrot",
    "Broccoli",
    "Spinach",
    "Onion",
    "Cucumber",
    "Bell Pepper",
    "Cauliflower",
    "Zucchini",
    "Celery",
    "Kale",
    "Radish",
    "Asparagus",
];

/// Curated backfill pool for the daily-offers endpoint.
pub const OFFERS_FALLBACK_POOL: [&str; 10] = [
    "Tomato",
    "Carrot",
    "Lettuce",
    "Garlic",
    "Beet",
    "Leek",
    "Cabbage",
    "Pumpkin",
    "Eggplant",
    "Brussels Sprouts",
];

/// Fixed heuristic dietary labels per vegetable bucket.
///
/// Not derived from nutrition data; every vegetable gets the base labels,
/// and greens-adjacent buckets also get "low-carb".
#[must_use]
pub fn dietary_tags(veg_type: VegType) -> Vec<String> {
    let mut tags = vec![
        "vegan".to_string(),
        "gluten-free".to_string(),
        "nut-free".to_string(),
    ];
    if matches!(
        veg_type,
        VegType::Leafy | VegType::Cruciferous | VegType::Stem
    ) {
        tags.push("low-carb".to_string());
    }
    tags
}
