//! Catalog output types shared by the curation engine, the persistence
//! layer, and the HTTP API.

use serde::{Deserialize, Serialize};

/// Coarse vegetable bucket used for type-diversity selection.
///
/// Derived by substring match against a fixed table; anything the table
/// does not cover falls into [`VegType::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VegType {
    FruitVegetable,
    Root,
    Leafy,
    Cruciferous,
    Squash,
    Bulb,
    Stem,
    Other,
}

impl VegType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            VegType::FruitVegetable => "fruit_vegetable",
            VegType::Root => "root",
            VegType::Leafy => "leafy",
            VegType::Cruciferous => "cruciferous",
            VegType::Squash => "squash",
            VegType::Bulb => "bulb",
            VegType::Stem => "stem",
            VegType::Other => "other",
        }
    }
}

impl std::fmt::Display for VegType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A curated grocery catalog entry as served by `/grocery-items`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogItem {
    pub name: String,
    pub category: String,
    pub tags: Vec<String>,
    pub price: f64,
    pub image: String,
    pub veg_type: VegType,
}

/// A synthetic discount entry as served by `/daily-offers`.
///
/// `original` and `sale` are drawn from fixed ranges and rounded to two
/// decimals; they are not sourced from any real price feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyOffer {
    pub name: String,
    pub original: f64,
    pub sale: f64,
    pub tags: Vec<String>,
}
