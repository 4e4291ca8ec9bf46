//! Canonical-key to vegetable-bucket classification.

use verdure_core::VegType;

use crate::tables::TYPE_TABLE;

/// Classifies a canonical key into its coarse vegetable bucket.
///
/// First substring match over the static table wins; keys the table does
/// not cover come back as [`VegType::Other`].
#[must_use]
pub fn classify(canonical_key: &str) -> VegType {
    TYPE_TABLE
        .iter()
        .find(|(needle, _)| canonical_key.contains(needle))
        .map_or(VegType::Other, |(_, veg_type)| *veg_type)
}
