//! User profile and cart types.
//!
//! Field casing follows the JSON the storefront already sends
//! (`avatarUrl`, `glutenFree`, ...), so these types deserialize request
//! bodies directly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Dietary preference flags stored on the user profile.
///
/// All flags default to `false`, so a partial or missing preference
/// object deserializes cleanly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DietaryPrefs {
    pub vegan: bool,
    pub gluten_free: bool,
    pub nut_free: bool,
    pub low_carb: bool,
    pub dairy_free: bool,
    pub keto: bool,
    pub paleo: bool,
}

/// A user profile as exposed by the profile endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub uid: String,
    pub email: Option<String>,
    pub name: String,
    pub avatar_url: String,
    pub dietary_prefs: DietaryPrefs,
}

impl UserProfile {
    /// Default profile served when no row exists yet for an
    /// authenticated user.
    #[must_use]
    pub fn fallback(uid: &str, email: Option<&str>) -> Self {
        Self {
            uid: uid.to_string(),
            email: email.map(str::to_string),
            name: "New User".to_string(),
            avatar_url: String::new(),
            dietary_prefs: DietaryPrefs::default(),
        }
    }
}

/// One line of a user's cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: Uuid,
    pub name: String,
    pub price: f64,
    pub quantity: i32,
    pub added_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dietary_prefs_deserialize_partial_object() {
        let prefs: DietaryPrefs =
            serde_json::from_str(r#"{"vegan": true, "glutenFree": true}"#).expect("deserialize");
        assert!(prefs.vegan);
        assert!(prefs.gluten_free);
        assert!(!prefs.nut_free);
        assert!(!prefs.keto);
    }

    #[test]
    fn dietary_prefs_deserialize_empty_object() {
        let prefs: DietaryPrefs = serde_json::from_str("{}").expect("deserialize");
        assert_eq!(prefs, DietaryPrefs::default());
    }

    #[test]
    fn fallback_profile_uses_token_identity() {
        let profile = UserProfile::fallback("uid-1", Some("a@example.com"));
        assert_eq!(profile.uid, "uid-1");
        assert_eq!(profile.email.as_deref(), Some("a@example.com"));
        assert_eq!(profile.name, "New User");
        assert_eq!(profile.dietary_prefs, DietaryPrefs::default());
    }

    #[test]
    fn user_profile_serializes_camel_case() {
        let profile = UserProfile::fallback("uid-2", None);
        let json = serde_json::to_string(&profile).expect("serialize");
        assert!(json.contains("\"avatarUrl\""));
        assert!(json.contains("\"dietaryPrefs\""));
    }
}
