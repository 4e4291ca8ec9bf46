//! Typed shapes for the `findByIngredients` recipe search and the meal
//! suggestions derived from it.

use serde::{Deserialize, Serialize};

use crate::tags::derive_dietary_tags;

/// One recipe as returned by the ingredient search.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeSummary {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub used_ingredients: Vec<RecipeIngredient>,
    #[serde(default)]
    pub missed_ingredients: Vec<RecipeIngredient>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecipeIngredient {
    pub name: String,
}

/// A meal suggestion as served by `/meal-recommendations`.
///
/// `tags` are heuristic dietary labels derived from the ingredient names,
/// not from any nutrition database — good enough for the storefront's
/// client-side preference filter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealSuggestion {
    pub meal: String,
    pub ingredients: Vec<String>,
    pub tags: Vec<String>,
}

impl MealSuggestion {
    /// Flattens a recipe into a suggestion: title, the combined used+missed
    /// ingredient names, and derived dietary tags.
    #[must_use]
    pub fn from_recipe(recipe: RecipeSummary) -> Self {
        let ingredients: Vec<String> = recipe
            .used_ingredients
            .into_iter()
            .chain(recipe.missed_ingredients)
            .map(|ingredient| ingredient.name)
            .collect();
        let tags = derive_dietary_tags(&ingredients);
        Self {
            meal: recipe.title,
            ingredients,
            tags,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ingredient(name: &str) -> RecipeIngredient {
        RecipeIngredient {
            name: name.to_string(),
        }
    }

    #[test]
    fn recipe_summary_deserializes_camel_case_fields() {
        let json = r#"{
            "id": 641803,
            "title": "Easy Tomato Soup",
            "usedIngredients": [{ "id": 11529, "name": "tomato" }],
            "missedIngredients": [{ "id": 11215, "name": "garlic" }]
        }"#;
        let recipe: RecipeSummary = serde_json::from_str(json).expect("deserialize");
        assert_eq!(recipe.title, "Easy Tomato Soup");
        assert_eq!(recipe.used_ingredients.len(), 1);
        assert_eq!(recipe.missed_ingredients[0].name, "garlic");
    }

    #[test]
    fn from_recipe_combines_used_and_missed_ingredients() {
        let recipe = RecipeSummary {
            id: 1,
            title: "Garden Salad".to_string(),
            used_ingredients: vec![ingredient("lettuce"), ingredient("tomato")],
            missed_ingredients: vec![ingredient("cucumber")],
        };
        let meal = MealSuggestion::from_recipe(recipe);
        assert_eq!(meal.meal, "Garden Salad");
        assert_eq!(meal.ingredients, vec!["lettuce", "tomato", "cucumber"]);
        assert!(meal.tags.contains(&"vegan".to_string()));
    }
}
