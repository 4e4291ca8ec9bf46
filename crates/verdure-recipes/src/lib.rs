pub mod client;
pub mod error;
pub mod tags;
pub mod types;

pub use client::SpoonacularClient;
pub use error::RecipesError;
pub use types::{MealSuggestion, RecipeIngredient, RecipeSummary};
