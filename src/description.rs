use std::fmt;

use serde::{Deserialize, Serialize};

/// Free-text description of a dish, an ingredient list or a recipe URL
///
/// No length or encoding limits are enforced; the text is handed to the
/// model verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeDescription(String);

/// Recipe entered through separate form fields
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ManualRecipe {
    pub title: String,
    pub servings: u32,
    pub ingredients: String,
    pub instructions: String,
}

impl RecipeDescription {
    pub fn new(text: impl Into<String>) -> Self {
        RecipeDescription(text.into())
    }

    /// Describe a recipe by reference to the page it lives on
    ///
    /// The URL is not fetched; the model is asked to work from it directly.
    pub fn from_url(url: &str) -> Self {
        RecipeDescription(format!(
            "Recipe from URL: {}. Please analyze this URL and extract the recipe information.",
            url.trim()
        ))
    }

    /// Concatenate structured form fields into a single description
    pub fn from_fields(recipe: &ManualRecipe) -> Self {
        RecipeDescription(format!(
            "Recipe title: {}\nServings: {}\n\nIngredients:\n{}\n\nInstructions:\n{}",
            recipe.title.trim(),
            recipe.servings,
            recipe.ingredients.trim(),
            recipe.instructions.trim()
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for empty or whitespace-only descriptions
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for RecipeDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecipeDescription {
    fn from(text: &str) -> Self {
        RecipeDescription::new(text)
    }
}

impl From<String> for RecipeDescription {
    fn from(text: String) -> Self {
        RecipeDescription(text)
    }
}
