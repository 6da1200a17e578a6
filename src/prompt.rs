use crate::description::RecipeDescription;

/// Instruction template sent to the model for every analysis.
///
/// The template is loaded from `prompt.txt` at compile time using the
/// `include_str!` macro, making it easy to edit without dealing with
/// Rust string syntax.
pub const NUTRITION_PROMPT_TEMPLATE: &str = include_str!("prompt.txt");

const DESCRIPTION_PLACEHOLDER: &str = "{{recipe_description}}";

/// Build the analysis prompt for a recipe description.
///
/// The description is interpolated verbatim; quotes or braces inside it are
/// not escaped.
pub fn build_nutrition_prompt(description: &RecipeDescription) -> String {
    NUTRITION_PROMPT_TEMPLATE.replacen(DESCRIPTION_PLACEHOLDER, description.as_str(), 1)
}
