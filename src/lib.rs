//! Estimate the nutritional breakdown of a recipe with a text-generation model.
//!
//! A free-text recipe description is turned into a prompt, sent to the
//! configured backend, and the JSON record is recovered from the reply and
//! validated.
//!
//! ```no_run
//! # use recipe_nutrition::{NutritionAnalyzer, RecipeDescription};
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let analyzer = NutritionAnalyzer::builder().build()?;
//! let report = analyzer
//!     .analyze(&RecipeDescription::new("2 eggs and 1 slice of toast"))
//!     .await?;
//! println!("{} kcal", report.recipe.total_nutrition.calories);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod builder;
pub mod config;
pub mod description;
pub mod error;
pub mod extraction;
pub mod model;
pub mod pipeline;
pub mod profile;
pub mod prompt;
pub mod providers;
pub mod validation;

pub use api::{handle_analyze, respond, AnalyzeRequest, ApiResponse};
pub use builder::NutritionAnalyzerBuilder;
pub use config::{AiConfig, ProviderConfig};
pub use description::{ManualRecipe, RecipeDescription};
pub use error::NutritionError;
pub use model::{Ingredient, Minerals, NutritionRecord, NutritionReport, TotalNutrition, Vitamins};
pub use pipeline::{Analysis, NutritionAnalyzer, PipelineStage};
pub use profile::{ActivityLevel, Gender, Profile, ProfileMetrics};
pub use providers::{LlmProvider, ProviderKind};

/// Analyze a recipe description with the configured default provider
///
/// Loads `config.toml` and `RECIPE_NUTRITION__*` environment variables.
pub async fn analyze_recipe(description: &str) -> Result<NutritionReport, NutritionError> {
    let analyzer = NutritionAnalyzer::builder().build()?;
    analyzer.analyze(&RecipeDescription::new(description)).await
}
