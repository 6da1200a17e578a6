use std::error::Error;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use recipe_nutrition::{
    respond, ActivityLevel, ApiResponse, Gender, ManualRecipe, NutritionAnalyzer, Profile,
    ProviderKind, RecipeDescription,
};

#[derive(Parser)]
#[command(name = "recipe-nutrition", version, about = "AI-estimated nutrition for recipes")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Estimate the nutritional breakdown of a recipe
    Analyze(AnalyzeArgs),
    /// Compute BMI and daily calorie needs
    Profile(ProfileArgs),
}

#[derive(Args)]
struct AnalyzeArgs {
    /// Free-text recipe or ingredient list
    description: Option<String>,

    /// Analyze the recipe found at this URL
    #[arg(long, conflicts_with = "description")]
    url: Option<String>,

    /// Recipe title (structured entry)
    #[arg(long, conflicts_with_all = ["description", "url"])]
    title: Option<String>,

    /// Ingredients, one per line (structured entry)
    #[arg(long)]
    ingredients: Option<String>,

    /// Cooking instructions (structured entry)
    #[arg(long)]
    instructions: Option<String>,

    /// Number of servings (structured entry)
    #[arg(long, default_value_t = 4)]
    servings: u32,

    /// Model backend to use instead of the configured default
    #[arg(long)]
    provider: Option<ProviderKind>,

    /// Model name override
    #[arg(long)]
    model: Option<String>,

    /// Request ceiling in seconds
    #[arg(long)]
    timeout: Option<u64>,
}

#[derive(Args)]
struct ProfileArgs {
    #[arg(long)]
    age: u32,
    #[arg(long)]
    gender: Gender,
    /// Height in centimetres
    #[arg(long)]
    height: f64,
    /// Weight in kilograms
    #[arg(long)]
    weight: f64,
    /// sedentary, light, moderate, active or veryActive
    #[arg(long, default_value = "moderate")]
    activity: ActivityLevel,
}

impl AnalyzeArgs {
    fn recipe_description(&self) -> RecipeDescription {
        if let Some(url) = &self.url {
            return RecipeDescription::from_url(url);
        }

        if self.title.is_some() || self.ingredients.is_some() || self.instructions.is_some() {
            return RecipeDescription::from_fields(&ManualRecipe {
                title: self.title.clone().unwrap_or_default(),
                servings: self.servings,
                ingredients: self.ingredients.clone().unwrap_or_default(),
                instructions: self.instructions.clone().unwrap_or_default(),
            });
        }

        RecipeDescription::new(self.description.clone().unwrap_or_default())
    }
}

async fn analyze(args: AnalyzeArgs) -> ApiResponse {
    let mut builder = NutritionAnalyzer::builder();
    if let Some(provider) = args.provider {
        builder = builder.provider(provider);
    }
    if let Some(model) = &args.model {
        builder = builder.model(model.clone());
    }
    if let Some(secs) = args.timeout {
        builder = builder.timeout(Duration::from_secs(secs));
    }

    let description = args.recipe_description();
    respond(builder.build(), &description).await
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Command::Analyze(args) => {
            let response = analyze(args).await;
            println!("{}", serde_json::to_string_pretty(&response.body)?);
            if !response.is_success() {
                std::process::exit(1);
            }
        }
        Command::Profile(args) => {
            let profile = Profile {
                age: args.age,
                gender: args.gender,
                height_cm: args.height,
                weight_kg: args.weight,
                activity_level: args.activity,
            };
            println!("{}", profile.metrics()?);
        }
    }

    Ok(())
}
