//! Generate command - runs one fetch-or-generate and prints the recipe

use clap::Args;
use tracing::info;

use crate::domain::RecipeRequest;

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Ingredient on hand (repeatable)
    #[arg(short, long = "ingredient", required = true)]
    pub ingredients: Vec<String>,

    /// Preferred cuisine style
    #[arg(short, long)]
    pub cuisine: Option<String>,

    /// Dietary restriction to respect (repeatable)
    #[arg(short, long = "dietary")]
    pub dietary: Vec<String>,
}

impl GenerateArgs {
    pub fn into_request(self) -> RecipeRequest {
        let mut request = RecipeRequest::new(self.ingredients);

        if let Some(cuisine) = self.cuisine {
            request = request.with_cuisine_type(cuisine);
        }

        if !self.dietary.is_empty() {
            request = request.with_dietary_restrictions(self.dietary);
        }

        request
    }
}

/// Run a single recipe generation against the configured backends
pub async fn run(args: GenerateArgs) -> anyhow::Result<()> {
    let config = super::bootstrap()?;
    let state = crate::create_app_state(&config).await?;

    let request = args.into_request();
    info!(key = %state.recipe_service.cache_key(&request), "Generating recipe");

    let recipe = state.recipe_service.fetch_or_generate(&request).await?;
    println!("{}", serde_json::to_string_pretty(&recipe)?);

    Ok(())
}
