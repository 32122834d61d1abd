//! Recipe generation endpoint

use axum::extract::State;
use tracing::info;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::{Recipe, RecipeRequest};

/// POST /generate-recipe
pub async fn generate_recipe(
    State(state): State<AppState>,
    Json(request): Json<RecipeRequest>,
) -> Result<Json<Recipe>, ApiError> {
    info!(
        ingredients = request.ingredients.len(),
        cuisine_type = request.cuisine_type.as_deref().unwrap_or("-"),
        "Recipe requested"
    );

    let recipe = state.recipe_service.fetch_or_generate(&request).await?;

    Ok(Json(recipe))
}
