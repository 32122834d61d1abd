//! Application state for shared services

use std::sync::Arc;

use crate::infrastructure::services::RecipeService;

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub recipe_service: Arc<RecipeService>,
}

impl AppState {
    pub fn new(recipe_service: Arc<RecipeService>) -> Self {
        Self { recipe_service }
    }
}
