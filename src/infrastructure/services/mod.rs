//! Application services

mod recipe_service;

pub use recipe_service::{RecipeService, RecipeServiceConfig};
