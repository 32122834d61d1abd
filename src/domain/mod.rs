//! Domain layer - Core business logic and entities

pub mod cache;
pub mod error;
pub mod generation;
pub mod recipe;

pub use cache::{Cache, CacheExt, CacheKeyParams, RecipeKeyDeriver};
pub use error::{DomainError, ParseError};
pub use generation::{GenerationBackend, GenerationParams};
pub use recipe::{parse_recipe, PromptTemplate, Recipe, RecipeRequest};
