//! Recipe Gateway
//!
//! Generates structured recipes from a set of ingredients with an LLM and
//! caches each result under a key derived from the normalized request:
//! - Order-insensitive cache keys (SHA-256 over a canonical request form)
//! - In-memory (moka) or Redis expiring caches
//! - AWS Bedrock generation with tolerant JSON extraction

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use self::config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use domain::GenerationBackend;
use infrastructure::{
    cache::CacheFactory,
    generation::{BedrockClient, BedrockGenerationBackend},
    services::RecipeService,
};
use tracing::info;

/// Create the application state with clients built once from configuration
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let cache = CacheFactory::create(&config.cache_config()).await?;

    let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(config.generation.region.clone()))
        .load()
        .await;
    let backend: Arc<dyn GenerationBackend> =
        Arc::new(BedrockGenerationBackend::new(BedrockClient::new(&sdk_config)));

    info!(
        region = %config.generation.region,
        model = %config.generation.model_id,
        "Bedrock generation backend configured"
    );

    let service =
        RecipeService::with_config(cache, backend, config.recipe_service_config());

    Ok(AppState::new(Arc::new(service)))
}
