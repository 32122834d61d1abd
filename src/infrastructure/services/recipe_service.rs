//! Cache-or-generate coordination for recipes

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::domain::cache::{Cache, CacheExt, RecipeKeyDeriver, DEFAULT_KEY_NAMESPACE};
use crate::domain::generation::{GenerationBackend, GenerationParams};
use crate::domain::recipe::{parse_recipe, PromptTemplate, Recipe, RecipeRequest};
use crate::domain::{DomainError, ParseError};
use crate::infrastructure::logging::truncate_for_log;
use crate::infrastructure::observability::{
    record_cache_lookup, record_generation, record_parse_failure,
};

const RAW_LOG_LIMIT: usize = 500;

/// Configuration for recipe caching and generation
#[derive(Debug, Clone)]
pub struct RecipeServiceConfig {
    /// Namespace prefix for cache keys
    pub namespace: String,
    /// TTL applied to every stored recipe
    pub ttl: Duration,
    /// Sampling parameters sent with every generation call
    pub generation: GenerationParams,
}

impl Default for RecipeServiceConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_KEY_NAMESPACE.to_string(),
            ttl: Duration::from_secs(86_400), // 24 hours
            generation: GenerationParams::default(),
        }
    }
}

impl RecipeServiceConfig {
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_generation(mut self, generation: GenerationParams) -> Self {
        self.generation = generation;
        self
    }
}

/// Returns cached recipes, generating and caching them on a miss
///
/// Holds only the injected cache and backend handles plus immutable
/// configuration, so one instance is shared by every request. Concurrent
/// misses on the same key each generate and each write; the last write wins.
#[derive(Debug)]
pub struct RecipeService {
    cache: Arc<dyn Cache>,
    backend: Arc<dyn GenerationBackend>,
    config: RecipeServiceConfig,
    key_deriver: RecipeKeyDeriver,
    prompt: PromptTemplate,
}

impl RecipeService {
    pub fn new(cache: Arc<dyn Cache>, backend: Arc<dyn GenerationBackend>) -> Self {
        Self::with_config(cache, backend, RecipeServiceConfig::default())
    }

    pub fn with_config(
        cache: Arc<dyn Cache>,
        backend: Arc<dyn GenerationBackend>,
        config: RecipeServiceConfig,
    ) -> Self {
        let key_deriver = RecipeKeyDeriver::new(config.namespace.clone());

        Self {
            cache,
            backend,
            config,
            key_deriver,
            prompt: PromptTemplate::default(),
        }
    }

    /// Replaces the prompt template
    pub fn with_prompt_template(mut self, prompt: PromptTemplate) -> Self {
        self.prompt = prompt;
        self
    }

    /// Cache key a request is stored under
    pub fn cache_key(&self, request: &RecipeRequest) -> String {
        self.key_deriver.derive(request)
    }

    /// Returns the cached recipe for a request, generating and caching it on a miss
    ///
    /// Cache read failures propagate instead of being treated as misses. Nothing
    /// is cached unless generation and parsing both succeed.
    pub async fn fetch_or_generate(&self, request: &RecipeRequest) -> Result<Recipe, DomainError> {
        let key = self.cache_key(request);
        let backend = self.cache.backend_name();

        debug!(
            key = %key,
            ingredients = request.ingredients.len(),
            "Derived recipe cache key"
        );

        if let Some(recipe) = self.cache.get::<Recipe>(&key).await? {
            record_cache_lookup(backend, true);
            info!(key = %key, "Recipe found in cache");
            return Ok(recipe);
        }

        record_cache_lookup(backend, false);
        info!(key = %key, "Recipe not found in cache, generating new recipe");

        let recipe = self.generate(request).await?;

        self.cache.set(&key, &recipe, self.config.ttl).await?;

        info!(
            key = %key,
            cuisine_name = %recipe.cuisine_name,
            ttl_secs = self.config.ttl.as_secs(),
            "Recipe cached successfully"
        );

        Ok(recipe)
    }

    /// Verifies the cache backend is reachable
    pub async fn ping_cache(&self) -> Result<(), DomainError> {
        self.cache.ping().await
    }

    pub fn cache_backend(&self) -> &'static str {
        self.cache.backend_name()
    }

    async fn generate(&self, request: &RecipeRequest) -> Result<Recipe, DomainError> {
        let params = &self.config.generation;
        let prompt = self.prompt.render(request);
        let backend = self.backend.backend_name();

        debug!(model = %params.model_id, backend, "Invoking generation backend");

        let start = Instant::now();
        let result = self.backend.generate(params, &prompt).await;
        let elapsed = start.elapsed();

        record_generation(backend, &params.model_id, elapsed, result.is_ok());

        let raw = result.inspect_err(|e| {
            warn!(
                model = %params.model_id,
                error = %e,
                duration_ms = elapsed.as_millis() as u64,
                "Generation backend call failed"
            );
        })?;

        info!(
            model = %params.model_id,
            duration_ms = elapsed.as_millis() as u64,
            "Received generated text"
        );

        parse_recipe(&raw).map_err(|e| {
            let kind = match &e {
                ParseError::NoJsonFound { .. } => "no_json_found",
                ParseError::InvalidShape { .. } => "invalid_shape",
            };
            record_parse_failure(kind);

            warn!(
                kind,
                error = %e,
                raw = %truncate_for_log(e.raw(), RAW_LOG_LIMIT),
                "Failed to parse generated recipe"
            );

            DomainError::from(e)
        })
    }
}
