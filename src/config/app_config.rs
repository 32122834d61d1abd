use std::time::Duration;

use serde::Deserialize;

use crate::domain::cache::DEFAULT_KEY_NAMESPACE;
use crate::domain::generation::GenerationParams;
use crate::domain::DomainError;
use crate::infrastructure::cache::{CacheConfig, CacheType};
use crate::infrastructure::services::RecipeServiceConfig;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub cache: CacheSettings,
    pub generation: GenerationSettings,
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Origins allowed by the CORS layer
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    pub backend: CacheType,
    pub redis_url: String,
    pub key_prefix: Option<String>,
    /// Prefix of every recipe cache key
    pub namespace: String,
    pub ttl_secs: u64,
    /// Entry bound for the in-memory backend
    pub max_capacity: u64,
    pub connection_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    pub region: String,
    pub model_id: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    pub enabled: bool,
    pub path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            cors_allowed_origins: vec!["http://localhost:5173".to_string()],
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            backend: CacheType::default(),
            redis_url: "redis://127.0.0.1:6379/0".to_string(),
            key_prefix: None,
            namespace: DEFAULT_KEY_NAMESPACE.to_string(),
            ttl_secs: 86_400,
            max_capacity: 10_000,
            connection_timeout_secs: 5,
        }
    }
}

impl Default for GenerationSettings {
    fn default() -> Self {
        let params = GenerationParams::default();

        Self {
            region: "us-east-1".to_string(),
            model_id: params.model_id,
            max_tokens: params.max_tokens,
            temperature: params.temperature,
            top_p: params.top_p,
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            path: "/metrics".to_string(),
        }
    }
}

/// `APP__SECTION__KEY` overrides; list settings take comma-separated values
fn environment() -> config::Environment {
    config::Environment::with_prefix("APP")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("server.cors_allowed_origins")
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_with_env(environment())
    }

    fn load_with_env(env: config::Environment) -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(env)
            .build()?;

        config.try_deserialize()
    }

    /// Rejects settings the service cannot run with
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.cache.ttl_secs == 0 {
            return Err(DomainError::configuration("cache.ttl_secs must be positive"));
        }

        if self.cache.namespace.trim().is_empty() {
            return Err(DomainError::configuration("cache.namespace must not be empty"));
        }

        if self.cache.backend == CacheType::Redis && self.cache.redis_url.trim().is_empty() {
            return Err(DomainError::configuration(
                "cache.redis_url is required for the redis backend",
            ));
        }

        if self.generation.model_id.trim().is_empty() {
            return Err(DomainError::configuration("generation.model_id must not be empty"));
        }

        if self.generation.max_tokens == 0 {
            return Err(DomainError::configuration("generation.max_tokens must be positive"));
        }

        if !(0.0..=1.0).contains(&self.generation.temperature) {
            return Err(DomainError::configuration(
                "generation.temperature must be between 0.0 and 1.0",
            ));
        }

        if !(self.generation.top_p > 0.0 && self.generation.top_p <= 1.0) {
            return Err(DomainError::configuration(
                "generation.top_p must be in (0.0, 1.0]",
            ));
        }

        if !self.metrics.path.starts_with('/') {
            return Err(DomainError::configuration("metrics.path must start with '/'"));
        }

        Ok(())
    }

    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig {
            cache_type: self.cache.backend,
            redis_url: self.cache.redis_url.clone(),
            key_prefix: self.cache.key_prefix.clone(),
            max_capacity: self.cache.max_capacity,
            connection_timeout: Duration::from_secs(self.cache.connection_timeout_secs),
        }
    }

    pub fn generation_params(&self) -> GenerationParams {
        GenerationParams::new(self.generation.model_id.clone())
            .with_max_tokens(self.generation.max_tokens)
            .with_temperature(self.generation.temperature)
            .with_top_p(self.generation.top_p)
    }

    pub fn recipe_service_config(&self) -> RecipeServiceConfig {
        RecipeServiceConfig::default()
            .with_namespace(self.cache.namespace.clone())
            .with_ttl(Duration::from_secs(self.cache.ttl_secs))
            .with_generation(self.generation_params())
    }
}
