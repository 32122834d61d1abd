//! Runtime selection of the expiring-map backend

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use tracing::info;

use crate::domain::cache::Cache;
use crate::domain::DomainError;

use super::in_memory::{InMemoryCache, InMemoryCacheConfig};
use super::redis::{RedisCache, RedisCacheConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheType {
    #[default]
    #[serde(alias = "memory")]
    InMemory,
    Redis,
}

impl fmt::Display for CacheType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CacheType::InMemory => "in_memory",
            CacheType::Redis => "redis",
        })
    }
}

/// Everything needed to open either backend; fields a backend does not use are ignored
#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub cache_type: CacheType,
    pub redis_url: String,
    pub key_prefix: Option<String>,
    pub max_capacity: u64,
    pub connection_timeout: Duration,
}

pub struct CacheFactory;

impl CacheFactory {
    /// Opens the configured backend
    pub async fn create(config: &CacheConfig) -> Result<Arc<dyn Cache>, DomainError> {
        info!(backend = %config.cache_type, "Opening recipe cache");

        match config.cache_type {
            CacheType::InMemory => {
                let settings = InMemoryCacheConfig::default().with_max_capacity(config.max_capacity);
                Ok(Arc::new(InMemoryCache::with_config(settings)))
            }
            CacheType::Redis => {
                if config.redis_url.trim().is_empty() {
                    return Err(DomainError::configuration(
                        "A Redis URL is required for the redis cache backend",
                    ));
                }

                let mut settings = RedisCacheConfig::new(config.redis_url.clone())
                    .with_connection_timeout(config.connection_timeout);

                if let Some(prefix) = &config.key_prefix {
                    settings = settings.with_key_prefix(prefix.clone());
                }

                Ok(Arc::new(RedisCache::new(settings).await?))
            }
        }
    }
}
