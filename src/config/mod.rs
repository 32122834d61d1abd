//! Layered application configuration

mod app_config;

pub use app_config::{
    AppConfig, CacheSettings, GenerationSettings, LogFormat, LoggingConfig, MetricsConfig,
    ServerConfig,
};
