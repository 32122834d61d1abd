//! CLI module for the recipe gateway
//!
//! - `serve`: HTTP API server
//! - `generate`: one-shot recipe generation printed as JSON

pub mod generate;
pub mod serve;

use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// Recipe gateway - cached LLM recipe generation
#[derive(Parser)]
#[command(name = "recipe-gateway")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,

    /// Generate (or fetch from cache) a single recipe and print it
    Generate(generate::GenerateArgs),
}

/// Load `.env`, layered configuration and logging shared by every command
pub(crate) fn bootstrap() -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;
    config.validate()?;

    logging::init_logging(&logging::LoggingConfig {
        level: config.logging.level.clone(),
        format: config.logging.format.clone(),
    });

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve() {
        let cli = Cli::try_parse_from(["recipe-gateway", "serve"]).unwrap();
        assert!(matches!(cli.command, Command::Serve));
    }

    #[test]
    fn test_parse_generate() {
        let cli = Cli::try_parse_from([
            "recipe-gateway",
            "generate",
            "--ingredient",
            "chicken",
            "--ingredient",
            "rice",
            "--cuisine",
            "Korean",
            "--dietary",
            "halal",
        ])
        .unwrap();

        let Command::Generate(args) = cli.command else {
            panic!("expected generate command");
        };
        let request = args.into_request();

        assert_eq!(request.ingredients, vec!["chicken", "rice"]);
        assert_eq!(request.cuisine_type.as_deref(), Some("Korean"));
        assert_eq!(request.dietary_restrictions, Some(vec!["halal".to_string()]));
    }

    #[test]
    fn test_generate_requires_ingredient() {
        assert!(Cli::try_parse_from(["recipe-gateway", "generate"]).is_err());
    }
}
