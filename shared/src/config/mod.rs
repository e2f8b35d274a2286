//! Configuration module
//!
//! - `catalog` - Resource catalog files merged at startup
//! - `environment` - Environment detection and logging configuration
//! - `errors` - Error rendering options (detail exposure, request IDs)
//! - `server` - Bind address of the demo service

pub mod catalog;
pub mod environment;
pub mod errors;
pub mod server;

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

pub use catalog::{CatalogConfig, CatalogFile};
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use errors::ErrorConfig;
pub use server::ServerConfig;

/// Prefix of environment variables overriding configuration, e.g. `LR__ERRORS__EXPOSE_DETAIL`
pub const ENV_PREFIX: &str = "LR";

/// Failure to assemble the application configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Error rendering configuration
    #[serde(default)]
    pub errors: ErrorConfig,

    /// Catalog files
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

impl AppConfig {
    /// Defaults for an environment
    pub fn for_environment(environment: Environment) -> Self {
        Self {
            environment,
            logging: LoggingConfig::for_environment(environment),
            errors: ErrorConfig::for_environment(environment),
            catalog: CatalogConfig::default(),
            server: ServerConfig::default(),
        }
    }

    /// Load configuration for the environment named by `LR_ENV` or `ENVIRONMENT`.
    ///
    /// Layers, lowest priority first: environment defaults, the
    /// environment's `config.<env>.toml` if present, `LR__*` variables.
    pub fn load() -> Result<Self, ConfigError> {
        let environment = Environment::from_env();
        dotenvy::from_filename(environment.env_file()).ok();
        dotenvy::dotenv().ok();
        Self::load_from(environment, environment.config_file())
    }

    /// Load configuration for `environment` from an explicit file path
    pub fn load_from(environment: Environment, path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let defaults = Self::for_environment(environment);
        let settings = ::config::Config::builder()
            .add_source(::config::Config::try_from(&defaults)?)
            .add_source(::config::File::from(path.as_ref()).required(false))
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_follow_environment() {
        let prod = AppConfig::for_environment(Environment::Production);
        assert!(!prod.errors.expose_detail);
        assert_eq!(prod.logging.level, "warn");
        assert!(prod.catalog.files.is_empty());

        let dev = AppConfig::for_environment(Environment::Development);
        assert!(dev.errors.expose_detail);
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let config =
            AppConfig::load_from(Environment::Production, "does-not-exist.toml").unwrap();
        assert_eq!(config.environment, Environment::Production);
        assert!(!config.errors.expose_detail);
    }
}
