//! Shared configuration and types for the localized error engine
//!
//! This crate provides common functionality used by the core and api crates:
//! - Configuration types (environment, logging, error rendering, catalog files)
//! - Language preferences and Accept-Language parsing
//! - Log levels and the client-facing error payload

pub mod config;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CatalogConfig, ConfigError, Environment, ErrorConfig, LogFormat, LoggingConfig,
    ServerConfig,
};
pub use types::{parse_accept_language, ErrorResponse, Language, Level};
