//! Error rendering configuration module

use serde::{Deserialize, Serialize};

use super::environment::Environment;

/// Error response configuration options
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ErrorConfig {
    /// Include the cause chain in client responses (development only)
    #[serde(default)]
    pub expose_detail: bool,

    /// Language tag tried when the client sends no usable Accept-Language
    #[serde(default)]
    pub default_language: Option<String>,

    /// Attach a request ID to rendered errors
    #[serde(default = "default_enable_request_id")]
    pub enable_request_id: bool,
}

impl Default for ErrorConfig {
    fn default() -> Self {
        Self {
            expose_detail: cfg!(debug_assertions),
            default_language: None,
            enable_request_id: default_enable_request_id(),
        }
    }
}

impl ErrorConfig {
    /// Create production configuration
    pub fn production() -> Self {
        Self {
            expose_detail: false,
            default_language: None,
            enable_request_id: true,
        }
    }

    /// Create development configuration
    pub fn development() -> Self {
        Self {
            expose_detail: true,
            default_language: None,
            enable_request_id: true,
        }
    }

    /// Preset for the given environment
    pub fn for_environment(env: Environment) -> Self {
        if env.is_production() {
            Self::production()
        } else {
            Self::development()
        }
    }

    /// Set the fallback language tag
    pub fn with_default_language(mut self, tag: impl Into<String>) -> Self {
        self.default_language = Some(tag.into());
        self
    }
}

fn default_enable_request_id() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        assert!(!ErrorConfig::production().expose_detail);
        assert!(ErrorConfig::development().expose_detail);
        assert!(!ErrorConfig::for_environment(Environment::Production).expose_detail);
        assert!(ErrorConfig::for_environment(Environment::Staging).expose_detail);
    }

    #[test]
    fn test_default_language() {
        let config = ErrorConfig::production().with_default_language("zh-CN");
        assert_eq!(config.default_language.as_deref(), Some("zh-CN"));
    }
}
