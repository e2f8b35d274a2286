//! Resource catalog file configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Catalog files loaded at startup
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// Files merged into the catalog, in order
    #[serde(default)]
    pub files: Vec<CatalogFile>,
}

/// One JSON or TOML resource file
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogFile {
    /// Path to the file
    pub path: PathBuf,

    /// Namespace prefix; the file stem when unset
    #[serde(default)]
    pub prefix: Option<String>,
}

impl CatalogFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            prefix: None,
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }
}
