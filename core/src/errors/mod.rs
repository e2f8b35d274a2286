//! Configuration errors raised while building and loading the resource catalog.
//!
//! These surface authoring or deployment mistakes. They are returned while the
//! catalog is being assembled at startup and are not meant to be handled at
//! request time.

use std::path::PathBuf;

use thiserror::Error;

/// A message template failed to compile
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("Template `{name}`: unclosed placeholder at byte {offset}")]
    Unclosed { name: String, offset: usize },

    #[error("Template `{name}`: empty placeholder at byte {offset}")]
    EmptyPlaceholder { name: String, offset: usize },

    #[error("Template `{name}`: invalid placeholder `{placeholder}`, expected `{{{{.name}}}}`")]
    InvalidPlaceholder { name: String, placeholder: String },
}

/// The resource catalog was misconfigured
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Resource `{key}` is already registered")]
    DuplicateKey { key: String },

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error("Resource `{id}` is not registered")]
    UnknownResource { id: String },

    #[error("The global catalog is already installed")]
    AlreadyInstalled,
}

/// A catalog file could not be loaded
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read catalog file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON catalog: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid TOML catalog: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Unsupported catalog format for {path}, expected .json or .toml")]
    UnsupportedFormat { path: PathBuf },

    #[error("Invalid catalog file name {path}")]
    InvalidFileName { path: PathBuf },

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

#[cfg(test)]
mod tests;
