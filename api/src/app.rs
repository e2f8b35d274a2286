//! Application bootstrap and route table
//!
//! The catalog is assembled once at startup: renderer and route messages
//! first, then the configured catalog files, and the frozen result is installed process-wide
//! before the server accepts requests.

use actix_web::web;
use anyhow::Context;
use lr_core::errors::LoadError;
use lr_core::i18n::{self, loader, Catalog, CatalogBuilder};
use lr_shared::CatalogConfig;

use crate::handlers::error;
use crate::routes::{self, health, items};

/// Build the catalog from the route messages and the configured files
pub fn build_catalog(config: &CatalogConfig) -> Result<Catalog, LoadError> {
    let mut builder = CatalogBuilder::new();
    let registered = error::register(&mut builder)? + routes::register(&mut builder)?;
    let loaded = loader::load_files(&mut builder, &config.files)?;

    tracing::info!(
        files = config.files.len(),
        registered,
        loaded,
        total = builder.len(),
        "Resource catalog built"
    );
    Ok(builder.build())
}

/// Build and install the process-wide catalog
pub fn install_catalog(config: &CatalogConfig) -> anyhow::Result<()> {
    let catalog = build_catalog(config).context("failed to build resource catalog")?;
    i18n::install(catalog).context("failed to install resource catalog")?;
    Ok(())
}

/// Route table
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check))
        .service(web::scope("/api/v1").route("/items/{id}", web::get().to(items::get_item)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use lr_shared::config::CatalogFile;
    use std::io::Write;

    #[test]
    fn test_build_catalog_merges_files() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{"quota": {{"desc": "", "default": "Quota exceeded", "map": {{"zh": "超出配额"}}}}}}"#
        )
        .unwrap();

        let config = CatalogConfig {
            files: vec![CatalogFile::new(file.path()).with_prefix("billing")],
        };
        let catalog = build_catalog(&config).unwrap();

        assert!(catalog.contains("billing.quota"));
        assert!(catalog.contains(items::NOT_FOUND.as_str()));
        assert!(catalog.contains(routes::ROUTE_NOT_FOUND.as_str()));
        assert!(catalog.contains(error::REQUEST_REJECTED.as_str()));
    }

    #[test]
    fn test_build_catalog_rejects_collisions() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"not-found": {{"default": "again"}}}}"#).unwrap();

        let config = CatalogConfig {
            files: vec![CatalogFile::new(file.path()).with_prefix("items")],
        };
        assert!(build_catalog(&config).is_err());
    }
}
