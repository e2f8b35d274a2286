//! Unit tests for catalog configuration errors

use std::path::PathBuf;

use crate::errors::{CatalogError, LoadError, TemplateError};

#[test]
fn test_template_error_messages() {
    let error = TemplateError::Unclosed {
        name: "auth.locked".to_string(),
        offset: 4,
    };
    assert_eq!(
        error.to_string(),
        "Template `auth.locked`: unclosed placeholder at byte 4"
    );

    let error = TemplateError::InvalidPlaceholder {
        name: "auth.locked".to_string(),
        placeholder: "minutes".to_string(),
    };
    assert!(error.to_string().contains("expected `{{.name}}`"));
}

#[test]
fn test_catalog_error_wraps_template_error() {
    let template = TemplateError::EmptyPlaceholder {
        name: "x".to_string(),
        offset: 0,
    };
    let error: CatalogError = template.clone().into();
    assert_eq!(error, CatalogError::Template(template.clone()));
    assert_eq!(error.to_string(), template.to_string());
}

#[test]
fn test_load_error_conversion() {
    let error: LoadError = CatalogError::DuplicateKey {
        key: "auth.locked".to_string(),
    }
    .into();
    assert_eq!(error.to_string(), "Resource `auth.locked` is already registered");

    let error = LoadError::UnsupportedFormat {
        path: PathBuf::from("messages.yaml"),
    };
    assert!(error.to_string().contains("messages.yaml"));
}
