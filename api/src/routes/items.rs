//! Demo item lookup.
//!
//! Exercises each error path the renderer handles: a classified client
//! error, a templated not-found message, and an unclassified failure that
//! surfaces as the generic 500.

use std::io;

use actix_web::{web, HttpResponse};
use lr_core::errors::CatalogError;
use lr_core::i18n::{CatalogBuilder, ResourceId, ResourceSpec, TemplateArgs};
use lr_core::{ErrorEnvelope, ResponseMessage};
use lr_shared::Level;
use serde::{Deserialize, Serialize};

use crate::handlers::ApiError;

/// Catalog prefix of the item resources
pub const PREFIX: &str = "items";

pub const INVALID_ID: ResourceId = ResourceId::from_static("items.invalid-id");
pub const NOT_FOUND: ResourceId = ResourceId::from_static("items.not-found");

/// Highest id the demo store holds
pub const MAX_ITEM_ID: u64 = 100;

/// Id whose lookup fails inside the store
pub const BROKEN_ITEM_ID: u64 = 13;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: u64,
    pub name: String,
}

/// Register the item messages
pub fn register(builder: &mut CatalogBuilder) -> Result<usize, CatalogError> {
    builder.register_all(
        PREFIX,
        [
            (
                "invalid-id",
                ResourceSpec::new("Item id must be a positive number")
                    .with_description("Path id was zero")
                    .with_variant("zh", "商品编号必须为正数"),
            ),
            (
                "not-found",
                ResourceSpec::new("Item {{.id}} was not found")
                    .with_description("No item with the requested id")
                    .with_variant("zh", "未找到商品 {{.id}}"),
            ),
        ],
    )
}

/// GET /api/v1/items/{id}
pub async fn get_item(path: web::Path<u64>) -> Result<HttpResponse, ApiError> {
    let item = lookup(path.into_inner())?;
    Ok(HttpResponse::Ok().json(item))
}

fn lookup(id: u64) -> Result<Item, ApiError> {
    match id {
        0 => Err(ErrorEnvelope::new("error.items.invalid-id")
            .with_http_status(400)
            .with_level(Level::Info)
            .with_response(INVALID_ID)
            .into()),
        BROKEN_ITEM_ID => Err(ApiError::new(io::Error::other("item store unavailable"))),
        id if id > MAX_ITEM_ID => {
            let args = TemplateArgs::from([("id".to_string(), serde_json::json!(id))]);
            Err(ErrorEnvelope::new("error.items.not-found")
                .with_http_status(404)
                .with_level(Level::Warn)
                .with_message(format!("item {} not in store", id))
                .with_response(ResponseMessage::resource_id(NOT_FOUND).with_args(args))
                .into())
        }
        id => Ok(Item {
            id,
            name: format!("item-{}", id),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_uses_constant_ids() {
        let mut builder = CatalogBuilder::new();
        assert_eq!(register(&mut builder).unwrap(), 2);

        let catalog = builder.build();
        assert!(catalog.checked_id(INVALID_ID).is_ok());
        assert!(catalog.checked_id(NOT_FOUND).is_ok());
    }

    #[test]
    fn test_lookup_classifies_failures() {
        assert_eq!(lookup(0).unwrap_err().envelope().http_status(), 400);
        assert_eq!(lookup(MAX_ITEM_ID + 1).unwrap_err().envelope().http_status(), 404);

        let unknown = lookup(BROKEN_ITEM_ID).unwrap_err().envelope();
        assert_eq!(unknown.response_code(), lr_core::i18n::UNKNOWN_CODE);
        assert_eq!(unknown.message(), "item store unavailable");

        assert_eq!(lookup(7).unwrap().name, "item-7");
    }
}
