//! Route handlers of the demo service
//!
//! - `health` - liveness probe
//! - `items` - demo lookups failing in each rendered way

pub mod health;
pub mod items;

use lr_core::errors::CatalogError;
use lr_core::i18n::{CatalogBuilder, ResourceId, ResourceSpec};
use lr_core::ErrorEnvelope;
use lr_shared::Level;

use crate::handlers::ApiError;

pub const ROUTE_NOT_FOUND: ResourceId = ResourceId::from_static("routes.not-found");

/// Register the messages every route module needs
pub fn register(builder: &mut CatalogBuilder) -> Result<usize, CatalogError> {
    builder.register(
        "routes",
        "not-found",
        &ResourceSpec::new("The requested resource was not found")
            .with_variant("zh", "请求的资源不存在"),
    )?;
    Ok(1 + items::register(builder)?)
}

/// Fallback for unmatched paths
pub async fn not_found() -> Result<actix_web::HttpResponse, ApiError> {
    Err(ErrorEnvelope::new("error.route.not-found")
        .with_http_status(404)
        .with_level(Level::Debug)
        .with_message("no route matched")
        .with_response(ROUTE_NOT_FOUND)
        .into())
}
