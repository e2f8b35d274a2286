//! # Lingua Render Core
//!
//! Structured error envelopes and the localized message catalog they
//! resolve against. This crate has no transport dependencies: the API crate
//! turns a resolved envelope into an HTTP response and a log record.

pub mod envelope;
pub mod errors;
pub mod i18n;

// Re-export commonly used types for convenience
pub use envelope::{
    get_envelope, get_envelope_shared, resolve_logging, resolve_response, EnvelopeExt, ErrorEnvelope, InternalMessage,
    LogDirective, ResolvedResponse, ResponseMessage, SharedError,
};
pub use errors::{CatalogError, LoadError, TemplateError};
pub use i18n::{Catalog, CatalogBuilder, LocalizedResource, ResourceId, ResourceSpec};
