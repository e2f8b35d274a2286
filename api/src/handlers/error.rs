//! Rendering error envelopes as HTTP responses.
//!
//! Handlers return [`ApiError`]; [`ErrorHandlerMiddleware`] re-renders it
//! with the request's languages and request ID through [`render_error`],
//! which also writes the log record. Errors raised by actix itself, such as
//! extractor failures, are wrapped in an envelope first so they render the
//! same way.
//!
//! [`ErrorHandlerMiddleware`]: crate::middleware::ErrorHandlerMiddleware

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use lr_core::envelope::annotate::BoxError;
use lr_core::envelope::chain;
use lr_core::errors::CatalogError;
use lr_core::i18n::{CatalogBuilder, ResourceId, ResourceSpec};
use lr_core::{get_envelope, get_envelope_shared, resolve_response, ErrorEnvelope, SharedError};
use lr_shared::{ErrorConfig, ErrorResponse, Level};

use crate::i18n::preferred_languages;
use crate::middleware::ErrorHandlingExt;

/// Emit a `tracing` event at the level mapped from an envelope [`Level`]
macro_rules! event_at {
    ($level:expr, $($arg:tt)+) => {
        match $level {
            Level::Panic | Level::Fatal | Level::Error => tracing::error!($($arg)+),
            Level::Warn => tracing::warn!($($arg)+),
            Level::Info => tracing::info!($($arg)+),
            Level::Debug => tracing::debug!($($arg)+),
            Level::Trace => tracing::trace!($($arg)+),
        }
    };
}

/// Response code of requests actix rejected before a handler ran
pub const REJECTED_CODE: &str = "error.request.rejected";

pub const REQUEST_REJECTED: ResourceId = ResourceId::from_static("request.rejected");

/// Register the messages used for errors raised by actix
pub fn register(builder: &mut CatalogBuilder) -> Result<usize, CatalogError> {
    builder.register(
        "request",
        "rejected",
        &ResourceSpec::new("The request could not be processed")
            .with_description("Malformed path, query or payload")
            .with_variant("zh", "请求无法处理"),
    )?;
    Ok(1)
}

/// Status for an envelope's numeric HTTP status
pub fn status_code(status: u16) -> StatusCode {
    StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

/// Log `err` at its envelope's level.
///
/// The cause chain is included when the envelope asks for a trace or the
/// caller forces it.
pub fn log_error(err: &(dyn StdError + 'static), force_verbose: bool, request_id: Option<&str>) {
    let envelope = get_envelope(err);
    let directive = envelope.log_directive().force_verbose(force_verbose);
    let code = envelope.response_code();
    let http_status = envelope.http_status();
    let request_id = request_id.unwrap_or("-");
    let message = envelope.message();

    if directive.verbose {
        let causes = chain::messages(err);
        event_at!(
            directive.level,
            code = %code,
            http_status,
            request_id = %request_id,
            causes = ?causes,
            "{}",
            message
        );
    } else {
        event_at!(
            directive.level,
            code = %code,
            http_status,
            request_id = %request_id,
            "{}",
            message
        );
    }
}

/// Render `err` for the client that sent `req`.
///
/// The body is an [`ErrorResponse`]: the envelope's code and localized
/// message, the request ID, and the cause chain when `expose_detail` is on.
pub fn render_error(req: &HttpRequest, err: &(dyn StdError + 'static), config: &ErrorConfig) -> HttpResponse {
    let languages = req
        .languages()
        .unwrap_or_else(|| preferred_languages(req, config));
    let resolved = resolve_response(err, &languages);
    let request_id = if config.enable_request_id {
        req.request_id()
    } else {
        None
    };

    log_error(err, resolved.http_status >= 500, request_id.as_deref());

    let mut body = ErrorResponse::new(resolved.code, resolved.message);
    if config.expose_detail {
        body = body.with_detail(chain::messages(err));
    }
    if let Some(request_id) = request_id {
        body = body.with_request_id(request_id);
    }

    HttpResponse::build(status_code(resolved.http_status)).json(body)
}

/// Render any error produced inside the actix pipeline.
///
/// [`ApiError`] is rendered from its own chain. Other errors become an
/// envelope through [`rejected_envelope`].
pub fn render_actix_error(req: &HttpRequest, err: &actix_web::Error, config: &ErrorConfig) -> HttpResponse {
    match err.as_error::<ApiError>() {
        Some(api_error) => render_error(req, api_error.as_error(), config),
        None => render_error(req, &rejected_envelope(err), config),
    }
}

/// Envelope for an error actix produced without going through [`ApiError`].
///
/// Client errors keep their status under [`REJECTED_CODE`]; server errors
/// become the unknown-error envelope. Either way the actix message is only
/// kept as the cause.
pub fn rejected_envelope(err: &actix_web::Error) -> ErrorEnvelope {
    let status = err.as_response_error().status_code();
    let cause = FrameworkError {
        status: status.as_u16(),
        message: err.to_string(),
    };
    if !status.is_client_error() {
        return ErrorEnvelope::unknown_from(cause);
    }
    ErrorEnvelope::new(REJECTED_CODE)
        .with_http_status(status.as_u16())
        .with_level(Level::Info)
        .with_response(REQUEST_REJECTED)
        .with_cause(cause)
}

/// Message and status of an actix error, detached from the request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameworkError {
    pub status: u16,
    pub message: String,
}

impl fmt::Display for FrameworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl StdError for FrameworkError {}

/// Error type returned by handlers
#[derive(Debug, Clone)]
pub struct ApiError {
    inner: SharedError,
}

impl ApiError {
    pub fn new<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self { inner: Arc::new(err) }
    }

    /// The closest envelope, synthesized for unclassified errors
    pub fn envelope(&self) -> ErrorEnvelope {
        get_envelope_shared(Arc::clone(&self.inner))
    }

    pub fn as_error(&self) -> &(dyn StdError + 'static) {
        &*self.inner
    }

    pub fn into_inner(self) -> SharedError {
        self.inner
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.inner, f)
    }
}

impl From<ErrorEnvelope> for ApiError {
    fn from(envelope: ErrorEnvelope) -> Self {
        Self::new(envelope)
    }
}

impl From<SharedError> for ApiError {
    fn from(inner: SharedError) -> Self {
        Self { inner }
    }
}

impl From<BoxError> for ApiError {
    fn from(err: BoxError) -> Self {
        Self { inner: Arc::from(err) }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        status_code(self.envelope().http_status())
    }

    // Rendered without request context; the middleware replaces it.
    fn error_response(&self) -> HttpResponse {
        let resolved = resolve_response(self.as_error(), &[]);
        HttpResponse::build(status_code(resolved.http_status))
            .json(ErrorResponse::new(resolved.code, resolved.message))
    }
}
