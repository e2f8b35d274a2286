//! Retrieving and annotating the envelope inside an arbitrary error.
//!
//! Any error value can be annotated without building an envelope by hand:
//! the setters find the nearest envelope in the chain and mutate it in
//! place. When the chain holds no envelope, an unknown-error envelope
//! wrapping the value is attached first, and the value keeps its type.

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use lr_shared::types::Level;

use super::chain;
use super::message::{InternalMessage, ResponseMessage, SharedError};
use super::ErrorEnvelope;

pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// The first envelope in `err`'s chain, outside-in.
///
/// With no envelope anywhere in the chain an unknown-error envelope is
/// synthesized (status 500, trace on). Its cause is a snapshot of `err`'s
/// messages, since a borrowed error cannot be kept.
pub fn get_envelope(err: &(dyn StdError + 'static)) -> ErrorEnvelope {
    chain::find_envelope(err)
        .unwrap_or_else(|| ErrorEnvelope::unknown(Arc::new(CapturedError::capture(err))))
}

/// [`get_envelope`] for an owned error.
///
/// A synthesized unknown-error envelope keeps `err` itself as its cause, so
/// the cause can still be downcast to its concrete type.
pub fn get_envelope_shared(err: SharedError) -> ErrorEnvelope {
    match chain::find_envelope(&*err) {
        Some(envelope) => envelope,
        None => ErrorEnvelope::unknown(err),
    }
}

/// Owned copy of a borrowed error chain's messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedError {
    message: String,
    source: Option<Box<CapturedError>>,
}

impl CapturedError {
    pub fn capture(err: &(dyn StdError + 'static)) -> Self {
        let mut lines = chain::messages(err).into_iter().rev();
        let innermost = CapturedError {
            message: lines.next().unwrap_or_default(),
            source: None,
        };
        lines.fold(innermost, |source, message| CapturedError {
            message,
            source: Some(Box::new(source)),
        })
    }
}

impl fmt::Display for CapturedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl StdError for CapturedError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source.as_deref().map(|s| s as &(dyn StdError + 'static))
    }
}

/// Envelope annotations on error values.
///
/// Each setter returns the value it was called on, so annotations chain:
///
/// ```
/// use std::sync::Arc;
/// use lr_core::envelope::{get_envelope, EnvelopeExt, SharedError};
///
/// let err: SharedError = Arc::new(std::io::Error::other("disk full"));
/// let err = err.annotate_http_status(507).annotate_code("storage.full");
///
/// let envelope = get_envelope(&*err);
/// assert_eq!(envelope.http_status(), 507);
/// assert_eq!(envelope.response_code(), "storage.full");
/// ```
pub trait EnvelopeExt: Sized {
    /// Run `f` on the nearest envelope, attaching one first if needed
    fn annotate<F>(self, f: F) -> Self
    where
        F: FnOnce(&ErrorEnvelope);

    fn annotate_cause(self, cause: Option<SharedError>) -> Self {
        self.annotate(|e| e.set_cause(cause))
    }

    fn annotate_level(self, level: Level) -> Self {
        self.annotate(|e| e.set_log_level(level))
    }

    fn annotate_message(self, message: impl Into<InternalMessage>) -> Self {
        self.annotate(|e| e.set_internal_message(message))
    }

    fn annotate_response(self, message: impl Into<ResponseMessage>) -> Self {
        self.annotate(|e| e.set_response_message(message))
    }

    fn annotate_code(self, code: impl Into<String>) -> Self {
        self.annotate(|e| e.set_response_code(code))
    }

    fn annotate_trace(self, needs_trace: bool) -> Self {
        self.annotate(|e| e.set_needs_trace(needs_trace))
    }

    fn annotate_http_status(self, status: u16) -> Self {
        self.annotate(|e| e.set_http_status(status))
    }
}

impl EnvelopeExt for ErrorEnvelope {
    fn annotate<F>(self, f: F) -> Self
    where
        F: FnOnce(&ErrorEnvelope),
    {
        f(&self);
        self
    }
}

impl EnvelopeExt for SharedError {
    fn annotate<F>(self, f: F) -> Self
    where
        F: FnOnce(&ErrorEnvelope),
    {
        if let Some(envelope) = chain::find_envelope(&*self) {
            f(&envelope);
            return self;
        }
        let envelope = ErrorEnvelope::unknown(self);
        f(&envelope);
        Arc::new(envelope)
    }
}

impl EnvelopeExt for BoxError {
    fn annotate<F>(self, f: F) -> Self
    where
        F: FnOnce(&ErrorEnvelope),
    {
        if let Some(envelope) = chain::find_envelope(&*self) {
            f(&envelope);
            return self;
        }
        let envelope = ErrorEnvelope::unknown(Arc::from(self));
        f(&envelope);
        Box::new(envelope)
    }
}

impl<T, E> EnvelopeExt for Result<T, E>
where
    E: EnvelopeExt,
{
    fn annotate<F>(self, f: F) -> Self
    where
        F: FnOnce(&ErrorEnvelope),
    {
        self.map_err(|err| err.annotate(f))
    }
}
