//! Error envelopes.
//!
//! An [`ErrorEnvelope`] is the structured error handed to the rendering
//! boundary. It carries a response code (the classification key), a log
//! level, an HTTP status, a trace flag, and two lazily resolved messages: one
//! for logs, one for the client.
//!
//! Envelopes are handles. Cloning one yields another alias of the same
//! fields, and setters mutate those shared fields in place, so an annotation
//! made through any alias is visible through all of them. Use
//! [`ErrorEnvelope::detached`] for an independent copy.

pub mod annotate;
pub mod chain;
pub mod message;
pub mod resolve;

use std::cell::RefCell;
use std::error::Error as StdError;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use lr_shared::types::{Language, Level};

use crate::i18n::{self, builtin, Catalog};

pub use annotate::{get_envelope, get_envelope_shared, EnvelopeExt};
pub use chain::{CausedBy, Layer};
pub use message::{InternalMessage, ResponseMessage, SharedError};
pub use resolve::{resolve_logging, resolve_response, LogDirective, ResolvedResponse};

/// Status used when none is given, and for unknown errors
pub const INTERNAL_SERVER_ERROR: u16 = 500;

#[derive(Clone)]
struct Fields {
    cause: Option<SharedError>,
    log_level: Level,
    internal_message: InternalMessage,
    response_message: ResponseMessage,
    response_code: String,
    needs_trace: bool,
    http_status: u16,
}

/// Structured, localizable error
#[derive(Clone)]
pub struct ErrorEnvelope {
    fields: Arc<RwLock<Fields>>,
}

impl ErrorEnvelope {
    /// An envelope classified by `response_code`, at `Error` level with status 500
    pub fn new(response_code: impl Into<String>) -> Self {
        Self::from_fields(Fields {
            cause: None,
            log_level: Level::Error,
            internal_message: InternalMessage::Absent,
            response_message: ResponseMessage::Absent,
            response_code: response_code.into(),
            needs_trace: false,
            http_status: INTERNAL_SERVER_ERROR,
        })
    }

    /// The envelope synthesized for errors that carry no classification
    pub fn unknown(cause: SharedError) -> Self {
        Self::new(builtin::UNKNOWN_CODE)
            .with_shared_cause(cause)
            .with_level(Level::Error)
            .with_http_status(INTERNAL_SERVER_ERROR)
            .with_response(ResponseMessage::resource_id(builtin::UNKNOWN_ERROR))
            .with_trace(true)
    }

    /// [`unknown`](Self::unknown) for a concrete error value
    pub fn unknown_from<E>(cause: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::unknown(Arc::new(cause))
    }

    fn from_fields(fields: Fields) -> Self {
        Self {
            fields: Arc::new(RwLock::new(fields)),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Fields> {
        self.fields.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Fields> {
        self.fields.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn with_cause<E>(self, cause: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        self.with_shared_cause(Arc::new(cause))
    }

    pub fn with_shared_cause(self, cause: SharedError) -> Self {
        self.set_cause(Some(cause));
        self
    }

    pub fn with_level(self, level: Level) -> Self {
        self.set_log_level(level);
        self
    }

    pub fn with_message(self, message: impl Into<InternalMessage>) -> Self {
        self.set_internal_message(message);
        self
    }

    pub fn with_response(self, message: impl Into<ResponseMessage>) -> Self {
        self.set_response_message(message);
        self
    }

    pub fn with_http_status(self, status: u16) -> Self {
        self.set_http_status(status);
        self
    }

    pub fn with_trace(self, needs_trace: bool) -> Self {
        self.set_needs_trace(needs_trace);
        self
    }

    /// Message for logs.
    ///
    /// Without an internal message this is the cause's message, or `"nil"`
    /// when there is no cause either. An envelope reached again while its
    /// own message is being built (a cause cycle) yields a placeholder
    /// naming its response code.
    pub fn message(&self) -> String {
        let Some(_formatting) = Formatting::enter(self) else {
            return format!("<cause cycle at {}>", self.response_code());
        };
        let (internal, cause) = {
            let fields = self.read();
            (fields.internal_message.clone(), fields.cause.clone())
        };
        let cause_ref = cause.as_deref().map(|c| c as &(dyn StdError + 'static));
        match internal.resolve(cause_ref) {
            Some(message) => message,
            None => cause_ref.map_or_else(|| "nil".to_string(), |c| c.to_string()),
        }
    }

    /// Client message for `languages`, resolved against the global catalog
    pub fn response_message(&self, languages: &[Language]) -> String {
        self.response_message_in(i18n::global(), languages)
    }

    /// Client message for `languages`, resolved against `catalog`
    pub fn response_message_in(&self, catalog: &Catalog, languages: &[Language]) -> String {
        let response = self.read().response_message.clone();
        response.resolve(catalog, languages)
    }

    pub fn response_code(&self) -> String {
        self.read().response_code.clone()
    }

    pub fn http_status(&self) -> u16 {
        self.read().http_status
    }

    pub fn log_level(&self) -> Level {
        self.read().log_level
    }

    pub fn needs_trace(&self) -> bool {
        self.read().needs_trace
    }

    /// The wrapped error, one layer down
    pub fn cause(&self) -> Option<SharedError> {
        self.read().cause.clone()
    }

    /// Whether `candidate`'s chain holds an envelope with this response code
    pub fn classifies(&self, candidate: &(dyn StdError + 'static)) -> bool {
        let code = self.response_code();
        chain::any(candidate, |layer| {
            layer
                .downcast_ref::<ErrorEnvelope>()
                .is_some_and(|other| other.read().response_code == code)
        })
    }

    /// Whether both handles alias the same fields
    pub fn ptr_eq(&self, other: &ErrorEnvelope) -> bool {
        Arc::ptr_eq(&self.fields, &other.fields)
    }

    /// An independent copy; later setters on either side are not shared
    pub fn detached(&self) -> Self {
        Self::from_fields(self.read().clone())
    }

    pub fn set_cause(&self, cause: Option<SharedError>) {
        self.write().cause = cause;
    }

    pub fn set_log_level(&self, level: Level) {
        self.write().log_level = level;
    }

    pub fn set_internal_message(&self, message: impl Into<InternalMessage>) {
        self.write().internal_message = message.into();
    }

    pub fn set_response_message(&self, message: impl Into<ResponseMessage>) {
        self.write().response_message = message.into();
    }

    pub fn set_response_code(&self, code: impl Into<String>) {
        self.write().response_code = code.into();
    }

    pub fn set_needs_trace(&self, needs_trace: bool) {
        self.write().needs_trace = needs_trace;
    }

    pub fn set_http_status(&self, status: u16) {
        self.write().http_status = status;
    }
}

impl fmt::Display for ErrorEnvelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl fmt::Debug for ErrorEnvelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields = self.read().clone();
        f.debug_struct("ErrorEnvelope")
            .field("response_code", &fields.response_code)
            .field("http_status", &fields.http_status)
            .field("log_level", &fields.log_level)
            .field("needs_trace", &fields.needs_trace)
            .field("internal_message", &fields.internal_message)
            .field("response_message", &fields.response_message)
            .field("cause", &fields.cause.as_ref().map(|c| c.to_string()))
            .finish()
    }
}

thread_local! {
    // Envelopes whose message is being built on this thread
    static FORMATTING: RefCell<Vec<usize>> = const { RefCell::new(Vec::new()) };
}

/// Marks an envelope as being formatted until dropped
struct Formatting;

impl Formatting {
    fn enter(envelope: &ErrorEnvelope) -> Option<Self> {
        let key = Arc::as_ptr(&envelope.fields) as usize;
        FORMATTING.with(|stack| {
            let mut stack = stack.borrow_mut();
            if stack.len() >= chain::MAX_DEPTH || stack.contains(&key) {
                return None;
            }
            stack.push(key);
            Some(Formatting)
        })
    }
}

impl Drop for Formatting {
    fn drop(&mut self) {
        FORMATTING.with(|stack| {
            stack.borrow_mut().pop();
        });
    }
}

// `source` stays `None`: the cause sits behind the lock and is reached
// through `chain::CausedBy`, which clones it out.
impl StdError for ErrorEnvelope {}

#[cfg(test)]
mod tests;
