//! What the rendering boundary needs from an error

use std::error::Error as StdError;

use lr_shared::types::{Language, Level};
use serde::Serialize;

use super::annotate::get_envelope;
use super::ErrorEnvelope;
use crate::i18n::{self, Catalog};

/// Client-facing resolution of an error
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedResponse {
    pub code: String,
    pub http_status: u16,
    pub message: String,
}

/// How an error should be logged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogDirective {
    pub level: Level,
    /// Include the full cause chain; the transport may still force this on
    pub verbose: bool,
}

impl LogDirective {
    /// Same directive, verbose if `force` is set
    pub fn force_verbose(self, force: bool) -> Self {
        Self {
            verbose: self.verbose || force,
            ..self
        }
    }
}

impl ErrorEnvelope {
    pub fn resolve_response_in(&self, catalog: &Catalog, languages: &[Language]) -> ResolvedResponse {
        ResolvedResponse {
            code: self.response_code(),
            http_status: self.http_status(),
            message: self.response_message_in(catalog, languages),
        }
    }

    pub fn log_directive(&self) -> LogDirective {
        LogDirective {
            level: self.log_level(),
            verbose: self.needs_trace(),
        }
    }
}

/// Code, status and localized message of the closest envelope in `err`
pub fn resolve_response(err: &(dyn StdError + 'static), languages: &[Language]) -> ResolvedResponse {
    resolve_response_in(i18n::global(), err, languages)
}

/// [`resolve_response`] against an explicit catalog
pub fn resolve_response_in(
    catalog: &Catalog,
    err: &(dyn StdError + 'static),
    languages: &[Language],
) -> ResolvedResponse {
    get_envelope(err).resolve_response_in(catalog, languages)
}

/// Level and default verbosity for logging `err`
pub fn resolve_logging(err: &(dyn StdError + 'static)) -> LogDirective {
    get_envelope(err).log_directive()
}
