//! Client-facing error payload

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body written to the client for a rendered error
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Stable machine-readable error code
    pub code: String,

    /// Localized, client-safe message
    pub message: String,

    /// Cause chain, only present when detail exposure is enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<Vec<String>>,

    /// Request ID for correlating with server logs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,

    /// Timestamp when the error was rendered
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            detail: None,
            request_id: None,
            timestamp: Utc::now(),
        }
    }

    /// Attach the rendered cause chain
    pub fn with_detail(mut self, detail: Vec<String>) -> Self {
        self.detail = Some(detail);
        self
    }

    /// Add request ID for tracing
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_fields_are_skipped() {
        let body = serde_json::to_value(ErrorResponse::new("error.x", "boom")).unwrap();
        assert_eq!(body["code"], "error.x");
        assert_eq!(body["message"], "boom");
        assert!(body.get("detail").is_none());
        assert!(body.get("request_id").is_none());
    }

    #[test]
    fn test_detail_and_request_id() {
        let response = ErrorResponse::new("error.x", "boom")
            .with_detail(vec!["outer".into(), "inner".into()])
            .with_request_id("req-1");
        let body = serde_json::to_value(&response).unwrap();
        assert_eq!(body["detail"][1], "inner");
        assert_eq!(body["request_id"], "req-1");
    }
}
