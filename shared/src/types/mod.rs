//! Type definitions shared by the core and api crates
//!
//! - `language` - Weighted language preferences and Accept-Language parsing
//! - `level` - Log severity carried by error envelopes
//! - `response` - Client-facing error payload

pub mod language;
pub mod level;
pub mod response;

pub use language::{parse_accept_language, Language};
pub use level::Level;
pub use response::ErrorResponse;
