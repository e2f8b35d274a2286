// Library exports for testing and external use

pub mod app;
pub mod handlers;
pub mod i18n;
pub mod logging;
pub mod middleware;
pub mod routes;

pub use handlers::{log_error, render_error, ApiError};
pub use i18n::extract_languages;
pub use middleware::ErrorHandlerMiddleware;
