pub mod error;

pub use error::{log_error, render_error, ApiError};
