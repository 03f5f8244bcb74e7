//! Utility module - shared helpers and types
//!
//! - [`AppError`] / [`AppResult`] - application error handling
//! - [`logger`] - tracing setup
//! - [`time`] - business-timezone day boundary helpers
//! - [`validation`] - text/range validation helpers
//! - [`ids`] - snowflake ID generation

pub mod error;
pub mod ids;
pub mod logger;
pub mod result;
pub mod time;
pub mod validation;

pub use error::{AppError, ErrorBody};
pub use result::AppResult;
