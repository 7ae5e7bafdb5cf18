//! Shared types for the storefront
//!
//! Common types used by both `store-server` and `store-client`:
//! entity models, the unified error stack, and id/time utilities.

pub mod error;
pub mod models;
pub mod util;

// Re-export the error stack at the crate root
pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
