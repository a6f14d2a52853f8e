//! HTTP handlers for jotter-api.

pub mod health;
pub mod notes;

use crate::error::ApiError;

/// Catch-all for unmatched routes.
pub async fn fallback() -> ApiError {
    ApiError::NotFound
}
