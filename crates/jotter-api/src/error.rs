//! HTTP error mapping.
//!
//! Every failure leaves the API as the `{status, message}` envelope. The
//! response classes are fixed: malformed input and illegal IDs are 400, a
//! missing note is 404, an oversized body is 413, anything opaque is 500.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::services::NoteError;
use jotter_core::ApiResponse;

/// Message used when create receives a note carrying an ID.
pub const CREATE_ILLEGAL_ID: &str = "ID must not be specified";

/// Message used when update receives a body carrying an ID.
pub const UPDATE_ILLEGAL_ID: &str = "Illegal ID in request body";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Invalid ID")]
    InvalidId,

    #[error("Invalid request body")]
    InvalidBody,

    #[error("Not found")]
    NotFound,

    #[error("Request body too large")]
    PayloadTooLarge,

    /// Carries the operation-specific message.
    #[error("{0}")]
    IllegalId(&'static str),

    #[error("Unexpected error")]
    Internal,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidId | ApiError::InvalidBody | ApiError::IllegalId(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Map a service error from a write path, using `illegal_id_message`
    /// for [`NoteError::IllegalId`].
    pub fn from_write(err: NoteError, illegal_id_message: &'static str) -> Self {
        match err {
            NoteError::IllegalId => ApiError::IllegalId(illegal_id_message),
            NoteError::NotFound => ApiError::NotFound,
            NoteError::Internal => ApiError::Internal,
        }
    }
}

/// Read paths never produce `IllegalId`; the generic message covers it anyway.
impl From<NoteError> for ApiError {
    fn from(err: NoteError) -> Self {
        ApiError::from_write(err, UPDATE_ILLEGAL_ID)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(ApiResponse::new(status.as_u16(), self.to_string()));
        (status, body).into_response()
    }
}
