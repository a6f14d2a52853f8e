//! Note HTTP handlers.
//!
//! Each handler parses its input, pre-checks existence where an ID is
//! addressed, delegates to the [`NoteService`](crate::services::NoteService)
//! and maps the outcome to a status and body. Reads return the note itself;
//! writes return the `{status, message}` envelope.

use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use tracing::{debug, error, warn};

use crate::error::{ApiError, CREATE_ILLEGAL_ID, UPDATE_ILLEGAL_ID};
use crate::AppState;
use jotter_core::{ApiResponse, Note, NoteId};

/// Parse the `{id}` path segment as a non-negative integer.
///
/// Only plain ASCII digits are accepted; signs, whitespace, and out-of-range
/// values are all [`ApiError::InvalidId`].
pub fn parse_note_id(raw: &str) -> Result<NoteId, ApiError> {
    let digits_only = !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit());
    let parsed = if digits_only {
        raw.parse::<NoteId>().ok()
    } else {
        None
    };
    parsed.ok_or_else(|| {
        warn!(
            subsystem = "api",
            component = "notes",
            raw_id = raw,
            "Rejected malformed note ID"
        );
        ApiError::InvalidId
    })
}

fn path_id(path: Result<Path<String>, PathRejection>) -> Result<NoteId, ApiError> {
    let Path(raw) = path.map_err(|_| ApiError::InvalidId)?;
    parse_note_id(&raw)
}

/// Decode a note from the raw body. The content type is not consulted.
fn json_body(body: Result<Bytes, BytesRejection>) -> Result<Note, ApiError> {
    let bytes = body.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge
        } else {
            ApiError::InvalidBody
        }
    })?;

    serde_json::from_slice::<Note>(&bytes).map_err(|e| {
        warn!(
            subsystem = "api",
            component = "notes",
            error = %e,
            "Rejected malformed request body"
        );
        ApiError::InvalidBody
    })
}

/// Fail with 404 unless note `id` exists.
async fn require_existing(state: &AppState, id: NoteId) -> Result<(), ApiError> {
    if state.notes.exists(id).await? {
        Ok(())
    } else {
        debug!(
            subsystem = "api",
            component = "notes",
            note_id = id,
            "Note not found"
        );
        Err(ApiError::NotFound)
    }
}

/// List every note.
///
/// # Returns
/// - 200 OK with an array of notes (possibly empty)
/// - 500 Internal Server Error if storage fails
pub async fn list_notes(State(state): State<AppState>) -> Result<Json<Vec<Note>>, ApiError> {
    let notes = state.notes.list().await?;
    Ok(Json(notes))
}

/// Get a single note.
///
/// # Returns
/// - 200 OK with the note
/// - 400 Bad Request "Invalid ID" if the path segment is not a valid ID
/// - 404 Not Found if no such note exists
pub async fn get_note(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<Note>, ApiError> {
    let id = path_id(path)?;
    let note = state.notes.get_by_id(id).await?.ok_or_else(|| {
        debug!(
            subsystem = "api",
            component = "notes",
            note_id = id,
            "Note not found"
        );
        ApiError::NotFound
    })?;
    Ok(Json(note))
}

/// Create a note. The body must not carry an ID.
///
/// # Returns
/// - 200 OK with the success envelope
/// - 400 Bad Request "Invalid request body" / "ID must not be specified"
/// - 500 Internal Server Error "Unexpected error"
pub async fn create_note(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<ApiResponse>, ApiError> {
    let note = json_body(body)?;
    state
        .notes
        .create(note)
        .await
        .map_err(|e| ApiError::from_write(e, CREATE_ILLEGAL_ID))?;
    Ok(Json(ApiResponse::success()))
}

/// Replace a note's title and content. The path ID is authoritative; the
/// body must not carry an ID.
///
/// # Returns
/// - 200 OK with the success envelope
/// - 400 Bad Request "Invalid ID" / "Invalid request body" / "Illegal ID in request body"
/// - 404 Not Found if no such note exists
/// - 500 Internal Server Error "Unexpected error"
pub async fn update_note(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<ApiResponse>, ApiError> {
    let id = path_id(path)?;
    let note = json_body(body)?;
    require_existing(&state, id).await?;

    state
        .notes
        .update(id, note)
        .await
        .map_err(|e| ApiError::from_write(e, UPDATE_ILLEGAL_ID))?;
    Ok(Json(ApiResponse::success()))
}

/// Delete a note.
///
/// # Returns
/// - 200 OK with the success envelope
/// - 400 Bad Request "Invalid ID"
/// - 404 Not Found if no such note exists
/// - 500 Internal Server Error "Unexpected error", including when the note
///   vanished between the existence check and the delete
pub async fn delete_note(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<ApiResponse>, ApiError> {
    let id = path_id(path)?;
    require_existing(&state, id).await?;

    if !state.notes.delete(id).await? {
        error!(
            subsystem = "api",
            component = "notes",
            op = "delete",
            note_id = id,
            "Delete removed nothing after existence check"
        );
        return Err(ApiError::Internal);
    }
    Ok(Json(ApiResponse::success()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_note_id_accepts_u64_range() {
        assert_eq!(parse_note_id("0"), Ok(0));
        assert_eq!(parse_note_id("42"), Ok(42));
        assert_eq!(parse_note_id("18446744073709551615"), Ok(u64::MAX));
    }

    #[test]
    fn test_parse_note_id_allows_leading_zeros() {
        assert_eq!(parse_note_id("007"), Ok(7));
    }

    #[test]
    fn test_json_body_ignores_content_type() {
        let note = json_body(Ok(Bytes::from_static(br#"{"title":"t","content":"c"}"#)));
        assert_eq!(note, Ok(Note::new("t", "c")));
    }

    #[test]
    fn test_json_body_rejects_malformed() {
        for raw in ["not json", "", r#"{"title": 5}"#, r#"{"id": -1}"#] {
            assert_eq!(
                json_body(Ok(Bytes::copy_from_slice(raw.as_bytes()))),
                Err(ApiError::InvalidBody)
            );
        }
    }

    #[test]
    fn test_parse_note_id_rejects_malformed() {
        for raw in [
            "xxx",
            "",
            "-1",
            "+1",
            "1.5",
            " 1",
            "1 ",
            "18446744073709551616",
            "0x10",
        ] {
            assert_eq!(parse_note_id(raw), Err(ApiError::InvalidId), "{:?}", raw);
        }
    }
}
