//! Core data models for jotter.
//!
//! These types are shared across all jotter crates and represent
//! the core domain entities.

use serde::{Deserialize, Deserializer, Serialize};

// =============================================================================
// NOTE TYPES
// =============================================================================

/// Identifier of a persisted note.
pub type NoteId = u64;

/// Sentinel id meaning "no id supplied".
///
/// Persisted notes never carry this value; clients must send it (or omit the
/// field) on create and update.
pub const UNSPECIFIED_ID: NoteId = 0;

/// A short textual note.
///
/// Every field defaults when absent or `null` in a request body, so
/// `{"title":"t","id":null}` decodes to a note with the sentinel id and
/// empty content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Note {
    #[serde(deserialize_with = "null_as_default")]
    pub id: NoteId,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub content: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Note {
    /// Build a note that has not been persisted yet.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: UNSPECIFIED_ID,
            title: title.into(),
            content: content.into(),
        }
    }

    /// Copy of this note carrying `id`.
    pub fn with_id(&self, id: NoteId) -> Self {
        Self {
            id,
            title: self.title.clone(),
            content: self.content.clone(),
        }
    }
}

// =============================================================================
// RESPONSE TYPES
// =============================================================================

/// Uniform `{status, message}` body used by writes and by every error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: u16,
    pub message: String,
}

impl ApiResponse {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// The `200 Success` envelope returned by successful writes.
    pub fn success() -> Self {
        Self::new(200, "Success")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_serializes_lowercase_fields() {
        let note = Note {
            id: 7,
            title: "t".to_string(),
            content: "c".to_string(),
        };
        let json = serde_json::to_value(&note).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": 7, "title": "t", "content": "c"})
        );
    }

    #[test]
    fn test_note_missing_fields_default() {
        let note: Note = serde_json::from_str(r#"{"title":"t","content":"c"}"#).unwrap();
        assert_eq!(note.id, UNSPECIFIED_ID);
        assert_eq!(note.title, "t");

        let empty: Note = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, Note::default());
    }

    #[test]
    fn test_note_null_fields_default() {
        let note: Note =
            serde_json::from_str(r#"{"id":null,"title":null,"content":"c"}"#).unwrap();
        assert_eq!(note, Note::new("", "c"));
    }

    #[test]
    fn test_note_ignores_unknown_fields() {
        let note: Note =
            serde_json::from_str(r#"{"title":"t","content":"c","pinned":true}"#).unwrap();
        assert_eq!(note, Note::new("t", "c"));
    }

    #[test]
    fn test_note_rejects_negative_id() {
        let result = serde_json::from_str::<Note>(r#"{"id":-1,"title":"t"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_note_rejects_wrong_field_type() {
        assert!(serde_json::from_str::<Note>(r#"{"title":5}"#).is_err());
        assert!(serde_json::from_str::<Note>(r#"{"id":"1"}"#).is_err());
    }

    #[test]
    fn test_with_id_preserves_text() {
        let note = Note::new("title", "content").with_id(42);
        assert_eq!(note.id, 42);
        assert_eq!(note.title, "title");
        assert_eq!(note.content, "content");
    }

    #[test]
    fn test_success_envelope() {
        let json = serde_json::to_string(&ApiResponse::success()).unwrap();
        assert_eq!(json, r#"{"status":200,"message":"Success"}"#);
    }
}
