//! Core traits for jotter abstractions.
//!
//! These traits define the interfaces that concrete implementations
//! must satisfy, enabling pluggable backends and testability.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Note, NoteId};

// =============================================================================
// NOTE REPOSITORY TRAITS
// =============================================================================

/// Repository for note CRUD operations.
///
/// Pure persistence primitives. Absence is reported as `None`/`false`, never
/// as an error; `Err` means the storage operation itself failed.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// List every note. Ordering is implementation-defined.
    async fn list(&self) -> Result<Vec<Note>>;

    /// Fetch a note by ID, `None` if no such note exists.
    async fn fetch(&self, id: NoteId) -> Result<Option<Note>>;

    /// Insert a new note and return its freshly assigned ID.
    ///
    /// The `id` carried by `note` is ignored.
    async fn insert(&self, note: &Note) -> Result<NoteId>;

    /// Replace title and content of note `id`.
    ///
    /// Returns `None` when no row was affected.
    async fn update(&self, id: NoteId, note: &Note) -> Result<Option<NoteId>>;

    /// Delete note `id`. Returns `true` only if a row was removed.
    async fn delete(&self, id: NoteId) -> Result<bool>;

    /// Check if a note exists.
    async fn exists(&self, id: NoteId) -> Result<bool>;
}

/// Liveness probe for a storage backend.
#[async_trait]
pub trait HealthCheck: Send + Sync {
    /// Round-trip to the backend.
    async fn ping(&self) -> Result<()>;
}
