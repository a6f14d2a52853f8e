//! Note service: identifier hygiene on writes and error re-casting.
//!
//! The service owns one rule: a note supplied for create or update must carry
//! the unspecified ID, because IDs are assigned by storage and the request
//! path is authoritative on update. Repository failures are logged here with
//! their driver detail and re-cast to [`NoteError::Internal`], so nothing
//! storage-specific reaches the HTTP layer.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use jotter_core::{Note, NoteId, NoteRepository, UNSPECIFIED_ID};

/// Errors surfaced by [`NoteService`] operations.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteError {
    /// The supplied note carried an ID where none is allowed.
    #[error("Illegal ID")]
    IllegalId,

    /// Persistence failed for reasons opaque to the caller.
    #[error("Internal error")]
    Internal,

    /// The addressed note disappeared before the write reached storage.
    #[error("Not found")]
    NotFound,
}

/// Service configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Sentinel meaning "no ID supplied".
    pub unspecified_id: NoteId,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            unspecified_id: UNSPECIFIED_ID,
        }
    }
}

/// Business operations on notes.
#[async_trait]
pub trait NoteService: Send + Sync {
    /// All notes.
    async fn list(&self) -> Result<Vec<Note>, NoteError>;

    /// One note, `None` if absent.
    async fn get_by_id(&self, id: NoteId) -> Result<Option<Note>, NoteError>;

    /// Whether note `id` exists.
    async fn exists(&self, id: NoteId) -> Result<bool, NoteError>;

    /// Create a note and return its assigned ID.
    async fn create(&self, note: Note) -> Result<NoteId, NoteError>;

    /// Replace title and content of note `id`.
    async fn update(&self, id: NoteId, note: Note) -> Result<NoteId, NoteError>;

    /// Delete note `id`; `Ok(false)` when there was nothing to delete.
    async fn delete(&self, id: NoteId) -> Result<bool, NoteError>;
}

/// [`NoteService`] backed by a [`NoteRepository`].
#[derive(Clone)]
pub struct DefaultNoteService {
    repo: Arc<dyn NoteRepository>,
    config: ServiceConfig,
}

impl DefaultNoteService {
    /// Create a service with the default configuration.
    pub fn new(repo: Arc<dyn NoteRepository>) -> Self {
        Self::with_config(repo, ServiceConfig::default())
    }

    pub fn with_config(repo: Arc<dyn NoteRepository>, config: ServiceConfig) -> Self {
        Self { repo, config }
    }

    fn ensure_unspecified(&self, op: &'static str, note: &Note) -> Result<(), NoteError> {
        if note.id != self.config.unspecified_id {
            warn!(
                subsystem = "service",
                component = "notes",
                op,
                supplied_id = note.id,
                "Rejected note carrying an ID"
            );
            return Err(NoteError::IllegalId);
        }
        Ok(())
    }
}

/// Log a repository failure and collapse it to [`NoteError::Internal`].
fn internal(op: &'static str, err: jotter_core::Error) -> NoteError {
    error!(
        subsystem = "service",
        component = "notes",
        op,
        error = %err,
        "Repository operation failed"
    );
    NoteError::Internal
}

#[async_trait]
impl NoteService for DefaultNoteService {
    async fn list(&self) -> Result<Vec<Note>, NoteError> {
        self.repo.list().await.map_err(|e| internal("list", e))
    }

    async fn get_by_id(&self, id: NoteId) -> Result<Option<Note>, NoteError> {
        self.repo.fetch(id).await.map_err(|e| internal("fetch", e))
    }

    async fn exists(&self, id: NoteId) -> Result<bool, NoteError> {
        self.repo.exists(id).await.map_err(|e| internal("exists", e))
    }

    async fn create(&self, note: Note) -> Result<NoteId, NoteError> {
        self.ensure_unspecified("create", &note)?;

        let id = self
            .repo
            .insert(&note)
            .await
            .map_err(|e| internal("create", e))?;

        info!(
            subsystem = "service",
            component = "notes",
            op = "create",
            note_id = id,
            "Note created"
        );
        Ok(id)
    }

    async fn update(&self, id: NoteId, note: Note) -> Result<NoteId, NoteError> {
        self.ensure_unspecified("update", &note)?;

        match self
            .repo
            .update(id, &note)
            .await
            .map_err(|e| internal("update", e))?
        {
            Some(updated) => {
                info!(
                    subsystem = "service",
                    component = "notes",
                    op = "update",
                    note_id = updated,
                    "Note updated"
                );
                Ok(updated)
            }
            None => {
                debug!(
                    subsystem = "service",
                    component = "notes",
                    op = "update",
                    note_id = id,
                    "No row to update"
                );
                Err(NoteError::NotFound)
            }
        }
    }

    async fn delete(&self, id: NoteId) -> Result<bool, NoteError> {
        let deleted = self
            .repo
            .delete(id)
            .await
            .map_err(|e| internal("delete", e))?;
        if deleted {
            info!(
                subsystem = "service",
                component = "notes",
                op = "delete",
                note_id = id,
                "Note deleted"
            );
        }
        Ok(deleted)
    }
}
