//! In-memory note repository.
//!
//! Same contract as [`PgNoteRepository`](crate::PgNoteRepository): IDs start
//! at 1, are never reused, and listing is ordered by ID. Used by tests and by
//! callers that want a database-free service.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use jotter_core::{HealthCheck, Note, NoteId, NoteRepository, Result};

#[derive(Debug, Default)]
struct Inner {
    notes: BTreeMap<NoteId, Note>,
    last_id: NoteId,
}

/// Note repository backed by a `BTreeMap`.
#[derive(Debug, Default)]
pub struct MemoryNoteRepository {
    inner: RwLock<Inner>,
}

impl MemoryNoteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored notes.
    pub async fn len(&self) -> usize {
        self.inner.read().await.notes.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl NoteRepository for MemoryNoteRepository {
    async fn list(&self) -> Result<Vec<Note>> {
        Ok(self.inner.read().await.notes.values().cloned().collect())
    }

    async fn fetch(&self, id: NoteId) -> Result<Option<Note>> {
        Ok(self.inner.read().await.notes.get(&id).cloned())
    }

    async fn insert(&self, note: &Note) -> Result<NoteId> {
        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        let id = inner.last_id;
        inner.notes.insert(id, note.with_id(id));
        Ok(id)
    }

    async fn update(&self, id: NoteId, note: &Note) -> Result<Option<NoteId>> {
        let mut inner = self.inner.write().await;
        match inner.notes.get_mut(&id) {
            Some(stored) => {
                *stored = note.with_id(id);
                Ok(Some(id))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: NoteId) -> Result<bool> {
        Ok(self.inner.write().await.notes.remove(&id).is_some())
    }

    async fn exists(&self, id: NoteId) -> Result<bool> {
        Ok(self.inner.read().await.notes.contains_key(&id))
    }
}

#[async_trait]
impl HealthCheck for MemoryNoteRepository {
    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_repository_lists_nothing() {
        let repo = MemoryNoteRepository::new();
        assert!(repo.list().await.unwrap().is_empty());
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn test_insert_assigns_ids_from_one() {
        let repo = MemoryNoteRepository::new();
        let first = repo.insert(&Note::new("a", "1")).await.unwrap();
        let second = repo.insert(&Note::new("b", "2")).await.unwrap();
        assert_eq!(first, 1);
        assert_eq!(second, 2);
    }

    #[tokio::test]
    async fn test_insert_ignores_supplied_id() {
        let repo = MemoryNoteRepository::new();
        let id = repo.insert(&Note::new("a", "1").with_id(99)).await.unwrap();
        assert_eq!(id, 1);
        assert!(repo.fetch(99).await.unwrap().is_none());
        assert_eq!(repo.fetch(1).await.unwrap().unwrap().id, 1);
    }

    #[tokio::test]
    async fn test_fetch_round_trip() {
        let repo = MemoryNoteRepository::new();
        let note = Note::new("title", "content");
        let id = repo.insert(&note).await.unwrap();
        assert_eq!(repo.fetch(id).await.unwrap(), Some(note.with_id(id)));
    }

    #[tokio::test]
    async fn test_update_preserves_id() {
        let repo = MemoryNoteRepository::new();
        let id = repo.insert(&Note::new("old", "old")).await.unwrap();

        let updated = repo.update(id, &Note::new("new", "body")).await.unwrap();
        assert_eq!(updated, Some(id));

        let stored = repo.fetch(id).await.unwrap().unwrap();
        assert_eq!(stored, Note::new("new", "body").with_id(id));
    }

    #[tokio::test]
    async fn test_update_missing_row_reports_none() {
        let repo = MemoryNoteRepository::new();
        assert_eq!(repo.update(5, &Note::new("x", "y")).await.unwrap(), None);
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn test_delete_reports_whether_removed() {
        let repo = MemoryNoteRepository::new();
        let id = repo.insert(&Note::new("a", "b")).await.unwrap();

        assert!(repo.delete(id).await.unwrap());
        assert!(!repo.exists(id).await.unwrap());
        assert!(!repo.delete(id).await.unwrap());
    }

    #[tokio::test]
    async fn test_ids_not_reused_after_delete() {
        let repo = MemoryNoteRepository::new();
        let first = repo.insert(&Note::new("a", "b")).await.unwrap();
        repo.delete(first).await.unwrap();
        let second = repo.insert(&Note::new("c", "d")).await.unwrap();
        assert!(second > first);
    }

    #[tokio::test]
    async fn test_list_ordered_by_id() {
        let repo = MemoryNoteRepository::new();
        for title in ["a", "b", "c"] {
            repo.insert(&Note::new(title, "")).await.unwrap();
        }
        let ids: Vec<NoteId> = repo.list().await.unwrap().iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_sentinel_id_is_never_stored() {
        let repo = MemoryNoteRepository::new();
        repo.insert(&Note::new("a", "b")).await.unwrap();

        assert!(!repo.exists(0).await.unwrap());
        assert!(repo.fetch(0).await.unwrap().is_none());
        assert_eq!(repo.update(0, &Note::new("x", "y")).await.unwrap(), None);
        assert!(!repo.delete(0).await.unwrap());
    }
}
