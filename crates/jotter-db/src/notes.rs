//! Note repository implementation.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{Pool, Postgres, Row};
use tracing::{debug, info};

use jotter_core::{Error, HealthCheck, Note, NoteId, NoteRepository, Result};

/// PostgreSQL implementation of NoteRepository.
#[derive(Clone)]
pub struct PgNoteRepository {
    pool: Pool<Postgres>,
}

impl PgNoteRepository {
    /// Create a new PgNoteRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Map a note ID onto the BIGINT key column.
    ///
    /// IDs above `i64::MAX` cannot exist in the table.
    fn storage_id(id: NoteId) -> Option<i64> {
        i64::try_from(id).ok()
    }

    fn note_from_row(row: &PgRow) -> Result<Note> {
        let raw_id: i64 = row.try_get("id").map_err(Error::Database)?;
        let id = NoteId::try_from(raw_id)
            .map_err(|_| Error::Internal(format!("negative note id in storage: {}", raw_id)))?;
        Ok(Note {
            id,
            title: row.try_get("title").map_err(Error::Database)?,
            content: row.try_get("content").map_err(Error::Database)?,
        })
    }
}

#[async_trait]
impl NoteRepository for PgNoteRepository {
    async fn list(&self) -> Result<Vec<Note>> {
        let rows = sqlx::query("SELECT id, title, content FROM notes ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;

        let notes = rows
            .iter()
            .map(Self::note_from_row)
            .collect::<Result<Vec<_>>>()?;

        debug!(
            subsystem = "database",
            component = "notes",
            op = "list",
            result_count = notes.len(),
            "Listed notes"
        );
        Ok(notes)
    }

    async fn fetch(&self, id: NoteId) -> Result<Option<Note>> {
        let Some(key) = Self::storage_id(id) else {
            return Ok(None);
        };

        let row = sqlx::query("SELECT id, title, content FROM notes WHERE id = $1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?;

        debug!(
            subsystem = "database",
            component = "notes",
            op = "fetch",
            note_id = id,
            found = row.is_some(),
            "Fetched note"
        );
        row.as_ref().map(Self::note_from_row).transpose()
    }

    async fn insert(&self, note: &Note) -> Result<NoteId> {
        let raw_id: i64 =
            sqlx::query_scalar("INSERT INTO notes (title, content) VALUES ($1, $2) RETURNING id")
                .bind(&note.title)
                .bind(&note.content)
                .fetch_one(&self.pool)
                .await
                .map_err(Error::Database)?;

        let id = NoteId::try_from(raw_id)
            .map_err(|_| Error::Internal(format!("negative note id assigned: {}", raw_id)))?;

        info!(
            subsystem = "database",
            component = "notes",
            op = "insert",
            note_id = id,
            "Inserted note"
        );
        Ok(id)
    }

    async fn update(&self, id: NoteId, note: &Note) -> Result<Option<NoteId>> {
        let Some(key) = Self::storage_id(id) else {
            return Ok(None);
        };

        let result = sqlx::query("UPDATE notes SET title = $1, content = $2 WHERE id = $3")
            .bind(&note.title)
            .bind(&note.content)
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        let updated = result.rows_affected() > 0;
        info!(
            subsystem = "database",
            component = "notes",
            op = "update",
            note_id = id,
            success = updated,
            "Updated note"
        );
        Ok(updated.then_some(id))
    }

    async fn delete(&self, id: NoteId) -> Result<bool> {
        let Some(key) = Self::storage_id(id) else {
            return Ok(false);
        };

        let result = sqlx::query("DELETE FROM notes WHERE id = $1")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        let deleted = result.rows_affected() > 0;
        info!(
            subsystem = "database",
            component = "notes",
            op = "delete",
            note_id = id,
            success = deleted,
            "Deleted note"
        );
        Ok(deleted)
    }

    async fn exists(&self, id: NoteId) -> Result<bool> {
        let Some(key) = Self::storage_id(id) else {
            return Ok(false);
        };

        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM notes WHERE id = $1)")
            .bind(key)
            .fetch_one(&self.pool)
            .await
            .map_err(Error::Database)?;
        Ok(exists)
    }
}

#[async_trait]
impl HealthCheck for PgNoteRepository {
    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_id_in_range() {
        assert_eq!(PgNoteRepository::storage_id(1), Some(1));
        assert_eq!(
            PgNoteRepository::storage_id(i64::MAX as u64),
            Some(i64::MAX)
        );
    }

    #[test]
    fn test_storage_id_out_of_range() {
        assert_eq!(PgNoteRepository::storage_id(i64::MAX as u64 + 1), None);
        assert_eq!(PgNoteRepository::storage_id(u64::MAX), None);
    }
}
