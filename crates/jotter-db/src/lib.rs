//! # jotter-db
//!
//! PostgreSQL database layer for jotter.
//!
//! This crate provides:
//! - Connection pool management
//! - The Postgres `NoteRepository` implementation
//! - An in-memory `NoteRepository` for tests and database-free setups
//! - Embedded schema migrations
//!
//! ## Example
//!
//! ```rust,ignore
//! use jotter_db::{Database, Note, NoteRepository, PoolConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect_with_config("postgres://localhost/jotter", PoolConfig::new()).await?;
//!     db.migrate().await?;
//!
//!     let id = db.notes.insert(&Note::new("Hello", "world")).await?;
//!     println!("Created note: {}", id);
//!     Ok(())
//! }
//! ```
pub mod memory;
pub mod notes;
pub mod pool;

// Test fixtures for integration tests
// Not test-gated so integration tests (in tests/) can use TestDatabase
#[cfg(feature = "migrations")]
pub mod test_fixtures;

// Re-export core types
pub use jotter_core::*;

pub use memory::MemoryNoteRepository;
pub use notes::PgNoteRepository;
pub use pool::{log_pool_metrics, PoolConfig};

/// Combined database context with all repositories.
#[derive(Clone)]
pub struct Database {
    /// The underlying connection pool.
    pub pool: sqlx::Pool<sqlx::Postgres>,
    /// Note repository for CRUD operations.
    pub notes: PgNoteRepository,
}

impl Database {
    /// Create a new Database instance from a connection pool.
    pub fn new(pool: sqlx::Pool<sqlx::Postgres>) -> Self {
        Self {
            notes: PgNoteRepository::new(pool.clone()),
            pool,
        }
    }

    /// Connect to `url` with the given pool settings.
    pub async fn connect_with_config(url: &str, config: PoolConfig) -> Result<Self> {
        let pool = config.connect(url).await?;
        Ok(Self::new(pool))
    }

    /// Run pending migrations.
    #[cfg(feature = "migrations")]
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| Error::Database(sqlx::Error::Migrate(Box::new(e))))?;
        tracing::info!(
            subsystem = "database",
            component = "migrations",
            op = "run",
            "Database schema up to date"
        );
        Ok(())
    }

    /// Close every pooled connection.
    pub async fn close(&self) {
        log_pool_metrics(&self.pool);
        self.pool.close().await;
    }
}
