//! Centralized default constants for jotter.
//!
//! Configuration loading, the connection pool and the router reference these
//! instead of defining their own literals.

// =============================================================================
// SERVER
// =============================================================================

/// Default bind address.
pub const SERVER_HOST: &str = "0.0.0.0";

/// Default listen port.
pub const SERVER_PORT: u16 = 8080;

/// Path prefix under which the notes routes are mounted.
pub const API_PREFIX: &str = "/v1";

/// Default CORS origin list.
pub const ALLOWED_ORIGINS: &str = "http://localhost:8080";

/// Maximum accepted request body, in bytes (64 KiB).
pub const MAX_BODY_BYTES: usize = 64 * 1024;

// =============================================================================
// DATABASE
// =============================================================================

/// Default Postgres host when `DATABASE_URL` is not set.
pub const POSTGRES_HOST: &str = "localhost";

/// Default Postgres port.
pub const POSTGRES_PORT: u16 = 5432;

/// Default Postgres user.
pub const POSTGRES_USER: &str = "postgres";

/// Default database name.
pub const POSTGRES_DB: &str = "jotter";

/// Default maximum number of pooled connections.
pub const DB_MAX_CONNECTIONS: u32 = 10;

/// Default pool acquire timeout in seconds.
pub const DB_CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default idle timeout in seconds.
pub const DB_IDLE_TIMEOUT_SECS: u64 = 600;

/// Maximum connection lifetime in seconds (30 minutes).
pub const DB_MAX_LIFETIME_SECS: u64 = 1800;

// =============================================================================
// LOGGING
// =============================================================================

/// Filter applied when `RUST_LOG` is unset.
pub const LOG_FILTER: &str = "jotter_api=debug,jotter_db=info,tower_http=debug";

/// File name used when `LOG_FILE` names a directory-less path.
pub const LOG_FILE_NAME: &str = "jotter-api.log";
