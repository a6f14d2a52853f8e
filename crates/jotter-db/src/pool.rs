//! Database connection pool management.

use std::time::{Duration, Instant};

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::{debug, info, warn};

use jotter_core::defaults::{
    DB_CONNECT_TIMEOUT_SECS, DB_IDLE_TIMEOUT_SECS, DB_MAX_CONNECTIONS, DB_MAX_LIFETIME_SECS,
};
use jotter_core::{Error, Result};

/// Connection pool settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolConfig {
    pub max_connections: u32,
    pub min_connections: u32,
    /// Acquire timeout; the only timeout callers observe.
    pub connect_timeout: Duration,
    /// `None` keeps connections for the life of the pool.
    pub max_lifetime: Option<Duration>,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_connections: DB_MAX_CONNECTIONS,
            min_connections: 1,
            connect_timeout: Duration::from_secs(DB_CONNECT_TIMEOUT_SECS),
            max_lifetime: Some(Duration::from_secs(DB_MAX_LIFETIME_SECS)),
        }
    }
}

impl PoolConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_connections(mut self, n: u32) -> Self {
        self.max_connections = n;
        self
    }

    pub fn min_connections(mut self, n: u32) -> Self {
        self.min_connections = n;
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn max_lifetime(mut self, lifetime: Option<Duration>) -> Self {
        self.max_lifetime = lifetime;
        self
    }

    fn options(&self) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(self.min_connections.min(self.max_connections))
            .acquire_timeout(self.connect_timeout)
            .idle_timeout(Duration::from_secs(DB_IDLE_TIMEOUT_SECS))
            .max_lifetime(self.max_lifetime)
    }

    /// Open a pool against `database_url`, failing if no connection can be
    /// established within the acquire timeout.
    pub async fn connect(&self, database_url: &str) -> Result<PgPool> {
        let start = Instant::now();
        info!(
            subsystem = "database",
            component = "pool",
            op = "create",
            max_connections = self.max_connections,
            connect_timeout_secs = self.connect_timeout.as_secs(),
            "Creating database connection pool"
        );

        let pool = self
            .options()
            .connect(database_url)
            .await
            .map_err(Error::Database)?;

        info!(
            subsystem = "database",
            component = "pool",
            op = "established",
            pool_size = pool.size(),
            pool_idle = pool.num_idle(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Database connection pool established"
        );
        Ok(pool)
    }
}

/// Log pool occupancy, warning when every connection is checked out.
pub fn log_pool_metrics(pool: &PgPool) {
    let size = pool.size();
    let idle = pool.num_idle();

    debug!(
        subsystem = "database",
        component = "pool",
        op = "metrics",
        pool_size = size,
        pool_idle = idle,
        "Pool health check"
    );

    if idle == 0 && size > 0 {
        warn!(
            subsystem = "database",
            component = "pool",
            pool_size = size,
            "Connection pool has no idle connections"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_uses_shared_defaults() {
        let config = PoolConfig::default();
        assert_eq!(config.max_connections, DB_MAX_CONNECTIONS);
        assert_eq!(config.min_connections, 1);
        assert_eq!(
            config.connect_timeout,
            Duration::from_secs(DB_CONNECT_TIMEOUT_SECS)
        );
        assert_eq!(
            config.max_lifetime,
            Some(Duration::from_secs(DB_MAX_LIFETIME_SECS))
        );
    }

    #[test]
    fn test_single_connection_config() {
        let config = PoolConfig::new()
            .max_connections(1)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(5))
            .max_lifetime(None);

        assert_eq!(config.max_connections, 1);
        assert_eq!(config.min_connections, 1);
        assert_eq!(config.connect_timeout, Duration::from_secs(5));
        assert_eq!(config.max_lifetime, None);
    }

    #[test]
    fn test_options_clamp_min_to_max() {
        let options = PoolConfig::new().max_connections(2).min_connections(8).options();
        assert_eq!(options.get_max_connections(), 2);
        assert_eq!(options.get_min_connections(), 2);
    }
}
