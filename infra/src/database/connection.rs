//! MySQL pool shared by the user and verification code stores.

use std::str::FromStr;
use std::time::Duration;

use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions};
use sqlx::{ConnectOptions, MySqlPool};
use tracing::log::LevelFilter;

use sepm_shared::config::DatabaseConfig;

use super::mysql::{MySqlUserRepository, MySqlVerificationCodeRepository};
use crate::InfrastructureError;

const SLOW_STATEMENT: Duration = Duration::from_millis(500);

/// Owns the connection pool for the lifetime of the server.
///
/// Both stores are handed clones of the same pool, so they share the
/// acquire timeout that bounds every storage call.
#[derive(Clone)]
pub struct DatabasePool {
    pool: MySqlPool,
    config: DatabaseConfig,
}

impl DatabasePool {
    /// Open the pool and prove it with one round trip
    ///
    /// ```no_run
    /// use sepm_infra::database::DatabasePool;
    /// use sepm_shared::config::DatabaseConfig;
    ///
    /// # async fn open() -> Result<(), sepm_infra::InfrastructureError> {
    /// let db = DatabasePool::new(DatabaseConfig::new("mysql://root@localhost/sepm")).await?;
    /// db.run_migrations().await?;
    /// let users = db.user_repository();
    /// # Ok(())
    /// # }
    /// ```
    pub async fn new(config: DatabaseConfig) -> Result<Self, InfrastructureError> {
        let options = MySqlConnectOptions::from_str(&config.url)
            .map_err(|e| InfrastructureError::Config(format!("DATABASE_URL is not usable: {}", e)))?
            .log_statements(LevelFilter::Trace)
            .log_slow_statements(LevelFilter::Warn, SLOW_STATEMENT);

        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout))
            .idle_timeout(Duration::from_secs(config.idle_timeout))
            .max_lifetime(Duration::from_secs(config.max_lifetime))
            .connect_with(options)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, event = "db_connect_failed", "Cannot reach MySQL");
                InfrastructureError::Database(e)
            })?;

        tracing::info!(
            max_connections = config.max_connections,
            acquire_timeout_seconds = config.connect_timeout,
            event = "db_pool_ready",
            "MySQL pool opened"
        );

        Ok(Self { pool, config })
    }

    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    pub fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    pub fn user_repository(&self) -> MySqlUserRepository {
        MySqlUserRepository::new(self.pool.clone())
    }

    pub fn verification_code_repository(&self) -> MySqlVerificationCodeRepository {
        MySqlVerificationCodeRepository::new(self.pool.clone())
    }

    /// `SELECT 1` through the pool
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        let one: i64 = sqlx::query_scalar("SELECT 1").fetch_one(&self.pool).await?;
        Ok(one == 1)
    }

    pub fn statistics(&self) -> PoolStatistics {
        PoolStatistics {
            connections: self.pool.size(),
            idle_connections: self.pool.num_idle(),
            max_connections: self.config.max_connections,
        }
    }

    /// Create or upgrade the `users` and `verification_codes` tables
    pub async fn run_migrations(&self) -> Result<(), InfrastructureError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        tracing::info!(event = "db_migrated", "Schema is up to date");
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!(event = "db_pool_closed", "MySQL pool closed");
    }
}

/// Snapshot of pool occupancy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolStatistics {
    pub connections: u32,
    pub idle_connections: usize,
    pub max_connections: u32,
}

impl std::fmt::Display for PoolStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{} connections ({} idle)",
            self.connections, self.max_connections, self.idle_connections
        )
    }
}
