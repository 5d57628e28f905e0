//! Repository layer for database operations

pub mod books;

use std::{str::FromStr, time::Duration};

use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Pool, Sqlite,
};

use crate::{config::DatabaseConfig, error::AppResult};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Sqlite>,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Open the pool described by `config` and bring the schema up to date.
    ///
    /// An in-memory database exists only as long as its connection does, so it
    /// is pinned to a single connection that is never recycled. That single
    /// connection also serializes every transaction against the store.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        let options = SqliteConnectOptions::from_str(&config.url)?.create_if_missing(true);

        let max_connections = if config.is_in_memory() {
            if config.max_connections != 1 {
                tracing::warn!(
                    requested = config.max_connections,
                    "in-memory database forced to a single connection"
                );
            }
            1
        } else {
            config.max_connections.max(1)
        };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!(url = %config.url, "Database migrations completed");

        Ok(Self::new(pool))
    }

    /// Check the connection is usable
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
