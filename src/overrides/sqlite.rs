// ABOUTME: SQLite-backed override store so checked and hidden sets survive restarts
// ABOUTME: Single key-value table created on connect; values are JSON arrays of item keys
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use std::time::Instant;

use chrono::Utc;
use larder_core::errors::AppResult;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Row, Sqlite};

use super::OverrideStore;
use crate::logging::AppLogger;

/// `SQLite` override store
#[derive(Clone)]
pub struct SqliteOverrideStore {
    pool: Pool<Sqlite>,
}

impl SqliteOverrideStore {
    /// Connect to `database_url`, creating the database file and table if needed
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or table creation fails
    pub async fn connect(database_url: &str) -> AppResult<Self> {
        let in_memory = database_url.contains(":memory:");
        // Ensure SQLite creates the database file if it doesn't exist
        let connection_options = if in_memory || database_url.contains("mode=") {
            database_url.to_owned()
        } else {
            format!("{database_url}?mode=rwc")
        };

        // Every connection to `:memory:` is a separate database
        let max_connections = if in_memory { 1 } else { 4 };
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect(&connection_options)
            .await?;

        Self::from_pool(pool).await
    }

    /// Use an existing pool, creating the table if needed
    ///
    /// # Errors
    ///
    /// Returns an error if table creation fails
    pub async fn from_pool(pool: Pool<Sqlite>) -> AppResult<Self> {
        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    /// Get a reference to the underlying pool
    #[must_use]
    pub const fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    async fn migrate(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS override_state (
                key TEXT PRIMARY KEY,
                value BLOB NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl OverrideStore for SqliteOverrideStore {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    async fn get(&self, key: &str) -> AppResult<Option<Vec<u8>>> {
        let started = Instant::now();
        let row = sqlx::query("SELECT value FROM override_state WHERE key = $1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        AppLogger::log_store_operation("sqlite", "get", true, elapsed_ms(started));

        Ok(match row {
            Some(row) => Some(row.try_get::<Vec<u8>, _>("value")?),
            None => None,
        })
    }

    async fn put(&self, key: &str, value: Vec<u8>) -> AppResult<()> {
        let started = Instant::now();
        sqlx::query(
            r"
            INSERT INTO override_state (key, value, updated_at)
            VALUES ($1, $2, $3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            ",
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;
        AppLogger::log_store_operation("sqlite", "put", true, elapsed_ms(started));
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        let started = Instant::now();
        sqlx::query("DELETE FROM override_state WHERE key = $1")
            .bind(key)
            .execute(&self.pool)
            .await?;
        AppLogger::log_store_operation("sqlite", "delete", true, elapsed_ms(started));
        Ok(())
    }

    async fn health_check(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
