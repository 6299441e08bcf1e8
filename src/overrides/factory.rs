// ABOUTME: Override store factory for configuration-based backend selection
// ABOUTME: Builds the in-memory or SQLite store behind the OverrideStore trait
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use std::sync::Arc;

use larder_core::errors::{AppError, AppResult};
use tokio::fs;
use tracing::info;

use super::{memory::InMemoryOverrideStore, sqlite::SqliteOverrideStore, OverrideStore};
use crate::config::{DatabaseUrl, OverrideBackend, OverrideConfig};

/// Create the configured override store
///
/// # Errors
///
/// Returns an error if the database directory cannot be created or the
/// `SQLite` connection fails
pub async fn create_store(config: &OverrideConfig) -> AppResult<Arc<dyn OverrideStore>> {
    match config.backend {
        OverrideBackend::Memory => {
            info!(
                "Initializing in-memory override store (max entries: {})",
                config.capacity
            );
            Ok(Arc::new(InMemoryOverrideStore::new(config.capacity)))
        }
        OverrideBackend::Sqlite => {
            if let DatabaseUrl::SQLite { path } = &config.database_url {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    fs::create_dir_all(parent).await.map_err(|e| {
                        AppError::storage(format!(
                            "Cannot create database directory {}",
                            parent.display()
                        ))
                        .with_source(e)
                    })?;
                }
            }
            let url = config.database_url.to_connection_string();
            info!("Initializing SQLite override store at {url}");
            Ok(Arc::new(SqliteOverrideStore::connect(&url).await?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_backend_is_default() {
        let store = create_store(&OverrideConfig::default()).await.unwrap();
        assert_eq!(store.backend_name(), "memory");
        store.health_check().await.unwrap();
    }

    #[tokio::test]
    async fn test_sqlite_backend_in_memory() {
        let config = OverrideConfig {
            backend: OverrideBackend::Sqlite,
            database_url: DatabaseUrl::Memory,
            ..OverrideConfig::default()
        };
        let store = create_store(&config).await.unwrap();
        assert_eq!(store.backend_name(), "sqlite");
        store.put("k", b"[\"x\"]".to_vec()).await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), Some(b"[\"x\"]".to_vec()));
    }
}
