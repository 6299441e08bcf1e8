// ABOUTME: Per-list override operations persisted through an injectable key-value store
// ABOUTME: Each action is one read-modify-write serialized per list so racing toggles never tear
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use std::collections::BTreeSet;
use std::sync::Arc;

use dashmap::DashMap;
use larder_core::errors::AppResult;
use tokio::sync::Mutex;
use tracing::warn;
use uuid::Uuid;

use super::{
    checked_store_key, decode_keys, encode_keys, hidden_store_key, OverrideState, OverrideStore,
};
use crate::logging::AppLogger;

/// Override operations for every list, backed by one store
#[derive(Clone)]
pub struct OverrideLayer {
    store: Arc<dyn OverrideStore>,
    locks: Arc<DashMap<Uuid, Arc<Mutex<()>>>>,
}

impl OverrideLayer {
    /// Create a layer over `store`
    #[must_use]
    pub fn new(store: Arc<dyn OverrideStore>) -> Self {
        Self {
            store,
            locks: Arc::new(DashMap::new()),
        }
    }

    /// Backend name of the underlying store
    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        self.store.backend_name()
    }

    /// Number of lists with a live lock entry
    #[must_use]
    pub fn tracked_lists(&self) -> usize {
        self.locks.len()
    }

    /// Current state of `list_id`
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read
    pub async fn load(&self, list_id: Uuid) -> AppResult<OverrideState> {
        let lock = self.lock_for(list_id);
        let state = {
            let _guard = lock.lock().await;
            self.read_state(list_id).await
        };
        self.release(list_id, &lock);
        state
    }

    /// Flip the checked flag of `key`; returns whether it is now checked
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or written
    pub async fn toggle_checked(&self, list_id: Uuid, key: &str) -> AppResult<bool> {
        let checked = self
            .modify(list_id, |state| state.toggle_checked(key))
            .await?;
        let action = if checked { "check" } else { "uncheck" };
        AppLogger::log_override_event(&list_id.to_string(), key, action);
        Ok(checked)
    }

    /// Hide `key` ("already have"); returns `false` if it was already hidden
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or written
    pub async fn hide(&self, list_id: Uuid, key: &str) -> AppResult<bool> {
        let hidden = self.modify(list_id, |state| state.hide(key)).await?;
        AppLogger::log_override_event(&list_id.to_string(), key, "hide");
        Ok(hidden)
    }

    /// Restore a hidden `key`; returns `false` if it was not hidden
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or written
    pub async fn restore(&self, list_id: Uuid, key: &str) -> AppResult<bool> {
        let restored = self.modify(list_id, |state| state.restore(key)).await?;
        AppLogger::log_override_event(&list_id.to_string(), key, "restore");
        Ok(restored)
    }

    /// Restore every hidden key; returns how many were restored
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or written
    pub async fn restore_all(&self, list_id: Uuid) -> AppResult<usize> {
        let restored = self.modify(list_id, OverrideState::restore_all).await?;
        AppLogger::log_override_event(&list_id.to_string(), "*", "restore_all");
        Ok(restored)
    }

    /// Drop `key` from both sets, used when a custom item is deleted
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or written
    pub async fn forget_item(&self, list_id: Uuid, key: &str) -> AppResult<bool> {
        let forgotten = self.modify(list_id, |state| state.forget(key)).await?;
        if forgotten {
            AppLogger::log_override_event(&list_id.to_string(), key, "forget");
        }
        Ok(forgotten)
    }

    /// Remove all state of `list_id` after the list is deleted or archived
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written
    pub async fn discard(&self, list_id: Uuid) -> AppResult<()> {
        let lock = self.lock_for(list_id);
        let deleted = {
            let _guard = lock.lock().await;
            self.delete_state(list_id).await
        };
        self.release(list_id, &lock);
        deleted?;
        AppLogger::log_override_event(&list_id.to_string(), "*", "discard");
        Ok(())
    }

    fn lock_for(&self, list_id: Uuid) -> Arc<Mutex<()>> {
        self.locks
            .entry(list_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Drop the map entry once no other task holds or waits on `lock`
    ///
    /// Clones are only taken under the shard lock in `lock_for`, so a count of
    /// two (the map plus `lock`) inside `remove_if` means the mutex is idle.
    fn release(&self, list_id: Uuid, lock: &Arc<Mutex<()>>) {
        self.locks.remove_if(&list_id, |_, held| {
            Arc::ptr_eq(held, lock) && Arc::strong_count(held) == 2
        });
    }

    async fn modify<T, F>(&self, list_id: Uuid, mutate: F) -> AppResult<T>
    where
        F: FnOnce(&mut OverrideState) -> T + Send,
    {
        let lock = self.lock_for(list_id);
        let result = {
            let _guard = lock.lock().await;
            self.read_modify_write(list_id, mutate).await
        };
        self.release(list_id, &lock);
        result
    }

    async fn delete_state(&self, list_id: Uuid) -> AppResult<()> {
        self.store.delete(&checked_store_key(list_id)).await?;
        self.store.delete(&hidden_store_key(list_id)).await
    }

    async fn read_modify_write<T, F>(&self, list_id: Uuid, mutate: F) -> AppResult<T>
    where
        F: FnOnce(&mut OverrideState) -> T + Send,
    {
        let before = self.read_state(list_id).await?;
        let mut state = before.clone();
        let result = mutate(&mut state);

        if state.checked != before.checked {
            self.write_keys(&checked_store_key(list_id), &state.checked)
                .await?;
        }
        if state.hidden != before.hidden {
            self.write_keys(&hidden_store_key(list_id), &state.hidden)
                .await?;
        }
        Ok(result)
    }

    async fn read_state(&self, list_id: Uuid) -> AppResult<OverrideState> {
        Ok(OverrideState {
            checked: self.read_keys(&checked_store_key(list_id)).await?,
            hidden: self.read_keys(&hidden_store_key(list_id)).await?,
        })
    }

    async fn read_keys(&self, store_key: &str) -> AppResult<BTreeSet<String>> {
        let Some(bytes) = self.store.get(store_key).await? else {
            return Ok(BTreeSet::new());
        };
        match decode_keys(&bytes) {
            Ok(keys) => Ok(keys),
            Err(e) => {
                // Unreadable state resets to empty
                warn!(store.key = %store_key, error = %e, "Discarding unreadable override state");
                Ok(BTreeSet::new())
            }
        }
    }

    async fn write_keys(&self, store_key: &str, keys: &BTreeSet<String>) -> AppResult<()> {
        if keys.is_empty() {
            self.store.delete(store_key).await
        } else {
            self.store.put(store_key, encode_keys(keys)?).await
        }
    }
}
