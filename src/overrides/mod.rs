// ABOUTME: Per-list override state (checked and hidden item keys) and its key-value storage seam
// ABOUTME: Pluggable store backends (in-memory, SQLite) following the cache provider pattern
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Override layer
//!
//! Checked and hidden sets are display preferences scoped to one list
//! instance. They never touch recipe or list data; the aggregated list is
//! recomputed on every view and the sets are applied afterwards.

/// Store factory for configuration-based backend selection
pub mod factory;
/// Per-list serialized override operations
pub mod layer;
/// In-memory store implementation
pub mod memory;
/// `SQLite` store implementation
pub mod sqlite;
/// Partitioning an aggregated list into visible and hidden lines
pub mod view;

use std::collections::BTreeSet;

use larder_core::constants::overrides::{CHECKED_KEY_PREFIX, HIDDEN_KEY_PREFIX};
use larder_core::errors::AppResult;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use factory::create_store;
pub use layer::OverrideLayer;
pub use memory::InMemoryOverrideStore;
pub use sqlite::SqliteOverrideStore;
pub use view::{apply, ListLine, OverrideSummary, OverrideView};

/// Key-value persistence contract for override state
///
/// Values are opaque bytes; the override layer stores JSON arrays of item keys.
#[async_trait::async_trait]
pub trait OverrideStore: Send + Sync {
    /// Backend name used in logs
    fn backend_name(&self) -> &'static str;

    /// Read a value
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read
    async fn get(&self, key: &str) -> AppResult<Option<Vec<u8>>>;

    /// Write a value, replacing any previous one
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written
    async fn put(&self, key: &str, value: Vec<u8>) -> AppResult<()>;

    /// Remove a value; removing a missing key is not an error
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written
    async fn delete(&self, key: &str) -> AppResult<()>;

    /// Verify the backend is usable
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unavailable
    async fn health_check(&self) -> AppResult<()>;
}

/// Store key holding the checked set of `list_id`
#[must_use]
pub fn checked_store_key(list_id: Uuid) -> String {
    format!("{CHECKED_KEY_PREFIX}{list_id}")
}

/// Store key holding the hidden set of `list_id`
#[must_use]
pub fn hidden_store_key(list_id: Uuid) -> String {
    format!("{HIDDEN_KEY_PREFIX}{list_id}")
}

/// Checked and hidden item keys of one list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideState {
    /// Keys the user ticked off
    pub checked: BTreeSet<String>,
    /// Keys the user already has at home
    pub hidden: BTreeSet<String>,
}

impl OverrideState {
    /// Flip `key` in the checked set; returns whether it is now checked
    pub fn toggle_checked(&mut self, key: &str) -> bool {
        if self.checked.remove(key) {
            false
        } else {
            self.checked.insert(key.to_owned());
            true
        }
    }

    /// Move `key` into the hidden set; returns `false` if it was already hidden
    pub fn hide(&mut self, key: &str) -> bool {
        self.hidden.insert(key.to_owned())
    }

    /// Take `key` out of the hidden set; returns `false` if it was not hidden
    pub fn restore(&mut self, key: &str) -> bool {
        self.hidden.remove(key)
    }

    /// Empty the hidden set; returns how many keys were restored
    pub fn restore_all(&mut self) -> usize {
        let restored = self.hidden.len();
        self.hidden.clear();
        restored
    }

    /// Drop `key` from both sets, e.g. when its custom item is deleted
    pub fn forget(&mut self, key: &str) -> bool {
        let unchecked = self.checked.remove(key);
        let restored = self.hidden.remove(key);
        unchecked || restored
    }

    /// Whether `key` is checked
    #[must_use]
    pub fn is_checked(&self, key: &str) -> bool {
        self.checked.contains(key)
    }

    /// Whether `key` is hidden
    #[must_use]
    pub fn is_hidden(&self, key: &str) -> bool {
        self.hidden.contains(key)
    }

    /// Whether both sets are empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.checked.is_empty() && self.hidden.is_empty()
    }
}

pub(crate) fn encode_keys(keys: &BTreeSet<String>) -> AppResult<Vec<u8>> {
    Ok(serde_json::to_vec(keys)?)
}

pub(crate) fn decode_keys(bytes: &[u8]) -> AppResult<BTreeSet<String>> {
    Ok(serde_json::from_slice(bytes)?)
}
