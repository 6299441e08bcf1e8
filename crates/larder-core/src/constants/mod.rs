// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Pure data constants for unit conversion, list defaults, and override storage
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single large file.

/// Unit conversion factors into each family's base unit
pub mod units;

/// Shopping list defaults
pub mod lists {
    /// Title given to a freshly created active list
    pub const DEFAULT_LIST_TITLE: &str = "My Shopping List";

    /// Serving multiplier used when the caller does not provide one
    pub const DEFAULT_SERVING_MULTIPLIER: f64 = 1.0;

    /// Maximum length of a custom or stocked item name
    pub const MAX_ITEM_NAME_LEN: usize = 255;

    /// Maximum length of free-text notes
    pub const MAX_NOTES_LEN: usize = 500;
}

/// Override state storage
pub mod overrides {
    /// Store key prefix for the checked set of a list
    pub const CHECKED_KEY_PREFIX: &str = "checkedItems-";

    /// Store key prefix for the hidden ("already have") set of a list
    pub const HIDDEN_KEY_PREFIX: &str = "hiddenItems-";

    /// Default capacity of the in-memory override store
    pub const DEFAULT_MEMORY_CAPACITY: usize = 10_000;

    /// Default `SQLite` database URL for persistent override state
    pub const DEFAULT_DATABASE_URL: &str = "sqlite:./data/larder.db";
}

/// Service identity used in structured logs
pub mod service_names {
    /// Main service name
    pub const LARDER: &str = "larder";
}
