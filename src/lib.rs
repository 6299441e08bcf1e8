// ABOUTME: Main library entry point for the Larder grocery list platform
// ABOUTME: Wires configuration, logging, persistence, override state, and the list service
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

#![deny(unsafe_code)]

//! # Larder
//!
//! Turns the recipes on a shopping list into one consolidated grocery list:
//! matching ingredients are summed, lines are grouped by store aisle, and the
//! user's checked and "already have" marks are layered on top.
//!
//! ## Architecture
//!
//! - **`larder_core`**: models, error codes, constants
//! - **`larder_grocery`**: the pure aggregation engine and text projection
//! - **Overrides**: per-list checked and hidden sets over a pluggable store
//! - **Database**: repository traits and the in-memory implementation
//! - **Services**: `GroceryListService`, composing all of the above
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use larder::database::InMemoryRepository;
//! use larder::overrides::{InMemoryOverrideStore, OverrideLayer};
//! use larder::services::GroceryListService;
//!
//! # async fn demo() -> larder_core::errors::AppResult<()> {
//! let repo = Arc::new(InMemoryRepository::new());
//! let overrides = OverrideLayer::new(Arc::new(InMemoryOverrideStore::default()));
//! let service = GroceryListService::new(repo.clone(), repo, overrides);
//!
//! if let Some(view) = service.view_active("alice", None).await? {
//!     println!("{} lines to buy", view.summary.visible);
//! }
//! # Ok(())
//! # }
//! ```

/// Environment-based configuration
pub mod config;

/// Repository traits and implementations
pub mod database;

/// Structured logging setup and domain log events
pub mod logging;

/// Checked and hidden state per list
pub mod overrides;

/// Grocery list service
pub mod services;

pub use larder_core::errors::{AppError, AppResult, ErrorCode};
pub use larder_core::models;
pub use larder_grocery::{Aggregator, AisleGroupedList, CombinedIngredient, MergeStrategy};
