// ABOUTME: Domain service layer combining persistence, aggregation, and override state
// ABOUTME: Entry points used by the CLI and any future protocol surface
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Domain service layer
//!
//! Services hold no state of their own beyond shared handles, so they are
//! cheap to clone into whatever surface drives them.

/// Grocery list lifecycle, edits, and views
pub mod grocery_list;

pub use grocery_list::{GroceryListService, GroceryListView, RecipeAdded};
