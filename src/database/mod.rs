// ABOUTME: Persistence layer for recipes, shopping lists, custom items, and stocked items
// ABOUTME: Exposes the repository traits and the in-memory implementation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! # Database
//!
//! Services depend on the repository traits only, so a persistent backend can
//! replace [`InMemoryRepository`] without touching the grocery list logic.

/// Repository traits and implementations
pub mod repositories;

pub use repositories::in_memory_repository::InMemoryRepository;
pub use repositories::{ListSnapshot, RecipeRepository, ShoppingListRepository};
