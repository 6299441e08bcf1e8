// ABOUTME: Repository traits for recipes, shopping lists, custom items, and stocked items
// ABOUTME: The storage seam the grocery list service reaches persistence through
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Repository interfaces
//!
//! Every list-scoped call takes the caller's owner id; implementations must
//! reject access to lists the owner does not hold.

/// In-process repository used by the CLI and tests
pub mod in_memory_repository;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use larder_core::errors::AppResult;
use larder_core::models::{
    CustomItem, CustomItemPatch, Recipe, ShoppingList, ShoppingListEntry, StockedItem,
};
use uuid::Uuid;

/// A list with its entries and custom items, read at one point in time
#[derive(Debug, Clone, PartialEq)]
pub struct ListSnapshot {
    /// List metadata
    pub list: ShoppingList,
    /// Recipe entries in insertion order
    pub entries: Vec<ShoppingListEntry>,
    /// Custom items in insertion order
    pub custom_items: Vec<CustomItem>,
}

/// Read and write access to stored recipes
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// Fetch one recipe
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails
    async fn fetch_recipe(&self, id: Uuid) -> AppResult<Option<Recipe>>;

    /// Fetch several recipes; missing ids are skipped
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails
    async fn fetch_recipes(&self, ids: &[Uuid]) -> AppResult<Vec<Recipe>>;

    /// Insert or replace a recipe
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails
    async fn save_recipe(&self, recipe: Recipe) -> AppResult<()>;

    /// Delete a recipe owned by `owner_id`
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` or `PermissionDenied` when appropriate
    async fn delete_recipe(&self, owner_id: &str, id: Uuid) -> AppResult<()>;
}

/// Shopping lists with their entries, custom items, and the owner's stocked items
#[async_trait]
pub trait ShoppingListRepository: Send + Sync {
    /// The owner's active list, if any
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails
    async fn active_list(&self, owner_id: &str) -> AppResult<Option<ShoppingList>>;

    /// The owner's active list, created with the default title when absent
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails
    async fn get_or_create_active_list(
        &self,
        owner_id: &str,
        now: DateTime<Utc>,
    ) -> AppResult<ShoppingList>;

    /// A list owned by `owner_id`
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` or `PermissionDenied` when appropriate
    async fn fetch_list(&self, owner_id: &str, list_id: Uuid) -> AppResult<ShoppingList>;

    /// Recipe entries of a list, in insertion order
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` or `PermissionDenied` when appropriate
    async fn list_entries(&self, owner_id: &str, list_id: Uuid)
        -> AppResult<Vec<ShoppingListEntry>>;

    /// The list, its entries, and its custom items under one consistent read
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` or `PermissionDenied` when appropriate
    async fn list_snapshot(&self, owner_id: &str, list_id: Uuid) -> AppResult<ListSnapshot>;

    /// Add a recipe or replace its multiplier; returns `true` if newly added
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` for archived lists
    async fn upsert_entry(
        &self,
        owner_id: &str,
        list_id: Uuid,
        entry: ShoppingListEntry,
    ) -> AppResult<bool>;

    /// Change the multiplier of a recipe already on the list
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the recipe is not on the list
    async fn update_multiplier(
        &self,
        owner_id: &str,
        list_id: Uuid,
        recipe_id: Uuid,
        serving_multiplier: f64,
    ) -> AppResult<()>;

    /// Remove a recipe from the list; returns `false` if it was not there
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` for archived lists
    async fn remove_entry(&self, owner_id: &str, list_id: Uuid, recipe_id: Uuid)
        -> AppResult<bool>;

    /// Remove every recipe and custom item; returns how many lines were removed
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` for archived lists
    async fn clear_entries(&self, owner_id: &str, list_id: Uuid) -> AppResult<usize>;

    /// Custom items of a list, in insertion order
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` or `PermissionDenied` when appropriate
    async fn custom_items(&self, owner_id: &str, list_id: Uuid) -> AppResult<Vec<CustomItem>>;

    /// Attach a validated custom item
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` for archived lists
    async fn add_custom_item(&self, owner_id: &str, list_id: Uuid, item: CustomItem)
        -> AppResult<()>;

    /// Apply a partial update to a custom item
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the item is not on the list, or a
    /// validation error from the patch
    async fn update_custom_item(
        &self,
        owner_id: &str,
        list_id: Uuid,
        item_id: Uuid,
        patch: &CustomItemPatch,
    ) -> AppResult<CustomItem>;

    /// Remove a custom item and return it
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the item is not on the list
    async fn remove_custom_item(
        &self,
        owner_id: &str,
        list_id: Uuid,
        item_id: Uuid,
    ) -> AppResult<CustomItem>;

    /// Change a list's title
    ///
    /// # Errors
    ///
    /// Returns a validation error for blank titles
    async fn rename_list(&self, owner_id: &str, list_id: Uuid, title: &str)
        -> AppResult<ShoppingList>;

    /// Archive the active list under a date-range title and start a fresh one
    ///
    /// Returns the archived list (if there was one) and the new active list.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails
    async fn archive_and_start_new(
        &self,
        owner_id: &str,
        now: DateTime<Utc>,
    ) -> AppResult<(Option<ShoppingList>, ShoppingList)>;

    /// The owner's archived lists, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails
    async fn archived_lists(&self, owner_id: &str) -> AppResult<Vec<ShoppingList>>;

    /// Delete an archived list
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` for the active list
    async fn delete_list(&self, owner_id: &str, list_id: Uuid) -> AppResult<()>;

    /// The owner's stocked items, ordered by name
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails
    async fn stocked_items(&self, owner_id: &str) -> AppResult<Vec<StockedItem>>;

    /// Add a stocked item
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails
    async fn add_stocked_item(&self, item: StockedItem) -> AppResult<()>;

    /// Remove a stocked item
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` or `PermissionDenied` when appropriate
    async fn remove_stocked_item(&self, owner_id: &str, id: Uuid) -> AppResult<()>;
}
