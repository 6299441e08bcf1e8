// ABOUTME: In-memory implementation of the recipe and shopping list repositories
// ABOUTME: Backs the CLI snapshot loader and tests; enforces ownership and archive rules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use larder_core::constants::lists::DEFAULT_LIST_TITLE;
use larder_core::errors::{AppError, AppResult};
use larder_core::models::validation::validate_name;
use larder_core::models::{
    CustomItem, CustomItemPatch, Recipe, ShoppingList, ShoppingListEntry, StockedItem,
};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{ListSnapshot, RecipeRepository, ShoppingListRepository};

#[derive(Debug, Clone)]
struct ListRecord {
    list: ShoppingList,
    entries: Vec<ShoppingListEntry>,
    custom_items: Vec<CustomItem>,
}

impl ListRecord {
    fn new(list: ShoppingList) -> Self {
        Self {
            list,
            entries: Vec::new(),
            custom_items: Vec::new(),
        }
    }

    fn ensure_writable(&self) -> AppResult<()> {
        if self.list.is_active {
            Ok(())
        } else {
            Err(AppError::invalid_state("Archived lists are read-only"))
        }
    }

    fn touch(&mut self) {
        self.list.updated_at = Utc::now();
    }
}

#[derive(Debug, Default)]
struct RepositoryState {
    recipes: HashMap<Uuid, Recipe>,
    lists: HashMap<Uuid, ListRecord>,
    stocked: HashMap<Uuid, StockedItem>,
}

impl RepositoryState {
    fn record(&self, owner_id: &str, list_id: Uuid) -> AppResult<&ListRecord> {
        let record = self
            .lists
            .get(&list_id)
            .ok_or_else(|| AppError::not_found("Shopping list"))?;
        if record.list.owner_id != owner_id {
            return Err(AppError::permission_denied(
                "Shopping list belongs to another user",
            ));
        }
        Ok(record)
    }

    fn record_mut(&mut self, owner_id: &str, list_id: Uuid) -> AppResult<&mut ListRecord> {
        let record = self
            .lists
            .get_mut(&list_id)
            .ok_or_else(|| AppError::not_found("Shopping list"))?;
        if record.list.owner_id != owner_id {
            return Err(AppError::permission_denied(
                "Shopping list belongs to another user",
            ));
        }
        Ok(record)
    }

    fn writable(&mut self, owner_id: &str, list_id: Uuid) -> AppResult<&mut ListRecord> {
        let record = self.record_mut(owner_id, list_id)?;
        record.ensure_writable()?;
        Ok(record)
    }

    fn active(&self, owner_id: &str) -> Option<&ListRecord> {
        self.lists
            .values()
            .find(|r| r.list.owner_id == owner_id && r.list.is_active)
    }
}

/// Repository keeping everything in process memory
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    state: RwLock<RepositoryState>,
}

impl InMemoryRepository {
    /// Create an empty repository
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a list as-is, keeping its id and timestamps
    ///
    /// A second active list for the same owner is rejected.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` if the owner already has an active list
    pub async fn import_list(
        &self,
        list: ShoppingList,
        entries: Vec<ShoppingListEntry>,
        custom_items: Vec<CustomItem>,
    ) -> AppResult<()> {
        let mut state = self.state.write().await;
        if list.is_active {
            if let Some(existing) = state.active(&list.owner_id) {
                if existing.list.id != list.id {
                    return Err(AppError::invalid_state(
                        "Owner already has an active shopping list",
                    ));
                }
            }
        }
        state.lists.insert(
            list.id,
            ListRecord {
                list,
                entries,
                custom_items,
            },
        );
        Ok(())
    }
}

#[async_trait]
impl RecipeRepository for InMemoryRepository {
    async fn fetch_recipe(&self, id: Uuid) -> AppResult<Option<Recipe>> {
        Ok(self.state.read().await.recipes.get(&id).cloned())
    }

    async fn fetch_recipes(&self, ids: &[Uuid]) -> AppResult<Vec<Recipe>> {
        let state = self.state.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| state.recipes.get(id).cloned())
            .collect())
    }

    async fn save_recipe(&self, recipe: Recipe) -> AppResult<()> {
        self.state.write().await.recipes.insert(recipe.id, recipe);
        Ok(())
    }

    async fn delete_recipe(&self, owner_id: &str, id: Uuid) -> AppResult<()> {
        let mut state = self.state.write().await;
        let recipe = state
            .recipes
            .get(&id)
            .ok_or_else(|| AppError::not_found("Recipe"))?;
        if recipe.owner_id != owner_id {
            return Err(AppError::permission_denied(
                "Recipe belongs to another user",
            ));
        }
        state.recipes.remove(&id);
        // Entries referencing the recipe go with it
        for record in state.lists.values_mut() {
            record.entries.retain(|entry| entry.recipe_id != id);
        }
        Ok(())
    }
}

#[async_trait]
impl ShoppingListRepository for InMemoryRepository {
    async fn active_list(&self, owner_id: &str) -> AppResult<Option<ShoppingList>> {
        Ok(self
            .state
            .read()
            .await
            .active(owner_id)
            .map(|record| record.list.clone()))
    }

    async fn get_or_create_active_list(
        &self,
        owner_id: &str,
        now: DateTime<Utc>,
    ) -> AppResult<ShoppingList> {
        let mut state = self.state.write().await;
        if let Some(record) = state.active(owner_id) {
            return Ok(record.list.clone());
        }
        let list = ShoppingList::new_active(owner_id, DEFAULT_LIST_TITLE, now);
        state.lists.insert(list.id, ListRecord::new(list.clone()));
        Ok(list)
    }

    async fn fetch_list(&self, owner_id: &str, list_id: Uuid) -> AppResult<ShoppingList> {
        let state = self.state.read().await;
        Ok(state.record(owner_id, list_id)?.list.clone())
    }

    async fn list_entries(
        &self,
        owner_id: &str,
        list_id: Uuid,
    ) -> AppResult<Vec<ShoppingListEntry>> {
        let state = self.state.read().await;
        Ok(state.record(owner_id, list_id)?.entries.clone())
    }

    async fn list_snapshot(&self, owner_id: &str, list_id: Uuid) -> AppResult<ListSnapshot> {
        let state = self.state.read().await;
        let record = state.record(owner_id, list_id)?;
        Ok(ListSnapshot {
            list: record.list.clone(),
            entries: record.entries.clone(),
            custom_items: record.custom_items.clone(),
        })
    }

    async fn upsert_entry(
        &self,
        owner_id: &str,
        list_id: Uuid,
        entry: ShoppingListEntry,
    ) -> AppResult<bool> {
        let mut state = self.state.write().await;
        let record = state.writable(owner_id, list_id)?;
        let existing = record
            .entries
            .iter()
            .position(|e| e.recipe_id == entry.recipe_id);
        let inserted = match existing {
            Some(index) => {
                record.entries[index].serving_multiplier = entry.serving_multiplier;
                false
            }
            None => {
                record.entries.push(entry);
                true
            }
        };
        record.touch();
        Ok(inserted)
    }

    async fn update_multiplier(
        &self,
        owner_id: &str,
        list_id: Uuid,
        recipe_id: Uuid,
        serving_multiplier: f64,
    ) -> AppResult<()> {
        let mut state = self.state.write().await;
        let record = state.writable(owner_id, list_id)?;
        let entry = record
            .entries
            .iter_mut()
            .find(|e| e.recipe_id == recipe_id)
            .ok_or_else(|| AppError::not_found("Recipe on shopping list"))?;
        entry.serving_multiplier = serving_multiplier;
        record.touch();
        Ok(())
    }

    async fn remove_entry(
        &self,
        owner_id: &str,
        list_id: Uuid,
        recipe_id: Uuid,
    ) -> AppResult<bool> {
        let mut state = self.state.write().await;
        let record = state.writable(owner_id, list_id)?;
        let before = record.entries.len();
        record.entries.retain(|e| e.recipe_id != recipe_id);
        let removed = record.entries.len() != before;
        if removed {
            record.touch();
        }
        Ok(removed)
    }

    async fn clear_entries(&self, owner_id: &str, list_id: Uuid) -> AppResult<usize> {
        let mut state = self.state.write().await;
        let record = state.writable(owner_id, list_id)?;
        let removed = record.entries.len() + record.custom_items.len();
        record.entries.clear();
        record.custom_items.clear();
        record.touch();
        Ok(removed)
    }

    async fn custom_items(&self, owner_id: &str, list_id: Uuid) -> AppResult<Vec<CustomItem>> {
        let state = self.state.read().await;
        Ok(state.record(owner_id, list_id)?.custom_items.clone())
    }

    async fn add_custom_item(
        &self,
        owner_id: &str,
        list_id: Uuid,
        item: CustomItem,
    ) -> AppResult<()> {
        let mut state = self.state.write().await;
        let record = state.writable(owner_id, list_id)?;
        record.custom_items.push(item);
        record.touch();
        Ok(())
    }

    async fn update_custom_item(
        &self,
        owner_id: &str,
        list_id: Uuid,
        item_id: Uuid,
        patch: &CustomItemPatch,
    ) -> AppResult<CustomItem> {
        let mut state = self.state.write().await;
        let record = state.writable(owner_id, list_id)?;
        let item = record
            .custom_items
            .iter_mut()
            .find(|i| i.id == item_id)
            .ok_or_else(|| AppError::not_found("Custom item"))?;
        patch.apply_to(item)?;
        let updated = item.clone();
        record.touch();
        Ok(updated)
    }

    async fn remove_custom_item(
        &self,
        owner_id: &str,
        list_id: Uuid,
        item_id: Uuid,
    ) -> AppResult<CustomItem> {
        let mut state = self.state.write().await;
        let record = state.writable(owner_id, list_id)?;
        let position = record
            .custom_items
            .iter()
            .position(|i| i.id == item_id)
            .ok_or_else(|| AppError::not_found("Custom item"))?;
        let removed = record.custom_items.remove(position);
        record.touch();
        Ok(removed)
    }

    async fn rename_list(
        &self,
        owner_id: &str,
        list_id: Uuid,
        title: &str,
    ) -> AppResult<ShoppingList> {
        let title = validate_name("List title", title)?;
        let mut state = self.state.write().await;
        let record = state.record_mut(owner_id, list_id)?;
        record.list.title = title;
        record.touch();
        Ok(record.list.clone())
    }

    async fn archive_and_start_new(
        &self,
        owner_id: &str,
        now: DateTime<Utc>,
    ) -> AppResult<(Option<ShoppingList>, ShoppingList)> {
        let mut state = self.state.write().await;
        let active_id = state.active(owner_id).map(|record| record.list.id);

        let archived = match active_id.and_then(|id| state.lists.get_mut(&id)) {
            Some(record) => {
                record.list.is_active = false;
                record.list.title = ShoppingList::archive_title(record.list.created_at, now);
                record.list.updated_at = now;
                Some(record.list.clone())
            }
            None => None,
        };

        let fresh = ShoppingList::new_active(owner_id, DEFAULT_LIST_TITLE, now);
        state.lists.insert(fresh.id, ListRecord::new(fresh.clone()));
        Ok((archived, fresh))
    }

    async fn archived_lists(&self, owner_id: &str) -> AppResult<Vec<ShoppingList>> {
        let state = self.state.read().await;
        let mut lists: Vec<ShoppingList> = state
            .lists
            .values()
            .filter(|r| r.list.owner_id == owner_id && !r.list.is_active)
            .map(|r| r.list.clone())
            .collect();
        lists.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then(b.id.cmp(&a.id)));
        Ok(lists)
    }

    async fn delete_list(&self, owner_id: &str, list_id: Uuid) -> AppResult<()> {
        let mut state = self.state.write().await;
        if state.record(owner_id, list_id)?.list.is_active {
            return Err(AppError::invalid_state(
                "The active shopping list cannot be deleted",
            ));
        }
        state.lists.remove(&list_id);
        Ok(())
    }

    async fn stocked_items(&self, owner_id: &str) -> AppResult<Vec<StockedItem>> {
        let state = self.state.read().await;
        let mut items: Vec<StockedItem> = state
            .stocked
            .values()
            .filter(|item| item.owner_id == owner_id)
            .cloned()
            .collect();
        items.sort_by_cached_key(|item| (item.name.to_lowercase(), item.id));
        Ok(items)
    }

    async fn add_stocked_item(&self, item: StockedItem) -> AppResult<()> {
        self.state.write().await.stocked.insert(item.id, item);
        Ok(())
    }

    async fn remove_stocked_item(&self, owner_id: &str, id: Uuid) -> AppResult<()> {
        let mut state = self.state.write().await;
        let item = state
            .stocked
            .get(&id)
            .ok_or_else(|| AppError::not_found("Stocked item"))?;
        if item.owner_id != owner_id {
            return Err(AppError::permission_denied(
                "Stocked item belongs to another user",
            ));
        }
        state.stocked.remove(&id);
        Ok(())
    }
}
