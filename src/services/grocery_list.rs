// ABOUTME: Grocery list service composing repositories, the aggregation engine, and overrides
// ABOUTME: Owns list lifecycle, recipe and custom item edits, and the rendered list view
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Grocery list operations
//!
//! Every view is recomputed from the stored snapshot: recipes on the list,
//! their multipliers, and the custom items. Overrides are applied last and
//! never feed back into the aggregation.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use larder_core::errors::{AppError, AppResult};
use larder_core::models::{
    checked_entry, validation::validate_multiplier, Aisle, CustomItem, CustomItemDraft,
    CustomItemPatch, Recipe, ShoppingList, StockedItem,
};
use larder_grocery::{normalize_name, Aggregator, MergeStrategy};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::database::{ListSnapshot, RecipeRepository, ShoppingListRepository};
use crate::logging::AppLogger;
use crate::overrides::{OverrideLayer, OverrideSummary, OverrideView};

/// A list ready for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroceryListView {
    /// The list instance
    pub list: ShoppingList,
    /// Strategy the lines were merged with
    pub strategy: MergeStrategy,
    /// Aggregated lines split into visible and hidden
    pub view: OverrideView,
    /// Header counters
    pub summary: OverrideSummary,
    /// Keys of visible recipe lines matching something the owner always keeps stocked
    pub stocked_suggestions: Vec<String>,
}

/// Result of adding a recipe to the active list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeAdded {
    /// The active list the recipe now belongs to
    pub list: ShoppingList,
    /// `false` when the recipe was already present and only its multiplier changed
    pub inserted: bool,
}

/// Grocery list operations for a single owner at a time
#[derive(Clone)]
pub struct GroceryListService {
    recipes: Arc<dyn RecipeRepository>,
    lists: Arc<dyn ShoppingListRepository>,
    overrides: OverrideLayer,
    strategy: MergeStrategy,
}

impl GroceryListService {
    /// Create a service using exact unit matching by default
    #[must_use]
    pub fn new(
        recipes: Arc<dyn RecipeRepository>,
        lists: Arc<dyn ShoppingListRepository>,
        overrides: OverrideLayer,
    ) -> Self {
        Self {
            recipes,
            lists,
            overrides,
            strategy: MergeStrategy::default(),
        }
    }

    /// Change the default merge strategy used by [`Self::view`]
    #[must_use]
    pub const fn with_strategy(mut self, strategy: MergeStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// The default merge strategy
    #[must_use]
    pub const fn strategy(&self) -> MergeStrategy {
        self.strategy
    }

    /// The owner's active list, if one exists
    ///
    /// # Errors
    ///
    /// Returns an error if the repository fails
    pub async fn active_list(&self, owner_id: &str) -> AppResult<Option<ShoppingList>> {
        self.lists.active_list(owner_id).await
    }

    async fn require_active(&self, owner_id: &str) -> AppResult<ShoppingList> {
        self.lists
            .active_list(owner_id)
            .await?
            .ok_or_else(|| AppError::not_found("Active shopping list"))
    }

    // ================================================================================================
    // Recipes on the list
    // ================================================================================================

    /// Put a recipe on the active list, creating the list if needed
    ///
    /// Adding a recipe that is already present replaces its multiplier.
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` for a bad multiplier, `ResourceNotFound` for an
    /// unknown recipe, and `PermissionDenied` for a private recipe of another owner
    pub async fn add_recipe(
        &self,
        owner_id: &str,
        recipe_id: Uuid,
        serving_multiplier: f64,
    ) -> AppResult<RecipeAdded> {
        let entry = checked_entry(recipe_id, serving_multiplier)?;
        let recipe = self
            .recipes
            .fetch_recipe(recipe_id)
            .await?
            .ok_or_else(|| AppError::not_found("Recipe"))?;
        if !recipe.is_visible_to(owner_id) {
            return Err(AppError::permission_denied(
                "Recipe is private to another user",
            ));
        }

        let list = self
            .lists
            .get_or_create_active_list(owner_id, Utc::now())
            .await?;
        let inserted = self.lists.upsert_entry(owner_id, list.id, entry).await?;

        let event = if inserted {
            "recipe_added"
        } else {
            "recipe_rescaled"
        };
        AppLogger::log_list_event(
            owner_id,
            &list.id.to_string(),
            event,
            Some(&format!("{} x{serving_multiplier}", recipe.title)),
        );
        Ok(RecipeAdded { list, inserted })
    }

    /// Change the multiplier of a recipe already on the active list
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` for a bad multiplier and `ResourceNotFound`
    /// when there is no active list or the recipe is not on it
    pub async fn update_multiplier(
        &self,
        owner_id: &str,
        recipe_id: Uuid,
        serving_multiplier: f64,
    ) -> AppResult<()> {
        let multiplier = validate_multiplier(serving_multiplier)?;
        let list = self.require_active(owner_id).await?;
        self.lists
            .update_multiplier(owner_id, list.id, recipe_id, multiplier)
            .await?;
        AppLogger::log_list_event(
            owner_id,
            &list.id.to_string(),
            "recipe_rescaled",
            Some(&format!("{recipe_id} x{multiplier}")),
        );
        Ok(())
    }

    /// Take a recipe off the active list; returns `false` if it was not there
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when there is no active list
    pub async fn remove_recipe(&self, owner_id: &str, recipe_id: Uuid) -> AppResult<bool> {
        let list = self.require_active(owner_id).await?;
        let removed = self.lists.remove_entry(owner_id, list.id, recipe_id).await?;
        if removed {
            AppLogger::log_list_event(
                owner_id,
                &list.id.to_string(),
                "recipe_removed",
                Some(&recipe_id.to_string()),
            );
        }
        Ok(removed)
    }

    /// Empty the active list of recipes and custom items
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when there is no active list
    pub async fn clear(&self, owner_id: &str) -> AppResult<usize> {
        let list = self.require_active(owner_id).await?;
        let removed = self.lists.clear_entries(owner_id, list.id).await?;
        AppLogger::log_list_event(
            owner_id,
            &list.id.to_string(),
            "list_cleared",
            Some(&format!("{removed} lines")),
        );
        Ok(removed)
    }

    // ================================================================================================
    // Custom items
    // ================================================================================================

    /// Validate a draft and add it to the active list, creating the list if needed
    ///
    /// # Errors
    ///
    /// Returns a validation error if the draft is malformed
    pub async fn add_custom_item(
        &self,
        owner_id: &str,
        draft: CustomItemDraft,
    ) -> AppResult<CustomItem> {
        let item = draft.into_item()?;
        let list = self
            .lists
            .get_or_create_active_list(owner_id, Utc::now())
            .await?;
        self.lists
            .add_custom_item(owner_id, list.id, item.clone())
            .await?;
        AppLogger::log_list_event(
            owner_id,
            &list.id.to_string(),
            "custom_item_added",
            Some(&item.name),
        );
        Ok(item)
    }

    /// Apply a partial update to a custom item on the active list
    ///
    /// # Errors
    ///
    /// Returns a validation error for bad fields and `ResourceNotFound` when the
    /// item or the active list does not exist
    pub async fn update_custom_item(
        &self,
        owner_id: &str,
        item_id: Uuid,
        patch: &CustomItemPatch,
    ) -> AppResult<CustomItem> {
        let list = self.require_active(owner_id).await?;
        let item = self
            .lists
            .update_custom_item(owner_id, list.id, item_id, patch)
            .await?;
        AppLogger::log_list_event(
            owner_id,
            &list.id.to_string(),
            "custom_item_updated",
            Some(&item.name),
        );
        Ok(item)
    }

    /// Delete a custom item and drop its checked and hidden state
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when the item or the active list does not exist
    pub async fn remove_custom_item(&self, owner_id: &str, item_id: Uuid) -> AppResult<CustomItem> {
        let list = self.require_active(owner_id).await?;
        let item = self
            .lists
            .remove_custom_item(owner_id, list.id, item_id)
            .await?;
        self.overrides
            .forget_item(list.id, &item_id.to_string())
            .await?;
        AppLogger::log_list_event(
            owner_id,
            &list.id.to_string(),
            "custom_item_removed",
            Some(&item.name),
        );
        Ok(item)
    }

    // ================================================================================================
    // Viewing
    // ================================================================================================

    /// Aggregate a list from scratch and apply its overrides
    ///
    /// `strategy` falls back to the service default. Recipes that no longer
    /// exist are skipped.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` or `PermissionDenied` for lists the owner
    /// cannot see, and an aggregation error if the stored data is malformed
    pub async fn view(
        &self,
        owner_id: &str,
        list_id: Uuid,
        strategy: Option<MergeStrategy>,
    ) -> AppResult<GroceryListView> {
        let strategy = strategy.unwrap_or(self.strategy);
        let ListSnapshot {
            list,
            entries,
            custom_items,
        } = self.lists.list_snapshot(owner_id, list_id).await?;

        let ids: Vec<Uuid> = entries.iter().map(|e| e.recipe_id).collect();
        let recipes: HashMap<Uuid, Recipe> = self
            .recipes
            .fetch_recipes(&ids)
            .await?
            .into_iter()
            .map(|recipe| (recipe.id, recipe))
            .collect();

        let scaled: Vec<(&Recipe, f64)> = entries
            .iter()
            .filter_map(|entry| {
                let recipe = recipes.get(&entry.recipe_id);
                if recipe.is_none() {
                    warn!(
                        list.id = %list_id,
                        recipe.id = %entry.recipe_id,
                        "Skipping missing recipe on shopping list"
                    );
                }
                recipe.map(|r| (r, entry.serving_multiplier))
            })
            .collect();

        let aggregated = Aggregator::new()
            .with_strategy(strategy)
            .aggregate(&scaled, &custom_items)?;
        let state = self.overrides.load(list_id).await?;
        let view = state.apply(&aggregated);
        let summary = view.summary();

        let stocked = self.lists.stocked_items(owner_id).await?;
        let stocked_suggestions = stocked_suggestions(&view, &stocked);

        debug!(
            list.id = %list_id,
            lines = summary.total,
            hidden = summary.hidden,
            suggestions = stocked_suggestions.len(),
            "Built grocery list view"
        );

        Ok(GroceryListView {
            list,
            strategy,
            view,
            summary,
            stocked_suggestions,
        })
    }

    /// View the owner's active list, if there is one
    ///
    /// # Errors
    ///
    /// Same as [`Self::view`]
    pub async fn view_active(
        &self,
        owner_id: &str,
        strategy: Option<MergeStrategy>,
    ) -> AppResult<Option<GroceryListView>> {
        match self.lists.active_list(owner_id).await? {
            Some(list) => self.view(owner_id, list.id, strategy).await.map(Some),
            None => Ok(None),
        }
    }

    // ================================================================================================
    // Overrides
    // ================================================================================================

    /// Flip the checked flag of a line; returns whether it is now checked
    ///
    /// # Errors
    ///
    /// Returns an error if the owner cannot see the list or the store fails
    pub async fn toggle_checked(&self, owner_id: &str, list_id: Uuid, key: &str) -> AppResult<bool> {
        let key = self.override_target(owner_id, list_id, key).await?;
        self.overrides.toggle_checked(list_id, key).await
    }

    /// Hide a line as "already have"
    ///
    /// # Errors
    ///
    /// Returns an error if the owner cannot see the list or the store fails
    pub async fn hide(&self, owner_id: &str, list_id: Uuid, key: &str) -> AppResult<bool> {
        let key = self.override_target(owner_id, list_id, key).await?;
        self.overrides.hide(list_id, key).await
    }

    /// Bring a hidden line back
    ///
    /// # Errors
    ///
    /// Returns an error if the owner cannot see the list or the store fails
    pub async fn restore(&self, owner_id: &str, list_id: Uuid, key: &str) -> AppResult<bool> {
        let key = self.override_target(owner_id, list_id, key).await?;
        self.overrides.restore(list_id, key).await
    }

    /// Bring every hidden line back
    ///
    /// # Errors
    ///
    /// Returns an error if the owner cannot see the list or the store fails
    pub async fn restore_all(&self, owner_id: &str, list_id: Uuid) -> AppResult<usize> {
        self.lists.fetch_list(owner_id, list_id).await?;
        self.overrides.restore_all(list_id).await
    }

    async fn override_target<'k>(
        &self,
        owner_id: &str,
        list_id: Uuid,
        key: &'k str,
    ) -> AppResult<&'k str> {
        let key = key.trim();
        if key.is_empty() {
            return Err(AppError::missing_field("Item key"));
        }
        self.lists.fetch_list(owner_id, list_id).await?;
        Ok(key)
    }

    // ================================================================================================
    // List lifecycle
    // ================================================================================================

    /// Archive the active list and start an empty one
    ///
    /// Override state of the archived list is discarded.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository or override store fails
    pub async fn start_new_list(
        &self,
        owner_id: &str,
        now: DateTime<Utc>,
    ) -> AppResult<ShoppingList> {
        let (archived, fresh) = self.lists.archive_and_start_new(owner_id, now).await?;
        if let Some(archived) = archived {
            self.overrides.discard(archived.id).await?;
            AppLogger::log_list_event(
                owner_id,
                &archived.id.to_string(),
                "list_archived",
                Some(&archived.title),
            );
        }
        AppLogger::log_list_event(owner_id, &fresh.id.to_string(), "list_started", None);
        Ok(fresh)
    }

    /// Rename any list the owner holds
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank title, or an ownership error
    pub async fn rename_list(
        &self,
        owner_id: &str,
        list_id: Uuid,
        title: &str,
    ) -> AppResult<ShoppingList> {
        let list = self.lists.rename_list(owner_id, list_id, title).await?;
        AppLogger::log_list_event(
            owner_id,
            &list_id.to_string(),
            "list_renamed",
            Some(&list.title),
        );
        Ok(list)
    }

    /// Archived lists, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the repository fails
    pub async fn archived_lists(&self, owner_id: &str) -> AppResult<Vec<ShoppingList>> {
        self.lists.archived_lists(owner_id).await
    }

    /// Delete an archived list along with its override state
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` for the active list, or an ownership error
    pub async fn delete_archived_list(&self, owner_id: &str, list_id: Uuid) -> AppResult<()> {
        self.lists.delete_list(owner_id, list_id).await?;
        self.overrides.discard(list_id).await?;
        AppLogger::log_list_event(owner_id, &list_id.to_string(), "list_deleted", None);
        Ok(())
    }

    // ================================================================================================
    // Stocked items
    // ================================================================================================

    /// Remember something the owner always keeps at home
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank name or overlong notes
    pub async fn add_stocked_item(
        &self,
        owner_id: &str,
        name: &str,
        aisle: Aisle,
        notes: Option<&str>,
    ) -> AppResult<StockedItem> {
        let item = StockedItem::new(owner_id, name, aisle, notes)?;
        self.lists.add_stocked_item(item.clone()).await?;
        Ok(item)
    }

    /// The owner's stocked items
    ///
    /// # Errors
    ///
    /// Returns an error if the repository fails
    pub async fn stocked_items(&self, owner_id: &str) -> AppResult<Vec<StockedItem>> {
        self.lists.stocked_items(owner_id).await
    }

    /// Forget a stocked item
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` or `PermissionDenied` when appropriate
    pub async fn remove_stocked_item(&self, owner_id: &str, id: Uuid) -> AppResult<()> {
        self.lists.remove_stocked_item(owner_id, id).await
    }
}

/// Visible recipe lines whose name matches a stocked item, in display order
fn stocked_suggestions(view: &OverrideView, stocked: &[StockedItem]) -> Vec<String> {
    let names: HashSet<String> = stocked
        .iter()
        .filter(|item| item.always_stocked)
        .map(|item| normalize_name(&item.name))
        .collect();
    if names.is_empty() {
        return Vec::new();
    }
    view.visible
        .values()
        .flatten()
        .filter(|line| !line.item.is_custom && names.contains(&normalize_name(&line.item.name)))
        .map(|line| line.key.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::InMemoryRepository;
    use crate::overrides::InMemoryOverrideStore;
    use larder_core::errors::ErrorCode;
    use larder_core::models::{Ingredient, IngredientUnit, Visibility};

    fn service() -> (GroceryListService, Arc<InMemoryRepository>) {
        let repo = Arc::new(InMemoryRepository::new());
        let layer = OverrideLayer::new(Arc::new(InMemoryOverrideStore::default()));
        (
            GroceryListService::new(repo.clone(), repo.clone(), layer),
            repo,
        )
    }

    #[tokio::test]
    async fn test_private_recipe_of_other_owner_is_rejected() {
        let (service, repo) = service();
        let recipe = Recipe::new("bob", "Secret Stew")
            .with_ingredient(Ingredient::new("Beef", 500.0, IngredientUnit::G));
        let recipe_id = recipe.id;
        repo.save_recipe(recipe).await.unwrap();

        let err = service.add_recipe("alice", recipe_id, 1.0).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::PermissionDenied);
        assert!(service.active_list("alice").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_public_recipe_can_be_added_by_anyone() {
        let (service, repo) = service();
        let recipe = Recipe::new("bob", "Chili")
            .with_ingredient(Ingredient::new("Beans", 2.0, IngredientUnit::Unit))
            .with_visibility(Visibility::Public);
        let recipe_id = recipe.id;
        repo.save_recipe(recipe).await.unwrap();

        let added = service.add_recipe("alice", recipe_id, 2.0).await.unwrap();
        assert!(added.inserted);
        let view = service.view("alice", added.list.id, None).await.unwrap();
        let line = view.view.find("beans::unit").unwrap();
        assert!((line.item.total_quantity - 4.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_stocked_items_suggest_matching_lines() {
        let (service, repo) = service();
        let recipe = Recipe::new("alice", "Pasta")
            .with_ingredient(Ingredient::new("Salt", 1.0, IngredientUnit::Tsp))
            .with_ingredient(Ingredient::new("Spaghetti", 200.0, IngredientUnit::G));
        let recipe_id = recipe.id;
        repo.save_recipe(recipe).await.unwrap();
        let added = service.add_recipe("alice", recipe_id, 1.0).await.unwrap();
        service
            .add_stocked_item("alice", " salt ", Aisle::Spices, None)
            .await
            .unwrap();

        let view = service.view("alice", added.list.id, None).await.unwrap();
        assert_eq!(view.stocked_suggestions, vec!["salt::tsp".to_owned()]);
    }
}
