// ABOUTME: Snapshot file format for larder-cli and its loader
// ABOUTME: Seeds recipes, the active list, custom items, and stocked items into a repository
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use std::path::Path;

use anyhow::{anyhow, Result};
use chrono::Utc;
use larder::database::{InMemoryRepository, RecipeRepository, ShoppingListRepository};
use larder::models::validation::validate_name;
use larder::models::{Aisle, CustomItemDraft, Recipe, ShoppingList, ShoppingListEntry};
use larder::services::GroceryListService;
use larder_core::constants::lists::DEFAULT_LIST_TITLE;
use serde::Deserialize;
use tokio::fs;
use tracing::info;
use uuid::Uuid;

/// Everything needed to build one owner's grocery list
#[derive(Debug, Deserialize)]
pub struct Snapshot {
    /// Owner of the list
    pub owner: String,
    /// Recipes that entries may refer to
    #[serde(default)]
    pub recipes: Vec<Recipe>,
    /// The active list
    #[serde(default)]
    pub list: SnapshotList,
    /// Things the owner always keeps at home
    #[serde(default)]
    pub stocked: Vec<SnapshotStocked>,
}

/// The active list; a fixed `id` keeps override state stable across runs
#[derive(Debug, Default, Deserialize)]
pub struct SnapshotList {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub entries: Vec<ShoppingListEntry>,
    #[serde(default)]
    pub custom_items: Vec<SnapshotCustomItem>,
}

#[derive(Debug, Deserialize)]
pub struct SnapshotCustomItem {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(flatten)]
    pub draft: CustomItemDraft,
}

#[derive(Debug, Deserialize)]
pub struct SnapshotStocked {
    pub name: String,
    #[serde(default)]
    pub aisle: Aisle,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Parse a snapshot file; JSON is accepted as YAML
pub async fn read(path: &Path) -> Result<Snapshot> {
    let raw = fs::read_to_string(path)
        .await
        .map_err(|e| anyhow!("Failed to read snapshot {}: {e}", path.display()))?;
    parse(&raw).map_err(|e| anyhow!("Invalid snapshot {}: {e}", path.display()))
}

fn parse(raw: &str) -> Result<Snapshot, serde_yaml::Error> {
    serde_yaml::from_str(raw)
}

/// Seed `repo` with the snapshot and return the active list id
pub async fn load(
    snapshot: Snapshot,
    repo: &InMemoryRepository,
    service: &GroceryListService,
) -> Result<Uuid> {
    let owner = snapshot.owner;
    let recipe_count = snapshot.recipes.len();
    for recipe in snapshot.recipes {
        repo.save_recipe(recipe).await?;
    }

    let title = match snapshot.list.title.as_deref() {
        Some(title) => validate_name("List title", title)?,
        None => DEFAULT_LIST_TITLE.to_owned(),
    };
    let mut list = ShoppingList::new_active(owner.as_str(), title, Utc::now());
    if let Some(id) = snapshot.list.id {
        list.id = id;
    }
    let list_id = list.id;
    repo.import_list(list, Vec::new(), Vec::new()).await?;

    for entry in &snapshot.list.entries {
        service
            .add_recipe(&owner, entry.recipe_id, entry.serving_multiplier)
            .await?;
    }
    for custom in snapshot.list.custom_items {
        let mut item = custom.draft.into_item()?;
        if let Some(id) = custom.id {
            item.id = id;
        }
        repo.add_custom_item(&owner, list_id, item).await?;
    }
    for stocked in &snapshot.stocked {
        service
            .add_stocked_item(&owner, &stocked.name, stocked.aisle, stocked.notes.as_deref())
            .await?;
    }

    info!(
        user.id = %owner,
        list.id = %list_id,
        recipes = recipe_count,
        entries = snapshot.list.entries.len(),
        "Snapshot loaded"
    );
    Ok(list_id)
}
