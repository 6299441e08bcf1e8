// ABOUTME: Shared fixtures for larder integration tests
// ABOUTME: Builds services over in-memory stores and seeds common recipes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

#![allow(dead_code, clippy::unwrap_used)]

use std::sync::Arc;

use larder::database::{InMemoryRepository, RecipeRepository};
use larder::models::{Aisle, Ingredient, IngredientUnit, Recipe, Visibility};
use larder::overrides::{InMemoryOverrideStore, OverrideLayer};
use larder::services::GroceryListService;

pub const OWNER: &str = "alice";

/// Service plus handles to its backing stores
pub struct TestHarness {
    pub service: GroceryListService,
    pub repo: Arc<InMemoryRepository>,
    pub store: Arc<InMemoryOverrideStore>,
}

pub fn harness() -> TestHarness {
    let repo = Arc::new(InMemoryRepository::new());
    let store = Arc::new(InMemoryOverrideStore::default());
    let service = GroceryListService::new(
        repo.clone(),
        repo.clone(),
        OverrideLayer::new(store.clone()),
    );
    TestHarness {
        service,
        repo,
        store,
    }
}

pub fn pancakes(owner: &str) -> Recipe {
    Recipe::new(owner, "Pancakes")
        .with_ingredient(Ingredient::new("Flour", 2.0, IngredientUnit::Cup).with_aisle(Aisle::Baking))
        .with_ingredient(Ingredient::new("Eggs", 2.0, IngredientUnit::Unit).with_aisle(Aisle::Dairy))
        .with_ingredient(
            Ingredient::new("Milk", 1.5, IngredientUnit::Cup)
                .with_aisle(Aisle::Dairy)
                .with_notes("whole"),
        )
        .with_ingredient(Ingredient::new("Salt", 0.5, IngredientUnit::Tsp).with_aisle(Aisle::Spices))
}

pub fn omelette(owner: &str) -> Recipe {
    Recipe::new(owner, "Omelette")
        .with_ingredient(Ingredient::new("eggs ", 3.0, IngredientUnit::Unit).with_aisle(Aisle::Dairy))
        .with_ingredient(Ingredient::new("Milk", 2.0, IngredientUnit::Tbsp).with_aisle(Aisle::Dairy))
        .with_ingredient(Ingredient::new("Salt", 1.0, IngredientUnit::Tsp).with_aisle(Aisle::Spices))
}

pub fn public(recipe: Recipe) -> Recipe {
    recipe.with_visibility(Visibility::Public)
}

pub async fn seed(harness: &TestHarness, recipe: Recipe) -> Recipe {
    harness.repo.save_recipe(recipe.clone()).await.unwrap();
    recipe
}
