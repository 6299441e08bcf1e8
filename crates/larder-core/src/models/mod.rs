// ABOUTME: Core data models shared by the grocery engine, repositories, and services
// ABOUTME: Re-exports units, recipes, shopping list types, and validation helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

/// Recipe, ingredient, and step models
pub mod recipe;
/// Shopping list, entries, custom and stocked items
pub mod shopping_list;
/// Unified unit and aisle enumerations
pub mod units;
/// Data-entry validation helpers
pub mod validation;

pub use recipe::{Ingredient, Recipe, RecipeStep, Visibility};
pub use shopping_list::{
    checked_entry, CustomItem, CustomItemDraft, CustomItemPatch, ShoppingList, ShoppingListEntry,
    StockedItem,
};
pub use units::{Aisle, IngredientUnit};
