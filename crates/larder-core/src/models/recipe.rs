// ABOUTME: Recipe, ingredient, and step models consumed read-only by grocery aggregation
// ABOUTME: Builder-style constructors mirror how recipes arrive from the recipe collaborator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::units::{Aisle, IngredientUnit};

/// Who may view a recipe (and therefore add it to their list)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// Only the owner
    #[default]
    Private,
    /// Anyone
    Public,
}

/// Single ingredient line of a recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Name exactly as the user typed it
    pub name_raw: String,
    /// Amount in `unit`; always greater than zero
    pub quantity: f64,
    /// Measurement unit
    pub unit: IngredientUnit,
    /// Store section, `None` when the user did not pick one
    #[serde(default)]
    pub aisle: Option<Aisle>,
    /// Preparation notes ("chopped", "room temperature")
    #[serde(default)]
    pub notes: Option<String>,
}

impl Ingredient {
    /// Create an ingredient with no aisle or notes
    #[must_use]
    pub fn new(name_raw: impl Into<String>, quantity: f64, unit: IngredientUnit) -> Self {
        Self {
            name_raw: name_raw.into(),
            quantity,
            unit,
            aisle: None,
            notes: None,
        }
    }

    /// Assign a store aisle
    #[must_use]
    pub const fn with_aisle(mut self, aisle: Aisle) -> Self {
        self.aisle = Some(aisle);
        self
    }

    /// Add preparation notes
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Ordered cooking instruction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeStep {
    /// 1-based position
    pub step_number: u16,
    /// Instruction text
    pub instruction: String,
}

/// A stored recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Unique recipe identifier
    pub id: Uuid,
    /// Owner identifier issued by the identity provider
    pub owner_id: String,
    /// Recipe title
    pub title: String,
    /// Ingredient lines
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    /// Cooking steps
    #[serde(default)]
    pub steps: Vec<RecipeStep>,
    /// Who can see this recipe
    #[serde(default)]
    pub visibility: Visibility,
}

impl Recipe {
    /// Create an empty private recipe
    #[must_use]
    pub fn new(owner_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id: owner_id.into(),
            title: title.into(),
            ingredients: Vec::new(),
            steps: Vec::new(),
            visibility: Visibility::Private,
        }
    }

    /// Add an ingredient
    #[must_use]
    pub fn with_ingredient(mut self, ingredient: Ingredient) -> Self {
        self.ingredients.push(ingredient);
        self
    }

    /// Add multiple ingredients
    #[must_use]
    pub fn with_ingredients(mut self, ingredients: Vec<Ingredient>) -> Self {
        self.ingredients.extend(ingredients);
        self
    }

    /// Append a step, numbering it after the existing ones
    #[must_use]
    pub fn with_step(mut self, instruction: impl Into<String>) -> Self {
        let step_number = u16::try_from(self.steps.len() + 1).unwrap_or(u16::MAX);
        self.steps.push(RecipeStep {
            step_number,
            instruction: instruction.into(),
        });
        self
    }

    /// Set visibility
    #[must_use]
    pub const fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Whether `viewer` may see this recipe
    #[must_use]
    pub fn is_visible_to(&self, viewer: &str) -> bool {
        self.owner_id == viewer || self.visibility == Visibility::Public
    }
}
