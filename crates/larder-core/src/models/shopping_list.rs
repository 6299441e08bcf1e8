// ABOUTME: Shopping list instance, recipe entries, custom items, and stocked items
// ABOUTME: Drafts and patches validate user input before it reaches persistence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::units::{Aisle, IngredientUnit};
use super::validation::{normalize_notes, validate_multiplier, validate_name, validate_quantity};
use crate::constants::lists::DEFAULT_SERVING_MULTIPLIER;
use crate::errors::AppResult;

const fn default_multiplier() -> f64 {
    DEFAULT_SERVING_MULTIPLIER
}

/// A shopping list instance
///
/// Each owner has at most one active list; archived lists are kept as history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingList {
    /// Unique list identifier
    pub id: Uuid,
    /// Owner identifier issued by the identity provider
    pub owner_id: String,
    /// Display title
    pub title: String,
    /// Whether this is the owner's current list
    pub is_active: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl ShoppingList {
    /// Create a new active list
    #[must_use]
    pub fn new_active(
        owner_id: impl Into<String>,
        title: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id: owner_id.into(),
            title: title.into(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Title an archived list by the span it was active, e.g. `Mar 3 - Mar 10, 2025`
    #[must_use]
    pub fn archive_title(created_at: DateTime<Utc>, archived_at: DateTime<Utc>) -> String {
        format!(
            "{} - {}",
            created_at.format("%b %-d"),
            archived_at.format("%b %-d, %Y")
        )
    }
}

/// "This recipe, scaled by this factor, is part of this list"
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShoppingListEntry {
    /// Recipe included in the list
    pub recipe_id: Uuid,
    /// Scale factor applied to every ingredient of the recipe
    #[serde(default = "default_multiplier")]
    pub serving_multiplier: f64,
}

impl ShoppingListEntry {
    /// Create an entry with the default multiplier
    #[must_use]
    pub const fn new(recipe_id: Uuid) -> Self {
        Self {
            recipe_id,
            serving_multiplier: DEFAULT_SERVING_MULTIPLIER,
        }
    }

    /// Create an entry with an explicit multiplier
    #[must_use]
    pub const fn scaled(recipe_id: Uuid, serving_multiplier: f64) -> Self {
        Self {
            recipe_id,
            serving_multiplier,
        }
    }
}

/// A line entered directly by the user, not derived from any recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomItem {
    /// Persistent identifier; also the item's override key
    pub id: Uuid,
    /// Item name
    pub name: String,
    /// Amount in `unit`
    pub quantity: f64,
    /// Measurement unit
    #[serde(default)]
    pub unit: IngredientUnit,
    /// Store section
    #[serde(default)]
    pub aisle: Aisle,
    /// Free-text notes
    #[serde(default)]
    pub notes: Option<String>,
}

/// Unvalidated request to add a custom item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomItemDraft {
    /// Item name
    pub name: String,
    /// Amount in `unit`
    pub quantity: f64,
    /// Measurement unit
    #[serde(default)]
    pub unit: IngredientUnit,
    /// Store section, `other` when omitted
    #[serde(default)]
    pub aisle: Option<Aisle>,
    /// Free-text notes
    #[serde(default)]
    pub notes: Option<String>,
}

impl CustomItemDraft {
    /// Create a draft in the `other` aisle
    #[must_use]
    pub fn new(name: impl Into<String>, quantity: f64, unit: IngredientUnit) -> Self {
        Self {
            name: name.into(),
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

    /// Add notes
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Validate the draft and assign it a fresh identifier
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank or too long, the quantity is not
    /// strictly positive, or the notes are too long
    pub fn into_item(self) -> AppResult<CustomItem> {
        Ok(CustomItem {
            id: Uuid::new_v4(),
            name: validate_name("Item name", &self.name)?,
            quantity: validate_quantity(self.quantity)?,
            unit: self.unit,
            aisle: self.aisle.unwrap_or_default(),
            notes: normalize_notes(self.notes.as_deref())?,
        })
    }
}

/// Partial update of a custom item; `None` leaves a field untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomItemPatch {
    /// New name
    #[serde(default)]
    pub name: Option<String>,
    /// New quantity
    #[serde(default)]
    pub quantity: Option<f64>,
    /// New unit
    #[serde(default)]
    pub unit: Option<IngredientUnit>,
    /// New aisle
    #[serde(default)]
    pub aisle: Option<Aisle>,
    /// New notes; `Some("")` clears them
    #[serde(default)]
    pub notes: Option<String>,
}

impl CustomItemPatch {
    /// Validate every provided field, then apply them all
    ///
    /// Nothing is written when any field is invalid.
    ///
    /// # Errors
    ///
    /// Returns an error if a provided field fails validation
    pub fn apply_to(&self, item: &mut CustomItem) -> AppResult<()> {
        let name = self
            .name
            .as_deref()
            .map(|n| validate_name("Item name", n))
            .transpose()?;
        let quantity = self.quantity.map(validate_quantity).transpose()?;
        let notes = self
            .notes
            .as_deref()
            .map(|n| normalize_notes(Some(n)))
            .transpose()?;

        if let Some(name) = name {
            item.name = name;
        }
        if let Some(quantity) = quantity {
            item.quantity = quantity;
        }
        if let Some(unit) = self.unit {
            item.unit = unit;
        }
        if let Some(aisle) = self.aisle {
            item.aisle = aisle;
        }
        if let Some(notes) = notes {
            item.notes = notes;
        }
        Ok(())
    }
}

/// Something the user always keeps at home
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockedItem {
    /// Unique identifier
    pub id: Uuid,
    /// Owner identifier issued by the identity provider
    pub owner_id: String,
    /// Item name
    pub name: String,
    /// Store section
    pub aisle: Aisle,
    /// Whether the item is permanently stocked
    pub always_stocked: bool,
    /// Free-text notes
    pub notes: Option<String>,
}

impl StockedItem {
    /// Validate and create a stocked item
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank or too long, or the notes are too long
    pub fn new(
        owner_id: impl Into<String>,
        name: &str,
        aisle: Aisle,
        notes: Option<&str>,
    ) -> AppResult<Self> {
        Ok(Self {
            id: Uuid::new_v4(),
            owner_id: owner_id.into(),
            name: validate_name("Item name", name)?,
            aisle,
            always_stocked: true,
            notes: normalize_notes(notes)?,
        })
    }
}

/// Validate a serving multiplier for an entry
///
/// # Errors
///
/// Returns `ValueOutOfRange` when the multiplier is not strictly positive
pub fn checked_entry(recipe_id: Uuid, serving_multiplier: f64) -> AppResult<ShoppingListEntry> {
    Ok(ShoppingListEntry::scaled(
        recipe_id,
        validate_multiplier(serving_multiplier)?,
    ))
}
