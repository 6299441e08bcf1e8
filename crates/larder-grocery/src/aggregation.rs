// ABOUTME: Combines scaled recipe ingredients and custom items into an aisle-grouped list
// ABOUTME: Pure function of its inputs; recomputed from scratch whenever the list changes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use larder_core::errors::{AggregationError, AppError};
use larder_core::models::{Aisle, CustomItem, IngredientUnit, Recipe};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::conversion::{base_factor, unit_family};
use crate::normalize::{resolve_aisle, GroupingKey};

/// How recipe-derived lines are matched against each other
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeStrategy {
    /// Same normalized name and identical unit
    #[default]
    ExactUnit,
    /// Same normalized name and unit family; totals are kept in the family's base unit
    UnitFamily,
}

impl MergeStrategy {
    /// Configuration token
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ExactUnit => "exact",
            Self::UnitFamily => "family",
        }
    }
}

impl fmt::Display for MergeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MergeStrategy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "exact" | "exact_unit" => Ok(Self::ExactUnit),
            "family" | "unit_family" => Ok(Self::UnitFamily),
            other => Err(AppError::invalid_input(format!(
                "Unknown merge strategy '{other}' (expected 'exact' or 'family')"
            ))),
        }
    }
}

/// One line of the aggregated grocery list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedIngredient {
    /// Grouping key; also the key override state refers to
    pub key: String,
    /// Display name, as first entered
    pub name: String,
    /// Sum of every scaled contribution; always finite and greater than zero
    pub total_quantity: f64,
    /// Unit the total is expressed in
    pub unit: IngredientUnit,
    /// Store section
    pub aisle: Aisle,
    /// Distinct notes in the order they were first seen
    pub notes: Vec<String>,
    /// Whether the line is a user-entered custom item
    pub is_custom: bool,
    /// Identifier of the custom item, when `is_custom`
    pub custom_item_id: Option<Uuid>,
    /// Recipes that contributed to the total, in the order they were first seen
    pub sources: Vec<Uuid>,
}

impl CombinedIngredient {
    fn push_note(&mut self, note: Option<&str>) {
        let Some(note) = note.map(str::trim).filter(|n| !n.is_empty()) else {
            return;
        };
        if !self.notes.iter().any(|existing| existing == note) {
            self.notes.push(note.to_owned());
        }
    }

    fn push_source(&mut self, recipe_id: Uuid) {
        if !self.sources.contains(&recipe_id) {
            self.sources.push(recipe_id);
        }
    }

    fn checked(self) -> Result<Self, AggregationError> {
        if self.total_quantity.is_finite() && self.total_quantity > 0.0 {
            Ok(self)
        } else {
            Err(AggregationError::InvalidTotal {
                key: self.key,
                total: self.total_quantity,
            })
        }
    }
}

/// Aggregated lines grouped by aisle
///
/// Aisles iterate alphabetically by key; lines within an aisle are sorted by
/// case-insensitive name, then unit, then key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AisleGroupedList {
    groups: BTreeMap<Aisle, Vec<CombinedIngredient>>,
}

impl AisleGroupedList {
    /// Whether the list has no lines at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of lines across every aisle
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Number of non-empty aisles
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Aisles with their lines, in display order
    pub fn iter(&self) -> impl Iterator<Item = (Aisle, &[CombinedIngredient])> {
        self.groups
            .iter()
            .map(|(aisle, lines)| (*aisle, lines.as_slice()))
    }

    /// Every line, aisle by aisle
    pub fn lines(&self) -> impl Iterator<Item = &CombinedIngredient> {
        self.groups.values().flatten()
    }

    /// Lines filed under `aisle`
    #[must_use]
    pub fn get(&self, aisle: Aisle) -> Option<&[CombinedIngredient]> {
        self.groups.get(&aisle).map(Vec::as_slice)
    }

    /// Look a line up by its grouping key
    #[must_use]
    pub fn find(&self, key: &str) -> Option<&CombinedIngredient> {
        self.lines().find(|line| line.key == key)
    }

    /// Consume into the underlying map
    #[must_use]
    pub fn into_groups(self) -> BTreeMap<Aisle, Vec<CombinedIngredient>> {
        self.groups
    }

    fn from_lines(lines: Vec<CombinedIngredient>) -> Self {
        let mut groups: BTreeMap<Aisle, Vec<CombinedIngredient>> = BTreeMap::new();
        for line in lines {
            groups.entry(line.aisle).or_default().push(line);
        }
        for group in groups.values_mut() {
            group.sort_by_cached_key(|line| {
                (line.name.to_lowercase(), line.unit.as_str(), line.key.clone())
            });
        }
        Self { groups }
    }
}

/// Aggregation engine
///
/// # Examples
///
/// ```rust
/// use larder_core::models::{Ingredient, IngredientUnit, Recipe};
/// use larder_grocery::aggregation::{Aggregator, MergeStrategy};
///
/// let pancakes = Recipe::new("alice", "Pancakes")
///     .with_ingredient(Ingredient::new("Milk", 1.0, IngredientUnit::Cup));
/// let latte = Recipe::new("alice", "Latte")
///     .with_ingredient(Ingredient::new("milk", 120.0, IngredientUnit::Ml));
///
/// let list = Aggregator::new()
///     .with_strategy(MergeStrategy::UnitFamily)
///     .aggregate(&[(&pancakes, 1.0), (&latte, 1.0)], &[])
///     .unwrap();
/// assert_eq!(list.len(), 1);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Aggregator {
    strategy: MergeStrategy,
}

impl Aggregator {
    /// Aggregator using exact unit matching
    #[must_use]
    pub const fn new() -> Self {
        Self {
            strategy: MergeStrategy::ExactUnit,
        }
    }

    /// Select the merge strategy
    #[must_use]
    pub const fn with_strategy(mut self, strategy: MergeStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Strategy in use
    #[must_use]
    pub const fn strategy(&self) -> MergeStrategy {
        self.strategy
    }

    /// Combine every scaled recipe ingredient and custom item into one list
    ///
    /// All or nothing: the first malformed input aborts the whole call.
    ///
    /// # Errors
    ///
    /// Returns an error if a multiplier or quantity is not finite and strictly
    /// positive, or if a combined total ends up that way
    pub fn aggregate(
        &self,
        entries: &[(&Recipe, f64)],
        custom_items: &[CustomItem],
    ) -> Result<AisleGroupedList, AggregationError> {
        let mut lines: Vec<CombinedIngredient> = Vec::new();
        let mut index: HashMap<GroupingKey, usize> = HashMap::new();

        for (recipe, multiplier) in entries {
            check_multiplier(recipe, *multiplier)?;

            for ingredient in &recipe.ingredients {
                check_quantity(&ingredient.name_raw, ingredient.quantity)?;
                let scaled = ingredient.quantity * multiplier;

                let (key, unit, quantity) = match self.strategy {
                    MergeStrategy::ExactUnit => (
                        GroupingKey::recipe(&ingredient.name_raw, ingredient.unit),
                        ingredient.unit,
                        scaled,
                    ),
                    MergeStrategy::UnitFamily => {
                        let family = unit_family(ingredient.unit);
                        (
                            GroupingKey::family(&ingredient.name_raw, family),
                            family.base_unit(),
                            scaled * base_factor(ingredient.unit),
                        )
                    }
                };

                let line = if let Some(&slot) = index.get(&key) {
                    let line = &mut lines[slot];
                    line.total_quantity += quantity;
                    line
                } else {
                    index.insert(key.clone(), lines.len());
                    lines.push(CombinedIngredient {
                        key: key.to_string(),
                        name: ingredient.name_raw.trim().to_owned(),
                        total_quantity: quantity,
                        unit,
                        aisle: resolve_aisle(ingredient.aisle),
                        notes: Vec::new(),
                        is_custom: false,
                        custom_item_id: None,
                        sources: Vec::new(),
                    });
                    let last = lines.len() - 1;
                    &mut lines[last]
                };
                line.push_note(ingredient.notes.as_deref());
                line.push_source(recipe.id);
            }
        }

        for item in custom_items {
            check_quantity(&item.name, item.quantity)?;
            let key = GroupingKey::custom(item.id);
            let mut line = CombinedIngredient {
                key: key.to_string(),
                name: item.name.trim().to_owned(),
                total_quantity: item.quantity,
                unit: item.unit,
                aisle: item.aisle,
                notes: Vec::new(),
                is_custom: true,
                custom_item_id: Some(item.id),
                sources: Vec::new(),
            };
            line.push_note(item.notes.as_deref());

            // A repeated id replaces the earlier line
            if let Some(&slot) = index.get(&key) {
                lines[slot] = line;
            } else {
                index.insert(key, lines.len());
                lines.push(line);
            }
        }

        let lines = lines
            .into_iter()
            .map(CombinedIngredient::checked)
            .collect::<Result<Vec<_>, _>>()?;
        let list = AisleGroupedList::from_lines(lines);

        debug!(
            recipes = entries.len(),
            custom_items = custom_items.len(),
            lines = list.len(),
            aisles = list.group_count(),
            strategy = self.strategy.as_str(),
            "Aggregated grocery list"
        );
        Ok(list)
    }
}

/// Aggregate with exact unit matching
///
/// # Errors
///
/// See [`Aggregator::aggregate`]
pub fn aggregate(
    entries: &[(&Recipe, f64)],
    custom_items: &[CustomItem],
) -> Result<AisleGroupedList, AggregationError> {
    Aggregator::new().aggregate(entries, custom_items)
}

fn check_multiplier(recipe: &Recipe, multiplier: f64) -> Result<(), AggregationError> {
    if multiplier.is_finite() && multiplier > 0.0 {
        Ok(())
    } else {
        Err(AggregationError::InvalidMultiplier {
            recipe: recipe.title.clone(),
            multiplier,
        })
    }
}

fn check_quantity(item: &str, quantity: f64) -> Result<(), AggregationError> {
    if !quantity.is_finite() {
        return Err(AggregationError::NonFiniteQuantity {
            item: item.trim().to_owned(),
            quantity,
        });
    }
    if quantity <= 0.0 {
        return Err(AggregationError::NonPositiveQuantity {
            item: item.trim().to_owned(),
            quantity,
        });
    }
    Ok(())
}
