// ABOUTME: Single enumerated definition of ingredient units and grocery aisles
// ABOUTME: Consumed by validation, aggregation, persistence, and display alike
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Ingredient measurement unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum IngredientUnit {
    /// Count of whole items (eggs, lemons, cans)
    #[default]
    Unit,
    /// Teaspoons
    Tsp,
    /// Tablespoons
    Tbsp,
    /// US cups
    Cup,
    /// Milliliters
    Ml,
    /// Liters
    L,
    /// Grams
    G,
    /// Kilograms
    Kg,
    /// Ounces (weight)
    Oz,
    /// Pounds
    Lb,
    /// A pinch (1/16 teaspoon)
    Pinch,
    /// A dash (1/8 teaspoon)
    Dash,
}

impl IngredientUnit {
    /// Every unit, in the order offered to users
    pub const ALL: [Self; 12] = [
        Self::Unit,
        Self::Tsp,
        Self::Tbsp,
        Self::Cup,
        Self::Ml,
        Self::L,
        Self::G,
        Self::Kg,
        Self::Oz,
        Self::Lb,
        Self::Pinch,
        Self::Dash,
    ];

    /// Token used for storage, grouping keys, and display
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unit => "unit",
            Self::Tsp => "tsp",
            Self::Tbsp => "tbsp",
            Self::Cup => "cup",
            Self::Ml => "ml",
            Self::L => "l",
            Self::G => "g",
            Self::Kg => "kg",
            Self::Oz => "oz",
            Self::Lb => "lb",
            Self::Pinch => "pinch",
            Self::Dash => "dash",
        }
    }
}

impl fmt::Display for IngredientUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IngredientUnit {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|unit| unit.as_str() == token)
            .ok_or_else(|| AppError::invalid_input(format!("Unrecognized unit: {s}")))
    }
}

/// Grocery store section used to group list lines
///
/// Ordering follows the aisle key alphabetically, which is the order aisle
/// groups are presented in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Aisle {
    /// Fresh fruit and vegetables
    Produce,
    /// Meat counter
    Meat,
    /// Fish and shellfish
    Seafood,
    /// Milk, cheese, eggs
    Dairy,
    /// Bread and pastries
    Bakery,
    /// Canned goods
    Canned,
    /// Pasta, rice, grains
    DryGoods,
    /// Frozen foods
    Frozen,
    /// Herbs and spices
    Spices,
    /// Flour, sugar, baking supplies
    Baking,
    /// Drinks
    Beverages,
    /// Anything else
    #[default]
    Other,
}

impl Aisle {
    /// Every aisle, in the order offered to users
    pub const ALL: [Self; 12] = [
        Self::Produce,
        Self::Meat,
        Self::Seafood,
        Self::Dairy,
        Self::Bakery,
        Self::Canned,
        Self::DryGoods,
        Self::Frozen,
        Self::Spices,
        Self::Baking,
        Self::Beverages,
        Self::Other,
    ];

    /// Aisle key as stored and grouped
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Produce => "produce",
            Self::Meat => "meat",
            Self::Seafood => "seafood",
            Self::Dairy => "dairy",
            Self::Bakery => "bakery",
            Self::Canned => "canned",
            Self::DryGoods => "dry_goods",
            Self::Frozen => "frozen",
            Self::Spices => "spices",
            Self::Baking => "baking",
            Self::Beverages => "beverages",
            Self::Other => "other",
        }
    }
}

impl Ord for Aisle {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl PartialOrd for Aisle {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Aisle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Aisle {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Forms submit upper-cased, space separated labels ("DRY GOODS")
        let token = s.trim().to_lowercase().replace(' ', "_");
        Self::ALL
            .into_iter()
            .find(|aisle| aisle.as_str() == token)
            .ok_or_else(|| AppError::invalid_input(format!("Unrecognized aisle: {s}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_tokens_round_trip_through_from_str() {
        for unit in IngredientUnit::ALL {
            assert_eq!(unit.as_str().parse::<IngredientUnit>().ok(), Some(unit));
        }
        assert!("cups".parse::<IngredientUnit>().is_err());
    }

    #[test]
    fn test_aisle_ordering_is_alphabetical_by_key() {
        let mut aisles = Aisle::ALL.to_vec();
        aisles.sort();
        let keys: Vec<&str> = aisles.iter().map(Aisle::as_str).collect();
        let mut expected = keys.clone();
        expected.sort_unstable();
        assert_eq!(keys, expected);
        assert!(Aisle::Dairy < Aisle::Produce);
        assert!(Aisle::DryGoods < Aisle::Frozen);
    }

    #[test]
    fn test_aisle_accepts_display_labels() {
        assert_eq!("DRY GOODS".parse::<Aisle>().ok(), Some(Aisle::DryGoods));
        assert_eq!(Aisle::default(), Aisle::Other);
    }
}
