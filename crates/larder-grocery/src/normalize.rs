// ABOUTME: Name normalization, aisle fallback, and the grouping key lines merge under
// ABOUTME: Recipe lines key on name plus unit (or family), custom items on their own id
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use std::fmt;

use larder_core::models::{Aisle, IngredientUnit};
use uuid::Uuid;

use crate::conversion::UnitFamily;

/// Comparable form of an ingredient name: trimmed and lower-cased
#[must_use]
pub fn normalize_name(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Aisle a line is filed under; ingredients without one land in `other`
#[must_use]
pub fn resolve_aisle(aisle: Option<Aisle>) -> Aisle {
    aisle.unwrap_or_default()
}

/// Identity under which lines are combined
///
/// The string form doubles as the key override state is stored under, so it
/// must stay stable across releases.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GroupingKey {
    /// Same normalized name, same unit
    Recipe {
        /// Normalized name
        name: String,
        /// Exact unit
        unit: IngredientUnit,
    },
    /// Same normalized name, same unit family
    Family {
        /// Normalized name
        name: String,
        /// Unit family the quantities were converted within
        family: UnitFamily,
    },
    /// A user-entered item, never merged with anything else
    Custom(Uuid),
}

impl GroupingKey {
    /// Key for a recipe ingredient merged by exact unit
    #[must_use]
    pub fn recipe(name_raw: &str, unit: IngredientUnit) -> Self {
        Self::Recipe {
            name: normalize_name(name_raw),
            unit,
        }
    }

    /// Key for a recipe ingredient merged by unit family
    #[must_use]
    pub fn family(name_raw: &str, family: UnitFamily) -> Self {
        Self::Family {
            name: normalize_name(name_raw),
            family,
        }
    }

    /// Key for a custom item
    #[must_use]
    pub const fn custom(id: Uuid) -> Self {
        Self::Custom(id)
    }

    /// Whether this key identifies a custom item
    #[must_use]
    pub const fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }
}

impl fmt::Display for GroupingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Recipe { name, unit } => write!(f, "{name}::{unit}"),
            Self::Family { name, family } => write!(f, "{name}::{family}"),
            Self::Custom(id) => write!(f, "{id}"),
        }
    }
}
