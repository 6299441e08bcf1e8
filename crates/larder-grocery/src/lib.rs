// ABOUTME: Grocery list aggregation engine for the Larder platform
// ABOUTME: Unit conversion, name normalization, aggregation, and display projection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

#![deny(unsafe_code)]

//! Grocery list aggregation engine.
//!
//! Combines the ingredients of every recipe on a shopping list, each scaled by
//! its serving multiplier, with the list's custom items into a deduplicated,
//! aisle-grouped list. Everything here is synchronous and free of I/O; callers
//! pass in a consistent snapshot and get the whole list back or an error.

/// Unit families and base-unit conversion factors
pub mod conversion;
/// Ingredient name normalization and grouping keys
pub mod normalize;
/// Aggregation engine
pub mod aggregation;
/// Quantity, heading, and line formatting
pub mod projection;

pub use aggregation::{aggregate, Aggregator, AisleGroupedList, CombinedIngredient, MergeStrategy};
pub use conversion::{ConversionError, UnitFamily};
pub use normalize::{normalize_name, GroupingKey};
pub use projection::{aisle_heading, format_line, format_quantity};
