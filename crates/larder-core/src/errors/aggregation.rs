// ABOUTME: Error taxonomy for grocery list aggregation over recipe and custom item snapshots
// ABOUTME: Names the offending ingredient so callers can surface a precise message
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

/// Errors raised while combining ingredients into a grocery list.
///
/// Upstream validation is expected to make every variant unreachable; the
/// engine still reports them instead of producing a corrupt total.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AggregationError {
    /// Quantity is NaN or infinite
    #[error("Quantity for '{item}' is not a finite number ({quantity})")]
    NonFiniteQuantity {
        /// Display name of the ingredient or custom item
        item: String,
        /// Offending quantity
        quantity: f64,
    },

    /// Quantity is zero or negative
    #[error("Quantity for '{item}' must be greater than 0 (got {quantity})")]
    NonPositiveQuantity {
        /// Display name of the ingredient or custom item
        item: String,
        /// Offending quantity
        quantity: f64,
    },

    /// Serving multiplier is zero, negative, or not finite
    #[error("Serving multiplier for recipe '{recipe}' must be a finite number greater than 0 (got {multiplier})")]
    InvalidMultiplier {
        /// Title of the recipe carrying the multiplier
        recipe: String,
        /// Offending multiplier
        multiplier: f64,
    },

    /// A combined total ended up non-finite or not strictly positive
    #[error("Combined total for '{key}' is invalid ({total})")]
    InvalidTotal {
        /// Grouping key of the combined line
        key: String,
        /// Offending total
        total: f64,
    },
}

impl AggregationError {
    /// Whether the error stems from malformed caller input rather than an
    /// arithmetic failure inside the engine
    #[must_use]
    pub const fn is_input_error(&self) -> bool {
        !matches!(self, Self::InvalidTotal { .. })
    }
}
