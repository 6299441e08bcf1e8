// ABOUTME: Data-entry validation for quantities, multipliers, names, and notes
// ABOUTME: Shared by the list service and the drafts accepted from callers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use crate::constants::lists::{MAX_ITEM_NAME_LEN, MAX_NOTES_LEN};
use crate::errors::{AppError, AppResult};

/// Ensure a quantity is finite and strictly positive
///
/// # Errors
///
/// Returns `ValueOutOfRange` when the quantity is zero, negative, NaN or infinite
pub fn validate_quantity(quantity: f64) -> AppResult<f64> {
    if quantity.is_finite() && quantity > 0.0 {
        Ok(quantity)
    } else {
        Err(AppError::out_of_range("Quantity must be greater than 0"))
    }
}

/// Ensure a serving multiplier is finite and strictly positive
///
/// # Errors
///
/// Returns `ValueOutOfRange` when the multiplier is zero, negative, NaN or infinite
pub fn validate_multiplier(multiplier: f64) -> AppResult<f64> {
    if multiplier.is_finite() && multiplier > 0.0 {
        Ok(multiplier)
    } else {
        Err(AppError::out_of_range(
            "Serving multiplier must be greater than 0",
        ))
    }
}

/// Trim a required name and enforce its length limit
///
/// # Errors
///
/// Returns `MissingRequiredField` for blank names and `ValueOutOfRange` for
/// names longer than the limit
pub fn validate_name(field: &str, name: &str) -> AppResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::missing_field(field));
    }
    if trimmed.chars().count() > MAX_ITEM_NAME_LEN {
        return Err(AppError::out_of_range(format!(
            "{field} must be at most {MAX_ITEM_NAME_LEN} characters"
        )));
    }
    Ok(trimmed.to_owned())
}

/// Trim optional notes, collapsing blank notes to `None`
///
/// # Errors
///
/// Returns `ValueOutOfRange` for notes longer than the limit
pub fn normalize_notes(notes: Option<&str>) -> AppResult<Option<String>> {
    let Some(trimmed) = notes.map(str::trim).filter(|n| !n.is_empty()) else {
        return Ok(None);
    };
    if trimmed.chars().count() > MAX_NOTES_LEN {
        return Err(AppError::out_of_range(format!(
            "Notes must be at most {MAX_NOTES_LEN} characters"
        )));
    }
    Ok(Some(trimmed.to_owned()))
}
