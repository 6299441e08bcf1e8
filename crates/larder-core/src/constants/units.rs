// ABOUTME: Unit conversion constants for volume and weight measurements
// ABOUTME: Provides named constants to eliminate magic numbers in quantity conversion
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

/// Milliliters per US cup
pub const ML_PER_CUP: f64 = 240.0;

/// Milliliters per tablespoon
pub const ML_PER_TBSP: f64 = 15.0;

/// Milliliters per teaspoon
pub const ML_PER_TSP: f64 = 5.0;

/// Milliliters per liter
pub const ML_PER_L: f64 = 1000.0;

/// Milliliters per pinch (1/16 teaspoon)
pub const ML_PER_PINCH: f64 = ML_PER_TSP / 16.0;

/// Milliliters per dash (1/8 teaspoon)
pub const ML_PER_DASH: f64 = ML_PER_TSP / 8.0;

/// Grams per ounce
pub const GRAMS_PER_OZ: f64 = 28.35;

/// Grams per pound
pub const GRAMS_PER_LB: f64 = 453.6;

/// Grams per kilogram
pub const GRAMS_PER_KG: f64 = 1000.0;
