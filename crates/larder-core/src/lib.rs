// ABOUTME: Core types and constants for the Larder grocery list platform
// ABOUTME: Foundation crate with error handling, unit/aisle enumerations, and domain models
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

#![deny(unsafe_code)]

//! # Larder Core
//!
//! Foundation crate providing shared types and constants for the Larder recipe
//! and grocery list platform. This crate is designed to change infrequently,
//! enabling incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and the aggregation error taxonomy
//! - **constants**: Conversion factors, defaults, and storage key prefixes
//! - **models**: Recipes, ingredients, shopping lists, custom and stocked items

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (Recipe, Ingredient, `CustomItem`, units and aisles)
pub mod models;
