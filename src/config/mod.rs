// ABOUTME: Configuration module for environment-driven runtime settings
// ABOUTME: Override backend selection, database location, and aggregation merge strategy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Configuration is read from environment variables only; CLI flags may
//! override individual values after loading.

/// Environment variable parsing
pub mod environment;

pub use environment::{DatabaseUrl, Environment, LarderConfig, OverrideBackend, OverrideConfig};
