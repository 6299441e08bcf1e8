// ABOUTME: Integration tests for environment-driven configuration
// ABOUTME: Mutates process environment variables, so every test runs serially
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::env;
use std::path::PathBuf;

use larder::config::{DatabaseUrl, Environment, LarderConfig, OverrideBackend};
use larder::{ErrorCode, MergeStrategy};
use serial_test::serial;

const VARS: [&str; 5] = [
    "LARDER_OVERRIDE_BACKEND",
    "LARDER_OVERRIDE_CAPACITY",
    "LARDER_MERGE_STRATEGY",
    "DATABASE_URL",
    "ENVIRONMENT",
];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_defaults_without_environment() {
    clear_env();
    let config = LarderConfig::from_env().unwrap();
    assert_eq!(config.environment, Environment::Development);
    assert_eq!(config.overrides.backend, OverrideBackend::Memory);
    assert_eq!(config.overrides.capacity, 10_000);
    assert_eq!(config.merge_strategy, MergeStrategy::ExactUnit);
    assert_eq!(
        config.overrides.database_url.to_connection_string(),
        "sqlite:./data/larder.db"
    );
}

#[test]
#[serial]
fn test_environment_overrides_every_setting() {
    clear_env();
    env::set_var("LARDER_OVERRIDE_BACKEND", "sqlite");
    env::set_var("LARDER_OVERRIDE_CAPACITY", "64");
    env::set_var("LARDER_MERGE_STRATEGY", "family");
    env::set_var("DATABASE_URL", "sqlite:/tmp/larder-test.db");
    env::set_var("ENVIRONMENT", "prod");

    let config = LarderConfig::from_env().unwrap();
    clear_env();

    assert!(config.environment.is_production());
    assert_eq!(config.overrides.backend, OverrideBackend::Sqlite);
    assert_eq!(config.overrides.capacity, 64);
    assert_eq!(config.merge_strategy, MergeStrategy::UnitFamily);
    assert_eq!(
        config.overrides.database_url,
        DatabaseUrl::SQLite {
            path: PathBuf::from("/tmp/larder-test.db")
        }
    );
}

#[test]
#[serial]
fn test_invalid_values_are_config_errors() {
    for (var, value) in [
        ("LARDER_OVERRIDE_BACKEND", "redis"),
        ("LARDER_OVERRIDE_CAPACITY", "0"),
        ("LARDER_OVERRIDE_CAPACITY", "lots"),
        ("LARDER_MERGE_STRATEGY", "fuzzy"),
        ("DATABASE_URL", "postgres://localhost/larder"),
    ] {
        clear_env();
        env::set_var(var, value);
        let err = LarderConfig::from_env().unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigInvalid, "{var}={value}");
    }
    clear_env();
}

#[test]
#[serial]
fn test_in_memory_database_url() {
    clear_env();
    env::set_var("DATABASE_URL", "sqlite::memory:");
    let config = LarderConfig::from_env().unwrap();
    clear_env();
    assert_eq!(config.overrides.database_url, DatabaseUrl::Memory);
}
