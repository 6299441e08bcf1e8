// ABOUTME: Environment configuration for override storage, database location, and merge strategy
// ABOUTME: Parses environment variables into typed settings with defaults from larder-core
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Environment-based configuration

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use larder_core::constants::overrides::{DEFAULT_DATABASE_URL, DEFAULT_MEMORY_CAPACITY};
use larder_core::errors::{AppError, AppResult};
use larder_grocery::MergeStrategy;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Environment type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Type-safe `SQLite` location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatabaseUrl {
    /// `SQLite` database with file path
    SQLite {
        /// Database file
        path: PathBuf,
    },
    /// In-memory `SQLite` (for testing)
    Memory,
}

impl DatabaseUrl {
    /// Parse a `sqlite:` URL
    ///
    /// # Errors
    ///
    /// Returns a configuration error for any other scheme
    pub fn parse_url(s: &str) -> AppResult<Self> {
        let Some(path_str) = s.strip_prefix("sqlite:") else {
            return Err(AppError::config(format!(
                "Unsupported database URL '{s}' (expected sqlite:<path>)"
            )));
        };
        let path_str = path_str.trim_start_matches("//");
        if path_str == ":memory:" {
            Ok(Self::Memory)
        } else if path_str.is_empty() {
            Err(AppError::config("Database URL is missing a file path"))
        } else {
            Ok(Self::SQLite {
                path: PathBuf::from(path_str),
            })
        }
    }

    /// Connection string accepted by `sqlx`
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".into(),
        }
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::SQLite {
            path: PathBuf::from(
                DEFAULT_DATABASE_URL
                    .strip_prefix("sqlite:")
                    .unwrap_or(DEFAULT_DATABASE_URL),
            ),
        }
    }
}

/// Where per-list checked/hidden sets are kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverrideBackend {
    /// Process-local LRU map; lost on exit
    #[default]
    Memory,
    /// `SQLite` table; survives restarts
    Sqlite,
}

impl OverrideBackend {
    /// Configuration token
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Sqlite => "sqlite",
        }
    }
}

impl fmt::Display for OverrideBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OverrideBackend {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "memory" | "in-memory" => Ok(Self::Memory),
            "sqlite" => Ok(Self::Sqlite),
            other => Err(AppError::config(format!(
                "Unknown override backend '{other}' (expected 'memory' or 'sqlite')"
            ))),
        }
    }
}

/// Override store settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideConfig {
    /// Selected backend
    pub backend: OverrideBackend,
    /// Maximum keys kept by the in-memory backend
    pub capacity: usize,
    /// Database used by the `SQLite` backend
    pub database_url: DatabaseUrl,
}

impl Default for OverrideConfig {
    fn default() -> Self {
        Self {
            backend: OverrideBackend::Memory,
            capacity: DEFAULT_MEMORY_CAPACITY,
            database_url: DatabaseUrl::default(),
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LarderConfig {
    /// Deployment environment
    pub environment: Environment,
    /// Override store settings
    pub overrides: OverrideConfig,
    /// How recipe lines are merged
    pub merge_strategy: MergeStrategy,
}

impl LarderConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns a configuration error when a variable is set to an invalid value
    pub fn from_env() -> AppResult<Self> {
        info!("Loading configuration from environment variables");

        let backend = env_var_or("LARDER_OVERRIDE_BACKEND", OverrideBackend::Memory.as_str())
            .parse::<OverrideBackend>()?;
        let capacity = env_var_or(
            "LARDER_OVERRIDE_CAPACITY",
            &DEFAULT_MEMORY_CAPACITY.to_string(),
        )
        .parse::<usize>()
        .map_err(|e| AppError::config("Invalid LARDER_OVERRIDE_CAPACITY value").with_source(e))?;
        if capacity == 0 {
            return Err(AppError::config(
                "LARDER_OVERRIDE_CAPACITY must be greater than 0",
            ));
        }
        let database_url =
            DatabaseUrl::parse_url(&env_var_or("DATABASE_URL", DEFAULT_DATABASE_URL))?;
        let merge_strategy =
            env_var_or("LARDER_MERGE_STRATEGY", MergeStrategy::ExactUnit.as_str())
                .parse::<MergeStrategy>()
                .map_err(|e| AppError::config(e.message))?;

        let config = Self {
            environment: Environment::from_str_or_default(&env_var_or(
                "ENVIRONMENT",
                "development",
            )),
            overrides: OverrideConfig {
                backend,
                capacity,
                database_url,
            },
            merge_strategy,
        };
        config.log_summary();
        Ok(config)
    }

    /// Log the effective configuration
    pub fn log_summary(&self) {
        info!(
            environment = %self.environment,
            override.backend = %self.overrides.backend,
            override.capacity = self.overrides.capacity,
            database.url = %self.overrides.database_url.to_connection_string(),
            merge.strategy = %self.merge_strategy,
            "Configuration loaded"
        );
    }
}

fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}
