// ABOUTME: Larder CLI - renders the consolidated grocery list for a recipe snapshot
// ABOUTME: Loads recipes, list entries, and custom items from YAML or JSON and applies overrides
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org
//!
//! Usage:
//! ```bash
//! # Show the aggregated list
//! larder-cli --snapshot demos/week.yaml view
//!
//! # Merge teaspoons with tablespoons, print JSON
//! larder-cli --snapshot demos/week.yaml --strategy family --json view
//!
//! # Tick off a line; persistent with the SQLite backend and a fixed list id
//! larder-cli --snapshot demos/week.yaml --backend sqlite check "flour::cup"
//!
//! # Mark a line as "already have", then bring everything back
//! larder-cli --snapshot demos/week.yaml hide "salt::tsp"
//! larder-cli --snapshot demos/week.yaml restore-all
//! ```

mod commands;
mod helpers;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use larder::config::environment::{DatabaseUrl, LarderConfig, OverrideBackend};
use larder::database::InMemoryRepository;
use larder::logging::LoggingConfig;
use larder::overrides::{create_store, OverrideLayer};
use larder::services::GroceryListService;
use larder_grocery::MergeStrategy;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "larder-cli",
    about = "Larder grocery list CLI",
    long_about = "Combine the recipes on a shopping list into one grocery list, grouped by aisle."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Snapshot file (YAML or JSON) with recipes, list entries, and custom items
    #[arg(long, short = 's', global = true, default_value = "larder.yaml")]
    snapshot: PathBuf,

    /// Owner to act as; defaults to the snapshot's owner
    #[arg(long, global = true)]
    owner: Option<String>,

    /// Merge strategy override (exact or family)
    #[arg(long, global = true)]
    strategy: Option<MergeStrategy>,

    /// Override store backend override (memory or sqlite)
    #[arg(long, global = true)]
    backend: Option<OverrideBackend>,

    /// Database URL override for the sqlite backend
    #[arg(long, global = true)]
    database_url: Option<String>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Print item keys next to each line
    #[arg(long, global = true)]
    keys: bool,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Show the grocery list
    View,

    /// Toggle the checked flag of a line
    Check {
        /// Item key, e.g. `flour::cup`
        key: String,
    },

    /// Hide a line as "already have"
    Hide {
        /// Item key
        key: String,
    },

    /// Bring a hidden line back
    Restore {
        /// Item key
        key: String,
    },

    /// Bring every hidden line back
    RestoreAll,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let logging = LoggingConfig::from_env();
    let logging = if cli.verbose {
        logging.with_level("debug")
    } else {
        logging
    };
    logging.init()?;

    let mut config = LarderConfig::from_env()?;
    if let Some(backend) = cli.backend {
        config.overrides.backend = backend;
    }
    if let Some(url) = cli.database_url.as_deref() {
        config.overrides.database_url = DatabaseUrl::parse_url(url)?;
    }
    let strategy = cli.strategy.unwrap_or(config.merge_strategy);

    let store = create_store(&config.overrides).await?;
    info!(backend = store.backend_name(), "Override store ready");

    let repo = Arc::new(InMemoryRepository::new());
    let service = GroceryListService::new(repo.clone(), repo.clone(), OverrideLayer::new(store))
        .with_strategy(strategy);

    let snapshot = commands::snapshot::read(&cli.snapshot).await?;
    let owner = cli.owner.unwrap_or_else(|| snapshot.owner.clone());
    let list_id = commands::snapshot::load(snapshot, &repo, &service).await?;

    match cli.command {
        Command::View => {}
        Command::Check { key } => {
            let checked = service.toggle_checked(&owner, list_id, &key).await?;
            let state = if checked { "checked" } else { "unchecked" };
            helpers::display::notice(cli.json, &format!("{key} {state}"));
        }
        Command::Hide { key } => {
            service.hide(&owner, list_id, &key).await?;
            helpers::display::notice(cli.json, &format!("{key} hidden"));
        }
        Command::Restore { key } => {
            service.restore(&owner, list_id, &key).await?;
            helpers::display::notice(cli.json, &format!("{key} restored"));
        }
        Command::RestoreAll => {
            let restored = service.restore_all(&owner, list_id).await?;
            helpers::display::notice(cli.json, &format!("{restored} lines restored"));
        }
    }

    let view = service.view(&owner, list_id, None).await?;
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{}", helpers::display::render(&view, cli.keys));
    }

    Ok(())
}
