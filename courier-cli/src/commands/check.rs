//! `courier check` — configuration diagnostic.
//!
//! Reports what is configured (token, registry, directory) without failing
//! on the first problem, so one run shows everything that needs fixing.
//! `--probe` additionally performs one read against each board.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use courier_core::{directory, registry, Registry};
use courier_store::{HttpStoreClient, StoreClient};

use super::{resolve_config_path, API_URL_ENV, TOKEN_ENV};

/// Arguments for `courier check`.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Department registry (defaults to ./courier.yaml, then ~/.courier/).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Employee directory snapshot.
    #[arg(long, default_value = "employees.json")]
    pub directory: PathBuf,

    /// Perform one read against each configured board.
    #[arg(long)]
    pub probe: bool,
}

impl CheckArgs {
    pub fn run(self) -> Result<()> {
        let separator = "=".repeat(60);
        println!("{separator}");
        println!("COURIER CONFIGURATION CHECK");
        println!("{separator}");

        let token = std::env::var(TOKEN_ENV).ok().filter(|t| !t.is_empty());
        match &token {
            Some(token) => println!(
                "{} {TOKEN_ENV} set ({} chars)",
                "✓".green(),
                token.len()
            ),
            None => println!(
                "{} {TOKEN_ENV} not set — sync and --probe need it",
                "✗".red()
            ),
        }

        let config_path = resolve_config_path(self.config)?;
        let registry = match registry::load_at(&config_path) {
            Ok(registry) => {
                println!(
                    "{} registry at {} — {} departments",
                    "✓".green(),
                    config_path.display(),
                    registry.len()
                );
                for (id, handle) in registry.departments() {
                    let default_marker = if registry.default_department() == Some(id) {
                        " (default)"
                    } else {
                        ""
                    };
                    println!("    {id} → board {}{default_marker}", handle.board_id);
                }
                if registry.default_department().is_none() {
                    println!(
                        "{} no default department — unrouted tasks will be dropped",
                        "⚠".yellow()
                    );
                }
                Some(registry)
            }
            Err(err) => {
                println!("{} registry: {err}", "✗".red());
                None
            }
        };

        match directory::load_at(&self.directory) {
            Ok(dir) => println!(
                "{} directory at {} — {} employees",
                "✓".green(),
                self.directory.display(),
                dir.len()
            ),
            Err(err) => println!("{} directory: {err}", "✗".red()),
        }

        if self.probe {
            match (token, registry) {
                (Some(token), Some(registry)) => probe_boards(&registry, &token),
                _ => println!(
                    "{} skipping --probe: token and registry are both required",
                    "⚠".yellow()
                ),
            }
        }

        println!("{separator}");
        Ok(())
    }
}

fn probe_boards(registry: &Registry, token: &str) {
    let base_url = std::env::var(API_URL_ENV).ok();
    println!("probing {} boards…", registry.len());
    for (id, handle) in registry.departments() {
        let client = match base_url.as_deref() {
            Some(url) => HttpStoreClient::with_base_url(url, token, handle.board_id.clone()),
            None => HttpStoreClient::new(token, handle.board_id.clone()),
        };
        match client.list_existing() {
            Ok(existing) => println!(
                "{} {id} reachable ({} existing tasks)",
                "✓".green(),
                existing.len()
            ),
            Err(err) => println!("{} {id}: {err}", "✗".red()),
        }
    }
}
