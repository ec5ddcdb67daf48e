//! `courier sync` — route a task batch and write each task once per board.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};

use courier_core::{directory, registry, tasks, Registry};
use courier_store::{HttpStoreClient, StoreClient};
use courier_sync::{StoreSet, SyncReport, SyncSession};

use super::{preview, resolve_config_path, API_URL_ENV, TOKEN_ENV};

/// Arguments for `courier sync`.
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Extracted task batch (JSON array).
    #[arg(long, default_value = "tasks.json")]
    pub tasks: PathBuf,

    /// Employee directory snapshot.
    #[arg(long, default_value = "employees.json")]
    pub directory: PathBuf,

    /// Department registry (defaults to ./courier.yaml, then ~/.courier/).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Route and dedup, but never write to any board.
    #[arg(long)]
    pub dry_run: bool,

    /// Emit the full report as machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

impl SyncArgs {
    pub fn run(self) -> Result<()> {
        let config_path = resolve_config_path(self.config)?;
        let registry = registry::load_at(&config_path)
            .with_context(|| format!("failed to load registry from {}", config_path.display()))?;
        let directory = directory::load_at(&self.directory)
            .with_context(|| format!("failed to load directory from {}", self.directory.display()))?;
        let batch = tasks::load_at(&self.tasks)
            .with_context(|| format!("failed to load tasks from {}", self.tasks.display()))?;

        if batch.is_empty() {
            println!("No tasks to sync.");
            return Ok(());
        }

        let token = std::env::var(TOKEN_ENV)
            .with_context(|| format!("{TOKEN_ENV} is not set; it authenticates board access"))?;
        let base_url = std::env::var(API_URL_ENV).ok();
        let stores = build_stores(&registry, &token, base_url.as_deref());

        let report = SyncSession::new(&directory, &registry, &stores)
            .dry_run(self.dry_run)
            .run(&batch);

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&report).context("failed to serialize report")?
            );
            return Ok(());
        }

        print_report(&report, &batch);
        Ok(())
    }
}

/// One HTTP client per registered department, all sharing the token.
fn build_stores(registry: &Registry, token: &str, base_url: Option<&str>) -> StoreSet {
    registry
        .departments()
        .map(|(id, handle)| {
            let client = match base_url {
                Some(url) => HttpStoreClient::with_base_url(url, token, handle.board_id.clone()),
                None => HttpStoreClient::new(token, handle.board_id.clone()),
            };
            (id.clone(), Box::new(client) as Box<dyn StoreClient>)
        })
        .collect()
}

#[derive(Tabled)]
struct DepartmentRow {
    #[tabled(rename = "department")]
    department: String,
    #[tabled(rename = "created")]
    created: usize,
    #[tabled(rename = "skipped")]
    skipped: usize,
    #[tabled(rename = "failed")]
    failed: usize,
}

fn print_report(report: &SyncReport, batch: &[courier_core::Task]) {
    let prefix = if report.dry_run { "[dry-run] " } else { "" };
    let stats = &report.stats;

    let headline = format!(
        "{prefix}✓ {} tasks processed — {} synced, {} skipped, {} failed, {} no target, {} cross-department",
        batch.len(),
        stats.synced,
        stats.skipped,
        stats.failed,
        stats.no_target,
        stats.cross_department,
    );
    if stats.failed > 0 {
        println!("{}", headline.yellow());
    } else {
        println!("{headline}");
    }
    if report.cancelled {
        println!("{}", "session cancelled before completion".red());
    }

    if !stats.by_department.is_empty() {
        let rows: Vec<DepartmentRow> = stats
            .by_department
            .iter()
            .map(|(department, counts)| DepartmentRow {
                department: department.to_string(),
                created: counts.created,
                skipped: counts.skipped,
                failed: counts.failed,
            })
            .collect();
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{table}");
    }

    for outcome in &report.outcomes {
        use courier_sync::Outcome;
        match outcome {
            Outcome::Created { task_index, department, .. } => println!(
                "  ✎  {} → {department}",
                preview(&batch[*task_index].text, 60)
            ),
            Outcome::WouldCreate { task_index, department } => println!(
                "  ~  {} → {department}",
                preview(&batch[*task_index].text, 60)
            ),
            Outcome::Duplicate { task_index, department } => println!(
                "  ·  {} → {department} (duplicate)",
                preview(&batch[*task_index].text, 60)
            ),
            Outcome::Failed { task_index, department, error } => println!(
                "  {}  {} → {department}: {error}",
                "✗".red(),
                preview(&batch[*task_index].text, 60)
            ),
            Outcome::NoTarget { task_index } => println!(
                "  {}  {} (no target)",
                "∅".bright_black(),
                preview(&batch[*task_index].text, 60)
            ),
        }
    }
}
