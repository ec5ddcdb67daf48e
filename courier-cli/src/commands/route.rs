//! `courier route` — offline routing preview. No network, no writes.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use courier_core::{directory, registry, tasks};
use courier_sync::route;

use super::{preview, resolve_config_path};

/// Arguments for `courier route`.
#[derive(Args, Debug)]
pub struct RouteArgs {
    /// Extracted task batch (JSON array).
    #[arg(long, default_value = "tasks.json")]
    pub tasks: PathBuf,

    /// Employee directory snapshot.
    #[arg(long, default_value = "employees.json")]
    pub directory: PathBuf,

    /// Department registry (defaults to ./courier.yaml, then ~/.courier/).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Tabled)]
struct RouteRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "task")]
    task: String,
    #[tabled(rename = "assignee")]
    assignee: String,
    #[tabled(rename = "departments")]
    departments: String,
    #[tabled(rename = "cross")]
    cross: String,
}

#[derive(Serialize)]
struct RouteRowJson {
    task_index: usize,
    text: String,
    assignee: Option<String>,
    departments: Vec<String>,
    cross_department: bool,
}

impl RouteArgs {
    pub fn run(self) -> Result<()> {
        let config_path = resolve_config_path(self.config)?;
        let registry = registry::load_at(&config_path)
            .with_context(|| format!("failed to load registry from {}", config_path.display()))?;
        let dir = directory::load_at(&self.directory)
            .with_context(|| format!("failed to load directory from {}", self.directory.display()))?;
        let batch = tasks::load_at(&self.tasks)
            .with_context(|| format!("failed to load tasks from {}", self.tasks.display()))?;

        let routed: Vec<(usize, &courier_core::Task, Vec<courier_core::DepartmentId>)> = batch
            .iter()
            .enumerate()
            .map(|(index, task)| (index, task, route(task, &dir, &registry)))
            .collect();

        if self.json {
            let rows: Vec<RouteRowJson> = routed
                .iter()
                .map(|(index, task, departments)| RouteRowJson {
                    task_index: *index,
                    text: task.text.clone(),
                    assignee: task.assignee.clone(),
                    departments: departments.iter().map(|d| d.0.clone()).collect(),
                    cross_department: departments.len() >= 2,
                })
                .collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&rows).context("failed to serialize routing")?
            );
            return Ok(());
        }

        if routed.is_empty() {
            println!("No tasks to route.");
            return Ok(());
        }

        let rows: Vec<RouteRow> = routed
            .iter()
            .map(|(index, task, departments)| RouteRow {
                index: *index,
                task: preview(&task.text, 50),
                assignee: task.assignee.clone().unwrap_or_else(|| "—".to_string()),
                departments: if departments.is_empty() {
                    "(no target)".to_string()
                } else {
                    departments
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join(", ")
                },
                cross: if departments.len() >= 2 { "✓" } else { "" }.to_string(),
            })
            .collect();

        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{table}");

        let cross = routed.iter().filter(|(_, _, d)| d.len() >= 2).count();
        let unroutable = routed.iter().filter(|(_, _, d)| d.is_empty()).count();
        println!(
            "{} tasks | {} cross-department | {} without a target",
            routed.len(),
            cross,
            unroutable,
        );
        Ok(())
    }
}
