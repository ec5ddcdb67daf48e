//! `courier directory` — list and validate the employee directory.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use courier_core::directory;

/// Arguments for `courier directory`.
#[derive(Args, Debug)]
pub struct DirectoryArgs {
    /// Employee directory snapshot.
    #[arg(long, default_value = "employees.json")]
    pub path: PathBuf,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Tabled)]
struct EmployeeRow {
    #[tabled(rename = "name")]
    name: String,
    #[tabled(rename = "departments")]
    departments: String,
}

#[derive(Serialize)]
struct EmployeeJson {
    name: String,
    departments: Vec<String>,
}

impl DirectoryArgs {
    pub fn run(self) -> Result<()> {
        let dir = directory::load_at(&self.path)
            .with_context(|| format!("failed to load directory from {}", self.path.display()))?;

        if self.json {
            let rows: Vec<EmployeeJson> = dir
                .employees()
                .iter()
                .map(|employee| EmployeeJson {
                    name: employee.name.clone(),
                    departments: employee.departments.iter().map(|d| d.0.clone()).collect(),
                })
                .collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&rows).context("failed to serialize directory")?
            );
            return Ok(());
        }

        if dir.is_empty() {
            println!("Directory is empty.");
            return Ok(());
        }

        let rows: Vec<EmployeeRow> = dir
            .employees()
            .iter()
            .map(|employee| EmployeeRow {
                name: employee.name.clone(),
                departments: employee
                    .departments
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", "),
            })
            .collect();

        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{table}");
        println!("{} employees", dir.len());
        Ok(())
    }
}
