//! Courier — meeting action-item routing CLI.
//!
//! # Usage
//!
//! ```text
//! courier sync [--tasks tasks.json] [--directory employees.json] [--config courier.yaml] [--dry-run] [--json]
//! courier route [--tasks tasks.json] [--directory employees.json] [--config courier.yaml] [--json]
//! courier directory [--path employees.json] [--json]
//! courier check [--config courier.yaml] [--directory employees.json] [--probe]
//! ```
//!
//! The store token comes from `COURIER_TOKEN`; `COURIER_API_URL` overrides
//! the board API host (proxies, test servers).

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{
    check::CheckArgs, directory::DirectoryArgs, route::RouteArgs, sync::SyncArgs,
};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "courier",
    version,
    about = "Route extracted meeting action items into per-department task boards",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Route a task batch and write each task once per target board.
    Sync(SyncArgs),

    /// Preview routing decisions without touching any board.
    Route(RouteArgs),

    /// List and validate the employee directory.
    Directory(DirectoryArgs),

    /// Diagnose configuration: token, registry, directory, board reachability.
    Check(CheckArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Sync(args) => args.run(),
        Commands::Route(args) => args.run(),
        Commands::Directory(args) => args.run(),
        Commands::Check(args) => args.run(),
    }
}
