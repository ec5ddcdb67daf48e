//! Subcommand implementations and shared input resolution.

pub mod check;
pub mod directory;
pub mod route;
pub mod sync;

use std::path::PathBuf;

use anyhow::Result;

/// Environment variable holding the board API token.
pub(crate) const TOKEN_ENV: &str = "COURIER_TOKEN";

/// Environment variable overriding the board API host.
pub(crate) const API_URL_ENV: &str = "COURIER_API_URL";

/// Resolve the registry config path: explicit flag, then `./courier.yaml`,
/// then `~/.courier/courier.yaml`.
///
/// Falls back to the local name when nothing exists, so the load error
/// names a sensible path.
pub(crate) fn resolve_config_path(flag: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = flag {
        return Ok(path);
    }
    let local = PathBuf::from("courier.yaml");
    if local.exists() {
        return Ok(local);
    }
    if let Some(home) = dirs::home_dir() {
        let fallback = home.join(".courier").join("courier.yaml");
        if fallback.exists() {
            return Ok(fallback);
        }
    }
    Ok(local)
}

/// First `limit` characters of a task text for table cells.
pub(crate) fn preview(text: &str, limit: usize) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= limit {
        trimmed.to_string()
    } else {
        let head: String = trimmed.chars().take(limit).collect();
        format!("{head}…")
    }
}
