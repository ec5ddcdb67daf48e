//! Error types for courier-core.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::DepartmentId;

/// All errors that can arise from loading the directory, registry, or task
/// batch. Every variant is fatal: nothing is routed or written once one of
/// these surfaces.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Underlying I/O failure (permission denied, unreadable file, etc.).
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The employee directory file did not exist at the expected path.
    #[error("employee directory not found at {path}")]
    DirectoryNotFound { path: PathBuf },

    /// JSON parse error on the employee directory.
    #[error("failed to parse employee directory at {path}: {source}")]
    DirectoryParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A directory entry with a blank name or no department memberships.
    #[error("invalid employee entry at index {index}: {reason}")]
    InvalidEmployee { index: usize, reason: String },

    /// The department registry file did not exist at the expected path.
    #[error("registry not found at {path}")]
    RegistryNotFound { path: PathBuf },

    /// YAML parse error on the registry — includes file path and line context
    /// from serde_yaml.
    #[error("failed to parse registry at {path}: {source}")]
    RegistryParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The registry declared no departments at all.
    #[error("registry has no departments configured")]
    NoDepartments,

    /// `default:` named a department missing from the `departments:` map.
    #[error("default department '{0}' is not registered")]
    UnknownDefault(DepartmentId),

    /// A `roles:` entry mapped a keyword to an unregistered department.
    #[error("role keyword '{keyword}' maps to unregistered department '{department}'")]
    UnknownRoleDepartment {
        keyword: String,
        department: DepartmentId,
    },

    /// The task batch file did not exist at the expected path.
    #[error("task batch not found at {path}")]
    TasksNotFound { path: PathBuf },

    /// JSON parse error on the task batch.
    #[error("failed to parse task batch at {path}: {source}")]
    TasksParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience constructor for [`ConfigError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> ConfigError {
    ConfigError::Io {
        path: path.into(),
        source,
    }
}
