//! Department registry — YAML configuration mapping department identifiers
//! to their external task boards.
//!
//! ```yaml
//! departments:
//!   Marketing:
//!     board_id: a1b2c3
//!   Social Media:
//!     board_id: d4e5f6
//!   General:
//!     board_id: 778899
//! default: General
//! roles:
//!   marketing: Marketing
//!   social media: Social Media
//! ```
//!
//! `default:` designates the fallback department for tasks that route
//! nowhere else; `roles:` maps role keywords to departments for tasks that
//! carry a role but no resolvable people.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::{io_err, ConfigError};
use crate::types::{BoardHandle, DepartmentId};

/// Validated department registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry {
    departments: BTreeMap<DepartmentId, BoardHandle>,
    default: Option<DepartmentId>,
    /// Lowercased role keywords, sorted, each pointing at a registered
    /// department. Sorted order makes keyword resolution deterministic.
    roles: Vec<(String, DepartmentId)>,
}

/// On-disk registry shape. Raw strings here; validation happens in
/// [`Registry::from_parts`].
#[derive(Debug, Deserialize)]
struct RegistryFile {
    #[serde(default)]
    departments: BTreeMap<String, BoardHandle>,
    #[serde(default)]
    default: Option<String>,
    #[serde(default)]
    roles: BTreeMap<String, String>,
}

impl Registry {
    /// Assemble and validate a registry from its parts.
    ///
    /// Fails with `ConfigError::NoDepartments` on an empty department map,
    /// `ConfigError::UnknownDefault` if `default` names an unregistered
    /// department, and `ConfigError::UnknownRoleDepartment` if a role
    /// keyword targets one.
    pub fn from_parts(
        departments: BTreeMap<DepartmentId, BoardHandle>,
        default: Option<DepartmentId>,
        roles: BTreeMap<String, DepartmentId>,
    ) -> Result<Self, ConfigError> {
        if departments.is_empty() {
            return Err(ConfigError::NoDepartments);
        }
        if let Some(id) = &default {
            if !departments.contains_key(id) {
                return Err(ConfigError::UnknownDefault(id.clone()));
            }
        }
        let mut role_table = Vec::with_capacity(roles.len());
        for (keyword, department) in roles {
            if !departments.contains_key(&department) {
                return Err(ConfigError::UnknownRoleDepartment {
                    keyword,
                    department,
                });
            }
            role_table.push((keyword.trim().to_lowercase(), department));
        }
        role_table.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(Self {
            departments,
            default,
            roles: role_table,
        })
    }

    /// Resolve a department to its board handle.
    pub fn resolve(&self, id: &DepartmentId) -> Option<&BoardHandle> {
        self.departments.get(id)
    }

    pub fn is_registered(&self, id: &DepartmentId) -> bool {
        self.departments.contains_key(id)
    }

    /// The designated fallback department, if one was configured.
    pub fn default_department(&self) -> Option<&DepartmentId> {
        self.default.as_ref()
    }

    /// Match a free-form role label against the role keyword table.
    ///
    /// Case-insensitive containment, mirroring how the role labels arrive
    /// from extraction ("Backend Engineer" matches keyword "engineer").
    /// First match over the sorted table wins.
    pub fn department_for_role(&self, role: &str) -> Option<&DepartmentId> {
        let role = role.trim().to_lowercase();
        if role.is_empty() {
            return None;
        }
        self.roles
            .iter()
            .find(|(keyword, _)| role.contains(keyword.as_str()))
            .map(|(_, department)| department)
    }

    /// All registered departments and their handles, in identifier order.
    pub fn departments(&self) -> impl Iterator<Item = (&DepartmentId, &BoardHandle)> {
        self.departments.iter()
    }

    pub fn len(&self) -> usize {
        self.departments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.departments.is_empty()
    }
}

/// Load and validate the registry from the YAML file at `path`.
///
/// Returns `ConfigError::RegistryNotFound` if absent and
/// `ConfigError::RegistryParse` (with path + line context) if malformed.
pub fn load_at(path: &Path) -> Result<Registry, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::RegistryNotFound {
            path: path.to_path_buf(),
        });
    }
    let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    let file: RegistryFile =
        serde_yaml::from_str(&contents).map_err(|e| ConfigError::RegistryParse {
            path: path.to_path_buf(),
            source: e,
        })?;

    let departments = file
        .departments
        .into_iter()
        .map(|(id, handle)| (DepartmentId(id), handle))
        .collect();
    let roles = file
        .roles
        .into_iter()
        .map(|(keyword, id)| (keyword, DepartmentId(id)))
        .collect();
    Registry::from_parts(departments, file.default.map(DepartmentId), roles)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
