//! Employee directory — an immutable snapshot of employees and their
//! department memberships, loaded wholesale from a JSON file.
//!
//! ```text
//! [
//!   {"name": "Shagun", "department": ["Marketing", "Social Media"]},
//!   {"name": "Devin",  "department": ["AI R&D"]}
//! ]
//! ```
//!
//! The directory is read-only once loaded; callers reload a fresh snapshot
//! when membership changes. Routing and mention resolution take the snapshot
//! explicitly — there is no ambient global directory state.

use std::path::Path;

use crate::error::{io_err, ConfigError};
use crate::types::Employee;

/// Read-only snapshot of the employee roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directory {
    employees: Vec<Employee>,
}

impl Directory {
    /// Build a directory from already-validated employees.
    ///
    /// Fails with [`ConfigError::InvalidEmployee`] on a blank name or an
    /// empty department list, same as [`load_at`].
    pub fn new(employees: Vec<Employee>) -> Result<Self, ConfigError> {
        validate(&employees)?;
        Ok(Self { employees })
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    /// Exact (case-insensitive, whitespace-trimmed) lookup by employee name.
    pub fn find(&self, name: &str) -> Option<&Employee> {
        let wanted = name.trim().to_lowercase();
        if wanted.is_empty() {
            return None;
        }
        self.employees
            .iter()
            .find(|e| e.name.trim().to_lowercase() == wanted)
    }

    /// Every employee whose name occurs as a case-insensitive substring of
    /// `text`, in directory order.
    ///
    /// Substring (not token) matching is intentional: it tolerates
    /// possessives and punctuation adjacency ("Shagun's slides"), at the
    /// cost of false positives when a short name is embedded in a longer
    /// word. Whether word-boundary matching would be better remains open.
    pub fn resolve_mentions(&self, text: &str) -> Vec<&Employee> {
        let haystack = text.to_lowercase();
        self.employees
            .iter()
            .filter(|e| haystack.contains(&e.name.trim().to_lowercase()))
            .collect()
    }
}

/// Load the directory from the employees JSON file at `path`.
///
/// Returns `ConfigError::DirectoryNotFound` if absent,
/// `ConfigError::DirectoryParse` on malformed JSON, and
/// `ConfigError::InvalidEmployee` for entries lacking a name or any
/// department membership.
pub fn load_at(path: &Path) -> Result<Directory, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::DirectoryNotFound {
            path: path.to_path_buf(),
        });
    }
    let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    let employees: Vec<Employee> =
        serde_json::from_str(&contents).map_err(|e| ConfigError::DirectoryParse {
            path: path.to_path_buf(),
            source: e,
        })?;
    Directory::new(employees)
}

fn validate(employees: &[Employee]) -> Result<(), ConfigError> {
    for (index, employee) in employees.iter().enumerate() {
        if employee.name.trim().is_empty() {
            return Err(ConfigError::InvalidEmployee {
                index,
                reason: "name is empty".to_string(),
            });
        }
        if employee.departments.is_empty() {
            return Err(ConfigError::InvalidEmployee {
                index,
                reason: format!("'{}' has no department memberships", employee.name),
            });
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DepartmentId;

    fn emp(name: &str, departments: &[&str]) -> Employee {
        Employee {
            name: name.to_string(),
            departments: departments.iter().map(|d| DepartmentId::from(*d)).collect(),
        }
    }

    fn sample() -> Directory {
        Directory::new(vec![
            emp("Shagun", &["Marketing", "Social Media"]),
            emp("Devin", &["AI R&D"]),
        ])
        .expect("valid directory")
    }

    #[test]
    fn find_is_case_insensitive_and_trimmed() {
        let dir = sample();
        assert!(dir.find("shagun").is_some());
        assert!(dir.find("  DEVIN ").is_some());
        assert!(dir.find("nobody").is_none());
    }

    #[test]
    fn find_blank_name_matches_nothing() {
        let dir = sample();
        assert!(dir.find("").is_none());
        assert!(dir.find("   ").is_none());
    }

    #[rstest::rstest]
    #[case("Shagun's slides need review before devin sees them", &["Shagun", "Devin"])]
    #[case("SHAGUN will follow up", &["Shagun"])]
    #[case("ask devin about the eval", &["Devin"])]
    fn mentions_match_substrings_and_possessives(
        #[case] text: &str,
        #[case] expected: &[&str],
    ) {
        let dir = sample();
        let found = dir.resolve_mentions(text);
        let names: Vec<_> = found.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn mentions_preserve_directory_order() {
        let dir = sample();
        let found = dir.resolve_mentions("Devin and Shagun will pair on this");
        let names: Vec<_> = found.iter().map(|e| e.name.as_str()).collect();
        // Directory order, not text order.
        assert_eq!(names, vec!["Shagun", "Devin"]);
    }

    #[test]
    fn no_mentions_in_unrelated_text() {
        let dir = sample();
        assert!(dir.resolve_mentions("update the landing page").is_empty());
    }

    #[test]
    fn blank_name_entry_is_invalid() {
        let err = Directory::new(vec![emp("  ", &["HR"])]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidEmployee { index: 0, .. }
        ));
    }

    #[test]
    fn empty_departments_entry_is_invalid() {
        let err = Directory::new(vec![emp("Ana", &[])]).unwrap_err();
        assert!(err.to_string().contains("Ana"));
    }

    #[test]
    fn load_missing_file_returns_not_found() {
        let tmp = tempfile::TempDir::new().unwrap();
        let err = load_at(&tmp.path().join("employees.json")).unwrap_err();
        assert!(matches!(err, ConfigError::DirectoryNotFound { .. }));
    }

    #[test]
    fn load_parses_employees_json() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("employees.json");
        std::fs::write(
            &path,
            r#"[{"name": "Shagun", "department": ["Marketing"]}]"#,
        )
        .unwrap();
        let dir = load_at(&path).expect("load");
        assert_eq!(dir.len(), 1);
        assert_eq!(dir.employees()[0].name, "Shagun");
    }

    #[test]
    fn load_corrupt_json_returns_parse_error_with_path() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("employees.json");
        std::fs::write(&path, b"{not json").unwrap();
        let err = load_at(&path).unwrap_err();
        assert!(matches!(err, ConfigError::DirectoryParse { .. }), "got: {err}");
        assert!(err.to_string().contains("employees.json"));
    }
}
