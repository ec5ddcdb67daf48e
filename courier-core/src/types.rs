//! Domain types for the Courier routing core.
//!
//! Department identifiers are case-preserving strings; matching against
//! employee names is case-insensitive and happens in [`crate::directory`].
//! All types are serializable/deserializable via serde.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A strongly-typed identifier for a department (e.g. `"Marketing"`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DepartmentId(pub String);

impl fmt::Display for DepartmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for DepartmentId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for DepartmentId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Priority of an extracted task, as produced by the extraction step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::High => write!(f, "High"),
            Priority::Medium => write!(f, "Medium"),
            Priority::Low => write!(f, "Low"),
        }
    }
}

// ---------------------------------------------------------------------------
// Domain structs
// ---------------------------------------------------------------------------

/// An extracted action item. Produced upstream; read-only to this core.
///
/// `text` is the dedup key's basis and must be non-empty for a task to be
/// routed; the executor counts blank-text tasks as having no target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl Task {
    /// A task with only a description, as the heuristic extractor emits.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            assignee: None,
            role: None,
            priority: None,
            deadline: None,
            confidence: None,
        }
    }
}

/// One employee in the directory snapshot.
///
/// The on-disk field is `department` (singular) — the employees file predates
/// multi-membership and kept its original key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub name: String,
    #[serde(rename = "department")]
    pub departments: Vec<DepartmentId>,
}

/// Handle to one department's external task board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardHandle {
    /// Opaque board/database identifier understood by the store API.
    pub board_id: String,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn department_id_display() {
        assert_eq!(DepartmentId::from("Marketing").to_string(), "Marketing");
    }

    #[test]
    fn department_id_equality() {
        let a = DepartmentId::from("HR");
        let b = DepartmentId::from(String::from("HR"));
        assert_eq!(a, b);
    }

    #[test]
    fn task_deserializes_with_nulls_and_unknown_fields() {
        let json = r#"{
            "text": "Prepare the quarterly report",
            "assignee": null,
            "role": null,
            "deadline": null,
            "priority": "High",
            "confidence": 0.9,
            "source_segment": {"start": 1.0, "end": 2.0}
        }"#;
        let task: Task = serde_json::from_str(json).expect("deserialize");
        assert_eq!(task.text, "Prepare the quarterly report");
        assert_eq!(task.assignee, None);
        assert_eq!(task.priority, Some(Priority::High));
        assert_eq!(task.confidence, Some(0.9));
    }

    #[test]
    fn task_deadline_parses_iso_date() {
        let json = r#"{"text": "Ship it", "deadline": "2025-12-08"}"#;
        let task: Task = serde_json::from_str(json).expect("deserialize");
        assert_eq!(
            task.deadline,
            Some(NaiveDate::from_ymd_opt(2025, 12, 8).unwrap())
        );
    }

    #[test]
    fn employee_uses_department_key() {
        let json = r#"{"name": "Shagun", "department": ["Marketing", "Social Media"]}"#;
        let emp: Employee = serde_json::from_str(json).expect("deserialize");
        assert_eq!(emp.departments.len(), 2);
        assert_eq!(emp.departments[0], DepartmentId::from("Marketing"));
    }

    #[test]
    fn priority_serializes_capitalized() {
        assert_eq!(serde_json::to_string(&Priority::High).unwrap(), "\"High\"");
        assert_eq!(Priority::Medium.to_string(), "Medium");
    }
}
