//! Loading the extracted task batch.
//!
//! The extraction step writes `tasks.json` — a JSON array of task objects.
//! This core does not validate task provenance; unknown fields (e.g. the
//! heuristic extractor's `source_segment`) are ignored.

use std::path::Path;

use crate::error::{io_err, ConfigError};
use crate::types::Task;

/// Load the ordered task batch from the JSON file at `path`.
///
/// Returns `ConfigError::TasksNotFound` if absent and
/// `ConfigError::TasksParse` on malformed JSON. An empty array is a valid,
/// empty batch.
pub fn load_at(path: &Path) -> Result<Vec<Task>, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::TasksNotFound {
            path: path.to_path_buf(),
        });
    }
    let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    serde_json::from_str(&contents).map_err(|e| ConfigError::TasksParse {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_batch_returns_not_found() {
        let tmp = tempfile::TempDir::new().unwrap();
        let err = load_at(&tmp.path().join("tasks.json")).unwrap_err();
        assert!(matches!(err, ConfigError::TasksNotFound { .. }));
    }

    #[test]
    fn load_empty_array_is_empty_batch() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("tasks.json");
        std::fs::write(&path, b"[]").unwrap();
        let tasks = load_at(&path).expect("load");
        assert!(tasks.is_empty());
    }

    #[test]
    fn load_preserves_batch_order() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("tasks.json");
        std::fs::write(
            &path,
            r#"[{"text": "first"}, {"text": "second"}, {"text": "third"}]"#,
        )
        .unwrap();
        let tasks = load_at(&path).expect("load");
        let texts: Vec<_> = tasks.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
    }

    #[test]
    fn load_corrupt_batch_returns_parse_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("tasks.json");
        std::fs::write(&path, b"{\"not\": \"an array\"}").unwrap();
        let err = load_at(&path).unwrap_err();
        assert!(matches!(err, ConfigError::TasksParse { .. }), "got: {err}");
    }
}
