//! In-memory store implementation for tests and offline development.
//!
//! Cloning an [`InMemoryStore`] shares the underlying state, so a test can
//! hand one clone to the sync engine and keep another to inspect what was
//! written — or reuse the same store across two sessions to exercise
//! idempotence against "persistent" external state.

use std::sync::{Arc, Mutex};

use courier_core::types::Task;

use crate::client::{CreatedTask, ExistingTask, StoreClient};
use crate::error::StoreError;

#[derive(Debug, Default)]
struct State {
    titles: Vec<String>,
    fail_list: bool,
    fail_create: bool,
    list_calls: usize,
    create_calls: usize,
}

/// A `Vec`-backed task board with injectable failures.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<State>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A board pre-populated with existing task titles.
    pub fn with_existing<T: Into<String>>(titles: impl IntoIterator<Item = T>) -> Self {
        let store = Self::new();
        store.lock().titles = titles.into_iter().map(Into::into).collect();
        store
    }

    /// Make every `list_existing` call fail until reset.
    pub fn fail_list(&self, fail: bool) {
        self.lock().fail_list = fail;
    }

    /// Make every `create` call fail until reset.
    pub fn fail_create(&self, fail: bool) {
        self.lock().fail_create = fail;
    }

    /// Titles currently in the board, in insertion order.
    pub fn titles(&self) -> Vec<String> {
        self.lock().titles.clone()
    }

    pub fn list_calls(&self) -> usize {
        self.lock().list_calls
    }

    pub fn create_calls(&self) -> usize {
        self.lock().create_calls
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().expect("in-memory store poisoned")
    }
}

impl StoreClient for InMemoryStore {
    fn list_existing(&self) -> Result<Vec<ExistingTask>, StoreError> {
        let mut state = self.lock();
        state.list_calls += 1;
        if state.fail_list {
            return Err(StoreError::Transport("injected list failure".to_string()));
        }
        Ok(state
            .titles
            .iter()
            .map(|title| ExistingTask {
                title: title.clone(),
            })
            .collect())
    }

    fn create(&self, task: &Task) -> Result<CreatedTask, StoreError> {
        let mut state = self.lock();
        state.create_calls += 1;
        if state.fail_create {
            return Err(StoreError::Status {
                status: 503,
                body: "injected create failure".to_string(),
            });
        }
        state.titles.push(task.text.clone());
        Ok(CreatedTask {
            id: format!("task-{}", state.titles.len()),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_appends_and_list_returns_titles() {
        let store = InMemoryStore::with_existing(["already here"]);
        store.create(&Task::with_text("new task")).expect("create");

        let listed = store.list_existing().expect("list");
        let titles: Vec<_> = listed.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["already here", "new task"]);
    }

    #[test]
    fn clones_share_state() {
        let store = InMemoryStore::new();
        let engine_side = store.clone();
        engine_side.create(&Task::with_text("shared")).expect("create");
        assert_eq!(store.titles(), vec!["shared"]);
        assert_eq!(store.create_calls(), 1);
    }

    #[test]
    fn injected_failures_surface_as_store_errors() {
        let store = InMemoryStore::new();
        store.fail_list(true);
        assert!(matches!(store.list_existing(), Err(StoreError::Transport(_))));

        store.fail_create(true);
        let err = store.create(&Task::with_text("doomed")).unwrap_err();
        assert!(matches!(err, StoreError::Status { status: 503, .. }));
        assert!(store.titles().is_empty());
    }
}
