//! The store-client seam.
//!
//! Each department's external task board is reached through one
//! [`StoreClient`]. The sync engine only ever needs two calls: the full
//! existing-task listing (to seed duplicate detection at session start) and
//! a single-task create.

use courier_core::types::Task;

use crate::error::StoreError;

/// A task that already exists in a board, reduced to what dedup needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExistingTask {
    /// The task's displayed title, as stored.
    pub title: String,
}

/// A freshly created task, as acknowledged by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedTask {
    /// Store-assigned identifier of the new task.
    pub id: String,
}

/// Client for one department's external task board.
///
/// Implementations are blocking; both calls are network I/O. Retry policy,
/// if any, belongs to the implementation — the sync engine attempts each
/// create exactly once per session.
pub trait StoreClient {
    /// Fetch every existing task in the board.
    fn list_existing(&self) -> Result<Vec<ExistingTask>, StoreError>;

    /// Create `task` in the board.
    fn create(&self, task: &Task) -> Result<CreatedTask, StoreError>;
}
