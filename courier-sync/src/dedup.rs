//! Per-session duplicate-detection index.
//!
//! One set of signatures per department, seeded lazily: the first lookup
//! for a department fetches that board's full existing-task list, folds
//! every title into the signature space, and caches the set. Later lookups
//! and records for the same department are pure in-memory operations.
//!
//! A failed seed fetch is fail-open: the set starts empty (duplicates
//! become possible, sync is never blocked) and a warning is logged. The
//! index lives exactly as long as its session — never persisted, never
//! shared across sessions.

use std::collections::{HashMap, HashSet};

use courier_core::types::DepartmentId;
use courier_store::StoreClient;

use crate::signature::Signature;

/// Department-keyed signature cache for one sync session.
#[derive(Debug, Default)]
pub struct DedupIndex {
    departments: HashMap<DepartmentId, HashSet<Signature>>,
}

impl DedupIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `signature` already exists in `department`'s board.
    ///
    /// Seeds the department's set from `store` on first reference; the
    /// fetch happens at most once per department per session.
    pub fn contains(
        &mut self,
        department: &DepartmentId,
        signature: &Signature,
        store: &dyn StoreClient,
    ) -> bool {
        self.seed(department, store).contains(signature)
    }

    /// Record a signature after a successful create.
    pub fn record(&mut self, department: &DepartmentId, signature: Signature) {
        self.departments
            .entry(department.clone())
            .or_default()
            .insert(signature);
    }

    /// Number of departments seeded (or recorded into) so far.
    pub fn department_count(&self) -> usize {
        self.departments.len()
    }

    fn seed(&mut self, department: &DepartmentId, store: &dyn StoreClient) -> &HashSet<Signature> {
        self.departments
            .entry(department.clone())
            .or_insert_with(|| match store.list_existing() {
                Ok(existing) => existing
                    .iter()
                    .map(|task| Signature::of(&task.title))
                    .collect(),
                Err(err) => {
                    tracing::warn!(
                        "could not fetch existing tasks for '{department}', assuming empty \
                         (duplicates possible): {err}"
                    );
                    HashSet::new()
                }
            })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
