//! Sync executor — fans one batch of tasks out across routed departments.
//!
//! ## Per (task, department) protocol
//!
//! 1. Route the task; an empty routing counts as "no target" and moves on.
//! 2. Compute the task's signature.
//! 3. Consult the dedup index (lazily seeded from the board) — a hit is a
//!    skip, no write attempted.
//! 4. Otherwise create the task in that department's board. Success records
//!    the signature; failure is counted against that department only and
//!    the task's remaining departments still proceed.
//!
//! Each create is attempted exactly once per (task, department) pair per
//! session; there is no retry here. A later session re-derives dedup state
//! from the boards, which is how the same pair resolves to `Duplicate`
//! after an earlier session resolved it to `Created`.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use courier_core::types::{DepartmentId, Task};
use courier_core::{Directory, Registry};
use courier_store::StoreClient;
use serde::Serialize;

use crate::dedup::DedupIndex;
use crate::router::route;
use crate::signature::Signature;

/// One store client per registered department.
pub type StoreSet = HashMap<DepartmentId, Box<dyn StoreClient>>;

// ---------------------------------------------------------------------------
// Cancellation
// ---------------------------------------------------------------------------

/// Cooperative session cancellation handle.
///
/// Checked before each create: once set, no further creates are issued, but
/// an in-flight create completes (or fails) cleanly rather than being
/// aborted mid-write.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

// ---------------------------------------------------------------------------
// Outcomes and stats
// ---------------------------------------------------------------------------

/// Terminal state of one (task, department) pair — or of a task that
/// routed nowhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// Task was created in the department's board.
    Created {
        task_index: usize,
        department: DepartmentId,
        id: String,
    },
    /// Dry-run mode: the task *would* have been created.
    WouldCreate {
        task_index: usize,
        department: DepartmentId,
    },
    /// An identical (normalized) task already exists in the board.
    Duplicate {
        task_index: usize,
        department: DepartmentId,
    },
    /// The create call failed; other departments were unaffected.
    Failed {
        task_index: usize,
        department: DepartmentId,
        error: String,
    },
    /// The task routed to zero departments.
    NoTarget { task_index: usize },
}

/// Per-department create/skip/fail breakdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DepartmentCounts {
    pub created: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Aggregate counters for one sync session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncStats {
    /// Successful creates (or would-creates in dry-run).
    pub synced: usize,
    /// Writes skipped because the signature already existed.
    pub skipped: usize,
    /// Create calls that failed.
    pub failed: usize,
    /// Tasks that routed to zero departments.
    pub no_target: usize,
    /// Tasks whose successful creates reached two or more departments.
    pub cross_department: usize,
    /// Breakdown keyed by department identifier.
    pub by_department: BTreeMap<DepartmentId, DepartmentCounts>,
}

/// Everything one session produced: totals plus the ordered outcome list.
#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
    pub stats: SyncStats,
    pub outcomes: Vec<Outcome>,
    pub dry_run: bool,
    /// True when the session stopped early via its [`CancelFlag`].
    pub cancelled: bool,
}

impl SyncReport {
    /// "Nothing to do": no writes, skips, failures, or unroutable tasks.
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// One sync invocation over a batch of tasks.
///
/// The session owns its dedup index; nothing is shared across sessions, so
/// concurrent sessions serialize through the boards' own consistency
/// guarantees rather than through local state. The directory and registry
/// are explicit snapshots — reload timing is the caller's decision.
pub struct SyncSession<'a> {
    directory: &'a Directory,
    registry: &'a Registry,
    stores: &'a StoreSet,
    index: DedupIndex,
    cancel: CancelFlag,
    dry_run: bool,
}

impl<'a> SyncSession<'a> {
    pub fn new(directory: &'a Directory, registry: &'a Registry, stores: &'a StoreSet) -> Self {
        Self {
            directory,
            registry,
            stores,
            index: DedupIndex::new(),
            cancel: CancelFlag::new(),
            dry_run: false,
        }
    }

    /// Consult routing and dedup but never write.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// A handle callers can use to stop the session from another thread.
    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    /// Process `tasks` in order and return the accumulated report.
    ///
    /// Never fails: store and fetch errors are absorbed into the report,
    /// so the caller can always distinguish "nothing to do" from partial
    /// or total failure by the counters.
    pub fn run(mut self, tasks: &[Task]) -> SyncReport {
        let mut stats = SyncStats::default();
        let mut outcomes = Vec::new();
        let mut cancelled = false;

        'batch: for (task_index, task) in tasks.iter().enumerate() {
            if task.text.trim().is_empty() {
                tracing::warn!("task #{task_index} has empty text; not routed");
                stats.no_target += 1;
                outcomes.push(Outcome::NoTarget { task_index });
                continue;
            }

            let departments = route(task, self.directory, self.registry);
            if departments.is_empty() {
                tracing::debug!("no target for: {}", preview(&task.text));
                stats.no_target += 1;
                outcomes.push(Outcome::NoTarget { task_index });
                continue;
            }

            let signature = Signature::of(&task.text);
            let mut created_here = 0usize;

            for department in &departments {
                if self.cancel.is_cancelled() {
                    tracing::info!("sync cancelled; no further creates will be issued");
                    cancelled = true;
                    break 'batch;
                }

                let Some(store) = self.stores.get(department) else {
                    tracing::warn!("no store client for '{department}'; counting as failed");
                    stats.failed += 1;
                    stats
                        .by_department
                        .entry(department.clone())
                        .or_default()
                        .failed += 1;
                    outcomes.push(Outcome::Failed {
                        task_index,
                        department: department.clone(),
                        error: "no store client configured".to_string(),
                    });
                    continue;
                };

                if self.index.contains(department, &signature, store.as_ref()) {
                    tracing::debug!("duplicate in '{department}': {}", preview(&task.text));
                    stats.skipped += 1;
                    stats
                        .by_department
                        .entry(department.clone())
                        .or_default()
                        .skipped += 1;
                    outcomes.push(Outcome::Duplicate {
                        task_index,
                        department: department.clone(),
                    });
                    continue;
                }

                if self.dry_run {
                    tracing::info!("[dry-run] would create in '{department}': {}", preview(&task.text));
                    stats.synced += 1;
                    created_here += 1;
                    stats
                        .by_department
                        .entry(department.clone())
                        .or_default()
                        .created += 1;
                    // Record locally so an identical later task in the batch
                    // reads as duplicate, exactly as it would in a real run.
                    self.index.record(department, signature.clone());
                    outcomes.push(Outcome::WouldCreate {
                        task_index,
                        department: department.clone(),
                    });
                    continue;
                }

                match store.create(task) {
                    Ok(created) => {
                        tracing::info!("created in '{department}': {}", preview(&task.text));
                        stats.synced += 1;
                        created_here += 1;
                        stats
                            .by_department
                            .entry(department.clone())
                            .or_default()
                            .created += 1;
                        self.index.record(department, signature.clone());
                        outcomes.push(Outcome::Created {
                            task_index,
                            department: department.clone(),
                            id: created.id,
                        });
                    }
                    Err(err) => {
                        tracing::warn!("create failed in '{department}': {err}");
                        stats.failed += 1;
                        stats
                            .by_department
                            .entry(department.clone())
                            .or_default()
                            .failed += 1;
                        outcomes.push(Outcome::Failed {
                            task_index,
                            department: department.clone(),
                            error: err.to_string(),
                        });
                    }
                }
            }

            if created_here >= 2 {
                stats.cross_department += 1;
            }
        }

        SyncReport {
            stats,
            outcomes,
            dry_run: self.dry_run,
            cancelled,
        }
    }
}

/// First 60 characters of a task text, for log lines.
fn preview(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= 60 {
        trimmed.to_string()
    } else {
        let head: String = trimmed.chars().take(60).collect();
        format!("{head}…")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
