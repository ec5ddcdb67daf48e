//! # courier-sync
//!
//! Task routing and idempotent multi-target synchronization.
//!
//! Build a [`SyncSession`] over a directory snapshot, a department
//! registry, and one store client per department, then [`SyncSession::run`]
//! a batch of extracted tasks. Every task is routed to its target
//! departments and written exactly once per board, with per-store failure
//! isolation; the returned [`SyncReport`] carries the aggregate counters.

pub mod dedup;
pub mod executor;
pub mod router;
pub mod signature;

pub use dedup::DedupIndex;
pub use executor::{
    CancelFlag, DepartmentCounts, Outcome, StoreSet, SyncReport, SyncSession, SyncStats,
};
pub use router::route;
pub use signature::Signature;
