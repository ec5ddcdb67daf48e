//! # courier-store
//!
//! Clients for the external per-department task boards.
//!
//! [`StoreClient`] is the seam the sync engine writes through;
//! [`HttpStoreClient`] speaks a Notion-compatible pages/query API, and
//! [`InMemoryStore`] backs tests and offline runs.

pub mod client;
pub mod error;
pub mod http;
pub mod memory;

pub use client::{CreatedTask, ExistingTask, StoreClient};
pub use error::StoreError;
pub use http::HttpStoreClient;
pub use memory::InMemoryStore;
