// src/pipeline/mod.rs

//! Pipeline entry points for sync operations.
//!
//! - `run_contact_sync`: cursor-paginated full scan of the CRM's contacts
//! - `run_task_sync`: per-contact fan-out over already-synced contact ids
//!
//! Both share one shape: fetch, transform, upsert, pace, repeat until
//! exhausted. Runs are strictly sequential; the pacing module spaces
//! calls out to respect upstream rate limits.

pub mod contacts;
pub mod pacing;
pub mod tasks;

#[cfg(test)]
pub(crate) mod testing;

pub use contacts::run_contact_sync;
pub use pacing::Pacer;
pub use tasks::run_task_sync;
