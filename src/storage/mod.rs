// src/storage/mod.rs

//! Sink abstractions for synced CRM records.
//!
//! The sink is an insert-or-overwrite store keyed by the CRM's external
//! ids. Batches are atomic: a batch either lands fully or not at all,
//! with atomicity delegated to the relational store. The dashboard's
//! read-only views live on top of these tables and are out of scope.

mod postgres;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Contact, Task};

// Re-export for convenience
pub use postgres::PgStore;

/// Trait for upsert-capable sink backends.
#[async_trait]
pub trait SyncStore: Send + Sync {
    /// All contact external ids currently present in the sink.
    async fn contact_ids(&self) -> Result<Vec<String>>;

    /// Upsert a batch of contact rows keyed by `ghl_contact_id`.
    ///
    /// Existing rows are overwritten in full; returns the batch size.
    async fn upsert_contacts(&self, rows: &[Contact]) -> Result<u64>;

    /// Upsert a batch of task rows keyed by `ghl_task_id`.
    async fn upsert_tasks(&self, rows: &[Task]) -> Result<u64>;
}
