// src/pipeline/tasks.rs

//! Task sync pipeline.
//!
//! Fans out over the contact ids already present in the sink, fetching
//! and upserting each contact's tasks. One contact's failure is logged
//! and skipped, never propagated: the run finishes and reports the
//! total it managed to land. Only the initial id-list read is fatal.

use chrono::Utc;

use crate::error::Result;
use crate::models::{SyncReport, Task};
use crate::pipeline::pacing::Pacer;
use crate::services::CrmApi;
use crate::storage::SyncStore;

/// Run the task sync pipeline to completion.
pub async fn run_task_sync(crm: &dyn CrmApi, store: &dyn SyncStore, pacer: &Pacer) -> SyncReport {
    let started = Utc::now();
    log::info!("task sync started");

    // No per-contact isolation is possible before the id list exists.
    let contact_ids = match store.contact_ids().await {
        Ok(ids) => ids,
        Err(error) => {
            log::error!("task sync failed reading contact ids: {error}");
            return SyncReport::failure(None, None, &error);
        }
    };

    if contact_ids.is_empty() {
        log::info!("task sync finished: no contacts in sink");
        return SyncReport::success(None, 0);
    }

    let total = contact_ids.len();
    let mut inserted: u64 = 0;
    let mut failed_contacts: u64 = 0;

    for (index, contact_id) in contact_ids.iter().enumerate() {
        log::debug!("contact {}/{} -> {}", index + 1, total, contact_id);

        match sync_contact_tasks(crm, store, contact_id).await {
            Ok(count) => {
                if count > 0 {
                    inserted += count;
                    log::info!("tasks upserted: {count} | total: {inserted}");
                }
            }
            Err(error) => {
                // Swallowed by policy: a failed contact contributes zero,
                // indistinguishable from one with no tasks.
                failed_contacts += 1;
                log::warn!("failed tasks for contact {contact_id}: {error}");
            }
        }

        pacer.pause_after((index + 1) as u64).await;
    }

    let elapsed = Utc::now() - started;
    log::info!(
        "task sync finished: {} contacts, {} tasks upserted, {} contacts failed in {}s",
        total,
        inserted,
        failed_contacts,
        elapsed.num_seconds()
    );

    SyncReport::success(None, inserted)
}

/// Fetch, transform, and upsert one contact's tasks.
async fn sync_contact_tasks(
    crm: &dyn CrmApi,
    store: &dyn SyncStore,
    contact_id: &str,
) -> Result<u64> {
    let tasks = crm.fetch_contact_tasks(contact_id).await?;
    if tasks.is_empty() {
        return Ok(0);
    }

    let rows: Vec<Task> = tasks.into_iter().map(Task::from).collect();
    store.upsert_tasks(&rows).await
}
