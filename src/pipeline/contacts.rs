// src/pipeline/contacts.rs

//! Contact sync pipeline.
//!
//! Drives a cursor-paginated full scan of the CRM's contact collection
//! and upserts each page into the sink. The run has no partial-success
//! mode: any error aborts it, and the report carries the counts
//! accumulated up to the failing step.

use chrono::Utc;

use crate::error::Result;
use crate::models::{Contact, PageCursor, SyncReport};
use crate::pipeline::pacing::Pacer;
use crate::services::CrmApi;
use crate::storage::SyncStore;

/// Running totals for one contact sync.
#[derive(Debug, Default)]
struct Totals {
    fetched: u64,
    inserted: u64,
}

/// Run the contact sync pipeline to completion.
pub async fn run_contact_sync(
    crm: &dyn CrmApi,
    store: &dyn SyncStore,
    pacer: &Pacer,
) -> SyncReport {
    let started = Utc::now();
    log::info!("contact sync started");

    let mut totals = Totals::default();
    match sync_pages(crm, store, pacer, &mut totals).await {
        Ok(pages) => {
            let elapsed = Utc::now() - started;
            log::info!(
                "contact sync finished: {} pages, {} fetched, {} upserted in {}s",
                pages,
                totals.fetched,
                totals.inserted,
                elapsed.num_seconds()
            );
            SyncReport::success(Some(totals.fetched), totals.inserted)
        }
        Err(error) => {
            log::error!("contact sync failed: {error}");
            SyncReport::failure(Some(totals.fetched), Some(totals.inserted), &error)
        }
    }
}

/// Follow the cursor until the collection is exhausted.
///
/// Termination is either an empty page or page metadata missing a
/// cursor component. Returns the number of pages processed.
async fn sync_pages(
    crm: &dyn CrmApi,
    store: &dyn SyncStore,
    pacer: &Pacer,
    totals: &mut Totals,
) -> Result<u64> {
    let mut cursor: Option<PageCursor> = None;
    let mut page: u64 = 0;

    loop {
        let response = crm.fetch_contacts_page(cursor.as_ref()).await?;
        page += 1;
        log::info!("page {} | fetched: {}", page, response.contacts.len());

        if response.contacts.is_empty() {
            break;
        }

        // Fetched counts are final once the page arrives, even if the
        // upsert below fails.
        totals.fetched += response.contacts.len() as u64;

        let rows: Vec<Contact> = response.contacts.into_iter().map(Contact::from).collect();
        totals.inserted += store.upsert_contacts(&rows).await?;
        log::info!("page {} upserted | total: {}", page, totals.inserted);

        cursor = response.meta.cursor();
        if cursor.is_none() {
            break;
        }

        pacer.pause_after(page).await;
    }

    Ok(page)
}
