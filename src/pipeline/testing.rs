// src/pipeline/testing.rs

//! In-memory test doubles for the CRM client and the sink.

use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::models::{Contact, ContactsPage, PageCursor, RawContact, RawTask, Task};
use crate::services::CrmApi;
use crate::storage::SyncStore;

/// Scripted CRM double: serves a fixed page sequence and a per-contact
/// task table, counting every call.
#[derive(Default)]
pub struct MockCrm {
    pages: Mutex<VecDeque<ContactsPage>>,
    tasks: HashMap<String, Vec<RawTask>>,
    failing_contacts: HashSet<String>,
    page_calls: AtomicU64,
    task_call_count: AtomicU64,
}

impl MockCrm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve these pages in order; a fetch past the end is an upstream error.
    pub fn with_pages(self, pages: Vec<ContactsPage>) -> Self {
        *self.pages.lock().unwrap() = pages.into();
        self
    }

    pub fn with_tasks(mut self, contact_id: &str, tasks: Vec<RawTask>) -> Self {
        self.tasks.insert(contact_id.to_string(), tasks);
        self
    }

    /// Make this contact's task fetch fail.
    pub fn failing_contact(mut self, contact_id: &str) -> Self {
        self.failing_contacts.insert(contact_id.to_string());
        self
    }

    pub fn contact_page_calls(&self) -> u64 {
        self.page_calls.load(Ordering::SeqCst)
    }

    pub fn task_calls(&self) -> u64 {
        self.task_call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CrmApi for MockCrm {
    async fn fetch_contacts_page(&self, _cursor: Option<&PageCursor>) -> Result<ContactsPage> {
        self.page_calls.fetch_add(1, Ordering::SeqCst);
        self.pages
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| AppError::upstream(429, "/contacts"))
    }

    async fn fetch_contact_tasks(&self, contact_id: &str) -> Result<Vec<RawTask>> {
        self.task_call_count.fetch_add(1, Ordering::SeqCst);
        if self.failing_contacts.contains(contact_id) {
            return Err(AppError::upstream(
                500,
                format!("/contacts/{contact_id}/tasks"),
            ));
        }
        Ok(self.tasks.get(contact_id).cloned().unwrap_or_default())
    }
}

/// In-memory sink keyed like the real tables, with scriptable failures.
#[derive(Default)]
pub struct MemoryStore {
    contacts: Mutex<BTreeMap<String, Contact>>,
    tasks: Mutex<BTreeMap<String, Task>>,
    contact_batches: AtomicU64,
    task_batches: AtomicU64,
    fail_contact_batch: Option<u64>,
    fail_task_batch: Option<u64>,
    fail_ids: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate contact rows so `contact_ids` has something to return.
    pub fn seeded_contacts(self, ids: &[&str]) -> Self {
        {
            let mut contacts = self.contacts.lock().unwrap();
            for id in ids {
                contacts.insert((*id).to_string(), minimal_contact(id));
            }
        }
        self
    }

    /// Fail the Nth contact batch upsert (1-based).
    pub fn failing_contact_batch(mut self, n: u64) -> Self {
        self.fail_contact_batch = Some(n);
        self
    }

    /// Fail the Nth task batch upsert (1-based).
    pub fn failing_task_batch(mut self, n: u64) -> Self {
        self.fail_task_batch = Some(n);
        self
    }

    /// Fail the contact id listing.
    pub fn failing_ids(mut self) -> Self {
        self.fail_ids = true;
        self
    }

    pub fn contact_count(&self) -> usize {
        self.contacts.lock().unwrap().len()
    }

    pub fn task_count(&self) -> usize {
        self.tasks.lock().unwrap().len()
    }

    pub fn contact(&self, id: &str) -> Option<Contact> {
        self.contacts.lock().unwrap().get(id).cloned()
    }
}

#[async_trait]
impl SyncStore for MemoryStore {
    async fn contact_ids(&self) -> Result<Vec<String>> {
        if self.fail_ids {
            return Err(AppError::sink("connection refused"));
        }
        Ok(self.contacts.lock().unwrap().keys().cloned().collect())
    }

    async fn upsert_contacts(&self, rows: &[Contact]) -> Result<u64> {
        let batch = self.contact_batches.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_contact_batch == Some(batch) {
            return Err(AppError::sink("contacts constraint violation"));
        }
        let mut contacts = self.contacts.lock().unwrap();
        for row in rows {
            contacts.insert(row.ghl_contact_id.clone(), row.clone());
        }
        Ok(rows.len() as u64)
    }

    async fn upsert_tasks(&self, rows: &[Task]) -> Result<u64> {
        let batch = self.task_batches.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_task_batch == Some(batch) {
            return Err(AppError::sink("tasks constraint violation"));
        }
        let mut tasks = self.tasks.lock().unwrap();
        for row in rows {
            tasks.insert(row.ghl_task_id.clone(), row.clone());
        }
        Ok(rows.len() as u64)
    }
}

/// Raw contact with only the id set.
pub fn raw_contact(id: &str) -> RawContact {
    serde_json::from_value(serde_json::json!({ "id": id })).unwrap()
}

/// Raw task owned by the given contact.
pub fn raw_task(id: &str, contact_id: &str) -> RawTask {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "contactId": contact_id,
        "title": format!("task {id}"),
    }))
    .unwrap()
}

/// Contact page with an optional `(startAfter, startAfterId)` cursor.
pub fn page(contacts: Vec<RawContact>, cursor: Option<(i64, &str)>) -> ContactsPage {
    let mut page = ContactsPage {
        contacts,
        ..ContactsPage::default()
    };
    if let Some((start_after, id)) = cursor {
        page.meta.start_after = Some(start_after);
        page.meta.start_after_id = Some(id.to_string());
    }
    page
}

fn minimal_contact(id: &str) -> Contact {
    Contact::from(raw_contact(id))
}
