// src/models/mod.rs

//! Domain models for the sync application.
//!
//! Raw types mirror the CRM API's JSON shapes; row types mirror the
//! sink tables. Transformation between the two is a plain field-by-field
//! reshape with no validation or defaulting.

mod config;
mod contact;
mod cursor;
mod report;
mod task;

// Re-export all public types
pub use config::{Config, CrmConfig, DatabaseConfig, SyncConfig};
pub use contact::{Contact, ContactsPage, RawContact};
pub use cursor::{PageCursor, PageMeta};
pub use report::SyncReport;
pub use task::{RawTask, Task, TasksResponse};
