// src/services/mod.rs

//! Service layer for the sync application.
//!
//! - CRM API access (`CrmClient`), behind the `CrmApi` trait so the
//!   pipelines can run against a test double.

mod crm;

pub use crm::{CrmApi, CrmClient};
