// src/lib.rs

//! GHL Sync Library
//!
//! Mirrors GoHighLevel CRM contacts and tasks into a Postgres sink,
//! keyed by the CRM's external ids for idempotent re-sync.

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
