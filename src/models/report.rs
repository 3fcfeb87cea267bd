// src/models/report.rs

//! Run result reported to the caller of a pipeline.

use serde::Serialize;

/// Summary of one sync run.
///
/// Transient: returned to the invoker and discarded, never persisted.
/// Failure detail beyond `error` lives only in logs.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SyncReport {
    pub success: bool,

    /// Records fetched from the CRM (contact pipeline only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetched: Option<u64>,

    /// Records upserted into the sink
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inserted: Option<u64>,

    /// Display string of the fatal error, if the run failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SyncReport {
    /// Successful run.
    pub fn success(fetched: Option<u64>, inserted: u64) -> Self {
        Self {
            success: true,
            fetched,
            inserted: Some(inserted),
            error: None,
        }
    }

    /// Failed run, keeping whatever counts accumulated before the error.
    pub fn failure(fetched: Option<u64>, inserted: Option<u64>, error: impl ToString) -> Self {
        Self {
            success: false,
            fetched,
            inserted,
            error: Some(error.to_string()),
        }
    }
}
