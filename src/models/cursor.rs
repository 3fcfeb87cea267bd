// src/models/cursor.rs

//! Pagination cursor returned by the CRM with each contact page.

use serde::Deserialize;

/// Cursor for requesting the next contact page.
///
/// The CRM pages by an offset token plus a tie-breaking id; both are
/// required to request the next page, so they travel as one unit. A
/// page whose metadata is missing either component has no successor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageCursor {
    /// Opaque offset token (epoch millis upstream)
    pub start_after: i64,

    /// Tie-breaking contact id
    pub start_after_id: String,
}

/// Pagination metadata block of a contact page response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    #[serde(default)]
    pub start_after: Option<i64>,

    #[serde(default)]
    pub start_after_id: Option<String>,
}

impl PageMeta {
    /// Cursor for the next page, if the CRM provided both components.
    pub fn cursor(&self) -> Option<PageCursor> {
        match (self.start_after, self.start_after_id.as_ref()) {
            (Some(start_after), Some(id)) => Some(PageCursor {
                start_after,
                start_after_id: id.clone(),
            }),
            _ => None,
        }
    }
}
