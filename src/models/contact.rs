// src/models/contact.rs

//! Contact shapes: the CRM's wire format and the sink row.

use serde::{Deserialize, Serialize};

use super::cursor::PageMeta;

/// A contact as returned by the CRM API.
///
/// Only `id` is guaranteed; every other field may be absent and passes
/// through to the row as NULL.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawContact {
    pub id: String,

    #[serde(default)]
    pub location_id: Option<String>,

    #[serde(default)]
    pub contact_name: Option<String>,

    #[serde(default)]
    pub first_name: Option<String>,

    #[serde(default)]
    pub last_name: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub phone: Option<String>,

    #[serde(default)]
    pub city: Option<String>,

    #[serde(default)]
    pub state: Option<String>,

    #[serde(default)]
    pub country: Option<String>,

    #[serde(default)]
    pub source: Option<String>,

    #[serde(default)]
    pub assigned_to: Option<String>,

    #[serde(default, rename = "type")]
    pub contact_type: Option<String>,

    /// Do-not-disturb flag
    #[serde(default)]
    pub dnd: Option<bool>,

    /// Creation timestamp from the origin system (passed through verbatim)
    #[serde(default)]
    pub date_added: Option<String>,

    /// Update timestamp from the origin system (passed through verbatim)
    #[serde(default)]
    pub date_updated: Option<String>,
}

/// One page of the CRM's contact collection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactsPage {
    #[serde(default)]
    pub contacts: Vec<RawContact>,

    #[serde(default)]
    pub meta: PageMeta,
}

/// A contact row in the sink, keyed by `ghl_contact_id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Contact {
    /// CRM-assigned id: unique, immutable, the upsert key
    pub ghl_contact_id: String,
    pub location_id: Option<String>,
    pub contact_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub source: Option<String>,
    pub assigned_to: Option<String>,
    pub contact_type: Option<String>,
    pub dnd: Option<bool>,
    pub ghl_date_added: Option<String>,
    pub ghl_date_updated: Option<String>,
}

impl From<RawContact> for Contact {
    fn from(raw: RawContact) -> Self {
        Self {
            ghl_contact_id: raw.id,
            location_id: raw.location_id,
            contact_name: raw.contact_name,
            first_name: raw.first_name,
            last_name: raw.last_name,
            email: raw.email,
            phone: raw.phone,
            city: raw.city,
            state: raw.state,
            country: raw.country,
            source: raw.source,
            assigned_to: raw.assigned_to,
            contact_type: raw.contact_type,
            dnd: raw.dnd,
            ghl_date_added: raw.date_added,
            ghl_date_updated: raw.date_updated,
        }
    }
}
