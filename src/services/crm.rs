// src/services/crm.rs

//! CRM API client.
//!
//! Thin authenticated wrapper over the CRM's REST endpoints. Every call
//! carries the bearer credential, the fixed API-version marker, and a
//! no-store cache directive. No retry lives here: a failed call is the
//! caller's problem.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{AUTHORIZATION, CACHE_CONTROL, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;

use crate::error::{AppError, Result};
use crate::models::{ContactsPage, CrmConfig, PageCursor, RawTask, TasksResponse};

/// CRM read operations used by the pipelines.
#[async_trait]
pub trait CrmApi: Send + Sync {
    /// Fetch one page of the contact collection, scoped to the
    /// configured location. `None` requests the first page.
    async fn fetch_contacts_page(&self, cursor: Option<&PageCursor>) -> Result<ContactsPage>;

    /// Fetch all tasks of a single contact.
    async fn fetch_contact_tasks(&self, contact_id: &str) -> Result<Vec<RawTask>>;
}

/// Authenticated HTTP client for the CRM API.
pub struct CrmClient {
    base_url: String,
    location_id: String,
    page_size: u32,
    client: Client,
}

impl CrmClient {
    /// Create a client from CRM settings and the configured page size.
    pub fn new(config: &CrmConfig, page_size: u32) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.token))
            .map_err(|e| AppError::config(format!("invalid crm.token: {e}")))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(
            "Version",
            HeaderValue::from_str(&config.api_version)
                .map_err(|e| AppError::config(format!("invalid crm.api_version: {e}")))?,
        );
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-store"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            location_id: config.location_id.clone(),
            page_size,
            client,
        })
    }

    /// Perform a GET against a relative resource path and parse the body.
    ///
    /// A non-success status fails the call with the status code; the
    /// response body of failed calls is not inspected.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.client.get(&url).query(query).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::upstream(status.as_u16(), path));
        }

        Ok(response.json().await?)
    }
}

/// Build the query string for a contact page request.
fn contacts_query(
    location_id: &str,
    page_size: u32,
    cursor: Option<&PageCursor>,
) -> Vec<(&'static str, String)> {
    let mut query = vec![
        ("locationId", location_id.to_string()),
        ("limit", page_size.to_string()),
    ];
    if let Some(cursor) = cursor {
        query.push(("startAfter", cursor.start_after.to_string()));
        query.push(("startAfterId", cursor.start_after_id.clone()));
    }
    query
}

#[async_trait]
impl CrmApi for CrmClient {
    async fn fetch_contacts_page(&self, cursor: Option<&PageCursor>) -> Result<ContactsPage> {
        let query = contacts_query(&self.location_id, self.page_size, cursor);
        self.get_json("/contacts", &query).await
    }

    async fn fetch_contact_tasks(&self, contact_id: &str) -> Result<Vec<RawTask>> {
        let path = format!("/contacts/{contact_id}/tasks");
        let response: TasksResponse = self.get_json(&path, &[]).await?;
        Ok(response.tasks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contacts_query_first_page() {
        let query = contacts_query("L1", 100, None);
        assert_eq!(
            query,
            vec![
                ("locationId", "L1".to_string()),
                ("limit", "100".to_string()),
            ]
        );
    }

    #[test]
    fn test_contacts_query_with_cursor() {
        let cursor = PageCursor {
            start_after: 1700000000000,
            start_after_id: "c99".to_string(),
        };
        let query = contacts_query("L1", 100, Some(&cursor));
        assert_eq!(
            query,
            vec![
                ("locationId", "L1".to_string()),
                ("limit", "100".to_string()),
                ("startAfter", "1700000000000".to_string()),
                ("startAfterId", "c99".to_string()),
            ]
        );
    }

    #[test]
    fn test_new_rejects_token_with_control_chars() {
        let config = CrmConfig {
            base_url: "https://example.com".to_string(),
            token: "bad\ntoken".to_string(),
            location_id: "L1".to_string(),
            ..CrmConfig::default()
        };
        assert!(CrmClient::new(&config, 100).is_err());
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let config = CrmConfig {
            base_url: "https://example.com/".to_string(),
            token: "pit-secret".to_string(),
            location_id: "L1".to_string(),
            ..CrmConfig::default()
        };
        let client = CrmClient::new(&config, 100).unwrap();
        assert_eq!(client.base_url, "https://example.com");
    }
}
