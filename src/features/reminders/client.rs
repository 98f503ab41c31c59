//! # Notion Query Client
//!
//! Issues the database query for unfinished reminders and decodes the
//! response envelope. Pages are kept as loosely-typed JSON; normalization
//! happens in the extractor.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use crate::core::{Config, ReminderError, Result};
use async_trait::async_trait;
use log::debug;
use reqwest::StatusCode;
use serde::{Deserialize, Deserializer};
use serde_json::{json, Map, Value};
use std::time::Duration;

/// Default Notion REST endpoint
pub const NOTION_API_BASE: &str = "https://api.notion.com/v1";

/// API version pinned in the `Notion-Version` header
pub const NOTION_VERSION: &str = "2022-06-28";

/// Total per-attempt timeout (connect + read)
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Maximum characters of an error body kept for diagnostics
const MAX_ERROR_BODY_CHARS: usize = 500;

/// A page as returned by the database query
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub properties: Map<String, Value>,
}

/// Envelope of `POST /databases/{id}/query`
#[derive(Debug, Deserialize)]
pub struct QueryResponse {
    pub results: Vec<RawPage>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Query body: unchecked `Status`, newest `Created At` first
pub fn query_body() -> Value {
    json!({
        "filter": {
            "property": "Status",
            "checkbox": { "equals": false }
        },
        "sorts": [
            { "property": "Created At", "direction": "descending" }
        ]
    })
}

/// Source of pending reminder pages
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Run the pending-reminders query once
    async fn query_pending(&self) -> Result<Vec<RawPage>>;
}

pub struct NotionClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
    database_id: String,
}

impl NotionClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| ReminderError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: NOTION_API_BASE.to_string(),
            token: config.token.clone(),
            database_id: config.database_id.clone(),
        })
    }

    /// Point the client at a different API root (no trailing slash)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn query_url(&self) -> String {
        format!("{}/databases/{}/query", self.base_url, self.database_id)
    }

    /// Build the query request without sending it
    pub fn build_request(&self) -> Result<reqwest::Request> {
        let request = self
            .http
            .post(self.query_url())
            .bearer_auth(&self.token)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .header("Notion-Version", NOTION_VERSION)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .json(&query_body())
            .build()?;
        Ok(request)
    }
}

#[async_trait]
impl PageSource for NotionClient {
    async fn query_pending(&self) -> Result<Vec<RawPage>> {
        let request = self.build_request()?;
        debug!("POST {}", request.url());

        let response = self.http.execute(request).await?;
        let status = response.status();
        let body = response.text().await?;

        if status != StatusCode::OK {
            return Err(ReminderError::Remote {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        let envelope: QueryResponse = serde_json::from_str(&body)?;
        debug!("Query returned {} page(s)", envelope.results.len());
        Ok(envelope.results)
    }
}

/// Shorten an error body for logging, respecting char boundaries
fn truncate_body(body: &str) -> String {
    let body = body.trim();
    match body.char_indices().nth(MAX_ERROR_BODY_CHARS) {
        Some((idx, _)) => format!("{}…", &body[..idx]),
        None => body.to_string(),
    }
}
