//! HTTP client for the Airtable-backed record store.
//!
//! The store holds one row per incoming customer email; this client only
//! reads the pending queue (`Status = "New"`) and patches a row's status
//! when the operator approves or discards a reply. No pagination, no
//! caching, no retries.

use crate::StoreError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use studio_core::{RecordStatus, Sentiment, SourceEmail, Urgency};
use url::Url;

#[derive(Debug, Clone)]
pub struct StoreSettings {
    pub api_key: String,
    pub base_id: String,
    pub table_name: String,
    pub api_base: Url,
}

impl StoreSettings {
    /// All three identifiers are required; a partially configured store is
    /// reported, not silently ignored.
    pub fn from_parts(
        api_key: Option<String>,
        base_id: Option<String>,
        table_name: Option<String>,
        api_base: Url,
    ) -> Result<Self, StoreError> {
        match (api_key, base_id, table_name) {
            (Some(api_key), Some(base_id), Some(table_name)) => Ok(Self {
                api_key,
                base_id,
                table_name,
                api_base,
            }),
            _ => Err(StoreError::NotConfigured),
        }
    }
}

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Pending records, newest first.
    async fn fetch_pending(&self) -> Result<Vec<SourceEmail>, StoreError>;

    /// Patch a record's status, and its draft-reply field when a body is
    /// provided. The caller must keep the record in its local list when
    /// this fails.
    async fn update_status(
        &self,
        id: &str,
        status: RecordStatus,
        draft_body: Option<&str>,
    ) -> Result<(), StoreError>;
}

pub struct AirtableStore {
    http: reqwest::Client,
    settings: StoreSettings,
    table_url: Url,
}

impl AirtableStore {
    pub fn new(settings: StoreSettings) -> Result<Self, StoreError> {
        let table_url = settings
            .api_base
            .join(&format!(
                "v0/{}/{}",
                settings.base_id, settings.table_name
            ))
            .map_err(|_| StoreError::NotConfigured)?;

        Ok(Self {
            http: reqwest::Client::new(),
            settings,
            table_url,
        })
    }

    fn record_url(&self, id: &str) -> Url {
        let mut url = self.table_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(id);
        }
        url
    }
}

#[async_trait]
impl RecordStore for AirtableStore {
    async fn fetch_pending(&self) -> Result<Vec<SourceEmail>, StoreError> {
        let response = self
            .http
            .get(self.table_url.clone())
            .bearer_auth(&self.settings.api_key)
            .query(&[
                ("filterByFormula", "{Status}='New'"),
                ("sort[0][field]", "Received At"),
                ("sort[0][direction]", "desc"),
            ])
            .send()
            .await
            .map_err(StoreError::Fetch)?
            .error_for_status()
            .map_err(StoreError::Fetch)?;

        let page: RecordPage = response.json().await.map_err(StoreError::Fetch)?;
        let records = page
            .records
            .into_iter()
            .map(RawRecord::into_source_email)
            .collect::<Vec<_>>();

        tracing::debug!(count = records.len(), "fetched pending records");
        Ok(records)
    }

    async fn update_status(
        &self,
        id: &str,
        status: RecordStatus,
        draft_body: Option<&str>,
    ) -> Result<(), StoreError> {
        let mut fields = serde_json::json!({ "Status": status.as_str() });
        if let Some(body) = draft_body {
            fields["Draft Reply Body"] = serde_json::json!(body);
        }

        self.http
            .patch(self.record_url(id))
            .bearer_auth(&self.settings.api_key)
            .json(&serde_json::json!({ "fields": fields }))
            .send()
            .await
            .map_err(StoreError::Update)?
            .error_for_status()
            .map_err(StoreError::Update)?;

        tracing::info!(record = id, status = status.as_str(), "record updated");
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct RecordPage {
    records: Vec<RawRecord>,
}

#[derive(Debug, Deserialize)]
struct RawRecord {
    id: String,
    #[serde(default)]
    fields: RawFields,
}

/// Raw store column names. Everything is optional on the wire; mapping
/// applies the documented defaults.
#[derive(Debug, Default, Deserialize)]
struct RawFields {
    #[serde(rename = "Sender Name")]
    sender_name: Option<String>,
    #[serde(rename = "Sender Email")]
    sender_email: Option<String>,
    #[serde(rename = "Original Subject")]
    subject: Option<String>,
    #[serde(rename = "Original Body")]
    body: Option<String>,
    #[serde(rename = "Received At")]
    received_at: Option<DateTime<Utc>>,
    #[serde(rename = "Thread ID")]
    thread_id: Option<String>,
    #[serde(rename = "Status")]
    status: Option<RecordStatus>,
    #[serde(rename = "Draft Reply Body")]
    draft_reply_body: Option<String>,
    #[serde(rename = "Urgency")]
    urgency: Option<Urgency>,
    #[serde(rename = "Sentiment")]
    sentiment: Option<Sentiment>,
    #[serde(rename = "Language")]
    language: Option<String>,
}

impl RawRecord {
    fn into_source_email(self) -> SourceEmail {
        let fields = self.fields;
        SourceEmail {
            id: Some(self.id),
            sender_name: fields.sender_name.unwrap_or_else(|| "Unknown".to_string()),
            sender_email: fields.sender_email.unwrap_or_default(),
            subject: fields
                .subject
                .unwrap_or_else(|| "(No Subject)".to_string()),
            body: fields.body.unwrap_or_default(),
            received_at: fields.received_at,
            thread_id: fields.thread_id.unwrap_or_default(),
            status: fields.status.unwrap_or(RecordStatus::New),
            draft_reply_body: fields.draft_reply_body,
            urgency: fields.urgency,
            sentiment: fields.sentiment,
            language: fields.language,
        }
    }
}
