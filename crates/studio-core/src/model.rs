use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Record lifecycle in the remote store. `New` records are the pending
/// queue; approving or ignoring one removes it from the local list.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RecordStatus {
    New,
    Approved,
    Ignored,
}

impl RecordStatus {
    /// Exact field value used by the record store.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Approved => "Approved",
            Self::Ignored => "Ignored",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Urgency {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

/// A customer email awaiting a reply. Fetched from the record store, or
/// synthesized (with `id: None`) when the operator pastes text manually.
/// Immutable once fetched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceEmail {
    pub id: Option<String>,
    pub sender_name: String,
    pub sender_email: String,
    pub subject: String,
    pub body: String,
    pub received_at: Option<DateTime<Utc>>,
    pub thread_id: String,
    pub status: RecordStatus,
    pub draft_reply_body: Option<String>,
    pub urgency: Option<Urgency>,
    pub sentiment: Option<Sentiment>,
    pub language: Option<String>,
}

impl SourceEmail {
    /// A record synthesized from manually pasted text.
    pub fn manual(body: impl Into<String>) -> Self {
        Self {
            id: None,
            sender_name: "Unknown".to_string(),
            sender_email: String::new(),
            subject: "(No Subject)".to_string(),
            body: body.into(),
            received_at: None,
            thread_id: String::new(),
            status: RecordStatus::New,
            draft_reply_body: None,
            urgency: None,
            sentiment: None,
            language: None,
        }
    }
}

/// Generation strategy selector: which model and capability configuration
/// the draft request uses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GenerationMode {
    Standard,
    Search,
    Thinking,
}

/// Transient request for a fresh draft. Built per generate action, never
/// persisted.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub source_text: String,
    pub mode: GenerationMode,
    pub instructions: String,
}

/// Transient follow-up request that rewrites an existing draft. Always
/// runs on the fixed fast-model configuration; no mode selection.
#[derive(Debug, Clone)]
pub struct RefinementRequest {
    pub source_text: String,
    pub current_subject: String,
    pub current_body: String,
    pub instruction: String,
}

/// The generated subject/HTML-body pair. `body` is a complete HTML
/// document string. Exactly one draft is live at a time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GeneratedDraft {
    pub subject: String,
    pub body: String,
}
