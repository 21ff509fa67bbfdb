use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub version: u32,
    pub airtable: AirtableConfig,
    pub gemini: GeminiConfig,
    pub session: SessionConfig,
    pub ui: UiConfig,
}

/// Record-store connection settings. A missing api key, base id or table
/// name degrades the store client to an operator-visible "not configured"
/// failure rather than a silent no-op.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirtableConfig {
    pub api_key: Option<String>,
    pub base_id: Option<String>,
    pub table_name: Option<String>,
    pub api_base: Url,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub api_base: Url,
    /// Fast general model (Standard and Search modes, and all refinements).
    pub flash_model: String,
    /// Higher-capability model for Thinking mode.
    pub pro_model: String,
    /// Reasoning token budget for Thinking mode.
    pub thinking_budget: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Shared-secret login value. `None` makes login impossible and shows
    /// an explicit message on the login screen.
    pub passphrase: Option<String>,
    /// Optional session lifetime; `None` means the persisted session never
    /// expires (the behavior of the original tool).
    pub ttl_hours: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    pub language: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            airtable: AirtableConfig {
                api_key: None,
                base_id: None,
                table_name: None,
                api_base: Url::parse("https://api.airtable.com").expect("static url"),
            },
            gemini: GeminiConfig {
                api_key: None,
                api_base: Url::parse("https://generativelanguage.googleapis.com/v1beta")
                    .expect("static url"),
                flash_model: "gemini-2.5-flash".to_string(),
                pro_model: "gemini-2.5-pro".to_string(),
                thinking_budget: 32_768,
            },
            session: SessionConfig {
                passphrase: None,
                ttl_hours: None,
            },
            ui: UiConfig {
                language: "es".to_string(),
            },
        }
    }
}
