//! Operator session: a shared-secret login persisted between runs.
//!
//! The clock and the persistence backend are injected so tests can drive
//! expiry and logout deterministically.

use crate::SessionError;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionRecord {
    pub authenticated_at: DateTime<Utc>,
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

pub trait SessionStore: Send + Sync {
    fn load(&self) -> Result<Option<SessionRecord>, SessionError>;
    fn save(&self, record: &SessionRecord) -> Result<(), SessionError>;
    fn clear(&self) -> Result<(), SessionError>;
}

/// TOML file under the app data dir; one record, no history.
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<SessionRecord>, SessionError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(Some(toml::from_str(&content)?))
    }

    fn save(&self, record: &SessionRecord) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, toml::to_string_pretty(record)?)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

/// In-memory store for tests.
#[derive(Default)]
pub struct MemorySessionStore {
    record: Mutex<Option<SessionRecord>>,
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<SessionRecord>, SessionError> {
        Ok(self.record.lock().expect("session lock").clone())
    }

    fn save(&self, record: &SessionRecord) -> Result<(), SessionError> {
        *self.record.lock().expect("session lock") = Some(record.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        *self.record.lock().expect("session lock") = None;
        Ok(())
    }
}

pub struct SessionManager {
    store: Box<dyn SessionStore>,
    clock: Box<dyn Clock>,
    passphrase: Option<String>,
    ttl: Option<Duration>,
}

impl SessionManager {
    pub fn new(
        store: Box<dyn SessionStore>,
        clock: Box<dyn Clock>,
        passphrase: Option<String>,
        ttl_hours: Option<u64>,
    ) -> Self {
        Self {
            store,
            clock,
            passphrase,
            ttl: ttl_hours.map(|hours| Duration::hours(hours as i64)),
        }
    }

    /// Whether a login passphrase exists at all. Without one the login
    /// screen shows an explicit configuration message instead of a form.
    pub fn is_configured(&self) -> bool {
        self.passphrase.is_some()
    }

    /// Restore a persisted session, honoring the optional TTL. An expired
    /// record is cleared and treated as logged out.
    pub fn restore(&self) -> bool {
        let record = match self.store.load() {
            Ok(Some(record)) => record,
            Ok(None) => return false,
            Err(err) => {
                tracing::warn!("failed to load session: {err}");
                return false;
            }
        };

        if let Some(ttl) = self.ttl {
            if self.clock.now() - record.authenticated_at >= ttl {
                tracing::info!("persisted session expired");
                let _ = self.store.clear();
                return false;
            }
        }

        true
    }

    /// Compare the operator input against the shared secret. Wrong input
    /// is an inline error; there is no lockout or backoff.
    pub fn login(&self, input: &str) -> Result<(), SessionError> {
        let expected = self
            .passphrase
            .as_deref()
            .ok_or(SessionError::NotConfigured)?;

        if input != expected {
            return Err(SessionError::InvalidPassphrase);
        }

        self.store.save(&SessionRecord {
            authenticated_at: self.clock.now(),
        })?;
        Ok(())
    }

    pub fn logout(&self) -> Result<(), SessionError> {
        self.store.clear()
    }
}
