use crate::booking::{BookingWizard, ValidationError};
use actix_session::Session;
use actix_session::storage::{
    CookieSessionStore, LoadError, RedisSessionStore, SaveError, SessionKey, SessionStore, UpdateError,
};
use actix_web::cookie::time::Duration;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

pub const WIZARD_KEY: &str = "booking_wizard";

/// Outcome of the last submit, shown once above the booking form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    Submitted { reference: String },
    /// Another post for the same booking is still being delivered.
    AlreadySending,
    SubmissionFailed { message: String, retryable: bool },
}

/// What a visitor's session remembers about the booking form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardSnapshot {
    pub wizard: BookingWizard,
    #[serde(default)]
    pub errors: Vec<ValidationError>,
    #[serde(default)]
    pub notice: Option<Notice>,
}

impl WizardSnapshot {
    pub fn clear_feedback(&mut self) {
        self.errors.clear();
        self.notice = None;
    }

    pub fn has_feedback(&self) -> bool {
        !self.errors.is_empty() || self.notice.is_some()
    }
}

/// Loads the visitor's wizard, starting a fresh one if the session has none
/// or holds something unreadable.
pub fn load_snapshot(session: &Session) -> WizardSnapshot {
    match session.get::<WizardSnapshot>(WIZARD_KEY) {
        Ok(Some(snapshot)) => snapshot,
        Ok(None) => WizardSnapshot::default(),
        Err(e) => {
            log::warn!("Discarding unreadable booking wizard from session: {}", e);
            WizardSnapshot::default()
        }
    }
}

pub fn store_snapshot(session: &Session, snapshot: &WizardSnapshot) -> Result<(), actix_session::SessionInsertError> {
    session.insert(WIZARD_KEY, snapshot)
}

struct MemoryEntry {
    state: HashMap<String, String>,
    expires_at: Instant,
}

/// Process-local session storage. Entries expire after the session TTL.
#[derive(Clone, Default)]
pub struct MemoryStore {
    sessions: Arc<DashMap<String, MemoryEntry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn deadline(ttl: &Duration) -> Instant {
        Instant::now() + std::time::Duration::from_secs(ttl.whole_seconds().max(0) as u64)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Drops expired entries.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.sessions.len();
        self.sessions.retain(|_, entry| entry.expires_at > now);
        before.saturating_sub(self.sessions.len())
    }
}

impl SessionStore for MemoryStore {
    async fn load(&self, session_key: &SessionKey) -> Result<Option<HashMap<String, String>>, LoadError> {
        let key = session_key.as_ref();
        let expired = match self.sessions.get(key) {
            Some(entry) if entry.expires_at > Instant::now() => return Ok(Some(entry.state.clone())),
            Some(_) => true,
            None => false,
        };
        if expired {
            self.sessions.remove(key);
        }
        Ok(None)
    }

    async fn save(&self, session_state: HashMap<String, String>, ttl: &Duration) -> Result<SessionKey, SaveError> {
        let session_key = actix_session::storage::generate_session_key();
        self.sessions.insert(
            session_key.as_ref().to_string(),
            MemoryEntry {
                state: session_state,
                expires_at: Self::deadline(ttl),
            },
        );
        Ok(session_key)
    }

    async fn update(
        &self,
        session_key: SessionKey,
        session_state: HashMap<String, String>,
        ttl: &Duration,
    ) -> Result<SessionKey, UpdateError> {
        self.sessions.insert(
            session_key.as_ref().to_string(),
            MemoryEntry {
                state: session_state,
                expires_at: Self::deadline(ttl),
            },
        );
        Ok(session_key)
    }

    async fn update_ttl(&self, session_key: &SessionKey, ttl: &Duration) -> Result<(), anyhow::Error> {
        if let Some(mut entry) = self.sessions.get_mut(session_key.as_ref()) {
            entry.expires_at = Self::deadline(ttl);
        }
        Ok(())
    }

    async fn delete(&self, session_key: &SessionKey) -> Result<(), anyhow::Error> {
        self.sessions.remove(session_key.as_ref());
        Ok(())
    }
}

/// The session store picked from `config.yaml` at startup.
#[derive(Clone)]
pub enum RuntimeSessionStore {
    Cookie(Arc<CookieSessionStore>),
    Memory(MemoryStore),
    Redis(RedisSessionStore),
}

impl SessionStore for RuntimeSessionStore {
    async fn load(&self, session_key: &SessionKey) -> Result<Option<HashMap<String, String>>, LoadError> {
        match self {
            RuntimeSessionStore::Cookie(s) => s.load(session_key).await,
            RuntimeSessionStore::Memory(s) => s.load(session_key).await,
            RuntimeSessionStore::Redis(s) => s.load(session_key).await,
        }
    }

    async fn save(&self, session_state: HashMap<String, String>, ttl: &Duration) -> Result<SessionKey, SaveError> {
        match self {
            RuntimeSessionStore::Cookie(s) => s.save(session_state, ttl).await,
            RuntimeSessionStore::Memory(s) => s.save(session_state, ttl).await,
            RuntimeSessionStore::Redis(s) => s.save(session_state, ttl).await,
        }
    }

    async fn update(
        &self,
        session_key: SessionKey,
        session_state: HashMap<String, String>,
        ttl: &Duration,
    ) -> Result<SessionKey, UpdateError> {
        match self {
            RuntimeSessionStore::Cookie(s) => s.update(session_key, session_state, ttl).await,
            RuntimeSessionStore::Memory(s) => s.update(session_key, session_state, ttl).await,
            RuntimeSessionStore::Redis(s) => s.update(session_key, session_state, ttl).await,
        }
    }

    async fn update_ttl(&self, session_key: &SessionKey, ttl: &Duration) -> Result<(), anyhow::Error> {
        match self {
            RuntimeSessionStore::Cookie(s) => s.update_ttl(session_key, ttl).await,
            RuntimeSessionStore::Memory(s) => s.update_ttl(session_key, ttl).await,
            RuntimeSessionStore::Redis(s) => s.update_ttl(session_key, ttl).await,
        }
    }

    async fn delete(&self, session_key: &SessionKey) -> Result<(), anyhow::Error> {
        match self {
            RuntimeSessionStore::Cookie(s) => s.delete(session_key).await,
            RuntimeSessionStore::Memory(s) => s.delete(session_key).await,
            RuntimeSessionStore::Redis(s) => s.delete(session_key).await,
        }
    }
}
