//! Session-scoped storage backend.
//!
//! Parity with `InMemoryStorage`, plus what a real session layer carries: a
//! session id scoping the entries to one user and an updated-at timestamp
//! per entry. Cross-request races are out of scope; the hosting framework
//! serializes interactions per session.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use formflow_core::storage::Storage;

/// One stored value plus its write metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionEntry {
    pub value: Value,
    pub updated_at: DateTime<Utc>,
}

/// Storage bound to a single user session.
#[derive(Debug)]
pub struct SessionStorage {
    session_id: Uuid,
    entries: HashMap<String, SessionEntry>,
}

impl SessionStorage {
    pub fn new() -> Self {
        Self::with_session_id(Uuid::new_v4())
    }

    /// Reattaches to a known session id (e.g. restored from a cookie).
    pub fn with_session_id(session_id: Uuid) -> Self {
        Self { session_id, entries: HashMap::new() }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn entry(&self, key: &str) -> Option<&SessionEntry> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for SessionStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl Storage for SessionStorage {
    fn persist(&mut self, key: &str, value: Value) {
        debug!("session {}: persist `{key}`", self.session_id);
        self.entries.insert(key.to_string(),
                            SessionEntry { value, updated_at: Utc::now() });
    }

    fn remove(&mut self, key: &str) {
        debug!("session {}: remove `{key}`", self.session_id);
        self.entries.remove(key);
    }

    fn get(&self, key: &str, default: Value) -> Value {
        self.entries
            .get(key)
            .map(|entry| entry.value.clone())
            .unwrap_or(default)
    }
}
