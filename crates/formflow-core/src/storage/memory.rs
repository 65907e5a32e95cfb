use std::collections::HashMap;

use serde_json::Value;

use super::Storage;

/// HashMap-backed storage. Reference backend for tests and single-process
/// demos; per-request state only, nothing survives the process.
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    pub inner: HashMap<String, Value>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl Storage for InMemoryStorage {
    fn persist(&mut self, key: &str, value: Value) {
        self.inner.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) {
        self.inner.remove(key);
    }

    fn get(&self, key: &str, default: Value) -> Value {
        self.inner.get(key).cloned().unwrap_or(default)
    }
}
