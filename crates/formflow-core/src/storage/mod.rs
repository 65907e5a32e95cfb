//! Key/value storage contract and the in-memory reference backend.
//!
//! Keys are plain strings scoped by a per-component prefix (see [`keys`]);
//! values are opaque JSON payloads. Last-write-wins per key, no TTL and no
//! transactional semantics.

pub mod keys;
mod memory;

pub use keys::{component_key_for, current_step_key, form_values_key, snake_case};
pub use memory::InMemoryStorage;

use serde_json::Value;

/// Durable state shared across round trips (session, cookie, database).
pub trait Storage {
    /// Stores `value` under `key`, replacing any previous entry.
    fn persist(&mut self, key: &str, value: Value);

    /// Deletes the entry for `key`, if any.
    fn remove(&mut self, key: &str);

    /// Retrieves the value stored under `key`, or `default` when absent.
    fn get(&self, key: &str, default: Value) -> Value;

    /// Retrieval with the contract default of an empty mapping.
    fn get_or_empty(&self, key: &str) -> Value {
        self.get(key, Value::Object(serde_json::Map::new()))
    }
}
