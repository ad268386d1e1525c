//! An in-memory [`KeyValueStore`] with switchable failure injection.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use taskboard_core::CoreError;

use crate::ports::KeyValueStore;

/// Process-local key-value store.
///
/// Clones share the same entries and failure switches, so a test can keep a
/// handle while the repository under test owns another.
#[derive(Debug, Clone, Default)]
pub struct InMemoryKeyValueStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
    fail_reads: Arc<AtomicBool>,
    fail_writes: Arc<AtomicBool>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates `key` with `value`.
    pub fn with_entry(self, key: &str, value: &str) -> Self {
        self.entries.lock().insert(key.to_string(), value.to_string());
        self
    }

    /// Current raw value of `key`, bypassing failure injection.
    pub fn entry(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }

    /// While set, every `get` fails with an I/O error.
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// While set, every `set` fails and leaves the entries untouched.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn injected_error(operation: &str) -> CoreError {
        CoreError::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            format!("injected {} failure", operation),
        ))
    }
}

#[async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(Self::injected_error("read"));
        }
        Ok(self.entries.lock().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), CoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Self::injected_error("write"));
        }
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}
