use async_trait::async_trait;
use taskboard_core::CoreError;

/// Durable key-value persistence used by domain repositories.
///
/// Each key holds one opaque string document. Implementations must make
/// `set` all-or-nothing: when it returns an error, a subsequent `get`
/// observes the previous value.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored under `key`, or `None` if nothing is stored.
    async fn get(&self, key: &str) -> Result<Option<String>, CoreError>;

    /// Replaces the value stored under `key`.
    async fn set(&self, key: &str, value: &str) -> Result<(), CoreError>;
}
