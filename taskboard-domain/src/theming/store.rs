//! Durable repository of theme records.
//!
//! The whole collection lives under a single key of a [`KeyValueStore`] as a
//! JSON array. Every mutation stages a new collection, writes it durably and
//! only then swaps it into memory, so a failed write leaves readers looking
//! at the previous committed state.

use std::sync::Arc;

use chrono::Utc;
use taskboard_core::CoreError;
use tokio::sync::{broadcast, Mutex, MutexGuard};
use tracing::{debug, error, info, warn};

use super::errors::ThemingError;
use super::events::ThemeStoreEvent;
use super::merge;
use super::themes;
use super::types::{PartialThemeTokens, Theme, ThemeId};
use crate::ports::KeyValueStore;

/// Capacity of the store event channel when none is configured.
pub const DEFAULT_EVENT_CAPACITY: usize = 16;

/// CRUD repository enforcing the single-default invariant.
///
/// Cloning is cheap and clones share state. Mutations are serialized by an
/// async mutex that is held across the durability write.
#[derive(Clone)]
pub struct ThemeStore {
    state: Arc<Mutex<Vec<Theme>>>,
    /// `None` for a detached store, which never writes.
    kv: Option<Arc<dyn KeyValueStore>>,
    storage_key: String,
    event_sender: broadcast::Sender<ThemeStoreEvent>,
}

impl std::fmt::Debug for ThemeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeStore")
            .field("storage_key", &self.storage_key)
            .field("detached", &self.kv.is_none())
            .finish_non_exhaustive()
    }
}

enum Loaded {
    Valid(Vec<Theme>),
    Repaired(Vec<Theme>),
    Reseed,
}

impl ThemeStore {
    /// Opens the collection stored under `storage_key`.
    ///
    /// A missing, corrupt or empty value is replaced by the seed themes; a
    /// collection with zero or several defaults is repaired. Either way the
    /// result is written back before the store is returned.
    pub async fn open(kv: Arc<dyn KeyValueStore>, storage_key: &str) -> Result<Self, ThemingError> {
        Self::open_with_capacity(kv, storage_key, DEFAULT_EVENT_CAPACITY).await
    }

    pub async fn open_with_capacity(
        kv: Arc<dyn KeyValueStore>,
        storage_key: &str,
        event_capacity: usize,
    ) -> Result<Self, ThemingError> {
        let raw = kv.get(storage_key).await.map_err(|e| {
            error!(storage_key, "Failed to read stored themes: {}", e);
            ThemingError::persistence("load", &e)
        })?;

        let (themes, needs_write) = match Self::decode(storage_key, raw.as_deref()) {
            Loaded::Valid(themes) => (themes, false),
            Loaded::Repaired(themes) => (themes, true),
            Loaded::Reseed => (themes::seed_themes(Utc::now()), true),
        };

        let store = Self::with_state(Some(kv), storage_key, themes, event_capacity);
        if needs_write {
            let state = store.state.lock().await;
            store.write_durably(&state, "load").await?;
        }
        debug!(storage_key, "Theme store opened");
        Ok(store)
    }

    /// A seeded store that is not connected to durable storage.
    ///
    /// Reads serve the seed themes. Every mutation fails with
    /// `PersistenceFailure`, so whatever is stored under `storage_key` is
    /// never overwritten by a collection that was not loaded from it.
    pub fn detached(storage_key: &str) -> Self {
        Self::detached_with_capacity(storage_key, DEFAULT_EVENT_CAPACITY)
    }

    pub fn detached_with_capacity(storage_key: &str, event_capacity: usize) -> Self {
        Self::with_state(None, storage_key, themes::seed_themes(Utc::now()), event_capacity)
    }

    fn with_state(
        kv: Option<Arc<dyn KeyValueStore>>,
        storage_key: &str,
        themes: Vec<Theme>,
        event_capacity: usize,
    ) -> Self {
        let (event_sender, _) = broadcast::channel(event_capacity.max(1));
        Self {
            state: Arc::new(Mutex::new(themes)),
            kv,
            storage_key: storage_key.to_string(),
            event_sender,
        }
    }

    fn decode(storage_key: &str, raw: Option<&str>) -> Loaded {
        let Some(raw) = raw else {
            info!(storage_key, "No stored themes found, seeding built-in themes");
            return Loaded::Reseed;
        };
        match serde_json::from_str::<Vec<Theme>>(raw) {
            Ok(themes) if themes.is_empty() => {
                warn!(storage_key, "Stored theme collection is empty, reseeding");
                Loaded::Reseed
            }
            Ok(mut themes) => {
                if merge::repair_default_flags(&mut themes) {
                    warn!(storage_key, "Stored themes violated the single-default rule, repaired");
                    Loaded::Repaired(themes)
                } else {
                    Loaded::Valid(themes)
                }
            }
            Err(e) => {
                warn!(storage_key, "Stored themes are corrupt ({}), reseeding", e);
                Loaded::Reseed
            }
        }
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// `true` when the store was built by [`Self::detached`].
    pub fn is_detached(&self) -> bool {
        self.kv.is_none()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ThemeStoreEvent> {
        self.event_sender.subscribe()
    }

    /// All themes in insertion order.
    pub async fn list(&self) -> Vec<Theme> {
        self.state.lock().await.clone()
    }

    /// Themes whose `is_active` flag is set, in insertion order.
    pub async fn list_visible(&self) -> Vec<Theme> {
        self.state.lock().await.iter().filter(|t| t.is_active).cloned().collect()
    }

    pub async fn get(&self, id: ThemeId) -> Result<Theme, ThemingError> {
        self.state
            .lock()
            .await
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or(ThemingError::NotFound { theme_id: id })
    }

    /// The record flagged default, falling back to the first record.
    pub async fn default_theme(&self) -> Option<Theme> {
        let state = self.state.lock().await;
        state.iter().find(|t| t.is_default).or_else(|| state.first()).cloned()
    }

    pub async fn create(&self, draft: PartialThemeTokens) -> Result<Theme, ThemingError> {
        let theme = merge::new_theme(&draft, Utc::now())?;
        let mut state = self.state.lock().await;

        let mut staged = state.clone();
        staged.push(theme.clone());
        self.commit(&mut state, staged, "create").await?;

        info!(theme_id = %theme.id, name = %theme.name, "Theme created");
        self.publish(ThemeStoreEvent::Created(theme.clone()));
        Ok(theme)
    }

    /// Deep-merges `patch` over the stored record. Last write wins.
    pub async fn update(&self, id: ThemeId, patch: PartialThemeTokens) -> Result<Theme, ThemingError> {
        self.update_checked(id, None, patch).await
    }

    /// Like [`Self::update`], but fails with `VersionConflict` unless the
    /// stored record is still at `expected_version`.
    pub async fn update_if_version(
        &self,
        id: ThemeId,
        expected_version: u64,
        patch: PartialThemeTokens,
    ) -> Result<Theme, ThemingError> {
        self.update_checked(id, Some(expected_version), patch).await
    }

    async fn update_checked(
        &self,
        id: ThemeId,
        expected_version: Option<u64>,
        patch: PartialThemeTokens,
    ) -> Result<Theme, ThemingError> {
        let mut state = self.state.lock().await;
        let index = Self::position(&state, id)?;

        let current = &state[index];
        if let Some(expected) = expected_version {
            if current.version != expected {
                warn!(theme_id = %id, expected, actual = current.version, "Rejected stale theme update");
                return Err(ThemingError::VersionConflict {
                    theme_id: id,
                    expected,
                    actual: current.version,
                });
            }
        }
        let updated = merge::apply_patch(current, &patch, Utc::now())?;

        let mut staged = state.clone();
        staged[index] = updated.clone();
        self.commit(&mut state, staged, "update").await?;

        info!(theme_id = %id, version = updated.version, "Theme updated");
        self.publish(ThemeStoreEvent::Updated(updated.clone()));
        Ok(updated)
    }

    pub async fn delete(&self, id: ThemeId) -> Result<(), ThemingError> {
        let mut state = self.state.lock().await;
        let index = Self::position(&state, id)?;
        if state[index].is_default {
            warn!(theme_id = %id, "Refusing to delete the default theme");
            return Err(ThemingError::DefaultThemeProtected { theme_id: id });
        }

        let mut staged = state.clone();
        staged.remove(index);
        self.commit(&mut state, staged, "delete").await?;

        info!(theme_id = %id, "Theme deleted");
        self.publish(ThemeStoreEvent::Deleted(id));
        Ok(())
    }

    /// Flags `id` as the default and clears the flag everywhere else in one write.
    pub async fn set_default(&self, id: ThemeId) -> Result<(), ThemingError> {
        let mut state = self.state.lock().await;
        let index = Self::position(&state, id)?;
        if state[index].is_default {
            debug!(theme_id = %id, "Theme is already the default");
            return Ok(());
        }
        let previous = state.iter().find(|t| t.is_default).map(|t| t.id);

        let mut staged = state.clone();
        for theme in staged.iter_mut() {
            theme.is_default = theme.id == id;
        }
        self.commit(&mut state, staged, "set_default").await?;

        info!(theme_id = %id, "Default theme changed");
        self.publish(ThemeStoreEvent::DefaultChanged { previous, current: id });
        Ok(())
    }

    fn position(state: &[Theme], id: ThemeId) -> Result<usize, ThemingError> {
        state
            .iter()
            .position(|t| t.id == id)
            .ok_or(ThemingError::NotFound { theme_id: id })
    }

    /// Writes `staged` durably, then makes it the in-memory state.
    async fn commit(
        &self,
        state: &mut MutexGuard<'_, Vec<Theme>>,
        staged: Vec<Theme>,
        operation: &str,
    ) -> Result<(), ThemingError> {
        self.write_durably(&staged, operation).await?;
        **state = staged;
        Ok(())
    }

    async fn write_durably(&self, themes: &[Theme], operation: &str) -> Result<(), ThemingError> {
        let Some(kv) = &self.kv else {
            warn!(storage_key = %self.storage_key, operation, "Refusing to write from a detached theme store");
            return Err(ThemingError::PersistenceFailure {
                operation: operation.to_string(),
                message: "theme store is detached from durable storage".to_string(),
            });
        };
        let encoded = serde_json::to_string(themes).map_err(|e| ThemingError::persistence(operation, &CoreError::from(e)))?;
        kv.set(&self.storage_key, &encoded).await.map_err(|e| {
            error!(storage_key = %self.storage_key, operation, "Failed to persist themes: {}", e);
            ThemingError::persistence(operation, &e)
        })
    }

    fn publish(&self, event: ThemeStoreEvent) {
        if self.event_sender.send(event).is_err() {
            debug!("No subscribers for theme store event");
        }
    }
}
