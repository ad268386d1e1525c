//! The process-wide owner of "the" current theme.
//!
//! A [`ThemeController`] is constructed once at startup and handed to
//! consumers by reference. It is the only writer of the applied theme: it
//! applies the store's default on construction, switches defaults, makes
//! saved edits the new default and hands out [`EditingSession`]s for live preview.

use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard, RwLock};
use taskboard_core::ThemingSettings;
use tokio::sync::broadcast;
use tracing::{info, warn};

use super::engine::LiveStyleEngine;
use super::errors::ThemingError;
use super::events::ThemeChangedEvent;
use super::session::EditingSession;
use super::store::ThemeStore;
use super::style::StyleTarget;
use super::themes::structural_default_theme;
use super::types::{Theme, ThemeId};
use crate::ports::KeyValueStore;

pub struct ThemeController {
    store: ThemeStore,
    engine: Mutex<LiveStyleEngine>,
    current: RwLock<Theme>,
}

impl std::fmt::Debug for ThemeController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeController")
            .field("store", &self.store)
            .field("current", &self.current.read().id)
            .finish_non_exhaustive()
    }
}

impl ThemeController {
    /// Applies the store's default theme (or the first record, or the
    /// built-in structural default) before returning.
    pub async fn new(store: ThemeStore, target: Box<dyn StyleTarget>, event_capacity: usize) -> Self {
        let initial = match store.default_theme().await {
            Some(theme) => theme,
            None => {
                warn!("Theme store has no records, applying the built-in default");
                structural_default_theme()
            }
        };
        let mut engine = LiveStyleEngine::new(target, event_capacity);
        engine.apply(&initial);
        info!(theme_id = %initial.id, name = %initial.name, "Initial theme applied");
        Self {
            store,
            engine: Mutex::new(engine),
            current: RwLock::new(initial),
        }
    }

    /// Opens the store described by `settings` and builds a controller over it.
    ///
    /// Never fails: if the store cannot be opened, a detached seeded store is
    /// used so the surface is always styled. The detached store refuses
    /// writes, leaving the unread durable collection intact.
    pub async fn bootstrap(
        kv: Arc<dyn KeyValueStore>,
        settings: &ThemingSettings,
        target: Box<dyn StyleTarget>,
    ) -> Self {
        let capacity = settings.event_channel_capacity;
        let store = match ThemeStore::open_with_capacity(kv, &settings.storage_key, capacity).await {
            Ok(store) => store,
            Err(e) => {
                warn!("Falling back to built-in themes: {}", e);
                ThemeStore::detached_with_capacity(&settings.storage_key, capacity)
            }
        };
        Self::new(store, target, capacity).await
    }

    /// The currently applied theme.
    pub fn current(&self) -> Theme {
        self.current.read().clone()
    }

    pub fn store(&self) -> &ThemeStore {
        &self.store
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ThemeChangedEvent> {
        self.engine.lock().subscribe()
    }

    /// Read access to the style surface.
    pub fn with_style_target<R>(&self, f: impl FnOnce(&dyn StyleTarget) -> R) -> R {
        let engine = self.engine.lock();
        f(engine.target())
    }

    /// Makes `id` the default theme, then applies and broadcasts it.
    ///
    /// On failure the applied theme is left as it was.
    pub async fn set_active(&self, id: ThemeId) -> Result<Theme, ThemingError> {
        self.store.set_default(id).await?;
        let theme = self.store.get(id).await?;
        self.adopt(theme.clone());
        Ok(theme)
    }

    /// Re-reads the store's default and re-applies it.
    pub async fn resync(&self) -> Theme {
        let theme = self
            .store
            .default_theme()
            .await
            .unwrap_or_else(structural_default_theme);
        self.adopt(theme.clone());
        theme
    }

    /// Starts a preview session over an existing record.
    pub async fn begin_edit(&self, id: ThemeId) -> Result<EditingSession<'_>, ThemingError> {
        let theme = self.store.get(id).await?;
        Ok(EditingSession::existing(self, theme))
    }

    /// Starts a preview session over a fresh draft built from the structural defaults.
    pub fn begin_new(&self, name: impl Into<String>) -> EditingSession<'_> {
        let mut draft = structural_default_theme();
        draft.id = ThemeId::new();
        draft.name = name.into();
        draft.description = String::new();
        draft.is_default = false;
        EditingSession::new_draft(self, draft)
    }

    pub(crate) fn engine(&self) -> MutexGuard<'_, LiveStyleEngine> {
        self.engine.lock()
    }

    /// Applies `theme`, records it as current and broadcasts it.
    pub(crate) fn adopt(&self, theme: Theme) {
        let mut engine = self.engine.lock();
        engine.apply(&theme);
        *self.current.write() = theme.clone();
        engine.notify_changed(&theme);
        info!(theme_id = %theme.id, name = %theme.name, "Theme adopted");
    }
}
