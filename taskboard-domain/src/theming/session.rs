//! Reversible live-preview editing.
//!
//! An [`EditingSession`] snapshots the style surface once on entry, applies
//! every edit immediately, and either commits the draft through the store
//! (`save`) or puts the snapshot back (`cancel`, or dropping the session).

use tracing::{debug, info};

use super::controller::ThemeController;
use super::engine::StyleSnapshot;
use super::errors::ThemingError;
use super::merge;
use super::tokens::{ColorRole, TokenPath};
use super::types::{Theme, ThemeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    Existing { id: ThemeId, version: u64 },
    New,
}

/// An in-progress edit of one theme.
///
/// The draft lives only in memory until [`EditingSession::save`] succeeds.
/// After a successful save the session keeps editing the saved record, with
/// the committed appearance as its new rollback point.
#[derive(Debug)]
pub struct EditingSession<'a> {
    controller: &'a ThemeController,
    snapshot: Option<StyleSnapshot>,
    draft: Theme,
    origin: Origin,
}

impl<'a> EditingSession<'a> {
    pub(crate) fn existing(controller: &'a ThemeController, theme: Theme) -> Self {
        let origin = Origin::Existing {
            id: theme.id,
            version: theme.version,
        };
        Self::enter(controller, theme, origin)
    }

    pub(crate) fn new_draft(controller: &'a ThemeController, draft: Theme) -> Self {
        Self::enter(controller, draft, Origin::New)
    }

    fn enter(controller: &'a ThemeController, draft: Theme, origin: Origin) -> Self {
        let snapshot = {
            let mut engine = controller.engine();
            let snapshot = engine.snapshot();
            engine.apply(&draft);
            snapshot
        };
        debug!(theme_id = %draft.id, "Editing session started");
        Self {
            controller,
            snapshot: Some(snapshot),
            draft,
            origin,
        }
    }

    pub fn draft(&self) -> &Theme {
        &self.draft
    }

    /// `true` until a draft started with `begin_new` has been saved.
    pub fn is_new(&self) -> bool {
        self.origin == Origin::New
    }

    /// Changes one token in the draft and applies it immediately.
    pub fn set_token(&mut self, path: TokenPath, value: &str) {
        merge::set_token(&mut self.draft, path, value);
        self.controller.engine().apply_token(path, value);
    }

    pub fn set_color(&mut self, role: ColorRole, value: &str) {
        self.set_token(TokenPath::Color(role), value);
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.draft.name = name.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.draft.description = description.into();
    }

    /// Persists the draft and makes the saved record the active theme.
    ///
    /// Existing records are updated only if nobody else saved them since
    /// the session started. The saved record then becomes the store's
    /// default and the controller adopts it. On failure the preview stays
    /// live so the caller can retry or cancel; if only the default switch
    /// failed, a retry saves the persisted record again.
    pub async fn save(&mut self) -> Result<Theme, ThemingError> {
        let patch = merge::theme_to_patch(&self.draft);
        let store = self.controller.store();
        let persisted = match self.origin {
            Origin::Existing { id, version } => store.update_if_version(id, version, patch).await?,
            Origin::New => store.create(patch).await?,
        };
        self.origin = Origin::Existing {
            id: persisted.id,
            version: persisted.version,
        };
        self.draft = persisted.clone();

        store.set_default(persisted.id).await?;
        let saved = store.get(persisted.id).await?;

        self.controller.adopt(saved.clone());
        self.snapshot = Some(self.controller.engine().snapshot());
        self.draft = saved.clone();
        info!(theme_id = %saved.id, "Editing session saved");
        Ok(saved)
    }

    /// Restores the style surface captured when the session started.
    pub fn cancel(mut self) {
        self.rollback();
    }

    fn rollback(&mut self) {
        if let Some(snapshot) = self.snapshot.take() {
            self.controller.engine().restore(&snapshot);
            debug!(theme_id = %self.draft.id, "Editing session rolled back");
        }
    }
}

impl Drop for EditingSession<'_> {
    fn drop(&mut self) {
        self.rollback();
    }
}
