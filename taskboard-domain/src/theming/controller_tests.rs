use std::sync::Arc;

use pretty_assertions::assert_eq;
use taskboard_core::ThemingSettings;

use crate::persistence::InMemoryKeyValueStore;
use crate::theming::controller::ThemeController;
use crate::theming::errors::ThemingError;
use crate::theming::store::ThemeStore;
use crate::theming::style::{InMemoryStyleTarget, PageProperty, StyleTarget};
use crate::theming::themes::{default_dark, default_light};
use crate::theming::tokens::{ColorRole, SpacingScale, TokenPath};
use crate::theming::types::{PartialThemeTokens, ThemeId};

const KEY: &str = "themes";

async fn controller() -> (ThemeController, InMemoryKeyValueStore) {
    let kv = InMemoryKeyValueStore::new();
    let store = ThemeStore::open(Arc::new(kv.clone()), KEY).await.unwrap();
    let controller = ThemeController::new(store, Box::new(InMemoryStyleTarget::new()), 8).await;
    (controller, kv)
}

fn variable(controller: &ThemeController, name: &str) -> Option<String> {
    controller.with_style_target(|t| t.variable(name))
}

fn css(controller: &ThemeController) -> String {
    controller.with_style_target(|t| {
        let mut out = String::new();
        for name in crate::theming::style::contract_variable_names() {
            out.push_str(&format!("{}={:?};", name, t.variable(&name)));
        }
        for property in PageProperty::ALL {
            out.push_str(&format!("{}={:?};", property, t.page_property(property)));
        }
        out
    })
}

async fn dark_id(controller: &ThemeController) -> ThemeId {
    controller
        .store()
        .list()
        .await
        .into_iter()
        .find(|t| t.name == default_dark::NAME)
        .unwrap()
        .id
}

#[tokio::test]
async fn construction_applies_the_default_theme() {
    let (controller, _) = controller().await;

    let current = controller.current();
    assert_eq!(current.name, default_light::NAME);
    assert!(current.is_default);
    assert_eq!(
        variable(&controller, "--color-primary").as_deref(),
        Some(default_light::color(ColorRole::Primary))
    );
    assert_eq!(
        controller.with_style_target(|t| t.page_property(PageProperty::Background)).as_deref(),
        Some(default_light::color(ColorRole::Background))
    );
}

#[tokio::test]
async fn construction_over_detached_store_applies_seeded_default() {
    let store = ThemeStore::detached(KEY);
    let first = store.list().await[0].clone();

    let controller = ThemeController::new(store, Box::new(InMemoryStyleTarget::new()), 8).await;
    assert_eq!(controller.current().id, first.id);
}

#[tokio::test]
async fn bootstrap_falls_back_when_storage_is_unreadable() {
    let kv = InMemoryKeyValueStore::new();
    kv.fail_reads(true);

    let controller =
        ThemeController::bootstrap(Arc::new(kv), &ThemingSettings::default(), Box::new(InMemoryStyleTarget::new()))
            .await;

    assert_eq!(controller.current().name, default_light::NAME);
    assert_eq!(
        variable(&controller, "--color-text").as_deref(),
        Some(default_light::color(ColorRole::Text))
    );
    assert!(controller.store().is_detached());
    assert_eq!(controller.store().list().await.len(), 2);
}

#[tokio::test]
async fn fallback_store_never_overwrites_unread_themes() {
    let kv = InMemoryKeyValueStore::new();
    let store = ThemeStore::open(Arc::new(kv.clone()), KEY).await.unwrap();
    let mine = store.create(PartialThemeTokens::named("Mine")).await.unwrap();
    let stored = kv.entry(KEY);

    kv.fail_reads(true);
    let settings = ThemingSettings {
        event_channel_capacity: 2,
        ..ThemingSettings::default()
    };
    let controller =
        ThemeController::bootstrap(Arc::new(kv.clone()), &settings, Box::new(InMemoryStyleTarget::new())).await;
    kv.fail_reads(false);

    let created = controller.store().create(PartialThemeTokens::named("Other")).await;
    assert!(matches!(created, Err(ThemingError::PersistenceFailure { .. })));
    let dark = dark_id(&controller).await;
    assert!(matches!(controller.set_active(dark).await, Err(ThemingError::PersistenceFailure { .. })));
    let mut session = controller.begin_new("Draft");
    assert!(matches!(session.save().await, Err(ThemingError::PersistenceFailure { .. })));
    drop(session);
    assert_eq!(kv.entry(KEY), stored);

    let reopened = ThemeStore::open(Arc::new(kv), KEY).await.unwrap();
    assert_eq!(reopened.get(mine.id).await.unwrap(), mine);
}

#[tokio::test]
async fn bootstrap_uses_configured_storage_key() {
    let kv = InMemoryKeyValueStore::new();
    let settings = ThemingSettings {
        storage_key: "board-themes".to_string(),
        ..ThemingSettings::default()
    };

    let controller =
        ThemeController::bootstrap(Arc::new(kv.clone()), &settings, Box::new(InMemoryStyleTarget::new())).await;

    assert_eq!(controller.store().storage_key(), "board-themes");
    assert!(kv.entry("board-themes").is_some());
    assert!(kv.entry(KEY).is_none());
}

#[tokio::test]
async fn set_active_switches_default_applies_and_notifies() {
    let (controller, _) = controller().await;
    let mut rx = controller.subscribe();
    let dark = dark_id(&controller).await;

    let applied = controller.set_active(dark).await.unwrap();

    assert_eq!(applied.id, dark);
    assert!(applied.is_default);
    assert_eq!(controller.current(), applied);
    assert_eq!(
        variable(&controller, "--color-background").as_deref(),
        Some(default_dark::color(ColorRole::Background))
    );
    let event = rx.recv().await.unwrap();
    assert_eq!(event.theme.id, dark);
}

#[tokio::test]
async fn failed_set_active_leaves_everything_untouched() {
    let (controller, kv) = controller().await;
    let before_css = css(&controller);
    let before = controller.current();
    let dark = dark_id(&controller).await;

    kv.fail_writes(true);
    let result = controller.set_active(dark).await;
    assert!(matches!(result, Err(ThemingError::PersistenceFailure { .. })));

    let missing = controller.set_active(ThemeId::new()).await;
    assert!(matches!(missing, Err(ThemingError::NotFound { .. })));

    assert_eq!(controller.current(), before);
    assert_eq!(css(&controller), before_css);
    assert_eq!(controller.store().default_theme().await.unwrap().id, before.id);
}

#[tokio::test]
async fn resync_reapplies_the_store_default() {
    let (controller, _) = controller().await;
    let dark = dark_id(&controller).await;
    controller.store().set_default(dark).await.unwrap();
    assert_eq!(controller.current().name, default_light::NAME);

    let theme = controller.resync().await;

    assert_eq!(theme.id, dark);
    assert_eq!(controller.current().id, dark);
    assert_eq!(
        variable(&controller, "--color-primary").as_deref(),
        Some(default_dark::color(ColorRole::Primary))
    );
}

#[tokio::test]
async fn edits_are_applied_immediately_and_cancel_restores() {
    let (controller, kv) = controller().await;
    let before_css = css(&controller);
    let stored_before = kv.entry(KEY);
    let id = controller.current().id;

    let mut session = controller.begin_edit(id).await.unwrap();
    session.set_color(ColorRole::Primary, "#ff0000");
    assert_eq!(variable(&controller, "--color-primary").as_deref(), Some("#ff0000"));
    session.set_color(ColorRole::Primary, "#00ff00");
    assert_eq!(variable(&controller, "--color-primary").as_deref(), Some("#00ff00"));
    session.set_token(TokenPath::Color(ColorRole::Background), "#101010");
    assert_eq!(
        controller.with_style_target(|t| t.page_property(PageProperty::Background)).as_deref(),
        Some("#101010")
    );
    session.cancel();

    assert_eq!(css(&controller), before_css);
    assert_eq!(kv.entry(KEY), stored_before);
}

#[tokio::test]
async fn dropping_a_session_restores_the_snapshot() {
    let (controller, _) = controller().await;
    let before_css = css(&controller);

    {
        let mut session = controller.begin_new("Scratch");
        session.set_token(TokenPath::Spacing(SpacingScale::Md), "40px");
        assert_eq!(variable(&controller, "--spacing-md").as_deref(), Some("40px"));
    }

    assert_eq!(css(&controller), before_css);
}

#[tokio::test]
async fn saving_an_existing_theme_updates_and_adopts_it() {
    let (controller, _) = controller().await;
    let dark = dark_id(&controller).await;
    let mut rx = controller.subscribe();

    let mut session = controller.begin_edit(dark).await.unwrap();
    assert_eq!(
        variable(&controller, "--color-primary").as_deref(),
        Some(default_dark::color(ColorRole::Primary))
    );
    session.set_color(ColorRole::CardBackground, "#222244");
    session.set_description("Tweaked");
    let saved = session.save().await.unwrap();
    drop(session);

    assert_eq!(saved.version, 2);
    assert!(saved.is_default);
    assert_eq!(saved.colors.get(ColorRole::CardBackground), "#222244");
    assert_eq!(controller.store().get(dark).await.unwrap(), saved);
    assert_eq!(controller.current(), saved);
    assert_eq!(variable(&controller, "--color-cardBackground").as_deref(), Some("#222244"));
    assert_eq!(rx.recv().await.unwrap().theme, saved);
    assert_eq!(controller.store().default_theme().await.unwrap(), saved);
}

#[tokio::test]
async fn saved_theme_stays_active_after_resync_and_restart() {
    let (controller, kv) = controller().await;
    let dark = dark_id(&controller).await;

    let mut session = controller.begin_edit(dark).await.unwrap();
    session.set_color(ColorRole::Primary, "#7c3aed");
    let saved = session.save().await.unwrap();
    drop(session);

    assert_eq!(controller.resync().await, saved);
    assert_eq!(variable(&controller, "--color-primary").as_deref(), Some("#7c3aed"));

    let store = ThemeStore::open(Arc::new(kv), KEY).await.unwrap();
    let restarted = ThemeController::new(store, Box::new(InMemoryStyleTarget::new()), 8).await;
    assert_eq!(restarted.current(), saved);
    assert_eq!(variable(&restarted, "--color-primary").as_deref(), Some("#7c3aed"));
}

#[tokio::test]
async fn saving_a_new_draft_creates_a_record() {
    let (controller, _) = controller().await;
    let count = controller.store().list().await.len();

    let mut session = controller.begin_new("Ocean");
    assert!(session.is_new());
    session.set_color(ColorRole::Primary, "#0891b2");
    let saved = session.save().await.unwrap();
    assert!(!session.is_new());
    drop(session);

    let themes = controller.store().list().await;
    assert_eq!(themes.len(), count + 1);
    assert_eq!(themes.last(), Some(&saved));
    assert_eq!(saved.name, "Ocean");
    assert!(saved.is_default);
    assert_eq!(themes.iter().filter(|t| t.is_default).count(), 1);
    assert_eq!(variable(&controller, "--color-primary").as_deref(), Some("#0891b2"));
}

#[tokio::test]
async fn failed_save_keeps_the_session_open() {
    let (controller, kv) = controller().await;
    let before_css = css(&controller);
    let id = controller.current().id;

    let mut session = controller.begin_edit(id).await.unwrap();
    session.set_color(ColorRole::Accent, "#abcdef");
    kv.fail_writes(true);

    let result = session.save().await;
    assert!(matches!(result, Err(ThemingError::PersistenceFailure { .. })));
    assert_eq!(session.draft().colors.get(ColorRole::Accent), "#abcdef");
    assert_eq!(variable(&controller, "--color-accent").as_deref(), Some("#abcdef"));

    kv.fail_writes(false);
    let saved = session.save().await.unwrap();
    assert_eq!(saved.colors.get(ColorRole::Accent), "#abcdef");
    drop(session);
    assert_ne!(css(&controller), before_css);
}

#[tokio::test]
async fn concurrent_sessions_cannot_overwrite_each_other() {
    let (controller, _) = controller().await;
    let dark = dark_id(&controller).await;

    let mut first = controller.begin_edit(dark).await.unwrap();
    let mut second = controller.begin_edit(dark).await.unwrap();
    first.set_color(ColorRole::Primary, "#111111");
    second.set_color(ColorRole::Primary, "#222222");

    first.save().await.unwrap();
    let result = second.save().await;

    assert_eq!(
        result.unwrap_err(),
        ThemingError::VersionConflict {
            theme_id: dark,
            expected: 1,
            actual: 2
        }
    );
    drop(second);
    drop(first);
    assert_eq!(controller.store().get(dark).await.unwrap().colors.get(ColorRole::Primary), "#111111");
}

#[tokio::test]
async fn blank_draft_values_are_rejected_on_save() {
    let (controller, _) = controller().await;
    let mut session = controller.begin_new("Blank");
    session.set_color(ColorRole::Text, "  ");

    let result = session.save().await;

    assert!(matches!(result, Err(ThemingError::MalformedTheme { .. })));
    assert!(session.is_new());
}
