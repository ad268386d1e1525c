use std::sync::Arc;

use pretty_assertions::assert_eq;
use tempfile::tempdir;

use crate::persistence::{FileKeyValueStore, InMemoryKeyValueStore};
use crate::ports::KeyValueStore;
use crate::theming::errors::ThemingError;
use crate::theming::events::ThemeStoreEvent;
use crate::theming::store::ThemeStore;
use crate::theming::themes::{default_dark, default_light, structural_default_theme};
use crate::theming::tokens::{ColorRole, TokenKey};
use crate::theming::types::{PartialThemeTokens, Theme, ThemeId};

const KEY: &str = "themes";

async fn open_fresh() -> (ThemeStore, InMemoryKeyValueStore) {
    let kv = InMemoryKeyValueStore::new();
    let store = ThemeStore::open(Arc::new(kv.clone()), KEY).await.unwrap();
    (store, kv)
}

fn default_count(themes: &[Theme]) -> usize {
    themes.iter().filter(|t| t.is_default).count()
}

fn persisted(kv: &InMemoryKeyValueStore) -> Vec<Theme> {
    serde_json::from_str(&kv.entry(KEY).unwrap()).unwrap()
}

fn ocean() -> PartialThemeTokens {
    PartialThemeTokens::named("Ocean").with_color(ColorRole::Primary, "#0891b2")
}

#[tokio::test]
async fn open_seeds_empty_storage() {
    let (store, kv) = open_fresh().await;

    let themes = store.list().await;
    let names: Vec<&str> = themes.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec![default_light::NAME, default_dark::NAME]);
    assert_eq!(default_count(&themes), 1);
    assert_eq!(persisted(&kv), themes);
}

#[tokio::test]
async fn open_reseeds_corrupt_storage() {
    for raw in ["{not json", "[]", "{\"themes\": []}"] {
        let kv = InMemoryKeyValueStore::new().with_entry(KEY, raw);
        let store = ThemeStore::open(Arc::new(kv.clone()), KEY).await.unwrap();

        let themes = store.list().await;
        assert!(!themes.is_empty(), "no themes after reseeding {:?}", raw);
        assert_eq!(default_count(&themes), 1);
        assert_eq!(persisted(&kv), themes);
    }
}

#[tokio::test]
async fn open_repairs_default_flags_and_writes_back() {
    let (_, kv) = open_fresh().await;
    let mut stored = persisted(&kv);
    stored.iter_mut().for_each(|t| t.is_default = true);
    let kv = InMemoryKeyValueStore::new().with_entry(KEY, &serde_json::to_string(&stored).unwrap());

    let store = ThemeStore::open(Arc::new(kv.clone()), KEY).await.unwrap();

    let themes = store.list().await;
    assert_eq!(default_count(&themes), 1);
    assert!(themes[0].is_default);
    assert_eq!(default_count(&persisted(&kv)), 1);
}

#[tokio::test]
async fn open_keeps_valid_collection_as_is() {
    let (first, kv) = open_fresh().await;
    let created = first.create(ocean()).await.unwrap();

    let reopened = ThemeStore::open(Arc::new(kv.clone()), KEY).await.unwrap();
    assert_eq!(reopened.list().await, first.list().await);
    assert_eq!(reopened.get(created.id).await.unwrap(), created);
}

#[tokio::test]
async fn open_reports_read_failures() {
    let kv = InMemoryKeyValueStore::new();
    kv.fail_reads(true);
    let result = ThemeStore::open(Arc::new(kv), KEY).await;
    assert!(matches!(result, Err(ThemingError::PersistenceFailure { ref operation, .. }) if operation == "load"));
}

#[tokio::test]
async fn records_without_version_load_as_version_one() {
    let (_, kv) = open_fresh().await;
    let mut raw: serde_json::Value = serde_json::from_str(&kv.entry(KEY).unwrap()).unwrap();
    for record in raw.as_array_mut().unwrap() {
        record.as_object_mut().unwrap().remove("version");
    }
    let kv = InMemoryKeyValueStore::new().with_entry(KEY, &raw.to_string());

    let store = ThemeStore::open(Arc::new(kv), KEY).await.unwrap();
    assert!(store.list().await.iter().all(|t| t.version == 1));
}

#[tokio::test]
async fn create_completes_the_draft_and_appends() {
    let (store, kv) = open_fresh().await;

    let created = store.create(ocean()).await.unwrap();

    assert_eq!(created.colors.get(ColorRole::Primary), "#0891b2");
    assert_eq!(created.colors.iter().count(), ColorRole::ALL.len());
    assert!(!created.is_default);
    assert!(created.is_active);
    let themes = store.list().await;
    assert_eq!(themes.last(), Some(&created));
    assert_eq!(persisted(&kv), themes);
}

#[tokio::test]
async fn create_then_set_default_moves_the_flag() {
    let (store, _) = open_fresh().await;
    let previous = store.default_theme().await.unwrap();
    let created = store.create(ocean()).await.unwrap();

    store.set_default(created.id).await.unwrap();

    let themes = store.list().await;
    assert_eq!(default_count(&themes), 1);
    assert!(store.get(created.id).await.unwrap().is_default);
    assert!(!store.get(previous.id).await.unwrap().is_default);
    assert_eq!(store.default_theme().await.unwrap().id, created.id);
}

#[tokio::test]
async fn update_merges_a_single_color() {
    let (store, _) = open_fresh().await;
    let created = store.create(ocean()).await.unwrap();

    let updated = store
        .update(
            created.id,
            PartialThemeTokens::default().with_color(ColorRole::CardBackground, "#f0f9ff"),
        )
        .await
        .unwrap();

    assert_eq!(updated.colors.get(ColorRole::CardBackground), "#f0f9ff");
    for role in ColorRole::ALL.iter().filter(|r| **r != ColorRole::CardBackground) {
        assert_eq!(updated.colors.get(*role), created.colors.get(*role));
    }
    assert!(updated.updated_at >= created.updated_at);
    assert_eq!(updated.version, created.version + 1);
}

#[tokio::test]
async fn update_preserves_insertion_order() {
    let (store, _) = open_fresh().await;
    let before: Vec<ThemeId> = store.list().await.iter().map(|t| t.id).collect();

    store
        .update(before[0], PartialThemeTokens::default().with_description("renamed"))
        .await
        .unwrap();

    let after: Vec<ThemeId> = store.list().await.iter().map(|t| t.id).collect();
    assert_eq!(before, after);
}

#[tokio::test]
async fn update_unknown_theme_is_not_found() {
    let (store, _) = open_fresh().await;
    let missing = ThemeId::new();
    let result = store.update(missing, PartialThemeTokens::default()).await;
    assert_eq!(result.unwrap_err(), ThemingError::NotFound { theme_id: missing });
}

#[tokio::test]
async fn update_if_version_rejects_stale_writers() {
    let (store, _) = open_fresh().await;
    let created = store.create(ocean()).await.unwrap();

    store
        .update_if_version(created.id, 1, PartialThemeTokens::default().with_description("first"))
        .await
        .unwrap();
    let stale = store
        .update_if_version(created.id, 1, PartialThemeTokens::default().with_description("second"))
        .await;

    assert_eq!(
        stale.unwrap_err(),
        ThemingError::VersionConflict {
            theme_id: created.id,
            expected: 1,
            actual: 2
        }
    );
    assert_eq!(store.get(created.id).await.unwrap().description, "first");
}

#[tokio::test]
async fn delete_removes_non_default_theme() {
    let (store, kv) = open_fresh().await;
    let created = store.create(ocean()).await.unwrap();

    store.delete(created.id).await.unwrap();

    assert!(store.get(created.id).await.is_err());
    assert!(persisted(&kv).iter().all(|t| t.id != created.id));
}

#[tokio::test]
async fn delete_default_is_rejected_and_list_unchanged() {
    let (store, _) = open_fresh().await;
    let before = store.list().await;
    let default = store.default_theme().await.unwrap();

    let result = store.delete(default.id).await;

    assert_eq!(result.unwrap_err(), ThemingError::DefaultThemeProtected { theme_id: default.id });
    assert_eq!(store.list().await, before);
}

#[tokio::test]
async fn delete_unknown_theme_is_not_found() {
    let (store, _) = open_fresh().await;
    assert!(matches!(
        store.delete(ThemeId::new()).await,
        Err(ThemingError::NotFound { .. })
    ));
}

#[tokio::test]
async fn set_default_unknown_theme_is_not_found() {
    let (store, _) = open_fresh().await;
    let before = store.list().await;
    assert!(matches!(
        store.set_default(ThemeId::new()).await,
        Err(ThemingError::NotFound { .. })
    ));
    assert_eq!(store.list().await, before);
}

#[tokio::test]
async fn single_default_survives_mixed_operations() {
    let (store, _) = open_fresh().await;
    let mut created = Vec::new();
    for i in 0..4 {
        created.push(store.create(PartialThemeTokens::named(format!("Theme {}", i))).await.unwrap());
        assert_eq!(default_count(&store.list().await), 1);
    }
    store.set_default(created[2].id).await.unwrap();
    assert_eq!(default_count(&store.list().await), 1);
    store.delete(created[0].id).await.unwrap();
    store.delete(created[3].id).await.unwrap();
    assert_eq!(default_count(&store.list().await), 1);
    store.set_default(created[1].id).await.unwrap();
    store.delete(created[2].id).await.unwrap();

    let themes = store.list().await;
    assert_eq!(default_count(&themes), 1);
    assert!(themes.iter().any(|t| t.id == created[1].id && t.is_default));
}

#[tokio::test]
async fn failed_writes_do_not_change_memory() {
    let (store, kv) = open_fresh().await;
    let created = store.create(ocean()).await.unwrap();
    let before = store.list().await;
    let stored_before = kv.entry(KEY);
    kv.fail_writes(true);

    let create = store.create(PartialThemeTokens::named("Lost")).await;
    let update = store
        .update(created.id, PartialThemeTokens::default().with_color(ColorRole::Primary, "#000"))
        .await;
    let delete = store.delete(created.id).await;
    let set_default = store.set_default(created.id).await;

    for result in [create.map(|_| ()), update.map(|_| ()), delete, set_default] {
        assert!(matches!(result, Err(ThemingError::PersistenceFailure { .. })), "{:?}", result);
    }
    assert_eq!(store.list().await, before);
    assert_eq!(kv.entry(KEY), stored_before);
}

#[tokio::test]
async fn malformed_drafts_never_reach_storage() {
    let (store, kv) = open_fresh().await;
    let stored_before = kv.entry(KEY);

    let result = store
        .create(PartialThemeTokens::named("Blank").with_color(ColorRole::Text, ""))
        .await;

    assert!(matches!(result, Err(ThemingError::MalformedTheme { .. })));
    assert_eq!(kv.entry(KEY), stored_before);
}

#[tokio::test]
async fn list_visible_filters_inactive_themes() {
    let (store, _) = open_fresh().await;
    let created = store.create(ocean()).await.unwrap();
    store
        .update(created.id, PartialThemeTokens::default().with_active(false))
        .await
        .unwrap();

    let visible = store.list_visible().await;
    assert_eq!(visible.len(), store.list().await.len() - 1);
    assert!(visible.iter().all(|t| t.id != created.id));
}

#[tokio::test]
async fn committed_mutations_are_broadcast() {
    let (store, _) = open_fresh().await;
    let mut rx = store.subscribe();
    let previous = store.default_theme().await.unwrap().id;

    let created = store.create(ocean()).await.unwrap();
    store.set_default(created.id).await.unwrap();

    assert_eq!(rx.recv().await.unwrap(), ThemeStoreEvent::Created(created.clone()));
    assert_eq!(
        rx.recv().await.unwrap(),
        ThemeStoreEvent::DefaultChanged {
            previous: Some(previous),
            current: created.id
        }
    );
}

#[tokio::test]
async fn set_default_on_current_default_is_a_no_op() {
    let (store, kv) = open_fresh().await;
    let mut rx = store.subscribe();
    let default = store.default_theme().await.unwrap();
    kv.fail_writes(true);

    store.set_default(default.id).await.unwrap();
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn detached_store_is_seeded() {
    let store = ThemeStore::detached(KEY);

    assert!(store.is_detached());
    assert_eq!(store.storage_key(), KEY);
    assert_eq!(default_count(&store.list().await), 1);
}

#[tokio::test]
async fn detached_store_rejects_every_mutation() {
    let store = ThemeStore::detached_with_capacity(KEY, 2);
    let mut rx = store.subscribe();
    let before = store.list().await;
    let dark = before.iter().find(|t| t.name == default_dark::NAME).unwrap().id;
    let light = before.iter().find(|t| t.name == default_light::NAME).unwrap().id;

    assert!(matches!(store.create(ocean()).await, Err(ThemingError::PersistenceFailure { .. })));
    assert!(matches!(
        store.update(dark, PartialThemeTokens::named("Dusk")).await,
        Err(ThemingError::PersistenceFailure { .. })
    ));
    assert!(matches!(store.set_default(dark).await, Err(ThemingError::PersistenceFailure { .. })));
    assert!(matches!(store.delete(dark).await, Err(ThemingError::PersistenceFailure { .. })));
    assert!(matches!(store.delete(light).await, Err(ThemingError::DefaultThemeProtected { .. })));

    assert_eq!(store.list().await, before);
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn file_backed_store_survives_reopen() {
    let dir = tempdir().unwrap();
    let kv: Arc<dyn KeyValueStore> = Arc::new(FileKeyValueStore::new(dir.path()));
    let store = ThemeStore::open(kv.clone(), KEY).await.unwrap();
    let created = store.create(ocean()).await.unwrap();
    store.set_default(created.id).await.unwrap();

    let reopened = ThemeStore::open(kv, KEY).await.unwrap();

    let default = reopened.default_theme().await.unwrap();
    assert_eq!(default.id, created.id);
    assert!(default.same_tokens(&created));
    assert!(!structural_default_theme().same_tokens(&default));
}
