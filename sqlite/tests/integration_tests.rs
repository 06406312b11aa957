//! Integration tests for the dominion-catalog-sqlite crate.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, SystemTime};

use dominion_catalog_core::{
    BLACK_MARKET_NAME, CARDS_URI, CardSet, ID_BLACK_MARKET, ID_YOUNG_WITCH, PRINCE,
    YOUNG_WITCH_NAME,
};
use dominion_catalog_db::{
    CardResources, CatalogConfig, DirResources, EmbeddedResources, StaticResources,
    single_resource_name,
};
use dominion_catalog_sqlite::{Bootstrap, CardProvider, CatalogError, SchemaManager};

/// Writes the packaged dataset to `dir` in the on-disk resource layout.
fn export_embedded(dir: &std::path::Path, version: u32) {
    let embedded = EmbeddedResources::new();
    std::fs::write(dir.join("version"), format!("{version}\n")).unwrap();
    for set in CardSet::LOAD_ORDER {
        let text = embedded.card_set(set).unwrap().join("\n");
        std::fs::write(dir.join(format!("{}.txt", set.resource_name())), text).unwrap();
    }
    std::fs::write(
        dir.join(format!("{}.txt", single_resource_name(PRINCE))),
        embedded.single_card(PRINCE).unwrap(),
    )
    .unwrap();
}

/// Returns every `(id, name)` pair ordered by id.
fn id_names(provider: &CardProvider) -> Vec<(i64, String)> {
    provider
        .query(Some(&["id", "name"]), None, None, Some("id"))
        .unwrap()
        .map(|row| {
            (
                row.get_i64("id").unwrap(),
                row.get_str("name").unwrap().to_string(),
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Bootstrap
// ---------------------------------------------------------------------------

#[test]
fn test_cold_bootstrap_pins_fixed_ids() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("cards.db");
    let provider = CardProvider::new(&db_path, EmbeddedResources::new().with_version(Some(7)));

    let black_market = provider.card(ID_BLACK_MARKET).unwrap().unwrap();
    assert_eq!(black_market.name.as_deref(), Some(BLACK_MARKET_NAME));
    let young_witch = provider.card(ID_YOUNG_WITCH).unwrap().unwrap();
    assert_eq!(young_witch.name.as_deref(), Some(YOUNG_WITCH_NAME));

    let status = provider.status().unwrap();
    assert!(status.table_exists);
    assert_eq!(status.stored_version, 7);
    assert_eq!(status.card_count, 206);
    assert!(db_path.exists());
}

#[test]
fn test_ids_are_contiguous_from_one() {
    let provider = CardProvider::in_memory(EmbeddedResources::new());
    let ids: Vec<i64> = id_names(&provider).into_iter().map(|(id, _)| id).collect();
    assert_eq!(ids, (1..=206).collect::<Vec<_>>());
}

#[test]
fn test_reopen_is_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    let first = CardProvider::new(dir.path().join("a.db"), EmbeddedResources::new());
    let second = CardProvider::new(dir.path().join("b.db"), EmbeddedResources::new());
    assert_eq!(id_names(&first), id_names(&second));

    first.close().unwrap();
    let reopened = CardProvider::new(dir.path().join("a.db"), EmbeddedResources::new());
    assert_eq!(id_names(&reopened), id_names(&second));
}

#[test]
fn test_prince_is_loaded_last() {
    let provider = CardProvider::in_memory(EmbeddedResources::new());
    let last = id_names(&provider).pop().unwrap();
    assert_eq!(last, (206, "Prince".to_string()));
}

// ---------------------------------------------------------------------------
// Version lifecycle
// ---------------------------------------------------------------------------

#[test]
fn test_version_bump_rebuilds_store() {
    let data = tempfile::tempdir().unwrap();
    export_embedded(data.path(), 7);
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("cards.db");

    let mut manager = SchemaManager::open(&db_path).unwrap();
    assert!(matches!(
        manager.ensure_current(&DirResources::new(data.path())).unwrap(),
        Bootstrap::Created { version: 7, .. }
    ));
    drop(manager);

    // Backdate the store so the rebuild has to move its mtime forward.
    let built_at = SystemTime::now() - Duration::from_secs(120);
    std::fs::File::options()
        .write(true)
        .open(&db_path)
        .unwrap()
        .set_modified(built_at)
        .unwrap();

    // Version 8 renames the first Hinterlands card and adds one more.
    let hinterlands = data.path().join(format!("{}.txt", CardSet::Hinterlands.resource_name()));
    let text = std::fs::read_to_string(&hinterlands).unwrap();
    let (first, rest) = text.split_once('\n').unwrap();
    let (old_name, fields) = first.split_once(';').unwrap();
    let old_name = old_name.to_string();
    let updated = format!(
        "Renamed Card;{fields}\n{rest}\nTunnel Rat;+1 Card.;2;0;action;Hinterlands;0;0;1;0;0;0"
    );
    std::fs::write(&hinterlands, updated).unwrap();
    std::fs::write(data.path().join("version"), "8\n").unwrap();

    let v8 = DirResources::new(data.path());
    let mut manager = SchemaManager::open(&db_path).unwrap();
    match manager.ensure_current(&v8).unwrap() {
        Bootstrap::Rebuilt { from, to, report } => {
            assert_eq!((from, to), (7, 8));
            assert_eq!(report.rows_inserted(), 207);
        }
        other => panic!("expected a rebuild, got {other:?}"),
    }
    drop(manager);

    let rebuilt_at = std::fs::metadata(&db_path).unwrap().modified().unwrap();
    assert!(rebuilt_at > built_at);

    let provider = CardProvider::new(&db_path, v8);
    assert_eq!(provider.status().unwrap().stored_version, 8);
    assert_eq!(provider.count().unwrap(), 207);

    let named = |name: &str| {
        provider
            .query(Some(&["id"]), Some("name = ?"), Some(&[name]), None)
            .unwrap()
            .count()
    };
    assert_eq!(named(&old_name), 0, "row from version 7 survived");
    assert_eq!(named("Renamed Card"), 1);
    assert_eq!(named("Tunnel Rat"), 1);

    let card = provider.card(ID_BLACK_MARKET).unwrap().unwrap();
    assert_eq!(card.name.as_deref(), Some(BLACK_MARKET_NAME));
    let card = provider.card(ID_YOUNG_WITCH).unwrap().unwrap();
    assert_eq!(card.name.as_deref(), Some(YOUNG_WITCH_NAME));
}

#[test]
fn test_version_downgrade_rebuilds_store() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("cards.db");

    let newer = CardProvider::new(&db_path, EmbeddedResources::new().with_version(Some(8)));
    assert_eq!(newer.count().unwrap(), 206);
    newer.close().unwrap();

    let older = CardProvider::new(&db_path, EmbeddedResources::new().with_version(Some(7)));
    let status = older.status().unwrap();
    assert_eq!(status.stored_version, 7);
    assert_eq!(status.card_count, 206);
}

#[test]
fn test_same_version_keeps_store() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("cards.db");
    let resources = EmbeddedResources::new();

    SchemaManager::open(&db_path)
        .unwrap()
        .ensure_current(&resources)
        .unwrap();
    let outcome = SchemaManager::open(&db_path)
        .unwrap()
        .ensure_current(&resources)
        .unwrap();
    assert!(matches!(outcome, Bootstrap::Current { .. }));
}

#[test]
fn test_failed_load_is_retried_on_next_open() {
    let data = tempfile::tempdir().unwrap();
    export_embedded(data.path(), 3);
    let prince_file = data
        .path()
        .join(format!("{}.txt", single_resource_name(PRINCE)));
    let prince = std::fs::read_to_string(&prince_file).unwrap();
    std::fs::remove_file(&prince_file).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("cards.db");
    let provider = CardProvider::new(&db_path, DirResources::new(data.path()));
    assert!(matches!(
        provider.count(),
        Err(CatalogError::ResourceError(_))
    ));

    let status = SchemaManager::open(&db_path).unwrap().status().unwrap();
    assert_eq!(status.stored_version, 0);

    std::fs::write(&prince_file, prince).unwrap();
    assert_eq!(provider.count().unwrap(), 206);
    assert_eq!(provider.status().unwrap().stored_version, 3);
}

#[test]
fn test_failed_load_leaves_empty_table() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("cards.db");
    let resources = StaticResources::new(7)
        .with_set(CardSet::Promo, ["Black Market", "Envoy"])
        .with_set(CardSet::Base, ["Cellar", "a;b;c;d;e;f;g;h;i;j;k;l;m"])
        .with_single(PRINCE, "Prince");

    let mut manager = SchemaManager::open(&db_path).unwrap();
    assert!(matches!(
        manager.ensure_current(&resources),
        Err(CatalogError::RecordError { index: 1, .. })
    ));
    drop(manager);

    let status = SchemaManager::open(&db_path).unwrap().status().unwrap();
    assert!(status.table_exists);
    assert_eq!(status.card_count, 0);
    assert_eq!(status.stored_version, 0);
}

#[test]
fn test_directory_resources_drive_the_store() {
    let data = tempfile::tempdir().unwrap();
    export_embedded(data.path(), 11);
    let dir = tempfile::tempdir().unwrap();

    let config = CatalogConfig {
        database: dir.path().join("cards.db"),
        resources: Some(data.path().to_path_buf()),
        version: None,
    };
    let provider = CardProvider::from_config(&config);
    assert_eq!(provider.status().unwrap().stored_version, 11);
    assert_eq!(provider.path(), Some(config.database.as_path()));
}

// ---------------------------------------------------------------------------
// Query surface
// ---------------------------------------------------------------------------

#[test]
fn test_alchemy_filter() {
    let provider = CardProvider::in_memory(EmbeddedResources::new());
    let names: Vec<String> = provider
        .query(
            Some(&["name"]),
            Some("expansion = ?"),
            Some(&["Alchemy"]),
            Some("name"),
        )
        .unwrap()
        .map(|row| row.get_str("name").unwrap().to_string())
        .collect();

    assert_eq!(names.len(), 12);
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);
    assert!(names.contains(&"Familiar".to_string()));
}

#[test]
fn test_potion_cards_are_alchemy() {
    let provider = CardProvider::in_memory(EmbeddedResources::new());
    let cards = provider
        .query(None, Some("potion > ?"), Some(&["0"]), None)
        .unwrap()
        .into_cards();
    assert!(!cards.is_empty());
    assert!(cards.iter().all(|c| c.expansion.as_deref() == Some("Alchemy")));
    assert!(cards.iter().all(|c| c.costs_potion()));
}

#[test]
fn test_refused_insert_leaves_count_unchanged() {
    let provider = CardProvider::in_memory(EmbeddedResources::new());
    let before = provider.count().unwrap();
    assert_eq!(provider.insert(CARDS_URI, &[("name", "X")]), None);
    assert_eq!(provider.count().unwrap(), before);
    assert!(provider.card(207).unwrap().is_none());
}

#[test]
fn test_invalid_selection_is_reported() {
    let provider = CardProvider::in_memory(EmbeddedResources::new());
    assert!(matches!(
        provider.query(None, Some("expansion = = ?"), Some(&["Base"]), None),
        Err(CatalogError::DatabaseError(_))
    ));
    assert!(provider.count().is_ok());
}

#[test]
fn test_concurrent_queries_share_one_store() {
    let dir = tempfile::tempdir().unwrap();
    let provider = Arc::new(CardProvider::new(
        dir.path().join("cards.db"),
        EmbeddedResources::new(),
    ));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let provider = Arc::clone(&provider);
            thread::spawn(move || {
                let card = provider.card(ID_YOUNG_WITCH).unwrap().unwrap();
                (card.name, provider.count().unwrap())
            })
        })
        .collect();

    for handle in handles {
        let (name, count) = handle.join().unwrap();
        assert_eq!(name.as_deref(), Some(YOUNG_WITCH_NAME));
        assert_eq!(count, 206);
    }
    assert_eq!(provider.status().unwrap().stored_version, 7);
}
