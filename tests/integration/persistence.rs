//! Store persistence tests against real temporary directories.

use std::fs;

use crossterm::event::KeyCode;

use tally::{Error, Store};

use crate::fixtures::{ModelHarness, TestDirs};

/// Test: State survives a restart
/// Given a session that created a list and items
/// When the store is saved and loaded by a fresh session
/// Then the lists and items are intact
#[test]
fn test_store_survives_restart() {
    let dirs = TestDirs::new();

    let mut harness = ModelHarness::with_config(Store::new(), dirs.config.clone());
    harness.create_list("groceries");
    harness.enter_item("Buy milk");
    harness.enter_item("Buy eggs");
    harness
        .model
        .store
        .save_sync(&harness.model.config)
        .unwrap();

    // A fresh load sees the same state
    let loaded = Store::load_sync(&dirs.config).unwrap();
    assert_eq!(loaded.lists.len(), 1);
    assert_eq!(loaded.lists[0].name, "groceries");
    assert_eq!(loaded.lists[0].items[0].text, "Buy milk");
    assert_eq!(loaded.lists[0].items[1].text, "Buy eggs");
}

/// Test: Missing store file loads as empty
#[test]
fn test_missing_store_loads_empty() {
    let dirs = TestDirs::new();
    let store = Store::load_sync(&dirs.config).unwrap();
    assert!(store.lists.is_empty());
}

/// Test: Second save keeps a backup of the previous file
#[test]
fn test_save_keeps_backup_of_previous_store() {
    let dirs = TestDirs::new();

    let mut harness = ModelHarness::with_config(Store::new(), dirs.config.clone());
    harness.create_list("groceries");
    harness.model.store.save_sync(&dirs.config).unwrap();

    harness.enter_item("Buy milk");
    harness.model.store.save_sync(&dirs.config).unwrap();

    let backup = dirs.store_path().with_extension("json.bak");
    assert!(backup.exists(), "Previous store should be backed up");

    // The backup holds the pre-item state
    let backed_up = Store::load_path(&backup).unwrap();
    assert_eq!(backed_up.lists[0].item_count(), 0);

    // No temp file left behind
    assert!(!dirs.store_path().with_extension("json.tmp").exists());
}

/// Test: Corrupt store file surfaces a JSON error
#[test]
fn test_corrupt_store_returns_error() {
    let dirs = TestDirs::new();
    fs::create_dir_all(dirs.temp_dir.path()).unwrap();
    fs::write(dirs.store_path(), "{ not json").unwrap();

    let result = Store::load_sync(&dirs.config);
    assert!(matches!(result.unwrap_err(), Error::Json(_)));
}

/// Test: The on-disk format carries a version for future migration
#[test]
fn test_store_file_is_versioned_json() {
    let dirs = TestDirs::new();

    let mut harness = ModelHarness::with_config(Store::new(), dirs.config.clone());
    harness.create_list("groceries");
    harness.enter_item("Buy milk");
    harness.model.store.save_sync(&dirs.config).unwrap();

    let raw = fs::read_to_string(dirs.store_path()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["version"], 1);
    assert_eq!(json["lists"][0]["name"], "groceries");
    assert_eq!(json["lists"][0]["items"][0]["text"], "Buy milk");
}

/// Test: A rejected item never reaches disk
/// Given an empty-item submission was rejected
/// When the store is saved and reloaded
/// Then the rejected item is absent
#[test]
fn test_rejected_item_not_persisted() {
    let dirs = TestDirs::new();

    let mut harness = ModelHarness::with_config(Store::new(), dirs.config.clone());
    harness.create_list("groceries");

    // Empty submit: rejected, no save command issued
    harness.press(KeyCode::Char('a'));
    let cmds = harness.press(KeyCode::Enter);
    assert!(cmds.is_empty());

    harness.model.store.save_sync(&dirs.config).unwrap();
    let loaded = Store::load_sync(&dirs.config).unwrap();
    assert_eq!(loaded.lists[0].item_count(), 0);
}
