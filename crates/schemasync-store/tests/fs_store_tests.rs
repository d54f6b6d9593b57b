#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use schemasync_core::contracts::{SchemaWriter, SnapshotProvider};
use schemasync_core::errors::ExErrorKind;
use schemasync_core::model::ObjectKind;
use schemasync_core::policy::WriteOptions;
use schemasync_store::FsSchemaStore;
use tempfile::TempDir;

use common::{function, table};

#[tokio::test]
async fn test_write_load_round_trip() {
    let dir = TempDir::new().unwrap();
    let store = FsSchemaStore::create(dir.path()).await.unwrap();
    let options = WriteOptions::default();

    let events = table("Events", &[("Timestamp", "datetime")]);
    let recent = function("RecentEvents", "Events | take 10");
    store.create_or_alter(&events, &options).await.unwrap();
    store.create_or_alter(&recent, &options).await.unwrap();

    assert!(dir.path().join("tables/Events.json").exists());
    assert!(dir.path().join("functions/RecentEvents.json").exists());

    let reopened = FsSchemaStore::open(dir.path()).await.unwrap();
    let snapshot = reopened.load_snapshot().await.unwrap();
    assert_eq!(snapshot.get(ObjectKind::Table, "Events"), Some(&events));
    assert_eq!(snapshot.get(ObjectKind::Function, "RecentEvents"), Some(&recent));
}

#[tokio::test]
async fn test_alter_overwrites_and_repeat_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let store = FsSchemaStore::create(dir.path()).await.unwrap();
    let options = WriteOptions::default();

    store
        .create_or_alter(&table("T", &[("A", "long")]), &options)
        .await
        .unwrap();
    let altered = table("T", &[("A", "long"), ("B", "string")]);
    store.create_or_alter(&altered, &options).await.unwrap();
    store.create_or_alter(&altered, &options).await.unwrap();

    let snapshot = store.load_snapshot().await.unwrap();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot.get(ObjectKind::Table, "T"), Some(&altered));
}

#[tokio::test]
async fn test_delete_removes_file_and_missing_delete_is_not_found() {
    let dir = TempDir::new().unwrap();
    let store = FsSchemaStore::create(dir.path()).await.unwrap();
    store
        .create_or_alter(&function("F", "print 1"), &WriteOptions::default())
        .await
        .unwrap();

    store.delete(ObjectKind::Function, "F").await.unwrap();
    assert!(!dir.path().join("functions/F.json").exists());

    let err = store.delete(ObjectKind::Function, "F").await.unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::NotFound);
}

#[tokio::test]
async fn test_path_escaping_name_rejected() {
    let dir = TempDir::new().unwrap();
    let store = FsSchemaStore::create(dir.path()).await.unwrap();
    let err = store
        .create_or_alter(&table("../outside", &[]), &WriteOptions::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::InvalidInput);
    assert!(!dir.path().join("outside.json").exists());
}

#[tokio::test]
async fn test_empty_function_body_rejected_when_validating() {
    let dir = TempDir::new().unwrap();
    let store = FsSchemaStore::create(dir.path()).await.unwrap();
    let err = store
        .create_or_alter(&function("F", ""), &WriteOptions::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::InvalidDefinition);
    assert!(store.load_snapshot().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_corrupt_definition_file_reports_object() {
    let dir = TempDir::new().unwrap();
    let store = FsSchemaStore::create(dir.path()).await.unwrap();
    std::fs::write(dir.path().join("tables/Broken.json"), "{ not json").unwrap();

    let err = store.load_snapshot().await.unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::Serialization);
    assert_eq!(err.object_name(), Some("Broken"));
}

#[tokio::test]
async fn test_store_without_kind_dirs_loads_empty() {
    let dir = TempDir::new().unwrap();
    let store = FsSchemaStore::open(dir.path()).await.unwrap();
    assert!(store.load_snapshot().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_definition_file_with_unwritable_name_fails_load() {
    let dir = TempDir::new().unwrap();
    let store = FsSchemaStore::create(dir.path()).await.unwrap();
    let path = dir.path().join("tables/v1..old.json");
    std::fs::write(&path, "{}").unwrap();

    let err = store.load_snapshot().await.unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::InvalidInput);
    assert_eq!(err.op(), Some("load_store"));
    assert_eq!(err.object_name(), Some("v1..old"));
    assert!(err.message().contains(&path.display().to_string()));

    // every name the loader accepts can be deleted again
    std::fs::remove_file(&path).unwrap();
    store
        .create_or_alter(&table("v1_old", &[]), &WriteOptions::default())
        .await
        .unwrap();
    let snapshot = store.load_snapshot().await.unwrap();
    for object in snapshot.iter() {
        store.delete(object.kind(), object.name()).await.unwrap();
    }
    assert!(store.load_snapshot().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_wrong_case_extension_is_skipped() {
    let dir = TempDir::new().unwrap();
    let store = FsSchemaStore::create(dir.path()).await.unwrap();
    std::fs::write(dir.path().join("tables/Events.JSON"), "{}").unwrap();

    assert!(store.load_snapshot().await.unwrap().is_empty());
}
