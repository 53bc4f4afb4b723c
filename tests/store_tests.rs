use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde_json::json;
use tempfile::TempDir;
use taskpad::models::{Repeat, Task, TaskStatus};
use taskpad::store::{BlobStore, SqliteBlobStore, StoreError, TaskPatch, TaskStore, TASKS_KEY};

fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 16).unwrap().and_hms_opt(h, m, s).unwrap()
}

fn task(title: &str) -> Task {
    Task::new(title.to_string(), "personal".to_string(), at(9, 0, 0))
}

fn open(dir: &TempDir) -> TaskStore<SqliteBlobStore> {
    let blob = SqliteBlobStore::open(&dir.path().join("tasks.db")).unwrap();
    TaskStore::open(blob, Duration::seconds(5))
}

#[test]
fn test_mutations_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let id = {
        let mut store = open(&dir);
        let t = task("persisted");
        let id = t.id.clone();
        store.add(t).unwrap();
        store
            .update(&id, TaskPatch { notes: Some("note".to_string()), ..Default::default() })
            .unwrap();
        id
    };

    let store = open(&dir);
    assert_eq!(store.list().len(), 1);
    assert_eq!(store.get(&id).unwrap().notes, "note");
}

#[test]
fn test_undo_slot_survives_reopen_until_expiry() {
    let dir = TempDir::new().unwrap();
    {
        let mut store = open(&dir);
        store.add(task("a")).unwrap();
        let id = store.resolve("1").unwrap();
        store.remove(&id, at(12, 0, 0)).unwrap();
    }

    let mut store = open(&dir);
    assert!(store.pending_undo().is_pending(at(12, 0, 3)));
    let restored = store.undo(at(12, 0, 3)).unwrap();
    assert_eq!(restored.map(|t| t.title), Some("a".to_string()));

    let mut store = open(&dir);
    assert_eq!(store.list().len(), 1);
    assert!(store.undo(at(12, 0, 4)).unwrap().is_none());
}

#[test]
fn test_undo_after_expiry_discards() {
    let dir = TempDir::new().unwrap();
    let mut store = open(&dir);
    store.add(task("a")).unwrap();
    let id = store.resolve("1").unwrap();
    store.remove(&id, at(12, 0, 0)).unwrap();

    assert!(store.undo(at(12, 0, 5)).unwrap().is_none());
    assert!(store.list().is_empty());
}

#[test]
fn test_legacy_blob_loads_with_defaults() {
    let dir = TempDir::new().unwrap();
    {
        let mut blob = SqliteBlobStore::open(&dir.path().join("tasks.db")).unwrap();
        let legacy = json!([
            {"id": 1700000000000u64, "title": "Old habit", "category": "health",
             "repeat": "daily", "dueDate": "2026-10-15T00:00:00.000", "createdAt": "2026-01-01T08:00:00"},
            {"title": "broken, no id"}
        ]);
        blob.put(TASKS_KEY, &legacy.to_string()).unwrap();
    }

    let store = open(&dir);
    assert_eq!(store.list().len(), 1);
    let t = &store.list()[0];
    assert_eq!(t.id, "1700000000000");
    assert_eq!(t.repeat, Repeat::Daily);
    assert_eq!(t.due_date, NaiveDate::from_ymd_opt(2026, 10, 15));
    assert_eq!(t.status, TaskStatus::Todo);
    assert!(t.checklist.is_empty());
}

#[test]
fn test_export_then_import_replaces_collection() {
    let dir = TempDir::new().unwrap();
    let mut source = open(&dir);
    source.add(task("one")).unwrap();
    source.add(task("two")).unwrap();
    let exported = source.export_json().unwrap();

    let other = TempDir::new().unwrap();
    let mut target = open(&other);
    target.add(task("stale")).unwrap();
    assert!(target.import_json(&exported).unwrap());
    assert_eq!(target.list(), source.list());

    // One bad record rejects the whole import
    let partial = json!([{"id": "x", "title": "ok", "category": "work", "createdAt": "2026-01-01T08:00:00"}, 42]);
    assert!(!target.import_json(&partial.to_string()).unwrap());
    assert_eq!(target.list().len(), 2);
}

#[test]
fn test_missing_task_errors() {
    let dir = TempDir::new().unwrap();
    let mut store = open(&dir);
    let err = store.toggle("nope", at(9, 0, 0)).unwrap_err();
    assert!(matches!(err, StoreError::TaskNotFound(_)));
    assert!(err.is_user_error());
    assert!(store.remove("nope", at(9, 0, 0)).is_err());
}
