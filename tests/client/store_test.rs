use std::cell::Cell;
use std::rc::Rc;

use crate::common::{self, StubRelay, TODAY};
use clarity::client::document::{PLACEHOLDER_THUMBNAIL, PROCESSED};
use clarity::client::store::{DocumentStore, StoreError, STORAGE_KEY};

#[actix_web::test]
async fn test_add_document_prepends_with_next_id() {
    let relay = StubRelay::processing();
    let (dir, mut store) = common::store_with_uploads(&relay, 2).await;
    let file = dir.path().join("Lease Agreement.pdf");
    let added = store.add_document(&relay, &file, TODAY).await.unwrap();
    assert_eq!(added.id, 3);
    assert_eq!(added.title, "Lease Agreement");
    assert_eq!(added.added, TODAY);
    assert_eq!(added.last_opened, TODAY);
    assert_eq!(added.thumbnail, PLACEHOLDER_THUMBNAIL);
    assert_eq!(added.kind.as_deref(), Some(PROCESSED));
    assert_eq!(
        added.file_path.as_deref(),
        Some("/api/documents/1760000000000-Lease Agreement.pdf")
    );
    assert_eq!(added.document_id.as_deref(), Some("doc-1"));

    let ids: Vec<u64> = store.documents().iter().map(|doc| doc.id).collect();
    assert_eq!(ids, [3, 2, 1]);
}

#[actix_web::test]
async fn test_add_document_when_relay_fails_expect_store_unchanged() {
    let relay = StubRelay::processing();
    let (dir, mut store) = common::store_with_uploads(&relay, 1).await;
    let before = store.documents().to_vec();
    let failing = StubRelay::failing("Failed to process document with AI engine.");
    let file = dir.path().join("lease.pdf");
    let actual = store.add_document(&failing, &file, TODAY).await.unwrap_err();
    assert_eq!(
        actual.to_string(),
        "Error: Could not process the document. Failed to process document with AI engine."
    );
    assert_eq!(store.documents(), before.as_slice());
    let reloaded = DocumentStore::load(common::storage_in(&dir));
    assert_eq!(reloaded.documents(), before.as_slice());
}

#[actix_web::test]
async fn test_mutations_persist_across_reload() {
    let relay = StubRelay::processing();
    let (dir, mut store) = common::store_with_uploads(&relay, 3).await;
    store.rename(2, "  Renamed  ").unwrap();
    store.delete(1).unwrap();
    store.quick_view(3, "Oct 20' 26").unwrap();

    let reloaded = DocumentStore::load(common::storage_in(&dir));
    assert_eq!(reloaded.documents(), store.documents());
    assert_eq!(reloaded.get(2).unwrap().title, "Renamed");
    assert!(reloaded.get(1).is_none());
    assert_eq!(reloaded.get(3).unwrap().last_opened, "Oct 20' 26");
    assert_eq!(reloaded.next_id(), 4);
}

#[actix_web::test]
async fn test_rename_when_blank_expect_error_and_title_kept() {
    let relay = StubRelay::processing();
    let (_dir, mut store) = common::store_with_uploads(&relay, 1).await;
    let actual = store.rename(1, "   ").unwrap_err();
    assert!(matches!(actual, StoreError::BlankTitle));
    assert_eq!(store.get(1).unwrap().title, "file-0");
}

#[test]
fn test_delete_when_unknown_id_expect_not_found() {
    let (_dir, mut store) = common::empty_store();
    let actual = store.delete(42).unwrap_err();
    assert!(matches!(actual, StoreError::NotFound(42)));
}

#[actix_web::test]
async fn test_filter_is_case_insensitive_and_does_not_mutate() {
    let relay = StubRelay::processing();
    let (dir, mut store) = common::store_with_uploads(&relay, 0).await;
    for name in ["Lease.pdf", "Invoice.pdf", "lease renewal.pdf"] {
        store
            .add_document(&relay, &dir.path().join(name), TODAY)
            .await
            .unwrap();
    }
    let titles: Vec<&str> = store
        .filter("LEASE")
        .into_iter()
        .map(|doc| doc.title.as_str())
        .collect();
    let persisted = common::storage_in(&dir).get_item(STORAGE_KEY).unwrap();

    assert_eq!(titles, ["lease renewal", "Lease"]);
    assert_eq!(store.filter("").len(), 3);
    assert!(store.filter("zzz-no-match").is_empty());
    assert_eq!(store.documents().len(), 3);
    assert_eq!(common::storage_in(&dir).get_item(STORAGE_KEY).unwrap(), persisted);
    assert!(persisted.is_some());
}

#[actix_web::test]
async fn test_subscribers_see_every_mutation() {
    let relay = StubRelay::processing();
    let (dir, mut store) = common::empty_store();
    let calls = Rc::new(Cell::new(0));
    let seen = Rc::clone(&calls);
    store.subscribe(move |documents| seen.set(seen.get() + documents.len() + 100));
    store
        .add_document(&relay, &dir.path().join("a.pdf"), TODAY)
        .await
        .unwrap();
    store.delete(1).unwrap();
    assert_eq!(calls.get(), 101 + 100);
}

#[test]
fn test_load_when_storage_corrupt_expect_empty_store() {
    let dir = tempfile::tempdir().unwrap();
    let storage = common::storage_in(&dir);
    storage.set_item(STORAGE_KEY, "{not json").unwrap();
    let store = DocumentStore::load(storage);
    assert!(store.documents().is_empty());
    assert_eq!(store.next_id(), 1);
}

#[test]
fn test_load_when_storage_file_unreadable_json_expect_empty_store() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("local_storage.json"), "garbage").unwrap();
    let store = DocumentStore::load(common::storage_in(&dir));
    assert!(store.documents().is_empty());
}

#[test]
fn test_load_when_records_partial_expect_readable_records_kept() {
    let dir = tempfile::tempdir().unwrap();
    let storage = common::storage_in(&dir);
    let raw = serde_json::json!([
        {"id": 3, "title": "Lease", "pages": null},
        {"id": 2, "lastOpened": "Jan 2' 25"},
        {"title": "No id"}
    ]);
    storage.set_item(STORAGE_KEY, &raw.to_string()).unwrap();
    let store = DocumentStore::load(storage);
    let ids: Vec<u64> = store.documents().iter().map(|doc| doc.id).collect();
    assert_eq!(ids, [3, 2]);
    assert_eq!(store.get(3).unwrap().pages, 0);
    assert_eq!(store.get(2).unwrap().title, "");
    assert_eq!(store.next_id(), 4);
}
