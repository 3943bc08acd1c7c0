use std::sync::{Arc, Barrier};
use std::thread;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use pantry_core::{
    DecrementOutcome, FsBlobStore, InventoryState, Ledger, PantryError, PhotoPayload, SqliteStore,
};
use tempfile::{tempdir, TempDir};
use url::Url;

const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nfake-frame";

fn file_ledger(dir: &TempDir) -> Ledger<SqliteStore, FsBlobStore> {
    let path = dir.path().join("pantry.db");
    SqliteStore::create(&path).expect("create store");
    let store = SqliteStore::open(&path).expect("open store");
    Ledger::new(store, FsBlobStore::new(dir.path().join("blobs")))
}

#[test]
fn test_add_with_captured_photo_stores_blob_and_url() {
    let dir = tempdir().expect("tempdir");
    let ledger = file_ledger(&dir);
    let data_url = format!("data:image/png;base64,{}", STANDARD.encode(PNG_BYTES));
    let photo = PhotoPayload::from_data_url(&data_url).expect("decode photo");

    let state = InventoryState::load(&ledger)
        .expect("load")
        .with_photo(photo)
        .add_item(&ledger, "Tomato")
        .expect("add");

    let item = &state.items()[0];
    assert_eq!(item.name, "Tomato");
    assert_eq!(item.quantity, 1);
    let url = item.image_url.as_deref().expect("image url");
    let path = Url::parse(url)
        .expect("valid url")
        .to_file_path()
        .expect("file url");
    assert!(path.parent().expect("parent").ends_with("images"));
    assert_eq!(std::fs::read(path).expect("blob on disk"), PNG_BYTES);
}

#[test]
fn test_failed_upload_aborts_increment() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("pantry.db");
    SqliteStore::create(&path).expect("create store");
    let blocker = dir.path().join("blobs");
    std::fs::write(&blocker, b"not a directory").expect("write blocker");
    let ledger = Ledger::new(
        SqliteStore::open(&path).expect("open store"),
        FsBlobStore::new(&blocker),
    );
    let photo = PhotoPayload::from_bytes(PNG_BYTES.to_vec()).expect("photo");

    let err = ledger
        .increment("Tomato", Some(&photo))
        .expect_err("upload should fail");

    assert!(matches!(err, PantryError::UploadFailed(_)));
    assert!(ledger.list().expect("list").is_empty());
}

#[test]
fn test_remove_down_to_zero_never_lists_zero() {
    let dir = tempdir().expect("tempdir");
    let ledger = file_ledger(&dir);
    for _ in 0..3 {
        ledger.increment("Eggs", None).expect("increment");
    }

    let mut outcomes = Vec::new();
    for _ in 0..4 {
        outcomes.push(ledger.decrement("Eggs").expect("decrement"));
        assert!(ledger.list().expect("list").iter().all(|i| i.quantity >= 1));
    }

    assert_eq!(
        outcomes,
        vec![
            DecrementOutcome::Decremented(2),
            DecrementOutcome::Decremented(1),
            DecrementOutcome::Removed,
            DecrementOutcome::Absent,
        ]
    );
}

#[test]
fn test_two_concurrent_increments_from_zero_yield_two() {
    let dir = tempdir().expect("tempdir");
    let ledger = Arc::new(file_ledger(&dir));
    let barrier = Arc::new(Barrier::new(2));

    let handles: Vec<_> = (0..2)
        .map(|_| {
            let ledger = Arc::clone(&ledger);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                ledger.increment("X", None).expect("increment");
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("thread should not panic");
    }

    assert_eq!(ledger.get("X").expect("get").quantity, 2);
}
