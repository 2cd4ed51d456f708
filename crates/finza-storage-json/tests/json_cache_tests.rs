use chrono::{NaiveDate, TimeZone, Utc};
use tempfile::tempdir;

use finza_core::storage::CacheStore;
use finza_domain::{Category, PendingWrite, Transaction, TransactionType};
use finza_storage_json::JsonCacheStore;

fn sample_transaction(description: &str, amount: f64) -> Transaction {
    Transaction::new(
        "User-01",
        amount,
        description,
        TransactionType::Expense,
        Category::Food,
        NaiveDate::from_ymd_opt(2025, 3, 1).expect("date"),
        Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).single().expect("timestamp"),
    )
}

#[test]
fn unknown_user_reads_as_empty_lists() {
    let dir = tempdir().expect("tempdir");
    let store = JsonCacheStore::new(dir.path().to_path_buf()).expect("create store");

    assert!(store.cached_transactions("nobody").expect("read").is_empty());
    assert!(store.cached_recurrings("nobody").expect("read").is_empty());
    assert!(store.pending("nobody").expect("read").is_empty());
}

#[test]
fn cached_lists_round_trip_in_order() {
    let dir = tempdir().expect("tempdir");
    let store = JsonCacheStore::new(dir.path().to_path_buf()).expect("create store");
    let entries = vec![
        sample_transaction("First", 10.0),
        sample_transaction("Second", 20.0),
        sample_transaction("Third", 30.0),
    ];

    store
        .set_cached_transactions("User-01", &entries)
        .expect("write");
    let loaded = store.cached_transactions("User-01").expect("read");

    assert_eq!(loaded, entries);
}

#[test]
fn set_cached_overwrites_instead_of_merging() {
    let dir = tempdir().expect("tempdir");
    let store = JsonCacheStore::new(dir.path().to_path_buf()).expect("create store");

    store
        .set_cached_transactions("User-01", &[sample_transaction("Old", 1.0)])
        .expect("first write");
    let replacement = vec![sample_transaction("New", 2.0)];
    store
        .set_cached_transactions("User-01", &replacement)
        .expect("second write");

    assert_eq!(
        store.cached_transactions("User-01").expect("read"),
        replacement
    );
}

#[test]
fn pending_queue_appends_and_clears() {
    let dir = tempdir().expect("tempdir");
    let store = JsonCacheStore::new(dir.path().to_path_buf()).expect("create store");
    let queued_at = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).single().expect("timestamp");

    store
        .enqueue_pending(
            "User-01",
            PendingWrite::for_transaction(sample_transaction("One", 10.0), queued_at),
        )
        .expect("enqueue one");
    store
        .enqueue_pending(
            "User-01",
            PendingWrite::for_transaction(sample_transaction("Two", 20.0), queued_at),
        )
        .expect("enqueue two");

    let queue = store.pending("User-01").expect("read queue");
    assert_eq!(queue.len(), 2);

    store.clear_pending("User-01").expect("clear");
    assert!(store.pending("User-01").expect("read queue").is_empty());
}

#[test]
fn remove_pending_keeps_order_and_clears_when_empty() {
    let dir = tempdir().expect("tempdir");
    let store = JsonCacheStore::new(dir.path().to_path_buf()).expect("create store");
    let queued_at = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).single().expect("timestamp");

    for label in ["One", "Two", "Three"] {
        store
            .enqueue_pending(
                "User-01",
                PendingWrite::for_transaction(sample_transaction(label, 5.0), queued_at),
            )
            .expect("enqueue");
    }
    let queue = store.pending("User-01").expect("read queue");

    store
        .remove_pending("User-01", &[queue[1].local_id])
        .expect("remove middle");
    let remaining = store.pending("User-01").expect("read queue");
    assert_eq!(remaining.len(), 2);
    assert_eq!(remaining[0].local_id, queue[0].local_id);
    assert_eq!(remaining[1].local_id, queue[2].local_id);

    store
        .remove_pending(
            "User-01",
            &[remaining[0].local_id, remaining[1].local_id],
        )
        .expect("remove rest");
    assert!(store.pending("User-01").expect("read queue").is_empty());
}

#[test]
fn cache_survives_a_store_reopen() {
    let dir = tempdir().expect("tempdir");
    let queued_at = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).single().expect("timestamp");
    {
        let store = JsonCacheStore::new(dir.path().to_path_buf()).expect("create store");
        store
            .set_cached_transactions("User-01", &[sample_transaction("Kept", 42.0)])
            .expect("write cache");
        store
            .enqueue_pending(
                "User-01",
                PendingWrite::for_transaction(sample_transaction("Queued", 7.0), queued_at),
            )
            .expect("enqueue");
    }

    let reopened = JsonCacheStore::new(dir.path().to_path_buf()).expect("reopen store");
    let cached = reopened.cached_transactions("User-01").expect("read cache");
    assert_eq!(cached.len(), 1);
    assert_eq!(cached[0].description, "Kept");
    let queue = reopened.pending("User-01").expect("read queue");
    assert_eq!(queue.len(), 1);
    assert_eq!(queue[0].payload.description(), "Queued");
}

#[test]
fn users_with_awkward_ids_get_separate_directories() {
    let dir = tempdir().expect("tempdir");
    let store = JsonCacheStore::new(dir.path().to_path_buf()).expect("create store");

    store
        .set_cached_transactions("a/b", &[sample_transaction("Slash", 1.0)])
        .expect("write first");
    store
        .set_cached_transactions("AB", &[sample_transaction("Plain", 2.0)])
        .expect("write second");

    let first = store.cached_transactions("a/b").expect("read first");
    let second = store.cached_transactions("AB").expect("read second");
    assert_eq!(first[0].description, "Slash");
    assert_eq!(second[0].description, "Plain");
    assert!(store.user_dir("a/b").exists());
    assert!(store.user_dir("AB").exists());
}
