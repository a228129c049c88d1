//! Invoice history query tests against the in-memory store.

mod common;

use common::{record_at_offset, MemoryInvoiceStore};
use invoice_service::handlers::HISTORY_LIMIT;
use invoice_service::services::InvoiceStore;

#[tokio::test]
async fn owner_with_no_invoices_gets_empty_list_not_an_error() {
    let store = MemoryInvoiceStore::new();

    let records = store
        .list_for_owner("nobody", HISTORY_LIMIT)
        .await
        .expect("history query should not fail for unknown owners");

    assert!(records.is_empty());
}

#[tokio::test]
async fn history_is_ordered_newest_first() {
    let store = MemoryInvoiceStore::new();
    for secs in [10, 30, 20] {
        store
            .insert(&record_at_offset("user-1", secs))
            .await
            .unwrap();
    }

    let records = store.list_for_owner("user-1", HISTORY_LIMIT).await.unwrap();

    assert_eq!(records.len(), 3);
    assert!(records[0].created_at > records[1].created_at);
    assert!(records[1].created_at > records[2].created_at);
}

#[tokio::test]
async fn history_is_capped_at_fifty_records() {
    let store = MemoryInvoiceStore::new();
    for secs in 0..60 {
        store
            .insert(&record_at_offset("user-1", secs))
            .await
            .unwrap();
    }

    let records = store.list_for_owner("user-1", HISTORY_LIMIT).await.unwrap();

    assert_eq!(records.len(), 50);
    // The ten oldest records fall off the end.
    let oldest_returned = records.last().unwrap().created_at;
    let cutoff = record_at_offset("user-1", 10).created_at;
    assert_eq!(oldest_returned, cutoff);
}

#[tokio::test]
async fn history_is_scoped_to_the_owner() {
    let store = MemoryInvoiceStore::new();
    store.insert(&record_at_offset("user-1", 0)).await.unwrap();
    store.insert(&record_at_offset("user-2", 1)).await.unwrap();

    let records = store.list_for_owner("user-1", HISTORY_LIMIT).await.unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].owner_id, "user-1");
}
