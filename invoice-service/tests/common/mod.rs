//! Shared test fixtures for invoice-service tests.

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use invoice_service::models::{InvoiceRecord, PricedLineItem};
use invoice_service::services::InvoiceStore;
use service_core::error::AppError;
use std::sync::Mutex;
use uuid::Uuid;

/// In-memory invoice store implementing the documented contract:
/// append-only writes, owner-scoped reads ordered newest-first with a limit.
#[derive(Default)]
pub struct MemoryInvoiceStore {
    records: Mutex<Vec<InvoiceRecord>>,
}

impl MemoryInvoiceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything written so far, in insertion order.
    pub fn all(&self) -> Vec<InvoiceRecord> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl InvoiceStore for MemoryInvoiceStore {
    async fn insert(&self, record: &InvoiceRecord) -> Result<(), AppError> {
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }

    async fn list_for_owner(
        &self,
        owner_id: &str,
        limit: i64,
    ) -> Result<Vec<InvoiceRecord>, AppError> {
        let mut matching: Vec<InvoiceRecord> = self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.owner_id == owner_id)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        matching.truncate(limit as usize);
        Ok(matching)
    }
}

/// A minimal valid record for a given owner and creation time.
pub fn record_for(owner_id: &str, created_at: DateTime<Utc>) -> InvoiceRecord {
    InvoiceRecord {
        id: Uuid::new_v4(),
        owner_id: owner_id.to_string(),
        owner_name: "Test Owner".to_string(),
        owner_email: "owner@example.com".to_string(),
        items: vec![PricedLineItem {
            name: "Widget".to_string(),
            quantity: 1,
            rate: 100.0,
            line_total: 100.0,
            line_tax: 18.0,
        }],
        subtotal: 100.0,
        tax_total: 18.0,
        grand_total: 118.0,
        invoice_date: created_at,
        created_at,
    }
}

/// Records created `secs` seconds after a fixed base time.
pub fn record_at_offset(owner_id: &str, secs: i64) -> InvoiceRecord {
    let base = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
    record_for(owner_id, base + Duration::seconds(secs))
}
