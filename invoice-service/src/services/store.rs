//! Persistence seam for invoice records.

use crate::models::InvoiceRecord;
use crate::services::database::MongoDb;
use crate::services::metrics::DB_QUERY_DURATION;
use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::doc;
use mongodb::options::FindOptions;
use service_core::error::AppError;

/// Append-only invoice storage.
///
/// Records are written exactly once and never mutated or deleted; the only
/// read path is the owner-scoped history listing.
#[async_trait]
pub trait InvoiceStore: Send + Sync {
    async fn insert(&self, record: &InvoiceRecord) -> Result<(), AppError>;

    /// List an owner's invoices, newest first, at most `limit` records.
    /// An owner with no invoices yields an empty vec, not an error.
    async fn list_for_owner(
        &self,
        owner_id: &str,
        limit: i64,
    ) -> Result<Vec<InvoiceRecord>, AppError>;
}

pub struct MongoInvoiceStore {
    db: MongoDb,
}

impl MongoInvoiceStore {
    pub fn new(db: MongoDb) -> Self {
        Self { db }
    }
}

#[async_trait]
impl InvoiceStore for MongoInvoiceStore {
    async fn insert(&self, record: &InvoiceRecord) -> Result<(), AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["insert_invoice"])
            .start_timer();

        self.db
            .invoices()
            .insert_one(record, None)
            .await
            .map_err(|e| {
                tracing::error!(invoice_id = %record.id, "Failed to insert invoice: {}", e);
                AppError::from(e)
            })?;

        timer.observe_duration();

        tracing::info!(
            invoice_id = %record.id,
            owner_id = %record.owner_id,
            grand_total = %record.grand_total,
            "Invoice persisted"
        );

        Ok(())
    }

    async fn list_for_owner(
        &self,
        owner_id: &str,
        limit: i64,
    ) -> Result<Vec<InvoiceRecord>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["list_invoices"])
            .start_timer();

        let find_options = FindOptions::builder()
            .sort(doc! { "created_at": -1 }) // Newest first
            .limit(limit)
            .build();

        let mut cursor = self
            .db
            .invoices()
            .find(doc! { "owner_id": owner_id }, find_options)
            .await
            .map_err(AppError::from)?;

        let mut records = Vec::new();
        while let Some(record) = cursor.try_next().await.map_err(AppError::from)? {
            records.push(record);
        }

        timer.observe_duration();

        Ok(records)
    }
}
