//! Generation pipeline tests: persist before export, and a durable record
//! when export fails after the write. The Mongo client connects lazily, so
//! the application state is constructible without a running database.

mod common;

use async_trait::async_trait;
use axum::extract::{Json, State};
use common::MemoryInvoiceStore;
use invoice_service::config::{DocumentConfig, InvoiceConfig, MongoConfig, PdfConfig};
use invoice_service::dtos::{GenerateInvoiceRequest, LineItemInput};
use invoice_service::export::PdfEngine;
use invoice_service::handlers::generate_invoice;
use invoice_service::middleware::AuthUser;
use invoice_service::models::InvoiceRecord;
use invoice_service::render::money::DigitGrouping;
use invoice_service::render::DocumentStyle;
use invoice_service::services::database::MongoDb;
use invoice_service::services::InvoiceStore;
use invoice_service::startup::AppState;
use service_core::error::AppError;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// Engine that succeeds and counts how often it was asked to render.
struct CountingEngine {
    calls: AtomicU32,
}

impl CountingEngine {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicU32::new(0),
        })
    }
}

#[async_trait]
impl PdfEngine for CountingEngine {
    async fn render_pdf(&self, _html: &str) -> Result<Vec<u8>, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(b"%PDF-1.4 canned".to_vec())
    }
}

/// Engine whose render always fails, as a crashed browser would.
struct CrashingEngine;

#[async_trait]
impl PdfEngine for CrashingEngine {
    async fn render_pdf(&self, _html: &str) -> Result<Vec<u8>, AppError> {
        Err(AppError::ExportError(anyhow::anyhow!(
            "rendering engine crashed"
        )))
    }
}

/// Store whose writes always fail, as an unreachable database would.
struct FailingStore;

#[async_trait]
impl InvoiceStore for FailingStore {
    async fn insert(&self, _record: &InvoiceRecord) -> Result<(), AppError> {
        Err(AppError::DatabaseError(anyhow::anyhow!(
            "connection refused"
        )))
    }

    async fn list_for_owner(
        &self,
        _owner_id: &str,
        _limit: i64,
    ) -> Result<Vec<InvoiceRecord>, AppError> {
        Ok(Vec::new())
    }
}

async fn app_state(store: Arc<dyn InvoiceStore>, engine: Arc<dyn PdfEngine>) -> AppState {
    let config = InvoiceConfig {
        common: service_core::config::Config { port: 0 },
        mongodb: MongoConfig {
            uri: "mongodb://localhost:27017".to_string(),
            database: "invoice_test".to_string(),
        },
        pdf: PdfConfig {
            browser_path: "chromium".to_string(),
            render_timeout_secs: 5,
        },
        document: DocumentConfig {
            tax_rate: 0.18,
            brand_name: "Levitation".to_string(),
            currency_symbol: "₹".to_string(),
            currency_grouping: DigitGrouping::Indian,
        },
    };

    let db = MongoDb::connect(&config.mongodb.uri, &config.mongodb.database)
        .await
        .expect("lazy client construction should not fail");
    let style = DocumentStyle::from_config(&config.document);

    AppState {
        config,
        db,
        store,
        engine,
        style,
    }
}

fn caller() -> AuthUser {
    AuthUser {
        id: "user-1".to_string(),
        name: "Test Owner".to_string(),
        email: "owner@example.com".to_string(),
    }
}

fn request() -> GenerateInvoiceRequest {
    GenerateInvoiceRequest {
        products: vec![LineItemInput {
            name: "Widget".to_string(),
            quantity: 1,
            rate: 100.0,
        }],
    }
}

#[tokio::test]
async fn successful_generation_persists_then_renders_once() {
    let store = Arc::new(MemoryInvoiceStore::new());
    let engine = CountingEngine::new();
    let state = app_state(store.clone(), engine.clone()).await;

    let result = generate_invoice(State(state), caller(), Json(request())).await;

    assert!(result.is_ok());
    assert_eq!(engine.calls.load(Ordering::SeqCst), 1);

    let records = store.all();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].owner_id, "user-1");
    assert_eq!(records[0].grand_total, 118.0);
}

#[tokio::test]
async fn export_failure_after_write_leaves_the_record_durable() {
    let store = Arc::new(MemoryInvoiceStore::new());
    let state = app_state(store.clone(), Arc::new(CrashingEngine)).await;

    let err = generate_invoice(State(state), caller(), Json(request()))
        .await
        .err()
        .expect("crashed engine must fail the request");

    assert!(matches!(err, AppError::ExportError(_)));

    // The write preceded the export and is not rolled back.
    let records = store.all();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].owner_id, "user-1");
}

#[tokio::test]
async fn persistence_failure_prevents_export() {
    let engine = CountingEngine::new();
    let state = app_state(Arc::new(FailingStore), engine.clone()).await;

    let err = generate_invoice(State(state), caller(), Json(request()))
        .await
        .err()
        .expect("failing store must fail the request");

    assert!(matches!(err, AppError::DatabaseError(_)));
    assert_eq!(engine.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn validation_failure_writes_nothing_and_skips_export() {
    let store = Arc::new(MemoryInvoiceStore::new());
    let engine = CountingEngine::new();
    let state = app_state(store.clone(), engine.clone()).await;

    let empty = GenerateInvoiceRequest { products: vec![] };
    let err = generate_invoice(State(state), caller(), Json(empty))
        .await
        .err()
        .expect("empty submission must be rejected");

    assert!(matches!(err, AppError::ValidationError(_)));
    assert!(store.all().is_empty());
    assert_eq!(engine.calls.load(Ordering::SeqCst), 0);
}
