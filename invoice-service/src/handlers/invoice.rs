use crate::dtos::{GenerateInvoiceRequest, HistoryData, HistoryResponse, InvoiceResponse};
use crate::middleware::AuthUser;
use crate::models::InvoiceRecord;
use crate::render::render_invoice_html;
use crate::services::calculator;
use crate::services::metrics::{ERRORS_TOTAL, INVOICES_GENERATED_TOTAL, INVOICE_AMOUNT_TOTAL};
use crate::startup::AppState;
use axum::{
    extract::{Json, State},
    http::{header, StatusCode},
    response::IntoResponse,
};
use chrono::Utc;
use service_core::error::AppError;

/// Maximum number of records returned by the history endpoint.
pub const HISTORY_LIMIT: i64 = 50;

/// Generate an invoice PDF from submitted line items.
///
/// POST /api/invoice/generate
///
/// Pipeline: validate -> calculate -> build record -> persist -> render ->
/// export. Validation failures short-circuit before any write; a persistence
/// failure prevents export; an export failure after the write leaves the
/// record durable and surfaces the error as-is.
pub async fn generate_invoice(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<GenerateInvoiceRequest>,
) -> Result<impl IntoResponse, AppError> {
    let priced = calculator::calculate(&payload, state.style.tax_rate).map_err(|e| {
        INVOICES_GENERATED_TOTAL
            .with_label_values(&["validation_failed"])
            .inc();
        AppError::ValidationError(e)
    })?;

    let record = InvoiceRecord::build(&user, priced, Utc::now());

    state.store.insert(&record).await.map_err(|e| {
        INVOICES_GENERATED_TOTAL
            .with_label_values(&["persistence_failed"])
            .inc();
        ERRORS_TOTAL.with_label_values(&["persistence"]).inc();
        e
    })?;

    let html = render_invoice_html(&record, &state.style);

    let pdf = state.engine.render_pdf(&html).await.map_err(|e| {
        INVOICES_GENERATED_TOTAL
            .with_label_values(&["export_failed"])
            .inc();
        ERRORS_TOTAL.with_label_values(&["export"]).inc();
        tracing::error!(invoice_id = %record.id, "PDF export failed: {}", e);
        e
    })?;

    INVOICES_GENERATED_TOTAL
        .with_label_values(&["generated"])
        .inc();
    INVOICE_AMOUNT_TOTAL
        .with_label_values(&[state.style.currency.symbol.as_str()])
        .inc_by(record.grand_total);

    tracing::info!(
        invoice_id = %record.id,
        owner_id = %user.id,
        items = record.items.len(),
        pdf_bytes = pdf.len(),
        "Invoice generated"
    );

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"invoice-{}.pdf\"", record.id),
            ),
            (header::CONTENT_LENGTH, pdf.len().to_string()),
        ],
        pdf,
    ))
}

/// List the caller's invoices, newest first, capped at 50.
///
/// GET /api/invoice/history
pub async fn invoice_history(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let records = state.store.list_for_owner(&user.id, HISTORY_LIMIT).await?;

    let invoices = records.into_iter().map(InvoiceResponse::from).collect();

    Ok(Json(HistoryResponse {
        success: true,
        data: HistoryData { invoices },
    }))
}
