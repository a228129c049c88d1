//! Request and response DTOs for invoice-service.

use crate::models::{InvoiceRecord, PricedLineItem};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// One product entry as submitted by the caller. Transient: validated, priced
/// and then discarded.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LineItemInput {
    #[validate(custom(function = validate_product_name))]
    pub name: String,
    #[validate(range(min = 1, message = "Product quantity must be at least 1"))]
    pub quantity: i64,
    #[validate(range(min = 0.0, message = "Product rate must be a positive number"))]
    pub rate: f64,
}

fn validate_product_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        let mut err = ValidationError::new("required");
        err.message = Some("Product name is required".into());
        return Err(err);
    }
    Ok(())
}

/// Body of `POST /api/invoice/generate`.
///
/// Nested validation reports every violated field across all items at once,
/// not just the first.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GenerateInvoiceRequest {
    #[validate(
        length(min = 1, message = "At least one product is required"),
        nested
    )]
    pub products: Vec<LineItemInput>,
}

/// One invoice in a history listing.
#[derive(Debug, Serialize)]
pub struct InvoiceResponse {
    pub id: String,
    pub invoice_number: String,
    pub owner_name: String,
    pub owner_email: String,
    pub items: Vec<PricedLineItem>,
    pub subtotal: f64,
    pub tax_total: f64,
    pub grand_total: f64,
    pub invoice_date: String,
    pub created_at: String,
}

impl From<InvoiceRecord> for InvoiceResponse {
    fn from(record: InvoiceRecord) -> Self {
        let invoice_number = record.short_number();
        Self {
            id: record.id.to_string(),
            invoice_number,
            owner_name: record.owner_name,
            owner_email: record.owner_email,
            items: record.items,
            subtotal: record.subtotal,
            tax_total: record.tax_total,
            grand_total: record.grand_total,
            invoice_date: record.invoice_date.to_rfc3339(),
            created_at: record.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HistoryData {
    pub invoices: Vec<InvoiceResponse>,
}

/// Success envelope for the history endpoint, mirroring the error envelope
/// emitted by `AppError`.
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub success: bool,
    pub data: HistoryData,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_only_name_is_rejected() {
        let item = LineItemInput {
            name: "   ".to_string(),
            quantity: 1,
            rate: 10.0,
        };
        assert!(item.validate().is_err());
    }

    #[test]
    fn valid_item_passes() {
        let item = LineItemInput {
            name: "Pencil".to_string(),
            quantity: 3,
            rate: 0.0,
        };
        assert!(item.validate().is_ok());
    }

    #[test]
    fn empty_product_list_is_rejected() {
        let request = GenerateInvoiceRequest { products: vec![] };
        let errors = request.validate().unwrap_err();
        assert!(errors.errors().contains_key("products"));
    }
}
