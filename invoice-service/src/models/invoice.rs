//! Invoice record model.

use crate::middleware::AuthUser;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A line item with its computed amounts.
///
/// Derived once by the calculator and immutable afterwards. Amounts are raw
/// f64 products; rounding happens only at presentation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricedLineItem {
    pub name: String,
    pub quantity: i64,
    pub rate: f64,
    pub line_total: f64,
    pub line_tax: f64,
}

/// Calculator output: priced items plus aggregates, not yet tied to an owner.
#[derive(Debug, Clone, PartialEq)]
pub struct PricedInvoice {
    pub items: Vec<PricedLineItem>,
    pub subtotal: f64,
    pub tax_total: f64,
    pub grand_total: f64,
}

/// Persisted invoice document. Write-once: there is no update or delete path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceRecord {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub owner_id: String,
    pub owner_name: String,
    pub owner_email: String,
    pub items: Vec<PricedLineItem>,
    pub subtotal: f64,
    pub tax_total: f64,
    pub grand_total: f64,
    pub invoice_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl InvoiceRecord {
    /// Assemble a record from calculator output and the caller's identity.
    ///
    /// A fresh id is generated and the same timestamp is used for both
    /// `invoice_date` and `created_at`. Inputs are assumed valid; the record
    /// satisfies its aggregate invariants because the amounts come straight
    /// from the calculator.
    pub fn build(owner: &AuthUser, priced: PricedInvoice, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id: owner.id.clone(),
            owner_name: owner.name.clone(),
            owner_email: owner.email.clone(),
            items: priced.items,
            subtotal: priced.subtotal,
            tax_total: priced.tax_total,
            grand_total: priced.grand_total,
            invoice_date: now,
            created_at: now,
        }
    }

    /// Human-friendly invoice number: last 8 hex characters of the id,
    /// uppercased. Distinct from the full internal id.
    pub fn short_number(&self) -> String {
        let hex = self.id.simple().to_string();
        hex[hex.len() - 8..].to_uppercase()
    }
}
