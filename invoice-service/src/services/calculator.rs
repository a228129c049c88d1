//! Money/tax calculator.
//!
//! Single source of truth for line amounts and invoice aggregates: the
//! persistence path and every presentation path consume this output instead
//! of re-deriving the arithmetic.

use crate::dtos::{GenerateInvoiceRequest, LineItemInput};
use crate::models::{PricedInvoice, PricedLineItem};
use validator::{Validate, ValidationErrors};

/// Validate a generation request and price its line items.
///
/// Validation reports every violated field at once. Pricing is a pure
/// transformation: identical input always yields bit-identical output.
pub fn calculate(
    request: &GenerateInvoiceRequest,
    tax_rate: f64,
) -> Result<PricedInvoice, ValidationErrors> {
    request.validate()?;
    Ok(price_items(&request.products, tax_rate))
}

/// Price already-validated line items and accumulate aggregates in item order.
///
/// All arithmetic is plain f64; no rounding is applied here. Rounding and
/// formatting happen only at presentation time.
pub fn price_items(items: &[LineItemInput], tax_rate: f64) -> PricedInvoice {
    let items: Vec<PricedLineItem> = items
        .iter()
        .map(|item| {
            let line_total = item.quantity as f64 * item.rate;
            let line_tax = line_total * tax_rate;
            PricedLineItem {
                name: item.name.trim().to_string(),
                quantity: item.quantity,
                rate: item.rate,
                line_total,
                line_tax,
            }
        })
        .collect();

    let subtotal = items.iter().fold(0.0, |acc, item| acc + item.line_total);
    let tax_total = items.iter().fold(0.0, |acc, item| acc + item.line_tax);
    let grand_total = subtotal + tax_total;

    PricedInvoice {
        items,
        subtotal,
        tax_total,
        grand_total,
    }
}
