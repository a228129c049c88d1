//! Domain models for invoice-service.

mod invoice;

pub use invoice::{InvoiceRecord, PricedInvoice, PricedLineItem};
