mod health;
mod invoice;

pub use health::{health_check, metrics_endpoint, readiness_check};
pub use invoice::{generate_invoice, invoice_history, HISTORY_LIMIT};
