use crate::render::money::DigitGrouping;
use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct InvoiceConfig {
    pub common: core_config::Config,
    pub mongodb: MongoConfig,
    pub pdf: PdfConfig,
    pub document: DocumentConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PdfConfig {
    /// Headless browser binary used for HTML-to-PDF capture.
    pub browser_path: String,
    pub render_timeout_secs: u64,
}

/// Process-wide document constants. Fixed at startup, never per request.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentConfig {
    pub tax_rate: f64,
    pub brand_name: String,
    pub currency_symbol: String,
    pub currency_grouping: DigitGrouping,
}

impl InvoiceConfig {
    pub fn load() -> Result<Self, AppError> {
        // Load common config (handles .env and APP__ prefix)
        let common_config = core_config::Config::load()?;

        let is_prod = core_config::is_production();

        Ok(InvoiceConfig {
            common: common_config,
            mongodb: MongoConfig {
                uri: get_env("MONGODB_URI", Some("mongodb://localhost:27017"), is_prod)?,
                database: get_env("MONGODB_DATABASE", Some("invoice_db"), is_prod)?,
            },
            pdf: PdfConfig {
                browser_path: get_env("PDF_BROWSER_PATH", Some("chromium"), is_prod)?,
                render_timeout_secs: get_env("PDF_RENDER_TIMEOUT_SECS", Some("30"), is_prod)?
                    .parse()
                    .map_err(|e| {
                        AppError::ConfigError(anyhow::anyhow!(
                            "Invalid PDF_RENDER_TIMEOUT_SECS: {}",
                            e
                        ))
                    })?,
            },
            document: DocumentConfig {
                tax_rate: get_env("TAX_RATE", Some("0.18"), is_prod)?
                    .parse()
                    .map_err(|e| {
                        AppError::ConfigError(anyhow::anyhow!("Invalid TAX_RATE: {}", e))
                    })?,
                brand_name: get_env("BRAND_NAME", Some("Levitation"), is_prod)?,
                currency_symbol: get_env("CURRENCY_SYMBOL", Some("₹"), is_prod)?,
                currency_grouping: get_env("CURRENCY_GROUPING", Some("indian"), is_prod)?
                    .parse()
                    .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))?,
            },
        })
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(format!(
                    "{} is required in production but not set",
                    key
                ))))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(format!(
                    "{} is required but not set",
                    key
                ))))
            }
        }
    }
}
