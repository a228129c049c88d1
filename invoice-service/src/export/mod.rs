//! Document exporter: rendered HTML in, PDF bytes out.
//!
//! The rendering engine is a heavyweight external process, so it sits behind
//! the narrow [`PdfEngine`] trait; the export logic (timeout, cleanup, error
//! taxonomy) is testable with a fake implementation.

use crate::config::PdfConfig;
use crate::services::metrics::PDF_RENDER_DURATION;
use async_trait::async_trait;
use service_core::error::AppError;
use std::time::Duration;
use tokio::process::Command;

/// Capability that turns markup into captured PDF bytes.
#[async_trait]
pub trait PdfEngine: Send + Sync {
    async fn render_pdf(&self, html: &str) -> Result<Vec<u8>, AppError>;
}

/// Headless Chromium engine. One isolated browser invocation per request:
/// the scratch directory and the process are both released on every exit
/// path (temp dir drop, `kill_on_drop`, timeout).
pub struct ChromiumEngine {
    browser_path: String,
    timeout: Duration,
}

impl ChromiumEngine {
    pub fn new(browser_path: impl Into<String>, timeout: Duration) -> Self {
        Self {
            browser_path: browser_path.into(),
            timeout,
        }
    }

    pub fn from_config(config: &PdfConfig) -> Self {
        Self::new(
            config.browser_path.clone(),
            Duration::from_secs(config.render_timeout_secs),
        )
    }
}

#[async_trait]
impl PdfEngine for ChromiumEngine {
    async fn render_pdf(&self, html: &str) -> Result<Vec<u8>, AppError> {
        let timer = PDF_RENDER_DURATION.start_timer();

        // Scratch dir is removed when this guard drops, on every exit path.
        let workdir = tempfile::tempdir().map_err(|e| {
            AppError::ExportError(anyhow::anyhow!("Failed to create scratch dir: {}", e))
        })?;

        let html_path = workdir.path().join("invoice.html");
        let pdf_path = workdir.path().join("invoice.pdf");

        tokio::fs::write(&html_path, html).await.map_err(|e| {
            AppError::ExportError(anyhow::anyhow!("Failed to write markup: {}", e))
        })?;

        let mut cmd = Command::new(&self.browser_path);
        cmd.arg("--headless")
            .arg("--disable-gpu")
            .arg("--no-sandbox")
            .arg("--no-pdf-header-footer")
            // Let in-page resources settle before capture, the CLI
            // equivalent of waiting for network idle.
            .arg("--virtual-time-budget=10000")
            .arg(format!("--print-to-pdf={}", pdf_path.display()))
            .arg(format!("file://{}", html_path.display()))
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::piped())
            .kill_on_drop(true);

        tracing::debug!(
            browser = %self.browser_path,
            timeout_secs = %self.timeout.as_secs(),
            "Launching rendering engine"
        );

        let output = tokio::time::timeout(self.timeout, cmd.output())
            .await
            .map_err(|_| {
                AppError::ExportError(anyhow::anyhow!(
                    "Rendering engine timed out after {} seconds",
                    self.timeout.as_secs()
                ))
            })?
            .map_err(|e| {
                AppError::ExportError(anyhow::anyhow!(
                    "Failed to launch rendering engine '{}': {}",
                    self.browser_path,
                    e
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            tracing::error!(
                browser = %self.browser_path,
                stderr = %stderr,
                "Rendering engine failed"
            );
            return Err(AppError::ExportError(anyhow::anyhow!(
                "Rendering engine exited with {}: {}",
                output.status,
                stderr
            )));
        }

        let bytes = tokio::fs::read(&pdf_path).await.map_err(|e| {
            AppError::ExportError(anyhow::anyhow!("Capture produced no PDF file: {}", e))
        })?;

        if bytes.is_empty() {
            return Err(AppError::ExportError(anyhow::anyhow!(
                "Capture produced an empty PDF"
            )));
        }

        timer.observe_duration();

        tracing::info!(pdf_bytes = bytes.len(), "PDF capture completed");

        Ok(bytes)
    }
}
