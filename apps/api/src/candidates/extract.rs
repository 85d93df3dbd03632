//! Text Extractor: uploaded document bytes to plain text.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

const PDF_MAGIC: &[u8] = b"%PDF-";

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("unsupported document type: {0}")]
    Unsupported(String),

    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("document contains no extractable text")]
    EmptyText,
}

#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, document: Bytes) -> Result<String, ExtractionError>;
}

/// Extracts text from every page of a PDF. Runs on the blocking pool, so a
/// malformed document that panics the decoder surfaces as an error instead.
pub struct PdfTextExtractor;

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    async fn extract(&self, document: Bytes) -> Result<String, ExtractionError> {
        if !document.starts_with(PDF_MAGIC) {
            return Err(ExtractionError::Unsupported(
                "expected a PDF document".to_string(),
            ));
        }

        let text = tokio::task::spawn_blocking(move || {
            pdf_extract::extract_text_from_mem(&document).map_err(|e| e.to_string())
        })
        .await
        .map_err(|e| ExtractionError::Pdf(format!("decoder aborted: {e}")))?
        .map_err(ExtractionError::Pdf)?;

        normalize_text(&text)
    }
}

/// Trims trailing whitespace per line, drops runs of blank lines and rejects empty output.
pub fn normalize_text(text: &str) -> Result<String, ExtractionError> {
    let mut out = String::with_capacity(text.len());
    let mut blank_run = false;
    for line in text.lines().map(str::trim_end) {
        if line.trim().is_empty() {
            blank_run = true;
            continue;
        }
        if !out.is_empty() {
            out.push('\n');
            if blank_run {
                out.push('\n');
            }
        }
        out.push_str(line);
        blank_run = false;
    }

    if out.is_empty() {
        Err(ExtractionError::EmptyText)
    } else {
        Ok(out)
    }
}
