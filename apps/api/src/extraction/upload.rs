//! Résumé file intake: multipart field handling and PDF text extraction.

use axum::extract::Multipart;
use bytes::Bytes;
use tracing::debug;

use crate::errors::AppError;

pub const RESUME_FIELD: &str = "resume";
const PDF_MIME: &str = "application/pdf";

/// Pulls the `resume` PDF out of a multipart body, enforcing type and size limits.
pub async fn read_resume_field(
    mut multipart: Multipart,
    max_bytes: usize,
) -> Result<Bytes, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Malformed upload: {e}")))?
    {
        if field.name() != Some(RESUME_FIELD) {
            continue;
        }

        let content_type = field.content_type().map(str::to_string);
        if content_type.as_deref() != Some(PDF_MIME) {
            return Err(AppError::InvalidInput(
                "Only PDF files are allowed".to_string(),
            ));
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::InvalidInput(format!("Failed to read upload: {e}")))?;
        check_size(data.len(), max_bytes)?;

        debug!("Received resume upload ({} bytes)", data.len());
        return Ok(data);
    }

    Err(AppError::InvalidInput(format!(
        "No file uploaded in field '{RESUME_FIELD}'"
    )))
}

fn check_size(len: usize, max_bytes: usize) -> Result<(), AppError> {
    if len == 0 {
        return Err(AppError::InvalidInput("Uploaded file is empty".to_string()));
    }
    if len > max_bytes {
        return Err(AppError::InvalidInput(format!(
            "Uploaded file exceeds the {max_bytes} byte limit"
        )));
    }
    Ok(())
}

/// Extracts text from PDF bytes. CPU-bound, so it runs inside `spawn_blocking`.
/// pdf-extract panics on some malformed files; that is reported like a parse error.
pub async fn extract_pdf_text(data: Bytes) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&data))
        .await
        .map_err(|e| {
            if e.is_panic() {
                AppError::Processing("Failed to parse PDF: parser panicked".to_string())
            } else {
                AppError::Internal(anyhow::anyhow!(
                    "spawn_blocking failed in PDF extraction: {e}"
                ))
            }
        })?
        .map_err(|e| AppError::Processing(format!("Failed to parse PDF: {e}")))
}
