//! Text extraction for uploaded résumé files.
//!
//! Extraction never fails: unreadable PDFs yield an annotated placeholder string,
//! which flows through the workflow like any other résumé text.

use tracing::warn;

use crate::models::resume::{RawResume, ResumeUpload};

const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Extracts text from every upload on the blocking pool, preserving order.
pub async fn extract_all(uploads: Vec<ResumeUpload>) -> Vec<RawResume> {
    let mut resumes = Vec::with_capacity(uploads.len());
    for upload in uploads {
        let filename = upload.filename.clone();
        let text = tokio::task::spawn_blocking(move || extract_text(&upload))
            .await
            .unwrap_or_else(|e| {
                warn!("Text extraction for {filename} panicked: {e}");
                format!("[Error extracting text: {e}]")
            });
        resumes.push(RawResume { filename, text });
    }
    resumes
}

pub fn extract_text(upload: &ResumeUpload) -> String {
    if is_pdf(upload) {
        match pdf_extract::extract_text_from_mem(&upload.content) {
            Ok(text) => text,
            Err(e) => {
                warn!("PDF extraction failed for {}: {e}", upload.filename);
                format!("[Error extracting PDF: {e}]")
            }
        }
    } else {
        String::from_utf8_lossy(&upload.content).into_owned()
    }
}

/// Browsers often send PDFs as `application/octet-stream`; fall back to the extension then.
fn is_pdf(upload: &ResumeUpload) -> bool {
    let content_type = upload.content_type.to_ascii_lowercase();
    if content_type.starts_with(PDF_CONTENT_TYPE) {
        return true;
    }
    let generic = content_type.is_empty() || content_type == "application/octet-stream";
    generic && upload.filename.to_ascii_lowercase().ends_with(".pdf")
}
