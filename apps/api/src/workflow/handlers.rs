use axum::{
    extract::{Multipart, State},
    Json,
};
use tracing::debug;

use crate::errors::AppError;
use crate::models::resume::ResumeUpload;
use crate::state::AppState;
use crate::workflow::assembler::AnalysisResult;

const JOB_DESCRIPTION_FIELD: &str = "job_description";
const RESUMES_FIELD: &str = "resumes";
const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// POST /api/analyze
pub async fn handle_analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalysisResult>, AppError> {
    let mut job_description = String::new();
    let mut uploads = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some(JOB_DESCRIPTION_FIELD) => job_description = field.text().await?,
            Some(RESUMES_FIELD) => {
                let filename = field
                    .file_name()
                    .map(str::to_owned)
                    .unwrap_or_else(|| format!("resume-{}", uploads.len() + 1));
                let content_type = field
                    .content_type()
                    .unwrap_or(DEFAULT_CONTENT_TYPE)
                    .to_owned();
                let content = field.bytes().await?;
                uploads.push(ResumeUpload {
                    filename,
                    content_type,
                    content,
                });
            }
            other => debug!("Ignoring multipart field {other:?}"),
        }
    }

    if job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "job_description must not be empty".to_string(),
        ));
    }
    if uploads.is_empty() {
        return Err(AppError::Validation(
            "at least one resume file is required".to_string(),
        ));
    }

    let result = state
        .workflow
        .run_workflow(&job_description, uploads)
        .await?;
    Ok(Json(result))
}
