//! Stage contract shared by every step of the workflow graph.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::llm_client::{Deadline, GenerativeModel, LlmError};
use crate::workflow::extract::ExtractError;
use crate::workflow::state::WorkflowState;

pub const PARSE_RESUMES: &str = "parse_resumes";
pub const ANALYZE_JOB: &str = "analyze_job";
pub const EVALUATE_CANDIDATES: &str = "evaluate_candidates";
pub const GENERATE_QUESTIONS: &str = "generate_questions";

/// A failure that aborts the whole run. Stages return this only when the state
/// they were handed breaks their input contract; per-item failures never surface here.
#[derive(Debug, Error)]
pub enum StageError {
    #[error("stage '{stage}' received inconsistent state: {reason}")]
    InconsistentState { stage: &'static str, reason: String },
}

/// Why a single unit of work (one résumé, one evaluation) failed.
/// Always converted into that item's error variant at the item boundary.
#[derive(Debug, Error)]
pub enum ItemError {
    #[error("{0}")]
    ExternalService(#[from] LlmError),

    #[error("{0}")]
    Extraction(#[from] ExtractError),

    #[error("reply did not match the expected shape: {0}")]
    SchemaMismatch(#[from] serde_json::Error),

    #[error("task failed: {0}")]
    TaskFailed(String),
}

/// Dependencies injected into every stage.
#[derive(Clone)]
pub struct StageContext {
    pub model: Arc<dyn GenerativeModel>,
    /// Maximum in-flight model calls within one stage.
    pub concurrency: usize,
}

impl StageContext {
    pub fn new(model: Arc<dyn GenerativeModel>, concurrency: usize) -> Self {
        Self {
            model,
            concurrency: concurrency.max(1),
        }
    }
    /// Every model call made through this context fails with a timeout once `limit` elapses.
    pub fn with_item_timeout(self, limit: Duration) -> Self {
        Self {
            model: Arc::new(Deadline::new(self.model, limit)),
            ..self
        }
    }
}

/// One node of the workflow graph.
#[async_trait]
pub trait Stage: Send + Sync {
    /// Unique within a graph.
    fn name(&self) -> &'static str;

    /// Stages that must complete before this one runs.
    fn depends_on(&self) -> &'static [&'static str] {
        &[]
    }

    async fn run(&self, state: &mut WorkflowState) -> Result<(), StageError>;
}

/// Calls the model, extracts the embedded JSON, and decodes it as `T`.
pub async fn request_json<T: DeserializeOwned>(
    model: &dyn GenerativeModel,
    prompt: &str,
    system: &str,
    extract: fn(&str) -> Result<Value, ExtractError>,
) -> Result<T, ItemError> {
    let reply = model.complete(prompt, Some(system)).await?;
    let value = extract(&reply)?;
    Ok(serde_json::from_value(value)?)
}
