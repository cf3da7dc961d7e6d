//! The hiring workflow: four stages wired into a graph and run per request.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::documents::extract_all;
use crate::llm_client::GenerativeModel;
use crate::models::resume::ResumeUpload;
use crate::workflow::analyze_job::AnalyzeJob;
use crate::workflow::assembler::{assemble, AnalysisResult};
use crate::workflow::engine::{GraphError, WorkflowEngine};
use crate::workflow::evaluate::EvaluateCandidates;
use crate::workflow::parse_resumes::ParseResumes;
use crate::workflow::questions::GenerateQuestions;
use crate::workflow::stage::{StageContext, StageError};
use crate::workflow::state::WorkflowState;

pub struct HiringWorkflow {
    engine: WorkflowEngine,
}

impl HiringWorkflow {
    /// `item_timeout` bounds each model call, so one stalled item fails on its own.
    pub fn new(
        model: Arc<dyn GenerativeModel>,
        concurrency: usize,
        item_timeout: Duration,
    ) -> Result<Self, GraphError> {
        let ctx = StageContext::new(model, concurrency).with_item_timeout(item_timeout);
        let engine = WorkflowEngine::builder()
            .stage(ParseResumes::new(ctx.clone()))
            .stage(AnalyzeJob::new(ctx.clone()))
            .stage(EvaluateCandidates::new(ctx.clone()))
            .stage(GenerateQuestions::new(ctx))
            .build()?;

        info!("Workflow graph: {}", engine.order().join(" -> "));
        Ok(Self { engine })
    }

    /// Runs one screening batch end to end.
    ///
    /// Produces one candidate per upload, whatever fails along the way. Only a
    /// broken stage contract returns `Err`.
    pub async fn run_workflow(
        &self,
        job_description: &str,
        uploads: Vec<ResumeUpload>,
    ) -> Result<AnalysisResult, StageError> {
        let run_id = Uuid::new_v4();
        let span = info_span!("workflow", %run_id, resumes = uploads.len());

        async move {
            let resumes = extract_all(uploads).await;
            let state = WorkflowState::new(job_description, resumes);
            let state = self.engine.run(state).await?;

            let result = assemble(state);
            let failed = result.candidates.iter().filter(|c| c.is_failed()).count();
            info!(
                "Workflow finished: {} candidates ({} failed)",
                result.candidates.len(),
                failed
            );
            Ok(result)
        }
        .instrument(span)
        .await
    }
}
