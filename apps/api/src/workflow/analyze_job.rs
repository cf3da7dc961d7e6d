//! Analyze stage: extracts structured requirements from the job description.

use async_trait::async_trait;
use tracing::{info, warn};

use crate::llm_client::GenerativeModel;
use crate::models::job::{JobAnalysis, JobRequirements};
use crate::workflow::extract::extract_json_object;
use crate::workflow::prompts::{job_analysis_prompt, JOB_ANALYSIS_SYSTEM};
use crate::workflow::stage::{request_json, Stage, StageContext, StageError, ANALYZE_JOB};
use crate::workflow::state::WorkflowState;

pub struct AnalyzeJob {
    ctx: StageContext,
}

impl AnalyzeJob {
    pub fn new(ctx: StageContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl Stage for AnalyzeJob {
    fn name(&self) -> &'static str {
        ANALYZE_JOB
    }

    async fn run(&self, state: &mut WorkflowState) -> Result<(), StageError> {
        let analysis = analyze_job(self.ctx.model.as_ref(), state.job_description()).await;
        if let JobAnalysis::Requirements(requirements) = &analysis {
            info!(
                "Job analyzed: title={:?}, {} required skills",
                requirements.title,
                requirements.required_skills.len()
            );
        }
        state.job_analysis = Some(analysis);
        Ok(())
    }
}

/// Analyzes a job description. Never fails: errors become `JobAnalysis::Failed`.
pub async fn analyze_job(model: &dyn GenerativeModel, job_description: &str) -> JobAnalysis {
    let prompt = job_analysis_prompt(job_description);
    match request_json::<JobRequirements>(model, &prompt, JOB_ANALYSIS_SYSTEM, extract_json_object)
        .await
    {
        Ok(requirements) => JobAnalysis::Requirements(requirements),
        Err(e) => {
            warn!("Job analysis failed, continuing with empty requirements: {e}");
            JobAnalysis::Failed {
                error: e.to_string(),
            }
        }
    }
}
