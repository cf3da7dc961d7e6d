use serde::Serialize;

use crate::models::evaluation::CandidateEvaluation;
use crate::models::job::JobAnalysis;
use crate::workflow::state::WorkflowState;

/// The response body of an analysis run.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    pub job_analysis: JobAnalysis,
    pub candidates: Vec<CandidateEvaluation>,
}

/// Projects the final state into a ranked result.
///
/// Candidates are ordered by score, highest first. Failed evaluations and
/// missing scores count as 0; ties keep their batch order.
pub fn assemble(state: WorkflowState) -> AnalysisResult {
    let mut candidates = state.candidate_evaluations;
    // `sort_by` is stable.
    candidates.sort_by(|a, b| b.effective_score().total_cmp(&a.effective_score()));

    AnalysisResult {
        job_analysis: state.job_analysis.unwrap_or_else(|| JobAnalysis::Failed {
            error: "job analysis did not run".to_string(),
        }),
        candidates,
    }
}
