use crate::models::evaluation::CandidateEvaluation;
use crate::models::job::{JobAnalysis, JobRequirements};
use crate::models::resume::{RawResume, ResumeRecord};

/// The record threaded through every stage of one workflow run.
///
/// Each stage owns one field: parse rewrites `resumes` slot by slot, analyze sets
/// `job_analysis`, evaluate fills `candidate_evaluations` (one per résumé, same order),
/// questions mutates those evaluations in place.
#[derive(Debug, Clone)]
pub struct WorkflowState {
    job_description: String,
    pub resumes: Vec<ResumeRecord>,
    pub job_analysis: Option<JobAnalysis>,
    pub candidate_evaluations: Vec<CandidateEvaluation>,
}

impl WorkflowState {
    pub fn new(job_description: impl Into<String>, resumes: Vec<RawResume>) -> Self {
        Self {
            job_description: job_description.into(),
            resumes: resumes.into_iter().map(ResumeRecord::Pending).collect(),
            job_analysis: None,
            candidate_evaluations: Vec::new(),
        }
    }

    pub fn job_description(&self) -> &str {
        &self.job_description
    }

    /// Requirements to evaluate against; empty when analysis failed or has not run.
    pub fn requirements(&self) -> JobRequirements {
        self.job_analysis
            .as_ref()
            .and_then(JobAnalysis::requirements)
            .cloned()
            .unwrap_or_default()
    }
}
