//! Evaluate stage: scores each parsed résumé against the job requirements.
//!
//! Produces exactly one evaluation per résumé, in résumé order. Résumés that
//! failed to parse are forwarded as failed evaluations without a model call.

use async_trait::async_trait;
use tracing::{info, warn};

use crate::llm_client::GenerativeModel;
use crate::models::evaluation::{CandidateEvaluation, EvaluationOutcome, EvaluationReply};
use crate::models::resume::{ParsedResume, ResumeRecord};
use crate::workflow::extract::extract_json_object;
use crate::workflow::fanout::fan_out;
use crate::workflow::prompts::{evaluation_prompt, EVALUATION_SYSTEM};
use crate::workflow::stage::{
    request_json, ItemError, Stage, StageContext, StageError, ANALYZE_JOB, EVALUATE_CANDIDATES,
    PARSE_RESUMES,
};
use crate::workflow::state::WorkflowState;

/// Identity of a résumé being evaluated, kept outside the task for panic recovery.
#[derive(Clone)]
struct Candidate {
    filename: String,
    name: Option<String>,
    email: Option<String>,
}

pub struct EvaluateCandidates {
    ctx: StageContext,
}

impl EvaluateCandidates {
    pub fn new(ctx: StageContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl Stage for EvaluateCandidates {
    fn name(&self) -> &'static str {
        EVALUATE_CANDIDATES
    }

    fn depends_on(&self) -> &'static [&'static str] {
        &[PARSE_RESUMES, ANALYZE_JOB]
    }

    async fn run(&self, state: &mut WorkflowState) -> Result<(), StageError> {
        let requirements = state.requirements();
        let mut evaluations: Vec<Option<CandidateEvaluation>> = vec![None; state.resumes.len()];
        let mut jobs = Vec::new();

        for (i, record) in state.resumes.iter().enumerate() {
            match record {
                ResumeRecord::Parsed(resume) => {
                    let prompt = evaluation_prompt(&requirements, resume);
                    jobs.push((i, candidate_of(resume), prompt));
                }
                ResumeRecord::Failed(failure) => {
                    evaluations[i] = Some(CandidateEvaluation::failed(
                        failure.filename.clone(),
                        None,
                        failure.error.clone(),
                    ));
                }
                ResumeRecord::Pending(raw) => {
                    evaluations[i] = Some(CandidateEvaluation::failed(
                        raw.filename.clone(),
                        None,
                        "resume was never parsed",
                    ));
                }
            }
        }

        info!(
            "Evaluating {} candidates ({} forwarded as failed)",
            jobs.len(),
            state.resumes.len() - jobs.len()
        );

        let slots: Vec<(usize, Candidate)> =
            jobs.iter().map(|(i, c, _)| (*i, c.clone())).collect();
        let model = self.ctx.model.clone();
        let results = fan_out(jobs, self.ctx.concurrency, move |(_, candidate, prompt)| {
            let model = model.clone();
            async move { evaluate_candidate(model.as_ref(), candidate, &prompt).await }
        })
        .await;

        for ((slot, candidate), result) in slots.into_iter().zip(results) {
            evaluations[slot] = Some(result.unwrap_or_else(|join_error| {
                failed(candidate, ItemError::TaskFailed(join_error.to_string()))
            }));
        }

        state.candidate_evaluations = evaluations
            .into_iter()
            .zip(&state.resumes)
            .map(|(evaluation, record)| {
                evaluation.unwrap_or_else(|| {
                    CandidateEvaluation::failed(record.filename(), None, "evaluation did not run")
                })
            })
            .collect();
        Ok(())
    }
}

fn candidate_of(resume: &ParsedResume) -> Candidate {
    Candidate {
        filename: resume.filename.clone(),
        name: resume.fields.name.clone(),
        email: resume.fields.email.clone(),
    }
}

async fn evaluate_candidate(
    model: &dyn GenerativeModel,
    candidate: Candidate,
    prompt: &str,
) -> CandidateEvaluation {
    match request_json::<EvaluationReply>(model, prompt, EVALUATION_SYSTEM, extract_json_object)
        .await
    {
        Ok(reply) => CandidateEvaluation {
            filename: candidate.filename,
            name: reply.name.or(candidate.name),
            email: reply.email.or(candidate.email),
            outcome: EvaluationOutcome::Scored(reply.assessment),
        },
        Err(e) => failed(candidate, e),
    }
}

fn failed(candidate: Candidate, error: ItemError) -> CandidateEvaluation {
    warn!("Evaluation of {} failed: {error}", candidate.filename);
    CandidateEvaluation::failed(
        candidate.filename,
        Some(candidate.name.unwrap_or_else(|| "Unknown".to_string())),
        error.to_string(),
    )
}
