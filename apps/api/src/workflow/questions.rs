//! Question stage: attaches targeted interview questions to each scored evaluation.

use async_trait::async_trait;
use serde_json::Value;
use tracing::{info, warn};

use crate::llm_client::GenerativeModel;
use crate::models::lenient;
use crate::workflow::extract::extract_json_array;
use crate::workflow::fanout::fan_out;
use crate::workflow::prompts::{questions_prompt, QUESTIONS_SYSTEM};
use crate::workflow::stage::{
    request_json, ItemError, Stage, StageContext, StageError, EVALUATE_CANDIDATES,
    GENERATE_QUESTIONS,
};
use crate::workflow::state::WorkflowState;

pub struct GenerateQuestions {
    ctx: StageContext,
}

impl GenerateQuestions {
    pub fn new(ctx: StageContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl Stage for GenerateQuestions {
    fn name(&self) -> &'static str {
        GENERATE_QUESTIONS
    }

    fn depends_on(&self) -> &'static [&'static str] {
        &[EVALUATE_CANDIDATES]
    }

    async fn run(&self, state: &mut WorkflowState) -> Result<(), StageError> {
        if state.candidate_evaluations.len() != state.resumes.len() {
            return Err(StageError::InconsistentState {
                stage: GENERATE_QUESTIONS,
                reason: format!(
                    "{} evaluations for {} resumes",
                    state.candidate_evaluations.len(),
                    state.resumes.len()
                ),
            });
        }

        let job_title = state.requirements().title;
        let jobs: Vec<(usize, String)> = state
            .candidate_evaluations
            .iter()
            .enumerate()
            .filter_map(|(i, evaluation)| {
                evaluation.assessment().map(|assessment| {
                    let prompt =
                        questions_prompt(job_title.as_deref(), evaluation.name.as_deref(), assessment);
                    (i, prompt)
                })
            })
            .collect();

        info!("Generating interview questions for {} candidates", jobs.len());

        let slots: Vec<usize> = jobs.iter().map(|(i, _)| *i).collect();
        let model = self.ctx.model.clone();
        let results = fan_out(jobs, self.ctx.concurrency, move |(_, prompt)| {
            let model = model.clone();
            async move { generate_questions(model.as_ref(), &prompt).await }
        })
        .await;

        for (slot, result) in slots.into_iter().zip(results) {
            let evaluation = &mut state.candidate_evaluations[slot];
            let questions = result.unwrap_or_else(|join_error| {
                failure_note(&ItemError::TaskFailed(join_error.to_string()))
            });
            if let Some(assessment) = evaluation.assessment_mut() {
                assessment.interview_questions = Some(questions);
            }
        }
        Ok(())
    }
}

/// Always returns at least one entry: the questions, or a single note explaining the failure.
async fn generate_questions(model: &dyn GenerativeModel, prompt: &str) -> Vec<String> {
    match request_questions(model, prompt).await {
        Ok(questions) if questions.is_empty() => {
            warn!("Question generation returned an empty list");
            vec!["Error generating questions: model returned no questions".to_string()]
        }
        Ok(questions) => questions,
        Err(e) => {
            warn!("Question generation failed: {e}");
            failure_note(&e)
        }
    }
}

/// Entries that are objects or numbers are rendered as text; blank entries are dropped.
async fn request_questions(model: &dyn GenerativeModel, prompt: &str) -> Result<Vec<String>, ItemError> {
    let value: Value = request_json(model, prompt, QUESTIONS_SYSTEM, extract_json_array).await?;
    Ok(lenient::string_list(value)?)
}

fn failure_note(error: &ItemError) -> Vec<String> {
    vec![format!("Error generating questions: {error}")]
}
