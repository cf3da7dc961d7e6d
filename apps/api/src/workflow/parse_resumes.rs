//! Parse stage: turns each résumé's raw text into structured fields.

use async_trait::async_trait;
use tracing::{info, warn};

use crate::llm_client::GenerativeModel;
use crate::models::resume::{ParsedResume, RawResume, ResumeFailure, ResumeFields, ResumeRecord};
use crate::workflow::extract::extract_json_object;
use crate::workflow::fanout::fan_out;
use crate::workflow::prompts::{
    resume_parse_prompt, truncate_chars, RESUME_PARSE_SYSTEM, RESUME_SAMPLE_CHARS,
};
use crate::workflow::stage::{
    request_json, ItemError, Stage, StageContext, StageError, PARSE_RESUMES,
};
use crate::workflow::state::WorkflowState;

pub struct ParseResumes {
    ctx: StageContext,
}

impl ParseResumes {
    pub fn new(ctx: StageContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl Stage for ParseResumes {
    fn name(&self) -> &'static str {
        PARSE_RESUMES
    }

    async fn run(&self, state: &mut WorkflowState) -> Result<(), StageError> {
        let pending: Vec<(usize, RawResume)> = state
            .resumes
            .iter()
            .enumerate()
            .filter_map(|(i, record)| match record {
                ResumeRecord::Pending(raw) => Some((i, raw.clone())),
                _ => None,
            })
            .collect();

        info!("Parsing {} resumes", pending.len());

        let (slots, raws): (Vec<usize>, Vec<RawResume>) = pending.into_iter().unzip();
        let fallbacks: Vec<RawResume> = raws.clone();

        let model = self.ctx.model.clone();
        let results = fan_out(raws, self.ctx.concurrency, move |raw| {
            let model = model.clone();
            async move { parse_resume(model.as_ref(), raw).await }
        })
        .await;

        for ((slot, fallback), result) in slots.into_iter().zip(fallbacks).zip(results) {
            state.resumes[slot] = result.unwrap_or_else(|join_error| {
                failed(fallback, ItemError::TaskFailed(join_error.to_string()))
            });
        }

        let failures = state.resumes.iter().filter(|r| r.is_failed()).count();
        info!(
            "Parsed {} resumes ({} failed)",
            state.resumes.len() - failures,
            failures
        );
        Ok(())
    }
}

/// Parses one résumé. Never fails: errors become the record's `Failed` variant.
pub async fn parse_resume(model: &dyn GenerativeModel, raw: RawResume) -> ResumeRecord {
    let prompt = resume_parse_prompt(&raw.text);
    match request_json::<ResumeFields>(model, &prompt, RESUME_PARSE_SYSTEM, extract_json_object)
        .await
    {
        Ok(fields) => ResumeRecord::Parsed(ParsedResume {
            raw_text: truncate_chars(&raw.text, RESUME_SAMPLE_CHARS).to_string(),
            filename: raw.filename,
            fields,
        }),
        Err(e) => failed(raw, e),
    }
}

fn failed(raw: RawResume, error: ItemError) -> ResumeRecord {
    warn!("Resume {} could not be parsed: {error}", raw.filename);
    ResumeRecord::Failed(ResumeFailure {
        raw_text: truncate_chars(&raw.text, RESUME_SAMPLE_CHARS).to_string(),
        filename: raw.filename,
        error: error.to_string(),
    })
}
