use serde::{Deserialize, Serialize};

use crate::models::lenient;

/// Sub-scores. Expected ranges: experience 0–30, skills 0–30, education 0–20,
/// overall_fit 0–20, summing to the total. Neither is enforced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    #[serde(
        default,
        deserialize_with = "lenient::number",
        serialize_with = "lenient::serialize_number"
    )]
    pub experience: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient::number",
        serialize_with = "lenient::serialize_number"
    )]
    pub skills: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient::number",
        serialize_with = "lenient::serialize_number"
    )]
    pub education: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient::number",
        serialize_with = "lenient::serialize_number"
    )]
    pub overall_fit: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    /// Total score, 0–100.
    #[serde(
        default,
        deserialize_with = "lenient::number",
        serialize_with = "lenient::serialize_number"
    )]
    pub score: Option<f64>,
    #[serde(default, deserialize_with = "lenient::object")]
    pub breakdown: ScoreBreakdown,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub strengths: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub gaps: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub red_flags: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub reasoning: String,
    /// Set only by the question stage, never read from the evaluation reply.
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub interview_questions: Option<Vec<String>>,
}

/// The evaluation reply as the model writes it: identity echoed back alongside the assessment.
#[derive(Debug, Clone, Deserialize)]
pub struct EvaluationReply {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub email: Option<String>,
    #[serde(flatten)]
    pub assessment: Assessment,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EvaluationOutcome {
    Scored(Assessment),
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateEvaluation {
    pub filename: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(flatten)]
    pub outcome: EvaluationOutcome,
}

impl CandidateEvaluation {
    pub fn failed(filename: impl Into<String>, name: Option<String>, error: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            name,
            email: None,
            outcome: EvaluationOutcome::Failed {
                error: error.into(),
            },
        }
    }

    /// Score used for ranking: missing scores and failures count as 0.
    pub fn effective_score(&self) -> f64 {
        match &self.outcome {
            EvaluationOutcome::Scored(assessment) => assessment.score.unwrap_or(0.0),
            EvaluationOutcome::Failed { .. } => 0.0,
        }
    }

    pub fn assessment(&self) -> Option<&Assessment> {
        match &self.outcome {
            EvaluationOutcome::Scored(assessment) => Some(assessment),
            EvaluationOutcome::Failed { .. } => None,
        }
    }

    pub fn assessment_mut(&mut self) -> Option<&mut Assessment> {
        match &mut self.outcome {
            EvaluationOutcome::Scored(assessment) => Some(assessment),
            EvaluationOutcome::Failed { .. } => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, EvaluationOutcome::Failed { .. })
    }
}
