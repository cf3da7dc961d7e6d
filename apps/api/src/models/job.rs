use serde::{Deserialize, Serialize};

use crate::models::lenient;

/// Requirements extracted from a job description by the analyze stage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobRequirements {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub title: Option<String>,
    /// Minimum years of experience.
    #[serde(
        default,
        deserialize_with = "lenient::number",
        serialize_with = "lenient::serialize_number"
    )]
    pub experience_required: Option<f64>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub required_skills: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub preferred_skills: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub education_requirements: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub key_responsibilities: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub evaluation_criteria: Vec<String>,
}

/// Outcome of job analysis. A failure does not stop the run: downstream
/// stages fall back to `JobRequirements::default()`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum JobAnalysis {
    Requirements(JobRequirements),
    Failed { error: String },
}

impl JobAnalysis {
    pub fn requirements(&self) -> Option<&JobRequirements> {
        match self {
            JobAnalysis::Requirements(requirements) => Some(requirements),
            JobAnalysis::Failed { .. } => None,
        }
    }
}
