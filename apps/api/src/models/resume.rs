use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::models::lenient;

/// One uploaded résumé file, as received from the client.
#[derive(Debug, Clone)]
pub struct ResumeUpload {
    pub filename: String,
    pub content_type: String,
    pub content: Bytes,
}

/// A résumé whose text has been extracted but not yet parsed.
#[derive(Debug, Clone, Serialize)]
pub struct RawResume {
    pub filename: String,
    #[serde(skip)]
    pub text: String,
}

/// Structured fields the parse stage asks the model for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeFields {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub phone: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::number",
        serialize_with = "lenient::serialize_number"
    )]
    pub experience_years: Option<f64>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub experience: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub education: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub projects: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub summary: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParsedResume {
    pub filename: String,
    #[serde(flatten)]
    pub fields: ResumeFields,
    /// Bounded prefix of the source text, kept for evaluation.
    pub raw_text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResumeFailure {
    pub filename: String,
    pub error: String,
    pub raw_text: String,
}

/// A résumé's position in the workflow. Exactly one shape at a time;
/// once `Failed`, no later stage touches it.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ResumeRecord {
    Pending(RawResume),
    Parsed(ParsedResume),
    Failed(ResumeFailure),
}

impl ResumeRecord {
    pub fn filename(&self) -> &str {
        match self {
            ResumeRecord::Pending(raw) => &raw.filename,
            ResumeRecord::Parsed(parsed) => &parsed.filename,
            ResumeRecord::Failed(failure) => &failure.filename,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ResumeRecord::Failed(_))
    }
}
