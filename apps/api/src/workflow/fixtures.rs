//! Canned model replies and state builders shared by the stage tests.

use crate::models::evaluation::{Assessment, CandidateEvaluation, EvaluationOutcome};
use crate::models::job::{JobAnalysis, JobRequirements};
use crate::models::resume::{ParsedResume, RawResume, ResumeFields, ResumeRecord};
use crate::workflow::state::WorkflowState;

pub const JOB_DESCRIPTION: &str = "Senior Rust Engineer. 5+ years building distributed systems \
    in Rust. Required: Rust, Tokio, PostgreSQL. You will own the ingestion pipeline.";

pub const RESUME_REPLY: &str = r#"Here is the parsed resume:
{
  "name": "Ada Lovelace",
  "email": "ada@example.com",
  "phone": "+44 20 7946 0000",
  "experience_years": 8,
  "skills": ["Rust - 5 years of production services", "Tokio", "PostgreSQL"],
  "experience": ["Staff Engineer, Analytical Engines (2019-2024): built event ingestion in Rust"],
  "education": ["BSc Mathematics, University of London"],
  "projects": ["Open-source difference engine simulator"],
  "summary": "Systems engineer focused on reliable data pipelines."
}"#;

pub const JOB_REPLY: &str = r#"{
  "title": "Senior Rust Engineer",
  "experience_required": 5,
  "required_skills": ["Rust", "Tokio", "PostgreSQL"],
  "preferred_skills": ["Kubernetes"],
  "education_requirements": [],
  "key_responsibilities": ["Own the ingestion pipeline"],
  "evaluation_criteria": ["Production Rust experience"]
}"#;

pub const EVALUATION_REPLY: &str = r#"```json
{
  "name": "Ada Lovelace",
  "email": "ada@example.com",
  "score": 84,
  "breakdown": {"experience": 27, "skills": 26, "education": 15, "overall_fit": 16},
  "strengths": ["Production Rust ingestion", "Async expertise", "Mentoring"],
  "gaps": ["No Kubernetes", "Limited frontend"],
  "red_flags": [],
  "reasoning": "Concrete evidence of building the exact system the role owns."
}
```"#;

pub const QUESTIONS_REPLY: &str = r#"[
  "Walk me through the backpressure design of your ingestion pipeline.",
  "How did you size Tokio worker pools in production?",
  "What would you need to learn to operate services on Kubernetes?",
  "Describe a PostgreSQL performance issue you diagnosed.",
  "How do you mentor engineers new to Rust?"
]"#;

pub fn raw(filename: &str, text: &str) -> RawResume {
    RawResume {
        filename: filename.to_string(),
        text: text.to_string(),
    }
}

pub fn parsed(filename: &str, name: &str) -> ResumeRecord {
    ResumeRecord::Parsed(ParsedResume {
        filename: filename.to_string(),
        fields: ResumeFields {
            name: Some(name.to_string()),
            email: Some(format!("{}@example.com", name.to_lowercase())),
            experience_years: Some(6.0),
            skills: vec!["Rust".to_string()],
            ..Default::default()
        },
        raw_text: format!("{name} resume text"),
    })
}

pub fn requirements() -> JobAnalysis {
    JobAnalysis::Requirements(JobRequirements {
        title: Some("Senior Rust Engineer".to_string()),
        experience_required: Some(5.0),
        required_skills: vec!["Rust".to_string()],
        ..Default::default()
    })
}

pub fn scored(filename: &str, score: Option<f64>) -> CandidateEvaluation {
    CandidateEvaluation {
        filename: filename.to_string(),
        name: Some(filename.trim_end_matches(".pdf").to_string()),
        email: None,
        outcome: EvaluationOutcome::Scored(Assessment {
            score,
            strengths: vec!["Rust".to_string()],
            gaps: vec!["Kubernetes".to_string()],
            ..Default::default()
        }),
    }
}

pub fn state_with(resumes: Vec<ResumeRecord>) -> WorkflowState {
    let mut state = WorkflowState::new(JOB_DESCRIPTION, vec![]);
    state.resumes = resumes;
    state
}
