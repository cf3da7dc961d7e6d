// All LLM prompt constants and builders for the workflow stages.
// Reuses cross-cutting fragments from llm_client::prompts.

use crate::llm_client::prompts::{JSON_ARRAY_ONLY, JSON_OBJECT_ONLY};
use crate::models::evaluation::Assessment;
use crate::models::job::JobRequirements;
use crate::models::resume::ParsedResume;

/// Résumé text sent to the parse prompt.
pub const RESUME_PROMPT_CHARS: usize = 4000;
/// Résumé text retained on the parsed record.
pub const RESUME_SAMPLE_CHARS: usize = 2000;
/// Job description text sent to the analysis prompt.
pub const JOB_PROMPT_CHARS: usize = 3000;

const EVAL_SKILLS: usize = 10;
const EVAL_EXPERIENCE_ENTRIES: usize = 3;
const EVAL_RESPONSIBILITIES: usize = 3;

pub const RESUME_PARSE_SYSTEM: &str =
    "You are a resume parser. Extract key information from resumes and return it in JSON format. \
    Focus on concrete details, not just keywords. Look for evidence of actual work and accomplishments.";

const RESUME_PARSE_TEMPLATE: &str = r#"Parse this resume and extract the following information in JSON format:
{
  "name": "candidate name",
  "email": "email address",
  "phone": "phone number",
  "experience_years": number,
  "skills": ["list of skills with context"],
  "experience": ["list of work experiences with concrete details"],
  "education": ["educational background"],
  "projects": ["notable projects with outcomes"],
  "summary": "brief professional summary"
}

Resume text:
{resume_text}

{json_only}"#;

pub const JOB_ANALYSIS_SYSTEM: &str =
    "You are a job requirements analyzer. Extract key requirements from job descriptions. \
    Focus on must-have skills, experience levels, and important qualifications.";

const JOB_ANALYSIS_TEMPLATE: &str = r#"Analyze this job description and extract requirements in JSON format:
{
  "title": "job title",
  "experience_required": number of years,
  "required_skills": ["list of must-have skills"],
  "preferred_skills": ["nice-to-have skills"],
  "education_requirements": ["education requirements"],
  "key_responsibilities": ["main responsibilities"],
  "evaluation_criteria": ["what matters most for this role"]
}

Job Description:
{job_description}

{json_only}"#;

pub const EVALUATION_SYSTEM: &str = "You are an expert technical recruiter. Evaluate candidates based on:
1. DEPTH over keywords - look for concrete examples and achievements
2. RELEVANCE - how well experience matches the role
3. CONSISTENCY - check for logical career progression
4. RED FLAGS - identify vague claims or keyword stuffing

Score candidates objectively based on evidence, not just keyword matches.";

/// Replace: {name}, {email}, {job_title}, {job_years}, {required_skills},
///          {responsibilities}, {candidate_years}, {skills}, {experience}, {education}
const EVALUATION_TEMPLATE: &str = r#"Evaluate this candidate for the job and return a JSON evaluation:
{
  "name": "{name}",
  "email": "{email}",
  "score": total score (0-100),
  "breakdown": {
    "experience": score 0-30 (relevance and depth of experience),
    "skills": score 0-30 (technical skills match),
    "education": score 0-20 (educational fit),
    "overall_fit": score 0-20 (career trajectory, cultural fit)
  },
  "strengths": ["list 3-5 key strengths with specific examples"],
  "gaps": ["list 2-4 knowledge gaps or concerns"],
  "red_flags": ["any concerns about keyword stuffing or vague claims"],
  "reasoning": "detailed explanation of scoring with specific evidence"
}

Job Requirements:
- Title: {job_title}
- Experience: {job_years} years
- Required Skills: {required_skills}
- Key Responsibilities: {responsibilities}

Candidate Resume:
Name: {name}
Experience: {candidate_years} years
Skills: {skills}
Experience Details: {experience}
Education: {education}

IMPORTANT: Look for concrete examples and achievements, not just keyword lists.
Penalize vague claims without supporting details.

{json_only}"#;

pub const QUESTIONS_SYSTEM: &str = "You are an expert interviewer. Generate probing questions that:
1. Verify depth of claimed skills
2. Explore gaps or concerns
3. Assess problem-solving ability
4. Check cultural and role fit

Questions should be specific to the candidate's background.";

const QUESTIONS_TEMPLATE: &str = r#"Generate 5-7 targeted interview questions for this candidate.

Job: {job_title}
Candidate: {name}
Score: {score}/100
Strengths: {strengths}
Gaps: {gaps}

Return as a JSON array of strings:
["Question 1?", "Question 2?", ...]

Focus on:
- Verifying specific skills mentioned in their resume
- Exploring their knowledge gaps
- Understanding their problem-solving approach
- Assessing their fit for key responsibilities

{json_only}"#;

const NOT_AVAILABLE: &str = "N/A";
const UNKNOWN_NAME: &str = "Unknown";

pub fn resume_parse_prompt(resume_text: &str) -> String {
    fill_template(
        RESUME_PARSE_TEMPLATE,
        &[
            ("resume_text", truncate_chars(resume_text, RESUME_PROMPT_CHARS)),
            ("json_only", JSON_OBJECT_ONLY),
        ],
    )
}

pub fn job_analysis_prompt(job_description: &str) -> String {
    fill_template(
        JOB_ANALYSIS_TEMPLATE,
        &[
            ("job_description", truncate_chars(job_description, JOB_PROMPT_CHARS)),
            ("json_only", JSON_OBJECT_ONLY),
        ],
    )
}

/// Embeds a bounded projection of the requirements and the parsed résumé.
pub fn evaluation_prompt(requirements: &JobRequirements, resume: &ParsedResume) -> String {
    let fields = &resume.fields;
    let responsibilities: Vec<&str> = requirements
        .key_responsibilities
        .iter()
        .take(EVAL_RESPONSIBILITIES)
        .map(String::as_str)
        .collect();
    let skills: Vec<&str> = fields
        .skills
        .iter()
        .take(EVAL_SKILLS)
        .map(String::as_str)
        .collect();
    let experience: Vec<&str> = fields
        .experience
        .iter()
        .take(EVAL_EXPERIENCE_ENTRIES)
        .map(String::as_str)
        .collect();

    fill_template(
        EVALUATION_TEMPLATE,
        &[
            ("name", fields.name.as_deref().unwrap_or(UNKNOWN_NAME)),
            ("email", fields.email.as_deref().unwrap_or(NOT_AVAILABLE)),
            ("job_title", requirements.title.as_deref().unwrap_or(NOT_AVAILABLE)),
            ("job_years", format_number(requirements.experience_required).as_str()),
            ("required_skills", requirements.required_skills.join(", ").as_str()),
            ("responsibilities", responsibilities.join(", ").as_str()),
            ("candidate_years", format_number(fields.experience_years).as_str()),
            ("skills", skills.join(", ").as_str()),
            ("experience", experience.join(" | ").as_str()),
            ("education", fields.education.join(", ").as_str()),
            ("json_only", JSON_OBJECT_ONLY),
        ],
    )
}

pub fn questions_prompt(job_title: Option<&str>, name: Option<&str>, assessment: &Assessment) -> String {
    fill_template(
        QUESTIONS_TEMPLATE,
        &[
            ("job_title", job_title.unwrap_or(NOT_AVAILABLE)),
            ("name", name.unwrap_or(UNKNOWN_NAME)),
            ("score", format_number(assessment.score).as_str()),
            ("strengths", assessment.strengths.join(", ").as_str()),
            ("gaps", assessment.gaps.join(", ").as_str()),
            ("json_only", JSON_ARRAY_ONLY),
        ],
    )
}

/// Substitutes `{key}` markers in one left-to-right pass.
///
/// Substituted values are never rescanned, so model or candidate text containing
/// `{name}` stays literal. Braces that do not form a known marker are copied as-is.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let marker = values.iter().find(|(key, _)| {
            after
                .strip_prefix(key)
                .is_some_and(|tail| tail.starts_with('}'))
        });
        match marker {
            Some((key, value)) => {
                out.push_str(value);
                rest = &after[key.len() + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Longest prefix of at most `max_chars` characters, cut on a char boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

/// Renders `7.0` as `7`, `2.5` as `2.5`, absent as `N/A`.
fn format_number(value: Option<f64>) -> String {
    match value {
        Some(v) if v.fract() == 0.0 => format!("{}", v as i64),
        Some(v) => v.to_string(),
        None => NOT_AVAILABLE.to_string(),
    }
}
