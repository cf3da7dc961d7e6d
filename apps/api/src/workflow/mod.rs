pub mod analyze_job;
pub mod assembler;
pub mod engine;
pub mod evaluate;
pub mod extract;
pub mod fanout;
pub mod handlers;
pub mod parse_resumes;
pub mod pipeline;
pub mod prompts;
pub mod questions;
pub mod stage;
pub mod state;

#[cfg(test)]
pub(crate) mod fixtures;

pub use pipeline::HiringWorkflow;
