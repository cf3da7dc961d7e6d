pub mod evaluation;
pub mod job;
pub mod lenient;
pub mod resume;
