

pub mod context;
pub mod generator;

pub use context::{build_answer_prompt, build_context};
pub use generator::{AnswerGenerator, AnswerStream};
