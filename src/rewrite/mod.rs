//! Query rewriting: a model rewrite guarded by validation, with a
//! deterministic rule engine behind it.

pub mod concepts;
pub mod keywords;
pub mod lexicon;
pub mod models;
pub mod normalizer;
pub mod processor;
pub mod prompt;
pub mod semantic;
pub mod validator;

pub use concepts::extract_concepts;
pub use keywords::extract_medical_keywords;
pub use models::{RejectionReason, RewriteDecision, RewriteOutcome, RewriteSource};
pub use normalizer::normalize_query;
pub use processor::QueryRewriter;
pub use semantic::semantic_match;
pub use validator::validate_rewrite;
