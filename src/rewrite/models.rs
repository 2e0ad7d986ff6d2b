use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

/// Why a model rewrite was not used. Never surfaced to end users as an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RejectionReason {
    /// No generative provider configured, or rewriting switched off.
    GenerationUnavailable,
    GenerationFailure { message: String },
    ConceptLoss { missing: String },
    TooShort { original_chars: usize, rewritten_chars: usize },
    GenericPhrase { phrase: String },
    NoMedicalTerms,
}

impl RejectionReason {
    pub fn detail(&self) -> String {
        match self {
            Self::GenerationUnavailable => "generation unavailable".to_string(),
            Self::GenerationFailure { message } => format!("generation failed: {message}"),
            Self::ConceptLoss { missing } => format!("original concept '{missing}' lost"),
            Self::TooShort {
                original_chars,
                rewritten_chars,
            } => format!("rewrite too short: {rewritten_chars} of {original_chars} chars"),
            Self::GenericPhrase { phrase } => format!("generic phrase '{phrase}' in short rewrite"),
            Self::NoMedicalTerms => "no medical terms recognized".to_string(),
        }
    }
}

/// Outcome of one model rewrite attempt; both arms lead to a usable query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewriteDecision {
    Accepted(String),
    Rejected(RejectionReason),
}

impl RewriteDecision {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RewriteSource {
    Model,
    RuleFallback,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewriteOutcome {
    pub original: String,
    pub rewritten: String,
    pub source: RewriteSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection: Option<RejectionReason>,
    pub keywords: Vec<String>,
}
