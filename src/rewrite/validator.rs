//! Acceptance checks for a model-produced rewrite. Checks run in order and
//! the first failure rejects the candidate outright; nothing is patched up.

use super::concepts::extract_concepts;
use super::lexicon::{GENERIC_PHRASES, GENERIC_PHRASE_MAX_CHARS, MEDICAL_TERM_PATTERNS};
use super::models::{RejectionReason, RewriteDecision};
use super::semantic::semantic_match;
use crate::utils::char_len;

pub fn validate_rewrite(original: &str, candidate: &str) -> RewriteDecision {
    let checks: [fn(&str, &str) -> Result<(), RejectionReason>; 4] = [
        check_concepts_preserved,
        check_length,
        check_not_generic,
        check_medical_terms,
    ];

    for check in checks {
        if let Err(reason) = check(original, candidate) {
            return RewriteDecision::Rejected(reason);
        }
    }

    RewriteDecision::Accepted(candidate.to_string())
}

fn check_concepts_preserved(original: &str, candidate: &str) -> Result<(), RejectionReason> {
    let rewritten = extract_concepts(candidate);
    match extract_concepts(original)
        .into_iter()
        .find(|concept| !rewritten.iter().any(|r| semantic_match(concept, r)))
    {
        Some(missing) => Err(RejectionReason::ConceptLoss { missing }),
        None => Ok(()),
    }
}

/// At least half the original length must survive.
fn check_length(original: &str, candidate: &str) -> Result<(), RejectionReason> {
    let original_chars = char_len(original);
    let rewritten_chars = char_len(candidate);
    if rewritten_chars * 2 < original_chars {
        return Err(RejectionReason::TooShort {
            original_chars,
            rewritten_chars,
        });
    }
    Ok(())
}

/// Only short rewrites are held to the blacklist; a long one may quote a generic phrase.
fn check_not_generic(_original: &str, candidate: &str) -> Result<(), RejectionReason> {
    if char_len(candidate) >= GENERIC_PHRASE_MAX_CHARS {
        return Ok(());
    }
    match GENERIC_PHRASES.iter().find(|phrase| candidate.contains(*phrase)) {
        Some(phrase) => Err(RejectionReason::GenericPhrase {
            phrase: phrase.to_string(),
        }),
        None => Ok(()),
    }
}

fn check_medical_terms(_original: &str, candidate: &str) -> Result<(), RejectionReason> {
    if MEDICAL_TERM_PATTERNS.iter().any(|p| p.is_match(candidate)) {
        Ok(())
    } else {
        Err(RejectionReason::NoMedicalTerms)
    }
}
