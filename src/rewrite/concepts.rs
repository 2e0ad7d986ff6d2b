

use super::lexicon::PUNCTUATION;

/// Salient tokens of `text`, in order.
///
/// Punctuation becomes a separator, so clauses of an unspaced CJK sentence
/// come out as separate concepts. Single-character tokens are dropped.
pub fn extract_concepts(text: &str) -> Vec<String> {
    PUNCTUATION
        .replace_all(text, " ")
        .split_whitespace()
        .filter(|token| token.chars().count() > 1)
        .map(str::to_string)
        .collect()
}
