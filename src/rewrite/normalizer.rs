//! Deterministic colloquial → clinical rewrite. This is the safety net every
//! failed model rewrite falls back to, so it has no failure modes.

use tracing::debug;

use super::lexicon::{
    CLINICAL_DIMENSIONS, FALLBACK_SUFFIX, MAX_NORMALIZED_TERMS, TERMS_LONGEST_FIRST,
    TREATMENT_TRIGGERS,
};
use crate::utils::safe_truncate;

/// Rewrites `query` into space-separated clinical terms. Never returns an empty string.
pub fn normalize_query(query: &str) -> String {
    let mut remaining = query.to_string();
    let mut terms: Vec<&'static str> = Vec::new();

    // Longer phrases first; consuming them keeps nested short phrases from matching again.
    for (phrase, canonical) in TERMS_LONGEST_FIRST.iter() {
        if remaining.contains(phrase) {
            if !terms.contains(canonical) {
                terms.push(*canonical);
            }
            remaining = remaining.replace(phrase, "");
        }
    }

    let treatment_intent = TREATMENT_TRIGGERS.iter().any(|t| remaining.contains(t));

    let result = if terms.is_empty() {
        // The markers map on a later pass, so intent left in the raw text must
        // bring its dimensions now.
        let mut fallback = format!("{remaining}{FALLBACK_SUFFIX}");
        if treatment_intent {
            for dimension in CLINICAL_DIMENSIONS {
                if !FALLBACK_SUFFIX.split_whitespace().any(|marker| marker == *dimension) {
                    fallback.push(' ');
                    fallback.push_str(dimension);
                }
            }
        }
        fallback
    } else {
        if treatment_intent {
            terms.extend_from_slice(CLINICAL_DIMENSIONS);
        }
        terms.truncate(MAX_NORMALIZED_TERMS);
        terms.join(" ")
    };

    debug!("Rule-based rewrite: '{}' -> '{}'", safe_truncate(query, 80), result);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn term_set(text: &str) -> HashSet<String> {
        text.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn test_cold_with_medication_question() {
        let result = normalize_query("我感冒了，流鼻涕，鼻子不通气，应该吃什么药？");
        let terms: Vec<&str> = result.split(' ').collect();
        assert_eq!(terms.len(), 5);
        for expected in ["上呼吸道感染", "鼻溢", "鼻塞", "药物治疗", "诊断"] {
            assert!(terms.contains(&expected), "missing {expected} in {result}");
        }
        assert_eq!(result, "鼻塞 药物治疗 鼻溢 上呼吸道感染 诊断");
    }

    #[test]
    fn test_longest_phrase_wins() {
        assert_eq!(normalize_query("鼻子堵了"), "鼻塞");
        assert_eq!(normalize_query("血管堵了"), "阻塞");
    }

    #[test]
    fn test_dimensions_follow_unconsumed_treatment_words() {
        assert_eq!(normalize_query("鼻炎治疗方法"), "治疗 鼻炎");
        assert_eq!(normalize_query("胃炎需要药吗"), "胃炎 诊断 病因 预防");
    }

    #[test]
    fn test_duplicates_collapse() {
        assert_eq!(normalize_query("头疼，头痛"), "头痛");
    }

    #[test]
    fn test_unmapped_query_gets_generic_markers() {
        assert_eq!(normalize_query("视力模糊"), "视力模糊 治疗 诊断");
        assert_eq!(normalize_query(""), " 治疗 诊断");
    }

    #[test]
    fn test_unmapped_query_with_treatment_intent_gets_dimensions() {
        assert_eq!(normalize_query("视力模糊应该"), "视力模糊应该 治疗 诊断 病因 预防");
        assert_eq!(
            normalize_query("眼睛干涩要上药吗"),
            "眼睛干涩要上药吗 治疗 诊断 病因 预防"
        );
    }

    #[test]
    fn test_casual_drug_questions_map_to_medication() {
        assert_eq!(normalize_query("眼睛干涩用啥药"), "药物治疗");
        assert_eq!(normalize_query("鼻炎吃啥药"), "药物治疗 鼻炎");
    }

    #[test]
    fn test_never_empty() {
        for query in ["", " ", "？", "abc", "鼻塞", "痛痛痛", "\n\t"] {
            assert!(!normalize_query(query).is_empty(), "empty for {query:?}");
        }
    }

    #[test]
    fn test_second_pass_adds_nothing_new() {
        for query in [
            "我感冒了，流鼻涕，鼻子不通气，应该吃什么药？",
            "头疼怎么办",
            "鼻子堵了，该吃什么药？",
            "过敏了，皮肤痒，肿了",
            "拉肚子发烧咋治",
            "视力模糊",
            "眼睛干涩用啥药",
            "眼睛干涩要上药吗",
            "视力模糊应该",
            "",
        ] {
            let first = normalize_query(query);
            let second = normalize_query(&first);
            assert!(
                term_set(&second).is_subset(&term_set(&first)),
                "{query}: '{second}' is not within '{first}'"
            );
        }
    }
}
