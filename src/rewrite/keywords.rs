

use super::lexicon::{ACRONYM, CLINICAL_ACTIONS, CLINICAL_PREFIX_SUFFIX, CLINICAL_SUFFIX, MAX_KEYWORDS};
use crate::utils::char_len;

/// Up to six display keywords from an accepted rewrite, in their original order.
/// Display only; retrieval always uses the full rewrite.
pub fn extract_medical_keywords(rewrite: &str) -> Vec<String> {
    rewrite
        .split_whitespace()
        .filter(|word| is_medical_keyword(word))
        .take(MAX_KEYWORDS)
        .map(str::to_string)
        .collect()
}

fn is_medical_keyword(word: &str) -> bool {
    (char_len(word) > 3 && CLINICAL_SUFFIX.is_match(word))
        || CLINICAL_PREFIX_SUFFIX.is_match(word)
        || ACRONYM.is_match(word)
        || CLINICAL_ACTIONS.contains(&word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_keyword_rule() {
        assert_eq!(extract_medical_keywords("上呼吸道感染"), vec!["上呼吸道感染"]);
        assert_eq!(extract_medical_keywords("急性胃炎"), vec!["急性胃炎"]);
        assert_eq!(extract_medical_keywords("慢痛"), vec!["慢痛"]);
        assert_eq!(extract_medical_keywords("DNA"), vec!["DNA"]);
        assert_eq!(extract_medical_keywords("诊断"), vec!["诊断"]);
    }

    #[test]
    fn test_short_terms_without_prefix_are_skipped() {
        assert!(extract_medical_keywords("鼻塞 胃炎 头痛").is_empty());
        assert!(extract_medical_keywords("Dna x A").is_empty());
    }

    #[test]
    fn test_keeps_order_of_rewrite() {
        assert_eq!(
            extract_medical_keywords("鼻塞 药物治疗 鼻溢 上呼吸道感染 诊断"),
            vec!["上呼吸道感染", "诊断"]
        );
    }

    #[test]
    fn test_at_most_six() {
        let rewrite = "诊断 治疗 预防 检查 手术 药物 CT MRI 慢性鼻窦炎";
        let keywords = extract_medical_keywords(rewrite);
        assert_eq!(keywords.len(), 6);
        assert_eq!(keywords[5], "药物");
        assert!(extract_medical_keywords("").is_empty());
    }
}
