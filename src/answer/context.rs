

use crate::retrieval::models::RetrievedDocument;
use crate::utils::{char_len, safe_truncate};

pub const MAX_CONTEXT_DOCUMENTS: usize = 3;
pub const MIN_DOCUMENT_CHARS: usize = 50;
pub const MAX_PREVIEW_CHARS: usize = 1000;
pub const MIN_CONTEXT_CHARS: usize = 100;

const UNTITLED: &str = "未知标题";
const SEPARATOR: &str = "\n\n---\n\n";

pub const ANSWER_SYSTEM_PROMPT: &str = "你是严谨的医学助手，只根据提供的文献回答问题。";

/// Reference block for the answer prompt. Near-empty documents are skipped but
/// keep their position number.
pub fn build_context(documents: &[RetrievedDocument]) -> String {
    documents
        .iter()
        .take(MAX_CONTEXT_DOCUMENTS)
        .enumerate()
        .filter(|(_, doc)| char_len(doc.content.trim()) > MIN_DOCUMENT_CHARS)
        .map(|(i, doc)| {
            format!(
                "文档{}《{}》：\n{}",
                i + 1,
                doc.title.as_deref().unwrap_or(UNTITLED),
                safe_truncate(&doc.content, MAX_PREVIEW_CHARS)
            )
        })
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

pub fn build_answer_prompt(context: &str, query: &str) -> String {
    format!(
        "基于以下医学文献，请详细回答用户问题。请提供完整、准确且易于理解的答案。\n\n\
         参考文献：\n{context}\n\n\
         用户问题：{query}\n\n\
         请提供简洁的医学解答：\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: &str, title: Option<&str>, content: &str) -> RetrievedDocument {
        let doc = RetrievedDocument::new(id, 0.9).with_content(content);
        match title {
            Some(title) => doc.with_title(title),
            None => doc,
        }
    }

    #[test]
    fn test_context_numbering_and_filtering() {
        let long = "鼻塞是上呼吸道感染的常见症状。".repeat(5);
        let documents = vec![
            doc("a", Some("感冒诊疗"), &long),
            doc("b", Some("短文"), "太短"),
            doc("c", None, &long),
            doc("d", Some("第四篇"), &long),
        ];
        let context = build_context(&documents);
        assert!(context.starts_with("文档1《感冒诊疗》：\n"));
        assert!(context.contains("文档3《未知标题》：\n"));
        assert!(!context.contains("文档2"));
        assert!(!context.contains("第四篇"));
        assert_eq!(context.matches(SEPARATOR).count(), 1);
    }

    #[test]
    fn test_preview_is_capped() {
        let documents = vec![doc("a", Some("长文"), &"炎".repeat(1500))];
        let context = build_context(&documents);
        assert_eq!(context.matches('炎').count(), MAX_PREVIEW_CHARS);
    }

    #[test]
    fn test_empty_documents_give_empty_context() {
        assert!(build_context(&[]).is_empty());
    }

    #[test]
    fn test_answer_prompt_layout() {
        let prompt = build_answer_prompt("文档1《x》：\n内容", "鼻塞 药物治疗");
        assert!(prompt.contains("参考文献：\n文档1《x》：\n内容\n\n用户问题：鼻塞 药物治疗\n\n"));
        assert!(prompt.ends_with("请提供简洁的医学解答：\n"));
    }
}
