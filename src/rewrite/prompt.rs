

pub const SYSTEM_PROMPT: &str =
    "你是医学文献检索助手，负责把用户的口语化医学问题改写为专业的检索查询。只输出改写结果，不要解释。";

/// Labels a model tends to echo in front of its answer.
const ECHOED_LABELS: &[&str] = &["优化：", "结果：", "优化:", "结果:", "Optimized:", "Result:"];


pub fn build_rewrite_prompt(query: &str) -> String {
    format!(
        r#"作为医学AI检索助手，请优化以下查询以提高检索准确性。

**核心要求（必须遵守）：**
1. **必须保留**所有原始关键信息（疾病、症状、药物、治疗方式等）
2. **必须转换**口语化为专业医学术语（如"鼻子堵"→"鼻塞"）
3. **可以补充**相关医学维度（诊断、病因、预防等）
4. **禁止删除**任何原始信息或生成通用建议
5. **必须输出**专业医学查询，不能是通用回答

**合格示例：**
原始："鼻子堵了，该吃什么药？"
优化："鼻塞 药物治疗" ✓（保留了鼻塞和用药）

**失败示例：**
原始："鼻子堵了，该吃什么药？"
优化："医生建议吃点什么" ❌（丢失了所有关键信息）

**失败示例：**
原始："鼻子堵了，该吃什么药？"
优化："鼻塞" ❌（丢失了"药物治疗"信息）

**转换规则：**
- 鼻子堵/鼻塞 → 鼻塞
- 吃什么药/用药 → 药物治疗
- 鼻炎/鼻窦炎 → 鼻炎

请优化以下查询（只输出优化结果，不解释）：
---
原始："{query}"
优化："#
    )
}

/// First non-blank line of the raw completion with echoed labels removed.
pub fn clean_candidate(raw: &str) -> String {
    let first_line = raw.trim().lines().next().unwrap_or_default();
    let mut cleaned = first_line.to_string();
    for label in ECHOED_LABELS {
        cleaned = cleaned.replace(label, "");
    }
    cleaned
        .trim()
        .trim_matches(|c: char| matches!(c, '"' | '“' | '”'))
        .trim()
        .to_string()
}
