//! Static clinical vocabulary shared by the rule engine, validator and
//! keyword presenter. Everything here is built once and only read afterwards.

use lazy_static::lazy_static;
use regex::Regex;

/// Colloquial phrase → canonical clinical term, in table order.
///
/// Every canonical term also maps to itself so an already normalized query
/// normalizes to the same terms again.
pub const TERM_MAPPING: &[(&str, &str)] = &[
    // symptoms
    ("鼻子不通气", "鼻塞"),
    ("鼻子堵", "鼻塞"),
    ("鼻塞", "鼻塞"),
    ("堵", "阻塞"),
    ("阻塞", "阻塞"),
    ("流鼻涕", "鼻溢"),
    ("鼻溢", "鼻溢"),
    ("发烧", "发热"),
    ("发热", "发热"),
    ("拉肚子", "腹泻"),
    ("腹泻", "腹泻"),
    ("头疼", "头痛"),
    ("头痛", "头痛"),
    ("头晕", "眩晕"),
    ("眩晕", "眩晕"),
    ("咳嗽", "咳嗽"),
    ("出血了", "出血"),
    ("出血", "出血"),
    ("痒", "瘙痒"),
    ("瘙痒", "瘙痒"),
    ("肿", "肿胀"),
    ("肿胀", "肿胀"),
    ("痛", "疼痛"),
    ("疼痛", "疼痛"),
    // treatment intent
    ("药物治疗", "药物治疗"),
    ("吃药", "药物治疗"),
    ("用药", "药物治疗"),
    ("吃什么药", "药物治疗"),
    ("吃啥药", "药物治疗"),
    ("用啥药", "药物治疗"),
    ("该用什么", "治疗"),
    ("怎么治疗", "治疗"),
    ("怎么办", "治疗"),
    ("咋治", "治疗"),
    ("咋整", "治疗"),
    ("咋弄", "治疗"),
    ("如何治", "治疗"),
    ("治疗", "治疗"),
    // diseases
    ("感冒", "上呼吸道感染"),
    ("上呼吸道感染", "上呼吸道感染"),
    ("鼻炎", "鼻炎"),
    ("鼻窦炎", "鼻窦炎"),
    ("过敏", "过敏反应"),
    ("过敏反应", "过敏反应"),
    ("肺炎", "肺炎"),
    ("胃炎", "胃炎"),
    ("肠炎", "肠炎"),
];

/// Canonical concept → concepts treated as equivalent to it. Stored one-way;
/// [`super::semantic::semantic_match`] checks both directions.
pub const SYNONYM_GROUPS: &[(&str, &[&str])] = &[
    ("鼻子堵", &["鼻塞", "堵", "堵了", "鼻子堵了", "鼻子不通气", "鼻子不通"]),
    ("鼻塞", &["鼻子堵", "堵"]),
    (
        "吃药",
        &["药物", "用药", "治疗", "吃什么药", "该用什么药", "该吃什么药", "应该吃什么药", "药物治疗"],
    ),
    ("治疗", &["用药", "吃药", "治疗", "咋治", "怎么办"]),
    ("流鼻涕", &["鼻溢", "流涕"]),
    ("感冒", &["上呼吸道感染", "伤风"]),
    ("发烧", &["发热"]),
    ("拉肚子", &["腹泻"]),
    ("头疼", &["头痛"]),
    ("头晕", &["眩晕"]),
];

/// Words in the leftover query text that signal the user wants treatment advice.
pub const TREATMENT_TRIGGERS: &[&str] = &["药", "治疗", "怎么办", "咋治", "应该"];

/// Appended by the rule engine when treatment intent is detected.
pub const CLINICAL_DIMENSIONS: &[&str] = &["诊断", "病因", "预防"];

/// Appended to a query the rule engine could not map at all.
pub const FALLBACK_SUFFIX: &str = " 治疗 诊断";

pub const MAX_NORMALIZED_TERMS: usize = 5;

/// Non-answers a generative rewrite tends to produce.
pub const GENERIC_PHRASES: &[&str] = &[
    "医生建议",
    "吃点什么",
    "怎么治疗",
    "怎么办",
    "看医生",
    "去医院",
    "治疗建议",
    "咨询医生",
];

/// Rewrites at least this long may contain a generic phrase.
pub const GENERIC_PHRASE_MAX_CHARS: usize = 20;

/// Words always shown as keywords.
pub const CLINICAL_ACTIONS: &[&str] = &["诊断", "治疗", "预防", "检查", "手术", "药物"];

pub const MAX_KEYWORDS: usize = 6;

const CLINICAL_SUFFIXES: &str =
    "炎|症|病|瘤|癌|征|畸形|损伤|感染|障碍|功能不全|衰竭|出血|梗死|栓塞|痛|痒|肿|胀|晕|麻";

const CLINICAL_PREFIXES: &str = "超|亚|急|慢|特|原|继|反|再";

const CLINICAL_VOCABULARY: &str =
    "药物|治疗|诊断|病因|预防|并发症|手术|护理|康复|检查|疗法|方案";

lazy_static! {
    /// Colloquial phrases by descending character length; ties keep table order.
    pub static ref TERMS_LONGEST_FIRST: Vec<(&'static str, &'static str)> = {
        let mut terms = TERM_MAPPING.to_vec();
        terms.sort_by_key(|(phrase, _)| std::cmp::Reverse(phrase.chars().count()));
        terms
    };

    pub static ref PUNCTUATION: Regex = Regex::new(r"[^\w\s]").expect("valid punctuation regex");

    pub static ref CLINICAL_SUFFIX: Regex =
        Regex::new(&format!("(?:{CLINICAL_SUFFIXES})")).expect("valid suffix regex");

    pub static ref CLINICAL_PREFIX_SUFFIX: Regex =
        Regex::new(&format!("^(?:{CLINICAL_PREFIXES}).*(?:{CLINICAL_SUFFIXES})"))
            .expect("valid prefix regex");

    pub static ref ACRONYM: Regex = Regex::new(r"^[A-Z]{2,}$").expect("valid acronym regex");

    /// A word ending in a disease or symptom class suffix, or a clinical action word.
    pub static ref MEDICAL_TERM_PATTERNS: [Regex; 2] = [
        Regex::new(&format!(r"\b\w*(?:{CLINICAL_SUFFIXES})\b")).expect("valid term regex"),
        Regex::new(&format!(r"\b(?:{CLINICAL_VOCABULARY})\w*\b")).expect("valid vocabulary regex"),
    ];
}
