// ==========================================
// 确定性用量解析引擎 - 类别推断
// ==========================================
// 职责: 自由文本材料名 -> 已知类别 / unknown
// 规则: 按覆盖率表优先级逐条检查,首个命中即返回
//       (关键词越长越优先,等长按声明顺序)
// 红线: unknown 是合法终态,不是错误
// ==========================================
// 匹配等级:
// - Exact:     规范化名称与关键词完全一致(允许复数 s/es) -> high
// - Word:      关键词以完整单词序列出现在名称中           -> medium
// - Substring: 关键词仅作为某个单词的一部分出现           -> low
// ==========================================

use crate::domain::types::{Confidence, MaterialCategory};
use crate::engine::coverage_rate::{CoverageRate, CoverageRateTable};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    Exact,
    Word,
    Substring,
}

impl MatchKind {
    /// 匹配等级对应的置信度
    pub fn confidence(&self) -> Confidence {
        match self {
            MatchKind::Exact => Confidence::High,
            MatchKind::Word => Confidence::Medium,
            MatchKind::Substring => Confidence::Low,
        }
    }
}

impl fmt::Display for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchKind::Exact => write!(f, "exact match"),
            MatchKind::Word => write!(f, "word match"),
            MatchKind::Substring => write!(f, "partial match"),
        }
    }
}

/// 类别推断结果
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryMatch<'a> {
    pub category: MaterialCategory,
    pub entry: &'a CoverageRate,
    pub match_kind: MatchKind,
}

/// 名称规范化: 小写,非字母数字替换为空格,折叠空白
pub fn normalize_name(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// 单词匹配（允许复数后缀 s / es）
fn token_matches(name_token: &str, keyword_token: &str) -> bool {
    match name_token.strip_prefix(keyword_token) {
        Some(rest) => rest.is_empty() || rest == "s" || rest == "es",
        None => false,
    }
}

/// 判定单个关键词的匹配等级
fn classify(name: &str, name_tokens: &[&str], keyword: &str) -> Option<MatchKind> {
    let keyword_tokens: Vec<&str> = keyword.split(' ').collect();
    let k = keyword_tokens.len();

    if name_tokens.len() >= k {
        for start in 0..=(name_tokens.len() - k) {
            let run = &name_tokens[start..start + k];
            if run
                .iter()
                .zip(keyword_tokens.iter())
                .all(|(n, kw)| token_matches(n, kw))
            {
                return Some(if name_tokens.len() == k {
                    MatchKind::Exact
                } else {
                    MatchKind::Word
                });
            }
        }
    }

    if name.contains(keyword) {
        return Some(MatchKind::Substring);
    }

    None
}

/// 在指定覆盖率表中推断类别
///
/// 返回 None 表示 unknown
pub fn match_category<'a>(table: &'a CoverageRateTable, material_name: &str) -> Option<CategoryMatch<'a>> {
    let name = normalize_name(material_name);
    if name.is_empty() {
        return None;
    }
    let name_tokens: Vec<&str> = name.split(' ').collect();

    table.entries().iter().find_map(|entry| {
        classify(&name, &name_tokens, &entry.keyword).map(|match_kind| CategoryMatch {
            category: entry.category,
            entry,
            match_kind,
        })
    })
}

/// 使用标准覆盖率表推断类别
pub fn infer_category(material_name: &str) -> MaterialCategory {
    let table = CoverageRateTable::standard();
    infer_category_with(&table, material_name)
}

/// 使用指定覆盖率表推断类别
pub fn infer_category_with(table: &CoverageRateTable, material_name: &str) -> MaterialCategory {
    match_category(table, material_name)
        .map(|m| m.category)
        .unwrap_or(MaterialCategory::Unknown)
}
