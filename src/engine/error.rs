// ==========================================
// 确定性用量解析引擎 - 解析错误类型
// ==========================================
// 工具: thiserror 派生宏
// 红线: 解析错误只作为数据返回,不跨引擎边界抛出
// ==========================================

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 解析错误
///
/// Display 文本即为输出中的 error 描述,下游按原文展示
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum ResolveError {
    // ===== 输入校验 =====
    #[error("invalid input value")]
    InvalidInput(String),

    #[error("invalid waste percent")]
    InvalidWastePercent(String),

    // ===== 类别推断 =====
    #[error("unresolvable material category")]
    UnresolvableCategory(String),

    // ===== 人工覆写 =====
    #[error("invalid override quantity")]
    InvalidOverride(String),
}

/// 错误大类（对外分类口径）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolveErrorKind {
    InvalidInput,
    UnresolvableCategory,
}

impl ResolveError {
    pub fn kind(&self) -> ResolveErrorKind {
        match self {
            ResolveError::InvalidInput(_)
            | ResolveError::InvalidWastePercent(_)
            | ResolveError::InvalidOverride(_) => ResolveErrorKind::InvalidInput,
            ResolveError::UnresolvableCategory(_) => ResolveErrorKind::UnresolvableCategory,
        }
    }

    /// 错误细节（写入 calculation_trace 供审计）
    pub fn detail(&self) -> &str {
        match self {
            ResolveError::InvalidInput(d)
            | ResolveError::InvalidWastePercent(d)
            | ResolveError::UnresolvableCategory(d)
            | ResolveError::InvalidOverride(d) => d,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_stable_description() {
        let err = ResolveError::UnresolvableCategory("xyz".to_string());
        assert_eq!(err.to_string(), "unresolvable material category");
        assert_eq!(err.kind(), ResolveErrorKind::UnresolvableCategory);

        let err = ResolveError::InvalidInput("NaN".to_string());
        assert_eq!(err.to_string(), "invalid input value");
        assert_eq!(err.detail(), "NaN");
    }

    #[test]
    fn test_waste_and_override_errors_are_input_kind() {
        assert_eq!(
            ResolveError::InvalidWastePercent("150".to_string()).kind(),
            ResolveErrorKind::InvalidInput
        );
        assert_eq!(
            ResolveError::InvalidOverride("-1".to_string()).kind(),
            ResolveErrorKind::InvalidInput
        );
    }
}
