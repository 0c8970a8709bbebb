// ==========================================
// 确定性用量解析引擎 - 领域类型定义
// ==========================================
// 红线: 置信度是"等级制",不是评分制
// 红线: 枚举序列化格式与下游预算消费方约定一致
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 置信度 (Confidence)
// ==========================================
// 顺序: Low < Medium < High
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,    // 需人工复核
    Medium, // 部分匹配 / 历史逻辑
    High,   // 精确匹配
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Confidence::Low => write!(f, "low"),
            Confidence::Medium => write!(f, "medium"),
            Confidence::High => write!(f, "high"),
        }
    }
}

// ==========================================
// 解析方式 (Resolution Method)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResolutionMethod {
    Passthrough,  // 直接透传用量(仅乘损耗)
    CoverageRate, // 面积 / 覆盖率
    Override,     // 人工覆写
}

impl fmt::Display for ResolutionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionMethod::Passthrough => write!(f, "passthrough"),
            ResolutionMethod::CoverageRate => write!(f, "coverage-rate"),
            ResolutionMethod::Override => write!(f, "override"),
        }
    }
}

// ==========================================
// 解析逻辑版本 (Resolver Version)
// ==========================================
// V1: 历史透传逻辑(切换时间之前创建的项目)
// V2: 覆盖率确定性逻辑
// 序列化为整数 1 / 2
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum ResolverVersion {
    V1,
    V2,
}

impl From<ResolverVersion> for u8 {
    fn from(version: ResolverVersion) -> Self {
        match version {
            ResolverVersion::V1 => 1,
            ResolverVersion::V2 => 2,
        }
    }
}

impl TryFrom<u8> for ResolverVersion {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(ResolverVersion::V1),
            2 => Ok(ResolverVersion::V2),
            other => Err(format!("unknown resolver version: {}", other)),
        }
    }
}

impl fmt::Display for ResolverVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolverVersion::V1 => write!(f, "V1"),
            ResolverVersion::V2 => write!(f, "V2"),
        }
    }
}

// ==========================================
// 覆写人角色 (Resolved By)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolvedBy {
    User,
    Foreman,
    Owner,
}

impl fmt::Display for ResolvedBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolvedBy::User => write!(f, "user"),
            ResolvedBy::Foreman => write!(f, "foreman"),
            ResolvedBy::Owner => write!(f, "owner"),
        }
    }
}

impl FromStr for ResolvedBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "user" => Ok(ResolvedBy::User),
            "foreman" => Ok(ResolvedBy::Foreman),
            "owner" => Ok(ResolvedBy::Owner),
            other => Err(format!("unknown resolved_by role: {}", other)),
        }
    }
}

// ==========================================
// 材料类别 (Material Category)
// ==========================================
// Unknown 是合法的终态分类,不是错误
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialCategory {
    Tile,
    Grout,
    Adhesive,
    Flooring,
    Carpet,
    Drywall,
    Paint,
    Insulation,
    Roofing,
    Underlayment,
    Siding,
    Sheathing,
    Concrete,
    Wallpaper,
    Unknown,
}

impl MaterialCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            MaterialCategory::Tile => "tile",
            MaterialCategory::Grout => "grout",
            MaterialCategory::Adhesive => "adhesive",
            MaterialCategory::Flooring => "flooring",
            MaterialCategory::Carpet => "carpet",
            MaterialCategory::Drywall => "drywall",
            MaterialCategory::Paint => "paint",
            MaterialCategory::Insulation => "insulation",
            MaterialCategory::Roofing => "roofing",
            MaterialCategory::Underlayment => "underlayment",
            MaterialCategory::Siding => "siding",
            MaterialCategory::Sheathing => "sheathing",
            MaterialCategory::Concrete => "concrete",
            MaterialCategory::Wallpaper => "wallpaper",
            MaterialCategory::Unknown => "unknown",
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, MaterialCategory::Unknown)
    }
}

impl Default for MaterialCategory {
    fn default() -> Self {
        MaterialCategory::Unknown
    }
}

impl fmt::Display for MaterialCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_ordering() {
        assert!(Confidence::Low < Confidence::Medium);
        assert!(Confidence::Medium < Confidence::High);
        assert_eq!(Confidence::High.min(Confidence::Low), Confidence::Low);
    }

    #[test]
    fn test_serde_formats() {
        assert_eq!(
            serde_json::to_string(&ResolutionMethod::CoverageRate).unwrap(),
            "\"coverage-rate\""
        );
        assert_eq!(serde_json::to_string(&Confidence::High).unwrap(), "\"high\"");
        assert_eq!(serde_json::to_string(&ResolvedBy::Foreman).unwrap(), "\"foreman\"");
        assert_eq!(serde_json::to_string(&ResolverVersion::V2).unwrap(), "2");

        let v: ResolverVersion = serde_json::from_str("1").unwrap();
        assert_eq!(v, ResolverVersion::V1);
        assert!(serde_json::from_str::<ResolverVersion>("3").is_err(), "只允许 1/2");
    }

    #[test]
    fn test_resolved_by_from_str() {
        assert_eq!("Owner".parse::<ResolvedBy>().unwrap(), ResolvedBy::Owner);
        assert!(" foreman ".parse::<ResolvedBy>().is_ok());
        assert!("admin".parse::<ResolvedBy>().is_err());
    }

    #[test]
    fn test_category_unknown_is_not_known() {
        assert!(!MaterialCategory::Unknown.is_known());
        assert!(MaterialCategory::Tile.is_known());
        assert_eq!(MaterialCategory::default().to_string(), "unknown");
    }
}
