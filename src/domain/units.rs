// ==========================================
// 确定性用量解析引擎 - 面积单位
// ==========================================
// 职责: 面积单位识别 + 换算为平方英尺
// 说明: 覆盖率表统一以平方英尺为基准面积单位
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

/// 1 平方米 = 10.7639104167 平方英尺
const SQ_FT_PER_SQ_M: f64 = 10.763_910_416_709_722;

/// 1 平方码 = 9 平方英尺
const SQ_FT_PER_SQ_YD: f64 = 9.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AreaUnit {
    #[serde(rename = "sq_ft")]
    SquareFeet,
    #[serde(rename = "sq_m")]
    SquareMeters,
    #[serde(rename = "sq_yd")]
    SquareYards,
}

impl AreaUnit {
    /// 识别面积单位写法（大小写/空格/下划线不敏感）
    ///
    /// 无法识别时返回 None,由调用方决定降级策略
    pub fn parse(raw: &str) -> Option<AreaUnit> {
        let key: String = raw
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '.' && *c != '-')
            .collect();

        match key.as_str() {
            "sqft" | "ft2" | "ft²" | "sf" | "squarefeet" | "squarefoot" => Some(AreaUnit::SquareFeet),
            "sqm" | "m2" | "m²" | "squaremeter" | "squaremeters" | "squaremetre" | "squaremetres" => {
                Some(AreaUnit::SquareMeters)
            }
            "sqyd" | "yd2" | "yd²" | "squareyard" | "squareyards" => Some(AreaUnit::SquareYards),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AreaUnit::SquareFeet => "sq_ft",
            AreaUnit::SquareMeters => "sq_m",
            AreaUnit::SquareYards => "sq_yd",
        }
    }

    /// 换算为平方英尺
    pub fn to_square_feet(&self, value: f64) -> f64 {
        match self {
            AreaUnit::SquareFeet => value,
            AreaUnit::SquareMeters => value * SQ_FT_PER_SQ_M,
            AreaUnit::SquareYards => value * SQ_FT_PER_SQ_YD,
        }
    }
}

impl Default for AreaUnit {
    fn default() -> Self {
        AreaUnit::SquareFeet
    }
}

impl fmt::Display for AreaUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
