// ==========================================
// 确定性用量解析引擎 - 解析请求 / 解析结果
// ==========================================
// 职责: 定义单条解析的输入输出结构
// 红线: 输入为瞬态对象,不持久化
// 红线: 失败结果 confidence 必须为 low
// ==========================================

use crate::domain::types::{Confidence, MaterialCategory, ResolutionMethod};
use crate::engine::error::ResolveError;
use serde::{Deserialize, Serialize};

/// 默认损耗百分比
pub const DEFAULT_WASTE_PERCENT: f64 = 10.0;

// ==========================================
// QuantityResolverInput - 解析请求
// ==========================================
/// 单条解析请求
///
/// 两种请求形态由 base_area 是否存在区分:
/// - 有 base_area: 面积驱动,按覆盖率换算材料用量
/// - 无 base_area: input_value 已是材料用量,直接透传
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantityResolverInput {
    /// 原始数值（必须有限且 ≥ 0）
    pub input_value: f64,

    /// 原始单位（面积驱动时为面积单位）
    #[serde(default)]
    pub input_unit: String,

    /// 材料名称（用于类别推断）
    pub material_name: String,

    /// 损耗百分比（0~100，缺省取配置默认值）
    #[serde(default)]
    pub waste_percent: Option<f64>,

    /// 基准面积
    #[serde(default)]
    pub base_area: Option<f64>,

    /// 上游测量置信度（AI 估算时携带，V2 结果不会高于它）
    #[serde(default)]
    pub source_confidence: Option<Confidence>,
}

impl QuantityResolverInput {
    /// 材料用量请求（透传形态）
    pub fn quantity(material_name: &str, input_value: f64, input_unit: &str) -> Self {
        Self {
            input_value,
            input_unit: input_unit.to_string(),
            material_name: material_name.to_string(),
            waste_percent: None,
            base_area: None,
            source_confidence: None,
        }
    }

    /// 面积驱动请求
    pub fn area(material_name: &str, base_area: f64, area_unit: &str) -> Self {
        Self {
            input_value: base_area,
            input_unit: area_unit.to_string(),
            material_name: material_name.to_string(),
            waste_percent: None,
            base_area: Some(base_area),
            source_confidence: None,
        }
    }

    pub fn with_waste_percent(mut self, waste_percent: f64) -> Self {
        self.waste_percent = Some(waste_percent);
        self
    }

    /// 是否为面积驱动请求
    pub fn is_area_driven(&self) -> bool {
        self.base_area.is_some()
    }
}

// ==========================================
// AiMeasurement - AI 测量结果（外部生产方）
// ==========================================
/// AI 图片/图纸分析给出的原始测量
///
/// 视为不可信输入,转换后仍需经过解析器校验
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiMeasurement {
    pub total_area: f64,
    #[serde(default)]
    pub unit: String,
    pub confidence: Confidence,
}

impl AiMeasurement {
    /// 转换为面积驱动的解析请求
    pub fn into_input(self, material_name: &str, waste_percent: Option<f64>) -> QuantityResolverInput {
        QuantityResolverInput {
            input_value: self.total_area,
            input_unit: self.unit,
            material_name: material_name.to_string(),
            waste_percent,
            base_area: Some(self.total_area),
            source_confidence: Some(self.confidence),
        }
    }
}

// ==========================================
// QuantityResolverOutput - 解析结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantityResolverOutput {
    pub success: bool,

    /// 净用量（不含损耗）
    pub resolved_quantity: Option<f64>,
    pub resolved_unit: Option<String>,

    /// 毛用量（含损耗，向上取整）
    pub gross_quantity: Option<f64>,

    pub resolution_method: Option<ResolutionMethod>,
    pub confidence: Confidence,

    /// 推断出的类别（V1 不推断）
    pub category: Option<MaterialCategory>,

    /// 计算过程（审计用，成功时必非空）
    pub calculation_trace: String,

    pub error: Option<ResolveError>,
}

impl QuantityResolverOutput {
    /// 构造失败结果（confidence 强制为 low）
    pub fn failure(error: ResolveError, calculation_trace: String) -> Self {
        Self {
            success: false,
            resolved_quantity: None,
            resolved_unit: None,
            gross_quantity: None,
            resolution_method: None,
            confidence: Confidence::Low,
            category: None,
            calculation_trace,
            error: Some(error),
        }
    }

    /// 错误描述文本
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(|e| e.to_string())
    }
}
