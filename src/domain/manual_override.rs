// ==========================================
// 确定性用量解析引擎 - 人工覆写胶囊
// ==========================================
// 职责: 记录人工指定用量及其来源
// 红线: 覆写只由调用方显式创建,解析器从不生成/修改覆写
// 红线: 覆写是终态,直到人工清除
// ==========================================

use crate::domain::quantity::QuantityResolverOutput;
use crate::domain::types::{Confidence, ResolutionMethod, ResolvedBy};
use crate::engine::error::ResolveError;
use crate::engine::rounding::{format_quantity, gross_with_waste};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManualOverride {
    pub override_id: Uuid,

    /// 恒为 true
    #[serde(rename = "override")]
    pub is_override: bool,

    pub quantity: f64,
    pub unit: String,
    pub reason: String,
    pub resolved_by: ResolvedBy,
    pub timestamp: DateTime<Utc>,
}

/// 创建人工覆写（时间戳取当前时间）
///
/// quantity 必须有限且 ≥ 0
pub fn create_manual_override(
    quantity: f64,
    unit: &str,
    reason: &str,
    resolved_by: ResolvedBy,
) -> Result<ManualOverride, ResolveError> {
    ManualOverride::at(quantity, unit, reason, resolved_by, Utc::now())
}

impl ManualOverride {
    /// 指定时间戳创建（回放/测试使用）
    pub fn at(
        quantity: f64,
        unit: &str,
        reason: &str,
        resolved_by: ResolvedBy,
        timestamp: DateTime<Utc>,
    ) -> Result<Self, ResolveError> {
        if !quantity.is_finite() || quantity < 0.0 {
            return Err(ResolveError::InvalidOverride(format!(
                "override quantity must be a finite number >= 0, got {}",
                quantity
            )));
        }

        Ok(Self {
            override_id: Uuid::new_v4(),
            is_override: true,
            // -0.0 归一为 0.0
            quantity: quantity + 0.0,
            unit: unit.trim().to_string(),
            reason: reason.trim().to_string(),
            resolved_by,
            timestamp,
        })
    }

    /// 以统一的解析结果形态输出,供预算消费方读取
    ///
    /// 覆写不叠加损耗: gross = ceil(quantity)
    pub fn to_output(&self) -> QuantityResolverOutput {
        let gross = gross_with_waste(self.quantity, 0.0);
        let reason = if self.reason.is_empty() {
            "no reason given"
        } else {
            self.reason.as_str()
        };

        QuantityResolverOutput {
            success: true,
            resolved_quantity: Some(self.quantity),
            resolved_unit: Some(self.unit.clone()),
            gross_quantity: Some(gross),
            resolution_method: Some(ResolutionMethod::Override),
            confidence: Confidence::High,
            category: None,
            calculation_trace: format!(
                "manual override by {} at {}: {} {} (gross {} {}); reason: {}",
                self.resolved_by,
                self.timestamp.to_rfc3339(),
                format_quantity(self.quantity),
                self.unit,
                format_quantity(gross),
                self.unit,
                reason
            ),
            error: None,
        }
    }
}
