// ==========================================
// 确定性用量解析引擎 - 材料条目
// ==========================================
// 职责: 定义待量化的材料条目及其三种状态
// 状态: Unresolved -> Resolved (批量解析器写入)
//       任意状态 -> Override (仅人工)
//       Override -> Unresolved (仅人工清除)
// 红线: 覆写条目在类型上不可进入解析流程
// ==========================================

use crate::domain::manual_override::ManualOverride;
use crate::domain::quantity::QuantityResolverOutput;
use crate::domain::types::{Confidence, MaterialCategory, ResolutionMethod};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==========================================
// MaterialItem - 材料条目
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialItem {
    pub item_id: String,

    /// 材料名称（自由文本）
    pub name: String,

    /// 已有用量（可空,空则按基准面积解析）
    ///
    /// 解析的输入,解析器只读不写
    #[serde(default)]
    pub quantity: Option<f64>,

    /// 已有用量的单位
    #[serde(default)]
    pub unit: String,

    /// 解析得到的毛用量（含损耗,已取整）
    #[serde(default)]
    pub gross_quantity: Option<f64>,

    #[serde(default)]
    pub resolved_unit: Option<String>,

    #[serde(default)]
    pub category: Option<MaterialCategory>,

    #[serde(default)]
    pub resolved: bool,

    /// 解析过程说明
    #[serde(default)]
    pub resolution_trace: Option<String>,

    #[serde(default)]
    pub resolution_method: Option<ResolutionMethod>,

    #[serde(default)]
    pub confidence: Option<Confidence>,

    /// 解析失败时的错误标注
    #[serde(default)]
    pub error: Option<String>,
}

impl MaterialItem {
    pub fn new(name: &str) -> Self {
        Self {
            item_id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            quantity: None,
            unit: String::new(),
            gross_quantity: None,
            resolved_unit: None,
            category: None,
            resolved: false,
            resolution_trace: None,
            resolution_method: None,
            confidence: None,
            error: None,
        }
    }

    pub fn with_quantity(mut self, quantity: f64, unit: &str) -> Self {
        self.quantity = Some(quantity);
        self.unit = unit.to_string();
        self
    }

    /// 写入成功解析结果（quantity/unit 保持为输入值）
    pub(crate) fn apply_output(&mut self, output: &QuantityResolverOutput) {
        self.gross_quantity = output.gross_quantity;
        self.resolved_unit = output.resolved_unit.clone();
        if output.category.is_some() {
            self.category = output.category;
        }
        self.resolved = true;
        self.resolution_trace = Some(output.calculation_trace.clone());
        self.resolution_method = output.resolution_method;
        self.confidence = Some(output.confidence);
        self.error = None;
    }

    /// 写入失败标注（其余字段保持不变）
    pub(crate) fn annotate_error(&mut self, message: String) {
        self.error = Some(message);
    }

    /// 清空解析结果（人工清除覆写后回到未解析）
    fn reset_resolution(&mut self) {
        self.gross_quantity = None;
        self.resolved_unit = None;
        self.resolved = false;
        self.resolution_trace = None;
        self.resolution_method = None;
        self.confidence = None;
        self.error = None;
    }
}

// ==========================================
// OverriddenMaterial - 已人工覆写的条目
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverriddenMaterial {
    /// 覆写前的条目快照
    pub item: MaterialItem,
    pub manual_override: ManualOverride,
}

impl OverriddenMaterial {
    /// 覆写后的有效用量
    pub fn effective_quantity(&self) -> f64 {
        self.manual_override.quantity
    }

    pub fn output(&self) -> QuantityResolverOutput {
        self.manual_override.to_output()
    }
}

// ==========================================
// MaterialEntry - 材料条目状态
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum MaterialEntry {
    Unresolved(MaterialItem),
    Resolved(MaterialItem),
    Override(OverriddenMaterial),
}

impl MaterialEntry {
    /// 按 resolved 标志归类
    pub fn from_item(item: MaterialItem) -> Self {
        if item.resolved {
            MaterialEntry::Resolved(item)
        } else {
            MaterialEntry::Unresolved(item)
        }
    }

    /// 挂载人工覆写（已有覆写时以新覆写替换）
    pub fn attach_override(self, manual_override: ManualOverride) -> Self {
        let item = match self {
            MaterialEntry::Unresolved(item) | MaterialEntry::Resolved(item) => item,
            MaterialEntry::Override(existing) => existing.item,
        };
        MaterialEntry::Override(OverriddenMaterial {
            item,
            manual_override,
        })
    }

    /// 清除人工覆写,条目回到未解析状态
    ///
    /// 非覆写条目原样返回
    pub fn clear_override(self) -> Self {
        match self {
            MaterialEntry::Override(overridden) => {
                let mut item = overridden.item;
                item.reset_resolution();
                MaterialEntry::Unresolved(item)
            }
            other => other,
        }
    }

    pub fn is_override(&self) -> bool {
        matches!(self, MaterialEntry::Override(_))
    }

    pub fn item(&self) -> &MaterialItem {
        match self {
            MaterialEntry::Unresolved(item) | MaterialEntry::Resolved(item) => item,
            MaterialEntry::Override(overridden) => &overridden.item,
        }
    }

    /// 拆分为可解析条目或覆写条目
    pub fn into_resolvable(self) -> Result<MaterialItem, OverriddenMaterial> {
        match self {
            MaterialEntry::Unresolved(item) | MaterialEntry::Resolved(item) => Ok(item),
            MaterialEntry::Override(overridden) => Err(overridden),
        }
    }
}
