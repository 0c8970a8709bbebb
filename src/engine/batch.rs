// ==========================================
// 确定性用量解析引擎 - 批量解析器
// ==========================================
// 职责: 对材料列表逐条解析,隔离单条失败
// 输入: 材料列表 + 基准面积 + 损耗百分比 + 解析版本
// 输出: resolved / failed 两个列表 + 计数摘要
// 红线: 单条失败永不中断整批 (拼错一个材料名不能阻塞整张预算)
// 红线: resolved + failed 条数 = 输入条数,且各自保持输入顺序
// 红线: 人工覆写条目不进入自动解析
// ==========================================

use crate::domain::material::{MaterialEntry, MaterialItem};
use crate::domain::quantity::QuantityResolverInput;
use crate::domain::types::{Confidence, ResolverVersion};
use crate::engine::quantity_resolver::QuantityResolver;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

/// 批量统计
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchStats {
    /// 参与自动解析的条数（不含覆写）
    pub total: usize,
    pub resolved: usize,
    pub failed: usize,
    /// 保持不动的人工覆写条数
    pub overrides_kept: usize,
    pub high_confidence: usize,
    pub medium_confidence: usize,
    pub low_confidence: usize,
}

impl BatchStats {
    fn record_confidence(&mut self, confidence: Confidence) {
        match confidence {
            Confidence::High => self.high_confidence += 1,
            Confidence::Medium => self.medium_confidence += 1,
            Confidence::Low => self.low_confidence += 1,
        }
    }

    /// 已解析条目原样保留,仅计数
    fn keep_resolved(&mut self, item: &MaterialItem) {
        self.total += 1;
        self.resolved += 1;
        if let Some(confidence) = item.confidence {
            self.record_confidence(confidence);
        }
    }

    /// 计数摘要: "{n} of {m} materials resolved."
    pub fn summary(&self) -> String {
        let mut summary = format!("{} of {} materials resolved.", self.resolved, self.total);
        if self.overrides_kept > 0 {
            let noun = if self.overrides_kept == 1 {
                "manual override"
            } else {
                "manual overrides"
            };
            summary.push_str(&format!(" {} {} kept.", self.overrides_kept, noun));
        }
        summary
    }
}

/// 批量解析结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchResolution {
    pub resolved: Vec<MaterialItem>,
    pub failed: Vec<MaterialItem>,
    pub summary: String,
    pub stats: BatchStats,
}

/// 条目级批量解析结果（保持输入顺序）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryBatchResolution {
    pub entries: Vec<MaterialEntry>,
    pub summary: String,
    pub stats: BatchStats,
}

/// 单条解析结局
enum ItemOutcome {
    Resolved(MaterialItem),
    Failed(MaterialItem),
}

// ==========================================
// BatchResolver - 批量解析器
// ==========================================
pub struct BatchResolver<'a> {
    resolver: &'a QuantityResolver,
}

impl<'a> BatchResolver<'a> {
    pub fn new(resolver: &'a QuantityResolver) -> Self {
        Self { resolver }
    }

    /// 批量解析材料列表
    ///
    /// 每条材料有自身用量则按用量请求解析,否则以 base_area 作面积请求
    ///
    /// resolved == true 的条目原样进入 resolved 列表,与 `resolve_entries` 一致
    ///
    /// # 参数
    /// - `materials`: 待解析材料（类型上不含覆写条目）
    /// - `base_area`: 基准面积（配置默认面积单位）
    /// - `waste_percent`: 损耗百分比,None 取配置默认值
    /// - `version`: 解析版本
    #[instrument(skip(self, materials, version), fields(count = materials.len(), version = %version))]
    pub fn resolve_materials_batch(
        &self,
        materials: Vec<MaterialItem>,
        base_area: f64,
        waste_percent: Option<f64>,
        version: ResolverVersion,
    ) -> BatchResolution {
        let mut stats = BatchStats::default();
        let mut resolved = Vec::new();
        let mut failed = Vec::new();

        for item in materials {
            if item.resolved {
                stats.keep_resolved(&item);
                resolved.push(item);
                continue;
            }
            match self.resolve_item(item, base_area, waste_percent, version, &mut stats) {
                ItemOutcome::Resolved(item) => resolved.push(item),
                ItemOutcome::Failed(item) => failed.push(item),
            }
        }

        let summary = stats.summary();
        info!(resolved = stats.resolved, failed = stats.failed, "{}", summary);

        BatchResolution {
            resolved,
            failed,
            summary,
            stats,
        }
    }

    /// 批量解析条目
    ///
    /// 仅解析 Unresolved 条目;Resolved 与 Override 条目原样保留
    #[instrument(skip(self, entries, version), fields(count = entries.len(), version = %version))]
    pub fn resolve_entries(
        &self,
        entries: Vec<MaterialEntry>,
        base_area: f64,
        waste_percent: Option<f64>,
        version: ResolverVersion,
    ) -> EntryBatchResolution {
        let mut stats = BatchStats::default();

        let entries: Vec<MaterialEntry> = entries
            .into_iter()
            .map(|entry| match entry {
                MaterialEntry::Unresolved(item) => {
                    match self.resolve_item(item, base_area, waste_percent, version, &mut stats) {
                        ItemOutcome::Resolved(item) => MaterialEntry::Resolved(item),
                        ItemOutcome::Failed(item) => MaterialEntry::Unresolved(item),
                    }
                }
                MaterialEntry::Resolved(item) => {
                    stats.keep_resolved(&item);
                    MaterialEntry::Resolved(item)
                }
                MaterialEntry::Override(overridden) => {
                    stats.overrides_kept += 1;
                    MaterialEntry::Override(overridden)
                }
            })
            .collect();

        let summary = stats.summary();
        info!(
            resolved = stats.resolved,
            failed = stats.failed,
            overrides_kept = stats.overrides_kept,
            "{}",
            summary
        );

        EntryBatchResolution {
            entries,
            summary,
            stats,
        }
    }

    /// 解析单条材料并写回条目
    fn resolve_item(
        &self,
        mut item: MaterialItem,
        base_area: f64,
        waste_percent: Option<f64>,
        version: ResolverVersion,
        stats: &mut BatchStats,
    ) -> ItemOutcome {
        stats.total += 1;

        let input = build_input(&item, base_area, waste_percent);
        let output = self.resolver.resolve(&input, version);

        if output.success {
            item.apply_output(&output);
            stats.resolved += 1;
            stats.record_confidence(output.confidence);
            ItemOutcome::Resolved(item)
        } else {
            let message = output
                .error_message()
                .unwrap_or_else(|| "resolution failed".to_string());
            warn!(material = %item.name, error = %message, "material resolution failed");
            item.annotate_error(message);
            stats.failed += 1;
            ItemOutcome::Failed(item)
        }
    }
}

/// 由材料条目构造解析请求
fn build_input(item: &MaterialItem, base_area: f64, waste_percent: Option<f64>) -> QuantityResolverInput {
    match item.quantity {
        Some(quantity) => QuantityResolverInput {
            input_value: quantity,
            input_unit: item.unit.clone(),
            material_name: item.name.clone(),
            waste_percent,
            base_area: None,
            source_confidence: None,
        },
        None => QuantityResolverInput {
            input_value: base_area,
            input_unit: String::new(),
            material_name: item.name.clone(),
            waste_percent,
            base_area: Some(base_area),
            source_confidence: None,
        },
    }
}
