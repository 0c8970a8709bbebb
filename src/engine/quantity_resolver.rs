// ==========================================
// 确定性用量解析引擎 - 单条用量解析器
// ==========================================
// 职责: 单个材料的用量解析(V2 覆盖率 / V1 透传)
// 输入: QuantityResolverInput
// 输出: QuantityResolverOutput (含净用量/毛用量/置信度/计算过程)
// 红线: 永不 panic,所有失败以返回值表达
// 红线: 成功结果必须带非空 calculation_trace
// 红线: V1 逻辑冻结,必须逐位复现历史结果
// ==========================================

use crate::config::ResolverConfig;
use crate::domain::quantity::{QuantityResolverInput, QuantityResolverOutput};
use crate::domain::types::{Confidence, ResolutionMethod, ResolverVersion};
use crate::domain::units::AreaUnit;
use crate::engine::category::{match_category, normalize_name};
use crate::engine::coverage_rate::CoverageRateTable;
use crate::engine::error::ResolveError;
use crate::engine::rounding::{format_quantity, gross_with_waste, waste_multiplier};
use tracing::debug;

// ==========================================
// QuantityResolver - 单条用量解析器
// ==========================================
#[derive(Debug, Clone)]
pub struct QuantityResolver {
    config: ResolverConfig,
    table: CoverageRateTable,
}

impl QuantityResolver {
    /// 使用标准覆盖率表创建解析器
    pub fn new(config: ResolverConfig) -> Self {
        Self::with_table(config, CoverageRateTable::standard())
    }

    /// 使用指定覆盖率表创建解析器
    pub fn with_table(config: ResolverConfig, table: CoverageRateTable) -> Self {
        Self { config, table }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn table(&self) -> &CoverageRateTable {
        &self.table
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 按指定版本解析
    pub fn resolve(&self, input: &QuantityResolverInput, version: ResolverVersion) -> QuantityResolverOutput {
        let output = match version {
            ResolverVersion::V1 => self.resolve_v1(input),
            ResolverVersion::V2 => self.resolve_v2(input),
        };

        debug!(
            material = %input.material_name,
            version = %version,
            success = output.success,
            method = ?output.resolution_method,
            confidence = %output.confidence,
            "quantity resolved"
        );

        output
    }

    /// V1 历史逻辑: 透传 input_value,仅叠加损耗
    ///
    /// 不做类别推断,不查覆盖率表,置信度恒为 medium
    pub fn resolve_v1(&self, input: &QuantityResolverInput) -> QuantityResolverOutput {
        let net = match validate_value(input.input_value) {
            Ok(v) => v,
            Err(err) => return failure(err),
        };
        let waste_percent = match self.effective_waste_percent(input) {
            Ok(w) => w,
            Err(err) => return failure(err),
        };

        let gross = gross_with_waste(net, waste_percent);
        if !gross.is_finite() {
            return failure(out_of_range(net));
        }

        let unit = input.input_unit.trim().to_string();
        let trace = format!(
            "V1 passthrough: {net} {unit} × {mult} ({waste}% waste) = {gross} {unit}",
            net = format_quantity(net),
            unit = unit,
            mult = format_quantity(waste_multiplier(waste_percent)),
            waste = format_quantity(waste_percent),
            gross = format_quantity(gross),
        );

        QuantityResolverOutput {
            success: true,
            resolved_quantity: Some(net),
            resolved_unit: Some(unit),
            gross_quantity: Some(gross),
            resolution_method: Some(ResolutionMethod::Passthrough),
            confidence: Confidence::Medium,
            category: None,
            calculation_trace: trace,
            error: None,
        }
    }

    /// V2 确定性逻辑
    ///
    /// 步骤:
    /// 1) 校验 input_value / base_area 为有限非负数
    /// 2) 推断类别,unknown -> 失败
    /// 3) 面积驱动: net = base_area(换算为平方英尺) / coverage_per_area
    ///    用量请求: net = input_value
    /// 4) 损耗系数 = 1 + waste_percent / 100
    /// 5) gross = ceil(net × 损耗系数)
    /// 6) 置信度按匹配等级,降级路径为 low,且不高于上游测量置信度
    /// 7) 生成计算过程
    pub fn resolve_v2(&self, input: &QuantityResolverInput) -> QuantityResolverOutput {
        // === 步骤 1: 输入校验 ===
        let input_value = match validate_value(input.input_value) {
            Ok(v) => v,
            Err(err) => return failure(err),
        };
        let base_area = match input.base_area.map(validate_value).transpose() {
            Ok(area) => area,
            Err(err) => return failure(err),
        };
        let waste_percent = match self.effective_waste_percent(input) {
            Ok(w) => w,
            Err(err) => return failure(err),
        };

        // === 步骤 2: 类别推断 ===
        let matched = match match_category(&self.table, &input.material_name) {
            Some(m) => m,
            None => {
                let normalized = normalize_name(&input.material_name);
                return failure(ResolveError::UnresolvableCategory(format!(
                    "no coverage keyword matches '{}'",
                    normalized
                )));
            }
        };
        let entry = matched.entry;

        let mut confidence = matched.match_kind.confidence();
        let mut notes: Vec<String> = Vec::new();

        // === 步骤 3: 计算净用量 ===
        let (net, unit, method, formula) = match base_area {
            Some(base_area) => {
                let unit_raw = input.input_unit.trim();
                let area_unit = if unit_raw.is_empty() {
                    self.config.default_area_unit
                } else {
                    match AreaUnit::parse(unit_raw) {
                        Some(u) => u,
                        None => {
                            // 降级: 无法识别的面积单位按平方英尺处理
                            confidence = Confidence::Low;
                            notes.push(format!("unit '{}' not recognised, assumed sq_ft", unit_raw));
                            AreaUnit::SquareFeet
                        }
                    }
                };

                let area_sq_ft = area_unit.to_square_feet(base_area);
                let mut formula = String::new();
                if area_unit != AreaUnit::SquareFeet {
                    formula.push_str(&format!(
                        "{} {} = {} sq_ft; ",
                        format_quantity(base_area),
                        area_unit,
                        format_quantity(area_sq_ft)
                    ));
                }

                let net = area_sq_ft / entry.coverage_per_area;
                formula.push_str(&format!(
                    "{} sq_ft / {} sq_ft per {} = {} {}",
                    format_quantity(area_sq_ft),
                    format_quantity(entry.coverage_per_area),
                    entry.unit,
                    format_quantity(net),
                    entry.unit
                ));

                (net, entry.unit.clone(), ResolutionMethod::CoverageRate, formula)
            }
            None => {
                let unit_raw = input.input_unit.trim();
                let unit = if unit_raw.is_empty() {
                    entry.unit.clone()
                } else {
                    unit_raw.to_string()
                };
                let net = input_value;
                let formula = format!("{} {} (material quantity)", format_quantity(net), unit);
                (net, unit, ResolutionMethod::Passthrough, formula)
            }
        };

        // === 步骤 4-5: 损耗与毛用量 ===
        let gross = gross_with_waste(net, waste_percent);
        if !net.is_finite() || !gross.is_finite() {
            return failure(out_of_range(net));
        }

        // === 步骤 6: 置信度 ===
        if let Some(source) = input.source_confidence {
            if source < confidence {
                confidence = source;
                notes.push(format!("confidence capped at {} by source measurement", source));
            }
        }

        // === 步骤 7: 计算过程 ===
        let mut trace = format!(
            "V2 {method}: {formula}; {net} {unit} × {mult} ({waste}% waste) = {gross} {unit}; keyword '{keyword}' ({kind}, category {category})",
            method = method,
            formula = formula,
            net = format_quantity(net),
            unit = unit,
            mult = format_quantity(waste_multiplier(waste_percent)),
            waste = format_quantity(waste_percent),
            gross = format_quantity(gross),
            keyword = entry.keyword,
            kind = matched.match_kind,
            category = matched.category,
        );
        for note in &notes {
            trace.push_str("; ");
            trace.push_str(note);
        }

        QuantityResolverOutput {
            success: true,
            resolved_quantity: Some(net),
            resolved_unit: Some(unit),
            gross_quantity: Some(gross),
            resolution_method: Some(method),
            confidence,
            category: Some(matched.category),
            calculation_trace: trace,
            error: None,
        }
    }

    /// 生效损耗百分比（请求值优先,否则取配置默认值）
    fn effective_waste_percent(&self, input: &QuantityResolverInput) -> Result<f64, ResolveError> {
        let waste = input.waste_percent.unwrap_or(self.config.default_waste_percent);
        if !waste.is_finite() || !(0.0..=100.0).contains(&waste) {
            return Err(ResolveError::InvalidWastePercent(format!(
                "waste percent must be within 0..=100, got {}",
                waste
            )));
        }
        Ok(waste)
    }
}

impl Default for QuantityResolver {
    fn default() -> Self {
        Self::new(ResolverConfig::default())
    }
}

/// 以默认配置按 V2 解析
pub fn resolve_quantity(input: &QuantityResolverInput) -> QuantityResolverOutput {
    QuantityResolver::default().resolve(input, ResolverVersion::V2)
}

// ==========================================
// 内部辅助
// ==========================================

/// 校验有限非负数,返回时把 -0.0 归一为 0.0
fn validate_value(value: f64) -> Result<f64, ResolveError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ResolveError::InvalidInput(format!(
            "value must be a finite number >= 0, got {}",
            value
        )));
    }
    Ok(value + 0.0)
}

fn out_of_range(net: f64) -> ResolveError {
    ResolveError::InvalidInput(format!("computed quantity out of range for {}", net))
}

fn failure(error: ResolveError) -> QuantityResolverOutput {
    let trace = format!("resolution failed: {} ({})", error, error.detail());
    QuantityResolverOutput::failure(error, trace)
}
