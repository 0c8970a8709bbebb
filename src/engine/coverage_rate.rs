// ==========================================
// 确定性用量解析引擎 - 覆盖率表
// ==========================================
// 职责: 材料关键词 -> {单位, 单位覆盖面积, 类别}
// 红线: 编译期静态数据,只读,随代码发布而版本化
// 红线: 覆盖面积统一以平方英尺计
// ==========================================
// 优先级: 关键词越长越优先;等长时按表中声明顺序
// ==========================================

use crate::domain::types::MaterialCategory;
use serde::Serialize;
use tracing::warn;

/// 覆盖率条目
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverageRate {
    /// 匹配关键词（小写、单空格分隔）
    pub keyword: String,

    /// 采购单位
    pub unit: String,

    /// 一个采购单位可覆盖的基准面积（平方英尺）
    pub coverage_per_area: f64,

    pub category: MaterialCategory,
}

impl CoverageRate {
    pub fn new(keyword: &str, unit: &str, coverage_per_area: f64, category: MaterialCategory) -> Self {
        Self {
            keyword: keyword.to_string(),
            unit: unit.to_string(),
            coverage_per_area,
            category,
        }
    }
}

// ==========================================
// 标准覆盖率数据
// ==========================================
// (keyword, unit, coverage_per_area, category)
const STANDARD_RATES: &[(&str, &str, f64, MaterialCategory)] = &[
    // ===== 瓷砖 =====
    ("ceramic tile", "box", 10.0, MaterialCategory::Tile),
    ("porcelain tile", "box", 10.0, MaterialCategory::Tile),
    ("mosaic tile", "sheet", 1.0, MaterialCategory::Tile),
    ("tile", "box", 10.0, MaterialCategory::Tile),
    ("grout", "bag", 50.0, MaterialCategory::Grout),
    ("tile adhesive", "bucket", 40.0, MaterialCategory::Adhesive),
    ("thinset", "bag", 50.0, MaterialCategory::Adhesive),
    ("mortar", "bag", 50.0, MaterialCategory::Adhesive),
    // ===== 涂料 =====
    ("primer", "gallon", 300.0, MaterialCategory::Paint),
    ("paint", "gallon", 350.0, MaterialCategory::Paint),
    // ===== 地面 =====
    ("vinyl plank", "box", 24.0, MaterialCategory::Flooring),
    ("hardwood", "box", 20.0, MaterialCategory::Flooring),
    ("laminate", "box", 20.0, MaterialCategory::Flooring),
    ("floor", "box", 20.0, MaterialCategory::Flooring),
    ("carpet", "sq_yd", 9.0, MaterialCategory::Carpet),
    // ===== 墙体 =====
    ("drywall", "sheet", 32.0, MaterialCategory::Drywall),
    ("sheetrock", "sheet", 32.0, MaterialCategory::Drywall),
    ("insulation", "bag", 40.0, MaterialCategory::Insulation),
    ("wallpaper", "roll", 28.0, MaterialCategory::Wallpaper),
    // ===== 屋面 / 外立面 =====
    ("shingle", "bundle", 33.3, MaterialCategory::Roofing),
    ("roofing", "bundle", 33.3, MaterialCategory::Roofing),
    ("underlayment", "roll", 400.0, MaterialCategory::Underlayment),
    ("siding", "square", 100.0, MaterialCategory::Siding),
    ("plywood", "sheet", 32.0, MaterialCategory::Sheathing),
    ("osb", "sheet", 32.0, MaterialCategory::Sheathing),
    // 4 英寸板厚: 1 立方码 ≈ 81 平方英尺
    ("concrete", "cu_yd", 81.0, MaterialCategory::Concrete),
];

// ==========================================
// CoverageRateTable - 覆盖率表
// ==========================================
#[derive(Debug, Clone)]
pub struct CoverageRateTable {
    /// 已按优先级排好序的条目
    entries: Vec<CoverageRate>,
}

impl CoverageRateTable {
    /// 标准覆盖率表
    pub fn standard() -> Self {
        Self::new(
            STANDARD_RATES
                .iter()
                .map(|(keyword, unit, coverage, category)| {
                    CoverageRate::new(keyword, unit, *coverage, *category)
                })
                .collect(),
        )
    }

    /// 从自定义条目构建
    ///
    /// 关键词为空、覆盖面积非正或非有限、类别为 Unknown 的条目会被丢弃
    pub fn new(entries: Vec<CoverageRate>) -> Self {
        let mut entries: Vec<CoverageRate> = entries
            .into_iter()
            .filter_map(|mut entry| {
                entry.keyword = crate::engine::category::normalize_name(&entry.keyword);
                let valid = !entry.keyword.is_empty()
                    && entry.coverage_per_area.is_finite()
                    && entry.coverage_per_area > 0.0
                    && entry.category.is_known();
                if !valid {
                    warn!(keyword = %entry.keyword, coverage = entry.coverage_per_area, "丢弃无效覆盖率条目");
                    return None;
                }
                Some(entry)
            })
            .collect();

        // 稳定排序: 长关键词优先,等长保持声明顺序
        entries.sort_by(|a, b| b.keyword.chars().count().cmp(&a.keyword.chars().count()));

        Self { entries }
    }

    /// 按匹配优先级排列的全部条目
    pub fn entries(&self) -> &[CoverageRate] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 按关键词精确查找
    pub fn find_keyword(&self, keyword: &str) -> Option<&CoverageRate> {
        let key = crate::engine::category::normalize_name(keyword);
        self.entries.iter().find(|e| e.keyword == key)
    }

    /// 类别的首选条目（该类别中优先级最高者）
    pub fn for_category(&self, category: MaterialCategory) -> Option<&CoverageRate> {
        self.entries.iter().find(|e| e.category == category)
    }
}

impl Default for CoverageRateTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_table_sorted_longest_first() {
        let table = CoverageRateTable::standard();
        let lens: Vec<usize> = table.entries().iter().map(|e| e.keyword.chars().count()).collect();
        assert!(lens.windows(2).all(|w| w[0] >= w[1]), "应按关键词长度降序");
        assert_eq!(table.len(), STANDARD_RATES.len());
    }

    #[test]
    fn test_equal_length_keeps_declaration_order() {
        let table = CoverageRateTable::standard();
        let pos = |k: &str| table.entries().iter().position(|e| e.keyword == k).unwrap();
        // paint 与 floor 同为 5 个字符,paint 先声明
        assert!(pos("paint") < pos("floor"), "等长关键词按声明顺序");
    }

    #[test]
    fn test_tile_rate_is_one_box_per_ten() {
        let table = CoverageRateTable::standard();
        let tile = table.find_keyword("TILE").unwrap();
        assert_eq!(tile.coverage_per_area, 10.0);
        assert_eq!(tile.unit, "box");
        assert_eq!(tile.category, MaterialCategory::Tile);
    }

    #[test]
    fn test_for_category_picks_highest_priority() {
        let table = CoverageRateTable::standard();
        let entry = table.for_category(MaterialCategory::Tile).unwrap();
        assert_eq!(entry.keyword, "porcelain tile");
        assert!(table.for_category(MaterialCategory::Unknown).is_none());
    }

    #[test]
    fn test_invalid_entries_dropped() {
        let table = CoverageRateTable::new(vec![
            CoverageRate::new("", "box", 10.0, MaterialCategory::Tile),
            CoverageRate::new("zero", "box", 0.0, MaterialCategory::Tile),
            CoverageRate::new("nan", "box", f64::NAN, MaterialCategory::Tile),
            CoverageRate::new("mystery", "box", 5.0, MaterialCategory::Unknown),
            CoverageRate::new("Stone  Veneer", "box", 8.0, MaterialCategory::Siding),
        ]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.entries()[0].keyword, "stone veneer", "关键词应规范化");
    }
}
