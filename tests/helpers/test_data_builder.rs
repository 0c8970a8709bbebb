// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use chrono::{DateTime, TimeZone, Utc};
use quantity_resolution_engine::config::ResolverConfig;
use quantity_resolution_engine::domain::{MaterialItem, QuantityResolverInput};

/// 测试统一使用的切换时间: 2025-01-15T00:00:00Z
pub fn cutover() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 15, 0, 0, 0).unwrap()
}

/// 切换前创建的历史项目
pub fn legacy_project_created_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 9, 3, 14, 0, 0).unwrap()
}

/// 切换后创建的新项目
pub fn current_project_created_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 8, 20, 10, 0, 0).unwrap()
}

pub fn test_config() -> ResolverConfig {
    ResolverConfig::with_cutover(cutover())
}

// ==========================================
// MaterialItem 构建器
// ==========================================

pub struct MaterialBuilder {
    name: String,
    quantity: Option<f64>,
    unit: String,
}

impl MaterialBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            quantity: None,
            unit: String::new(),
        }
    }

    pub fn quantity(mut self, quantity: f64, unit: &str) -> Self {
        self.quantity = Some(quantity);
        self.unit = unit.to_string();
        self
    }

    pub fn build(self) -> MaterialItem {
        let item = MaterialItem::new(&self.name);
        match self.quantity {
            Some(q) => item.with_quantity(q, &self.unit),
            None => item,
        }
    }
}

// ==========================================
// QuantityResolverInput 构建器
// ==========================================

pub struct InputBuilder {
    input: QuantityResolverInput,
}

impl InputBuilder {
    pub fn area(material_name: &str, base_area: f64) -> Self {
        Self {
            input: QuantityResolverInput::area(material_name, base_area, ""),
        }
    }

    pub fn quantity(material_name: &str, value: f64, unit: &str) -> Self {
        Self {
            input: QuantityResolverInput::quantity(material_name, value, unit),
        }
    }

    pub fn unit(mut self, unit: &str) -> Self {
        self.input.input_unit = unit.to_string();
        self
    }

    pub fn waste(mut self, waste_percent: f64) -> Self {
        self.input.waste_percent = Some(waste_percent);
        self
    }

    pub fn build(self) -> QuantityResolverInput {
        self.input
    }
}
