// ==========================================
// 确定性用量解析引擎 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含解析逻辑,不持有持久状态
// ==========================================

pub mod manual_override;
pub mod material;
pub mod quantity;
pub mod types;
pub mod units;

// 重导出核心类型
pub use manual_override::{create_manual_override, ManualOverride};
pub use material::{MaterialEntry, MaterialItem, OverriddenMaterial};
pub use quantity::{AiMeasurement, QuantityResolverInput, QuantityResolverOutput, DEFAULT_WASTE_PERCENT};
pub use types::{Confidence, MaterialCategory, ResolutionMethod, ResolvedBy, ResolverVersion};
pub use units::AreaUnit;
