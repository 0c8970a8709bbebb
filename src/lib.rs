// ==========================================
// 确定性用量解析引擎 - 核心库
// ==========================================
// 定位: 把 AI 估算/人工录入的原始量,归一化为
//       含损耗、可追溯、可直接进预算的毛用量
// 红线: 纯计算层,给定输入返回结果,不持有持久状态
// 红线: 人工覆写永不被自动化悄悄覆盖
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 解析规则
pub mod engine;

// 配置层 - 引擎配置
pub mod config;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{Confidence, MaterialCategory, ResolutionMethod, ResolvedBy, ResolverVersion};

// 领域实体
pub use domain::{
    create_manual_override, AiMeasurement, AreaUnit, ManualOverride, MaterialEntry, MaterialItem,
    OverriddenMaterial, QuantityResolverInput, QuantityResolverOutput,
};

// 引擎
pub use engine::{
    infer_category, resolve_quantity, select_version, BatchResolution, BatchResolver,
    CoverageRateTable, EntryBatchResolution, QuantityResolver, ResolveError, VersionSelector,
};

// 配置
pub use config::ResolverConfig;

// ==========================================
// 常量定义
// ==========================================

// 引擎版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
