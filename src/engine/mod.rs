// ==========================================
// 确定性用量解析引擎 - 引擎层
// ==========================================
// 职责: 类别推断 / 版本选择 / 单条解析 / 批量解析
// 红线: 纯同步计算,无 I/O,无共享可变状态,无缓存
// 红线: 所有规则必须输出计算过程(calculation_trace)
// ==========================================

pub mod batch;
pub mod category;
pub mod coverage_rate;
pub mod error;
pub mod quantity_resolver;
pub mod rounding;
pub mod version_selector;

// 重导出核心引擎
pub use batch::{BatchResolution, BatchResolver, BatchStats, EntryBatchResolution};
pub use category::{infer_category, infer_category_with, match_category, normalize_name, CategoryMatch, MatchKind};
pub use coverage_rate::{CoverageRate, CoverageRateTable};
pub use error::{ResolveError, ResolveErrorKind};
pub use quantity_resolver::{resolve_quantity, QuantityResolver};
pub use version_selector::{select_version, VersionSelector};
