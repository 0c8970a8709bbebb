// ==========================================
// 确定性用量解析引擎 - 解析版本选择器
// ==========================================
// 职责: 按项目创建时间选择 V1(历史) / V2(覆盖率) 逻辑
// 规则:
// 1) 显式指定版本 -> 无条件采用(测试/管理员)
// 2) 创建时间 < 切换时间 -> V1 (历史预算不被悄悄重算)
// 3) 创建时间 ≥ 切换时间 -> V2
// 红线: 纯函数,同一输入永远得到同一版本
// 红线: 切换时间显式注入,不读取任何全局可变状态
// ==========================================

use crate::config::ResolverConfig;
use crate::domain::types::ResolverVersion;
use chrono::{DateTime, Utc};

/// 选择解析版本（纯函数）
pub fn select_version(
    project_created_at: DateTime<Utc>,
    cutover: DateTime<Utc>,
    explicit_version: Option<ResolverVersion>,
) -> ResolverVersion {
    if let Some(version) = explicit_version {
        return version;
    }

    if project_created_at < cutover {
        ResolverVersion::V1
    } else {
        ResolverVersion::V2
    }
}

// ==========================================
// VersionSelector - 携带切换时间的选择器
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionSelector {
    cutover: DateTime<Utc>,
}

impl VersionSelector {
    pub fn new(cutover: DateTime<Utc>) -> Self {
        Self { cutover }
    }

    pub fn from_config(config: &ResolverConfig) -> Self {
        Self::new(config.v2_cutover)
    }

    pub fn cutover(&self) -> DateTime<Utc> {
        self.cutover
    }

    pub fn select(
        &self,
        project_created_at: DateTime<Utc>,
        explicit_version: Option<ResolverVersion>,
    ) -> ResolverVersion {
        select_version(project_created_at, self.cutover, explicit_version)
    }
}
