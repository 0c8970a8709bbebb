// ==========================================
// 确定性用量解析引擎 - 配置层
// ==========================================
// 职责: 解析引擎配置(切换时间/默认损耗/默认面积单位)
// 来源: JSON 文件 或 扁平 key-value(由项目元数据存储提供)
// 红线: 配置以值的形式注入引擎,不存在模块级可变状态
// ==========================================

pub mod error;
pub mod resolver_config;

// 重导出
pub use error::{ConfigError, ConfigResult};
pub use resolver_config::{config_keys, ResolverConfig};
