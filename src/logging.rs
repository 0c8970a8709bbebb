// ==========================================
// 确定性用量解析引擎 - 日志系统
// ==========================================
// 职责: 安装全局 tracing subscriber
// 格式: text(人读) / json(审计采集,携带当前 span 字段)
// 红线: 宿主应用可能已安装 subscriber,初始化失败不 panic
// ==========================================

use std::str::FromStr;
use tracing_subscriber::{fmt, EnvFilter};

/// 日志格式环境变量
pub const LOG_FORMAT_ENV: &str = "QRE_LOG_FORMAT";

/// RUST_LOG 未设置时的过滤指令
const DEFAULT_DIRECTIVE: &str = "quantity_resolution_engine=info";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "text" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format: {}", other)),
        }
    }
}

impl LogFormat {
    /// 读取 QRE_LOG_FORMAT,缺失或无法识别时取 text
    pub fn from_env() -> Self {
        std::env::var(LOG_FORMAT_ENV)
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_default()
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// 初始化日志系统
///
/// # 环境变量
/// - RUST_LOG: 日志级别过滤器（默认: quantity_resolution_engine=info）
/// - QRE_LOG_FORMAT: text | json（默认: text）
///
/// 返回 false 表示已有全局 subscriber,本次未安装
///
/// # 示例
/// ```no_run
/// use quantity_resolution_engine::logging;
/// logging::init();
/// ```
pub fn init() -> bool {
    init_with(LogFormat::from_env())
}

/// 以指定格式初始化
pub fn init_with(format: LogFormat) -> bool {
    let filter = env_filter();
    let installed = match format {
        LogFormat::Text => fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_line_number(true)
            .try_init(),
        // 批量解析的 count/version 等 span 字段随事件输出
        LogFormat::Json => fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .with_current_span(true)
            .try_init(),
    };
    installed.is_ok()
}

/// 初始化测试环境的日志系统,可重复调用
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parse() {
        assert_eq!("json".parse::<LogFormat>(), Ok(LogFormat::Json));
        assert_eq!(" JSON ".parse::<LogFormat>(), Ok(LogFormat::Json));
        assert_eq!("pretty".parse::<LogFormat>(), Ok(LogFormat::Text));
        assert_eq!("".parse::<LogFormat>(), Ok(LogFormat::Text));
        assert!("xml".parse::<LogFormat>().is_err());
        assert_eq!(LogFormat::default(), LogFormat::Text);
    }
}
