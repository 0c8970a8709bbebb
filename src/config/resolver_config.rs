// ==========================================
// 确定性用量解析引擎 - 解析配置
// ==========================================
// 职责: 配置加载、校验、快照
// 来源优先级: 显式 JSON 文件 > key-value 覆写 > 内置默认值
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::domain::quantity::DEFAULT_WASTE_PERCENT;
use crate::domain::units::AreaUnit;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// 默认 V2 切换时间: 2025-01-15T00:00:00Z
const DEFAULT_V2_CUTOVER_TIMESTAMP: i64 = 1_736_899_200;

/// 配置目录名
const CONFIG_DIR_NAME: &str = "quantity-resolution-engine";

/// 配置文件名
const CONFIG_FILE_NAME: &str = "config.json";

// ==========================================
// 配置键定义
// ==========================================
pub mod config_keys {
    // 版本切换
    pub const V2_CUTOVER: &str = "v2_cutover";

    // 损耗
    pub const DEFAULT_WASTE_PERCENT: &str = "default_waste_percent";

    // 面积单位
    pub const DEFAULT_AREA_UNIT: &str = "default_area_unit";
}

fn default_v2_cutover() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(DEFAULT_V2_CUTOVER_TIMESTAMP, 0).unwrap_or_default()
}

// ==========================================
// ResolverConfig - 解析配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// V1/V2 切换时间（此前创建的项目走 V1）
    pub v2_cutover: DateTime<Utc>,

    /// 默认损耗百分比（0~100）
    pub default_waste_percent: f64,

    /// 面积请求未标注单位时采用的面积单位
    pub default_area_unit: AreaUnit,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            v2_cutover: default_v2_cutover(),
            default_waste_percent: DEFAULT_WASTE_PERCENT,
            default_area_unit: AreaUnit::SquareFeet,
        }
    }
}

impl ResolverConfig {
    /// 指定切换时间,其余取默认值
    pub fn with_cutover(v2_cutover: DateTime<Utc>) -> Self {
        Self {
            v2_cutover,
            ..Self::default()
        }
    }

    /// 校验配置取值
    pub fn validate(&self) -> ConfigResult<()> {
        let waste = self.default_waste_percent;
        if !waste.is_finite() || !(0.0..=100.0).contains(&waste) {
            return Err(ConfigError::InvalidValue {
                key: config_keys::DEFAULT_WASTE_PERCENT.to_string(),
                value: waste.to_string(),
                message: "损耗百分比必须在 0~100 之间".to_string(),
            });
        }
        Ok(())
    }

    // ==========================================
    // 加载
    // ==========================================

    /// 从 JSON 字符串加载（缺失字段取默认值）
    pub fn from_json_str(raw: &str) -> ConfigResult<Self> {
        let config: ResolverConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// 从 JSON 文件加载
    pub fn load_from_path(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::FileReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let config = Self::from_json_str(&raw)?;
        info!(path = %path.display(), cutover = %config.v2_cutover, "解析配置已加载");
        Ok(config)
    }

    /// 从扁平 key-value 加载（缺失键取默认值）
    pub fn from_kv(values: &HashMap<String, String>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(raw) = values.get(config_keys::V2_CUTOVER) {
            config.v2_cutover = DateTime::parse_from_rfc3339(raw.trim())
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| ConfigError::InvalidValue {
                    key: config_keys::V2_CUTOVER.to_string(),
                    value: raw.clone(),
                    message: e.to_string(),
                })?;
        }

        if let Some(raw) = values.get(config_keys::DEFAULT_WASTE_PERCENT) {
            config.default_waste_percent =
                raw.trim().parse::<f64>().map_err(|e| ConfigError::InvalidValue {
                    key: config_keys::DEFAULT_WASTE_PERCENT.to_string(),
                    value: raw.clone(),
                    message: e.to_string(),
                })?;
        }

        if let Some(raw) = values.get(config_keys::DEFAULT_AREA_UNIT) {
            config.default_area_unit =
                AreaUnit::parse(raw).ok_or_else(|| ConfigError::InvalidValue {
                    key: config_keys::DEFAULT_AREA_UNIT.to_string(),
                    value: raw.clone(),
                    message: "无法识别的面积单位".to_string(),
                })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// 平台默认配置文件路径
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// 读取默认路径的配置文件,不存在时使用内置默认值
    pub fn load_or_default() -> ConfigResult<Self> {
        match Self::default_config_path() {
            Some(path) => Self::load_from_path_or_default(path),
            None => {
                warn!("无法确定配置目录,使用默认配置");
                Ok(Self::default())
            }
        }
    }

    /// 读取指定路径的配置文件,不存在时使用内置默认值
    ///
    /// 文件存在但内容非法时返回错误,不静默回退
    pub fn load_from_path_or_default(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load_from_path(path)
        } else {
            info!(path = %path.display(), "未找到配置文件,使用默认配置");
            Ok(Self::default())
        }
    }

    // ==========================================
    // 快照
    // ==========================================

    /// 导出为扁平 key-value（键有序）
    pub fn to_kv(&self) -> BTreeMap<String, String> {
        let mut values = BTreeMap::new();
        values.insert(config_keys::V2_CUTOVER.to_string(), self.v2_cutover.to_rfc3339());
        values.insert(
            config_keys::DEFAULT_WASTE_PERCENT.to_string(),
            self.default_waste_percent.to_string(),
        );
        values.insert(
            config_keys::DEFAULT_AREA_UNIT.to_string(),
            self.default_area_unit.as_str().to_string(),
        );
        values
    }

    /// 配置快照（JSON）
    ///
    /// 重算时记录所用切换时间与默认值,保证结果可复现
    pub fn snapshot_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string(&self.to_kv())?)
    }

    /// 从快照恢复
    pub fn from_snapshot_json(snapshot_json: &str) -> ConfigResult<Self> {
        let values: HashMap<String, String> = serde_json::from_str(snapshot_json)?;
        Self::from_kv(&values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_default_values() {
        let config = ResolverConfig::default();
        assert_eq!(
            config.v2_cutover,
            Utc.with_ymd_and_hms(2025, 1, 15, 0, 0, 0).unwrap()
        );
        assert_eq!(config.default_waste_percent, 10.0);
        assert_eq!(config.default_area_unit, AreaUnit::SquareFeet);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_partial() {
        let config = ResolverConfig::from_json_str(r#"{"default_waste_percent": 15}"#).unwrap();
        assert_eq!(config.default_waste_percent, 15.0);
        assert_eq!(config.v2_cutover, ResolverConfig::default().v2_cutover, "缺失字段取默认值");
    }

    #[test]
    fn test_from_json_rejects_bad_waste() {
        let err = ResolverConfig::from_json_str(r#"{"default_waste_percent": 120}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_from_kv() {
        let mut values = HashMap::new();
        values.insert("v2_cutover".to_string(), "2024-07-01T00:00:00Z".to_string());
        values.insert("default_area_unit".to_string(), "m2".to_string());

        let config = ResolverConfig::from_kv(&values).unwrap();
        assert_eq!(config.v2_cutover, Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap());
        assert_eq!(config.default_area_unit, AreaUnit::SquareMeters);
        assert_eq!(config.default_waste_percent, 10.0);
    }

    #[test]
    fn test_from_kv_invalid_values() {
        let mut values = HashMap::new();
        values.insert("v2_cutover".to_string(), "yesterday".to_string());
        assert!(ResolverConfig::from_kv(&values).is_err());

        let mut values = HashMap::new();
        values.insert("default_area_unit".to_string(), "acre-ish".to_string());
        assert!(ResolverConfig::from_kv(&values).is_err());

        let mut values = HashMap::new();
        values.insert("default_waste_percent".to_string(), "ten".to_string());
        assert!(ResolverConfig::from_kv(&values).is_err());
    }

    #[test]
    fn test_snapshot_restore() {
        let config = ResolverConfig {
            v2_cutover: Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap(),
            default_waste_percent: 12.5,
            default_area_unit: AreaUnit::SquareYards,
        };
        let snapshot = config.snapshot_json().unwrap();
        let restored = ResolverConfig::from_snapshot_json(&snapshot).unwrap();
        assert_eq!(restored, config);
    }
}
