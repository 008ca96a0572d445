//! 计划解析模块
//!
//! 支持 TOML (主要) 和 JSON (可选) 格式。

use std::path::Path;

use contracts::ManeuverPlan;

use crate::error::ConfigError;

/// 计划文件格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML 格式 (推荐)
    Toml,
    /// JSON 格式
    Json,
}

impl ConfigFormat {
    /// 从文件扩展名推断格式
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// 从路径推断格式；未知扩展名报错并带上扩展名
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| ConfigError::UnsupportedFormat {
                extension: String::new(),
            })?;
        Self::from_extension(ext).ok_or_else(|| ConfigError::UnsupportedFormat {
            extension: ext.to_string(),
        })
    }
}

/// 解析 TOML 格式计划
pub fn parse_toml(content: &str) -> Result<ManeuverPlan, ConfigError> {
    toml::from_str(content).map_err(|e| ConfigError::parse(format!("TOML parse error: {e}")))
}

/// 解析 JSON 格式计划
pub fn parse_json(content: &str) -> Result<ManeuverPlan, ConfigError> {
    serde_json::from_str(content).map_err(|e| ConfigError::parse(format!("JSON parse error: {e}")))
}

/// 根据格式解析计划
pub fn parse(content: &str, format: ConfigFormat) -> Result<ManeuverPlan, ConfigError> {
    match format {
        ConfigFormat::Toml => parse_toml(content),
        ConfigFormat::Json => parse_json(content),
    }
}
