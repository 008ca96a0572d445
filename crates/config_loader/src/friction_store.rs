//! 摩擦设置持久化
//!
//! 取代原先的环境键值存储：显式路径、显式读写。文件不存在时回落到
//! 启动缺省值，不视为错误。

use std::path::Path;

use contracts::FrictionSettings;
use tracing::{debug, info};

use crate::error::ConfigError;

/// Load persisted friction settings, falling back to the startup defaults
/// when the file does not exist.
pub fn load(path: &Path) -> Result<FrictionSettings, ConfigError> {
    if !path.exists() {
        debug!(path = %path.display(), "no persisted friction settings, using defaults");
        return Ok(FrictionSettings::default());
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
    let settings: FrictionSettings = toml::from_str(&content)
        .map_err(|e| ConfigError::parse(format!("friction settings parse error: {e}")))?;

    debug!(path = %path.display(), "friction settings loaded");
    Ok(settings)
}

/// Persist friction settings as pretty TOML, creating parent directories.
pub fn save(path: &Path, settings: &FrictionSettings) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(settings)
        .map_err(|e| ConfigError::parse(format!("friction settings serialize error: {e}")))?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::io(path, e))?;
        }
    }
    std::fs::write(path, content).map_err(|e| ConfigError::io(path, e))?;

    info!(path = %path.display(), "friction settings saved");
    Ok(())
}
