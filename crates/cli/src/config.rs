use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use veil_core::{CategoryKey, Locale, MoneyMode, RedactionConfig};
use veil_render::PaintOptions;

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    // ============ 脱敏配置 ============
    /// 启用的类别，缺省时启用全部（金额除外）
    pub enabled: Option<Vec<CategoryKey>>,
    /// 金额模式
    pub money_mode: Option<MoneyMode>,
    /// 占位符语言
    pub locale: Option<Locale>,

    // ============ 输出 ============
    /// 涂黑颜色 RGBA
    pub paint_fill: Option<[u8; 4]>,
    /// 脱敏后是否自动校验
    pub verify: Option<bool>,
}

impl AppConfig {
    /// 所有字段都显式填上默认值，用于 `config init`
    pub fn populated() -> Self {
        let defaults = RedactionConfig::default();
        Self {
            enabled: Some(defaults.enabled.into_iter().collect()),
            money_mode: Some(defaults.money),
            locale: Some(defaults.locale),
            paint_fill: Some(PaintOptions::default().fill),
            verify: Some(false),
        }
    }

    pub fn redaction_config(&self) -> RedactionConfig {
        let mut config = RedactionConfig::default();
        if let Some(enabled) = &self.enabled {
            config.enabled = enabled.iter().copied().collect();
        }
        if let Some(money) = self.money_mode {
            config.money = money;
        }
        if let Some(locale) = self.locale {
            config.locale = locale;
        }
        config
    }

    pub fn paint_options(&self) -> PaintOptions {
        PaintOptions {
            fill: self.paint_fill.unwrap_or(PaintOptions::default().fill),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config dir unavailable")]
    NoConfigDir,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn config_path() -> Result<PathBuf, ConfigError> {
    let dirs = directories::ProjectDirs::from("com", "veil", "veil").ok_or(ConfigError::NoConfigDir)?;
    Ok(dirs.config_dir().join("config.json"))
}

/// 文件不存在时返回默认配置
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        log::debug!("[Config] {} 不存在，使用默认配置", path.display());
        return Ok(AppConfig::default());
    }
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

pub fn save_config(path: &Path, config: &AppConfig) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let raw = serde_json::to_string_pretty(config)?;
    fs::write(path, raw)?;
    log::info!("[Config] 已写入 {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("veil-config-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn test_missing_file_is_default() {
        let config = load_config(&temp_path("absent.json")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.redaction_config(), RedactionConfig::default());
    }

    #[test]
    fn test_round_trip() {
        let path = temp_path("nested/config.json");
        let config = AppConfig {
            enabled: Some(vec![CategoryKey::Email, CategoryKey::Phone]),
            money_mode: Some(MoneyMode::Range),
            locale: Some(Locale::Zh),
            ..AppConfig::default()
        };
        save_config(&path, &config).unwrap();
        let loaded = load_config(&path).unwrap();
        assert_eq!(loaded, config);

        let redaction = loaded.redaction_config();
        assert_eq!(redaction.enabled.len(), 2);
        assert_eq!(redaction.money, MoneyMode::Range);
        assert_eq!(redaction.locale, Locale::Zh);
    }

    #[test]
    fn test_camel_case_keys() {
        let config: AppConfig = serde_json::from_str(r#"{"moneyMode":"off","paintFill":[255,0,0,255]}"#).unwrap();
        assert_eq!(config.money_mode, Some(MoneyMode::Off));
        assert_eq!(config.paint_options().fill, [255, 0, 0, 255]);
        assert!(config.enabled.is_none());
    }

    #[test]
    fn test_invalid_json() {
        let path = temp_path("broken.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{not json").unwrap();
        assert!(matches!(load_config(&path), Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_populated_matches_defaults() {
        assert_eq!(AppConfig::populated().redaction_config(), RedactionConfig::default());
    }
}
