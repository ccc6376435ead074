//! Core redaction engine: configuration snapshot, text redaction, money
//! generalisation and risk scoring.

pub mod document;
pub mod engine;
pub mod money;
pub mod risk;

pub use document::{Document, Page};
pub use engine::{apply_category, redact_text, HitCounts, RedactionOutcome, StepOutcome};
pub use money::{bucket_amount, normalize_amount, normalize_currency, CurrencyFamily};
pub use risk::{score_risk, Contributor, RiskContext, RiskLevel, RiskReport};
pub use veil_rules::{Category, CategoryKey, Locale, MatchMode, RuleError};

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error(transparent)]
    Rule(#[from] RuleError),
    #[error("unknown money mode: {0}")]
    UnknownMoneyMode(String),
}

/// 金额处理模式
///
/// 金额类别不受启用集合控制，只看这个三态开关。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoneyMode {
    Off,
    /// 完全替换为占位符，不披露任何数字
    #[default]
    Exact,
    /// 替换为币种 + 金额区间
    Range,
}

impl MoneyMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            MoneyMode::Off => "off",
            MoneyMode::Exact => "exact",
            MoneyMode::Range => "range",
        }
    }
}

impl fmt::Display for MoneyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MoneyMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "off" => Ok(MoneyMode::Off),
            "exact" => Ok(MoneyMode::Exact),
            "range" => Ok(MoneyMode::Range),
            _ => Err(CoreError::UnknownMoneyMode(s.to_string())),
        }
    }
}

/// 一次脱敏调用的配置快照
///
/// 由宿主持有生命周期，每次调用传入新的快照；引擎只读。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RedactionConfig {
    /// 启用的类别。`money` 出现在这里会被忽略
    pub enabled: BTreeSet<CategoryKey>,
    pub money: MoneyMode,
    pub locale: Locale,
}

impl Default for RedactionConfig {
    fn default() -> Self {
        Self {
            enabled: CategoryKey::ALL
                .into_iter()
                .filter(|k| *k != CategoryKey::Money)
                .collect(),
            money: MoneyMode::default(),
            locale: Locale::default(),
        }
    }
}

impl RedactionConfig {
    pub fn new(
        enabled: impl IntoIterator<Item = CategoryKey>,
        money: MoneyMode,
        locale: Locale,
    ) -> Self {
        Self {
            enabled: enabled.into_iter().collect(),
            money,
            locale,
        }
    }

    /// 类别在本次调用中是否生效
    pub fn is_active(&self, key: CategoryKey) -> bool {
        match key {
            CategoryKey::Money => self.money != MoneyMode::Off,
            _ => self.enabled.contains(&key),
        }
    }

    /// 按优先级顺序返回生效的类别
    pub fn active_categories(&self) -> impl Iterator<Item = &'static Category> + '_ {
        veil_rules::registry()
            .iter()
            .filter(move |c| self.is_active(c.key))
    }
}

/// 解析逗号分隔的类别列表，例如 `email,phone,bank`
pub fn parse_enabled(list: &str) -> Result<BTreeSet<CategoryKey>> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<CategoryKey>().map_err(CoreError::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_enables_everything_but_money() {
        let config = RedactionConfig::default();
        assert!(!config.enabled.contains(&CategoryKey::Money));
        assert_eq!(config.enabled.len(), CategoryKey::ALL.len() - 1);
        assert!(config.is_active(CategoryKey::Money));
    }

    #[test]
    fn test_money_is_governed_by_mode_only() {
        let config = RedactionConfig::new([CategoryKey::Money], MoneyMode::Off, Locale::En);
        assert!(!config.is_active(CategoryKey::Money));

        let config = RedactionConfig::new([], MoneyMode::Range, Locale::En);
        assert!(config.is_active(CategoryKey::Money));
    }

    #[test]
    fn test_active_categories_follow_priority() {
        let config = RedactionConfig::new(
            [CategoryKey::Number, CategoryKey::Email, CategoryKey::Reference],
            MoneyMode::Exact,
            Locale::En,
        );
        let keys: Vec<CategoryKey> = config.active_categories().map(|c| c.key).collect();
        assert_eq!(
            keys,
            vec![
                CategoryKey::Email,
                CategoryKey::Money,
                CategoryKey::Reference,
                CategoryKey::Number
            ]
        );
    }

    #[test]
    fn test_parse_enabled() {
        let set = parse_enabled("email, phone,,bank").unwrap();
        assert_eq!(set.len(), 3);
        assert!(set.contains(&CategoryKey::Phone));
        assert!(matches!(
            parse_enabled("email,ssn"),
            Err(CoreError::Rule(RuleError::UnknownCategory(_)))
        ));
    }

    #[test]
    fn test_money_mode_parsing() {
        assert_eq!("Range".parse::<MoneyMode>().unwrap(), MoneyMode::Range);
        assert!("banded".parse::<MoneyMode>().is_err());
    }

    #[test]
    fn test_config_json_defaults() {
        let config: RedactionConfig =
            serde_json::from_str(r#"{"enabled":["email"],"money":"range"}"#).unwrap();
        assert_eq!(config.money, MoneyMode::Range);
        assert_eq!(config.locale, Locale::En);
        assert_eq!(config.enabled.len(), 1);
    }
}
