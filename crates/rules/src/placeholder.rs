//! 占位符的语言显示形式
//!
//! 纯查表，不参与匹配。占位符里不能出现会再次触发任何类别的字符序列。

use crate::{CategoryKey, RuleError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 显示语言
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Zh,
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Zh => "zh",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "en-us" | "en-gb" => Ok(Locale::En),
            "zh" | "zh-cn" | "zh-hans" => Ok(Locale::Zh),
            _ => Err(RuleError::UnknownLocale(s.to_string())),
        }
    }
}

/// 类别在指定语言下的标签
pub fn tag(key: CategoryKey, locale: Locale) -> &'static str {
    match locale {
        Locale::En => match key {
            CategoryKey::Email => "EMAIL",
            CategoryKey::Bank => "BANK",
            CategoryKey::Account => "ACCOUNT",
            CategoryKey::Phone => "PHONE",
            CategoryKey::Money => "AMOUNT",
            CategoryKey::Address => "ADDRESS",
            CategoryKey::Handle => "HANDLE",
            CategoryKey::Reference => "REF",
            CategoryKey::Title => "NAME",
            CategoryKey::Number => "NUMBER",
        },
        Locale::Zh => match key {
            CategoryKey::Email => "邮箱",
            CategoryKey::Bank => "银行卡",
            CategoryKey::Account => "账号",
            CategoryKey::Phone => "电话",
            CategoryKey::Money => "金额",
            CategoryKey::Address => "地址",
            CategoryKey::Handle => "用户名",
            CategoryKey::Reference => "单号",
            CategoryKey::Title => "姓名",
            CategoryKey::Number => "数字",
        },
    }
}

/// `[TAG]` / `【标签】`
pub fn placeholder(key: CategoryKey, locale: Locale) -> String {
    let tag = tag(key, locale);
    match locale {
        Locale::En => format!("[{tag}]"),
        Locale::Zh => format!("【{tag}】"),
    }
}

/// `[TAG detail]` / `【标签 detail】`
pub fn placeholder_with_detail(key: CategoryKey, detail: &str, locale: Locale) -> String {
    if detail.is_empty() {
        return placeholder(key, locale);
    }
    let tag = tag(key, locale);
    match locale {
        Locale::En => format!("[{tag} {detail}]"),
        Locale::Zh => format!("【{tag} {detail}】"),
    }
}
