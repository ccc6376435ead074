//! 类别注册表
//!
//! 定义所有可检测的敏感信息类别：匹配器、占位标签和替换模式。
//! 注册表只初始化一次，之后只读，文本脱敏与页面几何脱敏共用同一份。

mod patterns;
mod placeholder;

pub use placeholder::{placeholder, placeholder_with_detail, tag, Locale};

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 规则层错误
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleError {
    #[error("unknown category: {0}")]
    UnknownCategory(String),
    #[error("unknown locale: {0}")]
    UnknownLocale(String),
}

/// 类别标识
///
/// 声明顺序即优先级顺序：靠前的类别先消费文本，靠后的类别看不到已被替换的内容。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKey {
    Email,
    Bank,
    Account,
    Phone,
    Money,
    Address,
    Handle,
    Reference,
    Title,
    Number,
}

impl CategoryKey {
    /// 按优先级排列的全部类别
    pub const ALL: [CategoryKey; 10] = [
        CategoryKey::Email,
        CategoryKey::Bank,
        CategoryKey::Account,
        CategoryKey::Phone,
        CategoryKey::Money,
        CategoryKey::Address,
        CategoryKey::Handle,
        CategoryKey::Reference,
        CategoryKey::Title,
        CategoryKey::Number,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryKey::Email => "email",
            CategoryKey::Bank => "bank",
            CategoryKey::Account => "account",
            CategoryKey::Phone => "phone",
            CategoryKey::Money => "money",
            CategoryKey::Address => "address",
            CategoryKey::Handle => "handle",
            CategoryKey::Reference => "reference",
            CategoryKey::Title => "title",
            CategoryKey::Number => "number",
        }
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryKey {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        CategoryKey::ALL
            .into_iter()
            .find(|k| k.as_str() == key)
            .ok_or_else(|| RuleError::UnknownCategory(s.to_string()))
    }
}

/// 匹配结果的替换方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// 整段替换
    Plain,
    /// 保留捕获到的前导前缀，替换其余部分
    Prefix,
    /// 保留可选的前缀记号（如 `+`），替换其余部分
    Phone,
    /// 金额：替换内容取决于币种与金额模式
    Money,
}

impl MatchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchMode::Plain => "plain",
            MatchMode::Prefix => "prefix",
            MatchMode::Phone => "phone",
            MatchMode::Money => "money",
        }
    }
}

/// 敏感信息类别
pub struct Category {
    pub key: CategoryKey,
    /// 英文占位标签，其他语言见 [`tag`]
    pub tag: &'static str,
    pub mode: MatchMode,
    /// 拒绝前后紧邻 ASCII 数字的匹配
    pub digit_guard: bool,
    pub pattern: &'static str,
    matcher: Option<Regex>,
}

impl fmt::Debug for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Category")
            .field("key", &self.key)
            .field("tag", &self.tag)
            .field("mode", &self.mode)
            .field("digit_guard", &self.digit_guard)
            .field("compiled", &self.matcher.is_some())
            .finish()
    }
}

/// 一次类别匹配
///
/// 偏移均为字节偏移，指向被匹配的原文。
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryMatch<'t> {
    pub start: usize,
    pub end: usize,
    pub text: &'t str,
    /// 需要原样保留的前导前缀
    pub prefix: Option<&'t str>,
    /// 金额类别：币种（符号或代码，未规范化）
    pub currency: Option<&'t str>,
    /// 金额类别：金额原文
    pub amount: Option<&'t str>,
}

impl CategoryMatch<'_> {
    /// 实际被替换部分的起点（跳过保留前缀）
    pub fn redacted_start(&self) -> usize {
        self.start + self.prefix.map_or(0, str::len)
    }
}

impl Category {
    /// 构造类别并编译正则；编译失败只记警告，`matcher` 为 `None`
    pub fn new(
        key: CategoryKey,
        tag: &'static str,
        mode: MatchMode,
        digit_guard: bool,
        pattern: &'static str,
    ) -> Self {
        let matcher = match Regex::new(pattern) {
            Ok(re) => Some(re),
            Err(e) => {
                log::warn!("[Registry] 类别 {} 的正则编译失败: {}", key, e);
                None
            }
        };
        Self {
            key,
            tag,
            mode,
            digit_guard,
            pattern,
            matcher,
        }
    }

    /// 已编译的匹配器；编译失败时为 `None`，该类别在匹配时被静默跳过
    pub fn matcher(&self) -> Option<&Regex> {
        self.matcher.as_ref()
    }

    /// 在文本中查找全部不重叠匹配（从左到右）
    pub fn find_all<'t>(&self, text: &'t str) -> Vec<CategoryMatch<'t>> {
        let Some(re) = self.matcher() else {
            return Vec::new();
        };

        re.captures_iter(text)
            .filter_map(|caps| {
                let m = caps.get(0)?;
                if m.as_str().is_empty() {
                    return None;
                }
                if self.digit_guard && touches_digit(text, m.start(), m.end()) {
                    return None;
                }
                Some(self.build_match(text, &caps, m.start(), m.end()))
            })
            .collect()
    }

    fn build_match<'t>(
        &self,
        text: &'t str,
        caps: &Captures<'t>,
        start: usize,
        end: usize,
    ) -> CategoryMatch<'t> {
        let mut found = CategoryMatch {
            start,
            end,
            text: &text[start..end],
            prefix: None,
            currency: None,
            amount: None,
        };

        match self.mode {
            MatchMode::Plain => {}
            MatchMode::Prefix | MatchMode::Phone => {
                found.prefix = caps
                    .iter()
                    .skip(1)
                    .flatten()
                    .next()
                    .filter(|g| g.start() == start)
                    .map(|g| g.as_str());
            }
            MatchMode::Money => {
                found.currency = caps
                    .name("cur")
                    .or_else(|| caps.name("cur2"))
                    .map(|g| g.as_str());
                found.amount = caps
                    .name("amt")
                    .or_else(|| caps.name("amt2"))
                    .map(|g| g.as_str());
            }
        }

        found
    }
}

/// 边界检查：匹配前后紧邻数字时视为更长数字串的一部分
fn touches_digit(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    before.is_some_and(|c| c.is_ascii_digit()) || after.is_some_and(|c| c.is_ascii_digit())
}

static REGISTRY: Lazy<Vec<Category>> = Lazy::new(|| {
    use CategoryKey::*;
    use MatchMode::*;

    vec![
        Category::new(Email, "EMAIL", Plain, false, patterns::EMAIL),
        Category::new(Bank, "BANK", Plain, true, patterns::BANK),
        Category::new(Account, "ACCOUNT", Prefix, false, patterns::ACCOUNT),
        Category::new(CategoryKey::Phone, "PHONE", MatchMode::Phone, true, patterns::PHONE),
        Category::new(CategoryKey::Money, "AMOUNT", MatchMode::Money, false, patterns::MONEY),
        Category::new(Address, "ADDRESS", Plain, false, patterns::ADDRESS),
        Category::new(Handle, "HANDLE", Prefix, false, patterns::HANDLE),
        Category::new(Reference, "REF", Plain, false, patterns::REFERENCE),
        Category::new(Title, "NAME", Prefix, false, patterns::TITLE),
        Category::new(Number, "NUMBER", Plain, true, patterns::NUMBER),
    ]
});

/// 按优先级顺序返回全部类别
pub fn registry() -> &'static [Category] {
    &REGISTRY
}

/// 按标识查找类别
pub fn category(key: CategoryKey) -> Option<&'static Category> {
    registry().iter().find(|c| c.key == key)
}

/// 正则编译失败的类别列表
///
/// 宿主在启动时调用一次并记录日志；匹配阶段不再重复检查。
pub fn integrity_report() -> Vec<CategoryKey> {
    registry()
        .iter()
        .filter(|c| c.matcher().is_none())
        .map(|c| c.key)
        .collect()
}
