//! 文本脱敏引擎
//!
//! 按优先级对类别做折叠：每一步接收上一步的输出文本，返回新文本和命中数。
//! 靠前的类别替换掉的内容，后面的类别再也看不到。

use crate::money::money_placeholder;
use crate::RedactionConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use veil_rules::{placeholder, Category, CategoryKey, CategoryMatch, MatchMode};

/// 各类别命中次数，按优先级顺序迭代
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HitCounts(BTreeMap<CategoryKey, usize>);

impl HitCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: CategoryKey, count: usize) {
        if count > 0 {
            *self.0.entry(key).or_insert(0) += count;
        }
    }

    pub fn get(&self, key: CategoryKey) -> usize {
        self.0.get(&key).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (CategoryKey, usize)> + '_ {
        self.0.iter().map(|(k, v)| (*k, *v))
    }
}

impl FromIterator<(CategoryKey, usize)> for HitCounts {
    fn from_iter<I: IntoIterator<Item = (CategoryKey, usize)>>(iter: I) -> Self {
        let mut hits = HitCounts::new();
        for (key, count) in iter {
            hits.add(key, count);
        }
        hits
    }
}

/// 文本脱敏结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedactionOutcome {
    pub redacted_text: String,
    pub hits: usize,
    pub hits_by_category: HitCounts,
}

/// 单个类别一步替换的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    pub text: String,
    pub count: usize,
}

/// 对文本进行脱敏
///
/// 空文本是正常输入，返回零命中。
pub fn redact_text(text: &str, config: &RedactionConfig) -> RedactionOutcome {
    let (redacted_text, hits_by_category) = config.active_categories().fold(
        (text.to_string(), HitCounts::new()),
        |(buffer, mut hits), category| {
            let step = apply_category(&buffer, category, config);
            hits.add(category.key, step.count);
            (step.text, hits)
        },
    );

    let hits = hits_by_category.total();
    log::debug!(
        "[Engine] 输入 {} 字符，命中 {} 处",
        text.chars().count(),
        hits
    );

    RedactionOutcome {
        redacted_text,
        hits,
        hits_by_category,
    }
}

/// 用一个类别对文本做一次从左到右的替换
pub fn apply_category(buffer: &str, category: &Category, config: &RedactionConfig) -> StepOutcome {
    let matches = category.find_all(buffer);
    if matches.is_empty() {
        return StepOutcome {
            text: buffer.to_string(),
            count: 0,
        };
    }

    let mut result = String::with_capacity(buffer.len());
    let mut last_end = 0;

    for m in &matches {
        result.push_str(&buffer[last_end..m.start]);
        result.push_str(&replacement(m, category, config));
        last_end = m.end;
    }
    result.push_str(&buffer[last_end..]);

    log::debug!("[Engine] 类别 {} 命中 {} 处", category.key, matches.len());

    StepOutcome {
        text: result,
        count: matches.len(),
    }
}

fn replacement(m: &CategoryMatch<'_>, category: &Category, config: &RedactionConfig) -> String {
    let tag = placeholder(category.key, config.locale);
    match category.mode {
        MatchMode::Plain => tag,
        MatchMode::Prefix | MatchMode::Phone => format!("{}{}", m.prefix.unwrap_or(""), tag),
        MatchMode::Money => money_placeholder(m.currency, m.amount, config.money, config.locale),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MoneyMode;
    use veil_rules::Locale;

    fn config(keys: &[CategoryKey], money: MoneyMode) -> RedactionConfig {
        RedactionConfig::new(keys.iter().copied(), money, Locale::En)
    }

    #[test]
    fn test_email_consumed_before_reference_and_number() {
        let cfg = config(
            &[CategoryKey::Email, CategoryKey::Reference, CategoryKey::Number],
            MoneyMode::Off,
        );
        let out = redact_text("REF-1234 a@b.com", &cfg);
        assert_eq!(out.redacted_text, "[REF] [EMAIL]");
        assert_eq!(out.hits, 2);
        assert_eq!(out.hits_by_category.get(CategoryKey::Email), 1);
        assert_eq!(out.hits_by_category.get(CategoryKey::Reference), 1);
        assert_eq!(out.hits_by_category.get(CategoryKey::Number), 0);
    }

    #[test]
    fn test_email_local_part_is_not_a_handle() {
        let cfg = config(&[CategoryKey::Email, CategoryKey::Handle], MoneyMode::Off);
        let out = redact_text("ping ops@example.com or @oncall", &cfg);
        assert_eq!(out.redacted_text, "ping [EMAIL] or [HANDLE]");
        assert_eq!(out.hits_by_category.get(CategoryKey::Handle), 1);
    }

    #[test]
    fn test_bank_beats_account() {
        let cfg = config(&[CategoryKey::Bank, CategoryKey::Account], MoneyMode::Off);
        let out = redact_text("Account: 6222021234567890123", &cfg);
        assert_eq!(out.redacted_text, "Account: [BANK]");
        assert_eq!(out.hits_by_category.get(CategoryKey::Account), 0);
    }

    #[test]
    fn test_prefix_and_phone_modes() {
        let cfg = config(
            &[CategoryKey::Account, CategoryKey::Phone, CategoryKey::Title],
            MoneyMode::Off,
        );
        let out = redact_text("Mr. John Smith, account no. 778899, +1 555-123-4567", &cfg);
        assert_eq!(
            out.redacted_text,
            "Mr. [NAME], account no. [ACCOUNT], +[PHONE]"
        );

        let out = redact_text("tel (555) 123-4567", &cfg);
        assert_eq!(out.redacted_text, "tel [PHONE]");
    }

    #[test]
    fn test_money_exact_and_range() {
        let exact = config(&[], MoneyMode::Exact);
        let out = redact_text("Total: $1,234.56 due", &exact);
        assert_eq!(out.redacted_text, "Total: [AMOUNT] due");
        assert_eq!(out.hits_by_category.get(CategoryKey::Money), 1);

        let range = config(&[], MoneyMode::Range);
        let out = redact_text("Total: $1,234.56 due", &range);
        assert_eq!(out.redacted_text, "Total: [AMOUNT USD≈1k–3k] due");

        let off = config(&[], MoneyMode::Off);
        let out = redact_text("Total: $1,234.56 due", &off);
        assert_eq!(out.redacted_text, "Total: $1,234.56 due");
        assert_eq!(out.hits, 0);
    }

    #[test]
    fn test_money_range_chinese_locale() {
        let cfg = RedactionConfig::new([], MoneyMode::Range, Locale::Zh);
        let out = redact_text("总金额为¥12,345.67元", &cfg);
        assert_eq!(out.redacted_text, "总金额为【金额 CNY≈10k–50k】元");
    }

    #[test]
    fn test_disabled_category_untouched() {
        let cfg = config(&[CategoryKey::Phone], MoneyMode::Off);
        let out = redact_text("mail a@b.com", &cfg);
        assert_eq!(out.redacted_text, "mail a@b.com");
        assert!(out.hits_by_category.is_empty());
    }

    #[test]
    fn test_empty_input_is_noop() {
        let out = redact_text("", &RedactionConfig::default());
        assert_eq!(out.redacted_text, "");
        assert_eq!(out.hits, 0);
    }

    #[test]
    fn test_second_pass_adds_no_hits() {
        let cfg = RedactionConfig {
            money: MoneyMode::Range,
            ..RedactionConfig::default()
        };
        let input = "Dear Ms. Lee, order REF-99812 for €2.500,00 ships to 221 Baker Street. \
                     Call +44 20-7946-0958 or mail lee@example.org, @lee_k, id 99812345.";
        let first = redact_text(input, &cfg);
        assert!(first.hits > 0);
        let second = redact_text(&first.redacted_text, &cfg);
        assert_eq!(second.hits, 0);
        assert_eq!(second.redacted_text, first.redacted_text);
    }

    #[test]
    fn test_apply_category_single_step() {
        let cfg = config(&[CategoryKey::Number], MoneyMode::Off);
        let number = veil_rules::category(CategoryKey::Number).unwrap();
        let step = apply_category("a 1234567 b 7654321", number, &cfg);
        assert_eq!(step.text, "a [NUMBER] b [NUMBER]");
        assert_eq!(step.count, 2);
    }

    #[test]
    fn test_uncompiled_category_leaves_text_unchanged() {
        let cfg = config(&[CategoryKey::Number], MoneyMode::Off);
        let broken = Category::new(CategoryKey::Number, "NUMBER", MatchMode::Plain, false, "(");
        let step = apply_category("id 1234567", &broken, &cfg);
        assert_eq!(step.text, "id 1234567");
        assert_eq!(step.count, 0);
    }

    #[test]
    fn test_year_range_is_not_a_phone() {
        let cfg = config(&[CategoryKey::Phone], MoneyMode::Off);
        let out = redact_text("fiscal years 2023-2024, call (555) 123-4567", &cfg);
        assert_eq!(out.redacted_text, "fiscal years 2023-2024, call [PHONE]");
        assert_eq!(out.hits, 1);
    }

    #[test]
    fn test_hits_serialize_as_map() {
        let hits: HitCounts = [(CategoryKey::Phone, 2), (CategoryKey::Email, 1)]
            .into_iter()
            .collect();
        let json = serde_json::to_string(&hits).unwrap();
        assert_eq!(json, r#"{"email":1,"phone":2}"#);
    }
}
