//! 金额规范化与区间分桶
//!
//! 目标是只披露量级、不披露具体数字：先把地区写法各异的金额串解析成数字，
//! 再按币种族映射到一个粗粒度区间。

use crate::MoneyMode;
use veil_rules::{placeholder, placeholder_with_detail, CategoryKey, Locale};

/// 币种族，决定使用哪一套区间
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrencyFamily {
    /// 人民币（CNY/RMB/¥/元），区间更宽
    Yuan,
    /// 其他币种
    Standard,
}

/// 半开区间 `[lower, upper)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub lower: f64,
    pub upper: f64,
    pub label: &'static str,
}

const STANDARD_BANDS: [Band; 7] = [
    Band { lower: 0.0, upper: 100.0, label: "<100" },
    Band { lower: 100.0, upper: 500.0, label: "100–500" },
    Band { lower: 500.0, upper: 1_000.0, label: "500–1k" },
    Band { lower: 1_000.0, upper: 3_000.0, label: "1k–3k" },
    Band { lower: 3_000.0, upper: 10_000.0, label: "3k–10k" },
    Band { lower: 10_000.0, upper: 50_000.0, label: "10k–50k" },
    Band { lower: 50_000.0, upper: f64::INFINITY, label: "50k+" },
];

const YUAN_BANDS: [Band; 6] = [
    Band { lower: 0.0, upper: 500.0, label: "<500" },
    Band { lower: 500.0, upper: 2_000.0, label: "500–2k" },
    Band { lower: 2_000.0, upper: 10_000.0, label: "2k–10k" },
    Band { lower: 10_000.0, upper: 50_000.0, label: "10k–50k" },
    Band { lower: 50_000.0, upper: 200_000.0, label: "50k–200k" },
    Band { lower: 200_000.0, upper: f64::INFINITY, label: "200k+" },
];

/// 将金额串解析为数字
///
/// - 去掉所有空白（含不换行空格）
/// - `.` 与 `,` 同时出现：靠后的那个是小数点，另一个是千分位
/// - 只出现一种：最后一次出现之后恰好 1-2 位数字时是小数点，否则是千分位
///
/// 无法解析时返回 `None`。
pub fn normalize_amount(raw: &str) -> Option<f64> {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return None;
    }

    let canonical = match (compact.rfind('.'), compact.rfind(',')) {
        (Some(dot), Some(comma)) => {
            let (decimal, thousands) = if dot > comma { ('.', ',') } else { (',', '.') };
            compact.replace(thousands, "").replace(decimal, ".")
        }
        (None, Some(_)) => resolve_single_separator(&compact, ','),
        (Some(_), None) => resolve_single_separator(&compact, '.'),
        (None, None) => compact,
    };

    let digits = canonical.chars().filter(char::is_ascii_digit).count();
    let dots = canonical.chars().filter(|c| *c == '.').count();
    if digits == 0 || dots > 1 || digits + dots != canonical.chars().count() {
        return None;
    }

    canonical.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn resolve_single_separator(s: &str, sep: char) -> String {
    let Some(idx) = s.rfind(sep) else {
        return s.to_string();
    };
    let tail = &s[idx + sep.len_utf8()..];
    if (1..=2).contains(&tail.len()) && tail.chars().all(|c| c.is_ascii_digit()) {
        format!("{}.{}", s[..idx].replace(sep, ""), tail)
    } else {
        s.replace(sep, "")
    }
}

/// 币种符号/代码规范化
pub fn normalize_currency(hint: &str) -> String {
    let trimmed = hint.trim();
    match trimmed.to_uppercase().as_str() {
        "€" | "EUR" => "EUR".to_string(),
        "$" | "USD" => "USD".to_string(),
        "¥" | "￥" | "元" | "块" | "CNY" | "RMB" => "CNY".to_string(),
        other => other.to_string(),
    }
}

pub fn currency_family(hint: &str) -> CurrencyFamily {
    if normalize_currency(hint) == "CNY" {
        CurrencyFamily::Yuan
    } else {
        CurrencyFamily::Standard
    }
}

pub fn bands(family: CurrencyFamily) -> &'static [Band] {
    match family {
        CurrencyFamily::Yuan => &YUAN_BANDS,
        CurrencyFamily::Standard => &STANDARD_BANDS,
    }
}

/// 查找金额所在区间；非有限值或非正数返回 `None`
pub fn find_band(currency_hint: &str, amount: f64) -> Option<&'static Band> {
    if !amount.is_finite() || amount <= 0.0 {
        return None;
    }
    bands(currency_family(currency_hint))
        .iter()
        .find(|b| amount < b.upper)
}

/// 金额区间标签；返回 `None` 时调用方应退回通用的金额占位符
pub fn bucket_amount(currency_hint: &str, amount: f64) -> Option<&'static str> {
    find_band(currency_hint, amount).map(|b| b.label)
}

/// 金额匹配的替换文本
pub fn money_placeholder(
    currency: Option<&str>,
    amount: Option<&str>,
    mode: MoneyMode,
    locale: Locale,
) -> String {
    if mode != MoneyMode::Range {
        return placeholder(CategoryKey::Money, locale);
    }

    let currency = currency.unwrap_or("");
    let label = amount
        .and_then(normalize_amount)
        .and_then(|value| bucket_amount(currency, value));

    match label {
        Some(label) => {
            let detail = format!("{}≈{}", normalize_currency(currency), label);
            placeholder_with_detail(CategoryKey::Money, &detail, locale)
        }
        None => placeholder(CategoryKey::Money, locale),
    }
}
