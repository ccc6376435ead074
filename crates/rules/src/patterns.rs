//! 类别正则源
//!
//! 每个类别一条正则。前缀/电话模式下，第一个参与匹配且位于匹配起点的
//! 捕获组即为需要保留的前缀；金额类别使用命名捕获组。
//!
//! 注意：`\b` 对汉字同样视为单词字符，所以紧贴汉字的数字串不能依赖 `\b`，
//! 这类类别改用注册表里的 `digit_guard` 做数字边界检查。

pub(crate) const EMAIL: &str = r"[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(?:\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,}";

/// IBAN、4×4 分组卡号、16-19 位连续数字（银行卡/身份证类长串）
pub(crate) const BANK: &str = concat!(
    r"\b[A-Z]{2}\d{2}(?: ?[A-Z0-9]{4}){3,7}(?: ?[A-Z0-9]{1,3})?\b",
    r"|\d{4}(?:[ \-]\d{4}){3}(?:\d{1,3})?",
    r"|\d{16,19}",
);

pub(crate) const ACCOUNT: &str = concat!(
    r"(?i)(\b(?:account|acct|a/c|customer\s*id|user\s*id|member\s*(?:no|id))\.?\s*(?:no\.?|number|#)?\s*[:：#]?\s*)",
    r"([A-Z0-9][A-Z0-9\-]*\d{3,}[A-Z0-9\-]*)",
    r"|((?:账户|账号|户号|会员号|客户号)\s*[:：]?\s*)",
    r"([A-Za-z0-9][A-Za-z0-9\-]*\d{3,}[A-Za-z0-9\-]*)",
);

/// 可选的 `+` 前缀（保留）、国家码、区号（必需）、本地号码；或中国大陆手机号
///
/// 不带区号的 `2023-2024` 这类年份区间不算电话。
pub(crate) const PHONE: &str = concat!(
    r"(\+)?(?:\d{1,3}[ .\-])?",
    r"(?:1[3-9]\d{9}|(?:\(\d{2,4}\) ?|\d{2,4}[ .\-])\d{3,4}[ .\-]\d{4})",
);

/// 金额：币种在前或在后。千分位允许 `,` `.` 及不换行空格。
/// 前置币种代码不加 `\b`，否则紧跟汉字时（如 `折合USD 1,700`）无法匹配
pub(crate) const MONEY: &str = concat!(
    r"(?:(?P<cur>[$€£¥￥]|USD|EUR|GBP|CNY|RMB|JPY|HKD)\s?",
    r"(?P<amt>\d{1,3}(?:[,.\x{00A0}\x{202F}\x{2009}]\d{3})+(?:[.,]\d{1,2})?|\d+(?:[.,]\d{1,2})?))",
    r"|(?:(?P<amt2>\d{1,3}(?:[,.\x{00A0}\x{202F}\x{2009}]\d{3})+(?:[.,]\d{1,2})?|\d+(?:[.,]\d{1,2})?)\s?",
    r"(?P<cur2>元|块|[€$]|(?:USD|EUR|GBP|CNY|RMB|JPY|HKD)\b))",
);

pub(crate) const ADDRESS: &str = concat!(
    r"\b\d{1,5}\s+(?:[A-Z][a-z]+\s+){1,3}",
    r"(?:Street|St|Avenue|Ave|Road|Rd|Boulevard|Blvd|Lane|Ln|Drive|Dr|Court|Ct|Way|Place|Pl)\b\.?",
    r"|\p{Han}{2,10}?(?:路|街|大道|巷|弄)\d{1,5}(?:号|號)(?:\d{1,5}室)?",
);

/// 分隔符（保留）+ `@name`
pub(crate) const HANDLE: &str = r"(^|[\s(（:：,，;；])@[A-Za-z0-9_]{2,30}\b";

pub(crate) const REFERENCE: &str = concat!(
    r"\b(?i:ref|invoice|inv|order|ord|po|txn|case|ticket)(?:\s?(?i:no\.?|#))?[\s\-#:：]{0,3}",
    r"[A-Z0-9][A-Z0-9\-]*\d[A-Z0-9\-]*\b",
    r"|(?:订单号|单号|发票号|流水号|编号)\s*[:：]?\s*[A-Za-z0-9\-]*\d[A-Za-z0-9\-]*",
);

/// 称谓（保留）+ 姓名；或 `姓名：` 一类标签（保留）+ 汉字姓名
pub(crate) const TITLE: &str = concat!(
    r"\b((?:Mr|Mrs|Ms|Miss|Dr|Prof)\.?\s+)[A-Z][a-z]+(?:\s+[A-Z][a-z]+)?",
    r"|((?:姓名|联系人|收件人|收货人)\s*[:：]\s*)\p{Han}{2,4}",
);

pub(crate) const NUMBER: &str = r"\d{6,}";
