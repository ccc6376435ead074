//! 风险评分
//!
//! 把各类别命中数与上下文信号折算成 0-100 的分数、等级和前三名贡献类别。
//! 权重是策略常量，相对排序比具体数值更重要。

use crate::engine::HitCounts;
use crate::MoneyMode;
use serde::{Deserialize, Serialize};
use veil_rules::CategoryKey;

/// 单个类别计入分数的命中上限
pub const PER_CATEGORY_CAP: usize = 12;

const LONG_INPUT: usize = 1_500;
const VERY_LONG_INPUT: usize = 4_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Mid,
    High,
}

impl RiskLevel {
    fn from_score(score: u32) -> Self {
        if score >= 70 {
            RiskLevel::High
        } else if score >= 35 {
            RiskLevel::Mid
        } else {
            RiskLevel::Low
        }
    }
}

/// 评分上下文
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RiskContext {
    pub money_mode: MoneyMode,
    /// 输入长度（字符数）
    pub input_length: usize,
    /// 输入是否来自解码后的文件
    pub from_file: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contributor {
    pub category: CategoryKey,
    pub count: usize,
    pub weight: f64,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskReport {
    pub score: u32,
    pub level: RiskLevel,
    pub top: Vec<Contributor>,
}

/// 类别权重
pub fn weight(key: CategoryKey) -> f64 {
    match key {
        CategoryKey::Bank => 18.0,
        CategoryKey::Account => 14.0,
        CategoryKey::Phone => 10.0,
        CategoryKey::Email => 8.0,
        CategoryKey::Address => 7.0,
        CategoryKey::Handle => 5.0,
        CategoryKey::Reference => 4.0,
        CategoryKey::Title => 3.0,
        CategoryKey::Number => 1.0,
        // 金额已经被泛化，暴露程度由金额模式加分体现
        CategoryKey::Money => 0.0,
    }
}

fn money_addend(mode: MoneyMode) -> f64 {
    match mode {
        MoneyMode::Off => 0.0,
        MoneyMode::Exact => 10.0,
        MoneyMode::Range => 14.0,
    }
}

fn length_addend(len: usize) -> f64 {
    let mut addend = 0.0;
    if len >= LONG_INPUT {
        addend += 6.0;
    }
    if len >= VERY_LONG_INPUT {
        addend += 8.0;
    }
    addend
}

impl Contributor {
    fn rank(&self) -> f64 {
        self.count as f64 * self.weight
    }
}

/// 计算风险报告
pub fn score_risk(hits: &HitCounts, ctx: &RiskContext) -> RiskReport {
    let mut contributors: Vec<Contributor> = hits
        .iter()
        .filter(|(_, count)| *count > 0)
        .map(|(category, count)| {
            let weight = weight(category);
            Contributor {
                category,
                count,
                weight,
                score: weight * count.min(PER_CATEGORY_CAP) as f64,
            }
        })
        .collect();

    let mut raw: f64 = contributors.iter().map(|c| c.score).sum();
    raw += money_addend(ctx.money_mode);
    raw += length_addend(ctx.input_length);
    if ctx.from_file {
        raw += 6.0;
    }

    let score = raw.round().clamp(0.0, 100.0) as u32;

    // 按未封顶的 count × weight 排名；稳定排序，同分时保持优先级顺序
    contributors.sort_by(|a, b| b.rank().total_cmp(&a.rank()));
    contributors.truncate(3);

    RiskReport {
        score,
        level: RiskLevel::from_score(score),
        top: contributors,
    }
}
