pub mod categories;
pub mod config;
pub mod page;
pub mod text;

use anyhow::Result;
use serde::Serialize;
use veil_core::{score_risk, HitCounts, RiskContext, RiskReport};
use veil_verify::VerifyResult;

/// `--report` 输出
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HitReport<'a> {
    pub hits: usize,
    pub hits_by_category: &'a HitCounts,
    pub risk: RiskReport,
}

pub fn print_report(hits: &HitCounts, ctx: &RiskContext) -> Result<()> {
    let report = HitReport {
        hits: hits.total(),
        hits_by_category: hits,
        risk: score_risk(hits, ctx),
    };
    log::info!("[Report] 风险分 {} ({:?})", report.risk.score, report.risk.level);
    eprintln!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// 校验失败时把警告写到 stderr 并返回错误
pub fn check(result: VerifyResult) -> Result<()> {
    if result.ok {
        return Ok(());
    }
    for warning in &result.warnings {
        eprintln!("warning: {warning}");
    }
    anyhow::bail!("verification failed with {} warning(s)", result.warnings.len())
}
