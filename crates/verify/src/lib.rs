//! Post-redaction verification checks.

use serde::{Deserialize, Serialize};
use veil_core::{redact_text, RedactionConfig};
use veil_render::{map_page, span_footprints, PageLayout, RedactionRect, Transcript};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VerifyOptions {
    /// 每个切片在每个方向上的采样点数
    pub coverage_grid: u32,
}

impl Default for VerifyOptions {
    fn default() -> Self {
        Self { coverage_grid: 5 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VerifyResult {
    pub ok: bool,
    pub warnings: Vec<String>,
}

impl VerifyResult {
    fn from_warnings(warnings: Vec<String>) -> Self {
        Self {
            ok: warnings.is_empty(),
            warnings,
        }
    }
}

/// 对已脱敏文本再跑一遍检测，残留命中记为警告
pub fn verify_text(redacted: &str, config: &RedactionConfig) -> VerifyResult {
    let residual = redact_text(redacted, config);
    let warnings = residual
        .hits_by_category
        .iter()
        .map(|(key, n)| format!("{key}: {n} residual match(es)"))
        .collect::<Vec<_>>();

    if !warnings.is_empty() {
        log::warn!("[Verify] 文本残留 {} 处", residual.hits);
    }
    VerifyResult::from_warnings(warnings)
}

/// 检查每个匹配区间的切片是否被 `rects` 完整覆盖
pub fn verify_page(
    layout: &PageLayout,
    config: &RedactionConfig,
    rects: &[RedactionRect],
    options: &VerifyOptions,
) -> VerifyResult {
    if !layout.has_valid_size() {
        return VerifyResult::from_warnings(Vec::new());
    }

    let spans = map_page(layout, config).spans;
    let transcript = Transcript::build(&layout.fragments);
    let steps = options.coverage_grid.max(2) - 1;

    let warnings: Vec<String> = span_footprints(layout, &transcript, &spans)
        .into_iter()
        .filter_map(|fp| fp.clamp(layout.width, layout.height))
        .filter(|fp| !is_covered(fp, rects, steps))
        .map(|fp| {
            format!(
                "footprint ({:.1}, {:.1}, {:.1}x{:.1}) not fully covered",
                fp.x, fp.y, fp.w, fp.h
            )
        })
        .collect();

    if !warnings.is_empty() {
        log::warn!("[Verify] {} 个切片未被完全覆盖", warnings.len());
    }
    VerifyResult::from_warnings(warnings)
}

fn is_covered(fp: &RedactionRect, rects: &[RedactionRect], steps: u32) -> bool {
    (0..=steps).all(|i| {
        (0..=steps).all(|j| {
            let px = fp.x + fp.w * f64::from(i) / f64::from(steps);
            let py = fp.y + fp.h * f64::from(j) / f64::from(steps);
            rects.iter().any(|r| r.contains_point(px, py, 1e-6))
        })
    })
}
