//! 几何脱敏映射
//!
//! 把转录文本上的匹配区间映射回页面片段，得到覆盖匹配字符的最少矩形：
//!
//! 1. 转录 → 区间 → 第一轮区间合并
//! 2. 区间 × 片段 → 局部切片 → 外扩
//! 3. 过宽矩形拆块
//! 4. 第二轮（严格）矩形合并
//! 5. 裁剪到页面

use crate::geometry::{local_extent, slice_fragment, RedactionRect};
use crate::transcript::{discover_spans, merge_spans, Span, Transcript};
use crate::PageLayout;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use veil_core::{HitCounts, RedactionConfig};

/// 超过页面宽度 45% 的矩形需要拆块
pub const WIDE_RATIO: f64 = 0.45;
/// 拆块的目标宽度：页面宽度的 22%
pub const CHUNK_RATIO: f64 = 0.22;
pub const MIN_CHUNKS: usize = 2;
pub const MAX_CHUNKS: usize = 4;
/// 第二轮合并：上沿或下沿的对齐容差（像素）
pub const ALIGN_TOLERANCE: f64 = 4.0;
/// 第二轮合并：水平间隙容差（像素）
pub const GAP_TOLERANCE: f64 = 2.0;

/// 单页的映射结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRedaction {
    pub rects: Vec<RedactionRect>,
    /// 第一轮合并后的区间
    pub spans: Vec<Span>,
    pub hits_by_category: HitCounts,
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    rect: RedactionRect,
    /// 拆出来的块不再参与合并
    locked: bool,
}

/// 计算单页的脱敏矩形
pub fn compute_page_redaction_rects(layout: &PageLayout, config: &RedactionConfig) -> Vec<RedactionRect> {
    map_page(layout, config).rects
}

pub fn map_page(layout: &PageLayout, config: &RedactionConfig) -> PageRedaction {
    if !layout.has_valid_size() || layout.fragments.is_empty() {
        return PageRedaction {
            rects: Vec::new(),
            spans: Vec::new(),
            hits_by_category: HitCounts::new(),
        };
    }

    let transcript = Transcript::build(&layout.fragments);
    let (raw_spans, hits_by_category) = discover_spans(&transcript, config);
    let spans = merge_spans(raw_spans);

    let candidates: Vec<Candidate> = span_footprints(layout, &transcript, &spans)
        .into_iter()
        .flat_map(|rect| split_wide(rect, layout.width))
        .collect();
    let sliced = candidates.len();

    let rects: Vec<RedactionRect> = merge_rects(candidates, layout.width)
        .into_iter()
        .filter_map(|r| r.clamp(layout.width, layout.height))
        .collect();

    log::debug!(
        "[Mapper] {} 个片段，{} 个区间，{} 个切片 → {} 个矩形",
        layout.fragments.len(),
        spans.len(),
        sliced,
        rects.len()
    );

    PageRedaction {
        rects,
        spans,
        hits_by_category,
    }
}

/// 每个区间与每个相交片段的切片外接矩形（已外扩，未拆块、未裁剪）
pub fn span_footprints(layout: &PageLayout, transcript: &Transcript, spans: &[Span]) -> Vec<RedactionRect> {
    let mut out = Vec::new();
    for span in spans {
        for (fragment, range) in layout.fragments.iter().zip(transcript.fragment_ranges()) {
            let lo = span.start.max(range.start);
            let hi = span.end.min(range.end);
            if lo >= hi {
                continue;
            }
            let chars = range.end - range.start;
            let extent = local_extent(&fragment.text, fragment.width, fragment.height);
            if let Some(rect) = slice_fragment(
                &fragment.transform,
                extent,
                chars,
                lo - range.start,
                hi - range.start,
            ) {
                out.push(rect);
            }
        }
    }
    out
}

/// 过宽矩形拆成 2-4 个等宽的连续块
fn split_wide(rect: RedactionRect, page_width: f64) -> Vec<Candidate> {
    if rect.w <= WIDE_RATIO * page_width {
        return vec![Candidate {
            rect,
            locked: false,
        }];
    }

    let n = ((rect.w / (CHUNK_RATIO * page_width)).round() as usize).clamp(MIN_CHUNKS, MAX_CHUNKS);
    let edge = |i: usize| rect.x + rect.w * i as f64 / n as f64;
    (0..n)
        .map(|i| Candidate {
            rect: RedactionRect::new(edge(i), rect.y, edge(i + 1) - edge(i), rect.h),
            locked: true,
        })
        .collect()
}

fn by_position(a: &RedactionRect, b: &RedactionRect) -> Ordering {
    a.y.total_cmp(&b.y).then(a.x.total_cmp(&b.x))
}

fn can_merge(a: &Candidate, b: &Candidate, page_width: f64) -> bool {
    if a.locked || b.locked {
        return false;
    }
    let (a, b) = (&a.rect, &b.rect);
    let aligned = (a.y - b.y).abs() <= ALIGN_TOLERANCE || (a.bottom() - b.bottom()).abs() <= ALIGN_TOLERANCE;
    let touching = a.x <= b.right() + GAP_TOLERANCE && b.x <= a.right() + GAP_TOLERANCE;
    aligned && touching && a.union(b).w <= WIDE_RATIO * page_width
}

/// 第二轮合并，直到不再有可合并的矩形；结果按 (上沿, 左沿) 排序
fn merge_rects(mut items: Vec<Candidate>, page_width: f64) -> Vec<RedactionRect> {
    // 每轮按位置扫描一遍，把后来者并入已有矩形；某轮无合并即到达不动点
    loop {
        items.sort_by(|a, b| by_position(&a.rect, &b.rect));

        let before = items.len();
        let mut merged: Vec<Candidate> = Vec::with_capacity(before);
        for item in items {
            match merged
                .iter_mut()
                .rev()
                .find(|m| can_merge(m, &item, page_width))
            {
                Some(target) => target.rect = target.rect.union(&item.rect),
                None => merged.push(item),
            }
        }

        items = merged;
        if items.len() == before {
            break;
        }
    }
    items.sort_by(|a, b| by_position(&a.rect, &b.rect));
    items.into_iter().map(|c| c.rect).collect()
}
