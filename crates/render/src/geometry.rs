//! 片段几何：仿射变换、局部字形框、切片与外扩

use serde::{Deserialize, Serialize};

/// 局部空间中字形框的下沿（基线以下 20%）
const DESCENT: f64 = 0.2;
/// 局部空间中字形框的上沿（基线以上 80%）
const ASCENT: f64 = 0.8;

/// 切片左右各外扩宽度的 3%
pub const PAD_X_RATIO: f64 = 0.03;
/// 切片上下各外扩高度的 12%
pub const PAD_Y_RATIO: f64 = 0.12;

/// 仿射变换 `[a, b, c, d, e, f]`
///
/// 局部坐标 `(x, y)` 映射到页面坐标 `(a·x + c·y + e, b·x + d·y + f)`。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Affine(pub [f64; 6]);

impl Default for Affine {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Affine {
    pub const IDENTITY: Affine = Affine([1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);

    /// 字号为 `size`、基线原点在 `(x, y)` 的 y 轴向下的页面变换
    pub fn text_run(size: f64, x: f64, y: f64) -> Self {
        Affine([size, 0.0, 0.0, -size, x, y])
    }

    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        let [a, b, c, d, e, f] = self.0;
        (a * x + c * y + e, b * x + d * y + f)
    }

    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }
}

/// 页面像素空间中的轴对齐矩形
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RedactionRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl RedactionRect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    fn from_edges(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            x: left,
            y: top,
            w: right - left,
            h: bottom - top,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    pub fn area(&self) -> f64 {
        self.w * self.h
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.w.is_finite() && self.h.is_finite()
    }

    /// 同时包含两个矩形的最小矩形
    pub fn union(&self, other: &RedactionRect) -> RedactionRect {
        RedactionRect::from_edges(
            self.x.min(other.x),
            self.y.min(other.y),
            self.right().max(other.right()),
            self.bottom().max(other.bottom()),
        )
    }

    pub fn contains_point(&self, px: f64, py: f64, eps: f64) -> bool {
        px >= self.x - eps && px <= self.right() + eps && py >= self.y - eps && py <= self.bottom() + eps
    }

    /// 向四周外扩
    pub fn pad(&self, ratio_x: f64, ratio_y: f64) -> RedactionRect {
        let dx = self.w * ratio_x;
        let dy = self.h * ratio_y;
        RedactionRect::from_edges(self.x - dx, self.y - dy, self.right() + dx, self.bottom() + dy)
    }

    /// 裁剪到 `[0, width] × [0, height]`；面积为零时返回 `None`
    pub fn clamp(&self, width: f64, height: f64) -> Option<RedactionRect> {
        let left = self.x.max(0.0);
        let top = self.y.max(0.0);
        let right = self.right().min(width);
        let bottom = self.bottom().min(height);
        if right > left && bottom > top {
            Some(RedactionRect::from_edges(left, top, right, bottom))
        } else {
            None
        }
    }
}

/// 单字符的估算宽度（em）
pub fn estimate_char_width(ch: char) -> f64 {
    if ch.is_ascii() {
        0.55
    } else {
        1.0
    }
}

/// 估算文字宽度（em）
pub fn estimate_text_width(text: &str) -> f64 {
    text.chars().map(estimate_char_width).sum()
}

/// 片段在局部空间中的尺寸
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalExtent {
    pub width: f64,
    pub height: f64,
}

fn positive(v: Option<f64>) -> Option<f64> {
    v.filter(|v| v.is_finite() && *v > 0.0)
}

/// 高度回退：缺失或非正时取 1 em，字号由变换的缩放承担
pub fn fallback_height(height: Option<f64>) -> f64 {
    positive(height).unwrap_or(1.0)
}

/// 宽度回退：缺失或非正时按字符估算宽度 × 高度
pub fn fallback_width(width: Option<f64>, text: &str, height: f64) -> f64 {
    positive(width).unwrap_or_else(|| estimate_text_width(text) * height)
}

pub fn local_extent(text: &str, width: Option<f64>, height: Option<f64>) -> LocalExtent {
    let height = fallback_height(height);
    LocalExtent {
        width: fallback_width(width, text, height),
        height,
    }
}

/// 把局部空间的 `x ∈ [x0, x1]` 字形条带变换到页面，取四角的外接矩形
pub fn local_slice_bounds(transform: &Affine, extent: LocalExtent, x0: f64, x1: f64) -> RedactionRect {
    let y0 = -DESCENT * extent.height;
    let y1 = ASCENT * extent.height;
    let corners = [
        transform.apply(x0, y0),
        transform.apply(x1, y0),
        transform.apply(x1, y1),
        transform.apply(x0, y1),
    ];

    let (mut left, mut top) = corners[0];
    let (mut right, mut bottom) = corners[0];
    for (px, py) in &corners[1..] {
        left = left.min(*px);
        right = right.max(*px);
        top = top.min(*py);
        bottom = bottom.max(*py);
    }
    RedactionRect::from_edges(left, top, right, bottom)
}

/// 字符区间 `[from, to)` 在 `chars` 个字符的片段中对应的页面外接矩形（已外扩）
///
/// 片段内字符按等宽处理。
pub fn slice_fragment(
    transform: &Affine,
    extent: LocalExtent,
    chars: usize,
    from: usize,
    to: usize,
) -> Option<RedactionRect> {
    if chars == 0 || from >= to || !transform.is_finite() {
        return None;
    }
    let n = chars as f64;
    let x0 = extent.width * from as f64 / n;
    let x1 = extent.width * to.min(chars) as f64 / n;
    let rect = local_slice_bounds(transform, extent, x0, x1).pad(PAD_X_RATIO, PAD_Y_RATIO);
    rect.is_finite().then_some(rect)
}
