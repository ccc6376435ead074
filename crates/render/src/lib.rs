//! Geometric redaction: maps transcript matches back onto positioned page
//! fragments and paints opaque covers over a rendered page.

pub mod geometry;
pub mod mapper;
pub mod paint;
pub mod transcript;

pub use geometry::{Affine, RedactionRect};
pub use mapper::{compute_page_redaction_rects, map_page, span_footprints, PageRedaction};
pub use paint::{paint_redactions, redact_page_image, PaintOptions};
pub use transcript::{Span, Transcript};

use serde::{Deserialize, Serialize};

/// 页面上一段定位文本
///
/// `width` / `height` 为局部空间尺寸，由 `transform` 映射到页面像素空间；
/// 缺失时按 [`geometry::fallback_width`] / [`geometry::fallback_height`] 估算。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextFragment {
    pub text: String,
    /// 该片段之后是否换行
    #[serde(default)]
    pub line_terminal: bool,
    pub transform: Affine,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
}

/// 单页布局：页面像素尺寸与按阅读顺序排列的片段
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageLayout {
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub fragments: Vec<TextFragment>,
}

impl PageLayout {
    pub fn has_valid_size(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// 纯文本路径：不需要几何信息时的页面文本
    pub fn text(&self) -> String {
        Transcript::build(&self.fragments).text().to_string()
    }
}
