//! 栅格涂黑
//!
//! 在页面位图上把脱敏矩形画成不透明色块。位图尺寸与页面尺寸不同时按比例缩放，
//! 左上角向下取整、右下角向上取整，保证色块不会比矩形小。

use crate::geometry::RedactionRect;
use crate::mapper::{map_page, PageRedaction};
use crate::PageLayout;
use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;
use serde::{Deserialize, Serialize};
use veil_core::RedactionConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PaintOptions {
    /// 填充色 RGBA，默认纯黑
    pub fill: [u8; 4],
}

impl Default for PaintOptions {
    fn default() -> Self {
        Self {
            fill: [0, 0, 0, 255],
        }
    }
}

/// 把矩形画到位图上，返回实际绘制的数量
pub fn paint_redactions(
    image: &mut RgbaImage,
    page_size: (f64, f64),
    rects: &[RedactionRect],
    options: &PaintOptions,
) -> usize {
    let (page_width, page_height) = page_size;
    if !page_width.is_finite() || !page_height.is_finite() || page_width <= 0.0 || page_height <= 0.0 {
        log::warn!("[Paint] 页面尺寸无效: {}x{}", page_width, page_height);
        return 0;
    }

    let (img_w, img_h) = image.dimensions();
    let sx = img_w as f64 / page_width;
    let sy = img_h as f64 / page_height;
    let fill = Rgba(options.fill);
    let mut painted = 0;

    for rect in rects {
        let x0 = (rect.x * sx).floor().max(0.0);
        let y0 = (rect.y * sy).floor().max(0.0);
        let x1 = (rect.right() * sx).ceil().min(img_w as f64);
        let y1 = (rect.bottom() * sy).ceil().min(img_h as f64);
        if !rect.is_finite() || x1 <= x0 || y1 <= y0 {
            continue;
        }

        let (x, y) = (x0 as u32, y0 as u32);
        let (w, h) = (x1 as u32 - x, y1 as u32 - y);
        draw_filled_rect_mut(image, Rect::at(x as i32, y as i32).of_size(w, h), fill);
        log::debug!("[Paint] 绘制色块: ({}, {}, {}, {})", x, y, w, h);
        painted += 1;
    }

    painted
}

/// 对单页位图完成 映射 + 涂黑
pub fn redact_page_image(
    image: &mut RgbaImage,
    layout: &PageLayout,
    config: &RedactionConfig,
    options: &PaintOptions,
) -> PageRedaction {
    let result = map_page(layout, config);
    let painted = paint_redactions(image, (layout.width, layout.height), &result.rects, options);
    log::info!("[Paint] 页面涂黑 {} 处", painted);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Affine;
    use crate::TextFragment;
    use veil_core::{CategoryKey, Locale, MoneyMode};

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

    fn blank(w: u32, h: u32) -> RgbaImage {
        RgbaImage::from_pixel(w, h, WHITE)
    }

    #[test]
    fn test_paint_same_scale() {
        let mut img = blank(100, 100);
        let rects = [RedactionRect::new(10.0, 10.0, 20.0, 20.0)];
        let n = paint_redactions(&mut img, (100.0, 100.0), &rects, &PaintOptions::default());
        assert_eq!(n, 1);
        assert_eq!(*img.get_pixel(15, 15), BLACK);
        assert_eq!(*img.get_pixel(29, 29), BLACK);
        assert_eq!(*img.get_pixel(30, 30), WHITE);
        assert_eq!(*img.get_pixel(5, 5), WHITE);
    }

    #[test]
    fn test_paint_scales_and_rounds_outward() {
        let mut img = blank(100, 100);
        let rects = [RedactionRect::new(10.2, 10.2, 4.6, 4.6)];
        paint_redactions(&mut img, (50.0, 50.0), &rects, &PaintOptions::default());
        // 10.2×2 = 20.4 → 20，14.8×2 = 29.6 → 30
        assert_eq!(*img.get_pixel(20, 20), BLACK);
        assert_eq!(*img.get_pixel(29, 29), BLACK);
        assert_eq!(*img.get_pixel(19, 19), WHITE);
        assert_eq!(*img.get_pixel(30, 30), WHITE);
    }

    #[test]
    fn test_paint_skips_degenerate_and_offscreen() {
        let mut img = blank(10, 10);
        let rects = [
            RedactionRect::new(20.0, 20.0, 5.0, 5.0),
            RedactionRect::new(2.0, 2.0, 0.0, 0.0),
        ];
        assert_eq!(paint_redactions(&mut img, (10.0, 10.0), &rects, &PaintOptions::default()), 0);
        assert_eq!(paint_redactions(&mut img, (0.0, 10.0), &rects, &PaintOptions::default()), 0);
    }

    #[test]
    fn test_custom_fill() {
        let mut img = blank(10, 10);
        let options = PaintOptions {
            fill: [255, 0, 0, 255],
        };
        paint_redactions(&mut img, (10.0, 10.0), &[RedactionRect::new(0.0, 0.0, 10.0, 10.0)], &options);
        assert_eq!(*img.get_pixel(9, 9), Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn test_redact_page_image() {
        let layout = PageLayout {
            width: 200.0,
            height: 100.0,
            fragments: vec![TextFragment {
                text: "a@b.com".to_string(),
                line_terminal: false,
                transform: Affine::text_run(10.0, 20.0, 50.0),
                width: None,
                height: None,
            }],
        };
        let config = RedactionConfig::new([CategoryKey::Email], MoneyMode::Off, Locale::En);
        let mut img = blank(400, 200);
        let result = redact_page_image(&mut img, &layout, &config, &PaintOptions::default());
        assert_eq!(result.rects.len(), 1);
        // 页面 (30, 45) → 位图 (60, 90)
        assert_eq!(*img.get_pixel(60, 90), BLACK);
        assert_eq!(*img.get_pixel(5, 5), WHITE);
    }
}
