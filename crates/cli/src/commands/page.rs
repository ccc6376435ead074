use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use veil_core::{RedactionConfig, RiskContext};
use veil_render::{map_page, redact_page_image, PageLayout, PaintOptions};
use veil_verify::{verify_page, VerifyOptions};

pub struct PageArgs<'a> {
    pub layout: &'a Path,
    pub image: Option<&'a Path>,
    pub out: Option<&'a Path>,
    pub report: bool,
    pub verify: bool,
}

pub fn load_layout(path: &Path) -> Result<PageLayout> {
    let raw = fs::read_to_string(path).with_context(|| format!("无法读取布局文件: {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("布局文件格式错误: {}", path.display()))
}

pub fn handle(args: PageArgs<'_>, config: &RedactionConfig, paint: &PaintOptions) -> Result<()> {
    let layout = load_layout(args.layout)?;

    let result = match (args.image, args.out) {
        (Some(input), Some(output)) => {
            let mut image = image::open(input)
                .with_context(|| format!("无法打开图片: {}", input.display()))?
                .to_rgba8();
            let result = redact_page_image(&mut image, &layout, config, paint);
            image
                .save(output)
                .with_context(|| format!("无法写入图片: {}", output.display()))?;
            log::info!("[Page] 已写入 {}", output.display());
            result
        }
        _ => map_page(&layout, config),
    };

    println!("{}", serde_json::to_string_pretty(&result.rects)?);

    if args.report {
        let ctx = RiskContext {
            money_mode: config.money,
            input_length: layout.text().chars().count(),
            from_file: true,
        };
        super::print_report(&result.hits_by_category, &ctx)?;
    }

    if args.verify {
        super::check(verify_page(&layout, config, &result.rects, &VerifyOptions::default()))?;
    }
    Ok(())
}
