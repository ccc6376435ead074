use anyhow::{Context, Result};
use std::io::{self, Read, Write};
use std::path::Path;
use veil_core::document::Document;
use veil_core::{RedactionConfig, RiskContext};
use veil_text::TextDocument;
use veil_verify::verify_text;

pub fn handle(file: Option<&Path>, config: &RedactionConfig, report: bool, verify: bool) -> Result<()> {
    let doc = match file {
        Some(path) => TextDocument::load(path)?,
        None => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("无法读取标准输入")?;
            TextDocument::from_string(input)
        }
    };

    let outcome = doc.redact_outcome(config);
    log::info!("[Text] 命中 {} 处", outcome.hits);

    let mut stdout = io::stdout().lock();
    stdout.write_all(outcome.redacted_text.as_bytes())?;
    stdout.flush()?;

    if report {
        let ctx = RiskContext {
            money_mode: config.money,
            input_length: doc.content().chars().count(),
            from_file: file.is_some(),
        };
        super::print_report(&outcome.hits_by_category, &ctx)?;
    }

    if verify {
        super::check(verify_text(&outcome.redacted_text, config))?;
    }
    Ok(())
}
