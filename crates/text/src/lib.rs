//! 纯文本文档处理器
//!
//! 实现 `Document` trait，支持 .txt 和 .md 文件的加载、文本提取和脱敏。

use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use veil_core::document::{Document, Page};
use veil_core::{redact_text, RedactionConfig, RedactionOutcome};

/// 支持的扩展名
pub const SUPPORTED_EXTENSIONS: &[&str] = &["txt", "md"];

/// 纯文本文档处理器
///
/// 整个文件内容作为单页处理。
#[derive(Debug, Clone)]
pub struct TextDocument {
    path: PathBuf,
    content: String,
}

impl TextDocument {
    /// 直接从内存文本构造（例如标准输入）
    pub fn from_string(content: impl Into<String>) -> Self {
        Self {
            path: PathBuf::from("-"),
            content: content.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// 脱敏并返回完整结果（含各类别命中数）
    pub fn redact_outcome(&self, config: &RedactionConfig) -> RedactionOutcome {
        redact_text(&self.content, config)
    }

    pub fn is_supported(path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| SUPPORTED_EXTENSIONS.iter().any(|s| s.eq_ignore_ascii_case(e)))
    }
}

impl Document for TextDocument {
    fn load(path: &Path) -> Result<Self>
    where
        Self: Sized,
    {
        if !path.exists() {
            return Err(anyhow!("文件不存在: {}", path.display()));
        }
        if !Self::is_supported(path) {
            log::warn!("[TextDocument] 非 .txt/.md 文件，按纯文本读取: {}", path.display());
        }

        let content =
            fs::read_to_string(path).with_context(|| format!("无法读取文件: {}", path.display()))?;

        log::info!("[TextDocument] 已加载 {}，{} 字符", path.display(), content.chars().count());
        Ok(Self {
            path: path.to_path_buf(),
            content,
        })
    }

    fn get_pages(&self) -> Result<Vec<Page>> {
        Ok(vec![Page {
            page_number: 1,
            content: self.content.clone(),
        }])
    }

    fn redact(&self, config: &RedactionConfig) -> Result<Vec<u8>> {
        Ok(self.redact_outcome(config).redacted_text.into_bytes())
    }

    fn get_supported_features(&self) -> Vec<String> {
        vec!["text_redact".to_string(), "risk_score".to_string()]
    }
}
