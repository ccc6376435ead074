//! 统一文档接口定义
//!
//! 文件处理器实现 `Document` trait 后，就能走同一条 提取 → 脱敏 → 校验 流程。

use crate::RedactionConfig;
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// 页面数据结构
///
/// 对于无分页概念的文件（如 .txt），整个文件内容作为页码为 1 的唯一页面。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// 页码，从 1 开始
    pub page_number: u32,
    pub content: String,
}

/// 统一文档接口
pub trait Document: Send + Sync {
    /// 加载文档
    ///
    /// 失败时返回明确的错误信息（文件不存在、编码错误等）。
    fn load(path: &std::path::Path) -> Result<Self>
    where
        Self: Sized;

    /// 按页面提取可供脱敏的纯文本
    fn get_pages(&self) -> Result<Vec<Page>>;

    /// 按配置快照执行脱敏，返回已脱敏文档的字节
    fn redact(&self, config: &RedactionConfig) -> Result<Vec<u8>>;

    /// 声明支持的功能，例如 `text_redact`、`risk_score`
    fn get_supported_features(&self) -> Vec<String>;

    /// 全部页面文本，页与页之间以换行分隔
    fn page_text(&self) -> Result<String> {
        let pages = self.get_pages()?;
        Ok(pages
            .iter()
            .map(|p| p.content.as_str())
            .collect::<Vec<_>>()
            .join("\n"))
    }
}
