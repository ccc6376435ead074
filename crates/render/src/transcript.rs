//! 页面文本转录与匹配区间
//!
//! 转录文本由片段按顺序拼接而成，仅在行尾片段之后插入一个换行符。
//! 所有区间都以字符（而非字节）为单位。

use crate::TextFragment;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use veil_core::{HitCounts, RedactionConfig};

/// 转录文本中的半开字符区间 `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone)]
pub struct Transcript {
    text: String,
    /// 每个片段在转录文本中的字符区间（不含换行）
    ranges: Vec<Range<usize>>,
    /// 每个字符起始的字节偏移
    char_starts: Vec<usize>,
}

impl Transcript {
    pub fn build(fragments: &[TextFragment]) -> Self {
        let mut text = String::new();
        let mut ranges = Vec::with_capacity(fragments.len());
        let mut cursor = 0;

        for fragment in fragments {
            let len = fragment.text.chars().count();
            text.push_str(&fragment.text);
            ranges.push(cursor..cursor + len);
            cursor += len;
            if fragment.line_terminal {
                text.push('\n');
                cursor += 1;
            }
        }

        let char_starts = text.char_indices().map(|(i, _)| i).collect();
        Self {
            text,
            ranges,
            char_starts,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn char_len(&self) -> usize {
        self.char_starts.len()
    }

    pub fn fragment_range(&self, index: usize) -> Option<Range<usize>> {
        self.ranges.get(index).cloned()
    }

    pub fn fragment_ranges(&self) -> &[Range<usize>] {
        &self.ranges
    }

    /// 字节偏移 → 字符偏移
    pub fn char_offset(&self, byte: usize) -> usize {
        self.char_starts.partition_point(|&b| b < byte)
    }
}

/// 用所有生效类别扫描转录文本
///
/// 前缀类与电话类只记录被替换的部分，保留的前缀不进入区间。
pub fn discover_spans(transcript: &Transcript, config: &RedactionConfig) -> (Vec<Span>, HitCounts) {
    let mut spans = Vec::new();
    let mut hits = HitCounts::new();

    for category in config.active_categories() {
        let found = category.find_all(transcript.text());
        hits.add(category.key, found.len());
        spans.extend(found.iter().filter_map(|m| {
            let span = Span::new(
                transcript.char_offset(m.redacted_start()),
                transcript.char_offset(m.end),
            );
            (!span.is_empty()).then_some(span)
        }));
    }

    (spans, hits)
}

/// 第一轮合并：按起点排序，间隔不超过 1 个字符的区间合并
pub fn merge_spans(mut spans: Vec<Span>) -> Vec<Span> {
    spans.sort();
    let mut merged: Vec<Span> = Vec::with_capacity(spans.len());
    for span in spans {
        match merged.last_mut() {
            Some(last) if span.start <= last.end + 1 => {
                last.end = last.end.max(span.end);
            }
            _ => merged.push(span),
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Affine;
    use veil_core::{CategoryKey, Locale, MoneyMode};

    fn frag(text: &str, line_terminal: bool) -> TextFragment {
        TextFragment {
            text: text.to_string(),
            line_terminal,
            transform: Affine::IDENTITY,
            width: None,
            height: None,
        }
    }

    #[test]
    fn test_transcript_joins_without_separator() {
        let t = Transcript::build(&[frag("Call ", false), frag("555", true), frag("next", false)]);
        assert_eq!(t.text(), "Call 555\nnext");
        assert_eq!(t.fragment_range(0), Some(0..5));
        assert_eq!(t.fragment_range(1), Some(5..8));
        assert_eq!(t.fragment_range(2), Some(9..13));
        assert_eq!(t.char_len(), 13);
    }

    #[test]
    fn test_char_offsets_for_multibyte_text() {
        let t = Transcript::build(&[frag("电话：", false), frag("abc", false)]);
        // "电话：" 每个字符 3 字节
        assert_eq!(t.char_offset(0), 0);
        assert_eq!(t.char_offset(9), 3);
        assert_eq!(t.char_offset(12), 6);
        assert_eq!(t.fragment_range(1), Some(3..6));
    }

    #[test]
    fn test_empty_layout() {
        let t = Transcript::build(&[]);
        assert_eq!(t.text(), "");
        assert_eq!(t.char_len(), 0);
        let (spans, hits) = discover_spans(&t, &RedactionConfig::default());
        assert!(spans.is_empty());
        assert!(hits.is_empty());
    }

    #[test]
    fn test_discover_skips_preserved_prefix() {
        let t = Transcript::build(&[frag("Mr. John Smith", false)]);
        let config = RedactionConfig::new([CategoryKey::Title], MoneyMode::Off, Locale::En);
        let (spans, hits) = discover_spans(&t, &config);
        assert_eq!(spans, vec![Span::new(4, 14)]);
        assert_eq!(hits.get(CategoryKey::Title), 1);
    }

    #[test]
    fn test_match_across_fragments() {
        let t = Transcript::build(&[frag("jane.doe@", false), frag("example.com", false)]);
        let config = RedactionConfig::new([CategoryKey::Email], MoneyMode::Off, Locale::En);
        let (spans, _) = discover_spans(&t, &config);
        assert_eq!(spans, vec![Span::new(0, 20)]);
    }

    #[test]
    fn test_merge_spans() {
        let merged = merge_spans(vec![
            Span::new(10, 12),
            Span::new(0, 4),
            Span::new(5, 8),
            Span::new(3, 6),
            Span::new(20, 25),
        ]);
        assert_eq!(merged, vec![Span::new(0, 8), Span::new(10, 12), Span::new(20, 25)]);
    }

    #[test]
    fn test_merge_bridges_single_gap_only() {
        let merged = merge_spans(vec![Span::new(0, 4), Span::new(5, 9), Span::new(11, 13)]);
        assert_eq!(merged, vec![Span::new(0, 9), Span::new(11, 13)]);
    }
}
