//! Per-page text structure reported by a rendering backend.

use super::TextSpan;
use serde::{Deserialize, Serialize};

/// The styled text of one page, nested as blocks of lines of spans.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageText {
    /// Page number (1-indexed)
    pub number: u32,

    /// Text blocks in reading order
    pub blocks: Vec<TextBlock>,
}

impl PageText {
    /// Create an empty page.
    pub fn new(number: u32) -> Self {
        Self {
            number,
            blocks: Vec::new(),
        }
    }

    /// Create a page holding a single block with one line per span.
    ///
    /// Convenient for callers that already have a flat span list.
    pub fn from_spans(number: u32, spans: Vec<TextSpan>) -> Self {
        let lines = spans
            .into_iter()
            .map(|span| TextLine { spans: vec![span] })
            .collect();
        Self {
            number,
            blocks: vec![TextBlock { lines }],
        }
    }

    /// Append a block.
    pub fn add_block(&mut self, block: TextBlock) {
        self.blocks.push(block);
    }

    /// Total number of spans on the page.
    pub fn span_count(&self) -> usize {
        self.blocks
            .iter()
            .flat_map(|b| &b.lines)
            .map(|l| l.spans.len())
            .sum()
    }

    /// Check if the page has no spans at all.
    pub fn is_empty(&self) -> bool {
        self.span_count() == 0
    }
}

/// A block of lines (one text object in the content stream).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    pub lines: Vec<TextLine>,
}

impl TextBlock {
    pub fn new(lines: Vec<TextLine>) -> Self {
        Self { lines }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|l| l.spans.is_empty())
    }
}

/// Spans sharing one baseline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextLine {
    pub spans: Vec<TextSpan>,
}

impl TextLine {
    pub fn new(spans: Vec<TextSpan>) -> Self {
        Self { spans }
    }

    /// Combined text of the line's spans.
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}
