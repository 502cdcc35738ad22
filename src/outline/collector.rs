//! Span collection: flattens a page's block/line/span nesting.

use crate::model::{PageText, TextSpan};

/// The flat span sequence of one page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageSpans {
    /// Page number (1-indexed)
    pub page: u32,
    /// Spans in reading order, unfiltered
    pub spans: Vec<TextSpan>,
}

impl PageSpans {
    /// Flatten an owned page.
    pub fn from_page(page: PageText) -> Self {
        Self {
            page: page.number,
            spans: collect_spans(page),
        }
    }

    /// Spans with non-empty trimmed text.
    pub fn text_spans(&self) -> impl Iterator<Item = &TextSpan> + '_ {
        self.spans.iter().filter(|s| s.has_text())
    }
}

/// Iterate a page's spans depth-first: block, then line, then span.
pub fn iter_spans(page: &PageText) -> impl Iterator<Item = &TextSpan> + '_ {
    page.blocks
        .iter()
        .flat_map(|block| &block.lines)
        .flat_map(|line| &line.spans)
}

/// Flatten a page into its span sequence. Empty spans are kept.
pub fn collect_spans(page: PageText) -> Vec<TextSpan> {
    page.blocks
        .into_iter()
        .flat_map(|block| block.lines)
        .flat_map(|line| line.spans)
        .collect()
}
