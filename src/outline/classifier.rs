//! Heading classification.
//!
//! Every span is judged on its own against document-wide font statistics.
//! The first matching rule wins:
//!
//! 1. Reject empty text, text over [`MAX_HEADING_CHARS`] characters, or
//!    over [`MAX_HEADING_WORDS`] words.
//! 2. Keyword: the lower-cased text without trailing colons is a configured
//!    section name → H1.
//! 3. `size >= max * H1_MAX_RATIO` → H1.
//! 4. `size >= avg * H2_AVG_RATIO` → H2.
//! 5. `size >= avg * H3_AVG_RATIO` and bold → H3.
//!
//! All size comparisons are inclusive.

use std::collections::BTreeSet;

use super::collector::PageSpans;
use super::options::HeadingConfig;
use super::stats::FontStatistics;
use crate::model::{HeadingEntry, HeadingLevel, TextSpan};

/// Longest text, in characters, that can be a heading.
pub const MAX_HEADING_CHARS: usize = 120;
/// Most whitespace-separated words a heading can have.
pub const MAX_HEADING_WORDS: usize = 15;
/// Fraction of the largest font size at or above which a span is H1.
pub const H1_MAX_RATIO: f32 = 0.9;
/// Multiple of the mean font size at or above which a span is H2.
pub const H2_AVG_RATIO: f32 = 1.2;
/// Multiple of the mean font size at or above which a bold span is H3.
pub const H3_AVG_RATIO: f32 = 1.05;

/// The rule that produced a heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Keyword,
    DominantSize,
    ElevatedSize,
    ElevatedBold,
}

/// Classifies spans as headings.
#[derive(Debug, Clone)]
pub struct HeadingClassifier {
    keywords: BTreeSet<String>,
}

impl HeadingClassifier {
    /// Create a classifier owning the config's keyword set.
    pub fn new(config: &HeadingConfig) -> Self {
        Self {
            keywords: config.keywords().clone(),
        }
    }

    /// Whether text names a configured section.
    pub fn is_keyword(&self, text: &str) -> bool {
        let key = text.trim().to_lowercase();
        self.keywords.contains(key.trim_end_matches(':'))
    }

    /// Heading level of a span, or `None` for body text.
    pub fn classify(&self, span: &TextSpan, stats: &FontStatistics) -> Option<HeadingLevel> {
        self.classify_with_rule(span, stats).map(|(level, _)| level)
    }

    /// Heading level of a span and the rule that decided it.
    pub fn classify_with_rule(
        &self,
        span: &TextSpan,
        stats: &FontStatistics,
    ) -> Option<(HeadingLevel, Rule)> {
        let text = span.trimmed();
        if is_too_long(text) {
            return None;
        }

        if self.is_keyword(text) {
            return Some((HeadingLevel::H1, Rule::Keyword));
        }

        let size = span.size;
        if size >= stats.max() * H1_MAX_RATIO {
            Some((HeadingLevel::H1, Rule::DominantSize))
        } else if size >= stats.avg() * H2_AVG_RATIO {
            Some((HeadingLevel::H2, Rule::ElevatedSize))
        } else if size >= stats.avg() * H3_AVG_RATIO && span.is_bold() {
            Some((HeadingLevel::H3, Rule::ElevatedBold))
        } else {
            None
        }
    }

    /// Classify every span of one page.
    pub fn classify_page(&self, page: &PageSpans, stats: &FontStatistics) -> Vec<HeadingEntry> {
        page.spans
            .iter()
            .filter_map(|span| {
                let (level, rule) = self.classify_with_rule(span, stats)?;
                log::debug!(
                    "Page {}: {} via {:?}: {:?}",
                    page.page,
                    level,
                    rule,
                    span.trimmed()
                );
                Some(HeadingEntry::new(level, span.trimmed(), page.page))
            })
            .collect()
    }

    /// Classify a whole document, in page order then span order.
    pub fn classify_document(
        &self,
        pages: &[PageSpans],
        stats: &FontStatistics,
    ) -> Vec<HeadingEntry> {
        pages
            .iter()
            .flat_map(|page| self.classify_page(page, stats))
            .collect()
    }
}

impl Default for HeadingClassifier {
    fn default() -> Self {
        Self::new(&HeadingConfig::default())
    }
}

/// Empty, or too long to be a heading.
fn is_too_long(text: &str) -> bool {
    text.is_empty()
        || text.chars().count() > MAX_HEADING_CHARS
        || text.split_whitespace().count() > MAX_HEADING_WORDS
}
