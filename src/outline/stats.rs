//! Document-wide font size statistics.

use super::collector::PageSpans;
use crate::error::{Error, Result};
use crate::model::TextSpan;

/// Maximum and mean font size over every non-empty span of a document.
///
/// Always satisfies `max >= avg`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontStatistics {
    max: f32,
    avg: f32,
    samples: usize,
}

impl FontStatistics {
    /// Compute statistics from raw font sizes.
    ///
    /// Returns [`Error::NoText`] for an empty sequence.
    pub fn from_sizes<I: IntoIterator<Item = f32>>(sizes: I) -> Result<Self> {
        let mut max = f32::NEG_INFINITY;
        let mut sum = 0.0f64;
        let mut samples = 0usize;

        for size in sizes {
            max = max.max(size);
            sum += size as f64;
            samples += 1;
        }

        if samples == 0 {
            return Err(Error::NoText);
        }

        // Rounding can push the f32 mean a hair above an all-equal max.
        let avg = ((sum / samples as f64) as f32).min(max);
        Ok(Self { max, avg, samples })
    }

    /// Compute statistics from the spans with non-empty trimmed text.
    pub fn from_spans<'a, I: IntoIterator<Item = &'a TextSpan>>(spans: I) -> Result<Self> {
        Self::from_sizes(
            spans
                .into_iter()
                .filter(|s| s.has_text())
                .map(|s| s.size),
        )
    }

    /// Compute statistics over every page of a document.
    pub fn from_pages(pages: &[PageSpans]) -> Result<Self> {
        Self::from_spans(pages.iter().flat_map(|p| &p.spans))
    }

    /// Largest font size.
    pub fn max(&self) -> f32 {
        self.max
    }

    /// Arithmetic mean font size.
    pub fn avg(&self) -> f32 {
        self.avg
    }

    /// Number of spans the statistics were computed from.
    pub fn samples(&self) -> usize {
        self.samples
    }
}
