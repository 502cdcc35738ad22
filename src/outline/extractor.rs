//! Title and outline extraction for one document.

use super::classifier::HeadingClassifier;
use super::collector::PageSpans;
use super::options::{ErrorMode, ExtractOptions};
use super::stats::FontStatistics;
use super::title::identify_title;
use crate::error::Result;
use crate::model::{HeadingEntry, OutlineResult};
use crate::parser::PdfBackend;

/// Extracts the title and heading outline of one document.
///
/// The extractor owns its backend, so the underlying document is released
/// when the extractor is dropped.
pub struct OutlineExtractor<B: PdfBackend> {
    backend: B,
    options: ExtractOptions,
    classifier: HeadingClassifier,
}

impl<B: PdfBackend> OutlineExtractor<B> {
    /// Create an extractor with default options.
    pub fn new(backend: B) -> Self {
        Self::with_options(backend, ExtractOptions::default())
    }

    /// Create an extractor with custom options.
    pub fn with_options(backend: B, options: ExtractOptions) -> Self {
        let classifier = HeadingClassifier::new(&options.headings);
        Self {
            backend,
            options,
            classifier,
        }
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.backend.page_count()
    }

    /// Extract the title and outline.
    pub fn extract(&self) -> Result<OutlineResult> {
        let pages = self.collect_pages()?;

        let title = first_page_title(&pages);
        let stats = FontStatistics::from_pages(&pages)?;
        log::debug!(
            "Font statistics: max={:.2} avg={:.2} over {} spans",
            stats.max(),
            stats.avg(),
            stats.samples()
        );

        let outline = self.classifier.classify_document(&pages, &stats);
        Ok(OutlineResult::new(title.trim(), outline))
    }

    /// Extract only the title.
    ///
    /// Reads the first page alone; succeeds even for documents without text.
    pub fn title(&self) -> Result<String> {
        if self.page_count() == 0 {
            return Ok(String::new());
        }
        let first = self.read_page(1)?;
        Ok(first_page_title(std::slice::from_ref(&first))
            .trim()
            .to_string())
    }

    /// Extract only the headings.
    pub fn headings(&self) -> Result<Vec<HeadingEntry>> {
        let pages = self.collect_pages()?;
        let stats = FontStatistics::from_pages(&pages)?;
        Ok(self.classifier.classify_document(&pages, &stats))
    }

    /// Compute the document's font statistics.
    pub fn font_statistics(&self) -> Result<FontStatistics> {
        FontStatistics::from_pages(&self.collect_pages()?)
    }

    /// Consume the extractor and return its backend.
    pub fn into_inner(self) -> B {
        self.backend
    }

    /// Read and flatten every page.
    fn collect_pages(&self) -> Result<Vec<PageSpans>> {
        (1..=self.page_count())
            .map(|page_num| self.read_page(page_num))
            .collect()
    }

    fn read_page(&self, page_num: u32) -> Result<PageSpans> {
        match self.backend.page_text(page_num) {
            Ok(page) => Ok(PageSpans::from_page(page)),
            Err(e) if self.options.error_mode == ErrorMode::Lenient => {
                log::warn!("Skipping text of page {}: {}", page_num, e);
                Ok(PageSpans {
                    page: page_num,
                    spans: Vec::new(),
                })
            }
            Err(e) => Err(e),
        }
    }
}

fn first_page_title(pages: &[PageSpans]) -> String {
    pages
        .first()
        .map(|page| identify_title(&page.spans))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::model::{HeadingLevel, PageText, TextSpan};
    use crate::outline::HeadingConfig;
    use crate::parser::InMemoryBackend;

    fn backend(pages: Vec<Vec<TextSpan>>) -> InMemoryBackend {
        InMemoryBackend::new(
            pages
                .into_iter()
                .map(|spans| PageText::from_spans(0, spans))
                .collect(),
        )
    }

    /// Fails on one page, serves the rest.
    struct FlakyBackend {
        inner: InMemoryBackend,
        bad_page: u32,
    }

    impl PdfBackend for FlakyBackend {
        fn page_count(&self) -> u32 {
            self.inner.page_count()
        }

        fn page_text(&self, page_num: u32) -> Result<PageText> {
            if page_num == self.bad_page {
                return Err(Error::PdfParse("broken content stream".into()));
            }
            self.inner.page_text(page_num)
        }
    }

    #[test]
    fn test_concrete_scenario() {
        let extractor = OutlineExtractor::new(backend(vec![vec![
            TextSpan::plain("Big Title", 24.0),
            TextSpan::plain("intro", 10.0),
            TextSpan::plain("This is body text of normal length and font.", 10.0),
        ]]));

        let stats = extractor.font_statistics().unwrap();
        assert_eq!(stats.max(), 24.0);
        assert!((stats.avg() - 44.0 / 3.0).abs() < 1e-4);

        let result = extractor.extract().unwrap();
        assert_eq!(result.title, "Big Title intro");
        assert_eq!(
            result.outline,
            vec![HeadingEntry::new(HeadingLevel::H1, "Big Title", 1)]
        );
    }

    #[test]
    fn test_multi_page_outline() {
        // max 26, avg 12.8
        let extractor = OutlineExtractor::new(backend(vec![
            vec![
                TextSpan::plain("Survey of Methods", 26.0),
                TextSpan::plain("Abstract", 10.0),
                TextSpan::plain("We survey things.", 10.0),
            ],
            vec![
                TextSpan::plain("Introduction:", 10.0),
                TextSpan::plain("Motivation", 18.0),
                TextSpan::bold("Prior art", 14.0),
                TextSpan::plain("Text.", 10.0),
                TextSpan::plain("More text.", 10.0),
                TextSpan::plain("More text.", 10.0),
                TextSpan::plain("More text.", 10.0),
            ],
        ]));

        let result = extractor.extract().unwrap();
        assert_eq!(result.title, "Survey of Methods Abstract");

        let summary: Vec<(HeadingLevel, &str, u32)> = result
            .outline
            .iter()
            .map(|h| (h.level, h.text.as_str(), h.page))
            .collect();
        assert_eq!(
            summary,
            vec![
                (HeadingLevel::H1, "Survey of Methods", 1),
                (HeadingLevel::H1, "Abstract", 1),
                (HeadingLevel::H1, "Introduction:", 2),
                (HeadingLevel::H2, "Motivation", 2),
                (HeadingLevel::H3, "Prior art", 2),
            ]
        );
    }

    #[test]
    fn test_pages_within_range() {
        let extractor = OutlineExtractor::new(backend(vec![
            vec![TextSpan::plain("One", 20.0)],
            vec![],
            vec![TextSpan::plain("Three", 20.0), TextSpan::plain("x", 8.0)],
        ]));
        let page_count = extractor.page_count();
        let result = extractor.extract().unwrap();
        assert!(!result.outline.is_empty());
        assert!(result
            .outline
            .iter()
            .all(|h| h.page >= 1 && h.page <= page_count));
    }

    #[test]
    fn test_no_text_document() {
        let extractor = OutlineExtractor::new(backend(vec![
            vec![TextSpan::plain("  ", 12.0)],
            vec![],
        ]));
        assert!(matches!(extractor.extract(), Err(Error::NoText)));
        assert_eq!(extractor.title().unwrap(), "");
    }

    #[test]
    fn test_zero_pages() {
        let extractor = OutlineExtractor::new(InMemoryBackend::default());
        assert!(matches!(extractor.extract(), Err(Error::NoText)));
        assert_eq!(extractor.title().unwrap(), "");
    }

    #[test]
    fn test_into_inner_returns_backend() {
        let extractor = OutlineExtractor::new(InMemoryBackend::new(vec![
            PageText::new(1),
            PageText::new(2),
        ]));
        assert_eq!(extractor.page_count(), 2);

        let backend = extractor.into_inner();
        assert_eq!(backend.page_count(), 2);
        assert!(backend.page_text(2).unwrap().is_empty());
    }

    #[test]
    fn test_strict_mode_propagates_page_errors() {
        let flaky = FlakyBackend {
            inner: backend(vec![
                vec![TextSpan::plain("Title", 20.0)],
                vec![TextSpan::plain("Results", 10.0)],
            ]),
            bad_page: 2,
        };
        let extractor = OutlineExtractor::new(flaky);
        assert!(matches!(extractor.extract(), Err(Error::PdfParse(_))));
    }

    #[test]
    fn test_lenient_mode_skips_bad_pages() {
        let flaky = FlakyBackend {
            inner: backend(vec![
                vec![TextSpan::plain("Title", 20.0)],
                vec![TextSpan::plain("Results", 10.0)],
                vec![TextSpan::plain("Discussion", 10.0)],
            ]),
            bad_page: 2,
        };
        let extractor = OutlineExtractor::with_options(flaky, ExtractOptions::new().lenient());
        let result = extractor.extract().unwrap();
        let texts: Vec<&str> = result.outline.iter().map(|h| h.text.as_str()).collect();
        assert_eq!(texts, vec!["Title", "Discussion"]);
        assert_eq!(result.outline[1].page, 3);
    }

    #[test]
    fn test_custom_keywords_flow_through_options() {
        let options = ExtractOptions::new()
            .with_headings(HeadingConfig::new().with_keyword("Scope of Work"));
        let extractor = OutlineExtractor::with_options(
            backend(vec![vec![
                TextSpan::plain("RFP", 20.0),
                TextSpan::plain("Scope of work:", 10.0),
                TextSpan::plain("Body", 10.0),
            ]]),
            options,
        );
        let headings = extractor.headings().unwrap();
        assert_eq!(headings.len(), 2);
        assert_eq!(headings[1].text, "Scope of work:");
    }
}
