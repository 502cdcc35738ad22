//! # pdf-outline
//!
//! Title and heading outline extraction for PDF documents.
//!
//! The outline is inferred from typography alone: every text span is judged
//! against the document's largest and average font sizes, with a short list
//! of section names (e.g. "Abstract", "Conclusion") always treated as
//! top-level headings. Bookmarks and tagged structure are not consulted.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdf_outline::{extract_outline, render};
//!
//! fn main() -> pdf_outline::Result<()> {
//!     let result = extract_outline("paper.pdf")?;
//!     println!("Title: {}", result.title);
//!
//!     for heading in &result.outline {
//!         println!("{} {} (p. {})", heading.level, heading.text, heading.page);
//!     }
//!
//!     let json = render::to_json(&result, render::JsonFormat::Pretty)?;
//!     println!("{}", json);
//!     Ok(())
//! }
//! ```
//!
//! ## Batch processing
//!
//! ```no_run
//! use pdf_outline::batch::{process_directory, BatchOptions};
//!
//! let report = process_directory("input", "output", &BatchOptions::default()).unwrap();
//! for failed in &report.failed {
//!     eprintln!("{}: {}", failed.input.display(), failed.error);
//! }
//! ```

pub mod batch;
pub mod detect;
pub mod error;
pub mod model;
pub mod outline;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use batch::{process_directory, BatchOptions, BatchReport};
pub use error::{Error, FailureKind, Result};
pub use model::{
    HeadingEntry, HeadingLevel, OutlineResult, PageText, StyleFlags, TextBlock, TextLine, TextSpan,
};
pub use outline::{
    ErrorMode, ExtractOptions, FontStatistics, HeadingClassifier, HeadingConfig, OutlineExtractor,
};
pub use parser::{InMemoryBackend, LopdfBackend, PdfBackend};
pub use render::JsonFormat;

use std::path::Path;

/// Extract the title and outline of a PDF file.
///
/// # Example
///
/// ```no_run
/// use pdf_outline::extract_outline;
///
/// let result = extract_outline("report.pdf").unwrap();
/// println!("{} headings", result.outline.len());
/// ```
pub fn extract_outline<P: AsRef<Path>>(path: P) -> Result<OutlineResult> {
    extract_outline_with_options(path, ExtractOptions::default())
}

/// Extract the title and outline of a PDF file with custom options.
///
/// # Example
///
/// ```no_run
/// use pdf_outline::{extract_outline_with_options, ExtractOptions, HeadingConfig};
///
/// let options = ExtractOptions::new()
///     .lenient()
///     .with_headings(HeadingConfig::new().with_keyword("appendix"));
/// let result = extract_outline_with_options("report.pdf", options).unwrap();
/// ```
pub fn extract_outline_with_options<P: AsRef<Path>>(
    path: P,
    options: ExtractOptions,
) -> Result<OutlineResult> {
    let backend = LopdfBackend::load_file(path)?;
    OutlineExtractor::with_options(backend, options).extract()
}

/// Extract the title and outline of an in-memory PDF.
pub fn extract_outline_from_bytes(data: &[u8]) -> Result<OutlineResult> {
    let backend = LopdfBackend::load_bytes(data)?;
    OutlineExtractor::new(backend).extract()
}

/// Extract the title and outline from pages that were already rendered.
///
/// # Example
///
/// ```
/// use pdf_outline::{extract_outline_from_pages, HeadingLevel, PageText, TextSpan};
///
/// let page = PageText::from_spans(1, vec![
///     TextSpan::plain("Quarterly Review", 24.0),
///     TextSpan::plain("Revenue grew in every region.", 10.0),
///     TextSpan::plain("Conclusion", 10.0),
/// ]);
/// let result = extract_outline_from_pages(vec![page]).unwrap();
/// assert_eq!(result.title, "Quarterly Review Revenue grew in every region.");
/// assert_eq!(result.outline[1].level, HeadingLevel::H1);
/// ```
pub fn extract_outline_from_pages(pages: Vec<PageText>) -> Result<OutlineResult> {
    OutlineExtractor::new(InMemoryBackend::new(pages)).extract()
}
