//! Title and heading outline detection.
//!
//! Pages are flattened into span sequences ([`collector`]), font size
//! statistics are computed once per document ([`stats`]), the title is taken
//! from the first page ([`title`]), and every span is classified against the
//! statistics ([`classifier`]).

pub mod classifier;
pub mod collector;
mod extractor;
mod options;
pub mod stats;
pub mod title;

pub use classifier::{HeadingClassifier, Rule};
pub use collector::{collect_spans, iter_spans, PageSpans};
pub use extractor::OutlineExtractor;
pub use options::{ErrorMode, ExtractOptions, HeadingConfig, DEFAULT_HEADING_KEYWORDS};
pub use stats::FontStatistics;
pub use title::identify_title;
