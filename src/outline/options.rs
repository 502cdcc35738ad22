//! Extraction options and classifier configuration.

use std::collections::BTreeSet;

/// Section names that are headings regardless of how they are typeset.
pub const DEFAULT_HEADING_KEYWORDS: &[&str] = &[
    "abstract",
    "introduction",
    "methodology",
    "results",
    "discussion",
    "conclusion",
    "references",
    "literature review",
];

/// Configuration for the heading classifier.
///
/// Size thresholds are fixed; only the keyword set is configurable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingConfig {
    keywords: BTreeSet<String>,
}

impl HeadingConfig {
    /// Create a config with the default keyword set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a config with no keywords (size rules only).
    pub fn without_keywords() -> Self {
        Self {
            keywords: BTreeSet::new(),
        }
    }

    /// Add a keyword. Matching is case-insensitive.
    pub fn with_keyword(mut self, keyword: impl AsRef<str>) -> Self {
        self.keywords.insert(normalize_keyword(keyword.as_ref()));
        self
    }

    /// Add several keywords.
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.keywords
            .extend(keywords.into_iter().map(|k| normalize_keyword(k.as_ref())));
        self
    }

    /// Remove a keyword.
    pub fn without_keyword(mut self, keyword: impl AsRef<str>) -> Self {
        self.keywords.remove(&normalize_keyword(keyword.as_ref()));
        self
    }

    /// The keyword set, lower-cased.
    pub fn keywords(&self) -> &BTreeSet<String> {
        &self.keywords
    }
}

impl Default for HeadingConfig {
    fn default() -> Self {
        Self {
            keywords: DEFAULT_HEADING_KEYWORDS
                .iter()
                .map(|k| k.to_string())
                .collect(),
        }
    }
}

/// Keywords are stored the way candidate text is prepared for matching.
fn normalize_keyword(keyword: &str) -> String {
    keyword.trim().to_lowercase().trim_end_matches(':').to_string()
}

/// Options for extracting an outline.
#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    /// Error handling mode for page text extraction
    pub error_mode: ErrorMode,

    /// Heading classifier configuration
    pub headings: HeadingConfig,
}

impl ExtractOptions {
    /// Create new extract options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (skip pages whose text cannot be read).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Enable strict mode (fail the document on the first unreadable page).
    pub fn strict(mut self) -> Self {
        self.error_mode = ErrorMode::Strict;
        self
    }

    /// Set the heading classifier configuration.
    pub fn with_headings(mut self, headings: HeadingConfig) -> Self {
        self.headings = headings;
        self
    }
}

/// Error handling mode during page text extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on any error
    #[default]
    Strict,
    /// Treat unreadable pages as empty and continue
    Lenient,
}
