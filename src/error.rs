//! Error types for pdf-outline.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pdf-outline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while extracting an outline.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading input or writing output.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file does not carry a PDF header.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The PDF header names a version we cannot read.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// Error parsing PDF structure or a page content stream.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// The PDF document is encrypted.
    #[error("Document is encrypted")]
    Encrypted,

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// The document contains no extractable text, so font statistics
    /// cannot be computed.
    #[error("Document contains no extractable text")]
    NoText,

    /// Error serializing the outline.
    #[error("Rendering error: {0}")]
    Render(String),

    /// Two inputs of one batch map to the same output file.
    #[error("Output {} is already written for {}", .0.display(), .1.display())]
    OutputCollision(PathBuf, PathBuf),
}

/// Coarse classification of a failure, used for batch reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The document has no non-empty text spans.
    NoText,
    /// The document could not be opened or parsed.
    Unreadable,
    /// Input or output could not be read or written.
    Io,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureKind::NoText => write!(f, "no text"),
            FailureKind::Unreadable => write!(f, "unreadable document"),
            FailureKind::Io => write!(f, "I/O"),
        }
    }
}

impl Error {
    /// Classify this error.
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            Error::NoText => FailureKind::NoText,
            Error::Io(_) | Error::Render(_) | Error::OutputCollision(_, _) => FailureKind::Io,
            Error::UnknownFormat
            | Error::UnsupportedVersion(_)
            | Error::PdfParse(_)
            | Error::Encrypted
            | Error::PageOutOfRange(_, _) => FailureKind::Unreadable,
        }
    }
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::PdfParse(err.to_string()),
        }
    }
}
