//! Styled text spans.

use serde::{Deserialize, Serialize};

/// Style bitmask attached to a span.
///
/// Only [`StyleFlags::BOLD`] takes part in heading classification; the
/// remaining bits are informational.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleFlags(pub u32);

impl StyleFlags {
    /// Raised or lowered text.
    pub const SUPERSCRIPT: StyleFlags = StyleFlags(1 << 0);
    /// Bold weight.
    pub const BOLD: StyleFlags = StyleFlags(1 << 1);
    /// Italic or oblique.
    pub const ITALIC: StyleFlags = StyleFlags(1 << 2);
    /// Fixed-pitch font.
    pub const MONOSPACE: StyleFlags = StyleFlags(1 << 3);

    /// No style bits set.
    pub const fn empty() -> Self {
        StyleFlags(0)
    }

    /// Raw bit value.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Whether every bit of `other` is set in `self`.
    pub const fn contains(self, other: StyleFlags) -> bool {
        self.0 & other.0 == other.0
    }

    /// Set the bits of `other`.
    pub fn insert(&mut self, other: StyleFlags) {
        self.0 |= other.0;
    }

    pub fn is_bold(self) -> bool {
        self.contains(StyleFlags::BOLD)
    }

    pub fn is_italic(self) -> bool {
        self.contains(StyleFlags::ITALIC)
    }
}

impl std::ops::BitOr for StyleFlags {
    type Output = StyleFlags;

    fn bitor(self, rhs: StyleFlags) -> StyleFlags {
        StyleFlags(self.0 | rhs.0)
    }
}

/// A contiguous run of text rendered with one font, size and style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSpan {
    /// The text content, exactly as rendered (not trimmed)
    pub text: String,
    /// Font size in points
    pub size: f32,
    /// Style bitmask
    pub flags: StyleFlags,
    /// Font name (e.g., "Helvetica-Bold")
    pub font_name: String,
}

impl TextSpan {
    /// Create a new span.
    pub fn new(
        text: impl Into<String>,
        size: f32,
        flags: StyleFlags,
        font_name: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            size,
            flags,
            font_name: font_name.into(),
        }
    }

    /// Create an unstyled span with a placeholder font name.
    pub fn plain(text: impl Into<String>, size: f32) -> Self {
        Self::new(text, size, StyleFlags::empty(), "Helvetica")
    }

    /// Create a bold span with a placeholder font name.
    pub fn bold(text: impl Into<String>, size: f32) -> Self {
        Self::new(text, size, StyleFlags::BOLD, "Helvetica-Bold")
    }

    /// The text with surrounding whitespace removed.
    pub fn trimmed(&self) -> &str {
        self.text.trim()
    }

    /// Whether the span carries any non-whitespace text.
    pub fn has_text(&self) -> bool {
        !self.trimmed().is_empty()
    }

    pub fn is_bold(&self) -> bool {
        self.flags.is_bold()
    }
}
