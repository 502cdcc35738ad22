//! Data model for outline extraction.
//!
//! Two halves: the styled text a rendering backend reports for each page
//! (`PageText` → `TextBlock` → `TextLine` → `TextSpan`), and the outline
//! artifact produced from it (`OutlineResult` of `HeadingEntry`).

mod outline;
mod page;
mod span;

pub use outline::{HeadingEntry, HeadingLevel, OutlineResult};
pub use page::{PageText, TextBlock, TextLine};
pub use span::{StyleFlags, TextSpan};
