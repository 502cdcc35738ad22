//! PDF rendering layer: turns page content streams into styled text.

mod backend;
mod content;
mod fonts;

pub use backend::{InMemoryBackend, LopdfBackend, PdfBackend};
pub use content::decode_text_simple;
pub use fonts::{strip_subset_prefix, style_from_descriptor, style_from_font_name, FontResource};
