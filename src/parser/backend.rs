//! PDF backend abstraction layer.
//!
//! Outline extraction only needs styled page text, so the backend surface is
//! two calls: how many pages there are, and the text of one page. The
//! concrete PDF library (lopdf) stays behind [`LopdfBackend`].

use std::collections::{BTreeMap, HashMap};
use std::io::Read;
use std::path::Path;

use lopdf::{Document as LopdfDocument, Object, ObjectId, Stream};

use super::content::{decode_text_simple, ContentInterpreter};
use super::fonts::resolve_page_fonts;
use crate::detect::sniff_bytes;
use crate::error::{Error, Result};
use crate::model::PageText;

/// Abstract interface for reading styled page text.
pub trait PdfBackend {
    /// Number of pages in the document.
    fn page_count(&self) -> u32;

    /// Styled text of a page (1-indexed).
    fn page_text(&self, page_num: u32) -> Result<PageText>;
}

impl<B: PdfBackend + ?Sized> PdfBackend for &B {
    fn page_count(&self) -> u32 {
        (**self).page_count()
    }

    fn page_text(&self, page_num: u32) -> Result<PageText> {
        (**self).page_text(page_num)
    }
}

// ---------------------------------------------------------------------------
// LopdfBackend: concrete implementation backed by lopdf
// ---------------------------------------------------------------------------

/// Concrete [`PdfBackend`] backed by `lopdf::Document`.
///
/// The whole document is held in memory; dropping the backend releases it.
pub struct LopdfBackend {
    doc: LopdfDocument,
    pages: BTreeMap<u32, ObjectId>,
}

impl LopdfBackend {
    /// Load from a file path.
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::load_bytes(&data)
    }

    /// Load from an in-memory byte slice.
    pub fn load_bytes(data: &[u8]) -> Result<Self> {
        let header = sniff_bytes(data)?;
        log::debug!("Loading {} document ({} bytes)", header, data.len());

        let doc = LopdfDocument::load_mem(data).map_err(|e| match e {
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::from(e),
        })?;

        if doc.is_encrypted() {
            return Err(Error::Encrypted);
        }

        let pages = doc.get_pages();
        Ok(Self { doc, pages })
    }

    /// Load from a reader.
    pub fn load_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::load_bytes(&data)
    }

    /// Get PDF version string.
    pub fn version(&self) -> String {
        self.doc.version.to_string()
    }

    /// Raw (decompressed) content stream bytes of a page.
    ///
    /// A page without `/Contents` is blank and yields no bytes.
    fn page_content(&self, page_id: ObjectId) -> Result<Vec<u8>> {
        let page_dict = self.doc.get_dictionary(page_id)?;

        let Ok(contents) = page_dict.get(b"Contents") else {
            return Ok(Vec::new());
        };

        match contents {
            Object::Reference(r) => match self.doc.get_object(*r)? {
                Object::Stream(s) => Ok(stream_bytes(s)),
                Object::Array(arr) => self.concat_streams(arr),
                _ => Err(Error::PdfParse("Invalid content stream".to_string())),
            },
            Object::Array(arr) => self.concat_streams(arr),
            _ => Err(Error::PdfParse("Invalid content stream".to_string())),
        }
    }

    fn concat_streams(&self, refs: &[Object]) -> Result<Vec<u8>> {
        let mut content = Vec::new();
        for obj in refs {
            let Object::Reference(r) = obj else {
                continue;
            };
            match self.doc.get_object(*r) {
                Ok(Object::Stream(s)) => {
                    content.extend_from_slice(&stream_bytes(s));
                    content.push(b'\n');
                }
                _ => log::debug!("Skipping non-stream content entry {:?}", r),
            }
        }
        Ok(content)
    }
}

/// Decoded stream bytes, or the raw bytes when the stream has no (or an
/// unsupported) `/Filter`.
fn stream_bytes(stream: &Stream) -> Vec<u8> {
    match stream.decompressed_content() {
        Ok(data) => data,
        Err(e) => {
            if stream.dict.has(b"Filter") {
                log::debug!("Using raw bytes of undecodable content stream: {}", e);
            }
            stream.content.clone()
        }
    }
}

impl PdfBackend for LopdfBackend {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn page_text(&self, page_num: u32) -> Result<PageText> {
        let page_id = *self
            .pages
            .get(&page_num)
            .ok_or(Error::PageOutOfRange(page_num, self.page_count()))?;

        let lopdf_fonts = self.doc.get_page_fonts(page_id)?;
        let fonts = resolve_page_fonts(&self.doc, &lopdf_fonts);
        let encodings: HashMap<_, _> = lopdf_fonts
            .iter()
            .filter_map(|(key, dict)| {
                dict.get_font_encoding(&self.doc)
                    .ok()
                    .map(|enc| (key.clone(), enc))
            })
            .collect();

        let decode = |font_key: &[u8], bytes: &[u8]| {
            encodings
                .get(font_key)
                .and_then(|enc| LopdfDocument::decode_text(enc, bytes).ok())
                .unwrap_or_else(|| decode_text_simple(bytes))
        };

        let data = self.page_content(page_id)?;
        let content = lopdf::content::Content::decode(&data)?;

        let page = ContentInterpreter::new(&fonts, &decode).run(page_num, &content.operations);
        log::debug!(
            "Page {}: {} blocks, {} spans",
            page_num,
            page.blocks.len(),
            page.span_count()
        );
        Ok(page)
    }
}

// ---------------------------------------------------------------------------
// InMemoryBackend: pages supplied by the caller
// ---------------------------------------------------------------------------

/// [`PdfBackend`] over pages that were extracted elsewhere.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBackend {
    pages: Vec<PageText>,
}

impl InMemoryBackend {
    /// Create a backend from pages in document order.
    ///
    /// Page numbers are reassigned from position (first page is 1).
    pub fn new(pages: Vec<PageText>) -> Self {
        let pages = pages
            .into_iter()
            .enumerate()
            .map(|(i, mut page)| {
                page.number = i as u32 + 1;
                page
            })
            .collect();
        Self { pages }
    }
}

impl From<Vec<PageText>> for InMemoryBackend {
    fn from(pages: Vec<PageText>) -> Self {
        Self::new(pages)
    }
}

impl PdfBackend for InMemoryBackend {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn page_text(&self, page_num: u32) -> Result<PageText> {
        page_num
            .checked_sub(1)
            .and_then(|i| self.pages.get(i as usize))
            .cloned()
            .ok_or(Error::PageOutOfRange(page_num, self.page_count()))
    }
}
