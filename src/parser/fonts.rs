//! Font resource resolution: display names and style flags.

use std::collections::HashMap;

use lopdf::{Dictionary, Document as LopdfDocument, Object};

use crate::model::StyleFlags;

/// Font descriptor flag bits (PDF 32000-1, table 123).
const DESCRIPTOR_FIXED_PITCH: i64 = 1 << 0;
const DESCRIPTOR_ITALIC: i64 = 1 << 6;
const DESCRIPTOR_FORCE_BOLD: i64 = 1 << 18;

/// Weights at or above this are treated as bold.
const BOLD_WEIGHT: f32 = 600.0;

/// A font resource as seen by the content interpreter.
#[derive(Debug, Clone, PartialEq)]
pub struct FontResource {
    /// Base font name with any subset prefix removed
    pub name: String,
    /// Style derived from the name and font descriptor
    pub flags: StyleFlags,
}

impl FontResource {
    /// Build a resource from a base font name alone.
    pub fn from_name(base_font: &str) -> Self {
        let name = strip_subset_prefix(base_font).to_string();
        let flags = style_from_font_name(&name);
        Self { name, flags }
    }
}

/// Resolve every font in a page's resource dictionary.
pub fn resolve_page_fonts(
    doc: &LopdfDocument,
    fonts: &std::collections::BTreeMap<Vec<u8>, &Dictionary>,
) -> HashMap<Vec<u8>, FontResource> {
    fonts
        .iter()
        .map(|(key, dict)| (key.clone(), resolve_font(doc, dict)))
        .collect()
}

fn resolve_font(doc: &LopdfDocument, dict: &Dictionary) -> FontResource {
    let base_font = dict
        .get(b"BaseFont")
        .ok()
        .and_then(|o| o.as_name().ok())
        .map(|n| String::from_utf8_lossy(n).to_string())
        .unwrap_or_else(|| "Unknown".to_string());

    let mut resource = FontResource::from_name(&base_font);

    if let Some(descriptor) = font_descriptor(doc, dict) {
        let flags = descriptor
            .get(b"Flags")
            .ok()
            .and_then(|o| o.as_i64().ok())
            .unwrap_or(0);
        let weight = descriptor.get(b"FontWeight").ok().and_then(get_number);
        resource.flags.insert(style_from_descriptor(flags, weight));
    }

    resource
}

/// Find the font descriptor, looking through Type0 descendant fonts.
fn font_descriptor<'a>(doc: &'a LopdfDocument, dict: &'a Dictionary) -> Option<&'a Dictionary> {
    if let Ok(obj) = dict.get(b"FontDescriptor") {
        return deref_dict(doc, obj);
    }

    let descendants = dict.get(b"DescendantFonts").ok()?;
    let descendants = match descendants {
        Object::Reference(id) => doc.get_object(*id).ok()?.as_array().ok()?,
        other => other.as_array().ok()?,
    };
    let descendant = deref_dict(doc, descendants.first()?)?;
    deref_dict(doc, descendant.get(b"FontDescriptor").ok()?)
}

fn deref_dict<'a>(doc: &'a LopdfDocument, obj: &'a Object) -> Option<&'a Dictionary> {
    match obj {
        Object::Reference(id) => doc.get_dictionary(*id).ok(),
        Object::Dictionary(d) => Some(d),
        _ => None,
    }
}

fn get_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Remove a `ABCDEF+` subset tag from an embedded font name.
pub fn strip_subset_prefix(name: &str) -> &str {
    match name.split_once('+') {
        Some((tag, rest))
            if tag.len() == 6 && tag.bytes().all(|b| b.is_ascii_uppercase()) =>
        {
            rest
        }
        _ => name,
    }
}

/// Infer style from a font name such as `Helvetica-BoldOblique`.
pub fn style_from_font_name(name: &str) -> StyleFlags {
    let lower = name.to_lowercase();
    let mut flags = StyleFlags::empty();

    if ["bold", "black", "heavy"].iter().any(|k| lower.contains(k)) {
        flags.insert(StyleFlags::BOLD);
    }
    if lower.contains("italic") || lower.contains("oblique") {
        flags.insert(StyleFlags::ITALIC);
    }
    if lower.contains("mono") || lower.contains("courier") {
        flags.insert(StyleFlags::MONOSPACE);
    }

    flags
}

/// Infer style from font descriptor `Flags` and `FontWeight`.
pub fn style_from_descriptor(flags: i64, weight: Option<f32>) -> StyleFlags {
    let mut style = StyleFlags::empty();

    if flags & DESCRIPTOR_FORCE_BOLD != 0 || weight.is_some_and(|w| w >= BOLD_WEIGHT) {
        style.insert(StyleFlags::BOLD);
    }
    if flags & DESCRIPTOR_ITALIC != 0 {
        style.insert(StyleFlags::ITALIC);
    }
    if flags & DESCRIPTOR_FIXED_PITCH != 0 {
        style.insert(StyleFlags::MONOSPACE);
    }

    style
}
