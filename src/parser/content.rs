//! Content stream interpretation.
//!
//! Walks the text operators of a decoded page content stream and rebuilds
//! the page as blocks (`BT`…`ET` text objects) of lines (runs sharing a
//! baseline) of spans (runs sharing font, size and style). Spans are emitted
//! in content-stream order; no geometric reordering is attempted. Sizes are
//! reported in device space, so `cm` scaling applies.

use std::collections::HashMap;

use lopdf::content::Operation;
use lopdf::Object;
use unicode_normalization::UnicodeNormalization;

use super::fonts::FontResource;
use crate::model::{PageText, StyleFlags, TextBlock, TextLine, TextSpan};

/// `TJ` displacement (thousandths of an em) beyond which a word space is assumed.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// Leading used by `T*` and friends until `TL`/`TD` sets one.
const DEFAULT_LEADING: f32 = 12.0;

const DEFAULT_FONT_SIZE: f32 = 12.0;

/// Sizes closer than this are considered equal when merging runs.
const SIZE_EPSILON: f32 = 0.01;

/// Decodes a shown string given the font resource key it was shown with.
pub type TextDecoder<'a> = dyn Fn(&[u8], &[u8]) -> String + 'a;

/// Interprets one page's content stream.
pub struct ContentInterpreter<'a> {
    fonts: &'a HashMap<Vec<u8>, FontResource>,
    decode: &'a TextDecoder<'a>,

    blocks: Vec<TextBlock>,
    lines: Vec<TextLine>,
    spans: Vec<TextSpan>,

    in_text: bool,
    matrix: TextMatrix,
    /// Current transformation matrix and its `q`/`Q` save stack.
    ctm: Ctm,
    saved_ctm: Vec<Ctm>,
    font_key: Vec<u8>,
    font: FontResource,
    font_size: f32,
    rise: f32,
    /// A positioning operator ran since the last show on this line.
    moved: bool,
}

impl<'a> ContentInterpreter<'a> {
    pub fn new(fonts: &'a HashMap<Vec<u8>, FontResource>, decode: &'a TextDecoder<'a>) -> Self {
        Self {
            fonts,
            decode,
            blocks: Vec::new(),
            lines: Vec::new(),
            spans: Vec::new(),
            in_text: false,
            matrix: TextMatrix::default(),
            ctm: Ctm::IDENTITY,
            saved_ctm: Vec::new(),
            font_key: Vec::new(),
            font: FontResource::from_name("Unknown"),
            font_size: DEFAULT_FONT_SIZE,
            rise: 0.0,
            moved: false,
        }
    }

    /// Run every operation and return the page structure.
    pub fn run(mut self, number: u32, operations: &[Operation]) -> PageText {
        for op in operations {
            self.apply(op);
        }
        self.end_block();

        PageText {
            number,
            blocks: self.blocks,
        }
    }

    fn apply(&mut self, op: &Operation) {
        let operands = &op.operands;
        match op.operator.as_str() {
            "q" => self.saved_ctm.push(self.ctm),
            "Q" => {
                if let Some(ctm) = self.saved_ctm.pop() {
                    self.ctm = ctm;
                }
            }
            "cm" => {
                if operands.len() >= 6 {
                    let m: Vec<f32> = operands.iter().take(6).filter_map(get_number).collect();
                    if let [a, b, c, d, e, f] = m[..] {
                        self.ctm = Ctm([a, b, c, d, e, f]).then(&self.ctm);
                    }
                }
            }
            "BT" => {
                self.end_block();
                self.in_text = true;
                self.matrix = TextMatrix::default();
            }
            "ET" => {
                self.end_block();
                self.in_text = false;
            }
            "Tf" => {
                if operands.len() >= 2 {
                    if let Object::Name(key) = &operands[0] {
                        self.font_key = key.clone();
                        self.font = self
                            .fonts
                            .get(key.as_slice())
                            .cloned()
                            .unwrap_or_else(|| {
                                FontResource::from_name(&String::from_utf8_lossy(key))
                            });
                    }
                    self.font_size = get_number(&operands[1]).unwrap_or(DEFAULT_FONT_SIZE);
                }
            }
            "TL" => {
                if let Some(leading) = operands.first().and_then(get_number) {
                    self.matrix.leading = leading;
                }
            }
            "Ts" => {
                self.rise = operands.first().and_then(get_number).unwrap_or(0.0);
            }
            "Td" | "TD" => {
                if operands.len() >= 2 {
                    let tx = get_number(&operands[0]).unwrap_or(0.0);
                    let ty = get_number(&operands[1]).unwrap_or(0.0);
                    if op.operator == "TD" {
                        self.matrix.leading = -ty;
                    }
                    self.matrix.translate(tx, ty);
                    if ty != 0.0 {
                        self.end_line();
                    } else {
                        self.moved = true;
                    }
                }
            }
            "Tm" => {
                if operands.len() >= 6 {
                    let previous_y = self.matrix.f;
                    self.matrix.set(
                        get_number(&operands[0]).unwrap_or(1.0),
                        get_number(&operands[1]).unwrap_or(0.0),
                        get_number(&operands[2]).unwrap_or(0.0),
                        get_number(&operands[3]).unwrap_or(1.0),
                        get_number(&operands[4]).unwrap_or(0.0),
                        get_number(&operands[5]).unwrap_or(0.0),
                    );
                    if (self.matrix.f - previous_y).abs() > f32::EPSILON {
                        self.end_line();
                    } else {
                        self.moved = true;
                    }
                }
            }
            "T*" => {
                self.matrix.next_line();
                self.end_line();
            }
            "Tj" => {
                if let Some(Object::String(bytes, _)) = operands.first() {
                    let text = self.decode_bytes(bytes);
                    self.show(text);
                }
            }
            "TJ" => {
                if let Some(Object::Array(items)) = operands.first() {
                    let text = self.decode_array(items);
                    self.show(text);
                }
            }
            "'" | "\"" => {
                self.matrix.next_line();
                self.end_line();
                let text_idx = if op.operator == "\"" { 2 } else { 0 };
                if let Some(Object::String(bytes, _)) = operands.get(text_idx) {
                    let text = self.decode_bytes(bytes);
                    self.show(text);
                }
            }
            _ => {}
        }
    }

    fn decode_bytes(&self, bytes: &[u8]) -> String {
        (self.decode)(&self.font_key, bytes)
    }

    /// Decode a `TJ` array, turning large negative displacements into spaces.
    fn decode_array(&self, items: &[Object]) -> String {
        let mut combined = String::new();
        for item in items {
            match item {
                Object::String(bytes, _) => combined.push_str(&self.decode_bytes(bytes)),
                other => {
                    let Some(adjustment) = get_number(other) else {
                        continue;
                    };
                    if -adjustment > TJ_SPACE_THRESHOLD
                        && combined
                            .chars()
                            .last()
                            .is_some_and(|c| !c.is_whitespace() && !is_spaceless_script_char(c))
                    {
                        combined.push(' ');
                    }
                }
            }
        }
        combined
    }

    fn show(&mut self, text: String) {
        if !self.in_text || text.is_empty() {
            return;
        }

        let text: String = text.nfc().collect();
        let size = self.font_size * self.matrix.vertical_scale(&self.ctm);
        let mut flags = self.font.flags;
        if self.rise != 0.0 {
            flags.insert(StyleFlags::SUPERSCRIPT);
        }

        let moved = std::mem::take(&mut self.moved);
        if let Some(last) = self.spans.last_mut() {
            if last.font_name == self.font.name
                && last.flags == flags
                && (last.size - size).abs() < SIZE_EPSILON
            {
                if moved && needs_space(&last.text, &text) {
                    last.text.push(' ');
                }
                last.text.push_str(&text);
                return;
            }
        }

        self.spans
            .push(TextSpan::new(text, size, flags, self.font.name.clone()));
    }

    fn end_line(&mut self) {
        self.moved = false;
        if !self.spans.is_empty() {
            self.lines.push(TextLine::new(std::mem::take(&mut self.spans)));
        }
    }

    fn end_block(&mut self) {
        self.end_line();
        if !self.lines.is_empty() {
            self.blocks
                .push(TextBlock::new(std::mem::take(&mut self.lines)));
        }
    }
}

/// Whether joining two runs separated by a move needs an explicit space.
fn needs_space(left: &str, right: &str) -> bool {
    match (left.chars().last(), right.chars().next()) {
        (Some(l), Some(r)) => {
            !l.is_whitespace()
                && !r.is_whitespace()
                && !(is_spaceless_script_char(l) && is_spaceless_script_char(r))
        }
        _ => false,
    }
}

/// Text matrix with line leading.
#[derive(Debug, Clone)]
struct TextMatrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
    leading: f32,
}

impl Default for TextMatrix {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
            leading: DEFAULT_LEADING,
        }
    }
}

impl TextMatrix {
    fn set(&mut self, a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) {
        self.a = a;
        self.b = b;
        self.c = c;
        self.d = d;
        self.e = e;
        self.f = f;
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.e += tx * self.a + ty * self.c;
        self.f += tx * self.b + ty * self.d;
    }

    fn next_line(&mut self) {
        self.translate(0.0, -self.leading);
    }

    /// Length of the text-space y axis in device space.
    fn vertical_scale(&self, ctm: &Ctm) -> f32 {
        let [a, b, c, d, _, _] = ctm.0;
        let x = self.c * a + self.d * c;
        let y = self.c * b + self.d * d;
        (x * x + y * y).sqrt()
    }
}

/// Graphics-state transformation matrix `[a b c d e f]`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Ctm([f32; 6]);

impl Ctm {
    const IDENTITY: Ctm = Ctm([1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);

    /// `self × outer`: apply `self` first, then `outer`.
    fn then(&self, outer: &Ctm) -> Ctm {
        let [a, b, c, d, e, f] = self.0;
        let [a2, b2, c2, d2, e2, f2] = outer.0;
        Ctm([
            a * a2 + b * c2,
            a * b2 + b * d2,
            c * a2 + d * c2,
            c * b2 + d * d2,
            e * a2 + f * c2 + e2,
            e * b2 + f * d2 + f2,
        ])
    }
}

fn get_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Check if character is from a script that doesn't use word spaces.
/// Chinese and Japanese don't use spaces between words, but Korean does.
fn is_spaceless_script_char(c: char) -> bool {
    let code = c as u32;

    // CJK Unified Ideographs and Extension A
    (0x4E00..=0x9FFF).contains(&code)
    || (0x3400..=0x4DBF).contains(&code)
    // Extensions B-F
    || (0x20000..=0x2EBEF).contains(&code)
    // Hiragana, Katakana
    || (0x3040..=0x30FF).contains(&code)
    // CJK Symbols and Punctuation
    || (0x3000..=0x303F).contains(&code)
}

/// Simple text decoding fallback when no encoding is available.
pub fn decode_text_simple(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&utf16);
    }

    if let Ok(s) = std::str::from_utf8(bytes) {
        return s.to_string();
    }

    // Latin-1
    bytes.iter().map(|&b| b as char).collect()
}
