//! Synthetic PDF fixtures shared by the integration tests.

#![allow(dead_code)]

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

/// Regular body font resource key.
pub const REGULAR: &str = "F1";
/// Bold font resource key.
pub const BOLD: &str = "F2";

/// One shown line: font resource key, size, text.
pub type Line<'a> = (&'a str, f32, &'a str);

/// How page content streams are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contents {
    /// Unfiltered stream bytes
    Raw,
    /// `/FlateDecode` streams
    Flate,
    /// `/Contents` points at a non-stream object, so no page can be read
    Broken,
}

/// Build a PDF whose pages show the given lines top to bottom.
///
/// `F1` is Helvetica and `F2` is Helvetica-Bold. Every line sits on its
/// own baseline so each becomes a separate span.
pub fn build_pdf(pages: &[&[Line]]) -> Vec<u8> {
    build_pdf_with(pages, Contents::Raw)
}

/// Like [`build_pdf`], choosing how content streams are stored.
pub fn build_pdf_with(pages: &[&[Line]], contents: Contents) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let bold_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => regular_id,
            "F2" => bold_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for lines in pages {
        let mut operations = Vec::new();
        if contents == Contents::Flate {
            // Padding that deflates well, so compression always applies.
            for _ in 0..64 {
                operations.push(Operation::new("q", vec![]));
                operations.push(Operation::new("Q", vec![]));
            }
        }
        operations.extend([
            Operation::new("BT", vec![]),
            Operation::new("Td", vec![72.into(), 760.into()]),
        ]);
        for (font, size, text) in lines.iter() {
            operations.push(Operation::new("Tf", vec![(*font).into(), (*size).into()]));
            operations.push(Operation::new("Td", vec![0.into(), (-(*size * 1.5)).into()]));
            operations.push(Operation::new("Tj", vec![Object::string_literal(*text)]));
        }
        operations.push(Operation::new("ET", vec![]));

        let content = Content { operations };
        let mut stream = Stream::new(
            dictionary! {},
            content.encode().expect("encode content stream"),
        );
        let content_id = match contents {
            Contents::Raw => doc.add_object(stream),
            Contents::Flate => {
                let _ = stream.compress();
                assert!(stream.dict.has(b"Filter"), "content stream was not compressed");
                doc.add_object(stream)
            }
            Contents::Broken => doc.add_object(Object::Integer(0)),
        };
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("serialize pdf");
    bytes
}

/// A two-page paper exercising every heading rule.
///
/// Sizes 24, 14, 10, 18, 15.5, 10, 10 give max 24 and average 14.5, so the
/// cut-offs are 21.6 (H1), 17.4 (H2) and 15.225 (bold H3).
pub fn sample_paper() -> Vec<u8> {
    sample_paper_with(Contents::Raw)
}

/// [`sample_paper`] with the chosen content stream storage.
pub fn sample_paper_with(contents: Contents) -> Vec<u8> {
    build_pdf_with(
        &[
            &[
                (BOLD, 24.0, "Deep Learning Survey"),
                (BOLD, 14.0, "Abstract"),
                (REGULAR, 10.0, "We review recent work on neural networks."),
            ],
            &[
                (BOLD, 18.0, "1 Background"),
                (BOLD, 15.5, "1.1 Convolution"),
                (REGULAR, 10.0, "Early models were shallow."),
                (REGULAR, 10.0, "Conclusion"),
            ],
        ],
        contents,
    )
}

/// A one-page document with no text at all.
pub fn blank_document() -> Vec<u8> {
    build_pdf(&[&[]])
}
