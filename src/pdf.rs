//! lopdf helpers shared by the compositor and the PDF figure backend

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};

/// PDF points per inch
pub const POINTS_PER_INCH: f64 = 72.0;

/// Largest magnitude stored as an integer; PDF readers only guarantee 32-bit integers
const MAX_INTEGER: f64 = 2_147_483_647.0;

/// Numeric operand. Whole numbers are written as integers so sizes survive
/// a save and reload exactly; other values go through the `f32` reals lopdf
/// stores.
pub(crate) fn real(value: f64) -> Object {
    if value.fract() == 0.0 && value.abs() <= MAX_INTEGER {
        Object::Integer(value as i64)
    } else {
        Object::Real(value as f32)
    }
}

pub(crate) fn name(value: &str) -> Object {
    Object::Name(value.as_bytes().to_vec())
}

/// Numeric value of an integer or real object
pub(crate) fn number(object: &Object) -> Option<f64> {
    match object {
        Object::Integer(value) => Some(*value as f64),
        Object::Real(value) => Some(*value as f64),
        _ => None,
    }
}

/// Resolve a font family and weight to one of the standard 14 base fonts.
///
/// Families are matched loosely ("Arial", "sans-serif" and unknown names all
/// land on Helvetica).
pub fn base_font(family: &str, bold: bool) -> &'static str {
    let family = family.to_ascii_lowercase();
    if family.contains("courier") || family.contains("mono") {
        if bold {
            "Courier-Bold"
        } else {
            "Courier"
        }
    } else if family.contains("times") || (family.contains("serif") && !family.contains("sans")) {
        if bold {
            "Times-Bold"
        } else {
            "Times-Roman"
        }
    } else if bold {
        "Helvetica-Bold"
    } else {
        "Helvetica"
    }
}

/// Type1 font dictionary for a standard 14 font
pub(crate) fn font_dictionary(base_font: &str) -> Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => name(base_font),
        "Encoding" => "WinAnsiEncoding",
    }
}

/// Encode text for a WinAnsi simple font. Characters outside Latin-1 become `?`.
pub(crate) fn encode_text(text: &str) -> Object {
    let bytes: Vec<u8> = text
        .chars()
        .map(|c| if (c as u32) < 256 { c as u32 as u8 } else { b'?' })
        .collect();
    Object::string_literal(bytes)
}

/// Text drawing operations: font, position and the string
pub(crate) fn text_operations(
    font_resource: &str,
    size: f64,
    matrix: [f64; 6],
    text: &str,
) -> Vec<Operation> {
    vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec![name(font_resource), real(size)]),
        Operation::new("Tm", matrix.iter().map(|v| real(*v)).collect()),
        Operation::new("Tj", vec![encode_text(text)]),
        Operation::new("ET", vec![]),
    ]
}

/// Add a page tree, one page and a catalog to `doc`.
///
/// The page has a MediaBox of `[0 0 width height]` and draws `content` with
/// `resources`. Returns the page object id.
pub(crate) fn finish_single_page(
    doc: &mut Document,
    width: f64,
    height: f64,
    content: Content,
    resources: Dictionary,
) -> Result<ObjectId, lopdf::Error> {
    let pages_id = doc.new_object_id();
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![Object::Integer(0), Object::Integer(0), real(width), real(height)],
        "Contents" => content_id,
        "Resources" => resources,
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![Object::Reference(page_id)],
            "Count" => Object::Integer(1),
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    Ok(page_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_numbers_are_integers() {
        assert!(matches!(real(352.0), Object::Integer(352)));
        assert!(matches!(real(-4.0), Object::Integer(-4)));
        assert!(matches!(real(0.5), Object::Real(v) if v == 0.5));
        assert!(matches!(real(f64::NAN), Object::Real(_)));
        assert_eq!(number(&real(148.0)), Some(148.0));
    }

    #[test]
    fn test_base_font_families() {
        assert_eq!(base_font("Helvetica", false), "Helvetica");
        assert_eq!(base_font("Helvetica", true), "Helvetica-Bold");
        assert_eq!(base_font("Arial", true), "Helvetica-Bold");
        assert_eq!(base_font("sans-serif", false), "Helvetica");
        assert_eq!(base_font("Times New Roman", false), "Times-Roman");
        assert_eq!(base_font("serif", true), "Times-Bold");
        assert_eq!(base_font("DejaVu Sans Mono", false), "Courier");
    }

    #[test]
    fn test_encode_text_replaces_wide_chars() {
        match encode_text("a\u{3b1}é") {
            Object::String(bytes, _) => assert_eq!(bytes, vec![b'a', b'?', 0xe9]),
            other => panic!("unexpected object {other:?}"),
        }
    }

    #[test]
    fn test_finish_single_page_builds_page_tree() {
        let mut doc = Document::with_version("1.5");
        let page_id = finish_single_page(
            &mut doc,
            100.0,
            50.0,
            Content { operations: vec![] },
            Dictionary::new(),
        )
        .unwrap();
        let pages = doc.get_pages();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages.get(&1), Some(&page_id));
    }
}
