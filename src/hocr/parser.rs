//! Classification of hOCR elements from streaming parser events.
//!
//! hOCR assigns semantic roles through the `class` attribute rather than
//! element names: a `div class="ocr_page"` is a page container, a
//! `span class="ocr_line"` a line container, and `ocrx_word` (or the older
//! `ocr_word` spelling) a recognized word. Anything else is ignored.

use quick_xml::events::BytesStart;

use super::bbox::{parse_bbox, parse_page_index, BBox};
use crate::error::{Error, Result};

/// A source page: 0-based index plus its pixel bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourcePage {
    /// 0-based destination page index (1-based in the hOCR id)
    pub index: usize,
    /// Page bounds in source-image pixels
    pub bbox: BBox,
}

/// An hOCR element with a recognized semantic role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Element {
    /// Page container (`ocr_page`)
    Page(SourcePage),
    /// Line container (`ocr_line`)
    Line(BBox),
    /// Recognized word (`ocrx_word` or `ocr_word`)
    Word(BBox),
}

/// Classify a start tag by its hOCR class, if it has one.
///
/// Elements without a recognized class yield `Ok(None)`; elements with a
/// recognized class but missing/malformed geometry or page identity are
/// structural errors.
pub fn classify(tag: &BytesStart<'_>) -> Result<Option<Element>> {
    let Some(class) = attribute_value(tag, b"class")? else {
        return Ok(None);
    };

    let role = if has_class(&class, "ocr_page") {
        Role::Page
    } else if has_class(&class, "ocr_line") {
        Role::Line
    } else if has_class(&class, "ocrx_word") || has_class(&class, "ocr_word") {
        Role::Word
    } else {
        return Ok(None);
    };

    let title = attribute_value(tag, b"title")?.unwrap_or_default();
    let bbox = parse_bbox(&title)?;

    match role {
        Role::Page => {
            let id = attribute_value(tag, b"id")?
                .ok_or_else(|| Error::MalformedPageId(String::new()))?;
            let index = parse_page_index(&id)?;
            Ok(Some(Element::Page(SourcePage { index, bbox })))
        }
        Role::Line => Ok(Some(Element::Line(bbox))),
        Role::Word => Ok(Some(Element::Word(bbox))),
    }
}

enum Role {
    Page,
    Line,
    Word,
}

/// Whitespace-separated class token match.
fn has_class(class_attr: &str, class: &str) -> bool {
    class_attr.split_whitespace().any(|token| token == class)
}

/// Unescaped value of the named attribute, if present.
fn attribute_value(tag: &BytesStart<'_>, name: &[u8]) -> Result<Option<String>> {
    for attr in tag.attributes().flatten() {
        if attr.key.as_ref() == name {
            let value = attr
                .unescape_value()
                .map_err(|e| Error::MarkupSyntax(e.to_string()))?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}
