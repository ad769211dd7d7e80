//! hOCR markup handling: geometry decoding, element classification, and
//! the tolerant character-sanitizing reader.

mod bbox;
mod parser;
mod sanitize;

pub use bbox::{parse_bbox, parse_page_index, BBox};
pub use parser::{classify, Element, SourcePage};
pub use sanitize::SanitizingReader;
