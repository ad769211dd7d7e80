//! Bounding-box decoding from hOCR `title` attributes.
//!
//! hOCR encodes geometry as a `bbox x0 y0 x1 y1` token inside the `title`
//! attribute, alongside other semicolon-separated properties
//! (`bbox 36 92 618 184; x_wconf 93`).

use crate::error::{Error, Result};

/// A bounding box in source-image pixels, top-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BBox {
    /// Left edge
    pub x0: i32,
    /// Top edge
    pub y0: i32,
    /// Right edge
    pub x1: i32,
    /// Bottom edge
    pub y1: i32,
}

impl BBox {
    /// Create a bounding box from its four edges.
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Width in pixels.
    pub fn width(&self) -> i32 {
        self.x1 - self.x0
    }

    /// Height in pixels.
    pub fn height(&self) -> i32 {
        self.y1 - self.y0
    }

    /// Replace the Y extent with another box's, keeping the X extent.
    pub fn with_y_extent_of(self, other: &BBox) -> Self {
        Self {
            x0: self.x0,
            y0: other.y0,
            x1: self.x1,
            y1: other.y1,
        }
    }
}

/// Decode the `bbox` token from an hOCR `title` attribute value.
///
/// The token must be followed by four whitespace-separated integers and
/// terminated by `;` or the end of the attribute. A missing token or an
/// inverted box is an error.
pub fn parse_bbox(title: &str) -> Result<BBox> {
    for property in title.split(';') {
        let mut tokens = property.split_whitespace();
        if tokens.next() != Some("bbox") {
            continue;
        }

        let mut edges = [0i32; 4];
        for edge in edges.iter_mut() {
            let token = tokens
                .next()
                .ok_or_else(|| Error::MalformedBBox(title.to_string()))?;
            *edge = token
                .parse()
                .map_err(|_| Error::MalformedBBox(title.to_string()))?;
        }

        let bbox = BBox::new(edges[0], edges[1], edges[2], edges[3]);
        if bbox.width() < 0 || bbox.height() < 0 {
            return Err(Error::MalformedBBox(title.to_string()));
        }
        return Ok(bbox);
    }
    Err(Error::MalformedBBox(title.to_string()))
}

/// Parse the 0-based page index from an `ocr_page` id (`page_2` → 1).
///
/// The id carries a 1-based numeric suffix after the final underscore.
pub fn parse_page_index(id: &str) -> Result<usize> {
    let suffix = id
        .rsplit('_')
        .next()
        .ok_or_else(|| Error::MalformedPageId(id.to_string()))?;
    let number: usize = suffix
        .parse()
        .map_err(|_| Error::MalformedPageId(id.to_string()))?;
    number
        .checked_sub(1)
        .ok_or_else(|| Error::MalformedPageId(id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bbox_plain() {
        let bbox = parse_bbox("bbox 36 92 618 184").unwrap();
        assert_eq!(bbox, BBox::new(36, 92, 618, 184));
        assert_eq!(bbox.width(), 582);
        assert_eq!(bbox.height(), 92);
    }

    #[test]
    fn test_parse_bbox_with_trailing_properties() {
        let bbox = parse_bbox("bbox 10 10 100 40; x_wconf 93").unwrap();
        assert_eq!(bbox, BBox::new(10, 10, 100, 40));
    }

    #[test]
    fn test_parse_bbox_after_other_properties() {
        let bbox = parse_bbox("image \"scan.png\"; bbox 0 0 1000 1500; ppageno 0").unwrap();
        assert_eq!(bbox, BBox::new(0, 0, 1000, 1500));
    }

    #[test]
    fn test_parse_bbox_missing_token() {
        assert!(matches!(
            parse_bbox("x_wconf 93"),
            Err(Error::MalformedBBox(_))
        ));
    }

    #[test]
    fn test_parse_bbox_truncated() {
        assert!(parse_bbox("bbox 10 10 100").is_err());
        assert!(parse_bbox("bbox 10 10 100 abc").is_err());
    }

    #[test]
    fn test_parse_bbox_inverted_rejected() {
        assert!(parse_bbox("bbox 100 10 10 40").is_err());
        assert!(parse_bbox("bbox 10 40 100 10").is_err());
    }

    #[test]
    fn test_with_y_extent_of() {
        let word = BBox::new(10, 14, 100, 38);
        let line = BBox::new(10, 10, 500, 40);
        assert_eq!(word.with_y_extent_of(&line), BBox::new(10, 10, 100, 40));
    }

    #[test]
    fn test_parse_page_index() {
        assert_eq!(parse_page_index("page_1").unwrap(), 0);
        assert_eq!(parse_page_index("page_2").unwrap(), 1);
        assert_eq!(parse_page_index("page_10").unwrap(), 9);
    }

    #[test]
    fn test_parse_page_index_malformed() {
        assert!(parse_page_index("page_").is_err());
        assert!(parse_page_index("page_abc").is_err());
        assert!(parse_page_index("page_0").is_err());
    }
}
