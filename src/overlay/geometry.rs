//! Coordinate transformation and font-fit calculation.
//!
//! Source coordinates are image pixels with a top-left origin and Y
//! growing downward; PDF page space has a bottom-left origin with Y
//! growing upward. The transform scales into page points and flips Y so a
//! word lands exactly over its scanned glyphs.

use crate::hocr::BBox;

/// Where and how large a text run is drawn on the destination page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Text origin X in destination points
    pub x: f64,
    /// Text origin Y in destination points (baseline at the box bottom)
    pub y: f64,
    /// Font size back-solved so the run's width matches the box width
    pub font_size: f64,
}

/// Fit a word box onto the destination page.
///
/// `advance_width_1000` is the advance width of the word's text at a
/// nominal size of 1000 and must be positive; the dispatcher never calls
/// this with empty text.
pub fn fit_word(
    word: &BBox,
    scale_x: f64,
    scale_y: f64,
    dest_height: f64,
    advance_width_1000: f64,
) -> Placement {
    debug_assert!(advance_width_1000 > 0.0);

    let x = f64::from(word.x0) * scale_x;
    let y = dest_height - f64::from(word.y1) * scale_y;
    let width = f64::from(word.width()) * scale_x;
    let font_size = width * 1000.0 / advance_width_1000;

    Placement { x, y, font_size }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::{GlyphMeasure, StandardFont};

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_fit_word_scales_and_flips() {
        // 1000x1500 px page onto a 500x750 pt destination: scale 0.5.
        let word = BBox::new(10, 10, 100, 40);
        let placement = fit_word(&word, 0.5, 0.5, 750.0, 2278.0);

        assert!((placement.x - 5.0).abs() < EPSILON);
        // y1=40 maps 40*0.5=20 down from the top, so 750-20=730 up from
        // the bottom-left origin.
        assert!((placement.y - 730.0).abs() < EPSILON);
    }

    #[test]
    fn test_font_size_matches_box_width() {
        let word = BBox::new(10, 10, 100, 40);
        let advance = StandardFont::Helvetica.advance_width_1000("Hello").unwrap();
        let placement = fit_word(&word, 0.5, 0.5, 750.0, advance);

        // Rendered width = advance * size / 1000 must equal the scaled box
        // width of 45 points.
        let rendered = advance * placement.font_size / 1000.0;
        assert!((rendered - 45.0).abs() < EPSILON);
    }

    #[test]
    fn test_fit_word_identity_scale() {
        let word = BBox::new(0, 0, 200, 50);
        let placement = fit_word(&word, 1.0, 1.0, 800.0, 1000.0);

        assert!((placement.x - 0.0).abs() < EPSILON);
        assert!((placement.y - 750.0).abs() < EPSILON);
        assert!((placement.font_size - 200.0).abs() < EPSILON);
    }

    #[test]
    fn test_fit_word_anisotropic_scales() {
        let word = BBox::new(100, 200, 300, 260);
        let placement = fit_word(&word, 0.25, 0.75, 900.0, 1000.0);

        assert!((placement.x - 25.0).abs() < EPSILON);
        assert!((placement.y - (900.0 - 260.0 * 0.75)).abs() < EPSILON);
        assert!((placement.font_size - 50_000.0 / 1000.0).abs() < EPSILON);
    }
}
