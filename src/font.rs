//! Standard font selection and glyph measurement.
//!
//! The text layer is drawn with one of the non-embedded standard Type1
//! fonts, so the advance widths needed for the font-fit computation are
//! compiled in rather than read from font files. Widths are in glyph-space
//! units (1000 units per em), indexed by ASCII code point.

use crate::error::{Error, Result};

/// Glyph measurement capability used by the font-fit calculator.
///
/// Abstracting this behind a trait keeps the geometry code independent of
/// the font backend; an implementation backed by real font files can be
/// substituted without touching the transform.
pub trait GlyphMeasure {
    /// PostScript name of the measured font.
    fn postscript_name(&self) -> &'static str;

    /// Advance width of `text` at a nominal size of 1000, in glyph-space
    /// units. Fails if any character has no width entry.
    fn advance_width_1000(&self, text: &str) -> Result<f64>;
}

/// The fixed set of standard fonts available for the text layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StandardFont {
    /// Helvetica (default)
    #[default]
    Helvetica,
    /// Helvetica-Bold
    HelveticaBold,
    /// Times-Roman
    TimesRoman,
    /// Times-Bold
    TimesBold,
    /// Courier (fixed pitch)
    Courier,
}

impl StandardFont {
    /// Resolve a font by name, case-insensitively.
    ///
    /// Accepts the PostScript names (`Helvetica-Bold`) as well as the
    /// underscore spellings commonly seen in configuration files.
    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().replace('_', "-").as_str() {
            "helvetica" | "sans" => Ok(StandardFont::Helvetica),
            "helvetica-bold" => Ok(StandardFont::HelveticaBold),
            "times-roman" | "times" | "serif" => Ok(StandardFont::TimesRoman),
            "times-bold" => Ok(StandardFont::TimesBold),
            "courier" | "mono" => Ok(StandardFont::Courier),
            _ => Err(Error::UnknownFont(name.to_string())),
        }
    }

    /// All supported fonts, for CLI help output.
    pub fn all() -> &'static [StandardFont] {
        &[
            StandardFont::Helvetica,
            StandardFont::HelveticaBold,
            StandardFont::TimesRoman,
            StandardFont::TimesBold,
            StandardFont::Courier,
        ]
    }

    fn widths(self) -> &'static [u16; 95] {
        match self {
            StandardFont::Helvetica => &HELVETICA_WIDTHS,
            StandardFont::HelveticaBold => &HELVETICA_BOLD_WIDTHS,
            StandardFont::TimesRoman => &TIMES_ROMAN_WIDTHS,
            StandardFont::TimesBold => &TIMES_BOLD_WIDTHS,
            StandardFont::Courier => &COURIER_WIDTHS,
        }
    }
}

impl GlyphMeasure for StandardFont {
    fn postscript_name(&self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helvetica",
            StandardFont::HelveticaBold => "Helvetica-Bold",
            StandardFont::TimesRoman => "Times-Roman",
            StandardFont::TimesBold => "Times-Bold",
            StandardFont::Courier => "Courier",
        }
    }

    fn advance_width_1000(&self, text: &str) -> Result<f64> {
        let widths = self.widths();
        let mut total = 0.0f64;
        for ch in text.chars() {
            let code = ch as u32;
            if !(0x20..=0x7E).contains(&code) {
                return Err(Error::UnmeasurableGlyph {
                    ch,
                    font: self.postscript_name(),
                });
            }
            total += f64::from(widths[(code - 0x20) as usize]);
        }
        Ok(total)
    }
}

// Advance widths for U+0020..=U+007E from the Adobe AFM files for the
// standard Type1 fonts, 16 glyphs per row.

const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, //
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, //
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, //
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, //
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, //
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, //
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, //
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, //
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, //
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, //
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

const TIMES_ROMAN_WIDTHS: [u16; 95] = [
    250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278, //
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 278, 278, 564, 564, 564, 444, //
    921, 722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889, 722, 722, //
    556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611, 333, 278, 333, 469, 500, //
    333, 444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778, 500, 500, //
    500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444, 480, 200, 480, 541,
];

const TIMES_BOLD_WIDTHS: [u16; 95] = [
    250, 333, 555, 500, 500, 1000, 833, 278, 333, 333, 500, 570, 250, 333, 250, 278, //
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 333, 333, 570, 570, 570, 500, //
    930, 722, 667, 722, 722, 667, 611, 778, 778, 389, 500, 778, 667, 944, 722, 778, //
    611, 778, 722, 556, 667, 722, 722, 1000, 722, 722, 667, 333, 278, 333, 581, 500, //
    333, 500, 556, 444, 556, 444, 333, 500, 556, 278, 333, 556, 278, 833, 556, 500, //
    556, 556, 444, 389, 333, 556, 500, 722, 500, 500, 444, 394, 220, 394, 520,
];

const COURIER_WIDTHS: [u16; 95] = [600; 95];
