//! Error types for the hocr2pdf library.

use std::io;
use thiserror::Error;

/// Result type alias for hocr2pdf operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while compositing a text layer.
///
/// All variants are fatal to the conversion that raised them: there is no
/// degraded-mode continuation, and a destination document touched by a
/// failed conversion must be discarded by the caller.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The hOCR markup is not well formed XML/XHTML.
    #[error("hOCR markup error: {0}")]
    MarkupSyntax(String),

    /// An hOCR element is missing its `bbox` token, or the token is malformed.
    #[error("missing or malformed bbox in title attribute: {0:?}")]
    MalformedBBox(String),

    /// An `ocr_page` element carries an id that does not end in a page number.
    #[error("malformed page id: {0:?}")]
    MalformedPageId(String),

    /// A recognized word appeared outside any `ocr_page` element.
    #[error("word element encountered outside any page")]
    WordOutsidePage,

    /// With the line-extent override enabled, a word appeared before any
    /// line bbox was recorded on the current page.
    #[error("word element encountered before any line on the current page")]
    WordBeforeLine,

    /// The hOCR page index does not exist in the destination document.
    #[error("page {0} is out of range (destination has {1} pages)")]
    PageOutOfRange(usize, usize),

    /// The destination page's MediaBox could not be resolved.
    #[error("unresolvable page rectangle for page {0}")]
    PageRectangle(usize),

    /// The chosen font has no advance width for a character in the word.
    #[error("no advance width for {ch:?} in font {font}")]
    UnmeasurableGlyph {
        /// The character without a width entry.
        ch: char,
        /// PostScript name of the font being measured.
        font: &'static str,
    },

    /// The requested font name is not one of the supported standard fonts.
    #[error("unknown font name: {0:?}")]
    UnknownFont(String),

    /// Error reading or mutating PDF structure.
    #[error("PDF structure error: {0}")]
    PdfStructure(String),

    /// Error serializing the mutated destination document.
    #[error("PDF save error: {0}")]
    PdfSave(String),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            _ => Error::PdfStructure(err.to_string()),
        }
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::MarkupSyntax(err.to_string())
    }
}
