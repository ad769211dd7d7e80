//! # hocr2pdf
//!
//! Text-layer composition for image-based PDFs.
//!
//! This library reads hOCR markup (the HTML-based output format of OCR
//! engines such as Tesseract) and injects the recognized words into an
//! existing PDF as a positioned text layer. The layer is invisible by
//! default, which turns a scanned, image-only document into a searchable
//! one without touching its appearance.
//!
//! ## Quick Start
//!
//! ```no_run
//! use hocr2pdf::overlay_file;
//!
//! fn main() -> hocr2pdf::Result<()> {
//!     overlay_file("scan.hocr", "scan.pdf", "searchable.pdf")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Streaming**: one page in memory at a time, pull-parsed with quick-xml
//! - **Tolerant input**: control characters from OCR output are scrubbed
//!   before parsing instead of aborting the conversion
//! - **Precise placement**: per-word positioning with font sizes solved
//!   from standard Type1 metrics so text width matches the source box
//! - **No font embedding**: the overlay uses the base-14 fonts every
//!   PDF reader ships

pub mod error;
pub mod font;
pub mod hocr;
pub mod options;
pub mod overlay;

// Re-export commonly used types
pub use error::{Error, Result};
pub use font::{GlyphMeasure, StandardFont};
pub use hocr::{BBox, SanitizingReader};
pub use options::{OverlayOptions, RenderMode};
pub use overlay::Placement;

use std::fs::File;
use std::io::{BufReader, BufWriter, Read};
use std::path::Path;

use lopdf::Document;

/// Reusable hOCR-to-PDF compositor configured once, applied many times.
///
/// # Example
///
/// ```no_run
/// use hocr2pdf::{Compositor, OverlayOptions, StandardFont};
///
/// let compositor = Compositor::with_options(
///     OverlayOptions::new()
///         .visible()
///         .with_font(StandardFont::Courier),
/// );
/// let pdf = std::fs::read("scan.pdf").unwrap();
/// let hocr = std::fs::File::open("scan.hocr").unwrap();
/// let output = compositor.overlay_bytes(hocr, &pdf).unwrap();
/// ```
#[derive(Debug, Default, Clone)]
pub struct Compositor {
    options: OverlayOptions,
}

impl Compositor {
    /// Create a compositor with default options (invisible Helvetica).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a compositor with custom options.
    pub fn with_options(options: OverlayOptions) -> Self {
        Self { options }
    }

    /// The options this compositor applies.
    pub fn options(&self) -> &OverlayOptions {
        &self.options
    }

    /// Emit visible (inked) text instead of the invisible default.
    pub fn visible(mut self) -> Self {
        self.options = self.options.visible();
        self
    }

    /// Set the render mode.
    pub fn with_render_mode(mut self, mode: RenderMode) -> Self {
        self.options = self.options.with_render_mode(mode);
        self
    }

    /// Set the overlay font.
    pub fn with_font(mut self, font: StandardFont) -> Self {
        self.options = self.options.with_font(font);
        self
    }

    /// Enable or disable the line-extent override for word boxes.
    pub fn with_line_extent(mut self, enabled: bool) -> Self {
        self.options = self.options.with_line_extent(enabled);
        self
    }

    /// Inject the text layer described by `hocr` into an open document.
    ///
    /// On error the document may hold partially applied pages and should
    /// be discarded.
    pub fn overlay_document<R: Read>(&self, hocr: R, doc: &mut Document) -> Result<()> {
        overlay::overlay(hocr, doc, &self.options)
    }

    /// Inject the text layer into a PDF given as bytes, returning the
    /// rewritten PDF.
    pub fn overlay_bytes<R: Read>(&self, hocr: R, pdf: &[u8]) -> Result<Vec<u8>> {
        let mut doc = Document::load_mem(pdf)?;
        self.overlay_document(hocr, &mut doc)?;
        let mut out = Vec::new();
        doc.save_to(&mut out)
            .map_err(|e| Error::PdfSave(e.to_string()))?;
        Ok(out)
    }

    /// Inject the text layer reading the hOCR and PDF from files.
    pub fn overlay_file<P, Q, O>(&self, hocr: P, pdf: Q, output: O) -> Result<()>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
        O: AsRef<Path>,
    {
        let hocr = BufReader::new(File::open(hocr)?);
        let mut doc = Document::load(pdf)?;
        self.overlay_document(hocr, &mut doc)?;
        let mut out = BufWriter::new(File::create(output)?);
        doc.save_to(&mut out)
            .map_err(|e| Error::PdfSave(e.to_string()))?;
        Ok(())
    }
}

/// Overlay an hOCR file onto a PDF file with default options.
///
/// # Example
///
/// ```no_run
/// use hocr2pdf::overlay_file;
///
/// overlay_file("scan.hocr", "scan.pdf", "searchable.pdf").unwrap();
/// ```
pub fn overlay_file<P, Q, O>(hocr: P, pdf: Q, output: O) -> Result<()>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    O: AsRef<Path>,
{
    Compositor::new().overlay_file(hocr, pdf, output)
}

/// Overlay an hOCR file onto a PDF file with custom options.
///
/// # Example
///
/// ```no_run
/// use hocr2pdf::{overlay_file_with_options, OverlayOptions};
///
/// let options = OverlayOptions::new().visible();
/// overlay_file_with_options("scan.hocr", "scan.pdf", "proof.pdf", options).unwrap();
/// ```
pub fn overlay_file_with_options<P, Q, O>(
    hocr: P,
    pdf: Q,
    output: O,
    options: OverlayOptions,
) -> Result<()>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    O: AsRef<Path>,
{
    Compositor::with_options(options).overlay_file(hocr, pdf, output)
}

/// Overlay hOCR markup onto an already-open document with default options.
///
/// On error the document may hold partially applied pages and should be
/// discarded.
pub fn overlay_reader<R: Read>(hocr: R, doc: &mut Document) -> Result<()> {
    Compositor::new().overlay_document(hocr, doc)
}

/// Overlay hOCR markup onto a PDF held in memory with default options.
pub fn overlay_bytes<R: Read>(hocr: R, pdf: &[u8]) -> Result<Vec<u8>> {
    Compositor::new().overlay_bytes(hocr, pdf)
}

/// Overlay hOCR markup onto a PDF held in memory with custom options.
pub fn overlay_bytes_with_options<R: Read>(
    hocr: R,
    pdf: &[u8],
    options: OverlayOptions,
) -> Result<Vec<u8>> {
    Compositor::with_options(options).overlay_bytes(hocr, pdf)
}

#[cfg(test)]
pub(crate) mod test_support;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compositor_default_options() {
        let compositor = Compositor::new();
        assert_eq!(compositor.options().render_mode, RenderMode::Invisible);
        assert_eq!(compositor.options().font, StandardFont::Helvetica);
        assert!(!compositor.options().use_line_extent);
    }

    #[test]
    fn test_compositor_with_options() {
        let compositor = Compositor::with_options(
            OverlayOptions::new()
                .visible()
                .with_font(StandardFont::Courier)
                .with_line_extent(true),
        );
        assert_eq!(compositor.options().render_mode, RenderMode::Visible);
        assert_eq!(compositor.options().font, StandardFont::Courier);
        assert!(compositor.options().use_line_extent);
    }

    #[test]
    fn test_compositor_chained_builder() {
        let compositor = Compositor::new()
            .with_render_mode(RenderMode::Visible)
            .with_font(StandardFont::TimesBold)
            .with_line_extent(true);
        assert_eq!(compositor.options().render_mode, RenderMode::Visible);
        assert_eq!(compositor.options().font, StandardFont::TimesBold);
        assert!(compositor.options().use_line_extent);
    }

    #[test]
    fn test_overlay_bytes_rejects_invalid_pdf() {
        let result = overlay_bytes("".as_bytes(), b"not a pdf");
        assert!(result.is_err());
    }
}
