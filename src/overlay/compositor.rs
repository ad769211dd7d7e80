//! Streaming hOCR-to-PDF compositor.
//!
//! Drives a pull parser over the (sanitized) hOCR input and routes each
//! recognized element to the page session machinery. Pages are processed
//! strictly in document order with at most one session open at a time, so
//! memory stays bounded by a single page's text runs.

use std::io::{BufReader, Read};

use log::trace;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{Error, Result};
use crate::font::GlyphMeasure;
use crate::hocr::{classify, BBox, Element, SanitizingReader};
use crate::options::OverlayOptions;
use crate::overlay::emitter::emit_word;
use crate::overlay::geometry::fit_word;
use crate::overlay::session::PageSession;

/// Mutable parse-time state scoped to the page currently being read.
#[derive(Default)]
struct ParserState {
    line_box: Option<BBox>,
    word_box: Option<BBox>,
    word_text: String,
    word_depth: Option<usize>,
}

impl ParserState {
    fn reset_for_page(&mut self) {
        self.line_box = None;
        self.word_box = None;
        self.word_text.clear();
        self.word_depth = None;
    }

    fn in_word(&self) -> bool {
        self.word_depth.is_some()
    }
}

/// Parse `hocr` and inject one text run per recognized word into `doc`.
pub(crate) fn overlay<R: Read>(
    hocr: R,
    doc: &mut lopdf::Document,
    options: &OverlayOptions,
) -> Result<()> {
    let mut reader = Reader::from_reader(BufReader::new(SanitizingReader::new(hocr)));
    reader.config_mut().trim_text(true);

    let mut state = ParserState::default();
    let mut session: Option<PageSession> = None;
    let mut depth = 0usize;
    let mut buf = Vec::with_capacity(1024);

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref tag)) => {
                depth += 1;
                handle_open(tag, depth, &mut state, &mut session, doc, options)?;
            }
            Ok(Event::Empty(ref tag)) => {
                // Self-closing elements cannot carry text, so a word here
                // can never produce a run; pages and lines still count.
                match classify(tag)? {
                    Some(Element::Page(page)) => {
                        if let Some(mut open) = session.take() {
                            open.close(doc)?;
                        }
                        state.reset_for_page();
                        session = Some(PageSession::open(doc, page, options.font)?);
                    }
                    Some(Element::Line(bbox)) => state.line_box = Some(bbox),
                    Some(Element::Word(_)) if session.is_none() => {
                        return Err(Error::WordOutsidePage);
                    }
                    Some(Element::Word(_)) | None => {}
                }
            }
            Ok(Event::Text(ref text)) => {
                if state.in_word() {
                    let unescaped = text
                        .unescape()
                        .map_err(|e| Error::MarkupSyntax(e.to_string()))?;
                    state.word_text.push_str(&unescaped);
                }
            }
            Ok(Event::CData(ref data)) => {
                if state.in_word() {
                    let decoded = reader
                        .decoder()
                        .decode(data)
                        .map_err(|e| Error::MarkupSyntax(e.to_string()))?;
                    state.word_text.push_str(&decoded);
                }
            }
            Ok(Event::End(_)) => {
                if state.word_depth == Some(depth) {
                    finish_word(&mut state, &mut session, options)?;
                }
                depth = depth.saturating_sub(1);
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(Error::MarkupSyntax(format!(
                    "markup error at byte {}: {e}",
                    reader.buffer_position()
                )));
            }
        }
        buf.clear();
    }

    if let Some(mut open) = session.take() {
        open.close(doc)?;
    }
    Ok(())
}

fn handle_open(
    tag: &BytesStart<'_>,
    depth: usize,
    state: &mut ParserState,
    session: &mut Option<PageSession>,
    doc: &mut lopdf::Document,
    options: &OverlayOptions,
) -> Result<()> {
    match classify(tag)? {
        Some(Element::Page(page)) => {
            if let Some(mut open) = session.take() {
                open.close(doc)?;
            }
            state.reset_for_page();
            *session = Some(PageSession::open(doc, page, options.font)?);
        }
        Some(Element::Line(bbox)) => {
            state.line_box = Some(bbox);
        }
        Some(Element::Word(bbox)) => {
            if session.is_none() {
                return Err(Error::WordOutsidePage);
            }
            state.word_box = Some(bbox);
            state.word_text.clear();
            state.word_depth = Some(depth);
        }
        None => {}
    }
    Ok(())
}

/// Close out the word whose end tag was just read, emitting its text run.
fn finish_word(
    state: &mut ParserState,
    session: &mut Option<PageSession>,
    options: &OverlayOptions,
) -> Result<()> {
    state.word_depth = None;
    let word_box = state.word_box.take();
    let text = std::mem::take(&mut state.word_text);

    let text = text.trim();
    if text.is_empty() {
        return Ok(());
    }
    let Some(mut bbox) = word_box else {
        return Ok(());
    };
    let session = session.as_mut().ok_or(Error::WordOutsidePage)?;

    if options.use_line_extent {
        let line = state.line_box.ok_or(Error::WordBeforeLine)?;
        bbox = bbox.with_y_extent_of(&line);
    }

    let advance = options.font.advance_width_1000(text)?;
    let placement = fit_word(
        &bbox,
        session.scale_x(),
        session.scale_y(),
        session.height(),
        advance,
    );
    trace!(
        "page {}: {:?} -> ({:.2}, {:.2}) @ {:.2}pt",
        session.index(),
        text,
        placement.x,
        placement.y,
        placement.font_size
    );
    emit_word(session.ops_mut(), placement, text, options.render_mode);
    Ok(())
}
