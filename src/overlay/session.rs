//! Page session tracking.
//!
//! A [`PageSession`] is the open binding between one source page and one
//! destination page: it resolves the destination page and its physical
//! rectangle, derives the pixel-to-point scale factors, and buffers the
//! emitted content-stream operations until [`PageSession::close`] flushes
//! them into the page's `Contents` as one appended stream.

use log::{debug, warn};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};

use crate::error::{Error, Result};
use crate::font::{GlyphMeasure, StandardFont};
use crate::hocr::SourcePage;

/// Resource name under which the overlay font is registered on each page.
pub(crate) const FONT_RESOURCE: &str = "Focr";

/// Bound on Pages-tree ancestor walks, against malformed cyclic documents.
const PARENT_WALK_LIMIT: usize = 10;

/// The open binding between a source page and a destination PDF page.
pub struct PageSession {
    page_id: ObjectId,
    index: usize,
    height: f64,
    scale_x: f64,
    scale_y: f64,
    ops: Vec<Operation>,
    closed: bool,
}

impl PageSession {
    /// Open a session for `page`, resolving the destination page by its
    /// 0-based index and registering `font` in the page's resources.
    pub fn open(doc: &mut Document, page: SourcePage, font: StandardFont) -> Result<Self> {
        let pages = doc.get_pages();
        let page_number = u32::try_from(page.index + 1)
            .map_err(|_| Error::PageOutOfRange(page.index, pages.len()))?;
        let page_id = *pages
            .get(&page_number)
            .ok_or(Error::PageOutOfRange(page.index, pages.len()))?;

        let rect = media_box(doc, page_id).ok_or(Error::PageRectangle(page.index))?;
        let width = f64::from(rect[2] - rect[0]);
        let height = f64::from(rect[3] - rect[1]);

        let src_width = page.bbox.width();
        let src_height = page.bbox.height();
        if src_width <= 0 || src_height <= 0 {
            return Err(Error::MalformedBBox(format!(
                "degenerate page bbox {:?}",
                page.bbox
            )));
        }

        register_font(doc, page_id, font)?;

        let scale_x = width / f64::from(src_width);
        let scale_y = height / f64::from(src_height);
        debug!(
            "opened page {}: {:.2}x{:.2}pt, scale {:.4}x{:.4}",
            page.index, width, height, scale_x, scale_y
        );

        Ok(Self {
            page_id,
            index: page.index,
            height,
            scale_x,
            scale_y,
            ops: Vec::new(),
            closed: false,
        })
    }

    /// 0-based destination page index this session is bound to.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Destination page height in points.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Horizontal pixels-to-points scale.
    pub fn scale_x(&self) -> f64 {
        self.scale_x
    }

    /// Vertical pixels-to-points scale.
    pub fn scale_y(&self) -> f64 {
        self.scale_y
    }

    /// The buffered content-stream operations for this page.
    pub(crate) fn ops_mut(&mut self) -> &mut Vec<Operation> {
        &mut self.ops
    }

    /// Flush the buffered text runs into the page's `Contents`.
    ///
    /// Idempotent; closing an already-closed or empty session is a no-op.
    pub fn close(&mut self, doc: &mut Document) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;

        if self.ops.is_empty() {
            debug!("closed page {}: no text runs", self.index);
            return Ok(());
        }

        let mut operations = Vec::with_capacity(self.ops.len() + 2);
        operations.push(Operation::new("q", vec![]));
        operations.append(&mut self.ops);
        operations.push(Operation::new("Q", vec![]));

        let encoded = Content { operations }
            .encode()
            .map_err(|e| Error::PdfStructure(e.to_string()))?;
        let stream_id = doc.add_object(Object::Stream(Stream::new(Dictionary::new(), encoded)));
        append_content(doc, self.page_id, stream_id)?;

        debug!("closed page {}", self.index);
        Ok(())
    }
}

impl Drop for PageSession {
    fn drop(&mut self) {
        if !self.closed && !self.ops.is_empty() {
            // Reached only when a conversion aborts mid-page; the caller
            // must discard the document, so the buffered runs are dropped.
            warn!(
                "page {} session dropped unflushed ({} buffered operations)",
                self.index,
                self.ops.len()
            );
        }
    }
}

/// Resolve a page's MediaBox, following indirect references and walking up
/// the Pages tree for inherited values.
fn media_box(doc: &Document, page_id: ObjectId) -> Option<[f32; 4]> {
    let mut dict = doc.get_dictionary(page_id).ok()?;
    for _ in 0..PARENT_WALK_LIMIT {
        if let Ok(obj) = dict.get(b"MediaBox") {
            let arr = match obj {
                Object::Array(arr) => Some(arr),
                Object::Reference(id) => match doc.get_object(*id) {
                    Ok(Object::Array(arr)) => Some(arr),
                    _ => None,
                },
                _ => None,
            }?;
            if arr.len() != 4 {
                return None;
            }
            let mut rect = [0.0f32; 4];
            for (slot, obj) in rect.iter_mut().zip(arr) {
                *slot = match obj {
                    Object::Integer(i) => *i as f32,
                    Object::Real(r) => *r,
                    _ => return None,
                };
            }
            return Some(rect);
        }
        match dict.get(b"Parent") {
            Ok(Object::Reference(parent_id)) => {
                dict = doc.get_dictionary(*parent_id).ok()?;
            }
            _ => return None,
        }
    }
    None
}

/// Register a standard Type1 font on the page under [`FONT_RESOURCE`].
fn register_font(doc: &mut Document, page_id: ObjectId, font: StandardFont) -> Result<()> {
    let font_id = doc.add_object(dictionary! {
        "Type" => Object::Name(b"Font".to_vec()),
        "Subtype" => Object::Name(b"Type1".to_vec()),
        "BaseFont" => Object::Name(font.postscript_name().as_bytes().to_vec()),
    });

    let location = ensure_page_resources(doc, page_id)?;

    // The Font table itself may be indirect; resolve before borrowing
    // the document mutably.
    let font_table_ref = {
        let resources = match location {
            Resources::Inline => match doc.get_dictionary(page_id)?.get(b"Resources") {
                Ok(Object::Dictionary(d)) => d,
                _ => return Err(Error::PdfStructure("page resources vanished".into())),
            },
            Resources::Referenced(id) => doc.get_dictionary(id)?,
        };
        match resources.get(b"Font") {
            Ok(Object::Reference(id)) => Some(*id),
            _ => None,
        }
    };

    if let Some(table_id) = font_table_ref {
        let table = doc.get_object_mut(table_id)?.as_dict_mut()?;
        table.set(FONT_RESOURCE, Object::Reference(font_id));
        return Ok(());
    }

    let resources = match location {
        Resources::Inline => {
            let page = doc.get_object_mut(page_id)?.as_dict_mut()?;
            page.get_mut(b"Resources")?.as_dict_mut()?
        }
        Resources::Referenced(id) => doc.get_object_mut(id)?.as_dict_mut()?,
    };
    if !resources.has(b"Font") {
        resources.set("Font", Dictionary::new());
    }
    let table = resources.get_mut(b"Font")?.as_dict_mut()?;
    table.set(FONT_RESOURCE, Object::Reference(font_id));
    Ok(())
}

/// Where a page's own Resources dictionary lives.
#[derive(Clone, Copy)]
enum Resources {
    Inline,
    Referenced(ObjectId),
}

/// Make sure the page carries its own Resources dictionary.
///
/// When the dictionary is inherited from the Pages tree it is copied onto
/// the page first, so registering the overlay font cannot leak into
/// sibling pages.
fn ensure_page_resources(doc: &mut Document, page_id: ObjectId) -> Result<Resources> {
    match doc.get_dictionary(page_id)?.get(b"Resources") {
        Ok(Object::Dictionary(_)) => return Ok(Resources::Inline),
        Ok(Object::Reference(id)) => return Ok(Resources::Referenced(*id)),
        _ => {}
    }

    let inherited = inherited_resources(doc, page_id).unwrap_or_default();
    let page = doc.get_object_mut(page_id)?.as_dict_mut()?;
    page.set("Resources", Object::Dictionary(inherited));
    Ok(Resources::Inline)
}

/// Resources dictionary inherited from the Pages tree, if any.
fn inherited_resources(doc: &Document, page_id: ObjectId) -> Option<Dictionary> {
    let mut dict = doc.get_dictionary(page_id).ok()?;
    for _ in 0..PARENT_WALK_LIMIT {
        if let Ok(obj) = dict.get(b"Resources") {
            match obj {
                Object::Dictionary(d) => return Some(d.clone()),
                Object::Reference(id) => return doc.get_dictionary(*id).ok().cloned(),
                _ => {}
            }
        }
        match dict.get(b"Parent") {
            Ok(Object::Reference(parent_id)) => {
                dict = doc.get_dictionary(*parent_id).ok()?;
            }
            _ => return None,
        }
    }
    None
}

/// Append a new content stream to the page, preserving existing content.
fn append_content(doc: &mut Document, page_id: ObjectId, stream_id: ObjectId) -> Result<()> {
    let page = doc.get_object_mut(page_id)?.as_dict_mut()?;
    let existing = page.get(b"Contents").ok().cloned();
    match existing {
        Some(Object::Reference(first)) => {
            page.set(
                "Contents",
                Object::Array(vec![Object::Reference(first), Object::Reference(stream_id)]),
            );
        }
        Some(Object::Array(mut streams)) => {
            streams.push(Object::Reference(stream_id));
            page.set("Contents", Object::Array(streams));
        }
        _ => {
            page.set("Contents", Object::Reference(stream_id));
        }
    }
    Ok(())
}
