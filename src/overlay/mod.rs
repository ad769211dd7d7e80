//! PDF text-layer composition.

mod compositor;
mod emitter;
mod geometry;
mod session;

pub(crate) use compositor::overlay;
pub use geometry::{fit_word, Placement};
pub use session::PageSession;
