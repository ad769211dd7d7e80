//! Overlay options and configuration.

use crate::font::StandardFont;

/// Options controlling how the text layer is composited.
#[derive(Debug, Clone)]
pub struct OverlayOptions {
    /// Whether emitted text paints ink or is selection-only
    pub render_mode: RenderMode,

    /// Replace each word's Y extent with its enclosing line's
    pub use_line_extent: bool,

    /// Standard font used to measure and draw the text layer
    pub font: StandardFont,
}

impl OverlayOptions {
    /// Create new overlay options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the render mode.
    pub fn with_render_mode(mut self, mode: RenderMode) -> Self {
        self.render_mode = mode;
        self
    }

    /// Emit visible (inked) text instead of the invisible default.
    pub fn visible(mut self) -> Self {
        self.render_mode = RenderMode::Visible;
        self
    }

    /// Enable or disable the line-extent override for word boxes.
    ///
    /// Some OCR engines report tighter per-word Y extents than the
    /// baseline-aligned line they belong to; this substitutes the line's
    /// top and bottom for each word's.
    pub fn with_line_extent(mut self, enabled: bool) -> Self {
        self.use_line_extent = enabled;
        self
    }

    /// Set the overlay font.
    pub fn with_font(mut self, font: StandardFont) -> Self {
        self.font = font;
        self
    }
}

impl Default for OverlayOptions {
    fn default() -> Self {
        Self {
            render_mode: RenderMode::Invisible,
            use_line_extent: false,
            font: StandardFont::Helvetica,
        }
    }
}

/// Text rendering mode for the emitted layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Non-marking text, present only for selection/search/extraction
    #[default]
    Invisible,
    /// Filled text drawn over the scanned image
    Visible,
}

impl RenderMode {
    /// The PDF `Tr` operand for this mode (0 = fill, 3 = neither).
    pub(crate) fn operand(self) -> i64 {
        match self {
            RenderMode::Visible => 0,
            RenderMode::Invisible => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_builder() {
        let options = OverlayOptions::new()
            .visible()
            .with_line_extent(true)
            .with_font(StandardFont::Courier);

        assert_eq!(options.render_mode, RenderMode::Visible);
        assert!(options.use_line_extent);
        assert_eq!(options.font, StandardFont::Courier);
    }

    #[test]
    fn test_default_options() {
        let options = OverlayOptions::default();
        assert_eq!(options.render_mode, RenderMode::Invisible);
        assert!(!options.use_line_extent);
        assert_eq!(options.font, StandardFont::Helvetica);
    }

    #[test]
    fn test_render_mode_operands() {
        assert_eq!(RenderMode::Visible.operand(), 0);
        assert_eq!(RenderMode::Invisible.operand(), 3);
    }
}
