// The typeface boundary. The renderer only needs three things from a face:
// line metrics, per-character advances and a coverage mask per glyph.
// Where the face comes from (built-in bitmap, outline file) is the caller's business.

use crate::types::{GlyphMask, LineMetrics};

pub trait Typeface {
    /// Short human-readable name, used in logs.
    fn name(&self) -> &str;

    /// Ascent / descent / leading at `size` pixels per em.
    fn line_metrics(&self, size: f32) -> LineMetrics;

    /// Horizontal pen advance for `ch` at `size`.
    fn advance(&self, ch: char, size: f32) -> f32;

    /// Rasterize `ch` at `size`. `offset` is the sub-pixel pen position in [0, 1)
    /// on each axis, in canvas orientation (a positive y moves the glyph down).
    /// Returns `None` when the glyph has nothing to draw (space, unmapped).
    fn rasterize(&self, ch: char, size: f32, offset: (f32, f32), hint: bool) -> Option<GlyphMask>;
}
