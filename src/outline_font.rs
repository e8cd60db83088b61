// TrueType / OpenType faces from caller-supplied bytes, rasterized with swash.
// Where the bytes come from (file, embedded, system lookup) is not this module's concern.

use std::cell::RefCell;

use swash::scale::image::Content;
use swash::scale::{Render, ScaleContext, Source};
use swash::zeno::{Format, Vector};
use swash::{CacheKey, FontRef};

use crate::error::Error;
use crate::font::Typeface;
use crate::types::{GlyphMask, LineMetrics};

/// An owned outline font. Keeps the raw data plus the offset/key swash needs
/// to rebuild a borrowed `FontRef` on demand.
pub struct OutlineFace {
    name: String,
    data: Vec<u8>,
    offset: u32,
    key: CacheKey,
    // Scaler caches; rasterizing needs `&mut` but the trait hands out `&self`.
    scale_cx: RefCell<ScaleContext>,
}

impl OutlineFace {
    /// Parse face `index` of a font file or collection.
    pub fn from_bytes(data: Vec<u8>, index: usize) -> Result<Self, Error> {
        let font = FontRef::from_index(&data, index)
            .ok_or_else(|| Error::FontLoad(format!("no usable face at index {index}")))?;
        let (offset, key) = (font.offset, font.key);
        let name = format!("outline#{index}");
        log::debug!("loaded outline face {name} ({} bytes)", data.len());
        Ok(Self { name, data, offset, key, scale_cx: RefCell::new(ScaleContext::new()) })
    }

    fn font_ref(&self) -> FontRef<'_> {
        FontRef { data: &self.data, offset: self.offset, key: self.key }
    }
}

impl Typeface for OutlineFace {
    fn name(&self) -> &str {
        &self.name
    }

    fn line_metrics(&self, size: f32) -> LineMetrics {
        let m = self.font_ref().metrics(&[]).scale(size);
        LineMetrics {
            ascent: m.ascent.abs(),
            descent: m.descent.abs(),
            leading: m.leading.max(0.0),
        }
    }

    fn advance(&self, ch: char, size: f32) -> f32 {
        let font = self.font_ref();
        let glyph_id = font.charmap().map(ch);
        font.glyph_metrics(&[]).scale(size).advance_width(glyph_id)
    }

    fn rasterize(&self, ch: char, size: f32, offset: (f32, f32), hint: bool) -> Option<GlyphMask> {
        if ch.is_whitespace() {
            return None;
        }
        let font = self.font_ref();
        let glyph_id = font.charmap().map(ch);

        let mut scale_cx = self.scale_cx.borrow_mut();
        let mut scaler = scale_cx.builder(font).size(size).hint(hint).build();

        let image = Render::new(&[Source::Outline])
            .format(Format::Alpha)
            // Outlines are y-up; the canvas pen offset is y-down.
            .offset(Vector::new(offset.0, -offset.1))
            .render(&mut scaler, glyph_id)?;

        let placement = image.placement;
        let coverage = match image.content {
            Content::Mask => image.data,
            // Keep only the alpha of RGBA pixels.
            Content::Color => image.data.chunks_exact(4).map(|px| px[3]).collect(),
            // Average the three subpixel samples.
            Content::SubpixelMask => image
                .data
                .chunks_exact(4)
                .map(|px| ((px[0] as u16 + px[1] as u16 + px[2] as u16) / 3) as u8)
                .collect(),
        };

        let mask = GlyphMask {
            left: placement.left,
            top: placement.top,
            width: placement.width,
            height: placement.height,
            coverage,
        };
        if mask.is_empty() { None } else { Some(mask) }
    }
}
