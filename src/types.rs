// Core types shared by the renderer, cropper and noise injector.

use image::{Rgba, RgbaImage};

use crate::error::Error;
use crate::font::Typeface;

/// The pixel grid every stage works on: RGBA, one `u8` per channel.
pub type Canvas = RgbaImage;

/// Opaque white, the paper the text is drawn on.
pub const PAPER: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Largest font size a request may ask for.
pub const MAX_FONT_SIZE: f32 = 1024.0;
/// Largest canvas (width x height) the renderer will allocate, 256 MiB of RGBA.
pub const MAX_CANVAS_PIXELS: u64 = 1 << 26;

/// One sample to generate: what to write, with which face, how big, how noisy.
#[derive(Clone, Copy)]
pub struct GenerationRequest<'a> {
    pub face: &'a dyn Typeface,
    pub font_size: f32, // pixels per em
    pub text: &'a str,
    pub noise: f64, // standard deviation multiplier (0 = clean)
}

impl<'a> GenerationRequest<'a> {
    pub fn new(face: &'a dyn Typeface, font_size: f32, text: &'a str, noise: f64) -> Self {
        Self { face, font_size, text, noise }
    }

    /// Reject bad numbers at the boundary, before anything is rendered.
    pub fn validate(&self) -> Result<(), Error> {
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(Error::InvalidConfiguration(format!(
                "font size must be positive, got {}",
                self.font_size
            )));
        }
        if self.font_size > MAX_FONT_SIZE {
            return Err(Error::InvalidConfiguration(format!(
                "font size {} exceeds the limit of {MAX_FONT_SIZE}",
                self.font_size
            )));
        }
        if !self.noise.is_finite() || self.noise < 0.0 {
            return Err(Error::InvalidConfiguration(format!(
                "noise intensity must be non-negative, got {}",
                self.noise
            )));
        }
        Ok(())
    }
}

impl std::fmt::Debug for GenerationRequest<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationRequest")
            .field("face", &self.face.name())
            .field("font_size", &self.font_size)
            .field("text", &self.text)
            .field("noise", &self.noise)
            .finish()
    }
}

/// Vertical measurements of a face at one size (pixels, all positive).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineMetrics {
    pub ascent: f32,  // baseline up to the top of the tallest glyph
    pub descent: f32, // baseline down to the bottom of the deepest glyph
    pub leading: f32, // extra gap between lines
}

impl LineMetrics {
    pub fn line_height(&self) -> f32 {
        self.ascent + self.descent + self.leading
    }
}

/// Measurements used only to size the initial canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphMetrics {
    pub ascent: f32,
    pub height: u32, // canvas height, padding included
    pub width: u32,  // canvas width, padding included
}

/// Anti-aliased coverage for one glyph, placed relative to the pen.
/// `left` is pixels right of the integer pen x; `top` is pixels above the integer baseline.
#[derive(Clone, Debug, PartialEq)]
pub struct GlyphMask {
    pub left: i32,
    pub top: i32,
    pub width: u32,
    pub height: u32,
    pub coverage: Vec<u8>, // width * height, row-major, 0 = none, 255 = full ink
}

impl GlyphMask {
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.coverage.iter().all(|&c| c == 0)
    }
}
