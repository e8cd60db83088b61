// Glyph renderer: measure the string, allocate a canvas of exactly that size,
// paint it white and draw the text in black ink on a single baseline.

use image::Pixel;

use crate::config::{BlendMode, RenderConfig};
use crate::error::Error;
use crate::font::Typeface;
use crate::gamma::GammaLut;
use crate::types::{Canvas, GlyphMask, GlyphMetrics, MAX_CANVAS_PIXELS, PAPER};

const INK: [u8; 3] = [0, 0, 0];

/* ---------- measuring ---------- */

/// Pen advance, snapped to whole pixels when sub-pixel positioning is off.
fn step(face: &dyn Typeface, ch: char, size: f32, config: &RenderConfig) -> f32 {
    let adv = face.advance(ch, size);
    if config.subpixel_positioning { adv } else { adv.round() }
}

/// Whole pixels needed for `len`, plus padding. Fails instead of saturating or wrapping.
fn extent(len: f32, padding: u32, what: &str) -> Result<u32, Error> {
    let out_of_range =
        || Error::InvalidConfiguration(format!("text {what} of {len}px is out of range"));
    let px = len.ceil();
    if !px.is_finite() || px < 0.0 || px >= u32::MAX as f32 {
        return Err(out_of_range());
    }
    (px as u32).checked_add(padding).ok_or_else(out_of_range)
}

/// Canvas size for `text`: line height + padding by string advance + padding.
/// Visual: the white sheet the string is about to be written on, a 2px margin on every side.
///
/// Refuses sizes past [`MAX_CANVAS_PIXELS`] before anything is allocated.
pub fn measure(
    face: &dyn Typeface,
    size: f32,
    text: &str,
    config: &RenderConfig,
) -> Result<GlyphMetrics, Error> {
    let line = face.line_metrics(size);
    let advance: f32 = text.chars().map(|ch| step(face, ch, size, config)).sum();
    let height = extent(line.line_height(), config.padding, "height")?;
    let width = extent(advance, config.padding, "width")?;

    let area = u64::from(width) * u64::from(height);
    if area > MAX_CANVAS_PIXELS {
        return Err(Error::InvalidConfiguration(format!(
            "a {width}x{height} canvas exceeds the limit of {MAX_CANVAS_PIXELS} pixels"
        )));
    }
    Ok(GlyphMetrics { ascent: line.ascent, height, width })
}

/* ---------- drawing ---------- */

/// Render `text` black-on-white. The result is not cropped; empty text gives a blank canvas.
/// Visual: black text on white paper with gray anti-aliased edges and a thin white margin.
pub fn render_text(
    face: &dyn Typeface,
    size: f32,
    text: &str,
    config: &RenderConfig,
) -> Result<Canvas, Error> {
    let metrics = measure(face, size, text, config)?;
    let half_pad = config.padding as f32 / 2.0;

    /* 1) Fresh canvas, cleared straight to white paper. */
    let mut canvas = Canvas::from_pixel(metrics.width, metrics.height, PAPER);

    /* 2) Walk the pen along the baseline, dropping each glyph mask at its spot. */
    let lut = match config.blend {
        BlendMode::Linear => Some(GammaLut::new()),
        BlendMode::Srgb => None,
    };
    let baseline = metrics.ascent + half_pad;
    let mut pen_x = half_pad;
    for ch in text.chars() {
        let x = if config.subpixel_positioning { pen_x } else { pen_x.round() };
        let y = if config.subpixel_positioning { baseline } else { baseline.round() };
        if let Some(mask) = face.rasterize(ch, size, (x.fract(), y.fract()), config.hinting) {
            let origin_x = x.floor() as i32 + mask.left;
            let origin_y = y.floor() as i32 - mask.top;
            draw_mask(&mut canvas, &mask, origin_x, origin_y, config, lut.as_ref());
        }
        pen_x += step(face, ch, size, config);
    }

    log::debug!(
        "rendered {:?} with {} at {size}px -> {}x{}",
        text,
        face.name(),
        canvas.width(),
        canvas.height()
    );
    Ok(canvas)
}

/// Composite a coverage mask onto the canvas in ink color.
/// Visual: full coverage paints solid black, partial coverage a gray; off-canvas pixels vanish.
fn draw_mask(
    canvas: &mut Canvas,
    mask: &GlyphMask,
    origin_x: i32,
    origin_y: i32,
    config: &RenderConfig,
    lut: Option<&GammaLut>,
) {
    let (w, h) = (canvas.width() as i32, canvas.height() as i32);
    let mut i = 0;
    for off_y in 0..mask.height as i32 {
        for off_x in 0..mask.width as i32 {
            let coverage = mask.coverage[i];
            i += 1;

            let (x, y) = (origin_x + off_x, origin_y + off_y);
            if x < 0 || y < 0 || x >= w || y >= h {
                continue;
            }
            let alpha = if config.antialias {
                coverage
            } else if coverage >= 128 {
                255
            } else {
                0
            };
            if alpha == 0 {
                continue;
            }

            let px = canvas.get_pixel_mut(x as u32, y as u32);
            match lut {
                Some(lut) => {
                    let a = alpha as f32 / 255.0;
                    for c in 0..3 {
                        px[c] = lut.mix(px[c], INK[c], a);
                    }
                }
                None => px.blend(&image::Rgba([INK[0], INK[1], INK[2], alpha])),
            }
        }
    }
}
