// Built-in 5x7 pixel font, usable at any size.
// Each font "cell" is scaled to size/8 pixels and rasterized by exact area coverage,
// so fractional sizes and sub-pixel pen positions come out anti-aliased.
// Needs no font file, which keeps the CLI default and the tests self-contained.

use crate::font::Typeface;
use crate::types::{GlyphMask, LineMetrics};

const GLYPH_COLS: usize = 5;
const GLYPH_ROWS: usize = 7;
const EM_CELLS: f32 = 8.0; // 7 rows above the baseline + 1 below
const ADVANCE_CELLS: f32 = 6.0; // 5 columns glyph + 1 column spacing

/// Drawn for characters the table does not know (the usual "tofu" box).
const NOTDEF: [u8; 7] = [0b11111, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11111];

/// Return the 5x7 bitmap for a character.
/// Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
/// Lowercase letters fold to uppercase; whitespace is blank.
fn glyph5x7(ch: char) -> [u8; 7] {
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        [$a,$b,$c,$d,$e,$f,$g]
    }; }

    if ch.is_whitespace() {
        return [0; 7];
    }

    match ch.to_ascii_uppercase() {
        // Digits 0..9
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        // Letters A..Z
        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'B' => g!(0b11110,0b10001,0b10001,0b11110,0b10001,0b10001,0b11110),
        'C' => g!(0b01110,0b10001,0b10000,0b10000,0b10000,0b10001,0b01110),
        'D' => g!(0b11100,0b10010,0b10001,0b10001,0b10001,0b10010,0b11100),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'F' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b10000),
        'G' => g!(0b01110,0b10001,0b10000,0b10111,0b10001,0b10001,0b01111),
        'H' => g!(0b10001,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'I' => g!(0b01110,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'J' => g!(0b00111,0b00010,0b00010,0b00010,0b00010,0b10010,0b01100),
        'K' => g!(0b10001,0b10010,0b10100,0b11000,0b10100,0b10010,0b10001),
        'L' => g!(0b10000,0b10000,0b10000,0b10000,0b10000,0b10000,0b11111),
        'M' => g!(0b10001,0b11011,0b10101,0b10101,0b10001,0b10001,0b10001),
        'N' => g!(0b10001,0b10001,0b11001,0b10101,0b10011,0b10001,0b10001),
        'O' => g!(0b01110,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'P' => g!(0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000),
        'Q' => g!(0b01110,0b10001,0b10001,0b10001,0b10101,0b10010,0b01101),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'T' => g!(0b11111,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        'U' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'V' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b01010,0b00100),
        'W' => g!(0b10001,0b10001,0b10001,0b10101,0b10101,0b10101,0b01010),
        'X' => g!(0b10001,0b10001,0b01010,0b00100,0b01010,0b10001,0b10001),
        'Y' => g!(0b10001,0b10001,0b01010,0b00100,0b00100,0b00100,0b00100),
        'Z' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b10000,0b11111),

        // Punctuation
        '|' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b00000),
        ',' => g!(0b00000,0b00000,0b00000,0b00000,0b00110,0b00100,0b01000),
        '!' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00000,0b00100),
        '?' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b00000,0b00100),
        '-' => g!(0b00000,0b00000,0b00000,0b11111,0b00000,0b00000,0b00000),
        '+' => g!(0b00000,0b00100,0b00100,0b11111,0b00100,0b00100,0b00000),
        '=' => g!(0b00000,0b00000,0b11111,0b00000,0b11111,0b00000,0b00000),
        '/' => g!(0b00000,0b00001,0b00010,0b00100,0b01000,0b10000,0b00000),
        '(' => g!(0b00010,0b00100,0b01000,0b01000,0b01000,0b00100,0b00010),
        ')' => g!(0b01000,0b00100,0b00010,0b00010,0b00010,0b00100,0b01000),
        '\'' => g!(0b00100,0b00100,0b01000,0b00000,0b00000,0b00000,0b00000),

        _ => NOTDEF,
    }
}

/// Length of the overlap between [a0, a1) and [b0, b1).
#[inline]
fn overlap(a0: f32, a1: f32, b0: f32, b1: f32) -> f32 {
    (a1.min(b1) - a0.max(b0)).max(0.0)
}

#[derive(Clone, Copy, Debug, Default)]
pub struct BitmapFace;

impl BitmapFace {
    pub fn new() -> Self {
        Self
    }

    /// Width/height in pixels of one font cell at `size`.
    fn cell(size: f32) -> f32 {
        size / EM_CELLS
    }
}

impl Typeface for BitmapFace {
    fn name(&self) -> &str {
        "builtin-5x7"
    }

    fn line_metrics(&self, size: f32) -> LineMetrics {
        let cell = Self::cell(size);
        LineMetrics {
            ascent: GLYPH_ROWS as f32 * cell,
            descent: (EM_CELLS - GLYPH_ROWS as f32) * cell,
            leading: 0.0,
        }
    }

    fn advance(&self, _ch: char, size: f32) -> f32 {
        ADVANCE_CELLS * Self::cell(size)
    }

    fn rasterize(&self, ch: char, size: f32, offset: (f32, f32), _hint: bool) -> Option<GlyphMask> {
        let rows = glyph5x7(ch);
        if rows.iter().all(|&r| r == 0) {
            return None;
        }

        let cell = Self::cell(size);
        let (ox, oy) = offset;

        // Glyph box in pen-relative pixel space (y grows down, baseline at y = oy).
        let x0 = ox;
        let y0 = oy - GLYPH_ROWS as f32 * cell;
        let px_left = x0.floor() as i32;
        let px_top = y0.floor() as i32;
        let px_right = (x0 + GLYPH_COLS as f32 * cell).ceil() as i32;
        let px_bottom = oy.ceil() as i32;
        let width = (px_right - px_left).max(0) as usize;
        let height = (px_bottom - px_top).max(0) as usize;

        // Accumulate the area each lit cell covers in every pixel it touches.
        let mut acc = vec![0.0_f32; width * height];
        for (ry, &rowbits) in rows.iter().enumerate() {
            for rx in 0..GLYPH_COLS {
                if (rowbits >> (GLYPH_COLS - 1 - rx)) & 1 == 0 {
                    continue;
                }
                let cx0 = x0 + rx as f32 * cell;
                let cx1 = cx0 + cell;
                let cy0 = y0 + ry as f32 * cell;
                let cy1 = cy0 + cell;

                let ys = (cy0.floor() as i32).max(px_top)..(cy1.ceil() as i32).min(px_bottom);
                for py in ys {
                    let dy = overlap(cy0, cy1, py as f32, py as f32 + 1.0);
                    if dy <= 0.0 {
                        continue;
                    }
                    let row = (py - px_top) as usize * width;
                    let xs = (cx0.floor() as i32).max(px_left)..(cx1.ceil() as i32).min(px_right);
                    for px in xs {
                        let dx = overlap(cx0, cx1, px as f32, px as f32 + 1.0);
                        acc[row + (px - px_left) as usize] += dx * dy;
                    }
                }
            }
        }

        let coverage = acc
            .into_iter()
            .map(|a| (a.min(1.0) * 255.0).round() as u8)
            .collect();

        Some(GlyphMask {
            left: px_left,
            top: -px_top,
            width: width as u32,
            height: height as u32,
            coverage,
        })
    }
}
