// Cropper: find the tight box around the ink and cut the canvas down to it.
//
// Four scans walk inward from each edge. Every scan is a bounded iterator over
// the canvas; a canvas without any ink is reported as `Error::EmptyGlyph`
// instead of scanning off the edge.

use image::{Pixel, Rgba, imageops};

use crate::error::Error;
use crate::types::Canvas;

/// Inclusive pixel box `[left, right] x [top, bottom]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InkBounds {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl InkBounds {
    pub fn width(&self) -> u32 {
        self.right - self.left + 1
    }

    pub fn height(&self) -> u32 {
        self.bottom - self.top + 1
    }
}

/* ---------- what counts as ink ---------- */

/// Ink = opaque enough and dark enough. `threshold` is the brightest luminance still counted.
/// Visual: with the default 127, black strokes and the darker half of their gray edges are ink;
/// the faint outer fringe and the white paper are not.
#[inline]
pub fn is_ink(px: &Rgba<u8>, threshold: u8) -> bool {
    px[3] >= 128 && px.to_luma()[0] <= threshold
}

/* ---------- scanning and cutting ---------- */

/// Locate the ink box, or `None` when the canvas holds no ink at all.
/// Visual: the smallest rectangle you could draw around the text without touching a stroke.
pub fn find_ink_bounds(canvas: &Canvas, threshold: u8) -> Option<InkBounds> {
    let (w, h) = canvas.dimensions();
    let ink_at = |x: u32, y: u32| is_ink(canvas.get_pixel(x, y), threshold);
    let row_has_ink = |y: u32, x0: u32, x1: u32| (x0..x1).any(|x| ink_at(x, y));
    let col_has_ink = |x: u32, y0: u32, y1: u32| (y0..y1).any(|y| ink_at(x, y));

    // top -> bottom; finding nothing here means there is no ink anywhere
    let top = (0..h).find(|&y| row_has_ink(y, 0, w))?;
    // bottom -> top, never past `top` (which is known to hold ink)
    let bottom = (top..h).rev().find(|&y| row_has_ink(y, 0, w)).unwrap_or(top);
    // left -> right / right -> left, only within the rows that matter
    let left = (0..w).find(|&x| col_has_ink(x, top, bottom + 1))?;
    let right = (left..w).rev().find(|&x| col_has_ink(x, top, bottom + 1)).unwrap_or(left);

    Some(InkBounds { left, top, right, bottom })
}

/// Return a new canvas holding exactly the ink box of `canvas`.
/// Visual: the margins are gone; every edge of the result touches ink.
pub fn crop_to_ink(canvas: &Canvas, threshold: u8) -> Result<Canvas, Error> {
    let bounds = find_ink_bounds(canvas, threshold).ok_or(Error::EmptyGlyph)?;
    log::debug!(
        "crop {}x{} -> {:?} ({}x{})",
        canvas.width(),
        canvas.height(),
        bounds,
        bounds.width(),
        bounds.height()
    );
    let view = imageops::crop_imm(canvas, bounds.left, bounds.top, bounds.width(), bounds.height());
    Ok(view.to_image())
}
