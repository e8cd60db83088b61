// One error type for the whole sample pipeline.
// Every variant states *where* things went wrong.
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Request rejected before rendering (font size, noise intensity).
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The rendered canvas has no ink pixel to crop around (empty / whitespace text).
    #[error("rendered text contains no ink pixels")]
    EmptyGlyph,

    /// Typeface bytes could not be parsed.
    #[error("font load error: {0}")]
    FontLoad(String),

    /// Writing the PNG to disk failed.
    #[error("could not save image to {}: {source}", path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Save / extract called before any successful generation.
    #[error("no image has been generated yet")]
    NoImage,
}
