//! Synthetic glyph samples for OCR / feature-extraction experiments.
//!
//! A string is rendered black-on-white, cropped to the tight box around its ink
//! and then jittered with independent per-channel Gaussian noise:
//!
//! ```no_run
//! use glyph_sampler::{BitmapFace, GenerationRequest, GeneratorConfig, SampleGenerator};
//!
//! let face = BitmapFace::new();
//! let mut generator = SampleGenerator::new(GeneratorConfig::default());
//! generator.generate(&GenerationRequest::new(&face, 40.0, "AB", 5.0))?;
//! generator.save_generated_image()?;
//! # Ok::<(), glyph_sampler::Error>(())
//! ```

pub mod bitmap_font;
pub mod config;
pub mod crop;
pub mod error;
pub mod features;
pub mod font;
pub mod gamma;
pub mod generator;
pub mod noise;
pub mod outline_font;
pub mod render;
pub mod types;

pub use bitmap_font::BitmapFace;
pub use config::{BlendMode, GeneratorConfig, NoiseConfig, RenderConfig};
pub use crop::{InkBounds, crop_to_ink, find_ink_bounds, is_ink};
pub use error::Error;
pub use features::FeatureExtractor;
pub use font::Typeface;
pub use generator::{DEFAULT_OUTPUT, SampleGenerator};
pub use noise::{NoiseInjector, add_gaussian_noise};
pub use outline_font::OutlineFace;
pub use render::{measure, render_text};
pub use types::{
    Canvas, GenerationRequest, GlyphMask, GlyphMetrics, LineMetrics, MAX_CANVAS_PIXELS,
    MAX_FONT_SIZE,
};
