// Rendering and noise settings. Built once, passed down by reference, never mutated
// by the pipeline.

/// How ink coverage is composited onto the white paper.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum BlendMode {
    /// Plain alpha blend on the stored sRGB values.
    #[default]
    Srgb,
    /// Blend in linear light (gamma-correct); anti-aliased edges come out lighter.
    Linear,
}

/// Rendering quality knobs for the glyph renderer and the ink test of the cropper.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderConfig {
    pub antialias: bool,            // false = coverage thresholded to 0 / 255
    pub subpixel_positioning: bool, // false = pen snapped to whole pixels
    pub hinting: bool,              // outline faces only
    pub blend: BlendMode,
    pub ink_threshold: u8, // luminance at or below this counts as ink
    pub padding: u32,      // total margin added to each measured dimension
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            antialias: true,
            subpixel_positioning: true,
            hinting: false,
            blend: BlendMode::Srgb,
            ink_threshold: 127,
            padding: 4,
        }
    }
}

/// Random source and channel selection for the noise injector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NoiseConfig {
    /// `Some` = reproducible noise; `None` = seeded from OS entropy.
    pub seed: Option<u64>,
    /// Perturb the alpha channel as well as R, G, B.
    pub include_alpha: bool,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self { seed: None, include_alpha: true }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GeneratorConfig {
    pub render: RenderConfig,
    pub noise: NoiseConfig,
}
