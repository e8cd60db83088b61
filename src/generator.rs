// The sample pipeline: validate -> render -> crop -> noise.
// Strictly sequential; any failing stage aborts the rest and nothing partial is kept.

use std::path::Path;

use image::ImageFormat;

use crate::config::GeneratorConfig;
use crate::crop::crop_to_ink;
use crate::error::Error;
use crate::features::FeatureExtractor;
use crate::noise::NoiseInjector;
use crate::render::render_text;
use crate::types::{Canvas, GenerationRequest};

/// File name used by [`SampleGenerator::save_generated_image`].
pub const DEFAULT_OUTPUT: &str = "Text.png";

pub struct SampleGenerator {
    config: GeneratorConfig,
    noise: NoiseInjector,
    image: Option<Canvas>, // last successful result only
}

impl SampleGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        let noise = NoiseInjector::new(&config.noise);
        Self { config, noise, image: None }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Run the whole pipeline for one request and keep the result.
    pub fn generate(&mut self, request: &GenerationRequest<'_>) -> Result<&Canvas, Error> {
        // A failed call must not leave the previous sample looking like its output.
        self.image = None;
        request.validate()?;
        log::debug!("generating {request:?}");

        let render = &self.config.render;
        let canvas = render_text(request.face, request.font_size, request.text, render)?;
        let cropped = crop_to_ink(&canvas, render.ink_threshold)?;
        let noisy = self.noise.apply(&cropped, request.noise);

        Ok(self.image.insert(noisy))
    }

    pub fn generated_image(&self) -> Option<&Canvas> {
        self.image.as_ref()
    }

    /// Hand the finished sample over to a consumer, e.g. for training data.
    pub fn take_generated_image(&mut self) -> Option<Canvas> {
        self.image.take()
    }

    /// Write the last sample to `Text.png` in the working directory.
    pub fn save_generated_image(&self) -> Result<(), Error> {
        self.save_to(DEFAULT_OUTPUT)
    }

    /// Write the last sample as PNG to `path`.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        let path = path.as_ref();
        let image = self.image.as_ref().ok_or(Error::NoImage)?;
        image
            .save_with_format(path, ImageFormat::Png)
            .map_err(|source| Error::Persistence { path: path.to_path_buf(), source })?;
        log::debug!("saved {}x{} sample to {}", image.width(), image.height(), path.display());
        Ok(())
    }

    pub fn extract_features(&self, extractor: &dyn FeatureExtractor) -> Result<Vec<f64>, Error> {
        let image = self.image.as_ref().ok_or(Error::NoImage)?;
        Ok(extractor.extract_features(image))
    }
}
