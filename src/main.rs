// Command line front end for the sample generator.
// • `render`  : one string -> one noisy, cropped PNG (default `Text.png`).
// • `dataset` : every label x size x noise level x repetition -> a folder of PNGs.
// Logging goes through env_logger; try RUST_LOG=debug to see every pipeline stage.

use std::error::Error as StdError;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use glyph_sampler::{
    BitmapFace, BlendMode, DEFAULT_OUTPUT, Error, GenerationRequest, GeneratorConfig, NoiseConfig,
    OutlineFace, RenderConfig, SampleGenerator, Typeface,
};
use log::{info, warn};

#[derive(Debug, Parser)]
#[command(author, version, about = "Render noisy, tightly cropped glyph images for OCR training")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate a single sample.
    Render {
        /// Text to draw.
        #[arg(long)]
        text: String,
        /// Font size in pixels per em.
        #[arg(long, default_value_t = 40.0)]
        size: f32,
        /// Noise standard deviation (0 = clean).
        #[arg(long, default_value_t = 0.0)]
        noise: f64,
        /// Output PNG path.
        #[arg(long, default_value = DEFAULT_OUTPUT)]
        output: PathBuf,
        #[command(flatten)]
        opts: SharedArgs,
    },
    /// Generate a labeled folder of samples.
    Dataset {
        /// Characters to generate; each one is a label.
        #[arg(long)]
        labels: String,
        /// Output directory (created if missing).
        #[arg(long)]
        out: PathBuf,
        /// Font sizes, comma separated.
        #[arg(long, value_delimiter = ',', default_value = "24,40")]
        sizes: Vec<f32>,
        /// Noise levels, comma separated.
        #[arg(long, value_delimiter = ',', default_value = "0,5")]
        noise_levels: Vec<f64>,
        /// Samples per (label, size, noise) combination.
        #[arg(long, default_value_t = 1)]
        count: usize,
        #[command(flatten)]
        opts: SharedArgs,
    },
}

/// Face, rendering and noise options common to both commands.
#[derive(Debug, Args)]
struct SharedArgs {
    /// TrueType/OpenType font file; the built-in 5x7 face is used when omitted.
    #[arg(long)]
    font: Option<PathBuf>,
    /// Face index inside a font collection.
    #[arg(long, default_value_t = 0)]
    font_index: usize,
    /// Seed for reproducible noise.
    #[arg(long)]
    seed: Option<u64>,
    /// Brightest luminance (0-255) still counted as ink when cropping.
    #[arg(long, default_value_t = 127)]
    ink_threshold: u8,
    /// Disable anti-aliasing.
    #[arg(long)]
    no_antialias: bool,
    /// Snap glyphs to whole pixels.
    #[arg(long)]
    no_subpixel: bool,
    /// Enable outline hinting.
    #[arg(long)]
    hinting: bool,
    /// Composite ink in linear light.
    #[arg(long)]
    linear_blend: bool,
    /// Leave the alpha channel out of the noise.
    #[arg(long)]
    opaque: bool,
}

impl SharedArgs {
    fn config(&self) -> GeneratorConfig {
        GeneratorConfig {
            render: RenderConfig {
                antialias: !self.no_antialias,
                subpixel_positioning: !self.no_subpixel,
                hinting: self.hinting,
                blend: if self.linear_blend { BlendMode::Linear } else { BlendMode::Srgb },
                ink_threshold: self.ink_threshold,
                ..RenderConfig::default()
            },
            noise: NoiseConfig { seed: self.seed, include_alpha: !self.opaque },
        }
    }

    fn face(&self) -> Result<Box<dyn Typeface>, Box<dyn StdError>> {
        match &self.font {
            Some(path) => {
                let data = fs::read(path).map_err(|e| format!("reading {}: {e}", path.display()))?;
                Ok(Box::new(OutlineFace::from_bytes(data, self.font_index)?))
            }
            None => Ok(Box::new(BitmapFace::new())),
        }
    }
}

fn main() {
    env_logger::init();
    if let Err(err) = try_main() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn try_main() -> Result<(), Box<dyn StdError>> {
    match Cli::parse().command {
        Command::Render { text, size, noise, output, opts } => {
            let face = opts.face()?;
            let mut generator = SampleGenerator::new(opts.config());
            let request = GenerationRequest::new(face.as_ref(), size, &text, noise);
            let image = generator.generate(&request)?;
            let (w, h) = image.dimensions();
            generator.save_to(&output)?;
            info!("wrote {w}x{h} sample to {}", output.display());
        }
        Command::Dataset { labels, out, sizes, noise_levels, count, opts } => {
            let face = opts.face()?;
            let mut generator = SampleGenerator::new(opts.config());
            fs::create_dir_all(&out)?;
            let face = face.as_ref();
            let written =
                write_dataset(&mut generator, face, &labels, &sizes, &noise_levels, count, &out)?;
            info!("wrote {written} samples to {}", out.display());
        }
    }
    Ok(())
}

/// One PNG per (label, size, noise, repetition): `<codepoint>_s<size>_n<noise>_<i>.png`.
/// Labels without any ink (spaces etc.) are skipped.
fn write_dataset(
    generator: &mut SampleGenerator,
    face: &dyn Typeface,
    labels: &str,
    sizes: &[f32],
    noise_levels: &[f64],
    count: usize,
    out: &Path,
) -> Result<usize, Error> {
    let mut written = 0;
    'label: for label in labels.chars() {
        let text = label.to_string();
        for &size in sizes {
            for &noise in noise_levels {
                for i in 0..count {
                    match generator.generate(&GenerationRequest::new(face, size, &text, noise)) {
                        Ok(_) => {}
                        Err(Error::EmptyGlyph) => {
                            warn!("label {label:?} has no ink, skipping");
                            continue 'label;
                        }
                        Err(e) => return Err(e),
                    }
                    let name = format!("{:04x}_s{size}_n{noise}_{i:03}.png", label as u32);
                    generator.save_to(out.join(name))?;
                    written += 1;
                }
            }
        }
    }
    Ok(written)
}
