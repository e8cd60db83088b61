// End-to-end checks of render -> crop -> noise, mostly with the built-in face.
// `fonts/DejaVuSansMono.ttf` covers the outline path (license next to it).

use glyph_sampler::{
    BitmapFace, Canvas, Error, GenerationRequest, GeneratorConfig, NoiseConfig, OutlineFace,
    RenderConfig, SampleGenerator, crop_to_ink, is_ink, render_text,
};

const MONO: &[u8] = include_bytes!("fonts/DejaVuSansMono.ttf");

fn generator(seed: u64) -> SampleGenerator {
    SampleGenerator::new(GeneratorConfig {
        noise: NoiseConfig { seed: Some(seed), include_alpha: true },
        ..GeneratorConfig::default()
    })
}

fn is_tight(c: &Canvas, threshold: u8) -> bool {
    let (w, h) = c.dimensions();
    let row = |y| (0..w).any(|x| is_ink(c.get_pixel(x, y), threshold));
    let col = |x| (0..h).any(|y| is_ink(c.get_pixel(x, y), threshold));
    row(0) && row(h - 1) && col(0) && col(w - 1)
}

#[test]
fn single_letter_clean_sample() {
    let face = BitmapFace::new();
    let mut generator = generator(1);
    let image = generator.generate(&GenerationRequest::new(&face, 40.0, "A", 0.0)).unwrap();

    let (w, h) = image.dimensions();
    assert!((20..=40).contains(&w) && (20..=40).contains(&h), "{w}x{h}");
    assert!(is_tight(image, RenderConfig::default().ink_threshold));
    // Background inside the box stays opaque white; no transparent bleed.
    assert!(image.pixels().all(|p| p[3] == 255));
}

#[test]
fn noisy_sample_keeps_the_clean_geometry() {
    let face = BitmapFace::new();
    let request = |noise| GenerationRequest::new(&face, 40.0, "AB", noise);
    let clean = generator(1).generate(&request(0.0)).unwrap().clone();
    let noisy = generator(2).generate(&request(5.0)).unwrap().clone();
    assert_eq!(clean.dimensions(), noisy.dimensions());

    let diffs: Vec<f64> = clean
        .pixels()
        .zip(noisy.pixels())
        .flat_map(|(a, b)| (0..4).map(move |c| b[c] as f64 - a[c] as f64))
        .collect();
    let n = diffs.len() as f64;
    let mean = diffs.iter().sum::<f64>() / n;
    let var = diffs.iter().map(|d| (d - mean).powi(2)).sum::<f64>() / n;
    // Pure black / white pixels clip half the distribution, so the spread sits below 25.
    assert!(var > 1.0 && var < 30.0, "variance {var}");
}

#[test]
fn cropping_twice_changes_nothing() {
    let face = BitmapFace::new();
    let config = RenderConfig::default();
    for (text, size) in [("Hello", 17.0), ("A-1", 23.5), ("W", 64.0)] {
        let canvas = render_text(&face, size, text, &config).unwrap();
        let once = crop_to_ink(&canvas, config.ink_threshold).unwrap();
        let twice = crop_to_ink(&once, config.ink_threshold).unwrap();
        assert_eq!(once, twice, "{text} at {size}");
        assert!(is_tight(&once, config.ink_threshold), "{text} at {size}");
    }
}

#[test]
fn empty_and_blank_text_report_empty_glyph() {
    let face = BitmapFace::new();
    let mut generator = generator(3);
    for text in ["", " ", "\t  "] {
        let err = generator.generate(&GenerationRequest::new(&face, 30.0, text, 2.0)).unwrap_err();
        assert!(matches!(err, Error::EmptyGlyph), "{text:?}");
    }
}

#[test]
fn huge_noise_saturates_instead_of_wrapping() {
    let face = BitmapFace::new();
    let mut generator = generator(4);
    let clean = generator.generate(&GenerationRequest::new(&face, 20.0, "OK", 0.0)).unwrap();
    let clean_dims = clean.dimensions();

    let noisy = generator.generate(&GenerationRequest::new(&face, 20.0, "OK", 1.0e4)).unwrap();
    assert_eq!(noisy.dimensions(), clean_dims);

    // |N(0, 1e4)| < 255 has a chance of about 2 %, so nearly every channel is clipped.
    let values: Vec<u8> = noisy.pixels().flat_map(|p| p.0).collect();
    let zeros = values.iter().filter(|&&v| v == 0).count();
    let fulls = values.iter().filter(|&&v| v == 255).count();
    assert!(zeros > 0 && fulls > 0);
    // Wrapping would spread values across the whole range instead.
    let saturated = (zeros + fulls) as f64 / values.len() as f64;
    assert!(saturated > 0.9, "only {saturated} saturated");
}

#[test]
fn moderate_noise_keeps_the_clean_crop() {
    let face = BitmapFace::new();
    let mut generator = generator(8);
    let clean = generator.generate(&GenerationRequest::new(&face, 20.0, "OK", 0.0)).unwrap();
    let clean_dims = clean.dimensions();
    for sigma in [0.5, 50.0] {
        let noisy = generator.generate(&GenerationRequest::new(&face, 20.0, "OK", sigma)).unwrap();
        assert_eq!(noisy.dimensions(), clean_dims, "sigma {sigma}");
    }
}

#[test]
fn outline_capital_is_cropped_tight() {
    let face = OutlineFace::from_bytes(MONO.to_vec(), 0).unwrap();
    let config = RenderConfig::default();
    let canvas = render_text(&face, 40.0, "A", &config).unwrap();
    // 1901 + 483 units of line at 40/2048 px each, 1233 units of advance; 2px margins.
    assert_eq!(canvas.dimensions(), (29, 51));

    let cropped = crop_to_ink(&canvas, config.ink_threshold).unwrap();
    let (w, h) = cropped.dimensions();
    // The outline box is 22.6 x 29.2 px; edges under half coverage fall outside the crop.
    assert!((21..=24).contains(&w) && (28..=30).contains(&h), "{w}x{h}");
    assert!(is_tight(&cropped, config.ink_threshold));

    // A lighter threshold also keeps the faint fringe, so the box can only grow.
    let wide = crop_to_ink(&canvas, 250).unwrap();
    assert!(wide.width() >= w && wide.height() >= h);
}

#[test]
fn seeded_generators_agree() {
    let face = BitmapFace::new();
    let request = GenerationRequest::new(&face, 28.0, "Q7", 8.0);
    let a = generator(77).generate(&request).unwrap().clone();
    let b = generator(77).generate(&request).unwrap().clone();
    assert_eq!(a, b);
}

#[test]
fn saves_png_and_reports_bad_paths() {
    let face = BitmapFace::new();
    let mut generator = generator(5);
    let request = GenerationRequest::new(&face, 24.0, "Z", 3.0);
    let (w, h) = generator.generate(&request).unwrap().dimensions();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sample.png");
    generator.save_to(&path).unwrap();
    let reloaded = image::open(&path).unwrap().to_rgba8();
    assert_eq!(reloaded.dimensions(), (w, h));
    assert_eq!(&reloaded, generator.generated_image().unwrap());

    let err = generator.save_to(dir.path().join("missing").join("sample.png")).unwrap_err();
    assert!(matches!(err, Error::Persistence { .. }));
}

#[test]
fn finished_canvas_is_handed_to_feature_extractors() {
    let face = BitmapFace::new();
    let mut generator = generator(6);
    generator.generate(&GenerationRequest::new(&face, 32.0, "L", 0.0)).unwrap();

    let threshold = generator.config().render.ink_threshold;
    let ink_ratio = move |c: &Canvas| {
        let ink = c.pixels().filter(|p| is_ink(p, threshold)).count();
        vec![ink as f64 / (c.width() * c.height()) as f64, c.width() as f64, c.height() as f64]
    };
    let features = generator.extract_features(&ink_ratio).unwrap();
    // 'L' at 32px: a 4px cell, 20x28 box; 11 of 35 cells lit.
    assert_eq!(features[1..], [20.0, 28.0]);
    assert!((features[0] - 11.0 / 35.0).abs() < 1e-9);
}
