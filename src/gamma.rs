// sRGB <-> linear-light lookup tables for gamma-correct ink compositing.
// Used by `BlendMode::Linear`; replaces per-pixel powf with two table lookups.

const LINEAR_STEPS: usize = 4096;

pub struct GammaLut {
    // sRGB(0..255) -> linear (0..1)
    to_linear: [f32; 256],
    // linear (0..1) quantized to 4096 steps -> sRGB(0..255)
    to_srgb: [u8; LINEAR_STEPS],
}

impl GammaLut {
    pub fn new() -> Self {
        let mut to_linear = [0.0f32; 256];
        for (v, slot) in to_linear.iter_mut().enumerate() {
            let c = v as f32 / 255.0;
            *slot = if c <= 0.04045 { c / 12.92 } else { ((c + 0.055) / 1.055).powf(2.4) };
        }

        let mut to_srgb = [0u8; LINEAR_STEPS];
        for (i, slot) in to_srgb.iter_mut().enumerate() {
            let l = i as f32 / (LINEAR_STEPS - 1) as f32;
            let s = if l <= 0.003_130_8 { 12.92 * l } else { 1.055 * l.powf(1.0 / 2.4) - 0.055 };
            *slot = (s * 255.0).round().clamp(0.0, 255.0) as u8;
        }

        Self { to_linear, to_srgb }
    }

    #[inline]
    pub fn to_linear(&self, v: u8) -> f32 {
        self.to_linear[v as usize]
    }

    #[inline]
    pub fn to_srgb(&self, l: f32) -> u8 {
        let idx = (l.clamp(0.0, 1.0) * (LINEAR_STEPS - 1) as f32).round() as usize;
        self.to_srgb[idx]
    }

    /// Mix `over` onto `under` with weight `alpha` in [0, 1], in linear light.
    #[inline]
    pub fn mix(&self, under: u8, over: u8, alpha: f32) -> u8 {
        let a = alpha.clamp(0.0, 1.0);
        self.to_srgb(self.to_linear(under) * (1.0 - a) + self.to_linear(over) * a)
    }
}

impl Default for GammaLut {
    fn default() -> Self {
        Self::new()
    }
}
