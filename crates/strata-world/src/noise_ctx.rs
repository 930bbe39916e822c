use std::sync::Arc;

use fastnoise_lite::FastNoiseLite;
use strata_geom::Vec3;

use crate::worldgen::TerrainParams;

/// Per-generation sampling state. Built by `World::make_noise_ctx`; shared read-only across workers.
pub struct NoiseCtx {
    pub noise: FastNoiseLite,
    pub params: Arc<TerrainParams>,
    pub samples_per_axis: usize,
    /// Distance from the origin to a grid corner.
    pub max_dist: f32,
}

impl NoiseCtx {
    /// Ridged fBm in `[0, 1]`: each octave folds OpenSimplex2 noise into `1 - |2n - 1|`.
    pub fn ridged_fbm(&self, p: Vec3) -> f32 {
        let fractal = &self.params.fractal;
        let mut amp = 1.0_f32;
        let mut freq = fractal.scale / 100.0;
        let mut sum = 0.0_f32;
        let mut max_amp = 0.0_f32;
        for _ in 0..fractal.octaves.max(1) {
            let n = self.noise.get_noise_3d(p.x * freq, p.y * freq, p.z * freq) * 0.5 + 0.5;
            let n = n.clamp(0.0, 1.0);
            sum += (1.0 - (2.0 * n - 1.0).abs()) * amp;
            max_amp += amp;
            amp *= fractal.persistence;
            freq *= fractal.lacunarity;
        }
        if max_amp > 0.0 { sum / max_amp } else { sum }
    }
}
