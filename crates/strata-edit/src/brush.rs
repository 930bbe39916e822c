use rayon::prelude::*;
use strata_chunk::DensityVolume;
use strata_geom::smoothstep;

/// Spherical brush in grid units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Brush {
    pub centre: [i32; 3],
    pub radius: i32,
    /// Density added at the centre per application (`weight * dt`).
    pub strength: f32,
    /// Fraction of the radius where the falloff begins.
    pub falloff_start: f32,
}

/// `1` inside `start * radius`, easing to `0` at `radius`.
#[inline]
pub fn brush_falloff(dist: f32, radius: f32, start: f32) -> f32 {
    1.0 - smoothstep(start * radius, radius, dist)
}

/// Adds the brush to every sample within its radius, optionally clamping the result.
/// Returns the number of samples visited.
pub fn apply_brush(vol: &mut DensityVolume, brush: &Brush, clamp: Option<(f32, f32)>) -> usize {
    let size = vol.size() as i32;
    let r = brush.radius;
    if r <= 0 || size == 0 {
        return 0;
    }
    let [cx, cy, cz] = brush.centre;
    let (z0, z1) = ((cz - r).max(0), (cz + r).min(size - 1));
    let (y0, y1) = ((cy - r).max(0), (cy + r).min(size - 1));
    let (x0, x1) = ((cx - r).max(0), (cx + r).min(size - 1));
    if z0 > z1 || y0 > y1 || x0 > x1 {
        return 0;
    }
    let r_sq = r * r;
    let rf = r as f32;
    let slab = vol.slab_len();
    let row = vol.size();
    vol.data_mut()
        .par_chunks_mut(slab)
        .enumerate()
        .skip(z0 as usize)
        .take((z1 - z0 + 1) as usize)
        .map(|(z, plane)| {
            let dz = z as i32 - cz;
            let mut touched = 0usize;
            for y in y0..=y1 {
                let dy = y - cy;
                for x in x0..=x1 {
                    let dx = x - cx;
                    let sq = dx * dx + dy * dy + dz * dz;
                    if sq > r_sq {
                        continue;
                    }
                    let w = brush_falloff((sq as f32).sqrt(), rf, brush.falloff_start);
                    let v = &mut plane[y as usize * row + x as usize];
                    *v += brush.strength * w;
                    if let Some((lo, hi)) = clamp {
                        *v = v.clamp(lo, hi);
                    }
                    touched += 1;
                }
            }
            touched
        })
        .sum()
}
