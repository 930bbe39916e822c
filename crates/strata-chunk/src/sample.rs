use strata_geom::{Vec3, lerp};
use strata_world::World;

use crate::DensityVolume;

/// Trilinear density at world point `p`; points outside the bounds read the nearest border.
pub fn sample_world(vol: &DensityVolume, world: &World, p: Vec3) -> f32 {
    let hi = (vol.size() - 1) as f32;
    let g = world.world_to_grid_f(p);
    let g = Vec3::new(g.x.clamp(0.0, hi), g.y.clamp(0.0, hi), g.z.clamp(0.0, hi));
    let last = vol.size().saturating_sub(2);
    let (x0, y0, z0) = (
        (g.x.floor() as usize).min(last),
        (g.y.floor() as usize).min(last),
        (g.z.floor() as usize).min(last),
    );
    let (tx, ty, tz) = (g.x - x0 as f32, g.y - y0 as f32, g.z - z0 as f32);
    let c = |dx: usize, dy: usize, dz: usize| vol.get(x0 + dx, y0 + dy, z0 + dz);
    let x00 = lerp(c(0, 0, 0), c(1, 0, 0), tx);
    let x10 = lerp(c(0, 1, 0), c(1, 1, 0), tx);
    let x01 = lerp(c(0, 0, 1), c(1, 0, 1), tx);
    let x11 = lerp(c(0, 1, 1), c(1, 1, 1), tx);
    lerp(lerp(x00, x10, ty), lerp(x01, x11, ty), tz)
}
