use strata_geom::Vec3;

use crate::NoiseCtx;
use crate::world::FieldMode;

/// Initial density of grid sample `(x, y, z)`. Reads nothing but the context,
/// so samples may be evaluated in any order.
pub fn density_at(ctx: &NoiseCtx, x: usize, y: usize, z: usize) -> f32 {
    let p = grid_point(ctx, x, y, z);
    match ctx.params.mode {
        FieldMode::Planet => {
            let shape = p.length() / (ctx.max_dist + 1.0) - 0.5;
            shape + (ctx.ridged_fbm(p) - 0.5) * ctx.params.height_multiplier
        }
        FieldMode::Sphere { radius } => p.length() - radius,
    }
}

#[inline]
fn grid_point(ctx: &NoiseCtx, x: usize, y: usize, z: usize) -> Vec3 {
    let denom = (ctx.samples_per_axis - 1) as f32;
    let b = ctx.params.bounds_size;
    Vec3::new(
        (x as f32 / denom - 0.5) * b,
        (y as f32 / denom - 0.5) * b,
        (z as f32 / denom - 0.5) * b,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{TerrainParams, World};

    fn world(mode: FieldMode) -> World {
        World::new(TerrainParams {
            chunks_per_axis: 2,
            points_per_axis: 5,
            bounds_size: 10.0,
            mode,
            ..TerrainParams::default()
        })
    }

    #[test]
    fn sphere_is_signed_distance() {
        let w = world(FieldMode::Sphere { radius: 3.0 });
        let ctx = w.make_noise_ctx();
        // S = 9, spacing 1.25; sample 4 is the origin
        assert_eq!(density_at(&ctx, 4, 4, 4), -3.0);
        assert_eq!(density_at(&ctx, 8, 4, 4), 2.0);
    }

    #[test]
    fn planet_is_deterministic_per_seed() {
        let w = world(FieldMode::Planet);
        let a = w.make_noise_ctx();
        let b = w.make_noise_ctx();
        for (x, y, z) in [(0, 0, 0), (3, 5, 7), (8, 8, 8)] {
            assert_eq!(density_at(&a, x, y, z), density_at(&b, x, y, z));
        }
    }

    #[test]
    fn planet_core_is_solid_and_corners_are_air() {
        let w = World::new(TerrainParams {
            chunks_per_axis: 2,
            points_per_axis: 5,
            bounds_size: 10.0,
            height_multiplier: 0.2,
            ..TerrainParams::default()
        });
        let ctx = w.make_noise_ctx();
        let iso = w.iso_level();
        assert!(density_at(&ctx, 4, 4, 4) < iso);
        assert!(density_at(&ctx, 0, 0, 0) >= iso);
        assert!(density_at(&ctx, 8, 8, 8) >= iso);
    }

    #[test]
    fn ridged_fbm_is_normalised() {
        let w = world(FieldMode::Planet);
        let ctx = w.make_noise_ctx();
        for i in 0..64 {
            let t = i as f32 * 0.37;
            let v = ctx.ridged_fbm(Vec3::new(t, -t * 0.5, t * 1.3));
            assert!((0.0..=1.0).contains(&v), "{v}");
        }
    }
}
