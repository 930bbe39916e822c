use rayon::prelude::*;
use strata_world::{World, density_at};

use crate::DensityVolume;

/// Fills a fresh volume from the world's density function, one z-slab per task.
pub fn generate_volume(world: &World) -> DensityVolume {
    let size = world.samples_per_axis();
    let ctx = world.make_noise_ctx();
    let mut vol = DensityVolume::new(size);
    let slab = vol.slab_len();
    vol.data_mut()
        .par_chunks_mut(slab)
        .enumerate()
        .for_each(|(z, plane)| {
            for y in 0..size {
                let row = &mut plane[y * size..(y + 1) * size];
                for (x, v) in row.iter_mut().enumerate() {
                    *v = density_at(&ctx, x, y, z);
                }
            }
        });
    log::debug!("generated {}^3 density samples", size);
    vol
}
