use rayon::prelude::*;

use crate::{DensityVolume, GridRegion};

/// Box-blurs `src` into `dst` over `region`. Each written sample is the mean of the
/// `(2r + 1)^3` neighbourhood in `src`, with taps clamped onto the grid. Samples of
/// `dst` outside `region` are left untouched.
pub fn smooth_region(src: &DensityVolume, dst: &mut DensityVolume, region: GridRegion, radius: i32) {
    debug_assert_eq!(src.size(), dst.size());
    let size = src.size();
    let region = region.clamp_to(size);
    if region.is_empty() {
        return;
    }
    let r = radius.max(0);
    let taps = ((2 * r + 1) as f32).powi(3);
    let slab = dst.slab_len();
    let [x0, y0, z0] = region.min;
    let [x1, y1, z1] = region.max;
    dst.data_mut()
        .par_chunks_mut(slab)
        .enumerate()
        .filter(|(z, _)| (z0..z1).contains(&(*z as i32)))
        .for_each(|(z, plane)| {
            let z = z as i32;
            for y in y0..y1 {
                for x in x0..x1 {
                    let out = &mut plane[y as usize * size + x as usize];
                    if r == 0 {
                        *out = src.get(x as usize, y as usize, z as usize);
                        continue;
                    }
                    let mut sum = 0.0_f32;
                    for dz in -r..=r {
                        for dy in -r..=r {
                            for dx in -r..=r {
                                sum += src.get_clamped(x + dx, y + dy, z + dz);
                            }
                        }
                    }
                    *out = sum / taps;
                }
            }
        });
}
