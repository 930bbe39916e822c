//! Density volume storage, generation, smoothing, and sampling.
#![forbid(unsafe_code)]

mod blur;
mod generate;
mod maps;
mod region;
mod sample;

pub use blur::smooth_region;
pub use generate::generate_volume;
pub use maps::DensityMaps;
pub use region::GridRegion;
pub use sample::sample_world;

/// Flat `S × S × S` scalar grid. Index is `(z * S + y) * S + x`, so each z-slab is contiguous.
#[derive(Clone, Debug, PartialEq)]
pub struct DensityVolume {
    size: usize,
    data: Vec<f32>,
}

impl DensityVolume {
    pub fn new(size: usize) -> Self {
        Self::filled(size, 0.0)
    }

    pub fn filled(size: usize, value: f32) -> Self {
        Self {
            size,
            data: vec![value; size * size * size],
        }
    }

    /// Builds a volume by evaluating `f(x, y, z)` at every sample.
    pub fn from_fn(size: usize, mut f: impl FnMut(usize, usize, usize) -> f32) -> Self {
        let mut data = Vec::with_capacity(size * size * size);
        for z in 0..size {
            for y in 0..size {
                for x in 0..size {
                    data.push(f(x, y, z));
                }
            }
        }
        Self { size, data }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn slab_len(&self) -> usize {
        self.size * self.size
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize, z: usize) -> usize {
        (z * self.size + y) * self.size + x
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize, z: usize) -> f32 {
        self.data[self.idx(x, y, z)]
    }

    /// Reads with every coordinate clamped onto the grid.
    #[inline]
    pub fn get_clamped(&self, x: i32, y: i32, z: i32) -> f32 {
        let hi = self.size as i32 - 1;
        self.get(
            x.clamp(0, hi) as usize,
            y.clamp(0, hi) as usize,
            z.clamp(0, hi) as usize,
        )
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, z: usize, v: f32) {
        let i = self.idx(x, y, z);
        self.data[i] = v;
    }

    #[inline]
    pub fn contains(&self, x: i32, y: i32, z: i32) -> bool {
        let s = self.size as i32;
        x >= 0 && y >= 0 && z >= 0 && x < s && y < s && z < s
    }

    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    #[inline]
    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }
}
