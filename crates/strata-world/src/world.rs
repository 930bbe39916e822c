use std::sync::Arc;

use fastnoise_lite::{FastNoiseLite, NoiseType};
use strata_geom::{Aabb, Vec3};

use crate::worldgen::TerrainParams;
use crate::{ChunkCoord, NoiseCtx};

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum FieldMode {
    /// Radial falloff plus ridged noise.
    Planet,
    /// Exact signed distance to a sphere of `radius` about the origin.
    Sphere { radius: f32 },
}

/// Sample grid and chunk layout for one terrain volume.
///
/// The sample grid spans `[-bounds/2, +bounds/2]` on every axis with
/// `samples_per_axis()` samples; chunk windows share their boundary samples.
#[derive(Debug)]
pub struct World {
    pub chunks_per_axis: usize,
    pub points_per_axis: usize,
    pub bounds_size: f32,
    pub mode: FieldMode,
    pub params: Arc<TerrainParams>,
}

impl World {
    pub fn new(params: TerrainParams) -> Self {
        Self {
            chunks_per_axis: params.chunks_per_axis,
            points_per_axis: params.points_per_axis,
            bounds_size: params.bounds_size,
            mode: params.mode,
            params: Arc::new(params),
        }
    }

    #[inline]
    pub fn samples_per_axis(&self) -> usize {
        self.chunks_per_axis * (self.points_per_axis - 1) + 1
    }

    #[inline]
    pub fn sample_count(&self) -> usize {
        let s = self.samples_per_axis();
        s * s * s
    }

    #[inline]
    pub fn cell_world_size(&self) -> f32 {
        self.bounds_size / (self.samples_per_axis() - 1) as f32
    }

    #[inline]
    pub fn iso_level(&self) -> f32 {
        self.params.iso_level
    }

    #[inline]
    pub fn grid_to_world(&self, x: usize, y: usize, z: usize) -> Vec3 {
        let denom = (self.samples_per_axis() - 1) as f32;
        let b = self.bounds_size;
        Vec3::new(
            (x as f32 / denom - 0.5) * b,
            (y as f32 / denom - 0.5) * b,
            (z as f32 / denom - 0.5) * b,
        )
    }

    /// Continuous grid coordinates of a world point; not clamped.
    #[inline]
    pub fn world_to_grid_f(&self, p: Vec3) -> Vec3 {
        let denom = (self.samples_per_axis() - 1) as f32;
        let b = self.bounds_size;
        Vec3::new(
            (p.x / b + 0.5) * denom,
            (p.y / b + 0.5) * denom,
            (p.z / b + 0.5) * denom,
        )
    }

    /// Nearest grid sample to a world point, clamped onto the grid.
    pub fn world_to_grid(&self, p: Vec3) -> [i32; 3] {
        let denom = (self.samples_per_axis() - 1) as f32;
        let b = self.bounds_size;
        let axis = |v: f32| (((v / b + 0.5).clamp(0.0, 1.0)) * denom).round() as i32;
        [axis(p.x), axis(p.y), axis(p.z)]
    }

    #[inline]
    pub fn chunk_size(&self) -> f32 {
        self.bounds_size / self.chunks_per_axis as f32
    }

    pub fn chunk_centre(&self, c: ChunkCoord) -> Vec3 {
        let size = self.chunk_size();
        let first = -((self.chunks_per_axis - 1) as f32) / 2.0;
        Vec3::new(
            (first + c.cx as f32) * size,
            (first + c.cy as f32) * size,
            (first + c.cz as f32) * size,
        )
    }

    #[inline]
    pub fn chunk_bounds(&self, c: ChunkCoord) -> Aabb {
        Aabb::cube(self.chunk_centre(c), self.chunk_size())
    }

    /// First grid sample owned by chunk `c`; neighbours share one sample layer.
    #[inline]
    pub fn chunk_sample_origin(&self, c: ChunkCoord) -> [usize; 3] {
        let step = self.points_per_axis - 1;
        [
            c.cx as usize * step,
            c.cy as usize * step,
            c.cz as usize * step,
        ]
    }

    #[inline]
    pub fn contains_chunk(&self, c: ChunkCoord) -> bool {
        c.in_grid(self.chunks_per_axis)
    }

    /// Every chunk coordinate, y outermost then x then z.
    pub fn chunk_coords(&self) -> Vec<ChunkCoord> {
        let n = self.chunks_per_axis as i32;
        let mut out = Vec::with_capacity(self.chunks_per_axis.pow(3));
        for y in 0..n {
            for x in 0..n {
                for z in 0..n {
                    out.push(ChunkCoord::new(x, y, z));
                }
            }
        }
        out
    }

    pub fn make_noise_ctx(&self) -> NoiseCtx {
        let mut noise = FastNoiseLite::with_seed(self.params.seed);
        noise.set_noise_type(Some(NoiseType::OpenSimplex2));
        noise.set_frequency(Some(1.0));
        let half = self.bounds_size / 2.0;
        NoiseCtx {
            noise,
            params: Arc::clone(&self.params),
            samples_per_axis: self.samples_per_axis(),
            max_dist: Vec3::splat(half).length(),
        }
    }
}
