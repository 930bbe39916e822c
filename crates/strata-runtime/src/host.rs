use strata_geom::Vec3;
use strata_mesh_cpu::ChunkMeshCPU;
use strata_world::{ChunkCoord, TerrainParams};

use crate::{EditReport, Terrain, TerrainError};

/// Slot for a terrain that may not exist yet. Every access before `initialize`
/// fails with `TerrainError::Uninitialized`.
#[derive(Default)]
pub struct TerrainHost {
    terrain: Option<Terrain>,
}

impl TerrainHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a terrain, replacing any previous one.
    pub fn initialize(&mut self, params: TerrainParams) -> Result<&mut Terrain, TerrainError> {
        let terrain = Terrain::initialize(params)?;
        Ok(self.terrain.insert(terrain))
    }

    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.terrain.is_some()
    }

    pub fn get(&self) -> Result<&Terrain, TerrainError> {
        self.terrain.as_ref().ok_or(TerrainError::Uninitialized)
    }

    pub fn get_mut(&mut self) -> Result<&mut Terrain, TerrainError> {
        self.terrain.as_mut().ok_or(TerrainError::Uninitialized)
    }

    pub fn terraform(&mut self, point: Vec3, weight: f32, radius: f32) -> Result<EditReport, TerrainError> {
        self.get_mut()?.terraform(point, weight, radius)
    }

    pub fn query_volume(&self, point: Vec3) -> Result<f32, TerrainError> {
        Ok(self.get()?.query_volume(point))
    }

    pub fn chunk_mesh(&self, coord: ChunkCoord) -> Result<Option<&ChunkMeshCPU>, TerrainError> {
        Ok(self.get()?.chunk_mesh(coord))
    }

    pub fn take(&mut self) -> Option<Terrain> {
        self.terrain.take()
    }
}
