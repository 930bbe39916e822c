use strata_geom::Vec3;
use strata_world::ChunkCoord;

#[derive(Clone, Debug, PartialEq)]
pub enum TerrainEvent {
    /// A chunk's render and collision meshes were replaced.
    ChunkRebuilt {
        coord: ChunkCoord,
        rev: u64,
        triangles: usize,
    },
    /// One terraform call finished; sent after its `ChunkRebuilt` events.
    TerrainModified {
        point: Vec3,
        radius: f32,
        chunks: usize,
    },
    /// Every chunk was rebuilt from freshly generated density.
    Regenerated { chunks: usize },
}
