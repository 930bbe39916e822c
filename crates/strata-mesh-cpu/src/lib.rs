//! CPU isosurface extraction and mesh assembly (marching cubes).
#![forbid(unsafe_code)]

mod assemble;
mod build;
mod chunk;
mod extract;
mod mesh_build;
pub mod tables;

pub use assemble::{Shading, assemble};
pub use build::build_chunk_mesh_cpu;
pub use chunk::{ChunkMeshCPU, ColliderMesh};
pub use extract::{EdgeId, RawVertex, extract_chunk, march_cell, max_triangles_for};
pub use mesh_build::MeshBuild;

use strata_world::ChunkCoord;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MeshError {
    #[error("chunk {coord} emitted {emitted} triangles, capacity is {capacity}")]
    CapacityExceeded {
        coord: ChunkCoord,
        emitted: usize,
        capacity: usize,
    },
}
