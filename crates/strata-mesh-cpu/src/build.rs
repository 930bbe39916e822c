use std::time::Instant;

use strata_chunk::DensityVolume;
use strata_world::{ChunkCoord, World};

use crate::{ChunkMeshCPU, ColliderMesh, MeshError, Shading, assemble, extract_chunk};

/// Extracts and assembles one chunk's render and collision meshes.
pub fn build_chunk_mesh_cpu(
    vol: &DensityVolume,
    world: &World,
    coord: ChunkCoord,
    iso: f32,
    shading: Shading,
    capacity: usize,
) -> Result<ChunkMeshCPU, MeshError> {
    let t0 = Instant::now();
    let raw = extract_chunk(vol, world, coord, iso, capacity)?;
    let mesh = assemble(&raw, shading);
    let collider = ColliderMesh::from_mesh(&mesh);
    log::trace!(
        "chunk {} meshed: {} tris, {} verts in {:?}",
        coord,
        mesh.triangle_count(),
        mesh.vertex_count(),
        t0.elapsed()
    );
    Ok(ChunkMeshCPU {
        coord,
        bbox: world.chunk_bounds(coord),
        mesh,
        collider,
    })
}
