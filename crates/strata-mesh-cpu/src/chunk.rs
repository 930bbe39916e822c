use strata_geom::{Aabb, Vec3};
use strata_world::ChunkCoord;

use crate::mesh_build::MeshBuild;

/// Position-only triangle soup for physics.
#[derive(Clone, Debug, Default)]
pub struct ColliderMesh {
    /// Tight bounds of the positions; `None` when the mesh is empty.
    pub bbox: Option<Aabb>,
    pub positions: Vec<Vec3>,
    pub triangles: Vec<[u32; 3]>,
}

impl ColliderMesh {
    pub fn from_mesh(mesh: &MeshBuild) -> Self {
        let positions: Vec<Vec3> = mesh
            .pos
            .chunks_exact(3)
            .map(|p| Vec3::new(p[0], p[1], p[2]))
            .collect();
        Self {
            bbox: Aabb::from_points(positions.iter().copied()),
            triangles: mesh.triangles().collect(),
            positions,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }
}

pub struct ChunkMeshCPU {
    pub coord: ChunkCoord,
    /// Chunk cube in world space.
    pub bbox: Aabb,
    pub mesh: MeshBuild,
    pub collider: ColliderMesh,
}
