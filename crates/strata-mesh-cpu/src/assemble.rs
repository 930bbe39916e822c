use hashbrown::HashMap;

use crate::{EdgeId, MeshBuild, RawVertex};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Shading {
    /// Vertices shared by edge id; each keeps the first normal seen.
    #[default]
    Smooth,
    /// Every triangle gets its own vertices and face normal.
    Flat,
}

impl Shading {
    #[inline]
    pub fn from_flat(flat: bool) -> Self {
        if flat { Shading::Flat } else { Shading::Smooth }
    }
}

/// Turns a raw triangle stream into an indexed mesh. The index buffer always has
/// one entry per raw vertex.
pub fn assemble(raw: &[RawVertex], shading: Shading) -> MeshBuild {
    let mut mesh = MeshBuild::default();
    match shading {
        Shading::Smooth => {
            let mut welded: HashMap<EdgeId, u32> = HashMap::with_capacity(raw.len() / 2);
            mesh.reserve(raw.len() / 2, raw.len());
            for v in raw {
                let i = *welded
                    .entry(v.id)
                    .or_insert_with(|| mesh.push_vertex(v.pos, v.norm));
                mesh.idx.push(i);
            }
        }
        Shading::Flat => {
            mesh.reserve(raw.len(), raw.len());
            for tri in raw.chunks_exact(3) {
                let n = (tri[1].pos - tri[0].pos)
                    .cross(tri[2].pos - tri[0].pos)
                    .normalized();
                for v in tri {
                    let i = mesh.push_vertex(v.pos, n);
                    mesh.idx.push(i);
                }
            }
        }
    }
    mesh
}
