use strata_geom::Vec3;

/// Indexed triangle list with per-vertex normals.
#[derive(Default, Clone, Debug)]
pub struct MeshBuild {
    pub pos: Vec<f32>,
    pub norm: Vec<f32>,
    pub idx: Vec<u32>,
}

impl MeshBuild {
    #[inline]
    pub fn reserve(&mut self, vertices: usize, indices: usize) {
        self.pos.reserve(vertices * 3);
        self.norm.reserve(vertices * 3);
        self.idx.reserve(indices);
    }

    /// Appends a vertex and returns its index.
    #[inline]
    pub fn push_vertex(&mut self, p: Vec3, n: Vec3) -> u32 {
        let i = self.vertex_count() as u32;
        self.pos.extend_from_slice(&[p.x, p.y, p.z]);
        self.norm.extend_from_slice(&[n.x, n.y, n.z]);
        i
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.pos.len() / 3
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.idx.len() / 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.idx.is_empty()
    }

    #[inline]
    pub fn vertex(&self, i: u32) -> Vec3 {
        let i = i as usize * 3;
        Vec3::new(self.pos[i], self.pos[i + 1], self.pos[i + 2])
    }

    #[inline]
    pub fn normal(&self, i: u32) -> Vec3 {
        let i = i as usize * 3;
        Vec3::new(self.norm[i], self.norm[i + 1], self.norm[i + 2])
    }

    /// Returns a slice of interleaved vertex positions (x,y,z per vertex).
    pub fn positions(&self) -> &[f32] {
        &self.pos
    }
    /// Returns a slice of interleaved vertex normals (x,y,z per vertex).
    pub fn normals(&self) -> &[f32] {
        &self.norm
    }
    pub fn indices(&self) -> &[u32] {
        &self.idx
    }

    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.idx.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }
}
