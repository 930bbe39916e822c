use std::fmt;
use std::time::Duration;

/// Stage totals for a full generation pass.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuildTimings {
    pub generate: Duration,
    pub smooth: Duration,
    pub mesh: Duration,
    pub total: Duration,
    pub triangles: usize,
    pub vertices: usize,
}

impl fmt::Display for BuildTimings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "generate {:.2?}, smooth {:.2?}, mesh {:.2?}, total {:.2?} ({} tris, {} verts)",
            self.generate, self.smooth, self.mesh, self.total, self.triangles, self.vertices
        )
    }
}

/// Stage totals for one terraform call.
#[derive(Clone, Copy, Debug, Default)]
pub struct EditTimings {
    pub brush: Duration,
    pub smooth: Duration,
    pub mesh: Duration,
}

impl fmt::Display for EditTimings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "brush {:.2?}, smooth {:.2?}, mesh {:.2?}",
            self.brush, self.smooth, self.mesh
        )
    }
}
