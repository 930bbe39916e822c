use rayon::prelude::*;
use strata_chunk::DensityVolume;
use strata_geom::Vec3;
use strata_world::{ChunkCoord, World};

use crate::MeshError;
use crate::tables::{CORNER_OFFSETS, EDGE_CORNERS, EDGE_TABLE, TRI_TABLE};

/// Grid edge identified by the linear sample indices of its endpoints, smaller first.
/// Every cell touching an edge, in any chunk, derives the same id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub u32, pub u32);

impl EdgeId {
    #[inline]
    pub fn new(a: u32, b: u32) -> Self {
        if a <= b { EdgeId(a, b) } else { EdgeId(b, a) }
    }
}

/// One corner of an emitted triangle, before welding.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RawVertex {
    pub pos: Vec3,
    pub norm: Vec3,
    pub id: EdgeId,
}

/// Worst-case triangle count for a chunk of `points_per_axis` samples per side.
#[inline]
pub fn max_triangles_for(points_per_axis: usize) -> usize {
    let cells = points_per_axis.saturating_sub(1);
    cells * cells * cells * 5
}

/// Density gradient at a grid sample by central differences, one-sided at the border.
fn gradient(vol: &DensityVolume, x: usize, y: usize, z: usize, cell: f32) -> Vec3 {
    let hi = vol.size() - 1;
    let span = |c: usize| (c.saturating_sub(1), (c + 1).min(hi));
    let diff = |lo: usize, up: usize, a: f32, b: f32| {
        if up > lo { (b - a) / ((up - lo) as f32 * cell) } else { 0.0 }
    };
    let (x0, x1) = span(x);
    let (y0, y1) = span(y);
    let (z0, z1) = span(z);
    Vec3::new(
        diff(x0, x1, vol.get(x0, y, z), vol.get(x1, y, z)),
        diff(y0, y1, vol.get(x, y0, z), vol.get(x, y1, z)),
        diff(z0, z1, vol.get(x, y, z0), vol.get(x, y, z1)),
    )
}

/// Polygonises the cell whose lowest corner is grid sample `cell`, appending 0-5
/// triangles to `out`. Triangles wind counter-clockwise seen from the side of higher
/// density, and vertex normals point the same way.
pub fn march_cell(
    vol: &DensityVolume,
    world: &World,
    cell: [usize; 3],
    iso: f32,
    out: &mut Vec<RawVertex>,
) {
    let mut coords = [[0usize; 3]; 8];
    let mut values = [0.0f32; 8];
    let mut config = 0usize;
    for (i, off) in CORNER_OFFSETS.iter().enumerate() {
        let c = [cell[0] + off[0], cell[1] + off[1], cell[2] + off[2]];
        coords[i] = c;
        values[i] = vol.get(c[0], c[1], c[2]);
        if values[i] < iso {
            config |= 1 << i;
        }
    }
    let crossed = EDGE_TABLE[config];
    if crossed == 0 {
        return;
    }

    let step = world.cell_world_size();
    let mut verts = [None::<RawVertex>; 12];
    for (e, corners) in EDGE_CORNERS.iter().enumerate() {
        if crossed & (1 << e) == 0 {
            continue;
        }
        let (mut a, mut b) = (corners[0], corners[1]);
        let mut ia = vol.idx(coords[a][0], coords[a][1], coords[a][2]) as u32;
        let mut ib = vol.idx(coords[b][0], coords[b][1], coords[b][2]) as u32;
        // Interpolate from the lower index so shared edges match bit for bit.
        if ia > ib {
            std::mem::swap(&mut a, &mut b);
            std::mem::swap(&mut ia, &mut ib);
        }
        let (va, vb) = (values[a], values[b]);
        let t = if vb != va { (iso - va) / (vb - va) } else { 0.5 };
        let [ax, ay, az] = coords[a];
        let [bx, by, bz] = coords[b];
        let pa = world.grid_to_world(ax, ay, az);
        let pb = world.grid_to_world(bx, by, bz);
        let ga = gradient(vol, ax, ay, az, step);
        let gb = gradient(vol, bx, by, bz, step);
        verts[e] = Some(RawVertex {
            pos: pa.lerp(pb, t),
            norm: ga.lerp(gb, t).normalized(),
            id: EdgeId(ia, ib),
        });
    }

    let tris = &TRI_TABLE[config];
    for tri in tris.chunks_exact(3) {
        if tri[0] < 0 {
            break;
        }
        // Table triangles face the low-density corners; reverse them.
        let corner = |k: usize| verts[tri[k] as usize];
        let (Some(v0), Some(v1), Some(v2)) = (corner(0), corner(2), corner(1)) else {
            continue;
        };
        let mut tri_out = [v0, v1, v2];
        let face = (v1.pos - v0.pos).cross(v2.pos - v0.pos).normalized();
        for v in &mut tri_out {
            if v.norm == Vec3::ZERO {
                v.norm = face;
            }
        }
        out.extend_from_slice(&tri_out);
    }
}

/// Extracts the raw vertex stream of one chunk. Cells are processed one z-layer
/// per task and concatenated in layer order, so the output is deterministic.
/// Fails when the chunk emits more than `capacity` triangles.
pub fn extract_chunk(
    vol: &DensityVolume,
    world: &World,
    coord: ChunkCoord,
    iso: f32,
    capacity: usize,
) -> Result<Vec<RawVertex>, MeshError> {
    let [ox, oy, oz] = world.chunk_sample_origin(coord);
    let cells = world.points_per_axis - 1;
    let layers: Vec<Vec<RawVertex>> = (0..cells)
        .into_par_iter()
        .map(|z| {
            let mut layer = Vec::new();
            for y in 0..cells {
                for x in 0..cells {
                    march_cell(vol, world, [ox + x, oy + y, oz + z], iso, &mut layer);
                }
            }
            layer
        })
        .collect();
    let total: usize = layers.iter().map(Vec::len).sum();
    let emitted = total / 3;
    if emitted > capacity {
        return Err(MeshError::CapacityExceeded {
            coord,
            emitted,
            capacity,
        });
    }
    let mut out = Vec::with_capacity(total);
    for layer in layers {
        out.extend(layer);
    }
    Ok(out)
}
