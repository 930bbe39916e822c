use strata_chunk::GridRegion;
use strata_geom::Vec3;
use strata_world::{ChunkCoord, World};

use crate::Brush;

/// Everything an edit needs, resolved against the sample grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EditPlan {
    pub point: Vec3,
    /// Grid sample nearest to `point`, clamped onto the grid.
    pub centre: [i32; 3],
    pub weight: f32,
    pub dt: f32,
    pub cell_radius: i32,
    pub blur_radius: i32,
    /// Samples whose processed value may change: the brush plus the blur margin.
    pub blur_region: GridRegion,
    pub falloff_start: f32,
}

impl EditPlan {
    #[inline]
    pub fn brush(&self) -> Brush {
        Brush {
            centre: self.centre,
            radius: self.cell_radius,
            strength: self.weight * self.dt,
            falloff_start: self.falloff_start,
        }
    }
}

/// Resolves an edit request. Returns `None` when the edit cannot change anything:
/// non-positive radius or time step, zero weight, or any non-finite input.
pub fn plan_edit(
    world: &World,
    point: Vec3,
    weight: f32,
    radius: f32,
    blur_radius: i32,
    dt: f32,
) -> Option<EditPlan> {
    if !(point.is_finite() && weight.is_finite() && radius.is_finite() && dt.is_finite()) {
        return None;
    }
    if radius <= 0.0 || weight == 0.0 || dt <= 0.0 {
        return None;
    }
    let cell = world.cell_world_size();
    let cell_radius = (radius / cell).ceil() as i32;
    let blur_radius = blur_radius.max(0);
    let centre = world.world_to_grid(point);
    let blur_region =
        GridRegion::cube(centre, cell_radius + blur_radius).clamp_to(world.samples_per_axis());
    Some(EditPlan {
        point,
        centre,
        weight,
        dt,
        cell_radius,
        blur_radius,
        blur_region,
        falloff_start: world.params.falloff_start,
    })
}

/// Chunks whose mesh can depend on a sample in `region`, in chunk creation order.
/// A chunk reads its own sample window plus one sample beyond it on every side for
/// gradients, so that grown window is tested against the region.
pub fn affected_chunks(world: &World, region: GridRegion) -> Vec<ChunkCoord> {
    if region.is_empty() {
        return Vec::new();
    }
    let extent = world.points_per_axis as i32 + 2;
    world
        .chunk_coords()
        .into_iter()
        .filter(|&c| {
            let o = world.chunk_sample_origin(c).map(|v| v as i32 - 1);
            GridRegion::from_origin_extent(o, [extent; 3]).overlaps(&region)
        })
        .collect()
}
