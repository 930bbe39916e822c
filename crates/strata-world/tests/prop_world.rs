use proptest::prelude::*;
use strata_geom::{Aabb, Vec3};
use strata_world::{ChunkCoord, TerrainParams, World};

fn arb_world() -> impl Strategy<Value = World> {
    (1usize..6, 2usize..12, 1.0f32..200.0).prop_map(|(n, p, b)| {
        World::new(TerrainParams {
            chunks_per_axis: n,
            points_per_axis: p,
            bounds_size: b,
            ..TerrainParams::default()
        })
    })
}

proptest! {
    // Snapping lands on the grid within half a cell of the clamped point
    #[test]
    fn world_to_grid_snaps_to_nearest(w in arb_world(), u in -1.0f32..2.0, v in -1.0f32..2.0, t in -1.0f32..2.0) {
        let b = w.bounds_size;
        let p = Vec3::new((u - 0.5) * b, (v - 0.5) * b, (t - 0.5) * b);
        let g = w.world_to_grid(p);
        let s = w.samples_per_axis() as i32;
        prop_assert!(g.iter().all(|&c| (0..s).contains(&c)));
        let half = Vec3::splat(b / 2.0);
        let clamped = Aabb::new(-half, half).closest_point(p);
        let q = w.grid_to_world(g[0] as usize, g[1] as usize, g[2] as usize);
        let tol = w.cell_world_size() * 0.5 + b * 1e-4;
        prop_assert!((q.x - clamped.x).abs() <= tol);
        prop_assert!((q.y - clamped.y).abs() <= tol);
        prop_assert!((q.z - clamped.z).abs() <= tol);
    }

    // Chunk cubes tile the bounds and each chunk window's samples fall inside its cube
    #[test]
    fn chunk_window_matches_chunk_bounds(w in arb_world()) {
        let eps = w.bounds_size * 1e-4;
        for c in w.chunk_coords() {
            let bb = w.chunk_bounds(c);
            let o = w.chunk_sample_origin(c);
            let last = w.points_per_axis - 1;
            let lo = w.grid_to_world(o[0], o[1], o[2]);
            let hi = w.grid_to_world(o[0] + last, o[1] + last, o[2] + last);
            prop_assert!((lo - bb.min).length() <= eps);
            prop_assert!((hi - bb.max).length() <= eps);
        }
    }

    #[test]
    fn chunk_coords_are_unique_and_complete(w in arb_world()) {
        let coords = w.chunk_coords();
        prop_assert_eq!(coords.len(), w.chunks_per_axis.pow(3));
        let mut sorted: Vec<ChunkCoord> = coords.clone();
        sorted.sort();
        sorted.dedup();
        prop_assert_eq!(sorted.len(), coords.len());
    }
}
