use proptest::prelude::*;
use strata_chunk::DensityVolume;
use strata_geom::Vec3;
use strata_mesh_cpu::{EdgeId, RawVertex, Shading, assemble, march_cell};
use strata_world::{TerrainParams, World};

// One cell spanning [-0.5, 0.5]^3.
fn unit_world() -> World {
    World::new(TerrainParams {
        chunks_per_axis: 1,
        points_per_axis: 2,
        bounds_size: 1.0,
        ..TerrainParams::default()
    })
}

fn cell_volume(corners: [f32; 8]) -> DensityVolume {
    DensityVolume::from_fn(2, |x, y, z| corners[(z * 2 + y) * 2 + x])
}

fn arb_raw() -> impl Strategy<Value = Vec<RawVertex>> {
    let vertex = (0u32..6, 0u32..6, -5.0f32..5.0, -5.0f32..5.0).prop_map(|(a, b, x, y)| {
        RawVertex {
            pos: Vec3::new(x, y, 0.0),
            norm: Vec3::new(0.0, 0.0, 1.0),
            id: EdgeId::new(a, b),
        }
    });
    prop::collection::vec(prop::array::uniform3(vertex), 0..24)
        .prop_map(|tris| tris.into_iter().flatten().collect())
}

proptest! {
    // Any corner configuration yields whole triangles on the cell's edges
    #[test]
    fn cell_output_stays_on_the_cell(corners in prop::array::uniform8(-1.0f32..1.0), iso in -0.5f32..0.5) {
        let w = unit_world();
        let vol = cell_volume(corners);
        let mut out = Vec::new();
        march_cell(&vol, &w, [0, 0, 0], iso, &mut out);
        prop_assert_eq!(out.len() % 3, 0);
        prop_assert!(out.len() <= 15);
        let inside = corners.iter().filter(|&&d| d < iso).count();
        if inside == 0 || inside == 8 {
            prop_assert!(out.is_empty());
        }
        for v in &out {
            prop_assert!(v.id.0 < v.id.1 && v.id.1 < 8);
            for c in [v.pos.x, v.pos.y, v.pos.z] {
                prop_assert!((-0.5 - 1e-5..=0.5 + 1e-5).contains(&c));
            }
            let len = v.norm.length();
            prop_assert!((len - 1.0).abs() < 1e-3 || len == 0.0);
        }
    }

    // Assembly keeps one index per raw vertex and welds exactly by edge id
    #[test]
    fn assembly_keeps_index_count(raw in arb_raw()) {
        let ids: std::collections::HashSet<EdgeId> = raw.iter().map(|v| v.id).collect();
        let smooth = assemble(&raw, Shading::Smooth);
        prop_assert_eq!(smooth.indices().len(), raw.len());
        prop_assert_eq!(smooth.vertex_count(), ids.len());
        prop_assert!(smooth.indices().iter().all(|&i| (i as usize) < smooth.vertex_count()));
        for (v, &i) in raw.iter().zip(smooth.indices()) {
            let first = raw.iter().find(|r| r.id == v.id).map(|r| r.pos);
            prop_assert_eq!(Some(smooth.vertex(i)), first);
        }

        let flat = assemble(&raw, Shading::Flat);
        prop_assert_eq!(flat.indices().len(), raw.len());
        prop_assert_eq!(flat.vertex_count(), raw.len());
    }
}
