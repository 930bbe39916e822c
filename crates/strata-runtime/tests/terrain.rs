use std::collections::HashMap;

use strata_geom::Vec3;
use strata_mesh_cpu::{Shading, build_chunk_mesh_cpu};
use strata_runtime::{Terrain, TerrainError, TerrainEvent, TerrainHost};
use strata_world::{ChunkCoord, FieldMode, TerrainParams};

fn sphere_params(radius: f32) -> TerrainParams {
    TerrainParams {
        chunks_per_axis: 2,
        points_per_axis: 5,
        bounds_size: 10.0,
        iso_level: 0.0,
        mode: FieldMode::Sphere { radius },
        blur_enable: false,
        worker_threads: 2,
        ..TerrainParams::default()
    }
}

fn key(p: Vec3) -> [u32; 3] {
    [p.x.to_bits(), p.y.to_bits(), p.z.to_bits()]
}

fn snapshot(t: &Terrain) -> Vec<(ChunkCoord, Vec<f32>, Vec<f32>, Vec<u32>)> {
    t.chunks()
        .into_iter()
        .map(|m| (m.coord, m.mesh.pos.clone(), m.mesh.norm.clone(), m.mesh.idx.clone()))
        .collect()
}

// Every stored mesh must equal a fresh build from the current processed volume.
fn assert_meshes_current(t: &Terrain) {
    let w = t.world();
    let shading = Shading::from_flat(w.params.flat_shading);
    for m in t.chunks() {
        let fresh =
            build_chunk_mesh_cpu(t.maps().processed(), w, m.coord, w.iso_level(), shading, usize::MAX)
                .unwrap();
        assert_eq!(m.mesh.pos, fresh.mesh.pos, "stale positions in chunk {}", m.coord);
        assert_eq!(m.mesh.norm, fresh.mesh.norm, "stale normals in chunk {}", m.coord);
        assert_eq!(m.mesh.idx, fresh.mesh.idx, "stale indices in chunk {}", m.coord);
    }
}

#[test]
fn sphere_scenario_is_closed_and_near_radius() {
    let t = Terrain::initialize(sphere_params(4.0)).unwrap();
    let diag = t.world().cell_world_size() * 3f32.sqrt();
    let mut edges: HashMap<([u32; 3], [u32; 3]), usize> = HashMap::new();
    for m in t.chunks() {
        for [a, b, c] in m.mesh.triangles() {
            let tri = [m.mesh.vertex(a), m.mesh.vertex(b), m.mesh.vertex(c)];
            for p in tri {
                assert!((p.length() - 4.0).abs() <= diag);
            }
            for (i, j) in [(0, 1), (1, 2), (2, 0)] {
                let (ka, kb) = (key(tri[i]), key(tri[j]));
                let e = if ka < kb { (ka, kb) } else { (kb, ka) };
                *edges.entry(e).or_default() += 1;
            }
        }
    }
    assert!(!edges.is_empty());
    assert!(edges.values().all(|&n| n == 2));
    assert_eq!(t.stats().chunks, 8);
}

#[test]
fn terraform_at_origin_lowers_density() {
    for blur in [false, true] {
        let mut params = sphere_params(3.0);
        params.blur_enable = blur;
        params.blur_radius = 1;
        let mut t = Terrain::initialize(params).unwrap();
        assert_eq!(t.maps().is_smoothed(), blur);
        let before = t.query_volume(Vec3::ZERO);
        assert!(t.is_solid(Vec3::ZERO));
        let report = t.terraform(Vec3::ZERO, -1.0, 2.0).unwrap();
        assert!(!report.is_noop());
        assert!(report.touched > 0);
        assert!(t.query_volume(Vec3::ZERO) < before);
        assert_eq!(t.query_initial(Vec3::ZERO), before);
        assert!(t.is_solid(Vec3::ZERO));
    }
}

#[test]
fn degenerate_terraform_changes_nothing() {
    let mut t = Terrain::initialize(sphere_params(3.0)).unwrap();
    let rx = t.subscribe();
    let density = t.maps().raw().clone();
    let processed = t.maps().processed().clone();
    let meshes = snapshot(&t);
    for (w, r) in [(0.0, 2.0), (-1.0, 0.0), (1.0, -3.0)] {
        let report = t.terraform(Vec3::new(0.5, 1.0, -0.5), w, r).unwrap();
        assert!(report.is_noop());
    }
    assert_eq!(t.maps().raw(), &density);
    assert_eq!(t.maps().processed(), &processed);
    assert_eq!(snapshot(&t), meshes);
    assert!(rx.try_recv().is_err());
    assert_eq!(t.stats().edits.edits, 0);
}

#[test]
fn rebuilding_is_repeatable() {
    let mut t = Terrain::initialize(sphere_params(3.0)).unwrap();
    let first = snapshot(&t);
    t.regenerate_all().unwrap();
    assert_eq!(snapshot(&t), first);
}

#[test]
fn terraform_rebuilds_only_nearby_chunks_and_notifies() {
    let mut params = sphere_params(3.0);
    params.chunks_per_axis = 4;
    params.points_per_axis = 4;
    let mut t = Terrain::initialize(params).unwrap();
    let rx = t.subscribe();
    let far = ChunkCoord::new(0, 0, 0);
    let far_before = t.chunk_mesh(far).map(|m| m.mesh.pos.clone());

    let report = t.terraform(Vec3::new(2.5, 2.5, 2.5), 1.0, 0.5).unwrap();
    assert!(!report.rebuilt.is_empty());
    assert!(!report.rebuilt.contains(&far));
    assert_eq!(t.chunk_mesh(far).map(|m| m.mesh.pos.clone()), far_before);

    let events: Vec<TerrainEvent> = rx.try_iter().collect();
    let rebuilt: Vec<ChunkCoord> = events
        .iter()
        .filter_map(|e| match e {
            TerrainEvent::ChunkRebuilt { coord, rev, .. } => {
                assert_eq!(*rev, report.rev);
                Some(*coord)
            }
            _ => None,
        })
        .collect();
    assert_eq!(rebuilt, report.rebuilt);
    assert!(matches!(
        events.last(),
        Some(TerrainEvent::TerrainModified { chunks, .. }) if *chunks == report.rebuilt.len()
    ));
    for c in &report.rebuilt {
        assert!(!t.edits().needs_rebuild(*c));
        assert_eq!(t.edits().get_built_rev(*c), report.rev);
    }
}

#[test]
fn density_clamp_bounds_repeated_edits() {
    let mut params = sphere_params(3.0);
    params.density_clamp = Some((-4.0, 4.0));
    let mut t = Terrain::initialize(params).unwrap();
    for _ in 0..20 {
        t.terraform_with_dt(Vec3::ZERO, -10.0, 2.0, 1.0).unwrap();
    }
    assert!(t.maps().raw().data().iter().all(|&d| d >= -4.0));
}

#[test]
fn overflowing_chunks_keep_their_mesh() {
    // Everything starts solid, so no chunk has a surface and a zero capacity is fine.
    let mut params = sphere_params(100.0);
    params.max_triangles_per_chunk = Some(0);
    let mut t = Terrain::initialize(params).unwrap();
    assert_eq!(t.stats().triangles, 0);
    let rx = t.subscribe();

    let err = t.terraform_with_dt(Vec3::ZERO, 400.0, 2.0, 1.0).unwrap_err();
    assert!(matches!(err, TerrainError::Mesh(_)));
    assert!(t.query_volume(Vec3::ZERO) > 0.0);
    assert_eq!(t.stats().triangles, 0);
    assert!(t.chunks().iter().all(|m| m.mesh.is_empty()));
    assert!(!t.edits().pending().is_empty());

    let events: Vec<TerrainEvent> = rx.try_iter().collect();
    assert!(matches!(
        events.last(),
        Some(TerrainEvent::TerrainModified { .. })
    ));
}

#[test]
fn tight_capacity_fails_initialization() {
    let mut params = sphere_params(3.0);
    params.max_triangles_per_chunk = Some(0);
    assert!(matches!(Terrain::initialize(params), Err(TerrainError::Mesh(_))));
}

#[test]
fn host_fails_fast_before_initialize() {
    let mut host = TerrainHost::new();
    assert!(!host.is_initialized());
    assert!(matches!(host.query_volume(Vec3::ZERO), Err(TerrainError::Uninitialized)));
    assert!(matches!(
        host.terraform(Vec3::ZERO, 1.0, 1.0),
        Err(TerrainError::Uninitialized)
    ));
    assert!(matches!(
        host.chunk_mesh(ChunkCoord::new(0, 0, 0)),
        Err(TerrainError::Uninitialized)
    ));
    host.initialize(sphere_params(3.0)).unwrap();
    assert!(host.query_volume(Vec3::ZERO).unwrap() < 0.0);
    assert!(host.chunk_mesh(ChunkCoord::new(0, 0, 0)).unwrap().is_some());
}

#[test]
fn invalid_params_are_rejected() {
    let params = TerrainParams {
        points_per_axis: 1,
        ..TerrainParams::default()
    };
    assert!(matches!(Terrain::initialize(params), Err(TerrainError::Config(_))));
}

#[test]
fn planet_generation_produces_a_surface() {
    let t = Terrain::initialize(TerrainParams {
        chunks_per_axis: 2,
        points_per_axis: 6,
        height_multiplier: 0.3,
        blur_enable: false,
        worker_threads: 2,
        ..TerrainParams::default()
    })
    .unwrap();
    let stats = t.stats();
    assert!(stats.triangles > 0);
    assert!(stats.vertices <= stats.triangles * 3);
    assert!(t.is_solid(Vec3::ZERO));
    assert!(!t.is_solid(Vec3::splat(5.0)));
    assert_eq!(t.timings().triangles, stats.triangles);
}

#[test]
fn edit_outside_bounds_rebuilds_the_border_chunk() {
    let mut t = Terrain::initialize(sphere_params(5.5)).unwrap();
    let report = t.terraform_with_dt(Vec3::splat(8.0), -10.0, 1.0, 1.0).unwrap();
    assert!(!report.is_noop());
    assert!(report.rebuilt.contains(&ChunkCoord::new(1, 1, 1)));
    assert_meshes_current(&t);
}

#[test]
fn border_and_corner_edits_leave_no_stale_chunk() {
    for blur in [false, true] {
        for blur_radius in [1, 2] {
            let mut params = sphere_params(3.0);
            params.blur_enable = blur;
            params.blur_radius = blur_radius;
            let mut t = Terrain::initialize(params).unwrap();
            for point in [
                Vec3::new(0.0, 0.0, 3.0),
                Vec3::new(0.0, 2.5, 0.0),
                Vec3::new(-3.0, 0.0, 0.0),
                Vec3::splat(1.8),
                Vec3::new(-1.8, 1.8, -1.8),
                Vec3::splat(5.0),
            ] {
                t.terraform_with_dt(point, -2.0, 1.0, 1.0).unwrap();
                assert_meshes_current(&t);
                t.terraform_with_dt(point, 1.5, 0.6, 1.0).unwrap();
                assert_meshes_current(&t);
            }
        }
    }
}

#[test]
fn planet_sweep_keeps_every_chunk_current() {
    let mut t = Terrain::initialize(TerrainParams {
        chunks_per_axis: 4,
        points_per_axis: 5,
        bounds_size: 12.0,
        height_multiplier: 0.3,
        blur_enable: true,
        blur_radius: 3,
        worker_threads: 2,
        ..TerrainParams::default()
    })
    .unwrap();
    // Blur margin plus gradient margin reaches three chunks along x and z.
    let report = t.terraform_with_dt(Vec3::splat(-0.5), -3.0, 0.5, 1.0).unwrap();
    assert!(report.rebuilt.contains(&ChunkCoord::new(3, 0, 3)));
    assert_meshes_current(&t);
    for i in 0..30 {
        let s = -5.8 + 0.4 * i as f32;
        t.terraform_with_dt(Vec3::splat(s), -3.0, 0.5, 1.0).unwrap();
    }
    assert_meshes_current(&t);
}
