use criterion::{Criterion, black_box, criterion_group, criterion_main};

use strata_chunk::generate_volume;
use strata_mesh_cpu::{Shading, assemble, build_chunk_mesh_cpu, extract_chunk, max_triangles_for};
use strata_world::{ChunkCoord, TerrainParams, World};

fn planet_world(points_per_axis: usize) -> World {
    World::new(TerrainParams {
        chunks_per_axis: 2,
        points_per_axis,
        bounds_size: 10.0,
        seed: 1337,
        ..TerrainParams::default()
    })
}

fn bench_extract_chunk(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_chunk");
    for p in [10usize, 24] {
        let world = planet_world(p);
        let vol = generate_volume(&world);
        let cap = max_triangles_for(p);
        let coord = ChunkCoord::new(0, 0, 0);
        group.bench_function(format!("planet_p{p}"), |b| {
            b.iter(|| {
                let raw = extract_chunk(&vol, &world, coord, 0.0, cap).unwrap();
                black_box(raw);
            })
        });
    }
    group.finish();
}

fn bench_assemble(c: &mut Criterion) {
    let mut group = c.benchmark_group("assemble");
    let world = planet_world(24);
    let vol = generate_volume(&world);
    let coord = ChunkCoord::new(1, 0, 1);
    let raw = extract_chunk(&vol, &world, coord, 0.0, max_triangles_for(24)).unwrap();
    for shading in [Shading::Smooth, Shading::Flat] {
        group.bench_function(format!("{shading:?}"), |b| {
            b.iter(|| black_box(assemble(&raw, shading)))
        });
    }
    group.bench_function("build_chunk_mesh_cpu", |b| {
        b.iter(|| {
            let out = build_chunk_mesh_cpu(
                &vol,
                &world,
                coord,
                0.0,
                Shading::Smooth,
                max_triangles_for(24),
            );
            black_box(out)
        })
    });
    group.finish();
}

criterion_group!(benches, bench_extract_chunk, bench_assemble);
criterion_main!(benches);
