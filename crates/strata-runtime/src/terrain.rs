use std::time::Instant;

use crossbeam_channel::{Receiver, Sender, unbounded};
use hashbrown::HashMap;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use strata_chunk::{DensityMaps, DensityVolume, generate_volume, sample_world};
use strata_edit::{EditPlan, EditStore, EditStoreStats, affected_chunks, apply_brush, plan_edit};
use strata_geom::Vec3;
use strata_mesh_cpu::{ChunkMeshCPU, Shading, build_chunk_mesh_cpu, max_triangles_for};
use strata_world::{ChunkCoord, TerrainParams, World};

use crate::{BuildTimings, EditTimings, TerrainError, TerrainEvent};

#[derive(Clone, Debug, Default)]
pub struct EditReport {
    /// `None` when the request was degenerate and nothing changed.
    pub plan: Option<EditPlan>,
    /// Raw samples inside the brush.
    pub touched: usize,
    pub rebuilt: Vec<ChunkCoord>,
    pub rev: u64,
    pub timings: EditTimings,
}

impl EditReport {
    #[inline]
    pub fn is_noop(&self) -> bool {
        self.plan.is_none()
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct TerrainStats {
    pub chunks: usize,
    pub triangles: usize,
    pub vertices: usize,
    pub samples: usize,
    pub edits: EditStoreStats,
}

/// Owns the density maps and chunk meshes of one terrain volume. All mutation goes
/// through `&mut self`, so the volume has a single writer and no reader overlaps a write.
pub struct Terrain {
    pool: ThreadPool,
    world: World,
    maps: DensityMaps,
    initial: DensityVolume,
    chunks: HashMap<ChunkCoord, ChunkMeshCPU>,
    edits: EditStore,
    shading: Shading,
    capacity: usize,
    subscribers: Vec<Sender<TerrainEvent>>,
    timings: BuildTimings,
}

struct Generated {
    maps: DensityMaps,
    chunks: HashMap<ChunkCoord, ChunkMeshCPU>,
    timings: BuildTimings,
}

impl Terrain {
    pub fn initialize(params: TerrainParams) -> Result<Self, TerrainError> {
        params.validate()?;
        let pool = ThreadPoolBuilder::new()
            .num_threads(params.worker_threads)
            .thread_name(|i| format!("strata-worker-{i}"))
            .build()
            .map_err(|e| TerrainError::ThreadPool(e.to_string()))?;
        let shading = Shading::from_flat(params.flat_shading);
        let capacity = params
            .max_triangles_per_chunk
            .unwrap_or_else(|| max_triangles_for(params.points_per_axis));
        let world = World::new(params);
        log::info!(
            "initializing terrain: {}^3 chunks, {}^3 samples, bounds {}, {} worker threads",
            world.chunks_per_axis,
            world.samples_per_axis(),
            world.bounds_size,
            pool.current_num_threads()
        );
        let generated = generate_all(&pool, &world, shading, capacity)?;
        let initial = generated.maps.processed().clone();
        Ok(Self {
            pool,
            world,
            maps: generated.maps,
            initial,
            chunks: generated.chunks,
            edits: EditStore::new(),
            shading,
            capacity,
            subscribers: Vec::new(),
            timings: generated.timings,
        })
    }

    /// Discards all edits and rebuilds density and meshes from the generator.
    pub fn regenerate_all(&mut self) -> Result<(), TerrainError> {
        let generated = generate_all(&self.pool, &self.world, self.shading, self.capacity)?;
        self.initial = generated.maps.processed().clone();
        self.maps = generated.maps;
        self.chunks = generated.chunks;
        self.timings = generated.timings;
        self.edits.clear();
        let chunks = self.chunks.len();
        self.emit(TerrainEvent::Regenerated { chunks });
        Ok(())
    }

    pub fn terraform(&mut self, point: Vec3, weight: f32, radius: f32) -> Result<EditReport, TerrainError> {
        let dt = self.world.params.edit_delta_time;
        self.terraform_with_dt(point, weight, radius, dt)
    }

    /// Applies one brush step and rebuilds every affected chunk before returning.
    /// A chunk that overflows its triangle capacity keeps its previous mesh; the first
    /// such failure is returned once all other chunks are rebuilt.
    pub fn terraform_with_dt(
        &mut self,
        point: Vec3,
        weight: f32,
        radius: f32,
        dt: f32,
    ) -> Result<EditReport, TerrainError> {
        let Some(plan) = plan_edit(&self.world, point, weight, radius, self.maps.blur_radius(), dt)
        else {
            log::debug!("ignoring degenerate edit at {point:?} (weight {weight}, radius {radius}, dt {dt})");
            return Ok(EditReport::default());
        };
        let clamp = self.world.params.density_clamp;
        let brush = plan.brush();

        let t0 = Instant::now();
        let maps = &mut self.maps;
        let touched = self.pool.install(|| apply_brush(maps.raw_mut(), &brush, clamp));
        let t_brush = t0.elapsed();

        let t1 = Instant::now();
        self.pool.install(|| maps.reprocess(plan.blur_region));
        let t_smooth = t1.elapsed();

        let affected = affected_chunks(&self.world, plan.blur_region);
        let rev = self.edits.bump(&affected);

        let t2 = Instant::now();
        let iso = self.world.iso_level();
        let mut rebuilt = Vec::with_capacity(affected.len());
        let mut first_err = None;
        for &c in &affected {
            let (vol, world) = (self.maps.processed(), &self.world);
            let (shading, capacity) = (self.shading, self.capacity);
            let built = self
                .pool
                .install(|| build_chunk_mesh_cpu(vol, world, c, iso, shading, capacity));
            match built {
                Ok(mesh) => {
                    let triangles = mesh.mesh.triangle_count();
                    self.chunks.insert(c, mesh);
                    self.edits.mark_built(c, rev);
                    rebuilt.push(c);
                    self.emit(TerrainEvent::ChunkRebuilt {
                        coord: c,
                        rev,
                        triangles,
                    });
                }
                Err(e) => {
                    log::warn!("chunk {c} keeps its previous mesh: {e}");
                    first_err.get_or_insert(e);
                }
            }
        }
        let timings = EditTimings {
            brush: t_brush,
            smooth: t_smooth,
            mesh: t2.elapsed(),
        };
        log::debug!(
            "terraform at {:?} r={} w={}: {} samples, {} chunks ({})",
            point,
            radius,
            weight,
            touched,
            rebuilt.len(),
            timings
        );
        self.emit(TerrainEvent::TerrainModified {
            point,
            radius,
            chunks: rebuilt.len(),
        });
        if let Some(e) = first_err {
            return Err(e.into());
        }
        Ok(EditReport {
            plan: Some(plan),
            touched,
            rebuilt,
            rev,
            timings,
        })
    }

    /// Processed (smoothed) density at a world point, trilinearly interpolated.
    pub fn query_volume(&self, point: Vec3) -> f32 {
        sample_world(self.maps.processed(), &self.world, point)
    }

    /// Density the generator produced at a world point, ignoring later edits.
    pub fn query_initial(&self, point: Vec3) -> f32 {
        sample_world(&self.initial, &self.world, point)
    }

    #[inline]
    pub fn is_solid(&self, point: Vec3) -> bool {
        self.query_volume(point) < self.world.iso_level()
    }

    pub fn chunk_mesh(&self, coord: ChunkCoord) -> Option<&ChunkMeshCPU> {
        self.chunks.get(&coord)
    }

    /// All chunk meshes in coordinate order.
    pub fn chunks(&self) -> Vec<&ChunkMeshCPU> {
        let mut out: Vec<&ChunkMeshCPU> = self.chunks.values().collect();
        out.sort_by_key(|m| m.coord);
        out
    }

    #[inline]
    pub fn world(&self) -> &World {
        &self.world
    }

    #[inline]
    pub fn maps(&self) -> &DensityMaps {
        &self.maps
    }

    #[inline]
    pub fn edits(&self) -> &EditStore {
        &self.edits
    }

    #[inline]
    pub fn timings(&self) -> BuildTimings {
        self.timings
    }

    pub fn stats(&self) -> TerrainStats {
        let (triangles, vertices) = self.chunks.values().fold((0, 0), |(t, v), m| {
            (t + m.mesh.triangle_count(), v + m.mesh.vertex_count())
        });
        TerrainStats {
            chunks: self.chunks.len(),
            triangles,
            vertices,
            samples: self.world.sample_count(),
            edits: self.edits.stats(),
        }
    }

    /// New receiver for mesh-update events. Dropped receivers are pruned on the next send.
    pub fn subscribe(&mut self) -> Receiver<TerrainEvent> {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        rx
    }

    fn emit(&mut self, ev: TerrainEvent) {
        self.subscribers.retain(|tx| tx.send(ev.clone()).is_ok());
    }
}

fn generate_all(
    pool: &ThreadPool,
    world: &World,
    shading: Shading,
    capacity: usize,
) -> Result<Generated, TerrainError> {
    let params = &world.params;
    let blur = params.blur_enable.then_some(params.blur_radius);
    let t0 = Instant::now();
    let raw = pool.install(|| generate_volume(world));
    let generate = t0.elapsed();

    let t1 = Instant::now();
    let maps = pool.install(|| DensityMaps::from_raw(raw, blur));
    let smooth = t1.elapsed();

    let t2 = Instant::now();
    let iso = world.iso_level();
    let coords = world.chunk_coords();
    let vol = maps.processed();
    let built: Vec<ChunkMeshCPU> = pool.install(|| {
        coords
            .par_iter()
            .map(|&c| build_chunk_mesh_cpu(vol, world, c, iso, shading, capacity))
            .collect::<Result<Vec<_>, _>>()
    })?;
    let mesh = t2.elapsed();

    let mut timings = BuildTimings {
        generate,
        smooth,
        mesh,
        total: t0.elapsed(),
        ..BuildTimings::default()
    };
    let mut chunks = HashMap::with_capacity(built.len());
    for m in built {
        timings.triangles += m.mesh.triangle_count();
        timings.vertices += m.mesh.vertex_count();
        chunks.insert(m.coord, m);
    }
    log::info!("terrain generated: {} chunks; {}", chunks.len(), timings);
    Ok(Generated {
        maps,
        chunks,
        timings,
    })
}
