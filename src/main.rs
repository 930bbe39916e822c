//! Terrain volume host: builds the mesh set from a config file, applies scripted
//! terraform strokes and reports the result.
#![forbid(unsafe_code)]

use std::error::Error;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::mpsc;

use clap::{Parser, ValueEnum};
use strata_geom::Vec3;
use strata_runtime::{Terrain, TerrainError, TerrainEvent, TerrainHost};
use strata_world::worldgen::{Mode, load_config_from_path};
use strata_world::{TerrainConfig, TerrainParams};

#[derive(Parser, Debug)]
#[command(name = "strata")]
#[command(author, version, about = "Volumetric terrain mesher", long_about = None)]
struct Cli {
    /// TOML terrain config; built-in defaults when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Chunks along each axis.
    #[arg(long)]
    chunks: Option<usize>,

    /// Samples per chunk edge, shared with neighbours.
    #[arg(long)]
    points: Option<usize>,

    /// World-space edge length of the whole volume.
    #[arg(long)]
    bounds: Option<f32>,

    #[arg(long)]
    seed: Option<i32>,

    #[arg(long, value_enum)]
    mode: Option<FieldArg>,

    #[arg(long)]
    sphere_radius: Option<f32>,

    #[arg(long)]
    height_multiplier: Option<f32>,

    /// Box-blur radius in samples; 0 disables smoothing.
    #[arg(long)]
    blur: Option<i32>,

    /// Per-triangle normals instead of welded smooth normals.
    #[arg(long)]
    flat: bool,

    #[arg(long)]
    threads: Option<usize>,

    /// Terraform stroke `x,y,z,weight,radius`; repeatable, applied in order.
    #[arg(long = "edit", value_name = "X,Y,Z,W,R")]
    edits: Vec<EditArg>,

    /// Time step for scripted strokes; the config's `edit.delta_time` when omitted.
    #[arg(long)]
    dt: Option<f32>,

    /// Rebuild whenever the config file changes.
    #[arg(long, requires = "config")]
    watch: bool,

    /// Default log filter when RUST_LOG is unset.
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FieldArg {
    Planet,
    Sphere,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct EditArg {
    point: Vec3,
    weight: f32,
    radius: f32,
}

impl FromStr for EditArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let v = s
            .split(',')
            .map(|t| t.trim().parse::<f32>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| format!("invalid edit '{s}': {e}"))?;
        match v[..] {
            [x, y, z, weight, radius] => Ok(EditArg {
                point: Vec3::new(x, y, z),
                weight,
                radius,
            }),
            _ => Err(format!("edit '{s}' needs 5 values: x,y,z,weight,radius")),
        }
    }
}

impl Cli {
    fn load_config(&self) -> Result<TerrainConfig, Box<dyn Error>> {
        let mut cfg = match &self.config {
            Some(path) => load_config_from_path(path)?,
            None => TerrainConfig::default(),
        };
        if let Some(n) = self.chunks {
            cfg.grid.chunks_per_axis = n;
        }
        if let Some(p) = self.points {
            cfg.grid.points_per_axis = p;
        }
        if let Some(b) = self.bounds {
            cfg.grid.bounds_size = b;
        }
        if let Some(s) = self.seed {
            cfg.noise.seed = s;
        }
        if let Some(m) = self.mode {
            cfg.noise.mode = match m {
                FieldArg::Planet => Mode::Planet,
                FieldArg::Sphere => Mode::Sphere,
            };
        }
        if let Some(r) = self.sphere_radius {
            cfg.noise.sphere_radius = r;
        }
        if let Some(h) = self.height_multiplier {
            cfg.noise.height_multiplier = h;
        }
        if let Some(r) = self.blur {
            cfg.blur.enable = r > 0;
            cfg.blur.radius = r.max(0);
        }
        if self.flat {
            cfg.surface.flat_shading = true;
        }
        if let Some(t) = self.threads {
            cfg.runtime.worker_threads = t;
        }
        Ok(cfg)
    }

    fn load_params(&self) -> Result<TerrainParams, Box<dyn Error>> {
        let cfg = self.load_config()?;
        Ok(TerrainParams::from_config(&cfg)?)
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .init();

    let mut host = TerrainHost::new();
    run(&cli, &mut host, cli.load_params()?)?;

    match &cli.config {
        Some(path) if cli.watch => watch(&cli, &mut host, path),
        _ => Ok(()),
    }
}

/// Builds the terrain, replays the scripted strokes and prints a summary.
fn run(cli: &Cli, host: &mut TerrainHost, params: TerrainParams) -> Result<(), TerrainError> {
    let dt = cli.dt.unwrap_or(params.edit_delta_time);
    let terrain = host.initialize(params)?;
    let events = terrain.subscribe();
    for e in &cli.edits {
        match terrain.terraform_with_dt(e.point, e.weight, e.radius, dt) {
            Ok(report) if report.is_noop() => {
                log::warn!("stroke at {:?} had no effect", e.point);
            }
            Ok(report) => log::info!(
                "stroke at {:?}: {} samples, {} chunks rebuilt ({})",
                e.point,
                report.touched,
                report.rebuilt.len(),
                report.timings
            ),
            Err(err) => log::error!("stroke at {:?} failed: {err}", e.point),
        }
    }
    let rebuilt = events
        .try_iter()
        .filter(|ev| matches!(ev, TerrainEvent::ChunkRebuilt { .. }))
        .count();
    report(terrain, rebuilt);
    Ok(())
}

fn report(terrain: &Terrain, rebuilt: usize) {
    let stats = terrain.stats();
    let world = terrain.world();
    println!(
        "{} chunks ({}^3 samples, cell {:.4}): {} triangles, {} vertices",
        stats.chunks,
        world.samples_per_axis(),
        world.cell_world_size(),
        stats.triangles,
        stats.vertices
    );
    println!("initial build: {}", terrain.timings());
    println!(
        "edits: {} strokes, {} chunk rebuilds, {} pending",
        stats.edits.edits, rebuilt, stats.edits.pending
    );
    let solid = terrain.is_solid(Vec3::ZERO);
    println!(
        "origin: density {:.4} ({})",
        terrain.query_volume(Vec3::ZERO),
        if solid { "solid" } else { "air" }
    );
}

/// Blocks forever, rebuilding the terrain each time `path` changes. A config that
/// fails to load or build leaves the current terrain in place.
fn watch(cli: &Cli, host: &mut TerrainHost, path: &Path) -> Result<(), Box<dyn Error>> {
    use notify::{EventKind, RecursiveMode, Watcher};

    let (tx, rx) = mpsc::channel::<()>();
    let mut watcher = notify::recommended_watcher(move |res: Result<notify::Event, notify::Error>| {
        if let Ok(event) = res {
            match event.kind {
                EventKind::Modify(_) | EventKind::Create(_) | EventKind::Any => {
                    let _ = tx.send(());
                }
                _ => {}
            }
        }
    })?;
    watcher.watch(path, RecursiveMode::NonRecursive)?;
    log::info!("watching {} for changes", path.display());

    while rx.recv().is_ok() {
        // Editors often emit several events per save.
        while rx.try_recv().is_ok() {}
        let params = match cli.load_params() {
            Ok(p) => p,
            Err(e) => {
                log::warn!("config reload failed, keeping current terrain: {e}");
                continue;
            }
        };
        log::info!("config changed; rebuilding terrain");
        if let Err(e) = run(cli, host, params) {
            log::warn!("rebuild failed: {e}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_edit_strokes() {
        let e: EditArg = "1, -2.5,0,  -1,2".parse().unwrap();
        assert_eq!(e.point, Vec3::new(1.0, -2.5, 0.0));
        assert_eq!(e.weight, -1.0);
        assert_eq!(e.radius, 2.0);
        assert!("1,2,3".parse::<EditArg>().is_err());
        assert!("1,2,3,x,5".parse::<EditArg>().is_err());
    }

    #[test]
    fn flags_override_config() {
        let cli = Cli::parse_from([
            "strata", "--chunks", "2", "--points", "5", "--mode", "sphere", "--blur", "0", "--flat",
            "--edit", "0,0,0,-1,2",
        ]);
        let p = cli.load_params().unwrap();
        assert_eq!(p.chunks_per_axis, 2);
        assert_eq!(p.points_per_axis, 5);
        assert!(matches!(p.mode, strata_world::FieldMode::Sphere { .. }));
        assert!(!p.blur_enable);
        assert!(p.flat_shading);
        assert_eq!(cli.edits.len(), 1);
    }

    #[test]
    fn watch_needs_a_config() {
        assert!(Cli::try_parse_from(["strata", "--watch"]).is_err());
    }
}
