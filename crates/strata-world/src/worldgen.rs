use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::ConfigError;
use crate::world::FieldMode;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct TerrainConfig {
    #[serde(default)]
    pub grid: Grid,
    #[serde(default)]
    pub surface: Surface,
    #[serde(default)]
    pub noise: Noise,
    #[serde(default)]
    pub blur: Blur,
    #[serde(default)]
    pub edit: Edit,
    #[serde(default)]
    pub mesh: Mesh,
    #[serde(default)]
    pub runtime: Runtime,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Planet,
    Sphere,
}

fn default_mode() -> Mode {
    Mode::Planet
}

#[derive(Clone, Debug, Deserialize)]
pub struct Grid {
    #[serde(default = "default_chunks_per_axis")]
    pub chunks_per_axis: usize,
    #[serde(default = "default_points_per_axis")]
    pub points_per_axis: usize,
    #[serde(default = "default_bounds_size")]
    pub bounds_size: f32,
}
fn default_chunks_per_axis() -> usize {
    4
}
fn default_points_per_axis() -> usize {
    10
}
fn default_bounds_size() -> f32 {
    10.0
}
impl Default for Grid {
    fn default() -> Self {
        Self {
            chunks_per_axis: default_chunks_per_axis(),
            points_per_axis: default_points_per_axis(),
            bounds_size: default_bounds_size(),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Surface {
    #[serde(default)]
    pub iso_level: f32,
    #[serde(default)]
    pub flat_shading: bool,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Noise {
    #[serde(default = "default_mode")]
    pub mode: Mode,
    #[serde(default)]
    pub seed: i32,
    #[serde(default = "default_height_multiplier")]
    pub height_multiplier: f32,
    #[serde(default = "default_sphere_radius")]
    pub sphere_radius: f32,
    #[serde(default, flatten)]
    pub fractal: Fractal,
}
fn default_height_multiplier() -> f32 {
    1.0
}
fn default_sphere_radius() -> f32 {
    4.0
}
impl Default for Noise {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            seed: 0,
            height_multiplier: default_height_multiplier(),
            sphere_radius: default_sphere_radius(),
            fractal: Fractal::default(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Fractal {
    #[serde(default = "d_oct")]
    pub octaves: i32,
    #[serde(default = "d_pers")]
    pub persistence: f32,
    #[serde(default = "d_lac")]
    pub lacunarity: f32,
    #[serde(default = "d_scale")]
    pub scale: f32,
}
fn d_oct() -> i32 {
    6
}
fn d_pers() -> f32 {
    0.5
}
fn d_lac() -> f32 {
    2.0
}
fn d_scale() -> f32 {
    40.0
}
impl Default for Fractal {
    fn default() -> Self {
        Self {
            octaves: d_oct(),
            persistence: d_pers(),
            lacunarity: d_lac(),
            scale: d_scale(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Blur {
    #[serde(default = "default_blur_enable")]
    pub enable: bool,
    #[serde(default = "default_blur_radius")]
    pub radius: i32,
}
fn default_blur_enable() -> bool {
    true
}
fn default_blur_radius() -> i32 {
    3
}
impl Default for Blur {
    fn default() -> Self {
        Self {
            enable: default_blur_enable(),
            radius: default_blur_radius(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Edit {
    #[serde(default = "default_delta_time")]
    pub delta_time: f32,
    #[serde(default = "default_falloff_start")]
    pub falloff_start: f32,
    #[serde(default)]
    pub density_min: Option<f32>,
    #[serde(default)]
    pub density_max: Option<f32>,
}
fn default_delta_time() -> f32 {
    1.0 / 60.0
}
fn default_falloff_start() -> f32 {
    0.7
}
impl Default for Edit {
    fn default() -> Self {
        Self {
            delta_time: default_delta_time(),
            falloff_start: default_falloff_start(),
            density_min: None,
            density_max: None,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Mesh {
    #[serde(default)]
    pub max_triangles_per_chunk: Option<usize>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Runtime {
    #[serde(default)]
    pub worker_threads: usize,
}

// Flattened, validated snapshot of the config used by every stage.
#[derive(Clone, Debug)]
pub struct TerrainParams {
    pub chunks_per_axis: usize,
    pub points_per_axis: usize,
    pub bounds_size: f32,
    pub iso_level: f32,
    pub flat_shading: bool,
    pub mode: FieldMode,
    pub seed: i32,
    pub height_multiplier: f32,
    pub fractal: Fractal,
    pub blur_enable: bool,
    pub blur_radius: i32,
    pub edit_delta_time: f32,
    pub falloff_start: f32,
    pub density_clamp: Option<(f32, f32)>,
    pub max_triangles_per_chunk: Option<usize>,
    pub worker_threads: usize,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self::from_sections(&TerrainConfig::default(), None)
    }
}

impl TerrainParams {
    pub fn from_config(cfg: &TerrainConfig) -> Result<Self, ConfigError> {
        if cfg.blur.radius < 0 {
            return Err(ConfigError::Invalid("blur.radius must be >= 0".into()));
        }
        if !(0.0..1.0).contains(&cfg.edit.falloff_start) {
            return Err(ConfigError::Invalid("edit.falloff_start must be in [0, 1)".into()));
        }
        let density_clamp = match (cfg.edit.density_min, cfg.edit.density_max) {
            (None, None) => None,
            (lo, hi) => {
                let lo = lo.unwrap_or(f32::NEG_INFINITY);
                let hi = hi.unwrap_or(f32::INFINITY);
                if lo > hi {
                    return Err(ConfigError::Invalid(format!(
                        "edit.density_min ({lo}) exceeds edit.density_max ({hi})"
                    )));
                }
                Some((lo, hi))
            }
        };
        let params = Self::from_sections(cfg, density_clamp);
        params.validate()?;
        Ok(params)
    }

    fn from_sections(cfg: &TerrainConfig, density_clamp: Option<(f32, f32)>) -> Self {
        let mode = match cfg.noise.mode {
            Mode::Planet => FieldMode::Planet,
            Mode::Sphere => FieldMode::Sphere {
                radius: cfg.noise.sphere_radius,
            },
        };
        Self {
            chunks_per_axis: cfg.grid.chunks_per_axis,
            points_per_axis: cfg.grid.points_per_axis,
            bounds_size: cfg.grid.bounds_size,
            iso_level: cfg.surface.iso_level,
            flat_shading: cfg.surface.flat_shading,
            mode,
            seed: cfg.noise.seed,
            height_multiplier: cfg.noise.height_multiplier,
            fractal: cfg.noise.fractal.clone(),
            blur_enable: cfg.blur.enable,
            blur_radius: cfg.blur.radius,
            edit_delta_time: cfg.edit.delta_time,
            falloff_start: cfg.edit.falloff_start,
            density_clamp,
            max_triangles_per_chunk: cfg.mesh.max_triangles_per_chunk,
            worker_threads: cfg.runtime.worker_threads,
        }
    }

    /// Checks the grid invariants every stage relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chunks_per_axis == 0 {
            return Err(ConfigError::Invalid("grid.chunks_per_axis must be >= 1".into()));
        }
        if self.points_per_axis < 2 {
            return Err(ConfigError::Invalid("grid.points_per_axis must be >= 2".into()));
        }
        if !(self.bounds_size.is_finite() && self.bounds_size > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "grid.bounds_size must be positive, got {}",
                self.bounds_size
            )));
        }
        let samples = self.chunks_per_axis * (self.points_per_axis - 1) + 1;
        if samples.checked_pow(3).is_none_or(|n| n > u32::MAX as usize) {
            return Err(ConfigError::Invalid(format!(
                "grid of {samples}^3 samples is too large"
            )));
        }
        Ok(())
    }
}

pub fn parse_config(s: &str) -> Result<TerrainConfig, ConfigError> {
    Ok(toml::from_str(s)?)
}

pub fn load_config_from_path(path: &Path) -> Result<TerrainConfig, ConfigError> {
    let s = fs::read_to_string(path)?;
    parse_config(&s)
}

pub fn load_params_from_path(path: &Path) -> Result<TerrainParams, ConfigError> {
    let cfg = load_config_from_path(path)?;
    TerrainParams::from_config(&cfg)
}
