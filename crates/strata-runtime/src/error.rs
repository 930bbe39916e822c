use strata_mesh_cpu::MeshError;
use strata_world::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TerrainError {
    #[error("terrain accessed before initialize")]
    Uninitialized,
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Mesh(#[from] MeshError),
    #[error("failed to build worker pool: {0}")]
    ThreadPool(String),
}
