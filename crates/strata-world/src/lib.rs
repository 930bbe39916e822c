//! Grid sizing, chunk layout, density sampling, and terrain parameters.
#![forbid(unsafe_code)]

mod chunk_coord;
mod error;
mod field;
mod noise_ctx;
mod world;
pub mod worldgen;

pub use chunk_coord::ChunkCoord;
pub use error::ConfigError;
pub use field::density_at;
pub use noise_ctx::NoiseCtx;
pub use world::{FieldMode, World};
pub use worldgen::{TerrainConfig, TerrainParams};
