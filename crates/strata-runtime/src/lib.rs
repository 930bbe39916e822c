//! Terrain orchestration: generation, terraforming, queries, and mesh events.
#![forbid(unsafe_code)]

mod error;
mod event;
mod host;
mod terrain;
mod timings;

pub use error::TerrainError;
pub use event::TerrainEvent;
pub use host::TerrainHost;
pub use terrain::{EditReport, Terrain, TerrainStats};
pub use timings::{BuildTimings, EditTimings};
