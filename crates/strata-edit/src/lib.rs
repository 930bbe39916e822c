//! Density edits: planning, brush application, affected chunks, and revisions.
#![forbid(unsafe_code)]

mod brush;
mod plan;
mod store;
mod tool;

pub use brush::{Brush, apply_brush, brush_falloff};
pub use plan::{EditPlan, affected_chunks, plan_edit};
pub use store::{EditStore, EditStoreStats};
pub use tool::{TerraformTool, ToolMode};
