//! Application layer: the `Dashboard` facade and settings discovery.

pub mod dashboard;
pub mod settings;

pub use dashboard::{Dashboard, RunSummary};
pub use settings::resolve_config;
