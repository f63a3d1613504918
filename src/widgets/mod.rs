//! Stock widgets used by the demo binary.

pub mod counter;
pub mod stats;

pub use counter::CounterWidget;
pub use stats::StatsWidget;
