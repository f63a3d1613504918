//! Framework-neutral building blocks: keys, the widget contract, the widget
//! registry, and the state shared between the input thread and the frame loop.

pub mod config;
pub mod event;
pub mod registry;
pub mod state;
pub mod widget;

pub use config::DashboardConfig;
pub use event::{Key, KeyInput};
pub use registry::{WidgetEntry, WidgetRegistry};
pub use state::{FrameClock, SharedState, StopReason, UiState};
pub use widget::{DirtyFlag, Widget};
