//! livedash - live keyboard-driven terminal dashboards
//!
//! Module layout:
//! - core: widget contract, registry, shared UI state, config
//! - layout: named region tree and panel compositor
//! - runtime: frame scheduler, pacing, input dispatcher
//! - tui: terminal session, signals, crossterm key source
//! - widgets: counter and statistics widgets
//! - app: `Dashboard` facade and settings discovery

pub mod app;
pub mod core;
pub mod error;
pub mod layout;
pub mod runtime;
pub mod tui;
pub mod widgets;

pub use app::{Dashboard, RunSummary};
pub use error::DashError;
