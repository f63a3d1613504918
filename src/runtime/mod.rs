//! Frame loop, pacing, and the background input thread.

pub mod input;
pub mod pacer;
pub mod scheduler;

pub use input::{InputDispatcher, InputHandle, KeySource, PollOutcome};
pub use pacer::FramePacer;
pub use scheduler::{FrameContext, FrameReport, FrameScheduler, PostFrameHook, SchedulerState};
