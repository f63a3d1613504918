use super::registry::WidgetRegistry;
use crate::tui::terminal_guard::TerminationSignal;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    QuitKey,
    Signal(TerminationSignal),
    Fault,
}

impl StopReason {
    pub fn exit_code(self) -> i32 {
        match self {
            StopReason::QuitKey => 0,
            StopReason::Signal(signal) => signal.exit_code(),
            StopReason::Fault => 1,
        }
    }
}

/// Monotonic frame counter anchored at session start.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    started: Instant,
    frames: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(started: Instant) -> Self {
        Self { started, frames: 0 }
    }

    pub fn advance(&mut self) -> u64 {
        self.frames += 1;
        self.frames
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn started(&self) -> Instant {
        self.started
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn fps_at(&self, elapsed: Duration) -> f64 {
        let secs = elapsed.as_secs_f64();
        if secs > 0.0 {
            self.frames as f64 / secs
        } else {
            0.0
        }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything both the input path and the frame loop touch.
#[derive(Debug)]
pub struct UiState {
    running: bool,
    stop_reason: Option<StopReason>,
    clock: FrameClock,
    registry: WidgetRegistry,
}

impl UiState {
    pub fn new(registry: WidgetRegistry) -> Self {
        Self {
            running: true,
            stop_reason: None,
            clock: FrameClock::new(),
            registry,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// The first recorded reason wins; later requests only keep `running` false.
    pub fn request_stop(&mut self, reason: StopReason) {
        self.running = false;
        if self.stop_reason.is_none() {
            self.stop_reason = Some(reason);
        }
    }

    pub fn stop_reason(&self) -> Option<StopReason> {
        self.stop_reason
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut FrameClock {
        &mut self.clock
    }

    pub fn frame_count(&self) -> u64 {
        self.clock.frames()
    }

    pub fn registry(&self) -> &WidgetRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut WidgetRegistry {
        &mut self.registry
    }

    /// Split borrow used by the frame loop's hook phase.
    pub(crate) fn clock_and_registry(&mut self) -> (&mut FrameClock, &mut WidgetRegistry) {
        (&mut self.clock, &mut self.registry)
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new(WidgetRegistry::new())
    }
}

/// The single guard shared by the input thread, the frame loop and the
/// signal listener.
#[derive(Debug, Clone, Default)]
pub struct SharedState {
    inner: Arc<Mutex<UiState>>,
}

impl SharedState {
    pub fn new(state: UiState) -> Self {
        Self {
            inner: Arc::new(Mutex::new(state)),
        }
    }

    /// A panic while the guard was held must not wedge shutdown, so poisoning
    /// is ignored.
    pub fn lock(&self) -> MutexGuard<'_, UiState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_running(&self) -> bool {
        self.lock().is_running()
    }

    pub fn request_stop(&self, reason: StopReason) {
        self.lock().request_stop(reason);
    }

    pub fn frame_count(&self) -> u64 {
        self.lock().frame_count()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/core/state.rs"]
mod tests;
