//! Background key polling.
//!
//! The dispatcher waits for input without holding the shared guard and only
//! locks once a key is in hand, so the frame loop is never blocked by an idle
//! keyboard.

use crate::core::event::KeyInput;
use crate::core::state::{SharedState, StopReason};
use std::io;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Where keystrokes come from. `poll_key` waits at most `timeout` and must
/// consume multi-byte sequences whole.
pub trait KeySource: Send + 'static {
    fn poll_key(&mut self, timeout: Duration) -> io::Result<Option<KeyInput>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    Idle,
    Quit,
    Handled,
    Unhandled,
    Discarded,
}

pub struct InputDispatcher<S> {
    shared: SharedState,
    source: S,
    poll_interval: Duration,
}

impl<S: KeySource> InputDispatcher<S> {
    pub fn new(shared: SharedState, source: S, poll_interval: Duration) -> Self {
        Self {
            shared,
            source,
            poll_interval,
        }
    }

    pub fn poll_once(&mut self) -> PollOutcome {
        let input = match self.source.poll_key(self.poll_interval) {
            Ok(Some(input)) => input,
            Ok(None) => return PollOutcome::Idle,
            Err(err) => {
                // A failing source may return at once; keep the retry rate bounded.
                tracing::debug!(error = %err, "input read failed; treating as no key");
                thread::sleep(self.poll_interval);
                return PollOutcome::Idle;
            }
        };

        match input {
            KeyInput::Discarded => PollOutcome::Discarded,
            KeyInput::Quit => {
                self.shared.lock().request_stop(StopReason::QuitKey);
                tracing::info!("quit key pressed");
                PollOutcome::Quit
            }
            KeyInput::Key(key) => {
                let handled = self.shared.lock().registry_mut().dispatch_key(&key);
                tracing::debug!(?key, handled, "key dispatched");
                if handled {
                    PollOutcome::Handled
                } else {
                    PollOutcome::Unhandled
                }
            }
        }
    }

    /// Polls until the shared state stops running.
    pub fn run(mut self) {
        let _fault = StopOnPanic(self.shared.clone());
        while self.shared.is_running() {
            self.poll_once();
        }
        tracing::debug!("input dispatcher stopped");
    }

    pub fn spawn(self) -> io::Result<InputHandle> {
        let shared = self.shared.clone();
        let thread = thread::Builder::new()
            .name("livedash-input".to_string())
            .spawn(move || self.run())?;
        Ok(InputHandle {
            shared,
            thread: Some(thread),
        })
    }
}

/// A widget panicking inside `handle_key` must still bring the frame loop down.
struct StopOnPanic(SharedState);

impl Drop for StopOnPanic {
    fn drop(&mut self) {
        if thread::panicking() {
            self.0.request_stop(StopReason::Fault);
        }
    }
}

/// Owns the input thread. Dropping it stops and joins the thread.
pub struct InputHandle {
    shared: SharedState,
    thread: Option<JoinHandle<()>>,
}

impl InputHandle {
    /// Returns `Err` if the input thread panicked.
    pub fn stop(mut self) -> thread::Result<()> {
        self.shutdown()
    }

    fn shutdown(&mut self) -> thread::Result<()> {
        let Some(thread) = self.thread.take() else {
            return Ok(());
        };
        // Normally the loop already stopped; if not, the caller is unwinding.
        if self.shared.is_running() {
            self.shared.request_stop(StopReason::Fault);
        }
        thread.join()
    }
}

impl Drop for InputHandle {
    fn drop(&mut self) {
        let _ = self.shutdown();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/input.rs"]
mod tests;
