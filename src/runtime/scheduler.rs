//! Fixed-rate frame loop.
//!
//! Each processed frame takes the shared guard twice: once to advance the
//! frame counter and run the post-frame hook, once to composite dirty
//! widgets. The screen refresh happens after the guard is released, and only
//! when the compositor actually changed.

use super::input::{InputDispatcher, KeySource};
use super::pacer::FramePacer;
use crate::core::config::DEFAULT_INPUT_POLL_MS;
use crate::core::registry::WidgetRegistry;
use crate::core::state::{SharedState, StopReason};
use crate::core::widget::Widget;
use crate::error::DashError;
use crate::layout::LayoutCompositor;
use crate::tui::terminal_guard::TerminalSession;
use ratatui::backend::Backend;
use ratatui::Terminal;
use std::thread;
use std::time::{Duration, Instant};

pub type PostFrameHook = Box<dyn FnMut(&mut FrameContext<'_>) + Send>;

/// What the post-frame hook sees. The shared guard is held for its lifetime.
pub struct FrameContext<'a> {
    frame_count: u64,
    elapsed: Duration,
    registry: &'a mut WidgetRegistry,
}

impl FrameContext<'_> {
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn fps(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.frame_count as f64 / secs
        } else {
            0.0
        }
    }

    pub fn registry(&self) -> &WidgetRegistry {
        self.registry
    }

    pub fn registry_mut(&mut self) -> &mut WidgetRegistry {
        self.registry
    }

    pub fn widget_mut<W: Widget>(&mut self, name: &str) -> Option<&mut W> {
        self.registry.get_mut::<W>(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Running,
    Stopping,
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameReport {
    pub processed: bool,
    pub composited: usize,
    pub refreshed: bool,
}

pub struct FrameScheduler<B: Backend> {
    session: TerminalSession,
    terminal: Terminal<B>,
    shared: SharedState,
    compositor: LayoutCompositor,
    pacer: FramePacer,
    poll_interval: Duration,
    post_frame: Option<PostFrameHook>,
    state: SchedulerState,
    last_frame: Option<Instant>,
    refreshes: u64,
}

impl<B: Backend> FrameScheduler<B> {
    pub fn new(
        session: TerminalSession,
        terminal: Terminal<B>,
        shared: SharedState,
        compositor: LayoutCompositor,
        pacer: FramePacer,
    ) -> Self {
        Self {
            session,
            terminal,
            shared,
            compositor,
            pacer,
            poll_interval: Duration::from_millis(DEFAULT_INPUT_POLL_MS),
            post_frame: None,
            state: SchedulerState::Idle,
            last_frame: None,
            refreshes: 0,
        }
    }

    pub fn with_post_frame_hook(mut self, hook: PostFrameHook) -> Self {
        self.post_frame = Some(hook);
        self
    }

    pub fn with_input_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn shared(&self) -> &SharedState {
        &self.shared
    }

    pub fn compositor(&self) -> &LayoutCompositor {
        &self.compositor
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    pub fn session(&self) -> &TerminalSession {
        &self.session
    }

    /// Number of screen refreshes issued so far.
    pub fn refreshes(&self) -> u64 {
        self.refreshes
    }

    /// One loop iteration without the pacing sleep.
    pub fn step(&mut self, now: Instant) -> Result<FrameReport, DashError> {
        if !self.pacer.is_due(now, self.last_frame) {
            return Ok(FrameReport::default());
        }
        self.last_frame = Some(now);

        {
            let mut ui = self.shared.lock();
            let (clock, registry) = ui.clock_and_registry();
            let frame_count = clock.advance();
            if let Some(hook) = self.post_frame.as_mut() {
                let mut ctx = FrameContext {
                    frame_count,
                    elapsed: now.saturating_duration_since(clock.started()),
                    registry,
                };
                hook(&mut ctx);
            }
        }

        let composited = {
            let mut ui = self.shared.lock();
            let compositor = &mut self.compositor;
            ui.registry_mut().for_each_dirty(|entry| {
                let content = entry.widget_mut().render();
                compositor.place(entry.region(), content, entry.title(), entry.border_style())
            })?
        };

        let refreshed = self.compositor.is_changed();
        if refreshed {
            let compositor = &mut self.compositor;
            self.terminal.draw(|frame| compositor.paint(frame))?;
            self.refreshes += 1;
        }

        Ok(FrameReport {
            processed: true,
            composited,
            refreshed,
        })
    }

    /// Runs the loop until the shared state stops, then releases the terminal.
    pub fn run<S: KeySource>(&mut self, source: S) -> Result<(), DashError> {
        if self.state != SchedulerState::Idle {
            return Ok(());
        }

        let input = InputDispatcher::new(self.shared.clone(), source, self.poll_interval).spawn()?;
        self.state = SchedulerState::Running;
        tracing::info!(
            period_us = self.pacer.period().as_micros() as u64,
            "frame loop started"
        );

        let mut result = self.run_loop();
        if let Err(err) = &result {
            tracing::error!(error = %err, "frame loop failed");
            self.shared.request_stop(StopReason::Fault);
        }

        self.state = SchedulerState::Stopping;
        if let Err(payload) = input.stop() {
            let err = DashError::from_panic(payload.as_ref());
            tracing::error!(error = %err, "input thread panicked");
            result = result.and(Err(err));
        }
        self.finish();
        result
    }

    fn run_loop(&mut self) -> Result<(), DashError> {
        while self.shared.is_running() {
            let now = Instant::now();
            self.step(now)?;
            thread::sleep(self.pacer.sleep_after(now.elapsed()));
        }
        Ok(())
    }

    /// Releases the terminal and enters `Stopped`. Safe to call more than
    /// once, and after a panic unwound out of `run`.
    pub fn finish(&mut self) {
        if self.state == SchedulerState::Stopped {
            return;
        }
        self.state = SchedulerState::Stopping;
        if let Err(err) = self.session.release() {
            tracing::warn!(error = %err, "terminal restore failed");
        }
        self.state = SchedulerState::Stopped;
        tracing::info!(
            frames = self.shared.frame_count(),
            refreshes = self.refreshes,
            "frame loop stopped"
        );
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/scheduler.rs"]
mod tests;
