//! Host-facing facade: declare a layout, register widgets, run.

use crate::core::config::DashboardConfig;
use crate::core::state::{FrameClock, SharedState, StopReason, UiState};
use crate::core::widget::Widget;
use crate::error::DashError;
use crate::layout::LayoutCompositor;
use crate::runtime::input::KeySource;
use crate::runtime::pacer::FramePacer;
use crate::runtime::scheduler::{FrameContext, FrameScheduler, PostFrameHook};
use crate::tui::crossterm::CrosstermKeySource;
use crate::tui::terminal_guard::TerminalSession;
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::{Terminal, TerminalOptions, Viewport};
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Once;
use std::time::Duration;

/// Rows reserved below the prompt when running without the alternate screen.
pub const INLINE_VIEWPORT_HEIGHT: u16 = 18;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: u64,
    pub elapsed: Duration,
    pub stop_reason: StopReason,
}

impl RunSummary {
    pub fn exit_code(&self) -> i32 {
        self.stop_reason.exit_code()
    }
}

/// Dashboards currently owning a terminal. While non-zero, panic output would
/// land on the raw-mode screen, so it is logged and reported after restore.
static ACTIVE_RUNS: AtomicUsize = AtomicUsize::new(0);
static PANIC_HOOK: Once = Once::new();

/// Installs the process panic hook once; it logs while any dashboard runs and
/// defers to the previously installed hook otherwise.
fn install_panic_hook() {
    PANIC_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if ACTIVE_RUNS.load(Ordering::SeqCst) > 0 {
                tracing::error!(panic = %info, "panic in dashboard");
            } else {
                previous(info);
            }
        }));
    });
}

struct QuietPanics;

impl QuietPanics {
    fn enter() -> Self {
        install_panic_hook();
        ACTIVE_RUNS.fetch_add(1, Ordering::SeqCst);
        QuietPanics
    }
}

impl Drop for QuietPanics {
    fn drop(&mut self) {
        ACTIVE_RUNS.fetch_sub(1, Ordering::SeqCst);
    }
}

pub struct Dashboard {
    config: DashboardConfig,
    shared: SharedState,
    compositor: LayoutCompositor,
    post_frame: Option<PostFrameHook>,
}

impl Dashboard {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            config,
            shared: SharedState::new(UiState::default()),
            compositor: LayoutCompositor::new(),
            post_frame: None,
        }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn shared(&self) -> &SharedState {
        &self.shared
    }

    pub fn compositor(&self) -> &LayoutCompositor {
        &self.compositor
    }

    /// Declares regions and places static content. Call before `add_widget`.
    pub fn setup_layout<F>(&mut self, setup: F) -> Result<(), DashError>
    where
        F: FnOnce(&mut LayoutCompositor) -> Result<(), DashError>,
    {
        setup(&mut self.compositor)
    }

    pub fn add_widget<W: Widget>(
        &mut self,
        name: &str,
        widget: W,
        region: &str,
        title: &str,
        border_style: &str,
    ) -> Result<(), DashError> {
        if !self.compositor.has_region(region) {
            return Err(DashError::UnknownRegion(region.to_string()));
        }
        self.shared
            .lock()
            .registry_mut()
            .register(name, widget, region, title, border_style)
    }

    /// Runs under the shared guard once per frame, before dirty widgets are
    /// composited.
    pub fn set_post_frame_hook<F>(&mut self, hook: F)
    where
        F: FnMut(&mut FrameContext<'_>) + Send + 'static,
    {
        self.post_frame = Some(Box::new(hook));
    }

    /// Takes over the controlling terminal until a quit key, SIGINT/SIGTERM,
    /// or a fault. The terminal is restored before this returns.
    pub fn run(self) -> Result<RunSummary, DashError> {
        let session = TerminalSession::acquire(self.config.alternate_screen)?;
        let backend = CrosstermBackend::new(std::io::stdout());
        let terminal = if self.config.alternate_screen {
            Terminal::new(backend)?
        } else {
            Terminal::with_options(
                backend,
                TerminalOptions {
                    viewport: Viewport::Inline(INLINE_VIEWPORT_HEIGHT),
                },
            )?
        };

        #[cfg(unix)]
        let _signals = crate::tui::terminal_guard::install_termination_signals(self.shared.clone())?;

        let source = CrosstermKeySource::new(self.config.quit_keys.clone());
        self.run_with(session, terminal, source)
    }

    /// `run` with the terminal and key source supplied by the caller.
    pub fn run_with<B, S>(
        self,
        session: TerminalSession,
        terminal: Terminal<B>,
        source: S,
    ) -> Result<RunSummary, DashError>
    where
        B: Backend,
        S: KeySource,
    {
        let Dashboard {
            config,
            shared,
            compositor,
            post_frame,
        } = self;

        *shared.lock().clock_mut() = FrameClock::new();
        let mut scheduler = FrameScheduler::new(
            session,
            terminal,
            shared.clone(),
            compositor,
            FramePacer::new(config.frame_period()),
        )
        .with_input_poll_interval(config.input_poll_interval());
        if let Some(hook) = post_frame {
            scheduler = scheduler.with_post_frame_hook(hook);
        }

        let outcome = {
            let _quiet = QuietPanics::enter();
            panic::catch_unwind(AssertUnwindSafe(|| scheduler.run(source)))
        };

        scheduler.finish();
        let result = match outcome {
            Ok(result) => result,
            Err(payload) => {
                shared.request_stop(StopReason::Fault);
                Err(DashError::from_panic(payload.as_ref()))
            }
        };

        let ui = shared.lock();
        let summary = RunSummary {
            frames: ui.frame_count(),
            elapsed: ui.clock().elapsed(),
            stop_reason: ui.stop_reason().unwrap_or(StopReason::QuitKey),
        };
        drop(ui);

        tracing::info!(
            frames = summary.frames,
            elapsed_ms = summary.elapsed.as_millis() as u64,
            reason = ?summary.stop_reason,
            "dashboard finished"
        );

        result?;
        if summary.stop_reason == StopReason::Fault {
            return Err(DashError::Fault("input loop stopped unexpectedly".to_string()));
        }
        Ok(summary)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/app/dashboard.rs"]
mod tests;
