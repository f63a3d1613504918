use crate::core::state::{SharedState, StopReason};
use crate::error::DashError;
use std::io::{self, IsTerminal};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Platform side of a terminal session. Split out so tests can record calls
/// instead of touching the real tty.
pub trait TerminalOps: Send + Sync + 'static {
    fn setup(&self) -> io::Result<()>;
    fn restore(&self) -> io::Result<()>;
}

#[derive(Debug, Clone, Copy)]
pub struct CrosstermTerminalOps {
    alternate_screen: bool,
}

impl CrosstermTerminalOps {
    pub fn new(alternate_screen: bool) -> Self {
        Self { alternate_screen }
    }
}

impl Default for CrosstermTerminalOps {
    fn default() -> Self {
        Self::new(true)
    }
}

impl TerminalOps for CrosstermTerminalOps {
    fn setup(&self) -> io::Result<()> {
        use crossterm::{
            cursor, execute,
            terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen},
        };

        if !io::stdin().is_terminal() {
            return Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "stdin is not an interactive terminal",
            ));
        }

        enable_raw_mode()?;
        let entered = if self.alternate_screen {
            execute!(io::stdout(), EnterAlternateScreen, cursor::Hide)
        } else {
            execute!(io::stdout(), cursor::Hide)
        };
        if let Err(err) = entered {
            let _ = disable_raw_mode();
            return Err(err);
        }
        Ok(())
    }

    fn restore(&self) -> io::Result<()> {
        use crossterm::{
            cursor, execute,
            terminal::{disable_raw_mode, LeaveAlternateScreen},
        };

        // Best-effort restore: try all steps even if one fails.
        let mut first_err: Option<io::Error> = None;

        if let Err(err) = disable_raw_mode() {
            first_err.get_or_insert(err);
        }
        let left = if self.alternate_screen {
            execute!(io::stdout(), LeaveAlternateScreen, cursor::Show)
        } else {
            execute!(io::stdout(), cursor::Show)
        };
        if let Err(err) = left {
            first_err.get_or_insert(err);
        }

        match first_err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Cloneable handle that restores the terminal at most once.
#[derive(Clone)]
pub struct TerminalRestorer {
    restored: Arc<AtomicBool>,
    ops: Arc<dyn TerminalOps>,
}

impl TerminalRestorer {
    pub fn restore(&self) -> io::Result<()> {
        if self.restored.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        tracing::debug!("restoring terminal");
        self.ops.restore()
    }

    pub fn is_restored(&self) -> bool {
        self.restored.load(Ordering::SeqCst)
    }
}

/// Owns raw mode for as long as it lives. Only one session should exist at a
/// time since the tty mode is process-wide.
pub struct TerminalSession {
    restorer: TerminalRestorer,
}

impl TerminalSession {
    pub fn acquire(alternate_screen: bool) -> Result<Self, DashError> {
        Self::with_ops(Arc::new(CrosstermTerminalOps::new(alternate_screen)))
    }

    pub fn with_ops(ops: Arc<dyn TerminalOps>) -> Result<Self, DashError> {
        ops.setup()
            .map_err(|err| DashError::terminal_unavailable(err.to_string()))?;
        tracing::debug!("terminal session acquired");
        Ok(Self {
            restorer: TerminalRestorer {
                restored: Arc::new(AtomicBool::new(false)),
                ops,
            },
        })
    }

    pub fn restorer(&self) -> TerminalRestorer {
        self.restorer.clone()
    }

    /// Idempotent; later calls (including the one from `Drop`) are no-ops.
    pub fn release(&self) -> io::Result<()> {
        self.restorer.restore()
    }

    pub fn is_released(&self) -> bool {
        self.restorer.is_restored()
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.restorer.restore();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationSignal {
    SigInt,
    SigTerm,
}

impl TerminationSignal {
    pub fn exit_code(self) -> i32 {
        match self {
            TerminationSignal::SigInt => 130,
            TerminationSignal::SigTerm => 143,
        }
    }
}

/// Background listener that turns SIGINT/SIGTERM into a cooperative stop
/// request. Dropping it unregisters the handlers and joins the thread.
#[cfg(unix)]
pub struct SignalListener {
    handle: signal_hook::iterator::Handle,
    thread: Option<std::thread::JoinHandle<()>>,
}

#[cfg(unix)]
impl Drop for SignalListener {
    fn drop(&mut self) {
        self.handle.close();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

#[cfg(unix)]
pub fn install_termination_signals(shared: SharedState) -> io::Result<SignalListener> {
    use signal_hook::consts::signal::{SIGINT, SIGTERM};
    use signal_hook::iterator::Signals;

    let mut signals = Signals::new([SIGINT, SIGTERM])?;
    let handle = signals.handle();
    let thread = std::thread::Builder::new()
        .name("livedash-signals".to_string())
        .spawn(move || {
            for sig in signals.forever() {
                let signal = match sig {
                    SIGINT => TerminationSignal::SigInt,
                    SIGTERM => TerminationSignal::SigTerm,
                    _ => continue,
                };
                tracing::info!(?signal, "termination signal received");
                shared.request_stop(StopReason::Signal(signal));
            }
        })?;

    Ok(SignalListener {
        handle,
        thread: Some(thread),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/tui/terminal_guard.rs"]
mod tests;
