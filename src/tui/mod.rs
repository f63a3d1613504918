//! TUI integration layer (crossterm).
//!
//! Kept apart from `core`/`runtime` so the frame loop can be driven by test
//! doubles instead of the real tty.

pub mod crossterm;
pub mod terminal_guard;

pub use self::crossterm::CrosstermKeySource;
pub use terminal_guard::{TerminalOps, TerminalRestorer, TerminalSession, TerminationSignal};
