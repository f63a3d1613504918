use std::fmt;
use std::io;

/// Errors surfaced by the dashboard engine.
///
/// `DuplicateName`, `UnknownRegion` and `DuplicateRegion` are configuration
/// mistakes and are reported before the frame loop starts.
#[derive(Debug)]
pub enum DashError {
    TerminalUnavailable { reason: String },
    DuplicateName(String),
    UnknownRegion(String),
    DuplicateRegion(String),
    Io(io::Error),
    Fault(String),
}

impl DashError {
    pub fn terminal_unavailable(reason: impl Into<String>) -> Self {
        DashError::TerminalUnavailable {
            reason: reason.into(),
        }
    }

    /// Turns a caught panic payload into a `Fault` carrying its message.
    pub fn from_panic(payload: &(dyn std::any::Any + Send)) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "panic with non-string payload".to_string()
        };
        DashError::Fault(message)
    }

    /// Configuration-time errors that indicate a bug in the host application.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            DashError::DuplicateName(_) | DashError::UnknownRegion(_) | DashError::DuplicateRegion(_)
        )
    }
}

impl fmt::Display for DashError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DashError::TerminalUnavailable { reason } => {
                write!(f, "terminal unavailable: {reason}")
            }
            DashError::DuplicateName(name) => write!(f, "widget {name:?} is already registered"),
            DashError::UnknownRegion(name) => write!(f, "layout region {name:?} was never declared"),
            DashError::DuplicateRegion(name) => {
                write!(f, "layout region {name:?} is declared more than once")
            }
            DashError::Io(err) => write!(f, "terminal i/o failed: {err}"),
            DashError::Fault(message) => write!(f, "frame loop fault: {message}"),
        }
    }
}

impl std::error::Error for DashError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DashError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for DashError {
    fn from(err: io::Error) -> Self {
        DashError::Io(err)
    }
}

#[cfg(test)]
#[path = "../tests/unit/error.rs"]
mod tests;
