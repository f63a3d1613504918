/// A single keystroke as seen by widgets.
///
/// Only printable characters and a handful of control codes reach widgets;
/// navigation and function keys are dropped by the input source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Ctrl(char),
    Enter,
    Tab,
    Backspace,
}

impl Key {
    pub fn char(ch: char) -> Self {
        Key::Char(ch)
    }

    pub fn ctrl(ch: char) -> Self {
        Key::Ctrl(ch.to_ascii_lowercase())
    }

    pub fn as_char(&self) -> Option<char> {
        match self {
            Key::Char(ch) => Some(*ch),
            _ => None,
        }
    }
}

impl From<char> for Key {
    fn from(ch: char) -> Self {
        Key::Char(ch)
    }
}

/// Outcome of classifying one raw terminal event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    Quit,
    Key(Key),
    /// Read in full but not meaningful to the dashboard (arrows, F-keys, releases, resizes).
    Discarded,
}

impl KeyInput {
    pub fn is_quit(&self) -> bool {
        matches!(self, KeyInput::Quit)
    }

    pub fn as_key(&self) -> Option<&Key> {
        match self {
            KeyInput::Key(key) => Some(key),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/core/event.rs"]
mod tests;
