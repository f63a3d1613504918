use crate::core::event::{Key, KeyInput};
use crate::runtime::input::KeySource;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::io;
use std::time::Duration;

pub fn classify_event(event: Event, quit_keys: &[char]) -> KeyInput {
    match event {
        Event::Key(key) => classify_key(key, quit_keys),
        _ => KeyInput::Discarded,
    }
}

/// Esc, Ctrl-C (raw mode swallows SIGINT) and any configured quit character
/// stop the dashboard. Navigation, function and Alt-chords are dropped whole.
pub fn classify_key(event: KeyEvent, quit_keys: &[char]) -> KeyInput {
    if event.kind == KeyEventKind::Release {
        return KeyInput::Discarded;
    }

    let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);
    let alt = event.modifiers.contains(KeyModifiers::ALT);

    match event.code {
        KeyCode::Esc => KeyInput::Quit,
        KeyCode::Char(ch) if ctrl && ch.eq_ignore_ascii_case(&'c') => KeyInput::Quit,
        KeyCode::Char(ch) if ctrl => KeyInput::Key(Key::ctrl(ch)),
        KeyCode::Char(_) if alt => KeyInput::Discarded,
        KeyCode::Char(ch) if quit_keys.contains(&ch) => KeyInput::Quit,
        KeyCode::Char(ch) => KeyInput::Key(Key::Char(ch)),
        KeyCode::Enter => KeyInput::Key(Key::Enter),
        KeyCode::Tab => KeyInput::Key(Key::Tab),
        KeyCode::Backspace => KeyInput::Key(Key::Backspace),
        _ => KeyInput::Discarded,
    }
}

/// Reads keys from the process tty through crossterm's event parser, which
/// consumes escape sequences atomically.
#[derive(Debug, Clone)]
pub struct CrosstermKeySource {
    quit_keys: Vec<char>,
}

impl CrosstermKeySource {
    pub fn new(quit_keys: Vec<char>) -> Self {
        Self { quit_keys }
    }
}

impl KeySource for CrosstermKeySource {
    fn poll_key(&mut self, timeout: Duration) -> io::Result<Option<KeyInput>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        let event = event::read()?;
        Ok(Some(classify_event(event, &self.quit_keys)))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tui/crossterm.rs"]
mod tests;
