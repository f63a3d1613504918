use super::event::Key;
use ratatui::text::Text;
use std::any::Any;

/// A region of the dashboard that can render itself and react to keys.
///
/// `render` must clear whatever dirty state `needs_update` reports, so that a
/// widget is composited only in frames where it actually changed.
pub trait Widget: Send + 'static {
    fn render(&mut self) -> Text<'static>;

    fn needs_update(&self) -> bool;

    /// Returns `true` when the key was consumed. Unrecognized keys must leave
    /// the widget untouched.
    fn handle_key(&mut self, _key: &Key) -> bool {
        false
    }
}

/// Per-widget "content is stale" marker. Starts set so the first frame paints
/// every widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirtyFlag(bool);

impl DirtyFlag {
    pub fn new() -> Self {
        Self(true)
    }

    pub fn mark(&mut self) {
        self.0 = true;
    }

    pub fn clear(&mut self) {
        self.0 = false;
    }

    pub fn is_set(&self) -> bool {
        self.0
    }
}

impl Default for DirtyFlag {
    fn default() -> Self {
        Self::new()
    }
}

/// Object-safe view of a registered widget that also allows typed downcasts.
pub(crate) trait AnyWidget: Send {
    fn widget(&self) -> &dyn Widget;
    fn widget_mut(&mut self) -> &mut dyn Widget;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<W: Widget> AnyWidget for W {
    fn widget(&self) -> &dyn Widget {
        self
    }

    fn widget_mut(&mut self) -> &mut dyn Widget {
        self
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
#[path = "../../tests/unit/core/widget.rs"]
mod tests;
