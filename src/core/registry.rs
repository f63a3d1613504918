//! Ordered widget registry.
//!
//! Registration order doubles as key-dispatch priority: the first widget that
//! consumes a key wins and later widgets never see it.

use super::event::Key;
use super::widget::{AnyWidget, Widget};
use crate::error::DashError;

/// A registered widget plus where and how it is displayed.
pub struct WidgetEntry {
    name: String,
    region: String,
    title: String,
    border_style: String,
    widget: Box<dyn AnyWidget>,
}

impl WidgetEntry {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn border_style(&self) -> &str {
        &self.border_style
    }

    pub fn widget(&self) -> &dyn Widget {
        self.widget.widget()
    }

    pub fn widget_mut(&mut self) -> &mut dyn Widget {
        self.widget.widget_mut()
    }
}

impl std::fmt::Debug for WidgetEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetEntry")
            .field("name", &self.name)
            .field("region", &self.region)
            .field("title", &self.title)
            .field("border_style", &self.border_style)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Default)]
pub struct WidgetRegistry {
    entries: Vec<WidgetEntry>,
}

impl WidgetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty `title` falls back to the title-cased widget name.
    pub fn register<W: Widget>(
        &mut self,
        name: impl Into<String>,
        widget: W,
        region: impl Into<String>,
        title: impl Into<String>,
        border_style: impl Into<String>,
    ) -> Result<(), DashError> {
        let name = name.into();
        if self.contains(&name) {
            return Err(DashError::DuplicateName(name));
        }

        let title = title.into();
        let title = if title.is_empty() {
            title_case(&name)
        } else {
            title
        };

        tracing::debug!(widget = %name, position = self.entries.len(), "widget registered");
        self.entries.push(WidgetEntry {
            name,
            region: region.into(),
            title,
            border_style: border_style.into(),
            widget: Box::new(widget),
        });
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    pub fn entry(&self, name: &str) -> Option<&WidgetEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Routes `key` to widgets in registration order until one consumes it.
    pub fn dispatch_key(&mut self, key: &Key) -> bool {
        self.entries
            .iter_mut()
            .any(|entry| entry.widget.widget_mut().handle_key(key))
    }

    /// Entries whose widget currently reports stale content, in registration
    /// order. Each call re-evaluates `needs_update`.
    pub fn dirty_mut(&mut self) -> impl Iterator<Item = &mut WidgetEntry> {
        self.entries
            .iter_mut()
            .filter(|entry| entry.widget.widget().needs_update())
    }

    pub fn for_each_dirty<E>(
        &mut self,
        mut f: impl FnMut(&mut WidgetEntry) -> Result<(), E>,
    ) -> Result<usize, E> {
        let mut visited = 0;
        for entry in self.dirty_mut() {
            f(entry)?;
            visited += 1;
        }
        Ok(visited)
    }

    pub fn get<W: Widget>(&self, name: &str) -> Option<&W> {
        self.entry(name)?.widget.as_any().downcast_ref::<W>()
    }

    pub fn get_mut<W: Widget>(&mut self, name: &str) -> Option<&mut W> {
        self.entries
            .iter_mut()
            .find(|e| e.name == name)?
            .widget
            .as_any_mut()
            .downcast_mut::<W>()
    }
}

fn title_case(name: &str) -> String {
    name.split(|c: char| c == '_' || c == '-' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
#[path = "../../tests/unit/core/registry.rs"]
mod tests;
