//! Named-region compositor.
//!
//! Widgets never draw directly. Their rendered content is installed into a
//! named region as a bordered panel, and the whole tree is painted in one
//! `Terminal::draw` call.

use super::region::Region;
use super::style::parse_style;
use crate::error::DashError;
use ratatui::layout::{Alignment, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Paragraph};
use ratatui::Frame;
use std::collections::{HashMap, HashSet};

/// Content installed in a region: a bordered frame with centered text.
#[derive(Clone, Debug)]
pub struct Panel {
    title: Option<String>,
    border_style: Style,
    content: Text<'static>,
}

impl Panel {
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn border_style(&self) -> Style {
        self.border_style
    }

    pub fn content(&self) -> &Text<'static> {
        &self.content
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let mut block = Block::bordered().border_style(self.border_style);
        if let Some(title) = &self.title {
            block = block.title(Line::from(Span::styled(
                title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )));
        }
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let height = u16::try_from(self.content.height())
            .unwrap_or(u16::MAX)
            .min(inner.height);
        let body = Rect::new(
            inner.x,
            inner.y + (inner.height - height) / 2,
            inner.width,
            height,
        );
        frame.render_widget(
            Paragraph::new(self.content.clone()).alignment(Alignment::Center),
            body,
        );
    }
}

#[derive(Debug, Default)]
pub struct LayoutCompositor {
    root: Option<Region>,
    regions: HashSet<String>,
    panels: HashMap<String, Panel>,
    changed: bool,
}

impl LayoutCompositor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the region tree. Panels in regions that no longer exist are dropped.
    pub fn declare(&mut self, root: Region) -> Result<(), DashError> {
        let mut names = HashSet::new();
        for region in root.walk() {
            if !names.insert(region.name().to_string()) {
                return Err(DashError::DuplicateRegion(region.name().to_string()));
            }
        }

        self.panels.retain(|name, _| names.contains(name));
        self.regions = names;
        self.root = Some(root);
        self.changed = true;
        Ok(())
    }

    pub fn root(&self) -> Option<&Region> {
        self.root.as_ref()
    }

    pub fn has_region(&self, name: &str) -> bool {
        self.regions.contains(name)
    }

    /// Installs `content` as a titled panel, replacing whatever the region held.
    pub fn place(
        &mut self,
        region: &str,
        content: Text<'static>,
        title: &str,
        border_style: &str,
    ) -> Result<(), DashError> {
        self.install(
            region,
            Panel {
                title: Some(title.to_string()),
                border_style: parse_style(border_style),
                content,
            },
        )
    }

    /// Untitled panel for content that never changes (headers, key legends).
    pub fn place_static(
        &mut self,
        region: &str,
        content: Text<'static>,
        border_style: &str,
    ) -> Result<(), DashError> {
        self.install(
            region,
            Panel {
                title: None,
                border_style: parse_style(border_style),
                content,
            },
        )
    }

    fn install(&mut self, region: &str, panel: Panel) -> Result<(), DashError> {
        if !self.regions.contains(region) {
            return Err(DashError::UnknownRegion(region.to_string()));
        }
        self.panels.insert(region.to_string(), panel);
        self.changed = true;
        Ok(())
    }

    pub fn panel(&self, region: &str) -> Option<&Panel> {
        self.panels.get(region)
    }

    pub fn content(&self, region: &str) -> Option<&Text<'static>> {
        self.panel(region).map(Panel::content)
    }

    /// Whether anything was placed since the last paint.
    pub fn is_changed(&self) -> bool {
        self.changed
    }

    /// Forces the next frame to repaint, e.g. after the terminal was resized.
    pub fn invalidate(&mut self) {
        self.changed = true;
    }

    pub fn paint(&mut self, frame: &mut Frame) {
        let area = frame.area();
        if let Some(root) = &self.root {
            self.paint_region(frame, root, area);
        }
        self.changed = false;
    }

    fn paint_region(&self, frame: &mut Frame, region: &Region, area: Rect) {
        // A panel shadows the children of its region.
        if let Some(panel) = self.panels.get(region.name()) {
            panel.render(frame, area);
            return;
        }
        let Some(direction) = region.direction() else {
            return;
        };

        let children = region.children();
        let areas = Layout::default()
            .direction(direction)
            .constraints(children.iter().map(|child| child.size().constraint()))
            .split(area);
        for (child, rect) in children.iter().zip(areas.iter()) {
            self.paint_region(frame, child, *rect);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/compositor.rs"]
mod tests;
