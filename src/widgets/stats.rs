use crate::core::widget::{DirtyFlag, Widget};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span, Text};
use std::time::Duration;

pub type ClockFn = Box<dyn Fn() -> String + Send>;

fn wall_clock() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}

/// Wall-clock time, runtime and frame rate. Stale whenever the displayed
/// second changes.
pub struct StatsWidget {
    frames: u64,
    elapsed: Duration,
    clock: ClockFn,
    shown: String,
    dirty: DirtyFlag,
}

impl StatsWidget {
    pub fn new() -> Self {
        Self::with_clock(Box::new(wall_clock))
    }

    pub fn with_clock(clock: ClockFn) -> Self {
        Self {
            frames: 0,
            elapsed: Duration::ZERO,
            clock,
            shown: String::new(),
            dirty: DirtyFlag::new(),
        }
    }

    /// Does not mark the widget dirty; the next wall-clock tick picks it up.
    pub fn update_frames(&mut self, frames: u64, elapsed: Duration) {
        self.frames = frames;
        self.elapsed = elapsed;
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn fps(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.frames as f64 / secs
        } else {
            0.0
        }
    }

    pub fn invalidate(&mut self) {
        self.dirty.mark();
    }
}

impl Default for StatsWidget {
    fn default() -> Self {
        Self::new()
    }
}

fn row(label: &'static str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<8}"), Style::default().fg(Color::Cyan)),
        Span::raw(format!("{value:>10}")),
    ])
}

impl Widget for StatsWidget {
    fn render(&mut self) -> Text<'static> {
        self.dirty.clear();
        self.shown = (self.clock)();
        Text::from(vec![
            row("Time", self.shown.clone()),
            row("Runtime", format!("{}s", self.elapsed.as_secs())),
            row("FPS", format!("{:.1}", self.fps())),
        ])
    }

    fn needs_update(&self) -> bool {
        self.dirty.is_set() || (self.clock)() != self.shown
    }
}

#[cfg(test)]
#[path = "../../tests/unit/widgets/stats.rs"]
mod tests;
