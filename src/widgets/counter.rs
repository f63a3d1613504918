use crate::core::event::Key;
use crate::core::widget::{DirtyFlag, Widget};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};

/// Integer counter driven by single-letter keys.
#[derive(Debug)]
pub struct CounterWidget {
    value: i64,
    last_op: String,
    dirty: DirtyFlag,
}

impl CounterWidget {
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    pub fn starting_at(value: i64) -> Self {
        Self {
            value,
            last_op: "Ready".to_string(),
            dirty: DirtyFlag::new(),
        }
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn last_op(&self) -> &str {
        &self.last_op
    }

    fn apply(&mut self, verb: &str, next: i64) {
        let prev = self.value;
        self.value = next;
        self.last_op = format!("{verb} ({prev} → {next})");
    }

    fn value_color(&self) -> Color {
        if self.value < 0 {
            Color::Red
        } else if self.value > 100 {
            Color::Yellow
        } else {
            Color::Green
        }
    }
}

impl Default for CounterWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for CounterWidget {
    fn render(&mut self) -> Text<'static> {
        self.dirty.clear();
        let dim = Style::default().add_modifier(Modifier::DIM);
        Text::from(vec![
            Line::from(Span::styled(
                "Counter Value",
                dim.add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                self.value.to_string(),
                Style::default()
                    .fg(self.value_color())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                self.last_op.clone(),
                dim.add_modifier(Modifier::ITALIC),
            )),
        ])
    }

    fn needs_update(&self) -> bool {
        self.dirty.is_set()
    }

    fn handle_key(&mut self, key: &Key) -> bool {
        let Some(ch) = key.as_char() else {
            return false;
        };
        match ch {
            'i' => self.apply("Incremented", self.value.saturating_add(1)),
            'd' => self.apply("Decremented", self.value.saturating_sub(1)),
            'm' => self.apply("Doubled", self.value.saturating_mul(2)),
            'v' => self.apply("Halved", self.value.div_euclid(2)),
            'r' => {
                self.last_op = format!("Reset (was {})", self.value);
                self.value = 0;
            }
            _ => return false,
        }
        self.dirty.mark();
        true
    }
}

#[cfg(test)]
#[path = "../../tests/unit/widgets/counter.rs"]
mod tests;
