use ratatui::layout::{Constraint, Direction};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegionSize {
    /// Exactly this many rows (in a column split) or columns (in a row split).
    Length(u16),
    /// Share of the remaining space, weighted against sibling fills.
    Fill(u16),
}

impl RegionSize {
    pub fn constraint(self) -> Constraint {
        match self {
            RegionSize::Length(n) => Constraint::Length(n),
            RegionSize::Fill(weight) => Constraint::Fill(weight.max(1)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Split {
    pub direction: Direction,
    pub children: Vec<Region>,
}

/// A named node of the screen layout tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Region {
    name: String,
    size: RegionSize,
    split: Option<Split>,
}

impl Region {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size: RegionSize::Fill(1),
            split: None,
        }
    }

    pub fn length(mut self, rows: u16) -> Self {
        self.size = RegionSize::Length(rows);
        self
    }

    pub fn fill(mut self, weight: u16) -> Self {
        self.size = RegionSize::Fill(weight);
        self
    }

    /// Stacks `children` top to bottom.
    pub fn split_column(self, children: impl IntoIterator<Item = Region>) -> Self {
        self.split(Direction::Vertical, children)
    }

    /// Places `children` left to right.
    pub fn split_row(self, children: impl IntoIterator<Item = Region>) -> Self {
        self.split(Direction::Horizontal, children)
    }

    fn split(mut self, direction: Direction, children: impl IntoIterator<Item = Region>) -> Self {
        self.split = Some(Split {
            direction,
            children: children.into_iter().collect(),
        });
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> RegionSize {
        self.size
    }

    pub fn children(&self) -> &[Region] {
        match &self.split {
            Some(split) => &split.children,
            None => &[],
        }
    }

    pub fn direction(&self) -> Option<Direction> {
        self.split.as_ref().map(|s| s.direction)
    }

    /// Depth-first, parent before children.
    pub fn walk(&self) -> Vec<&Region> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(region) = stack.pop() {
            out.push(region);
            stack.extend(region.children().iter().rev());
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/region.rs"]
mod tests;
