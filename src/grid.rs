use serde::{Deserialize, Serialize};

/// Opaque cell tag. Which value means land, sea or lake is up to the caller.
pub type Label = i32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
    pub cells: Vec<Label>,
}

impl Grid {
    pub fn new(width: usize, height: usize, fill: Label) -> Self {
        Grid {
            width,
            height,
            cells: vec![fill; width * height],
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn index(&self, x: usize, y: usize) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y * self.width + x)
        } else {
            None
        }
    }

    pub fn position(&self, index: usize) -> (usize, usize) {
        (index % self.width, index / self.width)
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Label> {
        self.index(x, y).map(|i| self.cells[i])
    }

    pub fn label(&self, index: usize) -> Label {
        self.cells[index]
    }

    pub fn set(&mut self, index: usize, label: Label) {
        self.cells[index] = label;
    }

    pub fn count_label(&self, label: Label) -> usize {
        self.cells.iter().filter(|&&c| c == label).count()
    }
}
