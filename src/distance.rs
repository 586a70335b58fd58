use serde::{Deserialize, Serialize};

use crate::direction::Direction;
use crate::grid::{Grid, Label};

/// Per-axis distance to the nearest target label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeOffset {
    pub top: usize,
    pub right: usize,
    pub bottom: usize,
    pub left: usize,
}

impl EdgeOffset {
    pub fn min(&self) -> usize {
        self.top.min(self.right).min(self.bottom).min(self.left)
    }

    fn axis_mut(&mut self, dir: Direction) -> &mut usize {
        match dir {
            Direction::Top => &mut self.top,
            Direction::Right => &mut self.right,
            Direction::Bottom => &mut self.bottom,
            Direction::Left => &mut self.left,
        }
    }
}

/// Walks each axis out from `(x, y)` for `0..=horizon` steps and records the
/// first step landing on one of `targets`. Axes that find nothing, or that
/// run off the grid, report `horizon`. `None` when `(x, y)` is off the grid.
pub fn detect_distance(
    grid: &Grid,
    x: usize,
    y: usize,
    targets: &[Label],
    horizon: usize,
) -> Option<EdgeOffset> {
    grid.index(x, y)?;
    let mut offset = EdgeOffset {
        top: horizon,
        right: horizon,
        bottom: horizon,
        left: horizon,
    };
    // Current position per axis; None once the walk leaves the grid.
    let mut cursors = [Some((x, y)); 4];
    let mut found = [false; 4];

    for i in 0..=horizon {
        for (axis, dir) in Direction::ALL.into_iter().enumerate() {
            if found[axis] {
                continue;
            }
            if i > 0 {
                cursors[axis] = cursors[axis].and_then(|(cx, cy)| dir.step(cx, cy, grid.width, grid.height));
            }
            let Some((cx, cy)) = cursors[axis] else {
                found[axis] = true;
                continue;
            };
            if targets.contains(&grid.cells[cy * grid.width + cx]) {
                *offset.axis_mut(dir) = i;
                found[axis] = true;
            }
        }
        if found.iter().all(|&f| f) {
            break;
        }
    }
    Some(offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LAND: Label = 0;
    const SEA: Label = 1;

    #[test]
    fn test_no_target_saturates() {
        let grid = Grid::new(20, 20, LAND);
        let offset = detect_distance(&grid, 10, 10, &[SEA], 4).unwrap();
        assert_eq!(offset, EdgeOffset { top: 4, right: 4, bottom: 4, left: 4 });
    }

    #[test]
    fn test_target_exactly_at_horizon() {
        let mut grid = Grid::new(20, 20, LAND);
        let idx = grid.index(14, 10).unwrap();
        grid.set(idx, SEA);
        let offset = detect_distance(&grid, 10, 10, &[SEA], 4).unwrap();
        assert_eq!(offset.right, 4);
        assert_eq!(offset.left, 4);

        let offset = detect_distance(&grid, 10, 10, &[SEA], 5).unwrap();
        assert_eq!(offset.right, 4);
        assert_eq!(offset.top, 5);
    }

    #[test]
    fn test_axes_independent() {
        let mut grid = Grid::new(10, 10, LAND);
        let below = grid.index(5, 4).unwrap();
        grid.set(below, SEA);
        let left = grid.index(2, 5).unwrap();
        grid.set(left, SEA);
        let offset = detect_distance(&grid, 5, 5, &[SEA], 6).unwrap();
        assert_eq!(offset.bottom, 1);
        assert_eq!(offset.left, 3);
        assert_eq!(offset.top, 6);
        assert_eq!(offset.right, 6);
        assert_eq!(offset.min(), 1);
    }

    #[test]
    fn test_start_cell_counts() {
        let grid = Grid::new(3, 3, SEA);
        assert_eq!(detect_distance(&grid, 1, 1, &[SEA], 3).unwrap().min(), 0);
    }

    #[test]
    fn test_off_grid_is_not_a_target() {
        let grid = Grid::new(3, 3, LAND);
        let offset = detect_distance(&grid, 0, 0, &[SEA], 5).unwrap();
        assert_eq!(offset.min(), 5);
    }

    #[test]
    fn test_start_off_grid() {
        // x past the row end must not wrap onto the next row.
        let mut grid = Grid::new(3, 3, LAND);
        grid.set(5, SEA);
        assert_eq!(detect_distance(&grid, 5, 0, &[SEA], 2), None);
        assert_eq!(detect_distance(&grid, 0, 3, &[SEA], 2), None);
        assert!(detect_distance(&grid, 2, 2, &[SEA], 2).is_some());
    }
}
