use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::GenError;

/// 4-connected compass direction. `Top` points toward increasing `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Top,
    Right,
    Bottom,
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Top,
        Direction::Right,
        Direction::Bottom,
        Direction::Left,
    ];

    fn from_index(i: usize) -> Direction {
        Self::ALL[i % 4]
    }

    fn as_index(self) -> usize {
        self as usize
    }

    /// Folds any integer onto a direction as `abs(value) % 4`.
    pub fn normalized(value: i32) -> Direction {
        Self::from_index(value.unsigned_abs() as usize)
    }

    pub fn reverse(self) -> Direction {
        Self::from_index(self.as_index() + 2)
    }

    pub fn preferred(self) -> (Direction, Direction) {
        (
            Self::from_index(self.as_index() + 1),
            Self::from_index(self.as_index() + 3),
        )
    }

    pub fn neighbor(self, x: usize, y: usize, width: usize, height: usize) -> Option<usize> {
        let (nx, ny) = self.step(x, y, width, height)?;
        Some(ny * width + nx)
    }

    pub(crate) fn step(self, x: usize, y: usize, width: usize, height: usize) -> Option<(usize, usize)> {
        let (nx, ny) = match self {
            Direction::Top => (Some(x), y.checked_add(1)),
            Direction::Right => (x.checked_add(1), Some(y)),
            Direction::Bottom => (Some(x), y.checked_sub(1)),
            Direction::Left => (x.checked_sub(1), Some(y)),
        };
        match (nx, ny) {
            (Some(nx), Some(ny)) if nx < width && ny < height => Some((nx, ny)),
            _ => None,
        }
    }

    pub fn edge_point(self, rng: &mut impl Rng, width: usize, height: usize) -> (usize, usize) {
        match self {
            Direction::Top => (rng.gen_range(0..width), height - 1),
            Direction::Right => (width - 1, rng.gen_range(0..height)),
            Direction::Bottom => (rng.gen_range(0..width), 0),
            Direction::Left => (0, rng.gen_range(0..height)),
        }
    }
}

impl TryFrom<i32> for Direction {
    type Error = GenError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0..=3 => Ok(Self::from_index(value as usize)),
            _ => Err(GenError::InvalidDirection(value)),
        }
    }
}
