use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::direction::Direction;
use crate::error::GrowthError;
use crate::grid::{Grid, Label};

pub const DEFAULT_BIAS_PERCENT: u32 = 9;
pub const MAX_BIAS_PERCENT: u32 = 98;
/// Outer passes allowed per grid cell before growth gives up.
pub const PASSES_PER_CELL: usize = 100;

/// Region growth algorithms. Only `Erode` and `Flood` are implemented; the
/// others are reserved slots and report `GrowthError::Unimplemented`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlgorithmKind {
    Erode,
    Outline,
    Flood,
    Scatter,
    Smooth,
    River,
    Decorate,
}

impl AlgorithmKind {
    pub fn is_implemented(self) -> bool {
        matches!(self, AlgorithmKind::Erode | AlgorithmKind::Flood)
    }
}

#[derive(Debug, Clone)]
pub struct GrowthParams {
    pub count: usize,
    pub fill_label: Label,
    /// Labels growth never overwrites, besides `fill_label` itself.
    pub blocked: Vec<Label>,
    /// Erode only, see [`clamp_bias`].
    pub bias_percent: i32,
    /// Erode only: the edge growth came in from.
    pub source: Direction,
}

impl GrowthParams {
    fn can_fill(&self, label: Label) -> bool {
        label != self.fill_label && !self.blocked.contains(&label)
    }
}

/// Maps a configured bias onto `1..=98`; `<= 0` falls back to 9, `>= 99` to 98.
pub fn clamp_bias(bias_percent: i32) -> u32 {
    if bias_percent <= 0 {
        log::warn!("bias_percent {bias_percent} <= 0, using default {DEFAULT_BIAS_PERCENT}");
        DEFAULT_BIAS_PERCENT
    } else if bias_percent >= 99 {
        log::warn!("bias_percent {bias_percent} >= 99, using {MAX_BIAS_PERCENT}");
        MAX_BIAS_PERCENT
    } else {
        bias_percent as u32
    }
}

/// Weighted direction table: `bias` entries of `forward`, then
/// `(100 - bias) / 2` entries for each perpendicular. An odd remainder is
/// dropped, so the table may hold 99 entries.
pub fn bias_table(forward: Direction, bias: u32) -> Vec<Direction> {
    let (side_a, side_b) = forward.preferred();
    let side = ((100 - bias) / 2) as usize;
    let mut table = Vec::with_capacity(bias as usize + side * 2);
    table.extend(std::iter::repeat(forward).take(bias as usize));
    table.extend(std::iter::repeat(side_a).take(side));
    table.extend(std::iter::repeat(side_b).take(side));
    table
}

pub fn grow(
    kind: AlgorithmKind,
    grid: &mut Grid,
    frontier: &[usize],
    rng: &mut impl Rng,
    params: &GrowthParams,
    on_fill: impl FnMut(usize),
) -> Result<usize, GrowthError> {
    match kind {
        AlgorithmKind::Erode => erode(grid, frontier, rng, params, on_fill),
        AlgorithmKind::Flood => flood(grid, frontier, rng, params, on_fill),
        other => Err(GrowthError::Unimplemented(other)),
    }
}

/// Biased growth. Each frontier cell first tries to fill its neighbor toward
/// `params.source`; failing that it draws a direction from the bias table,
/// which favours moving away from the source edge.
///
/// Returns the number of cells filled. `on_fill` sees each new cell once.
pub fn erode(
    grid: &mut Grid,
    frontier: &[usize],
    rng: &mut impl Rng,
    params: &GrowthParams,
    on_fill: impl FnMut(usize),
) -> Result<usize, GrowthError> {
    let bias = clamp_bias(params.bias_percent);
    let table = bias_table(params.source.reverse(), bias);
    let source = params.source;

    grow_in_waves(grid, frontier, params, on_fill, |grid, x, y| {
        let pushed = source
            .neighbor(x, y, grid.width, grid.height)
            .filter(|&n| params.can_fill(grid.label(n)));
        if pushed.is_some() {
            return pushed;
        }
        let dir = table[rng.gen_range(0..table.len())];
        dir.neighbor(x, y, grid.width, grid.height)
            .filter(|&n| params.can_fill(grid.label(n)))
    })
}

/// Isotropic growth: each frontier cell picks one of the four directions
/// uniformly per pass.
pub fn flood(
    grid: &mut Grid,
    frontier: &[usize],
    rng: &mut impl Rng,
    params: &GrowthParams,
    on_fill: impl FnMut(usize),
) -> Result<usize, GrowthError> {
    grow_in_waves(grid, frontier, params, on_fill, |grid, x, y| {
        let dir = Direction::ALL[rng.gen_range(0..Direction::ALL.len())];
        dir.neighbor(x, y, grid.width, grid.height)
            .filter(|&n| params.can_fill(grid.label(n)))
    })
}

// Cells filled during a pass only join the frontier for the next one.
fn grow_in_waves(
    grid: &mut Grid,
    frontier: &[usize],
    params: &GrowthParams,
    mut on_fill: impl FnMut(usize),
    mut pick: impl FnMut(&Grid, usize, usize) -> Option<usize>,
) -> Result<usize, GrowthError> {
    let mut members = frontier.to_vec();
    let mut placed = 0;
    let mut budget = (grid.len() * PASSES_PER_CELL).max(1);

    while placed < params.count {
        let wave = members.len();
        for i in 0..wave {
            let (x, y) = grid.position(members[i]);
            let Some(target) = pick(&*grid, x, y) else {
                continue;
            };
            grid.set(target, params.fill_label);
            members.push(target);
            on_fill(target);
            log::trace!("filled {target} with {}", params.fill_label);
            placed += 1;
            if placed == params.count {
                break;
            }
        }
        if placed == params.count {
            break;
        }
        budget -= 1;
        if budget == 0 {
            return Err(GrowthError::BudgetExhausted {
                placed,
                requested: params.count,
            });
        }
    }
    Ok(placed)
}
