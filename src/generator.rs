use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use crate::algorithm::{grow, AlgorithmKind, GrowthParams};
use crate::error::{GenError, StageError};
use crate::grid::{Grid, Label};
use crate::options::{GenerationOptions, LakeStyle, SeaStyle};
use crate::distance::detect_distance;
use crate::region::{RegionKind, RegionTracker, Regions};

/// Lake seed candidates tried per grid cell before the search gives up.
pub const SEED_ATTEMPTS_PER_CELL: usize = 10;

pub struct GenContext {
    pub grid: Grid,
    pub rng: ChaCha8Rng,
    pub regions: Regions,
}

impl GenContext {
    pub fn new(options: &GenerationOptions) -> Result<Self, GenError> {
        options.validate()?;
        let mut rng = ChaCha8Rng::seed_from_u64(options.seed);
        for _ in 0..options.seed_warmup_draws {
            rng.next_u32();
        }
        let grid = Grid::new(options.width, options.height, options.default_land_label);
        let regions = Regions {
            land: RegionTracker::full(grid.len()),
            ..Default::default()
        };
        Ok(GenContext { grid, rng, regions })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    pub sea: Option<StageError>,
    pub lake: Option<StageError>,
    pub lake_seed: Option<usize>,
}

impl GenerationReport {
    pub fn is_clean(&self) -> bool {
        self.sea.is_none() && self.lake.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub grid: Grid,
    pub land: RegionTracker,
    pub sea: RegionTracker,
    pub lake: RegionTracker,
    pub report: GenerationReport,
}

pub struct MapGenerator {
    options: GenerationOptions,
}

impl MapGenerator {
    pub fn new(options: GenerationOptions) -> Self {
        MapGenerator { options }
    }

    /// Runs every stage. Stage failures are logged and recorded in the
    /// report; only invalid options fail the run.
    pub fn generate(&self) -> Result<GenerationResult, GenError> {
        let mut ctx = GenContext::new(&self.options)?;
        let cells = ctx.grid.len();
        let mut report = GenerationReport::default();

        // Sea
        if let Err(err) = self.generate_sea(&mut ctx) {
            log::error!("sea generation failed: {err}");
            report.sea = Some(err);
        }
        ctx.regions.rebuild_land(cells);
        log::debug!(
            "sea placed {} cells, {} land left",
            ctx.regions.sea.len(),
            ctx.regions.land.len()
        );

        // Lake
        match self.generate_lake(&mut ctx) {
            Ok(seed) => report.lake_seed = seed,
            Err(err) => {
                log::error!("lake generation failed: {err}");
                report.lake = Some(err);
            }
        }
        ctx.regions.rebuild_land(cells);
        log::debug!(
            "lake placed {} cells, {} land left",
            ctx.regions.lake.len(),
            ctx.regions.land.len()
        );

        let GenContext { grid, regions, .. } = ctx;
        Ok(GenerationResult {
            grid,
            land: regions.land,
            sea: regions.sea,
            lake: regions.lake,
            report,
        })
    }

    fn generate_sea(&self, ctx: &mut GenContext) -> Result<(), StageError> {
        let sea = &self.options.sea;
        if sea.count == 0 {
            return Ok(());
        }
        if sea.count >= ctx.grid.len() {
            return Err(StageError::CountTooLarge {
                count: sea.count,
                cells: ctx.grid.len(),
            });
        }
        if sea.style == SeaStyle::Sharp {
            log::warn!("sharp sea style has no dedicated generator, using normal erosion");
        }

        let (x, y) = sea.direction.edge_point(&mut ctx.rng, ctx.grid.width, ctx.grid.height);
        let start = y * ctx.grid.width + x;
        ctx.grid.set(start, sea.label);
        ctx.regions.get_mut(RegionKind::Sea).insert(start);

        let params = GrowthParams {
            count: sea.count - 1,
            fill_label: sea.label,
            blocked: vec![self.options.lake.label],
            bias_percent: sea.bias_percent,
            source: sea.direction,
        };
        self.grow_region(ctx, AlgorithmKind::Erode, RegionKind::Sea, &params)
    }

    fn generate_lake(&self, ctx: &mut GenContext) -> Result<Option<usize>, StageError> {
        let lake = &self.options.lake;
        if lake.count == 0 {
            return Ok(None);
        }
        if lake.count >= ctx.grid.len() {
            return Err(StageError::CountTooLarge {
                count: lake.count,
                cells: ctx.grid.len(),
            });
        }

        let water = [self.options.sea.label, lake.label];
        let start = find_seed_away_from(
            &ctx.grid,
            &ctx.regions.land,
            &mut ctx.rng,
            &water,
            lake.min_distance_from_water,
        )?;
        ctx.grid.set(start, lake.label);
        ctx.regions.get_mut(RegionKind::Lake).insert(start);

        let kind = match lake.style {
            LakeStyle::Flood => AlgorithmKind::Flood,
        };
        let params = GrowthParams {
            count: lake.count - 1,
            fill_label: lake.label,
            blocked: vec![self.options.sea.label],
            bias_percent: 0,
            source: self.options.sea.direction,
        };
        self.grow_region(ctx, kind, RegionKind::Lake, &params)?;
        Ok(Some(start))
    }

    // Grows `region` from its current members, adding every new cell to it.
    fn grow_region(
        &self,
        ctx: &mut GenContext,
        kind: AlgorithmKind,
        region: RegionKind,
        params: &GrowthParams,
    ) -> Result<(), StageError> {
        let frontier = ctx.regions.get(region).members().to_vec();
        let GenContext { grid, rng, regions } = ctx;
        let placed = grow(kind, grid, &frontier, rng, params, |index| {
            regions.get_mut(region).insert(index);
        })?;
        log::debug!("{region:?} grew by {placed} cells");
        Ok(())
    }
}

/// Samples `land` until a cell has none of `water` within `min_distance`
/// steps along any axis. Gives up after `SEED_ATTEMPTS_PER_CELL` tries per
/// grid cell.
pub fn find_seed_away_from(
    grid: &Grid,
    land: &RegionTracker,
    rng: &mut impl Rng,
    water: &[Label],
    min_distance: usize,
) -> Result<usize, StageError> {
    let attempts = grid.len() * SEED_ATTEMPTS_PER_CELL;
    for _ in 0..attempts {
        let candidate = land.sample(rng).ok_or(StageError::NoLandAvailable)?;
        let (x, y) = grid.position(candidate);
        let clear = detect_distance(grid, x, y, water, min_distance)
            .is_some_and(|offset| offset.min() >= min_distance);
        if clear {
            return Ok(candidate);
        }
    }
    Err(StageError::SeedSearchExhausted { attempts })
}

pub fn generate(options: &GenerationOptions) -> Result<GenerationResult, GenError> {
    MapGenerator::new(options.clone()).generate()
}

pub fn generate_many(options: &[GenerationOptions]) -> Vec<Result<GenerationResult, GenError>> {
    options.par_iter().map(generate).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::direction::Direction;
    use crate::error::GrowthError;

    fn small_options() -> GenerationOptions {
        let mut options = GenerationOptions::new(24, 24, 42);
        options.sea.count = 120;
        options.sea.direction = Direction::Left;
        options.lake.count = 12;
        options.lake.min_distance_from_water = 2;
        options
    }

    #[test]
    fn test_context_starts_all_land() {
        let ctx = GenContext::new(&small_options()).unwrap();
        assert_eq!(ctx.grid.count_label(0), 24 * 24);
        assert_eq!(ctx.regions.land.len(), 24 * 24);
        assert!(ctx.regions.sea.is_empty());
    }

    #[test]
    fn test_warmup_changes_stream() {
        let mut options = small_options();
        let a = generate(&options).unwrap();
        options.seed_warmup_draws = 3;
        let b = generate(&options).unwrap();
        assert_ne!(a.grid, b.grid);
    }

    #[test]
    fn test_generate_clean_run() {
        let result = generate(&small_options()).unwrap();
        assert!(result.report.is_clean(), "{:?}", result.report);
        assert_eq!(result.sea.len(), 120);
        assert_eq!(result.lake.len(), 12);
        assert_eq!(result.land.len(), 24 * 24 - 132);
        let seed = result.report.lake_seed.unwrap();
        assert!(result.lake.contains(seed));
    }

    #[test]
    fn test_sea_too_large_is_not_fatal() {
        let mut options = small_options();
        options.sea.count = 24 * 24;
        let result = generate(&options).unwrap();
        assert_eq!(
            result.report.sea,
            Some(StageError::CountTooLarge { count: 576, cells: 576 })
        );
        assert!(result.sea.is_empty());
        assert_eq!(result.lake.len(), 12);
    }

    #[test]
    fn test_zero_counts_skip_stages() {
        let mut options = small_options();
        options.sea.count = 0;
        options.lake.count = 0;
        let result = generate(&options).unwrap();
        assert!(result.report.is_clean());
        assert_eq!(result.report.lake_seed, None);
        assert_eq!(result.land.len(), 24 * 24);
    }

    #[test]
    fn test_lake_search_exhausts() {
        // One column with sea at the bottom: every land cell sees it.
        let mut options = GenerationOptions::new(1, 8, 5);
        options.sea.direction = Direction::Bottom;
        options.sea.count = 1;
        options.lake.count = 2;
        options.lake.min_distance_from_water = 20;
        let result = generate(&options).unwrap();
        assert!(result.report.sea.is_none());
        assert_eq!(
            result.report.lake,
            Some(StageError::SeedSearchExhausted { attempts: 80 })
        );
        assert!(result.lake.is_empty());
        assert_eq!(result.land.len(), 7);
    }

    #[test]
    fn test_lake_flood_budget_reported() {
        // Three land cells cannot hold a four cell lake.
        let mut options = GenerationOptions::new(5, 1, 9);
        options.sea.direction = Direction::Left;
        options.sea.count = 2;
        options.sea.bias_percent = 98;
        options.lake.count = 4;
        options.lake.min_distance_from_water = 0;
        let result = generate(&options).unwrap();
        assert_eq!(result.sea.len(), 2);
        assert!(matches!(
            result.report.lake,
            Some(StageError::Growth(GrowthError::BudgetExhausted { placed: 2, requested: 3 }))
        ));
        assert_eq!(result.lake.len(), 3);
        assert!(result.land.is_empty());
    }

    #[test]
    fn test_invalid_options_fail_run() {
        let options = GenerationOptions::new(10, 0, 1);
        assert!(matches!(
            generate(&options),
            Err(GenError::InvalidDimensions { .. })
        ));
    }
}
