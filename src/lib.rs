//! Seeded generation of labelled 2D grids: a sea eroded in from one edge,
//! then a lake flooded out from a seed kept clear of the water.

pub mod algorithm;
pub mod direction;
pub mod distance;
pub mod error;
pub mod generator;
pub mod grid;
pub mod options;
pub mod region;

pub use algorithm::{erode, flood, grow, AlgorithmKind, GrowthParams};
pub use direction::Direction;
pub use distance::{detect_distance, EdgeOffset};
pub use error::{GenError, GrowthError, StageError};
pub use generator::{
    find_seed_away_from, generate, generate_many, GenContext, GenerationReport, GenerationResult,
    MapGenerator,
};
pub use grid::{Grid, Label};
pub use options::{GenerationOptions, LakeOptions, LakeStyle, SeaOptions, SeaStyle};
pub use region::{RegionKind, RegionTracker, Regions};
