use crate::algorithm::AlgorithmKind;
use crate::grid::Label;

/// Errors that abort a whole generation run before any cell is touched.
#[derive(Debug, thiserror::Error)]
pub enum GenError {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("label {label} is used by both {first} and {second}")]
    DuplicateLabel {
        label: Label,
        first: &'static str,
        second: &'static str,
    },

    #[error("unknown direction value: {0}")]
    InvalidDirection(i32),

    #[error("failed to parse generation options: {0}")]
    Options(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GrowthError {
    #[error("iteration budget exhausted after placing {placed} of {requested} cells")]
    BudgetExhausted { placed: usize, requested: usize },

    #[error("{0:?} is not implemented")]
    Unimplemented(AlgorithmKind),
}

/// Non-fatal failure of one generation stage. The run continues with partial results.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StageError {
    #[error("requested {count} cells but the grid only has {cells}")]
    CountTooLarge { count: usize, cells: usize },

    #[error(transparent)]
    Growth(#[from] GrowthError),

    #[error("no land cell left to seed from")]
    NoLandAvailable,

    #[error("no seed found after {attempts} attempts")]
    SeedSearchExhausted { attempts: usize },
}
