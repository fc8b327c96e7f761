//! Error types for Gibbs ringing removal.

use ndarray::ShapeError;
use thiserror::Error;

/// Result type for Gibbs removal operations
pub type GibbsResult<T> = Result<T, GibbsError>;

/// Errors surfaced to callers. Every variant aborts the current call; no
/// partial output is produced.
#[derive(Error, Debug)]
pub enum GibbsError {
    /// Slices must be enumerated by one of the first three dimensions
    #[error("slice axis {axis} is invalid: slices have to be organized along one of the 3 first dimensions")]
    InvalidSliceAxis { axis: usize },

    /// Input rank is not handled by the called stage
    #[error("expected a {expected} array, got rank {rank}")]
    InvalidRank { rank: usize, expected: &'static str },

    /// Spatial extent too small for the periodic TV neighborhood
    #[error(
        "image of shape {rows}x{cols} is too small for n_points={n_points}: both spatial extents must be at least {min}"
    )]
    DegenerateShape {
        rows: usize,
        cols: usize,
        n_points: usize,
        min: usize,
    },

    /// TV needs at least one neighbor difference
    #[error("n_points must be > 0")]
    InvalidNeighborCount,

    /// Precomputed blend weights do not cover the image plane
    #[error("blend weights have shape {got:?}, expected {expected:?}")]
    WeightShapeMismatch {
        expected: (usize, usize),
        got: (usize, usize),
    },

    /// Dedicated worker pool could not be created
    #[error("failed to build thread pool: {0}")]
    ThreadPool(String),

    /// Batch flattening or restoration failed
    #[error("shape error: {0}")]
    Shape(#[from] ShapeError),
}
