//! Configuration for Gibbs ringing removal.

use crate::error::{GibbsError, GibbsResult};

// =============================================================================
// Constants
// =============================================================================

/// Default axis enumerating independent slices
pub const DEFAULT_SLICE_AXIS: usize = 2;

/// Default number of neighbours used in local TV
pub const DEFAULT_N_POINTS: usize = 3;

/// Largest accepted slice axis (slices live in one of the first three dims)
const MAX_SLICE_AXIS: usize = 2;

/// Environment variable enabling per-call timing output.
const PROFILE_TIMING_ENV: &str = "GIBBS_PROFILE_TIMING";

// =============================================================================
// Types
// =============================================================================

/// Configuration for volume-level Gibbs removal.
///
/// Use `Default::default()` for standard settings (slices along the third
/// axis, three TV neighbours, global rayon pool).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GibbsConfig {
    /// Dimension (0, 1 or 2) enumerating acquired slices. Default: 2
    pub slice_axis: usize,
    /// Number of neighbour points used to access local TV. Default: 3
    pub n_points: usize,
    /// Worker count for a dedicated pool. `None` uses the global rayon pool.
    pub num_threads: Option<usize>,
}

impl Default for GibbsConfig {
    fn default() -> Self {
        Self {
            slice_axis: DEFAULT_SLICE_AXIS,
            n_points: DEFAULT_N_POINTS,
            num_threads: None,
        }
    }
}

impl GibbsConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_slice_axis(mut self, slice_axis: usize) -> Self {
        self.slice_axis = slice_axis;
        self
    }

    pub fn with_n_points(mut self, n_points: usize) -> Self {
        self.n_points = n_points;
        self
    }

    pub fn with_num_threads(mut self, num_threads: usize) -> Self {
        self.num_threads = Some(num_threads);
        self
    }

    /// Validate the configuration parameters.
    pub fn validate(&self) -> GibbsResult<()> {
        if self.slice_axis > MAX_SLICE_AXIS {
            return Err(GibbsError::InvalidSliceAxis {
                axis: self.slice_axis,
            });
        }
        if self.n_points == 0 {
            return Err(GibbsError::InvalidNeighborCount);
        }
        Ok(())
    }
}

/// Smallest spatial extent the periodic TV window supports for `n_points`.
pub fn min_spatial_extent(n_points: usize) -> usize {
    2 * (n_points + 1) + 2
}

/// Check that both spatial extents can host the TV neighbourhood.
pub fn check_spatial_shape(rows: usize, cols: usize, n_points: usize) -> GibbsResult<()> {
    if n_points == 0 {
        return Err(GibbsError::InvalidNeighborCount);
    }
    let min = min_spatial_extent(n_points);
    if rows < min || cols < min {
        return Err(GibbsError::DegenerateShape {
            rows,
            cols,
            n_points,
            min,
        });
    }
    Ok(())
}

/// Resolve whether per-call timing should be reported.
pub(crate) fn resolve_profile_timing() -> bool {
    std::env::var(PROFILE_TIMING_ENV)
        .ok()
        .map(|value| {
            let v = value.trim();
            v == "1"
                || v.eq_ignore_ascii_case("true")
                || v.eq_ignore_ascii_case("yes")
                || v.eq_ignore_ascii_case("on")
        })
        .unwrap_or(false)
}
