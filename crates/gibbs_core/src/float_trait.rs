//! Float trait abstraction for f32/f64 support.
//!
//! Every kernel in this crate is generic over the working precision. Inputs
//! narrower than single precision are expected to be promoted to `f32` by the
//! caller, so the two implementations below cover every supported dtype class.

use num_traits::{Float, FromPrimitive, NumAssign};
use rustfft::FftNum;
use std::fmt::Debug;
use std::iter::Sum;

/// Floating point types supported by the Gibbs removal pipeline.
///
/// Combines the bounds needed by the spectral transforms (`FftNum`), the
/// per-voxel arithmetic (`Float`, `NumAssign`) and parallel batch
/// processing (`Send + Sync`).
pub trait GibbsFloat:
    Float + FftNum + FromPrimitive + NumAssign + Sum + Debug + Send + Sync + 'static
{
    /// The constant PI for this float type.
    const PI: Self;

    /// Create a value from an f64 constant.
    fn from_f64_c(val: f64) -> Self;

    /// Create a value from a usize constant.
    fn usize_as(val: usize) -> Self;
}

impl GibbsFloat for f32 {
    const PI: Self = std::f32::consts::PI;

    #[inline]
    fn from_f64_c(val: f64) -> Self {
        val as f32
    }

    #[inline]
    fn usize_as(val: usize) -> Self {
        val as f32
    }
}

impl GibbsFloat for f64 {
    const PI: Self = std::f64::consts::PI;

    #[inline]
    fn from_f64_c(val: f64) -> Self {
        val
    }

    #[inline]
    fn usize_as(val: usize) -> Self {
        val as f64
    }
}
