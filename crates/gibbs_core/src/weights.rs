//! Frequency-domain blend weights for combining the two 1D corrections.
//!
//! Weights are defined on the centered spectrum grid. Interior points weight
//! each axis' correction by the cosine term of the *other* axis (Kellner et
//! al., 2016), so the axis-1 correction dominates where the axis-1 frequency
//! is high and the axis-0 one is low.

use ndarray::Array2;

use crate::float_trait::GibbsFloat;

/// Pair of blending masks over the centered spectrum.
#[derive(Debug, Clone, PartialEq)]
pub struct BlendWeights<F: GibbsFloat> {
    /// Weights for the image corrected along axis 0.
    pub g0: Array2<F>,
    /// Weights for the image corrected along axis 1.
    pub g1: Array2<F>,
}

impl<F: GibbsFloat> BlendWeights<F> {
    /// Compute the weights for a `rows x cols` image plane.
    pub fn new(rows: usize, cols: usize) -> Self {
        blend_weights(rows, cols)
    }

    pub fn dim(&self) -> (usize, usize) {
        self.g0.dim()
    }
}

/// `n` angular frequencies evenly spaced over [-pi, pi] (endpoints included).
fn angular_grid<F: GibbsFloat>(n: usize) -> Vec<F> {
    if n == 1 {
        return vec![-F::PI];
    }
    let step = (F::PI + F::PI) / F::usize_as(n - 1);
    (0..n).map(|i| -F::PI + step * F::usize_as(i)).collect()
}

/// Compute the blend weights `(G0, G1)` for a `rows x cols` plane.
pub fn blend_weights<F: GibbsFloat>(rows: usize, cols: usize) -> BlendWeights<F> {
    let mut g0 = Array2::<F>::zeros((rows, cols));
    let mut g1 = Array2::<F>::zeros((rows, cols));

    if rows == 0 || cols == 0 {
        return BlendWeights { g0, g1 };
    }

    let k0: Vec<F> = angular_grid(rows);
    let k1: Vec<F> = angular_grid(cols);
    let last_r = rows - 1;
    let last_c = cols - 1;

    for r in 1..last_r {
        let c0 = F::one() + k0[r].cos();
        for c in 1..last_c {
            let c1 = F::one() + k1[c].cos();
            let total = c0 + c1;
            g1[[r, c]] = c0 / total;
            g0[[r, c]] = c1 / total;
        }
    }

    let half = F::from_f64_c(0.5);

    // Left/right borders trust the axis-1 correction fully
    for r in 1..last_r {
        g1[[r, 0]] = F::one();
        g1[[r, last_c]] = F::one();
    }
    for &(r, c) in &[(0, 0), (last_r, last_c), (0, last_c), (last_r, 0)] {
        g1[[r, c]] = half;
    }

    // Top/bottom borders trust the axis-0 correction fully
    for c in 1..last_c {
        g0[[0, c]] = F::one();
        g0[[last_r, c]] = F::one();
    }
    for &(r, c) in &[(0, 0), (last_r, last_c), (0, last_c), (last_r, 0)] {
        g0[[r, c]] = half;
    }

    BlendWeights { g0, g1 }
}
