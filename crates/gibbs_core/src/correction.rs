//! 2D Gibbs removal: two 1D corrections blended in frequency space.

use ndarray::{s, Array2, Array3, ArrayView2, ArrayView3, ArrayViewD, ArrayD, Axis, Ix2, Ix3, Zip};
use rayon::prelude::*;
use tracing::debug;

use crate::config::check_spatial_shape;
use crate::error::{GibbsError, GibbsResult};
use crate::float_trait::GibbsFloat;
use crate::shift::remove_gibbs_1d;
use crate::transforms::{centered_spectrum, inverse_magnitude, Fft2dPlans};
use crate::weights::BlendWeights;

/// Suppress Gibbs ringing of a single 2D image.
///
/// The image is corrected independently along axis 1 and axis 0; the two
/// centered spectra are blended with `weights` and inverted. Shape checks
/// are the caller's job (see [`correct_2d`]).
pub fn remove_gibbs_2d<F: GibbsFloat>(
    image: ArrayView2<F>,
    n_points: usize,
    weights: &BlendWeights<F>,
    plans: &Fft2dPlans<F>,
) -> Array2<F> {
    let img_c1 = remove_gibbs_1d(image, 1, n_points, plans);
    let img_c0 = remove_gibbs_1d(image, 0, n_points, plans);

    let mut blended = centered_spectrum(img_c1.view(), plans);
    let c0 = centered_spectrum(img_c0.view(), plans);

    Zip::from(&mut blended)
        .and(&c0)
        .and(&weights.g1)
        .and(&weights.g0)
        .for_each(|b, &c0, &g1, &g0| {
            *b = *b * g1 + c0 * g0;
        });

    inverse_magnitude(blended, plans)
}

/// Suppress Gibbs ringing of a batch of 2D images stacked along axis 2.
///
/// Slices are processed in parallel on the current rayon pool; each slice
/// is computed sequentially so the output does not depend on scheduling.
pub fn remove_gibbs_stack<F: GibbsFloat>(
    stack: ArrayView3<F>,
    n_points: usize,
    weights: &BlendWeights<F>,
    plans: &Fft2dPlans<F>,
) -> Array3<F> {
    let (rows, cols, n) = stack.dim();

    let results: Vec<Array2<F>> = (0..n)
        .into_par_iter()
        .map(|i| remove_gibbs_2d(stack.index_axis(Axis(2), i), n_points, weights, plans))
        .collect();

    let mut output = Array3::<F>::zeros((rows, cols, n));
    for (i, res) in results.into_iter().enumerate() {
        output.slice_mut(s![.., .., i]).assign(&res);
    }
    output
}

/// Suppress Gibbs ringing of a 2D image or a 3D batch of 2D images stacked
/// along the last axis.
///
/// `weights` may be precomputed for the first two dimensions and reused
/// across calls; when absent they are computed here.
pub fn correct_2d<F: GibbsFloat>(
    image: ArrayViewD<F>,
    n_points: usize,
    weights: Option<&BlendWeights<F>>,
) -> GibbsResult<ArrayD<F>> {
    let rank = image.ndim();
    if rank != 2 && rank != 3 {
        debug!(rank, "rejecting image with unsupported rank");
        return Err(GibbsError::InvalidRank {
            rank,
            expected: "2D image or a 3D batch of 2D",
        });
    }

    let (rows, cols) = (image.shape()[0], image.shape()[1]);
    check_spatial_shape(rows, cols, n_points)?;

    let computed;
    let weights = match weights {
        Some(w) if w.dim() != (rows, cols) => {
            return Err(GibbsError::WeightShapeMismatch {
                expected: (rows, cols),
                got: w.dim(),
            });
        }
        Some(w) => w,
        None => {
            computed = BlendWeights::new(rows, cols);
            &computed
        }
    };

    let plans = Fft2dPlans::new(rows, cols);

    if rank == 2 {
        let image = image.into_dimensionality::<Ix2>()?;
        Ok(remove_gibbs_2d(image, n_points, weights, &plans).into_dyn())
    } else {
        let stack = image.into_dimensionality::<Ix3>()?;
        Ok(remove_gibbs_stack(stack, n_points, weights, &plans).into_dyn())
    }
}
