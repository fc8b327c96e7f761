//! Local total variation (TV) along one image axis.
//!
//! Each lane along the measured axis is extended periodically by
//! `n_points + 1` samples on both sides, so the first and last samples get a
//! full neighbourhood without a special edge formula.

use ndarray::{Array2, ArrayView1, ArrayView2, Axis, Zip};

use crate::float_trait::GibbsFloat;

/// Fill a pre-allocated buffer with the lane wrapped around by `pad` samples
/// on both ends: `padded[q] = lane[(q - pad) mod n]`.
#[inline]
fn fill_periodic_lane<F: GibbsFloat>(lane: ArrayView1<F>, pad: usize, padded: &mut Vec<F>) {
    let n = lane.len();
    padded.clear();
    padded.extend((0..n + 2 * pad).map(|q| lane[(q + n * (pad / n + 1) - pad) % n]));
}

/// Compute local TV of `x` along `axis` from both sides of each sample.
///
/// Returns `(ptv, ntv)` where `ptv[i] = sum_{m<n} |x[i+m] - x[i+m+1]|`
/// uses the right neighbours and `ntv[i] = sum_{m<n} |x[i-m] - x[i-m-1]|`
/// the left ones, with indices wrapped around the axis. `axis == 0` measures
/// along rows; any other value measures along columns.
pub fn image_tv<F: GibbsFloat>(
    x: ArrayView2<F>,
    axis: usize,
    n_points: usize,
) -> (Array2<F>, Array2<F>) {
    let axis = Axis(if axis == 0 { 0 } else { 1 });
    let mut ptv = Array2::<F>::zeros(x.dim());
    let mut ntv = Array2::<F>::zeros(x.dim());

    if x.is_empty() {
        return (ptv, ntv);
    }

    let pad = n_points + 1;
    let mut padded = Vec::with_capacity(x.len_of(axis) + 2 * pad);
    let mut diffs = Vec::with_capacity(x.len_of(axis) + 2 * pad);

    Zip::from(x.lanes(axis))
        .and(ptv.lanes_mut(axis))
        .and(ntv.lanes_mut(axis))
        .for_each(|lane, mut p_lane, mut n_lane| {
            fill_periodic_lane(lane, pad, &mut padded);

            // diffs[q] = |padded[q] - padded[q + 1]|
            diffs.clear();
            diffs.extend(padded.windows(2).map(|w| (w[0] - w[1]).abs()));

            for (i, (p, n)) in p_lane.iter_mut().zip(n_lane.iter_mut()).enumerate() {
                let center = pad + i;
                let mut right = F::zero();
                let mut left = F::zero();
                for m in 0..n_points {
                    right += diffs[center + m];
                    left += diffs[center - m - 1];
                }
                *p = right;
                *n = left;
            }
        });

    (ptv, ntv)
}

/// Pointwise minimum of the two directional TV fields.
pub fn min_tv<F: GibbsFloat>(x: ArrayView2<F>, axis: usize, n_points: usize) -> Array2<F> {
    let (mut ptv, ntv) = image_tv(x, axis, n_points);
    Zip::from(&mut ptv).and(&ntv).for_each(|p, &n| *p = p.min(n));
    ptv
}
