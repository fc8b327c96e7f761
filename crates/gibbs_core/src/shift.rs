//! Sub-voxel shift search along one image axis.
//!
//! The centered spectrum is multiplied by a linear phase ramp for every
//! candidate shift, in both directions, and each voxel keeps the shifted
//! value with the lowest local TV. The two surviving estimates are then
//! interpolated back onto the original grid.

use ndarray::{Array2, ArrayView2, Zip};
use rustfft::num_complex::Complex;

use crate::float_trait::GibbsFloat;
use crate::transforms::{centered_spectrum, fftshift2d, inverse_magnitude, Fft2dPlans};
use crate::tv::min_tv;

/// Candidate sub-voxel shifts: 45 values evenly spaced over [0.02, 0.9].
pub const SHIFT_CANDIDATES: [f64; 45] = [
    0.02, 0.04, 0.06, 0.08, 0.10, 0.12, 0.14, 0.16, 0.18, 0.20, 0.22, 0.24, 0.26, 0.28, 0.30,
    0.32, 0.34, 0.36, 0.38, 0.40, 0.42, 0.44, 0.46, 0.48, 0.50, 0.52, 0.54, 0.56, 0.58, 0.60,
    0.62, 0.64, 0.66, 0.68, 0.70, 0.72, 0.74, 0.76, 0.78, 0.80, 0.82, 0.84, 0.86, 0.88, 0.90,
];

/// Per-voxel accumulators of the shift search, in the oriented frame
/// (searched axis is axis 1).
#[derive(Debug, Clone)]
pub(crate) struct ShiftSearch<F: GibbsFloat> {
    /// Value at the best positive shift.
    pub(crate) positive: Array2<F>,
    /// Value at the best negative shift.
    pub(crate) negative: Array2<F>,
    pub(crate) shift_pos: Array2<F>,
    pub(crate) shift_neg: Array2<F>,
    pub(crate) tv_pos: Array2<F>,
    pub(crate) tv_neg: Array2<F>,
}

impl<F: GibbsFloat> ShiftSearch<F> {
    /// Zero shift, unshifted image and baseline TV in both directions.
    fn new(image: &Array2<F>, baseline_tv: Array2<F>) -> Self {
        Self {
            positive: image.clone(),
            negative: image.clone(),
            shift_pos: Array2::zeros(image.dim()),
            shift_neg: Array2::zeros(image.dim()),
            tv_pos: baseline_tv.clone(),
            tv_neg: baseline_tv,
        }
    }

    /// Keep candidates whose TV is strictly lower than the current best.
    fn update(
        best: &mut Array2<F>,
        best_shift: &mut Array2<F>,
        best_tv: &mut Array2<F>,
        candidate: &Array2<F>,
        candidate_tv: &Array2<F>,
        shift: F,
    ) {
        Zip::from(best)
            .and(best_shift)
            .and(best_tv)
            .and(candidate)
            .and(candidate_tv)
            .for_each(|value, s, tv, &c, &c_tv| {
                if *tv > c_tv {
                    *value = c;
                    *s = shift;
                    *tv = c_tv;
                }
            });
    }

    /// Interpolate the two directional estimates onto the original grid.
    ///
    /// Voxels where neither direction improved TV keep their value in
    /// `image`. Elsewhere each estimate is weighted by the opposite shift.
    fn interpolate(&self, image: &mut Array2<F>) {
        Zip::from(image)
            .and(&self.positive)
            .and(&self.negative)
            .and(&self.shift_pos)
            .and(&self.shift_neg)
            .for_each(|out, &pos, &neg, &sp, &sn| {
                let total = sp + sn;
                if total != F::zero() {
                    *out = (pos - neg) / total * sn + neg;
                }
            });
    }
}

/// Phase ramp `exp(i 2 pi k s / N)` over the centered frequency index
/// `k = -N/2, ..., N/2 - 1`.
fn phase_ramp<F: GibbsFloat>(n: usize, shift: F) -> Vec<Complex<F>> {
    let len = F::usize_as(n);
    let half = len / F::from_f64_c(2.0);
    let scale = (F::PI + F::PI) * shift / len;
    (0..n)
        .map(|j| {
            let k = F::usize_as(j) - half;
            Complex::from_polar(F::one(), k * scale)
        })
        .collect()
}

/// Magnitude image of the centered spectrum shifted along axis 1.
fn shifted_image<F: GibbsFloat>(
    spectrum: &Array2<Complex<F>>,
    ramp: &[Complex<F>],
    conjugate: bool,
    plans: &Fft2dPlans<F>,
) -> Array2<F> {
    let mut shifted = spectrum.clone();
    for mut row in shifted.rows_mut() {
        for (v, e) in row.iter_mut().zip(ramp.iter()) {
            *v = if conjugate { *v * e.conj() } else { *v * *e };
        }
    }
    inverse_magnitude(fftshift2d(&shifted), plans)
}

/// Run the full candidate search on an image already oriented so the
/// searched axis is axis 1. `plans` must match the oriented shape.
pub(crate) fn search_subvoxel_shifts<F: GibbsFloat>(
    oriented: &Array2<F>,
    n_points: usize,
    plans: &Fft2dPlans<F>,
) -> ShiftSearch<F> {
    let baseline_tv = min_tv(oriented.view(), 1, n_points);
    let spectrum = centered_spectrum(oriented.view(), plans);
    let cols = oriented.ncols();

    SHIFT_CANDIDATES
        .iter()
        .map(|&s| F::from_f64_c(s))
        .fold(ShiftSearch::new(oriented, baseline_tv), |mut state, s| {
            let ramp = phase_ramp(cols, s);

            let img_p = shifted_image(&spectrum, &ramp, false, plans);
            let tv_p = min_tv(img_p.view(), 1, n_points);
            let img_n = shifted_image(&spectrum, &ramp, true, plans);
            let tv_n = min_tv(img_n.view(), 1, n_points);

            ShiftSearch::update(
                &mut state.positive,
                &mut state.shift_pos,
                &mut state.tv_pos,
                &img_p,
                &tv_p,
                s,
            );
            ShiftSearch::update(
                &mut state.negative,
                &mut state.shift_neg,
                &mut state.tv_neg,
                &img_n,
                &tv_n,
                s,
            );
            state
        })
}

/// Suppress Gibbs oscillations along one axis using Fourier sub-shifts.
///
/// `axis == 0` corrects along rows (the image is processed transposed);
/// any other value corrects along columns. `plans` are built for the
/// image's own `(rows, cols)` shape. Both extents must be validated by the
/// caller against [`crate::config::min_spatial_extent`].
pub fn remove_gibbs_1d<F: GibbsFloat>(
    image: ArrayView2<F>,
    axis: usize,
    n_points: usize,
    plans: &Fft2dPlans<F>,
) -> Array2<F> {
    if axis == 0 {
        let mut oriented = image.t().as_standard_layout().into_owned();
        let search = search_subvoxel_shifts(&oriented, n_points, &plans.transposed());
        search.interpolate(&mut oriented);
        oriented.reversed_axes().as_standard_layout().into_owned()
    } else {
        let mut oriented = image.to_owned();
        let search = search_subvoxel_shifts(&oriented, n_points, plans);
        search.interpolate(&mut oriented);
        oriented
    }
}
