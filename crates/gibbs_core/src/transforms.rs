use ndarray::{Array2, ArrayView2, Zip};
use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::sync::Arc;

use crate::float_trait::GibbsFloat;

/// Pre-computed 1D FFT plans for a 2D image plane.
///
/// Rows are transformed with plans of length `cols`, columns with plans of
/// length `rows`. Plans are shared read-only across rayon workers.
#[derive(Clone)]
pub struct Fft2dPlans<F: GibbsFloat> {
    rows: usize,
    cols: usize,
    fft_row: Arc<dyn Fft<F>>,
    fft_col: Arc<dyn Fft<F>>,
    ifft_row: Arc<dyn Fft<F>>,
    ifft_col: Arc<dyn Fft<F>>,
}

impl<F: GibbsFloat> Fft2dPlans<F> {
    pub fn new(rows: usize, cols: usize) -> Self {
        let mut planner = FftPlanner::<F>::new();
        Self {
            rows,
            cols,
            fft_row: planner.plan_fft_forward(cols),
            fft_col: planner.plan_fft_forward(rows),
            ifft_row: planner.plan_fft_inverse(cols),
            ifft_col: planner.plan_fft_inverse(rows),
        }
    }

    pub fn dim(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Plans for the transposed plane, sharing the same underlying FFTs.
    pub fn transposed(&self) -> Self {
        Self {
            rows: self.cols,
            cols: self.rows,
            fft_row: Arc::clone(&self.fft_col),
            fft_col: Arc::clone(&self.fft_row),
            ifft_row: Arc::clone(&self.ifft_col),
            ifft_col: Arc::clone(&self.ifft_row),
        }
    }

    /// In-place unnormalized forward 2D FFT.
    pub fn forward(&self, data: &mut Array2<Complex<F>>) {
        debug_assert_eq!(data.dim(), self.dim());
        transform_rows(data, &self.fft_row);
        transform_cols(data, &self.fft_col);
    }

    /// In-place inverse 2D FFT, normalized by 1/(rows*cols).
    pub fn inverse(&self, data: &mut Array2<Complex<F>>) {
        debug_assert_eq!(data.dim(), self.dim());
        transform_cols(data, &self.ifft_col);
        transform_rows(data, &self.ifft_row);

        let norm_factor = F::one() / F::usize_as(self.rows * self.cols);
        data.mapv_inplace(|v| v * norm_factor);
    }
}

fn transform_rows<F: GibbsFloat>(data: &mut Array2<Complex<F>>, plan: &Arc<dyn Fft<F>>) {
    let cols = data.ncols();
    let mut row_vec = vec![Complex::new(F::zero(), F::zero()); cols];

    for mut row in data.rows_mut() {
        for (b, &v) in row_vec.iter_mut().zip(row.iter()) {
            *b = v;
        }
        plan.process(&mut row_vec);
        for (v, &b) in row.iter_mut().zip(row_vec.iter()) {
            *v = b;
        }
    }
}

fn transform_cols<F: GibbsFloat>(data: &mut Array2<Complex<F>>, plan: &Arc<dyn Fft<F>>) {
    let rows = data.nrows();
    let mut col_vec = vec![Complex::new(F::zero(), F::zero()); rows];

    for mut col in data.columns_mut() {
        for (b, &v) in col_vec.iter_mut().zip(col.iter()) {
            *b = v;
        }
        plan.process(&mut col_vec);
        for (v, &b) in col.iter_mut().zip(col_vec.iter()) {
            *v = b;
        }
    }
}

/// Compute the unnormalized 2D FFT of a real image.
pub fn fft2d<F: GibbsFloat>(input: ArrayView2<F>, plans: &Fft2dPlans<F>) -> Array2<Complex<F>> {
    let mut spectrum = input.mapv(|v| Complex::new(v, F::zero()));
    plans.forward(&mut spectrum);
    spectrum
}

/// Swap half-spaces on both axes so the zero frequency sits at the center.
///
/// Matches `numpy.fft.fftshift` over axes (0, 1): element `i` moves to
/// `(i + n/2) % n`. For odd lengths this is not its own inverse.
pub fn fftshift2d<T: Clone>(input: &Array2<T>) -> Array2<T> {
    let (rows, cols) = input.dim();
    let row_offset = rows - rows / 2;
    let col_offset = cols - cols / 2;
    Array2::from_shape_fn((rows, cols), |(r, c)| {
        input[[(r + row_offset) % rows, (c + col_offset) % cols]].clone()
    })
}

/// Centered spectrum of a real image: `fftshift(fft2(x))`.
pub fn centered_spectrum<F: GibbsFloat>(
    input: ArrayView2<F>,
    plans: &Fft2dPlans<F>,
) -> Array2<Complex<F>> {
    fftshift2d(&fft2d(input, plans))
}

/// Magnitude of the inverse transform of a (shifted) spectrum.
///
/// Consumes the buffer; the modulus discards the linear phase introduced by
/// inverting a centered spectrum without un-shifting it.
pub fn inverse_magnitude<F: GibbsFloat>(
    mut spectrum: Array2<Complex<F>>,
    plans: &Fft2dPlans<F>,
) -> Array2<F> {
    plans.inverse(&mut spectrum);
    let mut output = Array2::<F>::zeros(spectrum.dim());
    Zip::from(&mut output)
        .and(&spectrum)
        .for_each(|o, s| *o = s.norm());
    output
}
