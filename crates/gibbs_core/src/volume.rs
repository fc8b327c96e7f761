//! Volume-level Gibbs removal.
//!
//! Maps 2D images, 3D volumes and 4D volume series (e.g. one volume per
//! diffusion gradient direction) onto a batch of 2D images, runs the 2D
//! correction once on the whole batch and restores the original layout.

use std::time::Instant;

use ndarray::{ArrayD, ArrayViewD, IxDyn};
use tracing::{debug, info};

use crate::config::{check_spatial_shape, resolve_profile_timing, GibbsConfig};
use crate::correction::correct_2d;
use crate::error::{GibbsError, GibbsResult};
use crate::float_trait::GibbsFloat;
use crate::weights::BlendWeights;

/// Suppress Gibbs ringing artefacts of an image, volume or volume series.
///
/// `volume` has shape `[X, Y]`, `[X, Y, Z]` or `[X, Y, Z, G]` (with the
/// slice dimension at `config.slice_axis`, and `G` always last). The
/// output has the same shape and axis order, in standard layout.
pub fn gibbs_removal<F: GibbsFloat>(
    volume: ArrayViewD<F>,
    config: &GibbsConfig,
) -> GibbsResult<ArrayD<F>> {
    config.validate()?;

    let rank = volume.ndim();
    if !(2..=4).contains(&rank) {
        debug!(rank, "rejecting volume with unsupported rank");
        return Err(GibbsError::InvalidRank {
            rank,
            expected: "2D, 3D or 4D",
        });
    }

    let slice_axis = config.slice_axis;
    let swap = slice_axis < 2 && rank > 2;

    let mut view = volume;
    if swap {
        view.swap_axes(slice_axis, 2);
    }

    let shape = view.shape().to_vec();
    let (rows, cols) = (shape[0], shape[1]);
    check_spatial_shape(rows, cols, config.n_points)?;

    // Flatten volumes x gradient directions into one batch axis
    let batch_shape = match rank {
        4 => vec![rows, cols, shape[2] * shape[3]],
        _ => shape.clone(),
    };
    let batch = view
        .as_standard_layout()
        .into_owned()
        .into_shape(IxDyn(&batch_shape))?;

    let weights = BlendWeights::new(rows, cols);
    let started = resolve_profile_timing().then(Instant::now);

    let corrected = match config.num_threads {
        Some(num_threads) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(num_threads)
                .build()
                .map_err(|e| GibbsError::ThreadPool(e.to_string()))?;
            pool.install(|| correct_2d(batch.view(), config.n_points, Some(&weights)))?
        }
        None => correct_2d(batch.view(), config.n_points, Some(&weights))?,
    };

    if let Some(started) = started {
        info!(
            shape = ?shape,
            slice_axis,
            n_points = config.n_points,
            batch = batch_shape.get(2).copied().unwrap_or(1),
            wall_ms = started.elapsed().as_secs_f64() * 1000.0,
            "gibbs_removal"
        );
    }

    let mut restored = corrected.into_shape(IxDyn(&shape))?;
    if swap {
        restored.swap_axes(slice_axis, 2);
    }

    Ok(restored.as_standard_layout().into_owned())
}

/// [`gibbs_removal`] with slices along the third axis and three TV
/// neighbours.
pub fn gibbs_removal_default<F: GibbsFloat>(volume: ArrayViewD<F>) -> GibbsResult<ArrayD<F>> {
    gibbs_removal(volume, &GibbsConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array2, Array3, Array5, Axis};

    fn test_volume(shape: (usize, usize, usize)) -> Array3<f64> {
        Array3::from_shape_fn(shape, |(x, y, z)| {
            let inside = (3..9).contains(&x) && (4..10).contains(&y);
            1.0 + z as f64 * 0.1 + if inside { 2.0 } else { 0.0 }
        })
    }

    #[test]
    fn test_rejects_slice_axis() {
        let vol = test_volume((12, 12, 2));
        let config = GibbsConfig::new().with_slice_axis(3);
        let err = gibbs_removal(vol.view().into_dyn(), &config).unwrap_err();
        assert!(matches!(err, GibbsError::InvalidSliceAxis { axis: 3 }));
    }

    #[test]
    fn test_rejects_rank() {
        let vol = Array5::<f64>::zeros((12, 12, 2, 2, 2));
        let err = gibbs_removal_default(vol.view().into_dyn()).unwrap_err();
        assert!(matches!(err, GibbsError::InvalidRank { rank: 5, .. }));

        let line = ndarray::Array1::<f64>::zeros(12);
        let err = gibbs_removal_default(line.view().into_dyn()).unwrap_err();
        assert!(matches!(err, GibbsError::InvalidRank { rank: 1, .. }));
    }

    #[test]
    fn test_rejects_small_spatial_extent_after_swap() {
        // Slice axis 0 moves the 4-long dimension out of the image plane,
        // but the swapped-in 6-long axis is too small for n_points = 3.
        let vol = Array3::<f64>::ones((4, 12, 6));
        let config = GibbsConfig::new().with_slice_axis(0);
        let err = gibbs_removal(vol.view().into_dyn(), &config).unwrap_err();
        assert!(matches!(
            err,
            GibbsError::DegenerateShape {
                rows: 6,
                cols: 12,
                ..
            }
        ));
    }

    #[test]
    fn test_slice_axis_ignored_for_2d() {
        let image = Array2::from_shape_fn((12, 14), |(r, c)| 1.0 + ((r + c) % 3) as f64);
        let a = gibbs_removal(image.view().into_dyn(), &GibbsConfig::new().with_slice_axis(0))
            .unwrap();
        let b = gibbs_removal_default(image.view().into_dyn()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_dedicated_pool_matches_global() {
        let vol = test_volume((12, 12, 3));
        let a = gibbs_removal_default(vol.view().into_dyn()).unwrap();
        let b = gibbs_removal(vol.view().into_dyn(), &GibbsConfig::new().with_num_threads(2))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_output_is_standard_layout() {
        let vol = test_volume((5, 12, 12));
        let config = GibbsConfig::new().with_slice_axis(0);
        let out = gibbs_removal(vol.view().into_dyn(), &config).unwrap();
        assert_eq!(out.shape(), &[5, 12, 12]);
        assert!(out.is_standard_layout());
    }

    #[test]
    fn test_slices_processed_independently() {
        let vol = test_volume((12, 12, 3));
        let out = gibbs_removal_default(vol.view().into_dyn()).unwrap();
        for z in 0..3 {
            let single = gibbs_removal_default(vol.index_axis(Axis(2), z).into_dyn()).unwrap();
            assert_eq!(single, out.index_axis(Axis(2), z));
        }
    }
}
