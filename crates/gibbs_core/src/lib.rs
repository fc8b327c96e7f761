//! Gibbs Ringing Removal Core Library
//!
//! Pure Rust implementation of Gibbs ringing (truncation artefact) removal
//! for MR images based on local sub-voxel shifts (Kellner et al., 2016).
//! For each voxel a Fourier-domain sub-voxel shift minimizing local total
//! variation is searched along each image axis, and the two 1D corrections
//! are blended in frequency space.

pub mod config;
pub mod correction;
pub mod error;
pub mod float_trait;
pub mod shift;
pub mod transforms;
pub mod tv;
pub mod volume;
pub mod weights;

// Re-export commonly used types at the crate root
pub use config::GibbsConfig;
pub use correction::{correct_2d, remove_gibbs_2d, remove_gibbs_stack};
pub use error::{GibbsError, GibbsResult};
pub use float_trait::GibbsFloat;
pub use shift::{remove_gibbs_1d, SHIFT_CANDIDATES};
pub use transforms::Fft2dPlans;
pub use tv::image_tv;
pub use volume::{gibbs_removal, gibbs_removal_default};
pub use weights::{blend_weights, BlendWeights};
