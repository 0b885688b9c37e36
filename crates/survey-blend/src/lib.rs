//! Weighted blending of survey rows into one synthetic percentile
//! distribution.
//!
//! A blend combines a user-selected set of normalized survey rows under one
//! of three weighting policies (equal, incumbent-weighted, user-supplied)
//! and reports the nine blended percentile values together with summary
//! statistics and a composite confidence score.
//!
//! Weighting degradation (no incumbent data, all-zero custom weights) falls
//! back to equal weights with a logged warning; an empty selection is a
//! caller error and is rejected outright.

pub mod aggregate;
pub mod error;
pub mod weights;

pub use aggregate::{aggregate, compute_blend, round2};
pub use error::BlendError;
pub use weights::{BlendWeights, compute_weights};
