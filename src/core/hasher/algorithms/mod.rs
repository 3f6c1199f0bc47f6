//! Block-value strategy implementations.

mod mean;
mod oversampled;

pub use mean::MeanBlockValue;
pub use oversampled::{OversampledMedianBlockValue, OVERSAMPLE};
