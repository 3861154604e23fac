mod fitter;
mod grid;
mod types;

pub use fitter::{FitResult, HyperFitter, Trial};
pub use grid::GridSearch;
pub use types::{ParamSet, ParamValue, SearchSpace};

use crate::error::Result;

/// Something with named, settable hyperparameters
///
/// Implementations match on their own field names. Unknown names fail with
/// [`Error::UnknownParameter`](crate::error::Error::UnknownParameter) and out-of-range
/// values with [`Error::InvalidConfiguration`](crate::error::Error::InvalidConfiguration).
pub trait Params {
    fn set_param(&mut self, name: &str, value: &ParamValue) -> Result<()>;
}

/// A target that a [`HyperFitter`] can configure and score
pub trait Tunable {
    /// Apply every parameter of the combination, then clear all learned state
    ///
    /// A rejected value leaves the target unchanged.
    fn set_params(&mut self, params: &ParamSet) -> Result<()>;

    /// Evaluate the current configuration
    fn score(&mut self) -> Result<f64>;
}
