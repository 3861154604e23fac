use log::info;

use super::{
    grid::GridSearch,
    types::{ParamSet, SearchSpace},
    Tunable,
};
use crate::error::Result;

/// The score achieved by one parameter combination
#[derive(Debug, Clone, PartialEq)]
pub struct Trial {
    pub params: ParamSet,
    pub score: f64,
}

/// Outcome of [`HyperFitter::fit`]
#[derive(Debug, Clone, PartialEq)]
pub struct FitResult {
    /// The winning combination
    pub params: ParamSet,
    /// The score of the winning combination
    pub score: f64,
    /// Every evaluated combination, in grid order
    pub trials: Vec<Trial>,
}

/// Grid-search hyperparameter fitter
///
/// Evaluates a [`Tunable`] target under every combination of the search space, one after
/// the other, and keeps the combination with the highest score. A later combination only
/// replaces the incumbent if it scores strictly higher, so ties go to the combination that
/// comes first in grid order.
///
/// Combinations are never evaluated concurrently: the target's learned state is shared and
/// is reset between combinations.
pub struct HyperFitter<'a, T: Tunable> {
    target: &'a mut T,
    grid: GridSearch,
}

impl<'a, T: Tunable> HyperFitter<'a, T> {
    pub fn new(target: &'a mut T, space: SearchSpace) -> Self {
        Self {
            target,
            grid: GridSearch::new(space),
        }
    }

    /// Run the sweep
    ///
    /// When the sweep completes, the winning combination is applied to the target again so
    /// it is left configured with the best parameters and a fresh learned state.
    ///
    /// **Errors** on an empty search dimension before anything is evaluated. Any error while
    /// configuring or scoring a combination aborts the whole sweep.
    pub fn fit(&mut self) -> Result<FitResult> {
        let configs = self.grid.configurations()?;
        let mut trials: Vec<Trial> = Vec::with_capacity(configs.len());
        let mut best: Option<usize> = None;

        for params in configs {
            self.target.set_params(&params)?;
            let score = self.target.score()?;
            info!("trial {}: {} scored {}", trials.len(), params, score);

            if best.map_or(true, |b| score > trials[b].score) {
                best = Some(trials.len());
            }
            trials.push(Trial { params, score });
        }

        let best = best.expect("grid always has at least one configuration");
        let Trial { params, score } = trials[best].clone();
        info!("best of {} trials: {} scored {}", trials.len(), params, score);
        self.target.set_params(&params)?;

        Ok(FitResult {
            params,
            score,
            trials,
        })
    }
}
