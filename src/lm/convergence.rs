//! Stopping-criterion logic for the Levenberg-Marquardt iteration.

use ndarray::Array1;

/// The reason an iteration was judged converged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvergenceReason {
    /// The relative objective decrease of the accepted step fell below ftol.
    ObjectiveDecrease,

    /// The largest relative parameter change of the accepted step fell below
    /// xtol.
    StepSize,
}

/// Terminal and non-terminal states of the iteration.
///
/// The loop starts in `Iterating` and moves to exactly one of the three
/// terminal states; only `Converged` feeds the statistics extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IterationStatus {
    /// The iteration should continue.
    Iterating,

    /// Converged; the fit result can be extracted.
    Converged(ConvergenceReason),

    /// The trial-step bound was reached before convergence.
    MaxIterationsExceeded,

    /// Damping reached its ceiling without an accepted step.
    Diverged,
}

impl IterationStatus {
    /// True once the iteration has reached a terminal state.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, IterationStatus::Iterating)
    }
}

/// Convergence tolerances, applied on the accept path of each step.
#[derive(Debug, Clone, Copy)]
pub struct ConvergenceCriteria {
    pub ftol: f64,
    pub xtol: f64,
}

impl ConvergenceCriteria {
    /// True when the proposed step is negligible relative to the parameter
    /// magnitudes.
    ///
    /// This is meaningful on the reject path too: the damped step is a
    /// descent direction, so a step too small to improve the objective can
    /// only happen at a stationary point, which is convergence rather than
    /// divergence.
    pub fn step_negligible(&self, params: &Array1<f64>, step: &Array1<f64>) -> bool {
        let relative_step = step
            .iter()
            .zip(params.iter())
            .map(|(dp, p)| dp.abs() / p.abs().max(1.0))
            .fold(0.0_f64, f64::max);
        relative_step < self.xtol
    }

    /// Judge the step just accepted.
    ///
    /// `objective` and `new_objective` are the sums of squared residuals
    /// before and after the step; `params` are the pre-step parameters and
    /// `step` the accepted update.
    pub fn check(
        &self,
        params: &Array1<f64>,
        step: &Array1<f64>,
        objective: f64,
        new_objective: f64,
    ) -> IterationStatus {
        let relative_decrease = (objective - new_objective) / objective.max(f64::MIN_POSITIVE);
        if relative_decrease < self.ftol {
            return IterationStatus::Converged(ConvergenceReason::ObjectiveDecrease);
        }

        if self.step_negligible(params, step) {
            return IterationStatus::Converged(ConvergenceReason::StepSize);
        }

        IterationStatus::Iterating
    }
}
