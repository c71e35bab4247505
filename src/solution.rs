use ndarray::Array1;

/// Why a minimization run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    /// The cost spread across the simplex fell below the configured
    /// tolerance, or the simplex collapsed onto a single cost.
    Converged,
    /// The iteration or evaluation budget ran out first.
    BudgetExhausted,
    /// The cancellation flag was raised between iterations.
    Cancelled,
}

/// The outcome of a minimization run.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// The best point found.
    pub point: Array1<f64>,
    /// The objective value at that point.
    pub cost: f64,
    /// The number of iterations run.
    pub iterations: usize,
    /// The number of objective evaluations performed.
    pub evaluations: usize,
    /// Why the run stopped.
    pub reason: TerminationReason,
}
