use ndarray::Array1;

use crate::simplex::Vertex;

/// Failure modes of a minimization run.
///
/// Running out of budget is not a failure; that is reported through
/// [`TerminationReason`](crate::TerminationReason).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The initial point was empty, or a vertex matrix does not have one
    /// more row than it has columns.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    InvalidDimension { expected: usize, actual: usize },

    /// The initial step cannot span a simplex around the starting point.
    #[error("step size {step} produces a degenerate simplex; use a nonzero finite step")]
    DegenerateSimplex { step: f64 },

    /// The objective returned NaN or an infinity. `best` carries the best
    /// vertex with a finite cost found before the run aborted, if any
    /// iteration completed.
    #[error("objective returned a non-finite cost ({cost}) at {point}")]
    NonFiniteCost {
        point: Array1<f64>,
        cost: f64,
        best: Option<Box<Vertex>>,
    },
}

impl Error {
    /// Attaches the best valid vertex to an abort raised mid-run.
    pub(crate) fn with_best(self, vertex: Vertex) -> Self {
        match self {
            Error::NonFiniteCost { point, cost, .. } => Error::NonFiniteCost {
                point,
                cost,
                best: Some(Box::new(vertex)),
            },
            other => other,
        }
    }
}
