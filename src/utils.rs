use ndarray::ArrayView1;

use crate::error::Error;

/// Wraps the objective to count evaluations and to reject non-finite costs
/// before they can enter the simplex.
pub struct Evaluations<F> {
    count: usize,
    func: F,
}

impl<F: Fn(ArrayView1<f64>) -> f64> Evaluations<F> {
    pub fn new(func: F) -> Self {
        Evaluations { count: 0, func }
    }

    /// The number of calls made so far.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn call(&mut self, point: ArrayView1<f64>) -> Result<f64, Error> {
        self.count += 1;
        let cost = (self.func)(point);
        if cost.is_finite() {
            Ok(cost)
        } else {
            Err(Error::NonFiniteCost {
                point: point.to_owned(),
                cost,
                best: None,
            })
        }
    }
}
