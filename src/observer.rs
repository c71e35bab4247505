use ndarray::ArrayView1;

/// Receives one report per iteration: the iteration number and the vertex
/// currently ranked best. Observers are injected into
/// [`minimize_observed`](crate::NelderMead::minimize_observed), so the
/// algorithm itself never prints or logs.
pub trait Observer {
    fn observe(&mut self, iteration: usize, best: ArrayView1<f64>, cost: f64);
}

/// Drops every report. What [`minimize`](crate::NelderMead::minimize) uses.
pub struct Silent;

impl Observer for Silent {
    fn observe(&mut self, _iteration: usize, _best: ArrayView1<f64>, _cost: f64) {}
}

/// Forwards every report to `tracing` at debug level.
pub struct Traced;

impl Observer for Traced {
    fn observe(&mut self, iteration: usize, best: ArrayView1<f64>, cost: f64) {
        tracing::debug!(iteration, cost, best = %best, "simplex iteration");
    }
}

/// Adapts a closure into an observer.
pub struct Callback<F>(pub F);

impl<F: FnMut(usize, ArrayView1<f64>, f64)> Observer for Callback<F> {
    fn observe(&mut self, iteration: usize, best: ArrayView1<f64>, cost: f64) {
        (self.0)(iteration, best, cost)
    }
}
