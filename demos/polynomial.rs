//! Minimizes the squared residual of `5x^4 + 6x + 8` from a starting point
//! far from the minimum, printing each iteration's best vertex.

use downhill::{Callback, NelderMeadBuilder};
use ndarray::prelude::*;

fn residual(x: f64) -> f64 {
    5.0 * x.powi(4) + 6.0 * x + 8.0
}

fn main() {
    let cost = |x: ArrayView1<f64>| residual(x[0]).powi(2);

    let minimizer = NelderMeadBuilder::default()
        .step(1.0)
        .maxiter(200usize)
        .build()
        .unwrap();

    let mut progress = Callback(|iteration: usize, best: ArrayView1<f64>, cost: f64| {
        println!("iteration: {iteration} x = {} cost = {cost}", best[0]);
    });

    let solution = minimizer
        .minimize_observed(&cost, array![100.0].view(), &mut progress)
        .unwrap();

    println!(
        "minimum near x = {} (cost {}) after {} iterations and {} evaluations",
        solution.point[0], solution.cost, solution.iterations, solution.evaluations
    );
}
