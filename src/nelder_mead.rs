//! The Nelder-Mead algorithm does not require a gradient or a hessian.
//! As a tradeoff it typically requires a lot of function evaluations to
//! find a minimum. Each iteration ranks the simplex, reflects the worst
//! vertex through the centroid of the rest and then decides between
//! keeping the reflection, expanding past it, contracting back, or
//! shrinking the whole simplex towards the best vertex.
//!
//! # Examples
//!
//! ```
//! use downhill::NelderMeadBuilder;
//! use ndarray::prelude::*;
//!
//! let function = |x: ArrayView1<f64>| (x[0] - 1.0).powi(2) + (x[1] + 2.0).powi(2);
//! let minimizer = NelderMeadBuilder::default()
//!     .ftol(1e-10)
//!     .maxiter(2000usize)
//!     .build()
//!     .unwrap();
//! let solution = minimizer.minimize(&function, array![3.0, 5.0].view()).unwrap();
//! assert!(solution.cost < 1e-6);
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use derive_builder::Builder;
use ndarray::prelude::*;

use crate::error::Error;
use crate::observer::{Observer, Silent};
use crate::simplex::Simplex;
use crate::solution::{Solution, TerminationReason};
use crate::utils::Evaluations;

#[derive(Builder, Debug, Clone)]
/// A minimizer for a scalar function of one or more variables using the
/// Nelder-Mead simplex algorithm.
pub struct NelderMead {
    /// Offset applied to each coordinate of the starting point when spanning
    /// the initial simplex. Must be nonzero; a zero step cannot span the
    /// search space.
    #[builder(default = "0.05")]
    pub step: f64,

    /// Reflection coefficient.
    #[builder(default = "1.0")]
    pub alpha: f64,

    /// Expansion coefficient.
    #[builder(default = "2.0")]
    pub gamma: f64,

    /// Contraction coefficient.
    #[builder(default = "0.5")]
    pub beta: f64,

    /// Shrink coefficient.
    #[builder(default = "0.5")]
    pub sigma: f64,

    /// Adapt the expansion, contraction and shrink coefficients to the
    /// dimensionality of the problem. Useful for high-dimensional
    /// minimization.
    #[builder(default = "false")]
    pub adaptive: bool,

    /// The maximum number of iterations to optimize. If neither maxiter nor
    /// maxfun are given, both default to n*200 where n is the number of
    /// parameters to optimize.
    #[builder(default = "None")]
    #[builder(setter(into))]
    pub maxiter: Option<usize>,

    /// The maximum number of function calls used to optimize. If neither
    /// maxiter nor maxfun are given, both default to n*200 where n is the
    /// number of parameters to optimize.
    #[builder(default = "None")]
    #[builder(setter(into))]
    pub maxfun: Option<usize>,

    /// Cost spread across the simplex below which the run counts as
    /// converged. Off unless set; without it the run stops on budget alone.
    #[builder(default = "None")]
    #[builder(setter(into))]
    pub ftol: Option<f64>,

    /// Cooperative stop flag, checked once at the top of every iteration.
    #[builder(default = "None")]
    #[builder(setter(into))]
    pub cancel: Option<Arc<AtomicBool>>,
}

impl NelderMead {
    /// Searches for the value minimizing `func` given an initial guess in
    /// the form of a point, reporting nothing along the way.
    pub fn minimize<F>(&self, func: F, x0: ArrayView1<f64>) -> Result<Solution, Error>
    where
        F: Fn(ArrayView1<f64>) -> f64,
    {
        self.minimize_observed(func, x0, &mut Silent)
    }

    /// Like [`minimize`](NelderMead::minimize), but hands every iteration's
    /// best vertex to `observer`.
    pub fn minimize_observed<F, O>(
        &self,
        func: F,
        x0: ArrayView1<f64>,
        observer: &mut O,
    ) -> Result<Solution, Error>
    where
        F: Fn(ArrayView1<f64>) -> f64,
        O: Observer + ?Sized,
    {
        let mut func = Evaluations::new(func);
        let simplex = Simplex::from_point(x0, self.step, &mut func)?;
        tracing::debug!(
            dim = simplex.dim(),
            step = self.step,
            "spanned initial simplex"
        );
        self.drive(simplex, func, observer)
    }

    /// Searches for the value minimizing `func` given an initial guess in
    /// the form of a set of coordinates, one vertex per row. The algorithm
    /// only ever explores the space spanned by these initial vectors, so
    /// parameter restrictions that place the parameters in a subspace can be
    /// enforced by passing a basis of that subspace.
    pub fn minimize_simplex<F>(
        &self,
        func: F,
        vertices: ArrayView2<f64>,
    ) -> Result<Solution, Error>
    where
        F: Fn(ArrayView1<f64>) -> f64,
    {
        let mut func = Evaluations::new(func);
        let simplex = Simplex::from_vertices(vertices, &mut func)?;
        self.drive(simplex, func, &mut Silent)
    }

    /// Resolves budget defaults that are only known once the dimension is.
    fn budgets(&self, n: usize) -> (Option<usize>, Option<usize>) {
        match (self.maxiter, self.maxfun) {
            (None, None) => (Some(200 * n), Some(200 * n)),
            given => given,
        }
    }

    fn coefficients(&self, n: usize) -> (f64, f64, f64, f64) {
        if self.adaptive {
            let dim = n as f64;
            (
                1.0,
                1.0 + 2.0 / dim,
                0.75 - 1.0 / (2.0 * dim),
                1.0 - 1.0 / dim,
            )
        } else {
            (self.alpha, self.gamma, self.beta, self.sigma)
        }
    }

    fn cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .map_or(false, |flag| flag.load(Ordering::Relaxed))
    }

    fn drive<F, O>(
        &self,
        mut simplex: Simplex,
        mut func: Evaluations<F>,
        observer: &mut O,
    ) -> Result<Solution, Error>
    where
        F: Fn(ArrayView1<f64>) -> f64,
        O: Observer + ?Sized,
    {
        let n = simplex.dim();
        let (maxiter, maxfun) = self.budgets(n);
        let (alpha, gamma, beta, sigma) = self.coefficients(n);

        let mut iterations = 0;
        let reason = loop {
            if self.cancelled() {
                break TerminationReason::Cancelled;
            }
            if maxiter.map_or(false, |limit| iterations >= limit)
                || maxfun.map_or(false, |limit| func.count() >= limit)
            {
                break TerminationReason::BudgetExhausted;
            }

            simplex.rank();
            let spread = simplex.spread();
            if self.ftol.map_or(false, |tol| spread <= tol) {
                break TerminationReason::Converged;
            }
            if spread == 0.0 {
                // Every vertex evaluates to the same cost; ranking can no
                // longer tell best from worst and further moves only shrink
                // a simplex it cannot reorder.
                tracing::warn!(
                    cost = simplex.best().cost,
                    "simplex collapsed onto a single cost"
                );
                break TerminationReason::Converged;
            }

            let best = simplex.best();
            observer.observe(iterations, best.point.view(), best.cost);

            if let Err(error) = self.transform(&mut simplex, &mut func, alpha, gamma, beta, sigma)
            {
                simplex.rank();
                return Err(error.with_best(simplex.best().clone()));
            }
            iterations += 1;
        };

        simplex.rank();
        let best = simplex.best();
        tracing::debug!(
            ?reason,
            iterations,
            evaluations = func.count(),
            cost = best.cost,
            "minimization finished"
        );
        Ok(Solution {
            point: best.point.clone(),
            cost: best.cost,
            iterations,
            evaluations: func.count(),
            reason,
        })
    }

    /// One round of the decision tree. The simplex is ranked on entry; the
    /// centroid and the reflected vertex decide between replacing the worst
    /// vertex and shrinking the whole simplex.
    fn transform<F>(
        &self,
        simplex: &mut Simplex,
        func: &mut Evaluations<F>,
        alpha: f64,
        gamma: f64,
        beta: f64,
        sigma: f64,
    ) -> Result<(), Error>
    where
        F: Fn(ArrayView1<f64>) -> f64,
    {
        let centroid = simplex.centroid();
        let reflected = simplex.trial(&centroid, alpha, func)?;

        let best = simplex.best().cost;
        let second_worst = simplex.second_worst().cost;
        let worst = simplex.worst().cost;

        if best <= reflected.cost && reflected.cost < second_worst {
            simplex.replace_worst(reflected);
        } else if reflected.cost < best {
            // The reflection beat every current vertex; try going further.
            let expanded = simplex.trial(&centroid, gamma, func)?;
            if expanded.cost < reflected.cost {
                simplex.replace_worst(expanded);
            } else {
                simplex.replace_worst(reflected);
            }
        } else {
            // reflected.cost >= second_worst
            let contracted = simplex.trial(&centroid, beta, func)?;
            if contracted.cost < worst {
                simplex.replace_worst(contracted);
            } else {
                simplex.shrink(sigma, func)?;
            }
        }
        Ok(())
    }
}
