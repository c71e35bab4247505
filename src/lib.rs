//! Derivative-free minimization with the Nelder-Mead simplex method.
//!
//! A simplex of n+1 vertices walks through n-dimensional space by
//! reflecting, expanding or contracting its worst vertex through the
//! centroid of the remaining ones, shrinking towards the best vertex when
//! nothing else helps. Only objective values are used; no gradients.
//!
//! # Examples
//!
//! ```
//! use downhill::{NelderMeadBuilder, TerminationReason};
//! use ndarray::prelude::*;
//!
//! let function = |x: ArrayView1<f64>| (1.0 - x[0]).powi(2) + (2.0 - x[1]).powi(2);
//! let minimizer = NelderMeadBuilder::default()
//!     .ftol(1e-10)
//!     .maxiter(2000usize)
//!     .build()
//!     .unwrap();
//! let solution = minimizer.minimize(&function, array![-3.0, 4.5].view()).unwrap();
//! assert_eq!(solution.reason, TerminationReason::Converged);
//! assert!(solution.cost < 1e-6);
//! ```

mod error;
mod nelder_mead;
mod observer;
mod simplex;
mod solution;
mod utils;

pub use crate::error::Error;
pub use crate::nelder_mead::{NelderMead, NelderMeadBuilder};
pub use crate::observer::{Callback, Observer, Silent, Traced};
pub use crate::simplex::{Simplex, Vertex};
pub use crate::solution::{Solution, TerminationReason};
pub use crate::utils::Evaluations;
