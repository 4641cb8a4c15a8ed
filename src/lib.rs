//!
//! Discrete Hidden Markov Model with multivariate emissions:
//! Forward/Backward evaluation, Viterbi decoding and Baum-Welch training.
//!
//! ```
//! use dexter::common::univariate;
//! use dexter::hmm::{Model, State};
//!
//! let mut model = Model::new(vec![
//!     State::new(0.5, vec![0.9, 0.1], vec![vec![0.9, 0.1]]),
//!     State::new(0.5, vec![0.1, 0.9], vec![vec![0.1, 0.9]]),
//! ])
//! .unwrap();
//! let seq = univariate(&[0, 0, 0, 1, 1, 1]);
//! for _ in 0..10 {
//!     model.train(&seq).unwrap();
//! }
//! let reversed = univariate(&[1, 1, 1, 0, 0, 0]);
//! assert!(model.probability(&seq).unwrap() > model.probability(&reversed).unwrap());
//! ```
//!
pub mod common;
pub mod em;
pub mod error;
pub mod hmm;
pub mod prob;
pub mod utils;

pub use error::{HmmError, Result};

#[cfg(test)]
#[macro_use]
extern crate approx;
