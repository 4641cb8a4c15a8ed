//!
//! Discrete HMM calculation
//!
//! # Overview of calculation
//!
//! x = x[0],...,x[T-1] : Points (multivariate emissions) of length T
//!
//! e_s(x[t]) = \prod_d E_s[d][x[t][d]] : emission likelihood of state s
//!
//! Forward
//! F[t][s]
//!  = P(emits x[0:t+1]=x[0],...,x[t] and ends at s) for 0<=t<T
//!
//! Backward
//! B[t][s]
//!  = P(emits x[t:T] | in s just before x[t]) for 0<=t<=T
//!  (B[T][s] = 1)
//!
//! Occupation (gamma)
//! G[t][s]
//!  = P(in s at t | x)
//!  = F[t][s] B[t+1][s] / P(x)
//!
//! Transition occupation (xi)
//! X[t][k][l]
//!  = P(in k at t and in l at t+1 | x)
//!  = F[t][k] A[k][l] e_l(x[t+1]) B[t+2][l] / P(x)
//!
//! Every table is a dense `Table` with one row per time step and one
//! column per state index, filled bottom-up.
//!
pub mod backward;
pub mod distribution;
pub mod forward;
pub mod freq;
pub mod mocks;
pub mod model;
pub mod params;
pub mod sample;
pub mod state;
pub mod table;
pub mod train;
pub mod viterbi;

pub use distribution::Distribution;
pub use model::Model;
pub use params::TrainParams;
pub use state::State;
pub use table::Table;
