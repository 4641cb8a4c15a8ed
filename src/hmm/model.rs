//!
//! Definition of HMM Model
//!
use super::distribution::Distribution;
use super::state::State;
use crate::common::{Point, Symbol};
use crate::error::{HmmError, Result};
use crate::prob::Prob;
use log::debug;

///
/// Discrete HMM with multivariate emissions.
///
/// The model owns its states, and a state is addressed only by its index.
/// All parameters are normalized at any time:
///
/// * `\sum_s init_prob[s] = 1`
/// * `\sum_l transitions[k][l] = 1` for each state `k`
/// * `\sum_v emissions[s][d][v] = 1` for each state `s` and dimension `d`
///
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    pub(crate) states: Vec<State>,
    /// vocabulary size of each emission dimension
    n_symbols: Vec<usize>,
}

/// Constructors
impl Model {
    ///
    /// Create a model from the states.
    ///
    /// Assigns indices in the given order and normalizes initial
    /// probabilities (across states), transitions and emissions.
    ///
    /// # Errors
    ///
    /// * `EmptyModel` if `states` is empty
    /// * `DimensionMismatch` if a transition vector is not of length
    ///   `n_states`, or states disagree on emission dims/vocabulary
    /// * `DegenerateDistribution` if some parameter group sums to 0
    ///
    pub fn new(states: Vec<State>) -> Result<Model> {
        let mut states = states;
        let n_states = states.len();
        if n_states == 0 {
            return Err(HmmError::EmptyModel);
        }
        let n_symbols: Vec<usize> = states[0].emissions.iter().map(|e| e.len()).collect();

        for (i, state) in states.iter_mut().enumerate() {
            state.index = i;
            if state.transitions.len() != n_states {
                return Err(HmmError::DimensionMismatch(format!(
                    "state {} has {} transitions but the model has {} states",
                    i,
                    state.transitions.len(),
                    n_states
                )));
            }
            let sizes: Vec<usize> = state.emissions.iter().map(|e| e.len()).collect();
            if sizes != n_symbols {
                return Err(HmmError::DimensionMismatch(format!(
                    "state {} has emission sizes {:?} but state 0 has {:?}",
                    i, sizes, n_symbols
                )));
            }
        }

        let mut model = Model { states, n_symbols };
        model.normalize()?;
        debug!(
            "model created n_states={} n_symbols={:?}",
            model.n_states(),
            model.n_symbols
        );
        Ok(model)
    }
    ///
    /// Normalize all parameter groups.
    ///
    /// Used at construction and at the end of a training iteration.
    /// On error the model is left partially normalized, so callers
    /// run this only on a scratch copy.
    ///
    pub(crate) fn normalize(&mut self) -> Result<()> {
        let init = Distribution::from_probs(self.states.iter().map(|s| s.init_prob).collect())
            .normalized()?;
        for (state, &p) in self.states.iter_mut().zip(init.iter()) {
            state.init_prob = p;
            state.normalize()?;
        }
        Ok(())
    }
}

/// Accessors
impl Model {
    /// number of hidden states
    pub fn n_states(&self) -> usize {
        self.states.len()
    }
    /// number of emission dimensions, i.e. the length of each point
    pub fn n_dims(&self) -> usize {
        self.n_symbols.len()
    }
    /// vocabulary size of the emission dimension `d`
    pub fn n_symbols(&self, d: usize) -> Option<usize> {
        self.n_symbols.get(d).copied()
    }
    pub fn states(&self) -> &[State] {
        &self.states
    }
    /// state of the index if exists
    pub fn state(&self, index: usize) -> Option<&State> {
        self.states.get(index)
    }
    /// initial probabilities of all states
    pub fn init_probs(&self) -> Vec<Prob> {
        self.states.iter().map(|s| s.init_prob).collect()
    }
    ///
    /// transition probability `from -> to`
    ///
    /// # Panics
    /// if indices are out of range
    #[inline]
    pub fn trans_prob(&self, from: usize, to: usize) -> Prob {
        self.states[from].transitions[to]
    }
    ///
    /// Emission likelihood of `point` from the state
    ///
    pub fn likelihood(&self, state: usize, point: &[Symbol]) -> Result<Prob> {
        self.check_state(state)?;
        self.check_point(0, point)?;
        Ok(self.states[state].p_emit(point))
    }
    ///
    /// Check all parameter groups are normalized within the tolerance.
    ///
    pub fn is_normalized(&self, tolerance: f64) -> bool {
        let sum_init: f64 = self.states.iter().map(|s| s.init_prob.to_value()).sum();
        (sum_init - 1.0).abs() <= tolerance
            && self.states.iter().all(|s| {
                s.transitions.is_normalized(tolerance)
                    && s.emissions.iter().all(|e| e.is_normalized(tolerance))
            })
    }
}

/// Validation of inputs
impl Model {
    pub(crate) fn check_state(&self, state: usize) -> Result<()> {
        if state < self.n_states() {
            Ok(())
        } else {
            Err(HmmError::StateOutOfRange {
                index: state,
                n_states: self.n_states(),
            })
        }
    }
    fn check_point(&self, t: usize, point: &[Symbol]) -> Result<()> {
        if point.len() != self.n_dims() {
            return Err(HmmError::DimensionMismatch(format!(
                "point at t={} has {} dims but the model has {}",
                t,
                point.len(),
                self.n_dims()
            )));
        }
        for (d, (&v, &n)) in point.iter().zip(self.n_symbols.iter()).enumerate() {
            if v >= n {
                return Err(HmmError::DimensionMismatch(format!(
                    "symbol {} at t={} is out of vocabulary of dim {} (size={})",
                    v, t, d, n
                )));
            }
        }
        Ok(())
    }
    ///
    /// Check the sequence is non-empty and every point fits the model.
    ///
    pub fn validate(&self, seq: &[Point]) -> Result<()> {
        if seq.is_empty() {
            return Err(HmmError::EmptySequence);
        }
        self.validate_points(seq)
    }
    ///
    /// Same as `validate` but an empty sequence is accepted.
    ///
    pub(crate) fn validate_points(&self, seq: &[Point]) -> Result<()> {
        seq.iter()
            .enumerate()
            .try_for_each(|(t, point)| self.check_point(t, point))
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for state in self.states.iter() {
            writeln!(f, "{}", state)?;
        }
        Ok(())
    }
}
