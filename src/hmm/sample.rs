//!
//! Sampling hidden states and emissions from the Model
//!
use super::distribution::Distribution;
use super::model::Model;
use crate::common::{Point, Sequence};
use crate::error::{HmmError, Result};
use itertools::Itertools;
use rand::prelude::*;
use rand_xoshiro::Xoshiro256PlusPlus;

///
/// Struct for storing sampling results from HMM
///
/// `(state index, emitted point)` for each time step.
///
#[derive(Debug, Clone, PartialEq, Default)]
pub struct History(Vec<(usize, Point)>);

impl History {
    ///
    /// Constructor of empty sample store.
    ///
    pub fn new() -> Self {
        History(Vec::new())
    }
    ///
    /// Append a new state and its emission
    ///
    pub fn push(&mut self, state: usize, point: Point) {
        self.0.push((state, point));
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    ///
    /// Hidden state path of the history
    ///
    pub fn to_path(&self) -> Vec<usize> {
        self.0.iter().map(|(state, _)| *state).collect()
    }
    ///
    /// Emitted sequence of the history
    ///
    pub fn to_sequence(&self) -> Sequence {
        self.0.iter().map(|(_, point)| point.clone()).collect()
    }
    ///
    /// Number of visits of each state
    ///
    pub fn to_state_freqs(&self, n_states: usize) -> Vec<f64> {
        let mut freqs = vec![0.0; n_states];
        for (state, _) in self.0.iter() {
            freqs[*state] += 1.0;
        }
        freqs
    }
    ///
    /// Number of transitions `k -> l` as `freqs[k][l]`
    ///
    pub fn to_trans_freqs(&self, n_states: usize) -> Vec<Vec<f64>> {
        let mut freqs = vec![vec![0.0; n_states]; n_states];
        for ((k, _), (l, _)) in self.0.iter().tuple_windows() {
            freqs[*k][*l] += 1.0;
        }
        freqs
    }
}

//
// Display
//
impl std::fmt::Display for History {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for (state, point) in self.0.iter() {
            writeln!(f, "{} -> {:?}", state, point)?;
        }
        Ok(())
    }
}

///
/// pick randomly an index of the distribution with its own probability.
///
pub fn pick_with_prob<R: Rng>(rng: &mut R, dist: &Distribution) -> Result<usize> {
    let values = dist.to_values();
    (0..values.len())
        .collect::<Vec<usize>>()
        .choose_weighted(rng, |&i| values[i])
        .copied()
        .map_err(|e| HmmError::DegenerateDistribution(e.to_string()))
}

impl Model {
    ///
    /// Sample a path of `length` steps and its emissions with a seeded rng.
    ///
    pub fn sample(&self, length: usize, seed: u64) -> Result<History> {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        let mut history = History::new();
        if length == 0 {
            return Ok(history);
        }
        let init = Distribution::from_probs(self.init_probs());
        let mut state = pick_with_prob(&mut rng, &init)?;
        for i in 0..length {
            if i > 0 {
                state = pick_with_prob(&mut rng, &self.states[state].transitions)?;
            }
            let point = self.states[state]
                .emissions
                .iter()
                .map(|emission| pick_with_prob(&mut rng, emission))
                .collect::<Result<Point>>()?;
            history.push(state, point);
        }
        Ok(history)
    }
}
