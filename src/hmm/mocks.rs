//!
//! Mock HMMs for testing
//!
use super::model::Model;
use super::state::State;
use crate::error::Result;
use rand::prelude::*;
use rand_xoshiro::Xoshiro256PlusPlus;

///
/// Two-state model with one binary emission dimension
///
/// ```text
/// Pi = [0.5, 0.5]
/// A  = [[0.9, 0.1], [0.1, 0.9]]
/// E  = [[0.9, 0.1], [0.1, 0.9]]
/// ```
///
pub fn mock_two_state() -> Model {
    mock_sticky(0.9)
}

///
/// Two-state model where both states stay with probability `p_stay`.
/// State 0 prefers symbol 0, and state 1 prefers symbol 1.
///
pub fn mock_sticky(p_stay: f64) -> Model {
    let p_move = 1.0 - p_stay;
    Model::new(vec![
        State::new(0.5, vec![p_stay, p_move], vec![vec![0.9, 0.1]]),
        State::new(0.5, vec![p_move, p_stay], vec![vec![0.1, 0.9]]),
    ])
    .expect("mock parameters are valid")
}

///
/// Three-state model with two emission dimensions
/// (vocabulary sizes 2 and 3).
///
pub fn mock_three_state_bivariate() -> Model {
    Model::new(vec![
        State::new(
            0.6,
            vec![0.7, 0.2, 0.1],
            vec![vec![0.8, 0.2], vec![0.5, 0.3, 0.2]],
        ),
        State::new(
            0.3,
            vec![0.1, 0.8, 0.1],
            vec![vec![0.3, 0.7], vec![0.1, 0.1, 0.8]],
        ),
        State::new(
            0.1,
            vec![0.3, 0.3, 0.4],
            vec![vec![0.5, 0.5], vec![0.6, 0.3, 0.1]],
        ),
    ])
    .expect("mock parameters are valid")
}

///
/// Create random model whose parameters are drawn uniformly from `(0, 1]`
/// and then normalized.
///
pub fn mock_random(n_states: usize, n_symbols: &[usize], seed: u64) -> Result<Model> {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let mut values = |n: usize| -> Vec<f64> { (0..n).map(|_| 1.0 - rng.gen::<f64>()).collect() };
    let states = (0..n_states)
        .map(|_| {
            let init = values(1)[0];
            let transitions = values(n_states);
            let emissions = n_symbols.iter().map(|&n| values(n)).collect();
            State::new(init, transitions, emissions)
        })
        .collect();
    Model::new(states)
}
