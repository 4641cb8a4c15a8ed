//!
//! Calculate state/transition usage frequencies
//! from the result of Forward/Backward.
//!
//! - **State probs** (for each time and each state)
//!     `G[t][s]`, the probability of being in the state at the time,
//!     given the whole sequence.
//!
//! - **State freqs** (for each state)
//!     The expected number of visits of the state, `\sum_t G[t][s]`.
//!
//! - **Trans freqs** (for each pair of states)
//!     The expected number of transitions `k -> l`,
//!     `\sum_{t<T-1} X[t][k][l]`.
//!
use super::model::Model;
use super::table::Table;
use crate::common::Point;
use crate::error::{HmmError, Result};
use crate::prob::Prob;

/// Struct for storing Forward and Backward tables of a sequence.
///
#[derive(Debug, Clone)]
pub struct HmmOutput {
    /// Forward table of `T` rows
    pub forward: Table,
    /// Backward table of `T+1` rows
    pub backward: Table,
}

///
/// methods to generate HmmOutput from Model
///
impl Model {
    ///
    /// Run forward and backward for the sequence and returns HmmOutput.
    ///
    pub fn run(&self, seq: &[Point]) -> Result<HmmOutput> {
        let forward = self.forward(seq)?;
        let backward = self.backward(seq)?;
        Ok(HmmOutput { forward, backward })
    }
}

impl HmmOutput {
    /// number of time steps `T`
    pub fn n_emissions(&self) -> usize {
        self.forward.n_rows()
    }
    /// `P(x)` from the last forward row
    pub fn to_full_prob_forward(&self) -> Prob {
        match self.forward.last_row() {
            Some(row) => row.iter().sum(),
            None => Prob::zero(),
        }
    }
    ///
    /// State probs `G[t][s] = F[t][s] B[t+1][s] / P(x)`
    ///
    /// # Errors
    /// `DegenerateDistribution` if `P(x) = 0`, i.e. the sequence cannot be
    /// emitted by the model.
    ///
    pub fn to_state_probs(&self) -> Result<Table> {
        let p_full = self.checked_full_prob()?;
        let n = self.n_emissions();
        let n_states = self.forward.n_cols();
        let mut table = Table::zero(n, n_states);
        for t in 0..n {
            for s in 0..n_states {
                table[(t, s)] = self.forward[(t, s)] * self.backward[(t + 1, s)] / p_full;
            }
        }
        Ok(table)
    }
    ///
    /// Expected transition counts
    ///
    /// ```text
    /// TF[k][l] = \sum_{t<T-1} F[t][k] A[k][l] e_l(x[t+1]) B[t+2][l] / P(x)
    /// ```
    ///
    /// The returned table has `n_states` rows (source `k`) and
    /// `n_states` columns (target `l`).
    ///
    pub fn to_trans_freqs(&self, model: &Model, seq: &[Point]) -> Result<Table> {
        let p_full = self.checked_full_prob()?;
        let n = self.n_emissions();
        let n_states = model.n_states();
        let mut freqs = Table::zero(n_states, n_states);
        for t in 0..n.saturating_sub(1) {
            let p_emits: Vec<Prob> = model
                .states
                .iter()
                .map(|s| s.p_emit(&seq[t + 1]))
                .collect();
            for from in model.states.iter() {
                for to in model.states.iter() {
                    let (k, l) = (from.index, to.index);
                    freqs[(k, l)] += self.forward[(t, k)]
                        * from.transitions[l]
                        * p_emits[l]
                        * self.backward[(t + 2, l)]
                        / p_full;
                }
            }
        }
        Ok(freqs)
    }
    fn checked_full_prob(&self) -> Result<Prob> {
        let p_full = self.to_full_prob_forward();
        if p_full.is_zero() || !p_full.is_valid() {
            Err(HmmError::DegenerateDistribution(
                "the sequence has zero probability under the model".to_string(),
            ))
        } else {
            Ok(p_full)
        }
    }
}

///
/// State freqs `\sum_{t in rows} G[t][s]` for each state
///
pub fn state_freqs(state_probs: &Table, rows: std::ops::Range<usize>) -> Vec<Prob> {
    (0..state_probs.n_cols())
        .map(|s| state_probs.col_sum(s, rows.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::univariate;
    use crate::hmm::mocks::{mock_three_state_bivariate, mock_two_state};
    use crate::hmm::state::State;

    #[test]
    fn state_probs_sum_to_one() {
        let model = mock_three_state_bivariate();
        let seq = vec![vec![0, 1], vec![1, 2], vec![1, 0], vec![0, 0], vec![1, 1]];
        let o = model.run(&seq).unwrap();
        let g = o.to_state_probs().unwrap();
        println!("{}", g);
        for t in 0..seq.len() {
            assert_abs_diff_eq!(g.row_sum(t).to_value(), 1.0, epsilon = 1e-9);
        }
    }
    #[test]
    fn trans_freqs_sum_to_state_freqs() {
        let model = mock_two_state();
        let seq = univariate(&[0, 0, 1, 1, 0]);
        let o = model.run(&seq).unwrap();
        let g = o.to_state_probs().unwrap();
        let tf = o.to_trans_freqs(&model, &seq).unwrap();
        println!("{}", tf);
        // \sum_l TF[k][l] = \sum_{t<T-1} G[t][k]
        let sf = state_freqs(&g, 0..seq.len() - 1);
        for k in 0..model.n_states() {
            assert_abs_diff_eq!(
                tf.row_sum(k).to_value(),
                sf[k].to_value(),
                epsilon = 1e-9
            );
        }
        // total number of transitions is T-1
        let total: f64 = (0..model.n_states()).map(|k| tf.row_sum(k).to_value()).sum();
        assert_abs_diff_eq!(total, (seq.len() - 1) as f64, epsilon = 1e-9);
    }
    #[test]
    fn trans_freqs_single_point_is_zero() {
        let model = mock_two_state();
        let seq = univariate(&[0]);
        let o = model.run(&seq).unwrap();
        let tf = o.to_trans_freqs(&model, &seq).unwrap();
        assert!(tf.row_sum(0).is_zero());
        assert!(tf.row_sum(1).is_zero());
    }
    #[test]
    fn impossible_sequence_is_degenerate() {
        let model = Model::new(vec![
            State::new(0.5, vec![0.5, 0.5], vec![vec![1.0, 0.0]]),
            State::new(0.5, vec![0.5, 0.5], vec![vec![1.0, 0.0]]),
        ])
        .unwrap();
        let seq = univariate(&[0, 1]);
        let o = model.run(&seq).unwrap();
        assert!(o.to_full_prob_forward().is_zero());
        assert!(matches!(
            o.to_state_probs(),
            Err(HmmError::DegenerateDistribution(_))
        ));
        assert!(matches!(
            o.to_trans_freqs(&model, &seq),
            Err(HmmError::DegenerateDistribution(_))
        ));
    }
}
