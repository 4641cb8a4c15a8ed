//!
//! Backward algorithm definitions
//!
use super::model::Model;
use super::table::Table;
use crate::common::Point;
use crate::error::Result;
use crate::prob::Prob;

// wrappers and exposed functions
impl Model {
    ///
    /// Run Backward algorithm to the sequence
    ///
    /// `B[t][s]` = P(emits `x[t:] = x[t],...,x[T-1]` | in state `s` just before `x[t]`)
    ///
    /// The returned table has `T+1` rows, and `B[T][s] = 1` (empty suffix).
    /// It is computed bottom-up from `t=T`.
    ///
    pub fn backward(&self, seq: &[Point]) -> Result<Table> {
        self.validate(seq)?;
        Ok(self.backward_table(seq))
    }
    ///
    /// `backward(suffix, state)`, the probability of observing `suffix`
    /// given the chain is in `state` just before `suffix` begins.
    ///
    /// An empty suffix is allowed and has probability 1.
    ///
    pub fn backward_prob(&self, suffix: &[Point], state: usize) -> Result<Prob> {
        self.check_state(state)?;
        self.validate_points(suffix)?;
        let table = self.backward_table(suffix);
        Ok(table[(0, state)])
    }
    ///
    /// Full probability calculated from the Backward table
    ///
    /// ```text
    /// P(x) = \sum_s init_prob[s] e_s(x[0]) B[1][s]
    /// ```
    ///
    /// It agrees with `probability` up to rounding.
    ///
    pub fn probability_backward(&self, seq: &[Point]) -> Result<Prob> {
        let table = self.backward(seq)?;
        Ok(self
            .states
            .iter()
            .map(|state| state.init_prob * state.p_emit(&seq[0]) * table[(1, state.index)])
            .sum())
    }
    ///
    /// Fill the table of `seq.len() + 1` rows.
    /// `seq` should be validated beforehand (it can be empty here).
    ///
    fn backward_table(&self, seq: &[Point]) -> Table {
        let n = seq.len();
        let mut table = Table::zero(n + 1, self.n_states());
        self.b_init(&mut table, n);
        for t in (0..n).rev() {
            self.b_step(&mut table, t, &seq[t]);
        }
        table
    }
}

// functions to calculate each step
impl Model {
    /// Fill the last row
    ///
    /// ```text
    /// B[T][s] = 1
    /// ```
    fn b_init(&self, table: &mut Table, n: usize) {
        for p in table.row_mut(n).iter_mut() {
            *p = Prob::one();
        }
    }
    /// Fill the row `t` from the row `t+1`
    ///
    /// ```text
    /// B[t][s] = \sum_{l: states} A[s][l] e_l(x[t]) B[t+1][l]
    /// ```
    fn b_step(&self, table: &mut Table, t: usize, point: &[usize]) {
        // emission of x[t] is shared by every source state
        let p_emits: Vec<Prob> = self.states.iter().map(|s| s.p_emit(point)).collect();
        for state in self.states.iter() {
            let to_next: Prob = self
                .states
                .iter()
                .map(|next| {
                    state.transitions[next.index] * p_emits[next.index] * table[(t + 1, next.index)]
                })
                .sum();
            table[(t, state.index)] = to_next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::univariate;
    use crate::error::HmmError;
    use crate::hmm::mocks::{mock_three_state_bivariate, mock_two_state};

    #[test]
    fn backward_empty_suffix_is_one() {
        for model in [mock_two_state(), mock_three_state_bivariate()] {
            for s in 0..model.n_states() {
                assert_eq!(model.backward_prob(&[], s).unwrap(), Prob::one());
            }
        }
    }
    #[test]
    fn backward_hand_calculated() {
        let model = mock_two_state();
        // B(x=[1], s=0) = 0.9*0.1 + 0.1*0.9 = 0.18
        // B(x=[1], s=1) = 0.1*0.1 + 0.9*0.9 = 0.82
        let b = model.backward(&univariate(&[1])).unwrap();
        println!("{}", b);
        assert_eq!(b.n_rows(), 2);
        assert_abs_diff_eq!(b[(0, 0)].to_value(), 0.18, epsilon = 1e-12);
        assert_abs_diff_eq!(b[(0, 1)].to_value(), 0.82, epsilon = 1e-12);
        assert_eq!(b[(1, 0)], Prob::one());
    }
    #[test]
    fn forward_and_backward_agree() {
        let model = mock_two_state();
        let seq = univariate(&[0, 0, 0, 1, 1, 1]);
        let pf = model.probability(&seq).unwrap();
        let pb = model.probability_backward(&seq).unwrap();
        assert_abs_diff_eq!(pf, pb, epsilon = 1e-9);

        let model = mock_three_state_bivariate();
        let seq = vec![vec![0, 1], vec![1, 2], vec![1, 0], vec![0, 0]];
        let pf = model.probability(&seq).unwrap();
        let pb = model.probability_backward(&seq).unwrap();
        assert_abs_diff_eq!(pf, pb, epsilon = 1e-9);
    }
    #[test]
    fn backward_prob_matches_table_rows() {
        let model = mock_two_state();
        let seq = univariate(&[0, 1, 1, 0]);
        let b = model.backward(&seq).unwrap();
        for t in 0..=seq.len() {
            for s in 0..model.n_states() {
                let x = model.backward_prob(&seq[t..], s).unwrap();
                assert_abs_diff_eq!(x, b[(t, s)], epsilon = 1e-12);
            }
        }
    }
    #[test]
    fn backward_errors() {
        let model = mock_two_state();
        assert_eq!(model.backward(&[]), Err(HmmError::EmptySequence));
        assert_eq!(model.probability_backward(&[]), Err(HmmError::EmptySequence));
        assert!(matches!(
            model.backward_prob(&[vec![0]], 2),
            Err(HmmError::StateOutOfRange { .. })
        ));
        assert!(matches!(
            model.backward_prob(&[vec![0, 1]], 0),
            Err(HmmError::DimensionMismatch(_))
        ));
    }
}
