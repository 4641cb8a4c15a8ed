//!
//! Viterbi algorithm definitions
//!
//! Same recursion as Forward, with `max` instead of `sum`.
//!
//! ```text
//! V[0][s] = init_prob[s] e_s(x[0])
//! V[t][s] = e_s(x[t]) \max_k V[t-1][k] A[k][s]
//! ```
//!
//! Among predecessors with an equal score the lowest index is kept, and a
//! predecessor with score 0 is never kept.
//!
use super::model::Model;
use super::table::Table;
use crate::common::Point;
use crate::error::{HmmError, Result};
use crate::prob::Prob;

///
/// Viterbi scores and the argmax predecessor of each cell.
///
/// `back[t][s]` is `None` for `t=0` and for cells with score 0.
///
struct ViterbiTable {
    scores: Table,
    back: Vec<Vec<Option<usize>>>,
}

impl Model {
    ///
    /// The most probable state path emitting `seq` and ending at `final_state`.
    ///
    /// Returns state indices `[s_0, ..., s_{T-1}]` with `s_{T-1} = final_state`.
    ///
    /// # Errors
    ///
    /// * `NoViablePath` if every path ending at `final_state` has probability 0
    ///
    pub fn viterbi(&self, seq: &[Point], final_state: usize) -> Result<Vec<usize>> {
        self.check_state(final_state)?;
        let vt = self.viterbi_table(seq)?;
        vt.traceback(final_state)
    }
    ///
    /// The most probable state path over all final states, with its joint
    /// probability `P(x, path)`.
    ///
    pub fn viterbi_best(&self, seq: &[Point]) -> Result<(Vec<usize>, Prob)> {
        let vt = self.viterbi_table(seq)?;
        let last = seq.len() - 1;
        let (final_state, score) = argmax(vt.scores.row(last).iter().copied().enumerate())
            .ok_or(HmmError::NoViablePath)?;
        let path = vt.traceback(final_state)?;
        Ok((path, score))
    }
    fn viterbi_table(&self, seq: &[Point]) -> Result<ViterbiTable> {
        self.validate(seq)?;
        let n = self.n_states();
        let mut scores = Table::zero(seq.len(), n);
        let mut back = vec![vec![None; n]; seq.len()];

        for state in self.states.iter() {
            scores[(0, state.index)] = state.init_prob * state.p_emit(&seq[0]);
        }
        for (t, point) in seq.iter().enumerate().skip(1) {
            for state in self.states.iter() {
                let s = state.index;
                let candidates = self
                    .states
                    .iter()
                    .map(|prev| (prev.index, scores[(t - 1, prev.index)] * prev.transitions[s]));
                if let Some((k, score)) = argmax(candidates) {
                    let p_emit = state.p_emit(point);
                    if !p_emit.is_zero() {
                        scores[(t, s)] = score * p_emit;
                        back[t][s] = Some(k);
                    }
                }
            }
        }
        Ok(ViterbiTable { scores, back })
    }
}

impl ViterbiTable {
    fn traceback(&self, final_state: usize) -> Result<Vec<usize>> {
        let n = self.back.len();
        if self.scores[(n - 1, final_state)].is_zero() {
            return Err(HmmError::NoViablePath);
        }
        let mut path = vec![final_state; n];
        for t in (1..n).rev() {
            path[t - 1] = self.back[t][path[t]].ok_or(HmmError::NoViablePath)?;
        }
        Ok(path)
    }
}

///
/// `(index, score)` of the first strict maximum, ignoring zero scores.
///
fn argmax<I: Iterator<Item = (usize, Prob)>>(candidates: I) -> Option<(usize, Prob)> {
    candidates.fold(None, |best, (i, score)| {
        if score.is_zero() {
            return best;
        }
        match best {
            Some((_, best_score)) if score <= best_score => best,
            _ => Some((i, score)),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::univariate;
    use crate::hmm::mocks::{mock_sticky, mock_two_state};
    use crate::hmm::state::State;
    use crate::prob::p;

    #[test]
    fn viterbi_sticky_all_zero() {
        let model = mock_sticky(0.9);
        let seq = univariate(&[0; 8]);
        let path = model.viterbi(&seq, 0).unwrap();
        assert_eq!(path, vec![0; 8]);
        let (path, score) = model.viterbi_best(&seq).unwrap();
        assert_eq!(path, vec![0; 8]);
        assert!(!score.is_zero());
    }
    #[test]
    fn viterbi_switches_with_observation() {
        let model = mock_two_state();
        let seq = univariate(&[0, 0, 0, 1, 1, 1]);
        let (path, score) = model.viterbi_best(&seq).unwrap();
        assert_eq!(path, vec![0, 0, 0, 1, 1, 1]);
        // 0.5*0.9 * (0.9*0.9)^2 * (0.1*0.9) * (0.9*0.9)^2
        let expected = 0.5 * 0.9 * 0.81f64.powi(2) * 0.09 * 0.81f64.powi(2);
        assert_abs_diff_eq!(score.to_value(), expected, epsilon = 1e-12);

        // forced to end at state 0
        let path = model.viterbi(&seq, 0).unwrap();
        assert_eq!(*path.last().unwrap(), 0);
        assert_eq!(path.len(), seq.len());
    }
    #[test]
    fn viterbi_ties_lowest_index_wins() {
        // fully symmetric model: every path has the same probability
        let model = Model::new(vec![
            State::new(1.0, vec![1.0, 1.0, 1.0], vec![vec![1.0, 1.0]]),
            State::new(1.0, vec![1.0, 1.0, 1.0], vec![vec![1.0, 1.0]]),
            State::new(1.0, vec![1.0, 1.0, 1.0], vec![vec![1.0, 1.0]]),
        ])
        .unwrap();
        let seq = univariate(&[0, 1, 0, 1]);
        assert_eq!(model.viterbi(&seq, 2).unwrap(), vec![0, 0, 0, 2]);
        assert_eq!(model.viterbi_best(&seq).unwrap().0, vec![0, 0, 0, 0]);
    }
    #[test]
    fn viterbi_no_viable_path() {
        // state 1 cannot emit symbol 0
        let model = Model::new(vec![
            State::new(0.5, vec![0.5, 0.5], vec![vec![1.0, 0.0]]),
            State::new(0.5, vec![0.5, 0.5], vec![vec![0.0, 1.0]]),
        ])
        .unwrap();
        let seq = univariate(&[0, 0]);
        assert_eq!(model.viterbi(&seq, 1), Err(HmmError::NoViablePath));
        assert_eq!(model.viterbi(&seq, 0).unwrap(), vec![0, 0]);

        // state 1 is unreachable from 0, and 0 never emits 1
        let model = Model::new(vec![
            State::new(1.0, vec![1.0, 0.0], vec![vec![1.0, 0.0]]),
            State::new(0.0, vec![0.0, 1.0], vec![vec![0.0, 1.0]]),
        ])
        .unwrap();
        let seq = univariate(&[0, 1]);
        assert_eq!(model.viterbi(&seq, 0), Err(HmmError::NoViablePath));
        assert_eq!(model.viterbi(&seq, 1), Err(HmmError::NoViablePath));
        assert_eq!(model.viterbi_best(&seq), Err(HmmError::NoViablePath));
    }
    #[test]
    fn viterbi_errors() {
        let model = mock_two_state();
        assert_eq!(model.viterbi(&[], 0), Err(HmmError::EmptySequence));
        assert_eq!(
            model.viterbi(&[vec![0]], 2),
            Err(HmmError::StateOutOfRange {
                index: 2,
                n_states: 2
            })
        );
    }
    #[test]
    fn argmax_rules() {
        let xs = vec![(0, p(0.2)), (1, p(0.5)), (2, p(0.5)), (3, p(0.1))];
        assert_eq!(argmax(xs.into_iter()), Some((1, p(0.5))));
        let zeros = vec![(0, p(0.0)), (1, p(0.0))];
        assert_eq!(argmax(zeros.into_iter()), None);
    }
}
