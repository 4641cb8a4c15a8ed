//!
//! Forward algorithm definitions
//!
use super::model::Model;
use super::table::Table;
use crate::common::Point;
use crate::error::Result;
use crate::prob::Prob;
use rayon::prelude::*;

// wrappers and exposed functions
impl Model {
    ///
    /// Run Forward algorithm to the sequence
    ///
    /// `F[t][s]` = P(emits `x[:t+1] = x[0],...,x[t]` and now in state `s`)
    ///
    /// The returned table has `T` rows, one per time step.
    /// It is computed bottom-up from `t=0`, so each cell is written once.
    ///
    pub fn forward(&self, seq: &[Point]) -> Result<Table> {
        self.validate(seq)?;
        let mut table = Table::zero(seq.len(), self.n_states());
        self.f_init(&mut table, &seq[0]);
        for (t, point) in seq.iter().enumerate().skip(1) {
            self.f_step(&mut table, t, point);
        }
        Ok(table)
    }
    ///
    /// `forward(prefix, state)`, the probability of observing exactly
    /// `prefix` and being in `state` at its last time step.
    ///
    pub fn forward_prob(&self, prefix: &[Point], state: usize) -> Result<Prob> {
        self.check_state(state)?;
        let table = self.forward(prefix)?;
        Ok(table[(prefix.len() - 1, state)])
    }
    ///
    /// Full probability `P(x) = \sum_s F[T-1][s]` under the current
    /// parameters.
    ///
    pub fn probability(&self, seq: &[Point]) -> Result<Prob> {
        let table = self.forward(seq)?;
        Ok(table.row_sum(seq.len() - 1))
    }
    ///
    /// Joint probability `\prod_i P(x_i)` of independent sequences.
    ///
    /// Each sequence is evaluated on its own thread-local table with rayon.
    /// This only reads the model.
    ///
    pub fn probability_parallel<S>(&self, seqs: &[S]) -> Result<Prob>
    where
        S: AsRef<[Point]> + Sync,
    {
        let probs = seqs
            .par_iter()
            .map(|seq| self.probability(seq.as_ref()))
            .collect::<Result<Vec<Prob>>>()?;
        Ok(probs.into_iter().product())
    }
}

// functions to calculate each step
impl Model {
    /// Fill the first row
    ///
    /// ```text
    /// F[0][s] = init_prob[s] e_s(x[0])
    /// ```
    fn f_init(&self, table: &mut Table, point: &[usize]) {
        for state in self.states.iter() {
            table[(0, state.index)] = state.init_prob * state.p_emit(point);
        }
    }
    /// Fill the row `t` from the row `t-1`
    ///
    /// ```text
    /// F[t][s] = e_s(x[t]) \sum_{k: states} F[t-1][k] A[k][s]
    /// ```
    fn f_step(&self, table: &mut Table, t: usize, point: &[usize]) {
        for state in self.states.iter() {
            let s = state.index;
            let from_prev: Prob = self
                .states
                .iter()
                .map(|prev| table[(t - 1, prev.index)] * prev.transitions[s])
                .sum();
            table[(t, s)] = from_prev * state.p_emit(point);
        }
    }
}
