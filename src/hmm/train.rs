//!
//! Baum-Welch (EM) parameter re-estimation
//!
//! One call of `train` is one EM iteration:
//!
//! 1. E-step: for every sequence, run Forward/Backward on the current
//!    (frozen) model and accumulate expected counts into `ExpectedCounts`.
//! 2. M-step: build a scratch copy of the states from the counts,
//!    normalize it, and swap it in as the new parameters.
//!
//! The current model is never read after it has been partially updated,
//! and on any error it is left untouched.
//!
use super::distribution::Distribution;
use super::freq::state_freqs;
use super::model::Model;
use super::state::State;
use super::table::Table;
use crate::common::Point;
use crate::error::{HmmError, Result};
use crate::prob::Prob;
use log::{debug, warn};

///
/// Expected counts accumulated over sequences in the E-step.
///
#[derive(Debug, Clone)]
pub struct ExpectedCounts {
    /// `\sum_x G_x[0][s]`
    pub init: Vec<Prob>,
    /// `\sum_x \sum_{t<T-1} X_x[t][k][l]` in row `k`, column `l`
    pub trans: Table,
    /// `\sum_x \sum_{t<T-1} G_x[t][k]`
    pub trans_total: Vec<Prob>,
    /// `\sum_x \sum_{t: x[t][d]=v} G_x[t][s]` as `emit[s][d][v]`
    pub emit: Vec<Vec<Vec<Prob>>>,
    /// `\sum_x \sum_t G_x[t][s]`
    pub emit_total: Vec<Prob>,
    /// number of accumulated sequences
    pub n_seqs: usize,
    /// `\prod_x P(x)` under the model the counts were taken from
    pub full_prob: Prob,
}

impl ExpectedCounts {
    /// all-zero counts shaped after the model
    pub fn zero(model: &Model) -> Self {
        let n = model.n_states();
        let emit_shape: Vec<Vec<Prob>> = (0..model.n_dims())
            .map(|d| vec![Prob::zero(); model.n_symbols(d).unwrap_or(0)])
            .collect();
        ExpectedCounts {
            init: vec![Prob::zero(); n],
            trans: Table::zero(n, n),
            trans_total: vec![Prob::zero(); n],
            emit: vec![emit_shape; n],
            emit_total: vec![Prob::zero(); n],
            n_seqs: 0,
            full_prob: Prob::one(),
        }
    }
    ///
    /// Check the counts are shaped after the model.
    ///
    fn check_shape(&self, model: &Model) -> Result<()> {
        let n = model.n_states();
        let emit_fits = self.emit.len() == n
            && self.emit.iter().all(|dims| {
                dims.len() == model.n_dims()
                    && dims
                        .iter()
                        .enumerate()
                        .all(|(d, emit)| Some(emit.len()) == model.n_symbols(d))
            });
        if self.init.len() == n
            && self.trans.n_rows() == n
            && self.trans.n_cols() == n
            && self.trans_total.len() == n
            && self.emit_total.len() == n
            && emit_fits
        {
            Ok(())
        } else {
            Err(HmmError::DimensionMismatch(format!(
                "expected counts do not fit the model of {} states and {} dims",
                n,
                model.n_dims()
            )))
        }
    }
}

impl Model {
    ///
    /// One Baum-Welch iteration on a single sequence.
    ///
    /// Replaces initial probabilities, transitions and emissions of every
    /// state at once.
    ///
    /// # Errors
    ///
    /// * `EmptySequence` if `seq` is empty
    /// * `DimensionMismatch` if a point does not fit the model
    /// * `DegenerateDistribution` if `P(seq) = 0` under the current model,
    ///   or some state is never reached with positive probability
    ///
    pub fn train(&mut self, seq: &[Point]) -> Result<()> {
        self.train_many(&[seq])
    }
    ///
    /// One Baum-Welch iteration pooling the expected counts of several
    /// independent sequences.
    ///
    pub fn train_many<S: AsRef<[Point]>>(&mut self, seqs: &[S]) -> Result<()> {
        if seqs.is_empty() {
            return Err(HmmError::EmptySequence);
        }
        let mut counts = ExpectedCounts::zero(self);
        for seq in seqs.iter() {
            self.accumulate_counts(seq.as_ref(), &mut counts)?;
        }
        let states = self.reestimate(&counts)?;
        debug!(
            "train n_seqs={} log_p_before={}",
            counts.n_seqs,
            counts.full_prob.to_log_value()
        );
        self.states = states;
        Ok(())
    }
    ///
    /// E-step of a sequence, adding its expected counts into `counts`.
    ///
    /// `counts` must be created by `ExpectedCounts::zero` of this model,
    /// otherwise `DimensionMismatch`.
    ///
    pub fn accumulate_counts(&self, seq: &[Point], counts: &mut ExpectedCounts) -> Result<()> {
        counts.check_shape(self)?;
        let o = self.run(seq)?;
        let g = o.to_state_probs()?;
        let tf = o.to_trans_freqs(self, seq)?;
        let n = seq.len();

        let trans_total = state_freqs(&g, 0..n - 1);
        let emit_total = state_freqs(&g, 0..n);
        for state in self.states.iter() {
            let s = state.index;
            counts.init[s] += g[(0, s)];
            counts.trans_total[s] += trans_total[s];
            counts.emit_total[s] += emit_total[s];
            for l in 0..self.n_states() {
                counts.trans[(s, l)] += tf[(s, l)];
            }
            for (t, point) in seq.iter().enumerate() {
                for (d, &v) in point.iter().enumerate() {
                    counts.emit[s][d][v] += g[(t, s)];
                }
            }
        }
        counts.n_seqs += 1;
        counts.full_prob *= o.to_full_prob_forward();
        Ok(())
    }
    ///
    /// M-step: create new (normalized) states from the expected counts.
    ///
    /// `self` is only read. A state never reached with positive probability
    /// has nothing to normalize and fails with `DegenerateDistribution`.
    /// A reached state without expected outgoing transitions (it is visited
    /// only at the last time step, e.g. `T = 1`) keeps its transition row.
    ///
    fn reestimate(&self, counts: &ExpectedCounts) -> Result<Vec<State>> {
        let n_seqs = counts.n_seqs;
        let mut states: Vec<State> = Vec::with_capacity(self.n_states());

        for state in self.states.iter() {
            let s = state.index;
            let init_prob = counts.init[s] / n_seqs;

            if counts.emit_total[s].is_zero() {
                return Err(HmmError::DegenerateDistribution(format!(
                    "state {} is never reached with positive probability",
                    s
                )));
            }

            let transitions = if counts.trans_total[s].is_zero() {
                warn!("state {} has no outgoing transition, keeping the row", s);
                state.transitions.clone()
            } else {
                let total = counts.trans_total[s];
                Distribution::from_probs(counts.trans.row(s).iter().map(|&x| x / total).collect())
                    .normalized()?
            };

            let total = counts.emit_total[s];
            let emissions = counts.emit[s]
                .iter()
                .map(|emit| {
                    Distribution::from_probs(emit.iter().map(|&x| x / total).collect())
                        .normalized()
                })
                .collect::<Result<Vec<Distribution>>>()?;

            states.push(State {
                init_prob,
                transitions,
                emissions,
                index: s,
            });
        }

        // absorb rounding drift of the initial probs
        let init = Distribution::from_probs(states.iter().map(|s| s.init_prob).collect())
            .normalized()?;
        for (state, &p) in states.iter_mut().zip(init.iter()) {
            state.init_prob = p;
        }
        Ok(states)
    }
}
