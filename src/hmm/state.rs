//!
//! Hidden state of HMM
//!
use super::distribution::Distribution;
use crate::common::Symbol;
use crate::error::{HmmError, Result};
use crate::prob::Prob;

///
/// A hidden state.
///
/// * `init_prob`: probability to start from this state
/// * `transitions[l]`: probability of transition from this state to state `l`
/// * `emissions[d][v]`: probability of emitting symbol `v` in dimension `d`
/// * `index`: position of the state in the owning `Model`
///
#[derive(Debug, Clone, PartialEq)]
pub struct State {
    pub(crate) init_prob: Prob,
    pub(crate) transitions: Distribution,
    pub(crate) emissions: Vec<Distribution>,
    pub(crate) index: usize,
}

impl State {
    ///
    /// Create a state from linear-scale parameters.
    ///
    /// The values need not be normalized, `Model::new` normalizes them.
    /// `index` is assigned by `Model::new`.
    ///
    /// ```
    /// use dexter::hmm::State;
    /// let s = State::new(0.5, vec![0.9, 0.1], vec![vec![0.9, 0.1]]);
    /// assert_eq!(s.n_dims(), 1);
    /// ```
    pub fn new<D: Into<Distribution>>(init_prob: f64, transitions: D, emissions: Vec<D>) -> State {
        State {
            init_prob: Prob::from_prob(init_prob),
            transitions: transitions.into(),
            emissions: emissions.into_iter().map(|e| e.into()).collect(),
            index: 0,
        }
    }
    pub fn init_prob(&self) -> Prob {
        self.init_prob
    }
    pub fn transitions(&self) -> &Distribution {
        &self.transitions
    }
    pub fn emissions(&self) -> &[Distribution] {
        &self.emissions
    }
    /// index of this state in the model
    pub fn index(&self) -> usize {
        self.index
    }
    /// number of emission dimensions
    pub fn n_dims(&self) -> usize {
        self.emissions.len()
    }
    ///
    /// Emission likelihood of the point
    ///
    /// `\prod_d emissions[d][point[d]]`
    ///
    /// Dimensions are assumed to be conditionally independent given the state.
    ///
    pub fn likelihood(&self, point: &[Symbol]) -> Result<Prob> {
        if point.len() != self.n_dims() {
            return Err(HmmError::DimensionMismatch(format!(
                "point has {} dims but state {} has {}",
                point.len(),
                self.index,
                self.n_dims()
            )));
        }
        for (d, (&v, emission)) in point.iter().zip(self.emissions.iter()).enumerate() {
            if v >= emission.len() {
                return Err(HmmError::DimensionMismatch(format!(
                    "symbol {} is out of vocabulary of dim {} (size={})",
                    v,
                    d,
                    emission.len()
                )));
            }
        }
        Ok(self.p_emit(point))
    }
    ///
    /// `likelihood` without range check.
    /// The point should be validated by `Model::validate` beforehand.
    ///
    #[inline]
    pub(crate) fn p_emit(&self, point: &[Symbol]) -> Prob {
        point
            .iter()
            .zip(self.emissions.iter())
            .map(|(&v, emission)| emission[v])
            .product()
    }
    ///
    /// Normalize transitions and every emission dimension
    ///
    pub(crate) fn normalize(&mut self) -> Result<()> {
        self.transitions.normalize()?;
        for emission in self.emissions.iter_mut() {
            emission.normalize()?;
        }
        Ok(())
    }
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "State({})\tinit={:.4}\ttrans={}",
            self.index,
            self.init_prob.to_value(),
            self.transitions
        )?;
        for (d, emission) in self.emissions.iter().enumerate() {
            write!(f, "\temit[{}]={}", d, emission)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_likelihood() {
        let s = State::new(
            1.0,
            vec![1.0],
            vec![vec![0.9, 0.1], vec![0.2, 0.3, 0.5]],
        );
        assert_abs_diff_eq!(
            s.likelihood(&[0, 2]).unwrap().to_value(),
            0.45,
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            s.likelihood(&[1, 1]).unwrap().to_value(),
            0.03,
            epsilon = 1e-12
        );
    }
    #[test]
    fn state_likelihood_mismatch() {
        let s = State::new(1.0, vec![1.0], vec![vec![0.9, 0.1]]);
        assert!(matches!(
            s.likelihood(&[0, 0]),
            Err(HmmError::DimensionMismatch(_))
        ));
        assert!(matches!(
            s.likelihood(&[2]),
            Err(HmmError::DimensionMismatch(_))
        ));
        assert!(matches!(
            s.likelihood(&[]),
            Err(HmmError::DimensionMismatch(_))
        ));
    }
}
