//!
//! Normalized probability vector
//!
use crate::error::{HmmError, Result};
use crate::prob::Prob;
use std::ops::Index;

///
/// Ordered probabilities, where the position is meaningful
/// (a symbol of an emission dimension, or a successor state index).
///
/// `normalize` makes the entries sum to 1.
///
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution(Vec<Prob>);

impl Distribution {
    ///
    /// Create from linear-scale values. The values are stored as is
    /// (not normalized yet).
    ///
    pub fn from_values(values: &[f64]) -> Distribution {
        Distribution(values.iter().map(|&v| Prob::from_prob(v)).collect())
    }
    ///
    /// Create from probs
    ///
    pub fn from_probs(probs: Vec<Prob>) -> Distribution {
        Distribution(probs)
    }
    ///
    /// Distribution with `n` equally probable entries
    ///
    pub fn uniform(n: usize) -> Distribution {
        Distribution(vec![Prob::one() / n; n])
    }
    /// number of entries
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    /// `Some(p)` if `index` is in range
    pub fn get(&self, index: usize) -> Option<Prob> {
        self.0.get(index).copied()
    }
    pub fn iter(&self) -> impl Iterator<Item = &Prob> + '_ {
        self.0.iter()
    }
    /// sum of all entries
    pub fn sum(&self) -> Prob {
        self.0.iter().sum()
    }
    /// linear-scale values of entries
    pub fn to_values(&self) -> Vec<f64> {
        self.0.iter().map(|p| p.to_value()).collect()
    }
    ///
    /// Check `|sum - 1| <= tolerance`.
    ///
    pub fn is_normalized(&self, tolerance: f64) -> bool {
        let sum: f64 = self.to_values().iter().sum();
        (sum - 1.0).abs() <= tolerance
    }
    ///
    /// Divide every entry by the sum of entries.
    ///
    /// A zero-sum distribution, or one with a negative, infinite or
    /// not-a-number entry, cannot be normalized and fails with
    /// `DegenerateDistribution`, leaving `self` unchanged.
    ///
    pub fn normalize(&mut self) -> Result<()> {
        if let Some(i) = self
            .0
            .iter()
            .position(|p| !p.is_valid() || p.to_log_value() == f64::INFINITY)
        {
            return Err(HmmError::DegenerateDistribution(format!(
                "entry {} is {} (len={})",
                i,
                self.0[i].to_value(),
                self.len()
            )));
        }
        let sum = self.sum();
        if sum.is_zero() || !sum.is_valid() {
            return Err(HmmError::DegenerateDistribution(format!(
                "entries sum to {} (len={})",
                sum.to_value(),
                self.len()
            )));
        }
        for p in self.0.iter_mut() {
            *p = *p / sum;
        }
        Ok(())
    }
    ///
    /// Consuming version of `normalize`.
    ///
    pub fn normalized(mut self) -> Result<Distribution> {
        self.normalize()?;
        Ok(self)
    }
}

impl Index<usize> for Distribution {
    type Output = Prob;
    fn index(&self, index: usize) -> &Prob {
        &self.0[index]
    }
}

impl From<Vec<f64>> for Distribution {
    fn from(values: Vec<f64>) -> Distribution {
        Distribution::from_values(&values)
    }
}

impl From<&[f64]> for Distribution {
    fn from(values: &[f64]) -> Distribution {
        Distribution::from_values(values)
    }
}

impl std::fmt::Display for Distribution {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, p) in self.0.iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:.4}", p.to_value())?;
        }
        write!(f, "]")
    }
}
