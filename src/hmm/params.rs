//!
//! Parameters of repeated Baum-Welch training
//!
use derive_new::new;

///
/// Stopping rule of `em::train`
///
#[derive(Debug, Clone, Copy, PartialEq, new)]
pub struct TrainParams {
    ///
    /// maximum number of EM iterations
    pub max_iter: usize,
    ///
    /// stop when the log likelihood improves less than this value
    /// in an iteration. `None` runs exactly `max_iter` iterations.
    pub min_improvement: Option<f64>,
}

impl TrainParams {
    /// fixed iteration budget without early stopping
    pub fn fixed(max_iter: usize) -> TrainParams {
        TrainParams::new(max_iter, None)
    }
    /// up to 100 iterations, stops when `log P` improves less than `1e-6`
    pub fn default() -> TrainParams {
        TrainParams::new(100, Some(1e-6))
    }
}

impl std::fmt::Display for TrainParams {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "max_iter: {}", self.max_iter)?;
        match self.min_improvement {
            Some(x) => writeln!(f, "min_improvement: {}", x),
            None => writeln!(f, "min_improvement: none"),
        }
    }
}
