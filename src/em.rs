//!
//! Repeated Baum-Welch training of a Model.
//!
//! `Model::train` does exactly one iteration; this module decides
//! when to stop, either after a fixed budget or when the likelihood
//! stops improving.
//!
use crate::common::Point;
use crate::error::Result;
use crate::hmm::{Model, TrainParams};
use crate::prob::Prob;
use log::info;

///
/// Log of an EM run.
///
#[derive(Debug, Clone, PartialEq)]
pub struct EmResult {
    ///
    /// `log P(seqs)` before the first iteration and after each iteration.
    /// length is `n_iter + 1`.
    pub log_probs: Vec<f64>,
    ///
    /// number of iterations done
    pub n_iter: usize,
    ///
    /// stopped by `min_improvement` before reaching `max_iter`
    pub converged: bool,
}

impl EmResult {
    /// `log P(seqs)` of the final model
    pub fn last_log_prob(&self) -> f64 {
        self.log_probs.last().copied().unwrap_or(f64::NEG_INFINITY)
    }
}

///
/// Do EM inference of the model on the sequences, updating it in place.
///
/// On error the model keeps the parameters of the last successful iteration.
///
pub fn train<S>(model: &mut Model, seqs: &[S], params: &TrainParams) -> Result<EmResult>
where
    S: AsRef<[Point]> + Sync,
{
    let mut p: Prob = model.probability_parallel(seqs)?;
    let mut log_probs = vec![p.to_log_value()];
    let mut converged = false;
    info!("iteration=0 log_p={}", p.to_log_value());

    for iteration in 1..=params.max_iter {
        model.train_many(seqs)?;
        let p_new = model.probability_parallel(seqs)?;
        let improvement = p_new.to_log_value() - p.to_log_value();
        info!(
            "iteration={} log_p={} improvement={}",
            iteration,
            p_new.to_log_value(),
            improvement
        );
        log_probs.push(p_new.to_log_value());
        p = p_new;

        if let Some(min_improvement) = params.min_improvement {
            if improvement < min_improvement {
                converged = true;
                break;
            }
        }
    }

    Ok(EmResult {
        n_iter: log_probs.len() - 1,
        log_probs,
        converged,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::univariate;
    use crate::error::HmmError;
    use crate::hmm::mocks::{mock_random, mock_two_state};

    #[test]
    fn em_fixed_iterations() {
        let mut model = mock_two_state();
        let seqs = vec![univariate(&[0, 0, 0, 1, 1, 1])];
        let r = train(&mut model, &seqs, &TrainParams::fixed(10)).unwrap();
        assert_eq!(r.n_iter, 10);
        assert_eq!(r.log_probs.len(), 11);
        assert!(!r.converged);
        for (a, b) in r.log_probs.iter().zip(r.log_probs.iter().skip(1)) {
            assert!(b >= &(a - 1e-9));
        }
        assert_eq!(
            r.last_log_prob(),
            model.probability(&seqs[0]).unwrap().to_log_value()
        );
    }
    #[test]
    fn em_converges() {
        let mut model = mock_random(3, &[4], 11).unwrap();
        let truth = mock_random(3, &[4], 12).unwrap();
        let seqs: Vec<_> = (0..5)
            .map(|i| truth.sample(100, i).unwrap().to_sequence())
            .collect();
        let r = train(&mut model, &seqs, &TrainParams::new(5000, Some(1e-3))).unwrap();
        assert!(r.converged);
        assert!(r.n_iter < 5000);
        assert!(r.last_log_prob() > r.log_probs[0]);
    }
    #[test]
    fn em_errors() {
        let mut model = mock_two_state();
        let seqs: Vec<Vec<Point>> = vec![vec![]];
        assert_eq!(
            train(&mut model, &seqs, &TrainParams::fixed(3)),
            Err(HmmError::EmptySequence)
        );
        assert_eq!(model, mock_two_state());
    }
}
