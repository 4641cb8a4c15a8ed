//!
//! Observation types shared by all HMM algorithms
//!

/// discrete symbol observed in a single emission dimension
pub type Symbol = usize;

/// Observation at a single time step.
///
/// One symbol per emission dimension, `point[d]` is observed in dimension `d`.
pub type Point = Vec<Symbol>;

/// Time-ordered observations `x[0], ..., x[T-1]`.
pub type Sequence = Vec<Point>;

///
/// Convert a univariate symbol stream into a `Sequence`
/// (each symbol becomes a point of a single dimension).
///
/// ```
/// use dexter::common::univariate;
/// assert_eq!(univariate(&[0, 1]), vec![vec![0], vec![1]]);
/// ```
pub fn univariate(symbols: &[Symbol]) -> Sequence {
    symbols.iter().map(|&s| vec![s]).collect()
}

///
/// Display a sequence as space-separated points, such as `0 0 1` or `(0,1) (1,1)`
///
pub fn sequence_to_string(seq: &[Point]) -> String {
    seq.iter()
        .map(|point| {
            if point.len() == 1 {
                point[0].to_string()
            } else {
                let inner: Vec<String> = point.iter().map(|s| s.to_string()).collect();
                format!("({})", inner.join(","))
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
