///
/// probability calculation
/// implements logaddexp
///
use approx::AbsDiffEq;
use std::str::FromStr;

///
/// Wrapper of f64 that represents probability `0 <= p <= 1`
///
/// The value is stored as `ln p`, so that products of many small
/// probabilities (forward/backward over long sequences) do not underflow.
///
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Prob(f64);

///
/// short-hand of `Prob::from_prob`
///
pub fn p(p: f64) -> Prob {
    Prob::from_prob(p)
}

///
/// short-hand of `Prob::from_log_prob`
///
pub fn lp(lp: f64) -> Prob {
    Prob::from_log_prob(lp)
}

impl Prob {
    ///
    ///
    pub fn from_prob(value: f64) -> Prob {
        Prob(value.ln())
    }
    ///
    ///
    pub fn from_log_prob(log_value: f64) -> Prob {
        Prob(log_value)
    }
    ///
    /// Get the probability (in `[0, 1]`)
    pub fn to_value(self) -> f64 {
        self.0.exp()
    }
    ///
    /// Get the log probability
    pub fn to_log_value(self) -> f64 {
        self.0
    }
    ///
    /// Is `p == 0` or not? (log p = -inf)
    ///
    pub fn is_zero(self) -> bool {
        self.0.is_infinite() && self.0.is_sign_negative()
    }
    ///
    /// Is `p == 1`? (log p = 0)
    ///
    pub fn is_one(self) -> bool {
        self.0 == 0.0
    }
    ///
    /// Is the stored value a number? (p is not NaN)
    ///
    pub fn is_valid(self) -> bool {
        !self.0.is_nan()
    }
    ///
    /// prob=0.0
    ///
    pub fn zero() -> Prob {
        Prob(f64::NEG_INFINITY)
    }
    ///
    /// prob=1.0
    ///
    pub fn one() -> Prob {
        Prob(0.0)
    }
    ///
    /// abs diff of two probs `= |p_a - p_b|`
    ///
    pub fn diff(&self, other: Prob) -> f64 {
        (self.to_value() - other.to_value()).abs()
    }
    ///
    /// abs diff of two log probs `= |log p_a - log p_b|`
    ///
    pub fn log_diff(&self, other: Prob) -> f64 {
        match (self.is_zero(), other.is_zero()) {
            (true, true) => 0.0,
            (true, false) | (false, true) => f64::INFINITY,
            (false, false) => (self.to_log_value() - other.to_log_value()).abs(),
        }
    }
}

/// p=0 (Prob(-inf)) as a default value
impl Default for Prob {
    fn default() -> Self {
        Prob(f64::NEG_INFINITY)
    }
}

///
/// Prob has multiplicative identity element
/// `num_traits::One`
///
impl num_traits::One for Prob {
    fn one() -> Self {
        Prob::one()
    }
}

///
/// Prob has additive identity element
/// `num_traits::Zero`
///
impl num_traits::Zero for Prob {
    fn zero() -> Self {
        Prob::zero()
    }
    fn is_zero(&self) -> bool {
        Prob::is_zero(*self)
    }
}

// display
impl std::fmt::Display for Prob {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}({:.4})", self.0, self.to_value())
    }
}
impl FromStr for Prob {
    type Err = std::num::ParseFloatError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let front = match s.split_once('(') {
            Some((front, _)) => front,
            None => s,
        };
        front.parse::<f64>().map(Prob)
    }
}

/// Addition of two probabilities `px + py` in log space
///
/// If `px > py`:
///
/// ```text
/// log(exp(x) + exp(y))
///  = log(exp(x) (1 + exp(y-x)))
///  = log(exp(x)) + log(1 + exp(y-x))
///  = x + log(1 + exp(y-x))
/// ```
impl std::ops::Add for Prob {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        let x = self.0;
        let y = other.0;
        let (x, y) = if x >= y { (x, y) } else { (y, x) };
        if y == f64::NEG_INFINITY {
            // x + 0 = x
            Prob(x)
        } else if x == y {
            // x + x = 2x
            Prob(x + 2f64.ln())
        } else {
            Prob(x + (y - x).exp().ln_1p())
        }
    }
}

/// Multiplication of two probabilities `px * py` in log space
///
/// ```text
/// log(px * py) = log(px) + log(py)
/// ```
impl std::ops::Mul for Prob {
    type Output = Self;
    fn mul(self, other: Self) -> Self {
        Prob(self.0 + other.0)
    }
}

/// Division of two probabilities `px / py` in log space
///
/// ```text
/// log(px / py) = log(px) - log(py)
/// ```
///
/// `py` must be non-zero. Callers check `is_zero()` on the divisor first.
impl std::ops::Div for Prob {
    type Output = Self;
    fn div(self, other: Self) -> Self {
        Prob(self.0 - other.0)
    }
}

// assign
impl std::ops::AddAssign for Prob {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}
impl std::ops::MulAssign for Prob {
    fn mul_assign(&mut self, other: Self) {
        *self = *self * other;
    }
}
// sum/prod
impl std::iter::Sum for Prob {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Prob::zero(), |a, b| a + b)
    }
}
impl<'a> std::iter::Sum<&'a Self> for Prob {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.fold(Prob::zero(), |a, b| a + *b)
    }
}
impl std::iter::Product for Prob {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Prob::one(), |a, b| a * b)
    }
}
impl<'a> std::iter::Product<&'a Self> for Prob {
    fn product<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.fold(Prob::one(), |a, b| a * *b)
    }
}

/// Division of Prob and usize `p / c`
///
impl std::ops::Div<usize> for Prob {
    type Output = Self;
    fn div(self, rhs: usize) -> Self {
        Prob(self.0 - (rhs as f64).ln())
    }
}

/// for approx `assert_abs_diff_eq`
impl AbsDiffEq for Prob {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        f64::abs_diff_eq(&self.0, &other.0, epsilon)
    }
}

impl Eq for Prob {}
impl Ord for Prob {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prob_add_mul() {
        assert_eq!(p(0.0) + p(1.0), p(1.0));
        assert_eq!(p(0.0) * p(1.0), p(0.0));
        assert_abs_diff_eq!((p(0.3) + p(0.3)).0, p(0.6).0, epsilon = 1e-12);
        assert_abs_diff_eq!((p(0.3) * p(0.3)).0, p(0.09).0, epsilon = 1e-12);
        assert_abs_diff_eq!((p(0.5) + p(0.00001)).0, p(0.50001).0, epsilon = 1e-12);
        assert_abs_diff_eq!((p(0.5) * p(0.00001)).0, p(0.000005).0, epsilon = 1e-12);
    }
    #[test]
    fn prob_sum_prod() {
        // sum/prod of zero element vec
        let xs: Vec<Prob> = vec![];
        let sum: Prob = xs.iter().sum();
        let product: Prob = xs.iter().product();
        assert_eq!(sum, p(0.0));
        assert_eq!(product, p(1.0));

        // sum/prod of vec of p=0
        let xs: Vec<Prob> = vec![p(0.0), p(0.0)];
        let sum: Prob = xs.iter().sum();
        let product: Prob = xs.iter().product();
        assert_eq!(sum, p(0.0));
        assert_eq!(product, p(0.0));

        let xs = vec![p(0.1), p(0.1), p(0.1)];
        let sum: Prob = xs.iter().sum();
        let product: Prob = xs.iter().product();
        assert_relative_eq!(sum.to_value(), 0.3, epsilon = 1e-12);
        assert_relative_eq!(product.to_value(), 0.001, epsilon = 1e-12);
    }
    #[test]
    fn prob_div() {
        assert_abs_diff_eq!(p(0.3) / p(0.6), p(0.5), epsilon = 1e-12);
        assert_abs_diff_eq!(p(1.0) / 4, p(0.25), epsilon = 1e-12);
        assert!((p(0.0) / p(0.5)).is_zero());
        // 0/0 is not a number, callers must guard against it
        assert!(!(p(0.0) / p(0.0)).is_valid());
    }
    #[test]
    fn prob_zero_one() {
        assert_eq!(Prob::one(), Prob::from_prob(1.0));
        assert_eq!(Prob::zero(), Prob::from_prob(0.0));
        assert!(Prob::zero().is_zero());
        assert!(Prob::one().is_one());
        assert!(!p(0.00001).is_zero());
        assert_eq!(Prob::default(), Prob::zero());
    }
    #[test]
    fn prob_assign() {
        let mut x = p(0.4);
        x += p(0.2);
        assert_abs_diff_eq!(x, p(0.6), epsilon = 1e-12);
        x *= p(0.5);
        assert_abs_diff_eq!(x, p(0.3), epsilon = 1e-12);
        x += p(0.0);
        assert_abs_diff_eq!(x, p(0.3), epsilon = 1e-12);
        x *= p(0.0);
        assert!(x.is_zero());
    }
    #[test]
    fn prob_sort() {
        let mut ps = vec![p(0.9), p(0.2), p(0.5), p(0.1), p(1.0), p(0.0)];
        ps.sort();
        assert_eq!(ps, vec![p(0.0), p(0.1), p(0.2), p(0.5), p(0.9), p(1.0)]);
        assert_eq!(*ps.iter().max().unwrap(), p(1.0));
        assert!(p(0.1) > p(0.09999));
        assert!(p(0.0) < p(0.01));
    }
    #[test]
    fn prob_display_from_str() {
        for x in [Prob::one(), p(0.5), lp(-1000.0)] {
            assert_eq!(Prob::from_str(&x.to_string()).unwrap(), x);
        }
        assert_eq!(Prob::from_str("-inf(0.0000)").unwrap(), Prob::zero());
        assert_eq!(Prob::from_str("0").unwrap(), Prob::one());
        assert!(Prob::from_str("hoge").is_err());
    }
    #[test]
    fn prob_diff() {
        let p1 = Prob::one();
        let p05 = p(0.5);
        let p0 = Prob::zero();
        assert_eq!(0.0, p1.log_diff(p1));
        assert_eq!(0.0, p05.log_diff(p05));
        assert_eq!(0.0, p0.log_diff(p0));
        assert_eq!(f64::INFINITY, p0.log_diff(p1));
        assert_eq!(f64::INFINITY, p1.log_diff(p0));
        assert_abs_diff_eq!(p1.diff(p05), 0.5, epsilon = 1e-12);
    }
    #[test]
    fn prob_tiny_values_do_not_underflow() {
        // 0.1^1000 is far below f64::MIN_POSITIVE
        let x: Prob = std::iter::repeat(p(0.1)).take(1000).product();
        assert!(!x.is_zero());
        assert_abs_diff_eq!(x.to_log_value(), 1000.0 * 0.1f64.ln(), epsilon = 1e-8);
    }
}
