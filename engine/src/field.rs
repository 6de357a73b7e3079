//! Numeric field abstraction
//!
//! Probabilities and payoffs are generic over `Field`. Floating point types
//! compare with tolerance in tests; exact types (rationals, algebraic numbers)
//! get exact identities such as "terminal realization probabilities sum to 1".

use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};

/// Arithmetic required of the probability/payoff type.
pub trait Field:
    Clone
    + fmt::Debug
    + fmt::Display
    + PartialEq
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
{
    /// Additive identity
    fn zero() -> Self;

    /// Multiplicative identity
    fn one() -> Self;

    /// Embed a count (used for uniform `1/k` probabilities)
    fn from_usize(n: usize) -> Self;

    /// Exponential, or `None` when the result is not representable.
    ///
    /// Exact fields have no closed exponential and should return `None`.
    fn exp(&self) -> Option<Self>;

    fn is_zero(&self) -> bool {
        *self == Self::zero()
    }

    /// Equality up to rounding; exact unless the type overrides it.
    fn approx_eq(&self, other: &Self) -> bool {
        self == other
    }

    /// The larger of two values (`self` on ties or incomparable values)
    fn max_of(self, other: Self) -> Self {
        if other > self {
            other
        } else {
            self
        }
    }

    /// The smaller of two values (`self` on ties or incomparable values)
    fn min_of(self, other: Self) -> Self {
        if other < self {
            other
        } else {
            self
        }
    }
}

impl Field for f64 {
    fn zero() -> Self {
        0.0
    }

    fn one() -> Self {
        1.0
    }

    fn from_usize(n: usize) -> Self {
        n as f64
    }

    fn exp(&self) -> Option<Self> {
        let e = f64::exp(*self);
        e.is_finite().then_some(e)
    }

    fn approx_eq(&self, other: &Self) -> bool {
        (self - other).abs() <= 1e-9
    }
}

impl Field for f32 {
    fn zero() -> Self {
        0.0
    }

    fn one() -> Self {
        1.0
    }

    fn from_usize(n: usize) -> Self {
        n as f32
    }

    fn exp(&self) -> Option<Self> {
        let e = f32::exp(*self);
        e.is_finite().then_some(e)
    }

    fn approx_eq(&self, other: &Self) -> bool {
        (self - other).abs() <= 1e-5
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cmp::Ordering;

    /// Exact fraction over i64, reduced on construction. Test-only field.
    #[derive(Debug, Clone, Copy)]
    pub struct Frac {
        num: i64,
        den: i64,
    }

    fn gcd(a: i64, b: i64) -> i64 {
        if b == 0 {
            a.abs()
        } else {
            gcd(b, a % b)
        }
    }

    impl Frac {
        pub fn new(num: i64, den: i64) -> Self {
            assert!(den != 0, "zero denominator");
            let g = gcd(num, den).max(1);
            let sign = if den < 0 { -1 } else { 1 };
            Frac {
                num: sign * num / g,
                den: sign * den / g,
            }
        }

        pub fn int(n: i64) -> Self {
            Frac::new(n, 1)
        }
    }

    impl PartialEq for Frac {
        fn eq(&self, other: &Self) -> bool {
            self.num == other.num && self.den == other.den
        }
    }

    impl PartialOrd for Frac {
        fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
            (self.num * other.den).partial_cmp(&(other.num * self.den))
        }
    }

    impl fmt::Display for Frac {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            if self.den == 1 {
                write!(f, "{}", self.num)
            } else {
                write!(f, "{}/{}", self.num, self.den)
            }
        }
    }

    impl Add for Frac {
        type Output = Frac;
        fn add(self, o: Frac) -> Frac {
            Frac::new(self.num * o.den + o.num * self.den, self.den * o.den)
        }
    }

    impl Sub for Frac {
        type Output = Frac;
        fn sub(self, o: Frac) -> Frac {
            Frac::new(self.num * o.den - o.num * self.den, self.den * o.den)
        }
    }

    impl Mul for Frac {
        type Output = Frac;
        fn mul(self, o: Frac) -> Frac {
            Frac::new(self.num * o.num, self.den * o.den)
        }
    }

    impl Div for Frac {
        type Output = Frac;
        fn div(self, o: Frac) -> Frac {
            Frac::new(self.num * o.den, self.den * o.num)
        }
    }

    impl Neg for Frac {
        type Output = Frac;
        fn neg(self) -> Frac {
            Frac::new(-self.num, self.den)
        }
    }

    impl AddAssign for Frac {
        fn add_assign(&mut self, o: Frac) {
            *self = *self + o;
        }
    }

    impl SubAssign for Frac {
        fn sub_assign(&mut self, o: Frac) {
            *self = *self - o;
        }
    }

    impl MulAssign for Frac {
        fn mul_assign(&mut self, o: Frac) {
            *self = *self * o;
        }
    }

    impl Field for Frac {
        fn zero() -> Self {
            Frac::int(0)
        }

        fn one() -> Self {
            Frac::int(1)
        }

        fn from_usize(n: usize) -> Self {
            Frac::int(n as i64)
        }

        fn exp(&self) -> Option<Self> {
            None
        }
    }

    #[test]
    fn test_frac_reduces() {
        assert_eq!(Frac::new(2, 4), Frac::new(1, 2));
        assert_eq!(Frac::new(3, -6), Frac::new(-1, 2));
        assert_eq!(Frac::new(1, 3) + Frac::new(2, 3), Frac::one());
    }

    #[test]
    fn test_f64_exp_overflow_is_none() {
        assert_eq!(Field::exp(&0.0_f64), Some(1.0));
        assert_eq!(Field::exp(&1000.0_f64), None);
        assert_eq!(Field::exp(&f64::NAN), None);
    }

    #[test]
    fn test_approx_eq() {
        assert!((0.1_f64 + 0.2 + 0.7).approx_eq(&1.0));
        assert!(!0.9_f64.approx_eq(&1.0));
        assert!(Frac::new(2, 6).approx_eq(&Frac::new(1, 3)));
        assert!(!Frac::new(1, 3).approx_eq(&Frac::new(1, 2)));
    }

    #[test]
    fn test_max_min_of() {
        assert_eq!(2.0_f64.max_of(3.0), 3.0);
        assert_eq!(2.0_f64.min_of(3.0), 2.0);
        assert_eq!(Frac::new(1, 2).max_of(Frac::new(1, 3)), Frac::new(1, 2));
    }
}
